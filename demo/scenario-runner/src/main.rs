// Scenario runner - drives the fraud engine through the known fraud
// patterns and a synthetic batch, printing assessments as JSON.

use anyhow::Result;
use fraud_engine::{
    BatchAnalyzer, EngineConfig, FeatureRecord, FraudScorer, SignalSource,
};
use rand::Rng;
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

struct Scenario {
    name: &'static str,
    description: &'static str,
    record: FeatureRecord,
}

fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "MICROPAY SCAM",
            description: "₹1 'verification' followed by ₹50,000 transfer",
            record: FeatureRecord::new()
                .with("amount", 50_000.0)
                .with("hour", 3.0)
                .with("txns_last_1h", 8.0)
                .with("is_new_recipient", 1.0),
        },
        Scenario {
            name: "VELOCITY ATTACK",
            description: "9 transactions in 1 hour to new recipients",
            record: FeatureRecord::new()
                .with("amount", 20_000.0)
                .with("hour", 2.0)
                .with("txns_last_1h", 9.0)
                .with("is_new_recipient", 1.0),
        },
        Scenario {
            name: "NORMAL TRANSACTION",
            description: "Regular payment to known contact",
            record: FeatureRecord::new()
                .with("amount", 1_500.0)
                .with("hour", 15.0)
                .with("txns_last_1h", 1.0)
                .with("is_new_recipient", 0.0),
        },
        Scenario {
            name: "SUSPICIOUS BUT LEGIT",
            description: "Large payment but during business hours",
            record: FeatureRecord::new()
                .with("amount", 45_000.0)
                .with("hour", 11.0)
                .with("txns_last_1h", 1.0)
                .with("is_new_recipient", 0.0),
        },
    ]
}

/// Stand-in for a trained fraud model: scores the deviation of the amount
/// from the user's mean when the caller supplies `amount_z_score`.
struct ZScoreModel;

impl SignalSource for ZScoreModel {
    fn name(&self) -> &str {
        "xgboost"
    }

    fn score(&self, record: &FeatureRecord) -> Option<f64> {
        let z = record.get("amount_z_score")?.as_number()?;
        Some((z.abs() * 20.0).min(100.0))
    }
}

fn run_scenarios(scorer: &FraudScorer) {
    println!("\nDEMO SCENARIOS");
    println!("{}", "-".repeat(60));

    for scenario in scenarios() {
        println!("\n{}", scenario.name);
        println!("Description: {}", scenario.description);

        let result = scorer.assess(&scenario.record);
        println!("Risk Score: {}/100", result.risk_score);
        println!("Risk Level: {}", result.risk_level);
        println!("Action: {}", result.suggested_action);
        for reason in &result.explanations {
            println!("  - {reason}");
        }
    }
}

fn synthetic_batch(size: usize) -> Vec<serde_json::Value> {
    let mut rng = rand::thread_rng();
    let mut inputs = Vec::with_capacity(size);

    for i in 0..size {
        if i % 10 == 9 {
            // Malformed entries a real upload would contain
            inputs.push(json!(["corrupt row", i]));
            continue;
        }
        inputs.push(json!({
            "amount": rng.gen_range(100..50_000),
            "hour": rng.gen_range(0..24),
            "txns_last_1h": rng.gen_range(0..10),
            "is_new_recipient": rng.gen_range(0..2),
        }));
    }

    inputs
}

fn run_batch(scorer: &FraudScorer) {
    println!("\nBATCH ANALYSIS DEMO");
    println!("{}", "-".repeat(60));

    let inputs = synthetic_batch(50);
    let report = BatchAnalyzer::new(scorer).analyze(&inputs);

    println!("Total analyzed: {}", report.summary.total);
    println!("High risk: {}", report.summary.high);
    println!("Medium risk: {}", report.summary.medium);
    println!("Low risk: {}", report.summary.low);
    println!("Unprocessed: {}", report.summary.unprocessed);
    println!("Total amount: ₹{:.0}", report.summary.total_amount);

    println!("\nTop risky transactions:");
    for assessment in report.top_risky(3) {
        println!(
            "  {}: {}/100 -> {} ({})",
            assessment.transaction_id,
            assessment.risk_score,
            assessment.risk_level,
            assessment.top_reason().unwrap_or("No specific risk factors"),
        );
    }
}

fn run_fusion_example() -> Result<()> {
    println!("\nFUSION WITH AN EXTERNAL MODEL");
    println!("{}", "-".repeat(60));

    let scorer = FraudScorer::with_sources(EngineConfig::default(), vec![Box::new(ZScoreModel)])?;

    let record = FeatureRecord::new()
        .with("amount", 20_000.0)
        .with("hour", 2.0)
        .with("amount_z_score", 4.5);

    let result = scorer.assess(&record);
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

fn main() -> Result<()> {
    FmtSubscriber::builder().with_max_level(Level::INFO).init();

    println!("{}", "=".repeat(60));
    println!("DEMO: UPI FRAUD DETECTION SYSTEM");
    println!("{}", "=".repeat(60));

    info!("initializing fraud scorer with default configuration");
    let scorer = FraudScorer::new(EngineConfig::default())?;

    run_scenarios(&scorer);
    run_batch(&scorer);
    run_fusion_example()?;

    println!("\nDEMO COMPLETE");
    Ok(())
}
