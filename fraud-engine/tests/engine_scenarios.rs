//! End-to-end scenarios through the full pipeline: rules, fusion,
//! classification, and batch evaluation.

use fraud_engine::{
    BatchAnalyzer, EngineConfig, FeatureRecord, FraudScorer, FusionPolicy, RiskBands, RiskLevel,
};
use proptest::prelude::*;
use serde_json::json;

fn scorer() -> FraudScorer {
    FraudScorer::new(EngineConfig::default()).unwrap()
}

#[test]
fn micropay_scam_blocks() {
    // ₹1 "verification" followed by a ₹50,000 transfer at 3AM
    let record = FeatureRecord::new()
        .with("amount", 50_000.0)
        .with("hour", 3.0)
        .with("txns_last_1h", 8.0)
        .with("is_new_recipient", 1.0);

    let assessment = scorer().assess(&record);

    assert_eq!(assessment.risk_score, 100.0);
    assert_eq!(assessment.risk_level, RiskLevel::High);
    assert_eq!(
        assessment.suggested_action,
        "BLOCK - Requires additional verification"
    );
    assert!(!assessment.explanations.is_empty());
}

#[test]
fn velocity_attack_blocks() {
    // 9 transactions in one hour to a new recipient, at 2AM
    let record = FeatureRecord::new()
        .with("amount", 20_000.0)
        .with("hour", 2.0)
        .with("txns_last_1h", 9.0)
        .with("is_new_recipient", 1.0);

    let assessment = scorer().assess(&record);

    // 30 + 25 + 30 + 25 = 110 raw, clamped to 100
    assert_eq!(assessment.risk_score, 100.0);
    assert_eq!(assessment.risk_level, RiskLevel::High);
    assert!(assessment
        .explanations
        .contains(&"High velocity (9 transactions/hour)".to_string()));
}

#[test]
fn normal_transaction_allows() {
    let record = FeatureRecord::new()
        .with("amount", 1_500.0)
        .with("hour", 15.0)
        .with("txns_last_1h", 1.0)
        .with("is_new_recipient", 0.0);

    let assessment = scorer().assess(&record);

    assert_eq!(assessment.risk_score, 0.0);
    assert_eq!(assessment.risk_level, RiskLevel::Low);
    assert_eq!(assessment.suggested_action, "ALLOW - Appears legitimate");
    assert!(assessment.explanations.is_empty());
}

#[test]
fn large_daytime_payment_stays_low() {
    // Large payment to a known recipient during business hours
    let record = FeatureRecord::new()
        .with("amount", 45_000.0)
        .with("hour", 11.0)
        .with("txns_last_1h", 1.0)
        .with("is_new_recipient", 0.0);

    let assessment = scorer().assess(&record);

    // Only the ₹10,000 amount rule fires
    assert_eq!(assessment.risk_score, 30.0);
    assert_eq!(assessment.risk_level, RiskLevel::Low);
}

#[test]
fn assessment_is_idempotent() {
    let engine = scorer();
    let record = FeatureRecord::new()
        .with("amount", 20_000.0)
        .with("hour", 2.0)
        .with("is_new_recipient", 1.0);

    let first = engine.assess_with_id("TXN_X", &record);
    let second = engine.assess_with_id("TXN_X", &record);

    assert_eq!(first.risk_score, second.risk_score);
    assert_eq!(first.risk_level, second.risk_level);
    assert_eq!(first.explanations, second.explanations);
    assert_eq!(first.breakdown, second.breakdown);
}

#[test]
fn result_json_contract() {
    let record = FeatureRecord::new()
        .with("transaction_id", "TXN_000123")
        .with("amount", 60_000.0);

    let assessment = scorer().assess(&record);
    let value = serde_json::to_value(&assessment).unwrap();

    assert_eq!(value["transaction_id"], "TXN_000123");
    assert_eq!(value["risk_score"], 70.0);
    assert_eq!(value["risk_level"], "HIGH");
    assert_eq!(
        value["suggested_action"],
        "BLOCK - Requires additional verification"
    );
    assert!(value["explanations"].is_array());
    assert_eq!(value["breakdown"]["rule_engine_score"], 70.0);
}

#[test]
fn batch_of_fifty_with_five_bad_entries() {
    let engine = scorer();
    let analyzer = BatchAnalyzer::new(&engine);

    let mut inputs = Vec::new();
    for i in 0..50 {
        if i % 10 == 7 {
            // Five entries that cannot be coerced
            inputs.push(json!(["broken", i]));
        } else {
            inputs.push(json!({
                "amount": 1000 + i * 100,
                "hour": (i % 24),
                "txns_last_1h": (i % 8),
                "is_new_recipient": (i % 2),
            }));
        }
    }

    let report = analyzer.analyze(&inputs);

    assert_eq!(report.assessments.len(), 45);
    assert_eq!(report.summary.unprocessed, 5);
    assert_eq!(
        report.summary.high + report.summary.medium + report.summary.low,
        45
    );
}

#[test]
fn custom_config_reshapes_decisions() {
    let raw = r#"
        [[rules]]
        kind = "amount_above"
        threshold = 1000.0
        points = 80.0

        [[bands]]
        level = "LOW"
        from = 0.0
        to = 40.0

        [[bands]]
        level = "MEDIUM"
        from = 40.0
        to = 70.0

        [[bands]]
        level = "HIGH"
        from = 70.0
        to = 100.0
    "#;
    let config = EngineConfig::from_toml_str(raw).unwrap();
    let engine = FraudScorer::new(config).unwrap();

    let record = FeatureRecord::new().with("amount", 2_000.0);
    let assessment = engine.assess(&record);
    assert_eq!(assessment.risk_score, 80.0);
    assert_eq!(assessment.risk_level, RiskLevel::High);
}

#[test]
fn malformed_bands_fail_startup() {
    let mut config = EngineConfig::default();
    config.bands.bands[1].from = 45.0; // gap between LOW and MEDIUM
    assert!(FraudScorer::new(config).is_err());
}

#[test]
fn malformed_fusion_weights_fail_startup() {
    let mut config = EngineConfig::default();
    config.fusion.rule_weight = 0.9; // sum now exceeds 1
    assert!(FraudScorer::new(config).is_err());
}

proptest! {
    #[test]
    fn rule_score_is_always_in_range(
        amount in 0.0f64..10_000_000.0,
        hour in 0u8..24,
        velocity in 0u32..1_000,
        new_recipient: bool,
    ) {
        let record = FeatureRecord::new()
            .with("amount", amount)
            .with("hour", f64::from(hour))
            .with("txns_last_1h", f64::from(velocity))
            .with("is_new_recipient", new_recipient);

        let assessment = scorer().assess(&record);
        prop_assert!(assessment.risk_score >= 0.0);
        prop_assert!(assessment.risk_score <= 100.0);
        prop_assert!(assessment.breakdown.rule_engine_score >= 0.0);
        prop_assert!(assessment.breakdown.rule_engine_score <= 100.0);
    }

    #[test]
    fn every_score_gets_exactly_one_tier(score in 0.0f64..=100.0) {
        let engine = scorer();
        let level = engine.classifier().classify(score);

        let expected = if score < 40.0 {
            RiskLevel::Low
        } else if score < 70.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        };
        prop_assert_eq!(level, expected);
    }

    #[test]
    fn fusion_without_externals_matches_rule_score(rule_score in 0.0f64..=100.0) {
        let policy = FusionPolicy::default();
        prop_assert_eq!(policy.fuse(rule_score, &[]), rule_score);
    }

    #[test]
    fn default_bands_partition_the_range(score in 0.0f64..=100.0) {
        let bands = RiskBands::default();
        let covering = bands
            .bands
            .iter()
            .filter(|band| {
                (score >= band.from && score < band.to)
                    || (score == 100.0 && band.to == 100.0)
            })
            .count();
        prop_assert_eq!(covering, 1);
    }
}
