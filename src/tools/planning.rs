//! Retirement and contribution planning tools.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::{stub_payload, ParamKind, Tool, ToolParameter};

/// Target share of expected expenses to cover with pre-tax contributions.
/// Aiming below 100% keeps forfeiture risk down on use-it-or-lose-it plans.
const TARGET_RATIO: f64 = 0.8;

/// FSA annual cap (2025-ish, not authoritative).
const FSA_CAP: f64 = 3150.0;

/// HSA individual annual cap (2025-ish, not authoritative).
const HSA_CAP_INDIVIDUAL: f64 = 4150.0;

/// Project pension benefits from salary and service history.
pub struct CalculatePension;

#[async_trait]
impl Tool for CalculatePension {
    fn name(&self) -> &str {
        "calculate_pension"
    }

    fn description(&self) -> &str {
        "Calculate pension benefits based on salary, years of service, and retirement age"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::new(
                "current_salary",
                ParamKind::Float,
                "Current annual salary in USD",
            ),
            ToolParameter::new(
                "years_of_service",
                ParamKind::Integer,
                "Number of years of service with the company",
            ),
            ToolParameter::new(
                "retirement_age",
                ParamKind::Integer,
                "Planned retirement age",
            ),
            ToolParameter::new(
                "pension_plan_type",
                ParamKind::String,
                "Type of pension plan (defined_benefit, defined_contribution, hybrid)",
            )
            .optional(),
        ]
    }

    async fn execute(&self, args: &Map<String, Value>) -> anyhow::Result<String> {
        // Placeholder implementation; replace with real pension math
        Ok(stub_payload(self.name(), args))
    }
}

/// Recommend FSA/HSA contributions from expected medical expenses.
///
/// The only tool with real computation: a small heuristic, not plan-aware
/// advice. Caps and ratios are hard-coded assumptions echoed in the output.
pub struct FsaHsaCalculator;

#[async_trait]
impl Tool for FsaHsaCalculator {
    fn name(&self) -> &str {
        "fsa_hsa_calculator"
    }

    fn description(&self) -> &str {
        "Calculate optimal FSA/HSA contributions based on expected medical expenses"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::new(
                "expected_medical_expenses",
                ParamKind::Float,
                "Expected annual medical expenses in USD",
            ),
            ToolParameter::new(
                "account_type",
                ParamKind::String,
                "Type of account (FSA, HSA, both)",
            ),
            ToolParameter::new("current_age", ParamKind::Integer, "Employee's current age")
                .optional(),
            ToolParameter::new(
                "retirement_age",
                ParamKind::Integer,
                "Expected retirement age",
            )
            .optional(),
        ]
    }

    async fn execute(&self, args: &Map<String, Value>) -> anyhow::Result<String> {
        let mut expenses = number_or_zero(args.get("expected_medical_expenses"));
        if expenses < 0.0 {
            expenses = 0.0;
        }

        let account_type = args
            .get("account_type")
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim()
            .to_lowercase();

        let current_age = args.get("current_age").cloned().unwrap_or(Value::Null);
        let retirement_age = args.get("retirement_age").cloned().unwrap_or(Value::Null);

        let mut recommendations = Map::new();
        let mut rationale = Map::new();

        match account_type.as_str() {
            "fsa" => {
                let rec = f64::min(expenses * TARGET_RATIO, FSA_CAP);
                recommendations.insert("fsa".into(), json!(round2(rec)));
                rationale.insert(
                    "fsa".into(),
                    json!("Recommend ~80% of expected expenses up to the FSA cap to reduce forfeiture risk."),
                );
            }
            "hsa" => {
                let rec = f64::min(expenses * TARGET_RATIO, HSA_CAP_INDIVIDUAL);
                recommendations.insert("hsa".into(), json!(round2(rec)));
                rationale.insert(
                    "hsa".into(),
                    json!("Recommend ~80% of expected expenses up to the HSA cap. Consider catch-up if eligible."),
                );
            }
            "both" => {
                // Prioritize the HSA (tax advantages + rollover), remainder to FSA
                let hsa_target = f64::min(expenses * 0.5, HSA_CAP_INDIVIDUAL);
                let remaining = f64::max(expenses * TARGET_RATIO - hsa_target, 0.0);
                let fsa_target = f64::min(remaining, FSA_CAP);
                recommendations.insert("hsa".into(), json!(round2(hsa_target)));
                recommendations.insert("fsa".into(), json!(round2(fsa_target)));
                rationale.insert(
                    "hsa".into(),
                    json!("Prioritize HSA for tax efficiency and rollover; allocate ~50% of target there first."),
                );
                rationale.insert(
                    "fsa".into(),
                    json!("Allocate remaining target to FSA up to the cap; avoid exceeding likely expenses."),
                );
            }
            _ => {
                let neutral = f64::min(
                    expenses * TARGET_RATIO,
                    f64::max(FSA_CAP, HSA_CAP_INDIVIDUAL),
                );
                recommendations.insert("suggested_contribution".into(), json!(round2(neutral)));
                rationale.insert(
                    "note".into(),
                    json!("Unknown account_type; suggested a single neutral target based on expected expenses."),
                );
            }
        }

        let result = json!({
            "input": {
                "expected_medical_expenses": expenses,
                "account_type": account_type,
                "current_age": current_age,
                "retirement_age": retirement_age,
            },
            "recommendations": recommendations,
            "assumptions": {
                "target_ratio": TARGET_RATIO,
                "fsa_cap": FSA_CAP,
                "hsa_cap_individual": HSA_CAP_INDIVIDUAL,
            },
            "rationale": rationale,
            "disclaimer": "This is a non-binding illustrative calculation. Consult plan documents and a tax advisor.",
        });

        Ok(result.to_string())
    }
}

/// Numeric coercion matching what callers actually send: plain numbers or
/// numeric strings. Anything else counts as zero rather than failing.
fn number_or_zero(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    async fn run_calculator(pairs: &[(&str, Value)]) -> Value {
        let output = FsaHsaCalculator.execute(&args(pairs)).await.unwrap();
        serde_json::from_str(&output).unwrap()
    }

    #[test]
    fn pension_declares_four_parameters() {
        let params = CalculatePension.parameters();
        assert_eq!(params.len(), 4);
        assert!(params[0].required);
        assert_eq!(params[0].kind, ParamKind::Float);
        assert!(!params[3].required);
    }

    #[tokio::test]
    async fn pension_stub_echoes_input() {
        let input = args(&[
            ("current_salary", json!(90000.0)),
            ("years_of_service", json!(10)),
            ("retirement_age", json!(65)),
        ]);
        let output = CalculatePension.execute(&input).await.unwrap();
        let payload: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(payload["input"]["current_salary"], 90000.0);
        assert_eq!(payload["input"]["years_of_service"], 10);
        assert_eq!(
            payload["note"],
            "Stub calculate_pension implementation. Replace with real logic."
        );
    }

    #[tokio::test]
    async fn fsa_recommendation_is_eighty_percent_of_expenses() {
        let payload = run_calculator(&[
            ("expected_medical_expenses", json!(2000.0)),
            ("account_type", json!("fsa")),
        ])
        .await;
        assert_eq!(payload["recommendations"]["fsa"], 1600.0);
    }

    #[tokio::test]
    async fn fsa_recommendation_is_capped() {
        let payload = run_calculator(&[
            ("expected_medical_expenses", json!(10000.0)),
            ("account_type", json!("fsa")),
        ])
        .await;
        assert_eq!(payload["recommendations"]["fsa"], 3150.0);
    }

    #[tokio::test]
    async fn hsa_recommendation_is_capped() {
        let payload = run_calculator(&[
            ("expected_medical_expenses", json!(10000.0)),
            ("account_type", json!("hsa")),
        ])
        .await;
        assert_eq!(payload["recommendations"]["hsa"], 4150.0);
    }

    #[tokio::test]
    async fn both_splits_between_hsa_and_fsa() {
        let payload = run_calculator(&[
            ("expected_medical_expenses", json!(4000.0)),
            ("account_type", json!("both")),
        ])
        .await;
        // hsa gets 50% of expenses, fsa the remainder of the 80% target
        assert_eq!(payload["recommendations"]["hsa"], 2000.0);
        assert_eq!(payload["recommendations"]["fsa"], 1200.0);
    }

    #[tokio::test]
    async fn unknown_account_type_gets_neutral_suggestion() {
        let payload = run_calculator(&[
            ("expected_medical_expenses", json!(2000.0)),
            ("account_type", json!("401k")),
        ])
        .await;
        assert_eq!(payload["recommendations"]["suggested_contribution"], 1600.0);
        assert!(payload["rationale"]["note"]
            .as_str()
            .unwrap()
            .contains("Unknown account_type"));
    }

    #[tokio::test]
    async fn account_type_is_normalized() {
        let payload = run_calculator(&[
            ("expected_medical_expenses", json!(1000.0)),
            ("account_type", json!("  FSA  ")),
        ])
        .await;
        assert_eq!(payload["input"]["account_type"], "fsa");
        assert_eq!(payload["recommendations"]["fsa"], 800.0);
    }

    #[tokio::test]
    async fn negative_and_unparseable_expenses_count_as_zero() {
        let negative = run_calculator(&[
            ("expected_medical_expenses", json!(-500.0)),
            ("account_type", json!("fsa")),
        ])
        .await;
        assert_eq!(negative["recommendations"]["fsa"], 0.0);

        let garbage = run_calculator(&[
            ("expected_medical_expenses", json!("lots")),
            ("account_type", json!("hsa")),
        ])
        .await;
        assert_eq!(garbage["recommendations"]["hsa"], 0.0);
    }

    #[tokio::test]
    async fn numeric_string_expenses_are_coerced() {
        let payload = run_calculator(&[
            ("expected_medical_expenses", json!("2500")),
            ("account_type", json!("fsa")),
        ])
        .await;
        assert_eq!(payload["recommendations"]["fsa"], 2000.0);
    }

    #[tokio::test]
    async fn recommendations_are_rounded_to_cents() {
        let payload = run_calculator(&[
            ("expected_medical_expenses", json!(1234.567)),
            ("account_type", json!("fsa")),
        ])
        .await;
        assert_eq!(payload["recommendations"]["fsa"], 987.65);
    }
}
