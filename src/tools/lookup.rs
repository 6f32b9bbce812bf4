//! Read-only benefits lookups: plan details and PTO balances.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{stub_payload, ParamKind, Tool, ToolParameter};

/// Look up health insurance plan details.
pub struct HealthInsuranceLookup;

#[async_trait]
impl Tool for HealthInsuranceLookup {
    fn name(&self) -> &str {
        "health_insurance_lookup"
    }

    fn description(&self) -> &str {
        "Look up health insurance plan details, coverage, and costs"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::new(
                "plan_id",
                ParamKind::String,
                "Health insurance plan identifier",
            ),
            ToolParameter::new(
                "employee_tier",
                ParamKind::String,
                "Employee tier (individual, family, employee_spouse, employee_children)",
            ),
            ToolParameter::new(
                "state",
                ParamKind::String,
                "State where the employee is located",
            )
            .optional(),
        ]
    }

    async fn execute(&self, args: &Map<String, Value>) -> anyhow::Result<String> {
        // Placeholder implementation; replace with real plan lookup
        Ok(stub_payload(self.name(), args))
    }
}

/// Check PTO balances and accrual.
pub struct PtoBalanceLookup;

#[async_trait]
impl Tool for PtoBalanceLookup {
    fn name(&self) -> &str {
        "pto_balance_lookup"
    }

    fn description(&self) -> &str {
        "Check paid time off balance and accrual information"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::new(
                "employee_id",
                ParamKind::String,
                "Employee identification number",
            ),
            ToolParameter::new(
                "balance_type",
                ParamKind::String,
                "Type of PTO balance to check (vacation, sick, personal, total)",
            )
            .optional(),
        ]
    }

    async fn execute(&self, args: &Map<String, Value>) -> anyhow::Result<String> {
        // Placeholder implementation; replace with an HRIS/leave system call
        Ok(stub_payload(self.name(), args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn lookup_stubs_echo_their_arguments() {
        let mut args = Map::new();
        args.insert("employee_id".to_string(), json!("E-1042"));

        let output = PtoBalanceLookup.execute(&args).await.unwrap();
        let payload: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(payload["input"]["employee_id"], "E-1042");
        assert_eq!(
            payload["note"],
            "Stub pto_balance_lookup implementation. Replace with real logic."
        );
    }

    #[test]
    fn health_lookup_requires_plan_and_tier() {
        let params = HealthInsuranceLookup.parameters();
        assert_eq!(params.len(), 3);
        assert!(params[0].required);
        assert!(params[1].required);
        assert!(!params[2].required);
    }
}
