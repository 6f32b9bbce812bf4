//! Benefits enrollment actions.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{stub_payload, ParamKind, Tool, ToolParameter};

/// Submit or adjust benefits enrollment selections.
pub struct BenefitsEnrollment;

#[async_trait]
impl Tool for BenefitsEnrollment {
    fn name(&self) -> &str {
        "benefits_enrollment"
    }

    fn description(&self) -> &str {
        "Help with benefits enrollment during open enrollment or life events"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::new(
                "employee_id",
                ParamKind::String,
                "Employee identification number",
            ),
            ToolParameter::new(
                "enrollment_type",
                ParamKind::String,
                "Type of enrollment (open_enrollment, new_hire, life_event)",
            ),
            ToolParameter::new(
                "benefits_selections",
                ParamKind::Map,
                "Dictionary of benefit selections and choices",
            ),
        ]
    }

    async fn execute(&self, args: &Map<String, Value>) -> anyhow::Result<String> {
        // Placeholder implementation; replace with the enrollment workflow
        Ok(stub_payload(self.name(), args))
    }
}
