use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::llm_client::StructuredResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MeetingProposal {
    pub suggested_time: String,
    pub agenda_items: Vec<String>,
    pub duration_optimization: String,
    pub follow_up_actions: String,
}

impl StructuredResponse for MeetingProposal {
    const NAME: &'static str = "MeetingProposal";

    fn safe_default() -> Self {
        Self {
            suggested_time: String::new(),
            agenda_items: vec![],
            duration_optimization: String::new(),
            follow_up_actions: String::new(),
        }
    }
}
