use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::llm_client::StructuredResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
    pub tone_score: i64,
    pub clarity_score: i64,
}

impl StructuredResponse for EmailContent {
    const NAME: &'static str = "EmailContent";

    fn safe_default() -> Self {
        Self {
            subject: String::new(),
            body: String::new(),
            tone_score: 0,
            clarity_score: 0,
        }
    }
}
