use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::llm_client::StructuredResponse;

/// Authenticity verdict for a piece of news.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NewsAnalysis {
    /// true = fabricated or disproven, false = confirmed by sources.
    pub is_fake: bool,
    pub confidence: i64,
    pub reasons: Vec<String>,
    pub related_entities: Vec<String>,
    pub source_credibility: i64,
    pub supporting_evidence: Vec<String>,
}

impl StructuredResponse for NewsAnalysis {
    const NAME: &'static str = "NewsAnalysis";

    fn safe_default() -> Self {
        Self {
            is_fake: false,
            confidence: 0,
            reasons: vec![],
            related_entities: vec![],
            source_credibility: 0,
            supporting_evidence: vec![],
        }
    }
}
