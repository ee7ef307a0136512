use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::llm_client::StructuredResponse;

/// Résumé scored against a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResumeAnalysis {
    pub name: String,
    pub contact_info: String,
    pub experience_summary: String,
    /// 0 – 100
    pub match_score: i64,
    pub is_good_fit: bool,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub missing_keywords: Vec<String>,
    /// Sub-score name → score.
    pub score_breakdown: BTreeMap<String, f64>,
    pub detailed_report: String,
}

impl StructuredResponse for ResumeAnalysis {
    const NAME: &'static str = "ResumeAnalysis";

    fn safe_default() -> Self {
        Self {
            name: String::new(),
            contact_info: String::new(),
            experience_summary: String::new(),
            match_score: 0,
            is_good_fit: false,
            strengths: vec![],
            weaknesses: vec![],
            missing_keywords: vec![],
            score_breakdown: BTreeMap::new(),
            detailed_report: String::new(),
        }
    }
}
