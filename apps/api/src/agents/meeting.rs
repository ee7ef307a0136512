//! Meeting scheduler.

use std::ops::RangeInclusive;

use serde::Deserialize;

use crate::agents::build_prompt;
use crate::agents::prompts::MEETING_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::{Invocation, StructuredInvoker};
use crate::models::MeetingProposal;

pub const DURATION_RANGE_MINUTES: RangeInclusive<u32> = 15..=120;

#[derive(Debug, Clone, Deserialize)]
pub struct MeetingBrief {
    /// Comma separated.
    pub attendees: String,
    pub duration_minutes: u32,
    pub purpose: String,
    /// e.g. UTC, IST, PST, CET
    pub timezone: String,
}

impl MeetingBrief {
    pub fn validate(&self) -> Result<(), AppError> {
        if !DURATION_RANGE_MINUTES.contains(&self.duration_minutes) {
            return Err(AppError::Validation(format!(
                "duration_minutes must be between {} and {}",
                DURATION_RANGE_MINUTES.start(),
                DURATION_RANGE_MINUTES.end()
            )));
        }
        Ok(())
    }
}

pub fn build_meeting_prompt(brief: &MeetingBrief) -> String {
    let duration = brief.duration_minutes.to_string();
    build_prompt(
        MEETING_PROMPT_TEMPLATE,
        &[
            ("attendees", brief.attendees.as_str()),
            ("duration", duration.as_str()),
            ("purpose", brief.purpose.as_str()),
            ("timezone", brief.timezone.as_str()),
        ],
    )
}

pub async fn schedule_meeting(
    llm: &StructuredInvoker,
    brief: &MeetingBrief,
) -> Invocation<MeetingProposal> {
    llm.invoke(&build_meeting_prompt(brief)).await
}
