// Response schemas the agents ask the model to fill, plus the in-memory account record.

pub mod code;
pub mod document;
pub mod email;
pub mod meeting;
pub mod news;
pub mod resume;
pub mod user;

pub use code::CodeAnalysis;
pub use document::QAResponse;
pub use email::EmailContent;
pub use meeting::MeetingProposal;
pub use news::NewsAnalysis;
pub use resume::ResumeAnalysis;
