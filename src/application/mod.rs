pub mod use_cases;

pub use use_cases::feedback_report::FeedbackReportUseCase;
pub use use_cases::submit_feedback::{SubmissionOutcome, SubmitFeedbackUseCase};
