pub mod feedback_report;
pub mod submit_feedback;
