use std::sync::{Arc, Mutex};

use crate::application::{FeedbackReportUseCase, SubmitFeedbackUseCase};
use crate::domain::settings::UiSettings;
use crate::infrastructure::assets::BackgroundImage;
use crate::interfaces::http::LogEntry;

pub struct AppState {
    pub submit_feedback_use_case: SubmitFeedbackUseCase,
    pub feedback_report_use_case: FeedbackReportUseCase,
    /// Name of the active classifier, reported by `/health`
    pub classifier_name: &'static str,
    pub ui: UiSettings,
    pub background: Option<BackgroundImage>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}
