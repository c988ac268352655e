use std::sync::{Arc, Mutex};

use tracing::error;

use crate::application::{FeedbackReportUseCase, SubmitFeedbackUseCase};
use crate::domain::error::Result;
use crate::domain::settings::AppSettings;
use crate::infrastructure::assets::BackgroundImage;
use crate::infrastructure::classifiers::build_classifier;
use crate::infrastructure::storage::{CsvFeedbackStore, FeedbackStore};
use crate::interfaces::http::{add_log, LogEntry};
use crate::interfaces::AppState;

/// Wire the classifier, the report store and the use cases.
///
/// Missing model artifacts or a configured but missing background image stop
/// startup here, before the server binds.
pub fn setup(settings: &AppSettings) -> Result<Arc<AppState>> {
    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));

    let classifier = build_classifier(&settings.classifier).map_err(|err| {
        error!(error = %err, kind = %settings.classifier.kind, "Failed to load sentiment classifier");
        err
    })?;
    add_log(
        &logs,
        "INFO",
        "Classifier",
        &format!("Using {} classifier", classifier.name()),
    );

    let store: Arc<dyn FeedbackStore> =
        Arc::new(CsvFeedbackStore::new(&settings.storage.report_file));
    add_log(
        &logs,
        "INFO",
        "Storage",
        &format!("Feedback report file: {}", store.location()),
    );

    let background = load_background(settings)?;

    let classifier_name = classifier.name();
    let submit_feedback_use_case = SubmitFeedbackUseCase::new(classifier, store.clone());
    let feedback_report_use_case = FeedbackReportUseCase::new(store);

    Ok(Arc::new(AppState {
        submit_feedback_use_case,
        feedback_report_use_case,
        classifier_name,
        ui: settings.ui.clone(),
        background,
        logs,
    }))
}

fn load_background(settings: &AppSettings) -> Result<Option<BackgroundImage>> {
    let Some(path) = settings.ui.background_image.as_deref() else {
        return Ok(None);
    };
    BackgroundImage::load(path).map(Some).map_err(|err| {
        error!(error = %err, path = %path.display(), "Failed to load background image");
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use crate::domain::settings::ClassifierKind;
    use crate::infrastructure::classifiers::model::fixtures::write_artifacts;

    fn settings(dir: &std::path::Path) -> AppSettings {
        let mut settings = AppSettings::default();
        settings.storage.report_file = dir.join("feedback.csv");
        settings.classifier.model_dir = dir.to_path_buf();
        settings
    }

    #[test]
    fn test_setup_with_model_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path(), true);

        let state = setup(&settings(dir.path())).unwrap();
        assert_eq!(state.classifier_name, "model");
        assert!(state.background.is_none());
        assert_eq!(state.logs.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_artifacts_fail_fast() {
        let dir = tempfile::tempdir().unwrap();
        let result = setup(&settings(dir.path()));
        assert!(matches!(result, Err(AppError::ModelError(_))));
    }

    #[test]
    fn test_missing_background_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings(dir.path());
        settings.classifier.kind = ClassifierKind::Polarity;
        settings.ui.background_image = Some(dir.path().join("missing.jpg"));

        assert!(setup(&settings).is_err());
    }

    #[test]
    fn test_background_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("bg.png");
        std::fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();

        let mut settings = settings(dir.path());
        settings.classifier.kind = ClassifierKind::Polarity;
        settings.ui.background_image = Some(image);

        let state = setup(&settings).unwrap();
        let background = state.background.as_ref().unwrap();
        assert_eq!(background.mime, "image/png");
    }
}
