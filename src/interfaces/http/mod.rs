pub mod charts;
pub mod views;

use crate::application::SubmissionOutcome;
use crate::domain::error::{AppError, Result};
use crate::domain::feedback::{FeedbackSubmission, Gender};
use crate::domain::settings::ServerSettings;
use crate::interfaces::AppState;
use actix_cors::Cors;
use actix_web::{
    dev::Server, get, http::StatusCode, post, web, App, HttpResponse, HttpServer, Responder,
};
use charts::{BarChart, PieChart};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};
use views::{FormValues, IndexPage, ResultView, Views};

const MAX_LOG_ENTRIES: usize = 100;
const NO_REPORT_DATA: &str = "No feedback data available yet.";
const NO_CHART_DATA: &str = "No feedback data available to show charts.";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub app: Arc<AppState>,
    pub views: Views,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub show_report: Option<String>,
    pub show_charts: Option<String>,
}

/// Urlencoded body of the feedback form
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    pub age: u32,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub feedback: String,
    pub show_report: Option<String>,
    pub show_charts: Option<String>,
}

impl SubmitForm {
    fn into_submission(self) -> FeedbackSubmission {
        FeedbackSubmission {
            name: self.name,
            gender: self.gender,
            age: self.age,
            email: self.email,
            feedback: self.feedback,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    classifier: &'static str,
}

/// Checkbox value: present and not an explicit "off"
fn toggle(value: Option<&str>) -> bool {
    match value {
        Some(v) => !matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "" | "0" | "false" | "off"
        ),
        None => false,
    }
}

fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_json(err: &AppError) -> HttpResponse {
    HttpResponse::build(status_for(err)).json(ErrorBody {
        error: err.to_string(),
    })
}

fn new_page(data: &HttpState) -> IndexPage {
    IndexPage::new(
        &data.app.ui.title,
        data.app.background.as_ref().map(|image| image.css()),
    )
}

async fn render_page(data: &HttpState, mut page: IndexPage, status: StatusCode) -> HttpResponse {
    if page.show_report || page.show_charts {
        match data.app.feedback_report_use_case.load().await {
            Ok(report) => page.report = report,
            Err(e) => {
                add_log(
                    &data.logs,
                    "ERROR",
                    "Report",
                    &format!("Failed to load feedback report: {}", e),
                );
                page.error.get_or_insert(e.to_string());
            }
        }
    }

    match data.views.index(&page) {
        Ok(html) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            error!(error = %e, "Failed to render page");
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

fn svg_response(rendered: Result<String>) -> HttpResponse {
    match rendered {
        Ok(svg) => HttpResponse::Ok()
            .content_type("image/svg+xml")
            .insert_header(("Cache-Control", "no-store"))
            .body(svg),
        Err(e) => {
            error!(error = %e, "Failed to render chart");
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[get("/")]
async fn index(data: web::Data<HttpState>, query: web::Query<ViewQuery>) -> impl Responder {
    let mut page = new_page(&data);
    page.show_report = toggle(query.show_report.as_deref());
    page.show_charts = toggle(query.show_charts.as_deref());
    render_page(&data, page, StatusCode::OK).await
}

#[post("/submit")]
async fn submit(data: web::Data<HttpState>, form: web::Form<SubmitForm>) -> impl Responder {
    let form = form.into_inner();
    let mut page = new_page(&data);
    page.show_report = toggle(form.show_report.as_deref());
    page.show_charts = toggle(form.show_charts.as_deref());

    let submission = form.into_submission();
    page.form = FormValues::from(&submission);

    let status = match data
        .app
        .submit_feedback_use_case
        .execute(submission)
        .await
    {
        Ok(SubmissionOutcome::Saved { classification, .. }) => {
            add_log(
                &data.logs,
                "INFO",
                "Feedback",
                &format!("Feedback saved as {}", classification.sentiment),
            );
            page.result = Some(ResultView::from(&classification));
            StatusCode::OK
        }
        Ok(SubmissionOutcome::Skipped) => StatusCode::OK,
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Feedback",
                &format!("Submission failed: {}", e),
            );
            page.error = Some(e.to_string());
            status_for(&e)
        }
    };

    render_page(&data, page, status).await
}

#[get("/charts/bar.svg")]
async fn bar_chart(data: web::Data<HttpState>) -> impl Responder {
    match data.app.feedback_report_use_case.distribution().await {
        Ok(Some(distribution)) => {
            svg_response(data.views.bar_chart(&BarChart::layout(&distribution)))
        }
        Ok(None) => HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body(NO_CHART_DATA),
        Err(e) => {
            add_log(&data.logs, "ERROR", "Charts", &format!("Bar chart failed: {}", e));
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[get("/charts/pie.svg")]
async fn pie_chart(data: web::Data<HttpState>) -> impl Responder {
    match data.app.feedback_report_use_case.distribution().await {
        Ok(Some(distribution)) => {
            svg_response(data.views.pie_chart(&PieChart::layout(&distribution)))
        }
        Ok(None) => HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body(NO_CHART_DATA),
        Err(e) => {
            add_log(&data.logs, "ERROR", "Charts", &format!("Pie chart failed: {}", e));
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[get("/health")]
async fn health(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(HealthBody {
        status: "ok",
        classifier: data.app.classifier_name,
    })
}

#[get("/report")]
async fn api_report(data: web::Data<HttpState>) -> impl Responder {
    match data.app.feedback_report_use_case.load().await {
        Ok(Some(report)) => HttpResponse::Ok().json(report),
        Ok(None) => HttpResponse::NotFound().json(ErrorBody {
            error: NO_REPORT_DATA.to_string(),
        }),
        Err(e) => error_json(&e),
    }
}

#[get("/distribution")]
async fn api_distribution(data: web::Data<HttpState>) -> impl Responder {
    match data.app.feedback_report_use_case.distribution().await {
        Ok(Some(distribution)) => HttpResponse::Ok().json(distribution),
        Ok(None) => HttpResponse::NotFound().json(ErrorBody {
            error: NO_CHART_DATA.to_string(),
        }),
        Err(e) => error_json(&e),
    }
}

#[post("/feedback")]
async fn api_feedback(
    data: web::Data<HttpState>,
    req: web::Json<FeedbackSubmission>,
) -> impl Responder {
    match data
        .app
        .submit_feedback_use_case
        .execute(req.into_inner())
        .await
    {
        Ok(outcome) => {
            if let SubmissionOutcome::Saved { classification, .. } = &outcome {
                add_log(
                    &data.logs,
                    "INFO",
                    "HttpApi",
                    &format!("Feedback saved as {}", classification.sentiment),
                );
            }
            HttpResponse::Ok().json(outcome)
        }
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Submission failed: {}", e),
            );
            error_json(&e)
        }
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = match data.logs.lock() {
        Ok(logs) => logs.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    HttpResponse::Ok().json(logs)
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    match level {
        "ERROR" => error!(source, "{}", message),
        "WARN" => warn!(source, "{}", message),
        _ => info!(source, "{}", message),
    }

    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = match logs.lock() {
        Ok(logs) => logs,
        Err(poisoned) => poisoned.into_inner(),
    };
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(submit)
        .service(bar_chart)
        .service(pie_chart)
        .service(health)
        .service(
            web::scope("/api")
                .wrap(Cors::permissive())
                .service(api_report)
                .service(api_distribution)
                .service(api_feedback)
                .service(get_logs),
        );
}

pub fn start_server(app: Arc<AppState>, settings: &ServerSettings) -> Result<Server> {
    let logs = app.logs.clone();
    let views = Views::new()?;
    let state = web::Data::new(HttpState { app, views, logs });

    let server = HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind((settings.host.as_str(), settings.port))
        .map_err(|e| {
            AppError::IoError(format!(
                "Failed to bind {}:{}: {}",
                settings.host, settings.port, e
            ))
        })?
        .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{FeedbackReportUseCase, SubmitFeedbackUseCase};
    use crate::domain::settings::UiSettings;
    use crate::domain::sentiment::Classification;
    use crate::infrastructure::classifiers::polarity::PolarityClassifier;
    use crate::infrastructure::classifiers::SentimentClassifier;
    use crate::infrastructure::storage::CsvFeedbackStore;
    use actix_web::test as actix_test;
    use std::path::Path;

    struct BrokenClassifier;

    #[async_trait::async_trait]
    impl SentimentClassifier for BrokenClassifier {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn classify(&self, _text: &str) -> Result<Classification> {
            Err(AppError::ModelError("vectorizer produced no features".to_string()))
        }
    }

    fn test_state(dir: &Path) -> web::Data<HttpState> {
        test_state_with(dir, Arc::new(PolarityClassifier::new()))
    }

    fn test_state_with(
        dir: &Path,
        classifier: Arc<dyn SentimentClassifier + Send + Sync>,
    ) -> web::Data<HttpState> {
        let store = Arc::new(CsvFeedbackStore::new(dir.join("EB mall_feedback.csv")));
        let classifier_name = classifier.name();
        let logs = Arc::new(Mutex::new(Vec::new()));
        let app = Arc::new(AppState {
            submit_feedback_use_case: SubmitFeedbackUseCase::new(classifier, store.clone()),
            feedback_report_use_case: FeedbackReportUseCase::new(store),
            classifier_name,
            ui: UiSettings::default(),
            background: None,
            logs: logs.clone(),
        });
        web::Data::new(HttpState {
            app,
            views: Views::new().unwrap(),
            logs,
        })
    }

    fn form(feedback: &str) -> Vec<(&'static str, String)> {
        vec![
            ("name", "Ana".to_string()),
            ("gender", "Female".to_string()),
            ("age", "30".to_string()),
            ("email", "ana@example.com".to_string()),
            ("feedback", feedback.to_string()),
            ("show_report", "on".to_string()),
        ]
    }

    async fn body_text(resp: actix_web::dev::ServiceResponse) -> String {
        let body = actix_test::read_body(resp).await;
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn test_index_page() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(App::new().app_data(test_state(dir.path())).configure(routes)).await;

        let resp = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_text(resp).await;
        assert!(html.contains("EB Mall Feedback Sentiment Classifier"));
        assert!(html.contains("Show Sentiment Charts"));
    }

    #[actix_web::test]
    async fn test_toggles_warn_without_data() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(App::new().app_data(test_state(dir.path())).configure(routes)).await;

        let req = actix_test::TestRequest::get()
            .uri("/?show_report=on&show_charts=on")
            .to_request();
        let html = body_text(actix_test::call_service(&app, req).await).await;
        assert!(html.contains(NO_REPORT_DATA));
        assert!(html.contains(NO_CHART_DATA));
    }

    #[actix_web::test]
    async fn test_submit_classifies_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(App::new().app_data(test_state(dir.path())).configure(routes)).await;

        let req = actix_test::TestRequest::post()
            .uri("/submit")
            .set_form(form("Great service and clean toilets"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let html = body_text(resp).await;
        assert!(html.contains("Sentiment: ✅ Positive"));
        assert!(html.contains("Feedback saved successfully!"));
        assert!(html.contains("<td>Great service and clean toilets</td>"));
        assert!(dir.path().join("EB mall_feedback.csv").exists());
    }

    #[actix_web::test]
    async fn test_blank_submit_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(App::new().app_data(test_state(dir.path())).configure(routes)).await;

        let req = actix_test::TestRequest::post()
            .uri("/submit")
            .set_form(form("   "))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let html = body_text(resp).await;
        assert!(!html.contains("Feedback saved successfully!"));
        assert!(!dir.path().join("EB mall_feedback.csv").exists());
    }

    #[actix_web::test]
    async fn test_charts_after_submission() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(App::new().app_data(test_state(dir.path())).configure(routes)).await;

        let resp = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/charts/pie.svg").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        for text in ["lovely and clean", "terrible parking"] {
            let req = actix_test::TestRequest::post()
                .uri("/submit")
                .set_form(form(text))
                .to_request();
            actix_test::call_service(&app, req).await;
        }

        for uri in ["/charts/bar.svg", "/charts/pie.svg"] {
            let resp = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
            assert_eq!(content_type, "image/svg+xml");
            let svg = body_text(resp).await;
            assert!(svg.contains("Negative"));
        }
    }

    #[actix_web::test]
    async fn test_api_report_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(App::new().app_data(test_state(dir.path())).configure(routes)).await;

        let resp = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/api/report").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = actix_test::TestRequest::post()
            .uri("/api/feedback")
            .set_json(serde_json::json!({
                "name": "Ben",
                "gender": "Male",
                "age": 44,
                "email": "ben@example.com",
                "feedback": "The guards were rude"
            }))
            .to_request();
        let outcome: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(outcome["status"], "saved");
        assert_eq!(outcome["record"]["Sentiment"], "Negative");

        let report: serde_json::Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get().uri("/api/report").to_request(),
        )
        .await;
        assert_eq!(report["records"].as_array().map(|r| r.len()), Some(1));
        assert_eq!(report["distribution"]["total"], 1);

        let logs: Vec<LogEntry> = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get().uri("/api/logs").to_request(),
        )
        .await;
        assert!(logs.iter().any(|entry| entry.message.contains("Negative")));
    }

    #[actix_web::test]
    async fn test_api_rejects_invalid_age() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(App::new().app_data(test_state(dir.path())).configure(routes)).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/feedback")
            .set_json(serde_json::json!({ "age": 150, "feedback": "good" }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_classifier_failure_is_server_error_and_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let report_file = dir.path().join("EB mall_feedback.csv");
        let app = actix_test::init_service(
            App::new()
                .app_data(test_state_with(dir.path(), Arc::new(BrokenClassifier)))
                .configure(routes),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/submit")
            .set_form(form("The cinema seats are comfy"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = body_text(resp).await;
        assert!(html.contains("vectorizer produced no features"));
        assert!(!report_file.exists());

        let req = actix_test::TestRequest::post()
            .uri("/api/feedback")
            .set_json(serde_json::json!({ "age": 30, "feedback": "The cinema seats are comfy" }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!report_file.exists());
    }

    #[actix_web::test]
    async fn test_health_reports_classifier() {
        let dir = tempfile::tempdir().unwrap();
        let app = actix_test::init_service(App::new().app_data(test_state(dir.path())).configure(routes)).await;

        let body: serde_json::Value =
            actix_test::call_and_read_body_json(&app, actix_test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["classifier"], "polarity");
    }

    #[test]
    fn test_toggle_values() {
        assert!(toggle(Some("on")));
        assert!(toggle(Some("true")));
        assert!(!toggle(Some("off")));
        assert!(!toggle(Some("")));
        assert!(!toggle(None));
    }

    #[test]
    fn test_log_buffer_is_capped() {
        let logs = Mutex::new(Vec::new());
        for i in 0..(MAX_LOG_ENTRIES + 5) {
            add_log(&logs, "INFO", "Test", &format!("entry {}", i));
        }
        let logs = logs.lock().unwrap();
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs[0].message, "entry 5");
    }
}
