use minijinja::{default_auto_escape_callback, AutoEscape, Environment};
use serde::Serialize;

use super::charts::{BarChart, PieChart};
use crate::domain::error::{AppError, Result};
use crate::domain::feedback::{FeedbackRecord, FeedbackSubmission, Gender};
use crate::domain::report::FeedbackReport;
use crate::domain::sentiment::Classification;

const INDEX_TEMPLATE: &str = "index.html";
const BAR_TEMPLATE: &str = "bar.svg";
const PIE_TEMPLATE: &str = "pie.svg";

/// Values echoed back into the form after a submission
#[derive(Debug, Clone, Serialize)]
pub struct FormValues {
    pub name: String,
    pub gender: &'static str,
    pub age: u32,
    pub email: String,
    pub feedback: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            name: String::new(),
            gender: Gender::default().as_str(),
            age: 1,
            email: String::new(),
            feedback: String::new(),
        }
    }
}

impl From<&FeedbackSubmission> for FormValues {
    fn from(submission: &FeedbackSubmission) -> Self {
        Self {
            name: submission.name.clone(),
            gender: submission.gender.as_str(),
            age: submission.age,
            email: submission.email.clone(),
            feedback: submission.feedback.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    pub headline: String,
    pub tone_class: &'static str,
    pub confidence: Option<String>,
}

impl From<&Classification> for ResultView {
    fn from(classification: &Classification) -> Self {
        Self {
            headline: classification.headline(),
            tone_class: classification.tone.css_class(),
            confidence: classification.confidence.map(|c| c.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexPage {
    pub title: String,
    pub background_css: Option<String>,
    pub genders: Vec<&'static str>,
    pub headers: [&'static str; 6],
    pub form: FormValues,
    pub result: Option<ResultView>,
    pub error: Option<String>,
    pub show_report: bool,
    pub show_charts: bool,
    pub report: Option<FeedbackReport>,
}

impl IndexPage {
    pub fn new(title: &str, background_css: Option<String>) -> Self {
        Self {
            title: title.to_string(),
            background_css,
            genders: Gender::ALL.iter().map(|g| g.as_str()).collect(),
            headers: FeedbackRecord::HEADERS,
            form: FormValues::default(),
            result: None,
            error: None,
            show_report: false,
            show_charts: false,
            report: None,
        }
    }
}

/// Compiled page and chart templates
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|name| {
            if name.ends_with(".svg") {
                AutoEscape::Html
            } else {
                default_auto_escape_callback(name)
            }
        });

        for (name, source) in [
            (INDEX_TEMPLATE, include_str!("../../../templates/index.html")),
            (BAR_TEMPLATE, include_str!("../../../templates/bar.svg")),
            (PIE_TEMPLATE, include_str!("../../../templates/pie.svg")),
        ] {
            env.add_template(name, source).map_err(|e| {
                AppError::Internal(format!("Failed to compile template {}: {}", name, e))
            })?;
        }

        Ok(Self { env })
    }

    fn render<S: Serialize>(&self, name: &str, ctx: &S) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(|e| AppError::Internal(format!("Failed to render {}: {}", name, e)))
    }

    pub fn index(&self, page: &IndexPage) -> Result<String> {
        self.render(INDEX_TEMPLATE, page)
    }

    pub fn bar_chart(&self, chart: &BarChart) -> Result<String> {
        self.render(BAR_TEMPLATE, chart)
    }

    pub fn pie_chart(&self, chart: &PieChart) -> Result<String> {
        self.render(PIE_TEMPLATE, chart)
    }
}
