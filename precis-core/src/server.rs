//! HTTP server for Precis.
//!
//! Serves the single-page summarization tool at `/` and a small JSON API
//! under `/v1` for scripts.

use crate::config::Config;
use crate::controller::{Controller, Outcome, Processed, Submission};
use crate::model::{
    Algorithm, AlgorithmInfo, ApiError, Download, HealthResponse, SentenceCount, SummaryReport,
    TextStatistics,
};
use crate::stats::compute_statistics;
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tera::{Context, Tera};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, instrument, warn};
use utoipa::OpenApi;

/// OpenAPI documentation for the Precis API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Precis API",
        version = "0.1.0",
        description = "Extractive text summarization (LSA, Luhn, LexRank, TextRank) \
                       with before/after text statistics.",
        license(name = "MIT"),
        contact(name = "Precis Contributors")
    ),
    servers(
        (url = "http://127.0.0.1:8501", description = "Local server")
    ),
    paths(health_check, list_algorithms, api_summarize, api_statistics),
    components(schemas(
        crate::model::Algorithm,
        crate::model::AlgorithmInfo,
        crate::model::TextStatistics,
        crate::model::InputSource,
        crate::model::Download,
        crate::model::SummaryReport,
        crate::model::HealthResponse,
        crate::model::ApiError,
        crate::model::ApiErrorDetail,
        SummarizeBody,
        StatisticsBody,
    )),
    tags(
        (name = "Summarization", description = "Extractive summaries and text statistics"),
        (name = "Health", description = "Server health and status")
    )
)]
pub struct ApiDoc;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub controller: Controller,
    templates: Tera,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, tera::Error> {
        let mut templates = Tera::default();
        templates.add_raw_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)?;

        Ok(Self {
            controller: Controller::new(config.summarizer_options()),
            config,
            templates,
        })
    }

    fn render_page(&self, page: &PageView<'_>) -> Result<String, tera::Error> {
        let mut counts: Vec<usize> = SentenceCount::PRESETS.to_vec();
        if !counts.contains(&page.sentence_count.get()) {
            counts.push(page.sentence_count.get());
            counts.sort_unstable();
        }

        let mut context = Context::new();
        context.insert("algorithms", &Algorithm::ALL.map(AlgorithmInfo::from));
        context.insert("counts", &counts);
        context.insert("selected_algorithm", page.algorithm.name());
        context.insert("selected_count", &page.sentence_count.get());
        context.insert("text", page.text);
        context.insert("form_error", &page.form_error);

        let processed = page.processed;
        context.insert("upload_error", &processed.and_then(|p| p.upload_error.as_deref()));
        let (report, warning, failure) = match processed.map(|p| &p.outcome) {
            Some(Outcome::Summarized(report)) => (Some(report), None, None),
            Some(Outcome::Warning(message)) => (None, Some(message.as_str()), None),
            Some(Outcome::Failed(message)) => (None, None, Some(message.as_str())),
            None => (None, None, None),
        };
        context.insert("report", &report);
        context.insert("warning", &warning);
        context.insert("failure", &failure);

        self.templates.render(PAGE_TEMPLATE_NAME, &context)
    }
}

/// What the page shows besides the form defaults
struct PageView<'a> {
    text: &'a str,
    algorithm: Algorithm,
    sentence_count: SentenceCount,
    processed: Option<&'a Processed>,
    /// A form field that could not be parsed
    form_error: Option<&'a str>,
}

/// Create the Axum router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let body_limit = state.config.max_upload_bytes();

    Router::new()
        // Web tool
        .route("/", get(index))
        .route("/summarize", post(summarize_page))
        .route("/download", post(download))
        // JSON API
        .route("/v1/summarize", post(api_summarize))
        .route("/v1/statistics", post(api_statistics))
        .route("/v1/algorithms", get(list_algorithms))
        // Health & docs
        .route("/health", get(health_check))
        .route("/openapi.json", get(openapi_json))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// OpenAPI JSON specification endpoint
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// The summarization form
async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let page = PageView {
        text: "",
        algorithm: state.config.summarizer.algorithm,
        sentence_count: state.config.summarizer.sentence_count,
        processed: None,
        form_error: None,
    };
    Ok(Html(state.render_page(&page)?))
}

/// Form submission: summarize and re-render the page with the results
#[instrument(skip_all)]
async fn summarize_page(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let (submission, form_error) = read_submission(multipart, &state.config).await?;
    if let Some(message) = form_error {
        warn!("Rejected form submission: {}", message);
        let page = PageView {
            text: &submission.typed_text,
            algorithm: submission.algorithm,
            sentence_count: submission.sentence_count,
            processed: None,
            form_error: Some(&message),
        };
        return Ok((StatusCode::BAD_REQUEST, Html(state.render_page(&page)?)).into_response());
    }

    info!(
        "Received form submission ({}, {} sentences, document: {})",
        submission.algorithm,
        submission.sentence_count,
        submission.document.is_some()
    );

    let (submission, processed) = process(&state, submission).await?;
    let page = PageView {
        text: &submission.typed_text,
        algorithm: submission.algorithm,
        sentence_count: submission.sentence_count,
        processed: Some(&processed),
        form_error: None,
    };
    Ok(Html(state.render_page(&page)?).into_response())
}

/// Collect the multipart form fields into a submission.
///
/// Unparseable selector values keep the configured default and are
/// reported alongside the submission.
async fn read_submission(
    mut multipart: Multipart,
    config: &Config,
) -> Result<(Submission, Option<String>), AppError> {
    let mut submission = Submission {
        algorithm: config.summarizer.algorithm,
        sentence_count: config.summarizer.sentence_count,
        ..Submission::default()
    };
    let mut form_error: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "document" => {
                let bytes = field.bytes().await?;
                // browsers send an empty part when no file was chosen
                if !bytes.is_empty() {
                    submission.document = Some(bytes.to_vec());
                }
            }
            "text" => submission.typed_text = field.text().await?,
            "algorithm" => match field.text().await?.parse::<Algorithm>() {
                Ok(algorithm) => submission.algorithm = algorithm,
                Err(e) => {
                    form_error.get_or_insert(e.to_string());
                }
            },
            "sentences" => match field.text().await?.parse::<SentenceCount>() {
                Ok(count) => submission.sentence_count = count,
                Err(e) => {
                    form_error.get_or_insert(e.to_string());
                }
            },
            _ => debug!("Ignoring form field '{}'", name),
        }
    }

    Ok((submission, form_error))
}

/// Run the controller off the async reactor
async fn process(
    state: &Arc<AppState>,
    submission: Submission,
) -> Result<(Submission, Processed), AppError> {
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || {
        let processed = state.controller.process(&submission);
        (submission, processed)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Summarization task failed: {}", e)))
}

#[derive(Debug, Deserialize)]
struct DownloadForm {
    summary: String,
}

/// Serve a summary as `summary.txt`
async fn download(Form(form): Form<DownloadForm>) -> impl IntoResponse {
    let download = Download::summary(form.summary);
    (
        [
            (
                header::CONTENT_TYPE,
                format!("{}; charset=utf-8", download.media_type),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", download.file_name),
            ),
        ],
        download.content,
    )
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server health status", body = HealthResponse)
    )
)]
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List the summarization algorithms
#[utoipa::path(
    get,
    path = "/v1/algorithms",
    tag = "Summarization",
    responses(
        (status = 200, description = "Available algorithms", body = Vec<AlgorithmInfo>)
    )
)]
async fn list_algorithms() -> Json<Vec<AlgorithmInfo>> {
    Json(Algorithm::ALL.into_iter().map(AlgorithmInfo::from).collect())
}

/// Summarization request body
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SummarizeBody {
    /// Text to summarize
    pub text: String,
    /// Defaults to the configured algorithm
    #[serde(default)]
    pub algorithm: Option<Algorithm>,
    /// Defaults to the configured sentence count
    #[serde(default)]
    #[schema(value_type = Option<usize>)]
    pub sentence_count: Option<SentenceCount>,
}

/// Statistics request body
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatisticsBody {
    pub text: String,
}

/// Summarize text
#[utoipa::path(
    post,
    path = "/v1/summarize",
    tag = "Summarization",
    request_body = SummarizeBody,
    responses(
        (status = 200, description = "Summary with before/after statistics", body = SummaryReport),
        (status = 400, description = "Blank input", body = ApiError),
        (status = 413, description = "Request body too large"),
        (status = 422, description = "Summarization failed", body = ApiError)
    )
)]
#[instrument(skip_all)]
async fn api_summarize(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SummarizeBody>,
) -> Result<Json<SummaryReport>, AppError> {
    let submission = Submission::typed(body.text)
        .with_algorithm(body.algorithm.unwrap_or(state.config.summarizer.algorithm))
        .with_sentence_count(
            body.sentence_count
                .unwrap_or(state.config.summarizer.sentence_count),
        );

    let (_, processed) = process(&state, submission).await?;
    match processed.outcome {
        Outcome::Summarized(report) => Ok(Json(report)),
        Outcome::Warning(message) => Err(AppError::BlankInput(message)),
        Outcome::Failed(message) => Err(AppError::SummarizationFailed(message)),
    }
}

/// Word, character and sentence counts
#[utoipa::path(
    post,
    path = "/v1/statistics",
    tag = "Summarization",
    request_body = StatisticsBody,
    responses(
        (status = 200, description = "Text statistics", body = TextStatistics)
    )
)]
async fn api_statistics(Json(body): Json<StatisticsBody>) -> Json<TextStatistics> {
    Json(compute_statistics(&body.text))
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BlankInput(String),
    SummarizationFailed(String),
    Multipart(MultipartError),
    Render(tera::Error),
    InternalError(String),
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Multipart(e)
    }
}

impl From<tera::Error> for AppError {
    fn from(e: tera::Error) -> Self {
        AppError::Render(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BlankInput(msg) => (StatusCode::BAD_REQUEST, ApiError::blank_input(msg)),
            AppError::SummarizationFailed(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::summarization_failed(msg),
            ),
            AppError::Multipart(e) => {
                let status = e.status();
                let error = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    ApiError::payload_too_large(e.body_text())
                } else {
                    ApiError::invalid_request(e.body_text())
                };
                (status, error)
            }
            AppError::Render(e) => {
                error!("Failed to render page: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::internal_error(e.to_string()),
                )
            }
            AppError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::internal_error(msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

/// Start the HTTP server
pub async fn start_server(state: Arc<AppState>) -> Result<(), std::io::Error> {
    let addr = state.config.server_addr();
    let router = create_router(state);

    info!("Starting Precis server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

const PAGE_TEMPLATE_NAME: &str = "index.html";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Text Summarizer</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: linear-gradient(-45deg, #0f0c29, #302b63, #24243e, #1a1a1d);
            color: #f0f0f0;
            min-height: 100vh;
            margin: 0;
        }
        main {
            max-width: 760px;
            margin: 2rem auto;
            padding: 2rem;
            background-color: rgba(0, 0, 0, 0.5);
            border-radius: 15px;
            box-shadow: 0 0 30px #8a2be2;
        }
        h1 { color: #bb86fc; text-align: center; }
        h3 { color: #e0e0e0; text-align: center; font-weight: normal; }
        label { display: block; margin: 1rem 0 0.4rem; font-weight: bold; }
        textarea {
            width: 100%;
            box-sizing: border-box;
            background-color: #2a2a2a;
            color: #f0f0f0;
            border-radius: 12px;
            border: 1px solid #555;
            padding: 0.6rem;
        }
        .columns { display: flex; gap: 1.5rem; }
        .columns > div { flex: 1; }
        .info, .warning, .error, .success {
            padding: 0.8rem 1rem;
            border-radius: 8px;
            margin: 1rem 0;
        }
        .info { background: rgba(28, 131, 225, 0.2); }
        .warning { background: rgba(255, 193, 7, 0.2); }
        .error { background: rgba(255, 43, 43, 0.2); }
        .success { background: rgba(33, 195, 84, 0.2); white-space: pre-wrap; }
        .algorithm-info { display: none; }
        button {
            background-color: #bb86fc;
            color: black;
            font-weight: bold;
            border: none;
            border-radius: 10px;
            padding: 0.6rem 1.2rem;
            margin-top: 1rem;
            cursor: pointer;
        }
        button:hover { background-color: #9b59b6; }
    </style>
</head>
<body>
<main>
    <h1>📝 Text Summarization Application</h1>
    <h3>✨ Enter your text below or upload a PDF file, then choose a summarization method.</h3>

    <form method="post" action="/summarize" enctype="multipart/form-data">
        <label for="document">📄 Upload a PDF File</label>
        <input id="document" type="file" name="document" accept="application/pdf">

        <label for="text">✍️ Please, Enter a Text to Summarize:</label>
        <textarea id="text" name="text" rows="10">{{ text }}</textarea>

        <div class="columns">
            <div>
                <label for="algorithm">📚 Choose Summarizer Type:</label>
                <select id="algorithm" name="algorithm">
                {% for algorithm in algorithms %}
                    <option value="{{ algorithm.name }}"{% if algorithm.name == selected_algorithm %} selected{% endif %}>{{ algorithm.name }}</option>
                {% endfor %}
                </select>
                {% for algorithm in algorithms %}
                <div class="info algorithm-info" data-algorithm="{{ algorithm.name }}"><strong>{{ algorithm.name }}</strong>{% if algorithm.long_name != algorithm.name %} ({{ algorithm.long_name }}){% endif %}: {{ algorithm.description }}</div>
                {% endfor %}
            </div>
            <div>
                <label for="sentences">🧮 Number of Sentences:</label>
                <select id="sentences" name="sentences">
                {% for count in counts %}
                    <option value="{{ count }}"{% if count == selected_count %} selected{% endif %}>{{ count }}</option>
                {% endfor %}
                </select>
            </div>
        </div>

        <button type="submit">🚀 Summarize Text</button>
    </form>

    {% if form_error %}
    <div class="error">❌ {{ form_error }}</div>
    {% endif %}
    {% if upload_error %}
    <div class="error">❌ Could not read the uploaded PDF: {{ upload_error }}</div>
    {% endif %}
    {% if warning %}
    <div class="warning">⚠️ {{ warning }}</div>
    {% endif %}
    {% if failure %}
    <div class="error">❌ Summarization failed: {{ failure }}</div>
    {% endif %}

    {% if report %}
    <h2>📊 Text Statistics (Before Summarization):</h2>
    <ul>
        <li>Words: {{ report.before.words }}</li>
        <li>Characters: {{ report.before.characters }}</li>
        <li>Sentences (estimated): {{ report.before.sentences }}</li>
    </ul>

    <h2>📄 Text Summary:</h2>
    <div class="success">{{ report.summary }}</div>

    <h2>📊 Text Statistics (After Summarization):</h2>
    <ul>
        <li>Words: {{ report.after.words }}</li>
        <li>Characters: {{ report.after.characters }}</li>
        <li>Sentences: {{ report.after.sentences }}</li>
    </ul>

    <form method="post" action="/download">
        <input type="hidden" name="summary" value="{{ report.download.content }}">
        <button type="submit">💾 Download Summary</button>
    </form>
    {% endif %}
</main>
<script>
    const selector = document.getElementById('algorithm');
    function showAlgorithmInfo() {
        document.querySelectorAll('.algorithm-info').forEach((el) => {
            el.style.display = el.dataset.algorithm === selector.value ? 'block' : 'none';
        });
    }
    selector.addEventListener('change', showAlgorithmInfo);
    showAlgorithmInfo();
</script>
</body>
</html>
"#;
