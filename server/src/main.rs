//! untab server - upload a Word document, download its tables as CSV/XLSX.
//!
//! One page, one conversion endpoint. Each request is parsed, extracted,
//! and exported in isolation; output stays in memory and the download
//! name is unique per request, so concurrent uploads never collide.

use std::net::SocketAddr;
use std::path::Path;

use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::info;
use untab::{Error, HeaderMode, RowPolicy, Untab};
use uuid::Uuid;

const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
const INDEX_HTML: &str = include_str!("index.html");

#[derive(Parser)]
#[command(name = "untab-server")]
#[command(version)]
#[command(about = "Word table extraction web service", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "untab_server=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!("listening on http://{}", args.bind);
    axum::serve(listener, router()).await?;
    Ok(())
}

fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route(
            "/convert",
            post(convert).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .layer(TraceLayer::new_for_http())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[derive(Clone, Copy, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Csv,
    Xlsx,
}

impl OutputFormat {
    fn parse(s: &str) -> Result<Self, String> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "xlsx" => Ok(OutputFormat::Xlsx),
            other => Err(format!("unknown output format: {other}")),
        }
    }

    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
        }
    }

    fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv; charset=utf-8",
            OutputFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

#[derive(Default)]
struct ConvertRequest {
    file: Option<(String, Vec<u8>)>,
    headers: HeaderMode,
    rows: RowPolicy,
    format: OutputFormat,
    lenient: bool,
}

async fn convert(mut multipart: Multipart) -> Result<Response, Response> {
    let mut request = ConvertRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| error_response(StatusCode::BAD_REQUEST, err.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload.docx").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|err| error_response(StatusCode::BAD_REQUEST, err.to_string()))?;
                request.file = Some((filename, data.to_vec()));
            }
            "headers" => request.headers = parse_policy(field).await?,
            "rows" => request.rows = parse_policy(field).await?,
            "format" => {
                let text = field_text(field).await?;
                if !text.is_empty() {
                    request.format = OutputFormat::parse(&text)
                        .map_err(|err| error_response(StatusCode::BAD_REQUEST, err))?;
                }
            }
            "lenient" => {
                let text = field_text(field).await?;
                request.lenient = matches!(text.as_str(), "on" | "true" | "1");
            }
            _ => {}
        }
    }

    let Some((filename, data)) = request.file.take() else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "no file uploaded".to_string(),
        ));
    };
    if data.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "uploaded file is empty".to_string(),
        ));
    }

    let format = request.format;
    let bytes = tokio::task::spawn_blocking(move || run_conversion(&request, &data))
        .await
        .map_err(|err| error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?
        .map_err(|err| error_response(status_for(&err), err.to_string()))?;

    let download_name = format!(
        "{}-{}.{}",
        sanitize_stem(&filename),
        Uuid::new_v4().simple(),
        format.extension()
    );
    info!("converted {filename} -> {download_name} ({} bytes)", bytes.len());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{download_name}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

fn run_conversion(request: &ConvertRequest, data: &[u8]) -> untab::Result<Vec<u8>> {
    let mut untab = Untab::new()
        .with_header_mode(request.headers)
        .with_row_policy(request.rows);
    if request.lenient {
        untab = untab.lenient();
    }

    let result = untab.parse_bytes(data)?;
    match request.format {
        OutputFormat::Csv => result.to_csv(),
        OutputFormat::Xlsx => result.to_xlsx(),
    }
}

async fn parse_policy<T>(field: axum::extract::multipart::Field<'_>) -> Result<T, Response>
where
    T: Default + std::str::FromStr<Err = String>,
{
    let text = field_text(field).await?;
    if text.is_empty() {
        return Ok(T::default());
    }
    text.parse()
        .map_err(|err: String| error_response(StatusCode::BAD_REQUEST, err))
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, Response> {
    field
        .text()
        .await
        .map_err(|err| error_response(StatusCode::BAD_REQUEST, err.to_string()))
}

/// Map library errors to user-visible statuses. Bad documents are the
/// client's problem; writer failures are ours.
fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::UnknownFormat | Error::DocxParse(_) | Error::EmptyInput | Error::NoRecords => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (
        status,
        axum::Json(json!({ "detail": { "message": message } })),
    )
        .into_response()
}

fn sanitize_stem(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|value| value.to_str())
        .unwrap_or("document");
    let stem: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.trim_matches('_').is_empty() {
        "document".to_string()
    } else {
        stem
    }
}
