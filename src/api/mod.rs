use axum::{
    Router,
    body::Bytes,
    extract::{Json, Query, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{Currency, Projection, ProjectionInput, project};

#[derive(Parser, Debug)]
#[command(
    name = "nestegg",
    about = "Retirement savings estimator (compound growth, monthly contributions, inflation)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON API over HTTP
    Serve(ServeArgs),
    /// Print a projection for the given assumptions
    Project(ProjectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "NESTEGG_HOST", default_value = "0.0.0.0")]
    pub host: String,
    #[arg(long, env = "NESTEGG_PORT", default_value_t = 8080)]
    pub port: u16,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliCurrency {
    Inr,
    Usd,
}

impl CliCurrency {
    /// Starting savings and monthly contribution sized for the currency.
    pub fn default_amounts(self) -> (f64, f64) {
        match self {
            CliCurrency::Inr => (1_000_000.0, 20_000.0),
            CliCurrency::Usd => (12_000.0, 240.0),
        }
    }
}

impl From<CliCurrency> for Currency {
    fn from(value: CliCurrency) -> Self {
        match value {
            CliCurrency::Inr => Currency::Inr,
            CliCurrency::Usd => Currency::Usd,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
enum ApiCurrency {
    #[serde(rename = "INR", alias = "inr")]
    Inr,
    #[serde(rename = "USD", alias = "usd")]
    Usd,
}

impl From<ApiCurrency> for CliCurrency {
    fn from(value: ApiCurrency) -> Self {
        match value {
            ApiCurrency::Inr => CliCurrency::Inr,
            ApiCurrency::Usd => CliCurrency::Usd,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
    pub current_age: i32,
    #[arg(long, default_value_t = 65, allow_negative_numbers = true)]
    pub retirement_age: i32,
    #[arg(long, default_value_t = 1_000_000.0, allow_negative_numbers = true)]
    pub current_savings: f64,
    #[arg(long, default_value_t = 20_000.0, allow_negative_numbers = true)]
    pub monthly_contribution: f64,
    #[arg(
        long,
        default_value_t = 7.0,
        allow_negative_numbers = true,
        help = "Expected annual rate of return in percent, e.g. 7"
    )]
    pub expected_rate_of_return: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        allow_negative_numbers = true,
        help = "Expected annual inflation in percent"
    )]
    pub inflation_rate: f64,
    #[arg(long, value_enum, default_value_t = CliCurrency::Inr)]
    pub currency: CliCurrency,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    current_age: Option<i32>,
    retirement_age: Option<i32>,
    current_savings: Option<f64>,
    monthly_contribution: Option<f64>,
    #[serde(alias = "annualReturnRate")]
    expected_rate_of_return: Option<f64>,
    inflation_rate: Option<f64>,
    currency: Option<ApiCurrency>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("{}", describe_fields(.0))]
    Invalid(Vec<FieldError>),
    #[error("Invalid API JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Query(String),
}

impl RequestError {
    pub fn fields(&self) -> &[FieldError] {
        match self {
            RequestError::Invalid(fields) => fields.as_slice(),
            RequestError::Json(_) | RequestError::Query(_) => &[],
        }
    }
}

fn describe_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug)]
struct ApiRequest {
    input: ProjectionInput,
    currency: Currency,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

/// Rejects assumptions the estimator should never be asked about. The engine
/// itself would clamp them; this is where the user hears about it instead.
pub fn build_input(args: &ProjectArgs) -> Result<ProjectionInput, RequestError> {
    let mut errors = Vec::new();
    let mut reject = |field: &'static str, message: &'static str| {
        errors.push(FieldError { field, message });
    };

    if args.current_age == 0 {
        reject("currentAge", "Please enter your current age");
    } else if args.current_age < 0 {
        reject("currentAge", "Age cannot be negative");
    } else if args.current_age > 100 {
        reject("currentAge", "Please enter a valid age (0-100)");
    }

    if args.retirement_age == 0 {
        reject("retirementAge", "Please enter your retirement age");
    } else if args.retirement_age <= args.current_age {
        reject(
            "retirementAge",
            "Retirement age must be greater than current age",
        );
    } else if args.retirement_age > 120 {
        reject(
            "retirementAge",
            "Please enter a reasonable retirement age (up to 120)",
        );
    }

    if args.current_savings < 0.0 {
        reject("currentSavings", "Current savings cannot be negative");
    } else if !args.current_savings.is_finite() {
        reject("currentSavings", "Please enter a valid amount");
    }

    if args.monthly_contribution < 0.0 {
        reject(
            "monthlyContribution",
            "Monthly contribution cannot be negative",
        );
    } else if !args.monthly_contribution.is_finite() {
        reject("monthlyContribution", "Please enter a valid amount");
    }

    if args.expected_rate_of_return < 0.0 {
        reject("expectedRateOfReturn", "Rate of return cannot be negative");
    } else if args.expected_rate_of_return > 30.0 {
        reject(
            "expectedRateOfReturn",
            "Rate of return seems unrealistically high (max 30%)",
        );
    } else if !args.expected_rate_of_return.is_finite() {
        reject("expectedRateOfReturn", "Please enter a valid percentage");
    }

    if args.inflation_rate < 0.0 {
        reject("inflationRate", "Inflation rate cannot be negative");
    } else if args.inflation_rate > 20.0 {
        reject(
            "inflationRate",
            "Inflation rate seems unrealistically high (max 20%)",
        );
    } else if !args.inflation_rate.is_finite() {
        reject("inflationRate", "Please enter a valid percentage");
    }

    if !errors.is_empty() {
        return Err(RequestError::Invalid(errors));
    }

    Ok(ProjectionInput {
        current_age: args.current_age,
        retirement_age: args.retirement_age,
        current_savings: args.current_savings,
        monthly_contribution: args.monthly_contribution,
        annual_return_rate_percent: args.expected_rate_of_return,
        inflation_rate_percent: args.inflation_rate,
    })
}

/// Runs the `project` subcommand and returns the text to print.
pub fn run_project_command(args: &ProjectArgs) -> Result<String, RequestError> {
    let input = build_input(args)?;
    let projection = project(&input, args.currency.into());
    Ok(match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&projection)?,
        OutputFormat::Table => render_table(&projection),
    })
}

fn render_table(projection: &Projection) -> String {
    let currency = projection.series.currency;
    let summary = &projection.summary;
    let mut out = String::new();

    out.push_str(&format!(
        "Years to retirement: {}\n",
        summary.years_to_retirement
    ));
    out.push_str(&format!(
        "Total savings:       {}\n",
        format_amount(summary.total_savings, currency)
    ));
    out.push_str(&format!(
        "Inflation-adjusted:  {} (in today's money)\n\n",
        format_amount(summary.inflation_adjusted_savings, currency)
    ));

    out.push_str(&format!(
        "{:>4} {:>6} {:>18} {:>18} {:>18}\n",
        "Year", "Age", "Initial savings", "Contributions", "Total"
    ));
    out.push_str(&format!("{}\n", "-".repeat(68)));
    for point in &projection.series.points {
        out.push_str(&format!(
            "{:>4} {:>6} {:>18} {:>18} {:>18}\n",
            point.year_index,
            point.age,
            format_amount(point.initial_savings_value, currency),
            format_amount(point.contributions_value, currency),
            format_amount(point.total_value, currency),
        ));
    }
    out
}

/// Whole units with thousands separators, e.g. `$1,234,567`.
fn format_amount(value: f64, currency: Currency) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{}{grouped}", currency.symbol())
}

pub fn build_router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(args: &ServeArgs) -> std::io::Result<()> {
    let listener = TcpListener::bind((args.host.as_str(), args.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "nestegg HTTP API listening");

    axum::serve(listener, build_router()).await
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found", Vec::new())
}

async fn project_get_handler(query: Result<Query<ProjectPayload>, QueryRejection>) -> Response {
    let request = query
        .map_err(|rejection| RequestError::Query(rejection.body_text()))
        .and_then(|Query(payload)| api_request_from_payload(payload));
    project_handler_impl(request)
}

async fn project_post_handler(body: Bytes) -> Response {
    project_handler_impl(api_request_from_json(&body))
}

fn project_handler_impl(request: Result<ApiRequest, RequestError>) -> Response {
    let request = match request {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "rejected projection request");
            let fields = err.fields().to_vec();
            return error_response(StatusCode::BAD_REQUEST, &err.to_string(), fields);
        }
    };

    debug!(input = ?request.input, currency = request.currency.code(), "projection request");
    json_response(StatusCode::OK, project(&request.input, request.currency))
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str, fields: Vec<FieldError>) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
            fields,
        },
    )
}

fn api_request_from_json(body: &[u8]) -> Result<ApiRequest, RequestError> {
    let payload = if body.iter().all(u8::is_ascii_whitespace) {
        ProjectPayload::default()
    } else {
        serde_json::from_slice::<ProjectPayload>(body)?
    };
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: ProjectPayload) -> Result<ApiRequest, RequestError> {
    let mut args = default_args_for_api();
    if let Some(v) = payload.currency {
        args.currency = v.into();
    }
    let (savings, contribution) = args.currency.default_amounts();
    args.current_savings = payload.current_savings.unwrap_or(savings);
    args.monthly_contribution = payload.monthly_contribution.unwrap_or(contribution);

    if let Some(v) = payload.current_age {
        args.current_age = v;
    }
    if let Some(v) = payload.retirement_age {
        args.retirement_age = v;
    }
    if let Some(v) = payload.expected_rate_of_return {
        args.expected_rate_of_return = v;
    }
    if let Some(v) = payload.inflation_rate {
        args.inflation_rate = v;
    }

    let input = build_input(&args)?;
    Ok(ApiRequest {
        input,
        currency: args.currency.into(),
    })
}

fn default_args_for_api() -> ProjectArgs {
    let (current_savings, monthly_contribution) = CliCurrency::Inr.default_amounts();
    ProjectArgs {
        current_age: 30,
        retirement_age: 65,
        current_savings,
        monthly_contribution,
        expected_rate_of_return: 7.0,
        inflation_rate: 5.0,
        currency: CliCurrency::Inr,
        format: OutputFormat::Json,
    }
}
