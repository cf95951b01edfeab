// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use matchday_api::{
    ApiError, GenerateScheduleRequest, GenerateScheduleResponse, ListGenerationLogsResponse,
    SeasonScheduleResponse, generate_schedule, get_season_schedule, list_generation_logs,
};
use matchday_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Matchday Server - HTTP server for the Matchday season calendar engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Seconds a generation request may run before the caller gets a timeout
    #[arg(long, default_value_t = 30)]
    generation_timeout_secs: u64,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer. One writer at a time.
    persistence: Arc<Mutex<Persistence>>,
    /// Upper bound on a single generation request.
    generation_timeout: Duration,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Always `ok` when the server answers.
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = status_for(&err);
        if status.is_server_error() {
            error!(error = %err, "Request failed");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Maps an API error to its HTTP status.
const fn status_for(err: &ApiError) -> StatusCode {
    match err {
        ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        ApiError::InvalidConfiguration { .. } | ApiError::SchedulingFailed { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
        ApiError::StructuralViolation { .. }
        | ApiError::PersistenceFailed { .. }
        | ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handler for POST `/seasons/generate` endpoint.
///
/// Generates and stores a season schedule. Failures still answer with a
/// `GenerateScheduleResponse` body carrying `success: false` and the errors.
async fn handle_generate_schedule(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<GenerateScheduleRequest>,
) -> (StatusCode, Json<GenerateScheduleResponse>) {
    let season_id: i64 = req.season_id;
    info!(
        season_id,
        teams = req.teams.len(),
        legs = req.legs,
        "Handling generate_schedule request"
    );

    let persistence = Arc::clone(&app_state.persistence).lock_owned().await;
    let task = tokio::task::spawn_blocking(move || {
        let mut persistence = persistence;
        generate_schedule(&mut persistence, &req)
    });

    let result: Result<GenerateScheduleResponse, ApiError> =
        match tokio::time::timeout(app_state.generation_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(ApiError::Internal {
                message: format!("Generation task failed: {join_error}"),
            }),
            Err(_) => {
                warn!(
                    season_id,
                    timeout_secs = app_state.generation_timeout.as_secs(),
                    "Schedule generation timed out"
                );
                return (
                    StatusCode::GATEWAY_TIMEOUT,
                    Json(GenerateScheduleResponse::failure(
                        season_id,
                        &ApiError::Internal {
                            message: String::from("Schedule generation timed out"),
                        },
                    )),
                );
            }
        };

    match result {
        Ok(response) => {
            info!(
                season_id,
                fixtures = response.fixtures,
                warnings = response.warnings.len(),
                "Successfully generated schedule"
            );
            (StatusCode::OK, Json(response))
        }
        Err(err) => {
            let status: StatusCode = status_for(&err);
            if status.is_server_error() {
                error!(season_id, error = %err, "Schedule generation failed");
            }
            (
                status,
                Json(GenerateScheduleResponse::failure(season_id, &err)),
            )
        }
    }
}

/// Handler for GET `/seasons/{season_id}/schedule` endpoint.
async fn handle_get_season_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(season_id): Path<i64>,
) -> Result<Json<SeasonScheduleResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: SeasonScheduleResponse = get_season_schedule(&mut persistence, season_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/seasons/{season_id}/generation_logs` endpoint.
async fn handle_list_generation_logs(
    AxumState(app_state): AxumState<AppState>,
    Path(season_id): Path<i64>,
) -> Result<Json<ListGenerationLogsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListGenerationLogsResponse =
        list_generation_logs(&mut persistence, season_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/seasons/generate", post(handle_generate_schedule))
        .route(
            "/seasons/{season_id}/schedule",
            get(handle_get_season_schedule),
        )
        .route(
            "/seasons/{season_id}/generation_logs",
            get(handle_list_generation_logs),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Matchday Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        generation_timeout: Duration::from_secs(args.generation_timeout_secs),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use matchday_api::{FieldInput, TeamInput, TimeslotInput};
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            generation_timeout: Duration::from_secs(30),
        }
    }

    /// Helper to create a six-team generation request.
    fn create_test_generate_request(teams: i64) -> GenerateScheduleRequest {
        GenerateScheduleRequest {
            season_id: 42,
            organization_id: 7,
            name: String::from("Spring League"),
            start_date: String::from("2026-03-07"),
            end_date: String::from("2026-05-30"),
            legs: 1,
            max_games_per_date: 4,
            alternate_home_away: true,
            match_weekday: None,
            fields: vec![
                FieldInput {
                    field_id: 1,
                    name: String::from("North Pitch"),
                    active: true,
                },
                FieldInput {
                    field_id: 2,
                    name: String::from("South Pitch"),
                    active: true,
                },
            ],
            timeslots: vec![
                TimeslotInput {
                    timeslot_id: 1,
                    name: String::from("Morning"),
                    start_time: String::from("09:00"),
                    end_time: String::from("10:30"),
                    default_active: true,
                    sort_order: 1,
                },
                TimeslotInput {
                    timeslot_id: 2,
                    name: String::from("Midday"),
                    start_time: String::from("11:00"),
                    end_time: String::from("12:30"),
                    default_active: true,
                    sort_order: 2,
                },
            ],
            special_dates: Vec::new(),
            flex_cadence: None,
            overflow_timeslot_id: None,
            flex_policy: None,
            teams: (1..=teams)
                .map(|id| TeamInput {
                    team_id: id,
                    name: format!("Team {id}"),
                    active: true,
                })
                .collect(),
        }
    }

    fn post_generate(req: &GenerateScheduleRequest) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/seasons/generate")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(req).unwrap()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn read_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app: Router = build_router(create_test_app_state());

        let response = app.oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: HealthResponse = read_body(response).await;
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn test_generate_schedule_succeeds() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(post_generate(&create_test_generate_request(6)))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: GenerateScheduleResponse = read_body(response).await;
        assert!(body.success);
        assert_eq!(body.fixtures, 15);
        assert_eq!(body.match_days, 5);
    }

    #[tokio::test]
    async fn test_generate_schedule_invalid_configuration() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(post_generate(&create_test_generate_request(1)))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
        let body: GenerateScheduleResponse = read_body(response).await;
        assert!(!body.success);
        assert_eq!(body.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_generate_schedule_unparseable_date() {
        let app: Router = build_router(create_test_app_state());
        let mut req: GenerateScheduleRequest = create_test_generate_request(6);
        req.start_date = String::from("soon");

        let response = app.oneshot(post_generate(&req)).await.unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
        let body: GenerateScheduleResponse = read_body(response).await;
        assert!(!body.success);
        assert!(body.message.contains("start_date"));
    }

    #[tokio::test]
    async fn test_schedule_and_logs_after_generation() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = app
            .clone()
            .oneshot(post_generate(&create_test_generate_request(4)))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = app
            .clone()
            .oneshot(get_request("/seasons/42/schedule"))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let schedule: SeasonScheduleResponse = read_body(response).await;
        assert!(schedule.is_active);
        let fixtures: usize = schedule
            .match_days
            .iter()
            .map(|day| day.fixtures.len())
            .sum();
        assert_eq!(fixtures, 6);

        let response = app
            .oneshot(get_request("/seasons/42/generation_logs"))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let logs: ListGenerationLogsResponse = read_body(response).await;
        assert_eq!(logs.logs.len(), 1);
        assert!(logs.logs[0].success);
    }

    #[tokio::test]
    async fn test_schedule_of_unknown_season_is_not_found() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(get_request("/seasons/99/schedule"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
        let body: ErrorResponse = read_body(response).await;
        assert!(body.error);
        assert_eq!(body.message, "Season not found: Season 99 does not exist");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&ApiError::InvalidInput {
                field: String::from("end_date"),
                message: String::from("bad"),
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ApiError::SchedulingFailed {
                message: String::from("calendar exhausted"),
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&ApiError::Internal {
                message: String::from("boom"),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
