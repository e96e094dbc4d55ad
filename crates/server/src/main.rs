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
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use iil_kit_api::{
    ApiError, AssignCarrierRequest, AuditEventInfo, AuthenticatedActor, CenterCsvPreview,
    CreateProjectRequest, FinalizeAuditResponse, InitiateReturnRequest, LineItemInfo,
    LoginRequest, LoginResponse, ManualRequirementDto, ProjectInfo, ReceiptContext,
    RecordReceiptRequest, RecordReceiptResponse, RequirementsInfo, ReturnBatchInfo, Role,
    SaveRequirementsRequest, ShiftDto, VerifyReturnRequest, WAREHOUSE_NODES, WarehouseStatsInfo,
    advance_project_status, assign_carrier, create_project, create_return_batch,
    finalize_warehouse_audit,
    get_audit_timeline, get_project, get_project_totals, get_requirements, get_warehouse_stats,
    initiate_return, list_line_items, list_projects, list_return_batches, login,
    preview_center_master_data, record_line_item_receipt, save_requirements, verify_return,
};
use iil_kit_audit::Cause;
use iil_kit_domain::CountTriad;
use iil_kit_persistence::SqlitePersistence;

/// IIL Kit Server - HTTP server for the Exam Kit Tracking System
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex; this also serializes batch
/// transitions, which the state machine requires (one transition in flight
/// per batch).
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<SqlitePersistence>>,
}

/// Actor fields carried by every state-changing request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorFields {
    /// The actor ID performing this action.
    actor_id: String,
    /// The actor's role display string (e.g., "IIL Operations").
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

/// Actor fields carried by role-gated read requests.
#[derive(Debug, Clone, Deserialize)]
struct ActorQuery {
    /// The actor ID performing this read.
    actor_id: String,
    /// The actor's role display string.
    actor_role: String,
}

/// API request for creating a project.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateProjectApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// Project display name.
    name: String,
    /// Client organization name.
    client: String,
    /// Short project code.
    code: String,
    /// Passcode for non-admin roles.
    project_passcode: String,
    /// Passcode for the admin role.
    admin_passcode: String,
}

/// API request for advancing a project's lifecycle stage.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AdvanceProjectStatusApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The project to advance.
    project_code: String,
    /// The target lifecycle stage display string (e.g., "Warehouse").
    target_status: String,
}

/// API request for replacing a project's requirements.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SaveRequirementsApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The project to update.
    project_code: String,
    /// Exam date (ISO 8601 date string).
    exam_date: String,
    /// Per-shift baselines.
    shifts: Vec<ShiftDto>,
    /// Ad-hoc requirements.
    manual_requirements: Vec<ManualRequirementDto>,
    /// Attached requirement document filenames.
    requirement_documents: Vec<String>,
}

/// API request for recording a receipt count.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RecordReceiptApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The project the line-item belongs to.
    project_code: String,
    /// The stable line-item id.
    line_item_id: String,
    /// The received unit count.
    received: u32,
    /// Optional receiving session metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<ReceiptContext>,
}

/// API request for finalizing the warehouse audit.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct FinalizeAuditApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The project to finalize.
    project_code: String,
}

/// API request for creating the bulk return batch.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateReturnBatchApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The project to create the batch for.
    project_code: String,
}

/// API request for acknowledging hub consolidation.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct InitiateReturnApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The batch to initiate.
    batch_id: String,
    /// The counts acknowledged at consolidation.
    counts: CountTriad,
}

/// API request for assigning a carrier.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AssignCarrierApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The batch to assign a carrier to.
    batch_id: String,
    /// Carrier or fleet partner name.
    partner: String,
    /// Carrier consignment / LR number.
    tracking_id: String,
    /// Vehicle registration number.
    vehicle_no: String,
}

/// API request for verifying warehouse receipt.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct VerifyReturnApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The batch to verify.
    batch_id: String,
    /// The counts verified at the warehouse.
    counts: CountTriad,
}

/// API request for previewing a center master-data CSV.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct PreviewCentersApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The project the centers belong to.
    project_code: String,
    /// The raw CSV contents.
    csv_data: String,
}

/// Standard error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// Health check response body.
#[derive(Debug, Serialize)]
struct HealthResponse {
    /// Service status.
    status: &'static str,
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
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ValidationFailed { .. } | ApiError::InvalidInput { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::StateConflict { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } | ApiError::PasscodePolicyViolation { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal API error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Builds an authenticated actor from request fields.
///
/// Passcode-based authentication happens once at `/login`; subsequent
/// requests carry the actor identity and are authorized per capability in
/// the API layer.
fn make_actor(actor_id: &str, actor_role: &str) -> Result<AuthenticatedActor, HttpError> {
    if actor_id.is_empty() {
        return Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: String::from("actor_id cannot be empty"),
        });
    }

    let role: Role = Role::parse(actor_role).map_err(|e| HttpError::from(ApiError::from(e)))?;
    Ok(AuthenticatedActor::new(actor_id.to_string(), role))
}

fn make_cause(fields: &ActorFields) -> Cause {
    Cause::new(fields.cause_id.clone(), fields.cause_description.clone())
}

/// Handler for GET `/health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Handler for POST `/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = login(&mut persistence, &request)?;
    Ok(Json(response))
}

/// Handler for POST `/projects`.
async fn handle_create_project(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<CreateProjectApiRequest>,
) -> Result<Json<ProjectInfo>, HttpError> {
    let actor: AuthenticatedActor = make_actor(&request.actor.actor_id, &request.actor.actor_role)?;
    let cause: Cause = make_cause(&request.actor);

    let mut persistence = app_state.persistence.lock().await;
    let result = create_project(
        &mut persistence,
        &actor,
        cause,
        CreateProjectRequest {
            name: request.name,
            client: request.client,
            code: request.code,
            project_passcode: request.project_passcode,
            admin_passcode: request.admin_passcode,
        },
    )?;

    Ok(Json(result.response))
}

/// Handler for GET `/projects`.
async fn handle_list_projects(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<ProjectInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_projects(&mut persistence)?))
}

/// Handler for GET `/projects/{code}`.
async fn handle_get_project(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ProjectInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_project(&mut persistence, &code)?))
}

/// Handler for POST `/projects/advance_status`.
async fn handle_advance_project_status(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<AdvanceProjectStatusApiRequest>,
) -> Result<Json<ProjectInfo>, HttpError> {
    let actor: AuthenticatedActor = make_actor(&request.actor.actor_id, &request.actor.actor_role)?;
    let cause: Cause = make_cause(&request.actor);

    let mut persistence = app_state.persistence.lock().await;
    let result = advance_project_status(
        &mut persistence,
        &actor,
        cause,
        &request.project_code,
        &request.target_status,
    )?;

    Ok(Json(result.response))
}

/// Handler for GET `/projects/{code}/requirements`.
async fn handle_get_requirements(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
) -> Result<Json<RequirementsInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_requirements(&mut persistence, &code)?))
}

/// Handler for POST `/requirements`.
async fn handle_save_requirements(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<SaveRequirementsApiRequest>,
) -> Result<Json<RequirementsInfo>, HttpError> {
    let actor: AuthenticatedActor = make_actor(&request.actor.actor_id, &request.actor.actor_role)?;
    let cause: Cause = make_cause(&request.actor);

    let mut persistence = app_state.persistence.lock().await;
    let result = save_requirements(
        &mut persistence,
        &actor,
        cause,
        SaveRequirementsRequest {
            project_code: request.project_code,
            exam_date: request.exam_date,
            shifts: request.shifts,
            manual_requirements: request.manual_requirements,
            requirement_documents: request.requirement_documents,
        },
    )?;

    Ok(Json(result.response))
}

/// Handler for GET `/projects/{code}/line_items`.
async fn handle_list_line_items(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<Vec<LineItemInfo>>, HttpError> {
    let actor: AuthenticatedActor = make_actor(&query.actor_id, &query.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_line_items(&mut persistence, &actor, &code)?))
}

/// Handler for POST `/receipts`.
async fn handle_record_receipt(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<RecordReceiptApiRequest>,
) -> Result<Json<RecordReceiptResponse>, HttpError> {
    let actor: AuthenticatedActor = make_actor(&request.actor.actor_id, &request.actor.actor_role)?;
    let cause: Cause = make_cause(&request.actor);

    let mut persistence = app_state.persistence.lock().await;
    let result = record_line_item_receipt(
        &mut persistence,
        &actor,
        cause,
        RecordReceiptRequest {
            project_code: request.project_code,
            line_item_id: request.line_item_id,
            received: request.received,
            context: request.context,
        },
    )?;

    Ok(Json(result.response))
}

/// Handler for POST `/receipts/finalize`.
async fn handle_finalize_audit(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<FinalizeAuditApiRequest>,
) -> Result<Json<FinalizeAuditResponse>, HttpError> {
    let actor: AuthenticatedActor = make_actor(&request.actor.actor_id, &request.actor.actor_role)?;
    let cause: Cause = make_cause(&request.actor);

    let mut persistence = app_state.persistence.lock().await;
    let result =
        finalize_warehouse_audit(&mut persistence, &actor, cause, &request.project_code)?;

    Ok(Json(result.response))
}

/// Handler for GET `/projects/{code}/totals`.
async fn handle_get_totals(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CountTriad>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_project_totals(&mut persistence, &code)?))
}

/// Handler for GET `/projects/{code}/warehouse_stats`.
async fn handle_warehouse_stats(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<WarehouseStatsInfo>, HttpError> {
    let actor: AuthenticatedActor = make_actor(&query.actor_id, &query.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_warehouse_stats(&mut persistence, &actor, &code)?))
}

/// Handler for POST `/returns`.
async fn handle_create_return_batch(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<CreateReturnBatchApiRequest>,
) -> Result<Json<ReturnBatchInfo>, HttpError> {
    let actor: AuthenticatedActor = make_actor(&request.actor.actor_id, &request.actor.actor_role)?;
    let cause: Cause = make_cause(&request.actor);

    let mut persistence = app_state.persistence.lock().await;
    let result = create_return_batch(&mut persistence, &actor, cause, &request.project_code)?;

    Ok(Json(result.response))
}

/// Handler for POST `/returns/initiate`.
async fn handle_initiate_return(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<InitiateReturnApiRequest>,
) -> Result<Json<ReturnBatchInfo>, HttpError> {
    let actor: AuthenticatedActor = make_actor(&request.actor.actor_id, &request.actor.actor_role)?;
    let cause: Cause = make_cause(&request.actor);

    let mut persistence = app_state.persistence.lock().await;
    let result = initiate_return(
        &mut persistence,
        &actor,
        cause,
        InitiateReturnRequest {
            batch_id: request.batch_id,
            counts: request.counts,
        },
    )?;

    Ok(Json(result.response))
}

/// Handler for POST `/returns/assign_carrier`.
async fn handle_assign_carrier(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<AssignCarrierApiRequest>,
) -> Result<Json<ReturnBatchInfo>, HttpError> {
    let actor: AuthenticatedActor = make_actor(&request.actor.actor_id, &request.actor.actor_role)?;
    let cause: Cause = make_cause(&request.actor);

    let mut persistence = app_state.persistence.lock().await;
    let result = assign_carrier(
        &mut persistence,
        &actor,
        cause,
        AssignCarrierRequest {
            batch_id: request.batch_id,
            partner: request.partner,
            tracking_id: request.tracking_id,
            vehicle_no: request.vehicle_no,
        },
    )?;

    Ok(Json(result.response))
}

/// Handler for POST `/returns/verify`.
async fn handle_verify_return(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<VerifyReturnApiRequest>,
) -> Result<Json<ReturnBatchInfo>, HttpError> {
    let actor: AuthenticatedActor = make_actor(&request.actor.actor_id, &request.actor.actor_role)?;
    let cause: Cause = make_cause(&request.actor);

    let mut persistence = app_state.persistence.lock().await;
    let result = verify_return(
        &mut persistence,
        &actor,
        cause,
        VerifyReturnRequest {
            batch_id: request.batch_id,
            counts: request.counts,
        },
    )?;

    Ok(Json(result.response))
}

/// Handler for GET `/projects/{code}/returns`.
async fn handle_list_return_batches(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<ReturnBatchInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_return_batches(&mut persistence, &code)?))
}

/// Handler for GET `/projects/{code}/audit/timeline`.
async fn handle_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<AuditEventInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_audit_timeline(&mut persistence, &code)?))
}

/// Handler for POST `/master_data/preview`.
async fn handle_preview_centers(
    AxumState(app_state): AxumState<AppState>,
    Json(request): Json<PreviewCentersApiRequest>,
) -> Result<Json<CenterCsvPreview>, HttpError> {
    let actor: AuthenticatedActor = make_actor(&request.actor.actor_id, &request.actor.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let preview: CenterCsvPreview = preview_center_master_data(
        &mut persistence,
        &actor,
        &request.project_code,
        &request.csv_data,
    )?;

    Ok(Json(preview))
}

/// Handler for GET `/warehouse_nodes`.
async fn handle_warehouse_nodes() -> Json<Vec<&'static str>> {
    Json(WAREHOUSE_NODES.to_vec())
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/login", post(handle_login))
        .route("/projects", post(handle_create_project))
        .route("/projects", get(handle_list_projects))
        .route("/projects/{code}", get(handle_get_project))
        .route(
            "/projects/advance_status",
            post(handle_advance_project_status),
        )
        .route("/projects/{code}/requirements", get(handle_get_requirements))
        .route("/requirements", post(handle_save_requirements))
        .route("/projects/{code}/line_items", get(handle_list_line_items))
        .route("/receipts", post(handle_record_receipt))
        .route("/receipts/finalize", post(handle_finalize_audit))
        .route("/projects/{code}/totals", get(handle_get_totals))
        .route(
            "/projects/{code}/warehouse_stats",
            get(handle_warehouse_stats),
        )
        .route("/returns", post(handle_create_return_batch))
        .route("/returns/initiate", post(handle_initiate_return))
        .route("/returns/assign_carrier", post(handle_assign_carrier))
        .route("/returns/verify", post(handle_verify_return))
        .route("/projects/{code}/returns", get(handle_list_return_batches))
        .route("/projects/{code}/audit/timeline", get(handle_audit_timeline))
        .route("/master_data/preview", post(handle_preview_centers))
        .route("/warehouse_nodes", get(handle_warehouse_nodes))
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

    info!("Initializing IIL Kit Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
