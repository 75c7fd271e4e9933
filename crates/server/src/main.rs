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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod session;
mod wizards;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
};
use clap::Parser;
use guardpost::{
    DEFAULT_DRAFT_SLOT, DraftId, DraftStore, NoBacking, NoCredentials, SharedDraftStore,
    SharedStorage, SlotCredentials, Wizard,
};
use guardpost_api::{
    ApiError, ClientOnboarding, DraftCreatedResponse, DraftListResponse, EmployeeRegistration,
    ErrorResponse, GuardRegistration, HttpTransport, LocationOnboarding, SetEditingRequest,
};
use guardpost_domain::GuardRequisition;
use guardpost_persistence::SqliteSlotStorage;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::wizards::{SharedWizard, WizardHandle, wizard_routes};

/// Guardpost Server - hosts onboarding and registration wizards for the UI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Base URL of the backend that receives finished wizards
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    upstream_url: String,

    /// Seconds to wait for the backend before a submission fails
    #[arg(long, default_value_t = 30)]
    submission_timeout_secs: u64,

    /// Storage slot holding the requested-guard drafts
    #[arg(long, default_value = DEFAULT_DRAFT_SLOT)]
    draft_slot: String,
}

/// Slot storage shared by the drafts and the token slot.
type Storage = SharedStorage<SqliteSlotStorage>;

/// The requested-guard drafts of the location wizard.
type GuardDrafts = SharedDraftStore<GuardRequisition, Storage>;

/// The bearer token slot.
type Credentials = SlotCredentials<Storage>;

/// Application state shared across handlers.
///
/// Each wizard sits behind its own async mutex. The drafts lock internally
/// and are never held across an await point; changing them also claims the
/// onboarding wizard, so they cannot change under a location submission.
#[derive(Clone)]
struct AppState {
    /// The requested-guard drafts, shared with the location wizard.
    drafts: GuardDrafts,
    /// The bearer token slot, read by flows that require a credential.
    credentials: Credentials,
    onboarding: SharedWizard<LocationOnboarding, GuardDrafts, NoCredentials>,
    clients: SharedWizard<ClientOnboarding, NoBacking, NoCredentials>,
    employees: SharedWizard<EmployeeRegistration, NoBacking, Credentials>,
    guards: SharedWizard<GuardRegistration, NoBacking, Credentials>,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The machine-readable error name.
    error: &'static str,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.error.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::MissingStep { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MissingCredential => StatusCode::UNAUTHORIZED,
            ApiError::UpstreamUnavailable {
                timed_out: true, ..
            } => StatusCode::GATEWAY_TIMEOUT,
            ApiError::UpstreamUnavailable { .. } | ApiError::UpstreamRejected { .. } => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            match &err {
                ApiError::Internal { .. } => error!(error = %err, "Internal error"),
                _ => warn!(error = %err, "Upstream error"),
            }
        }
        Self {
            status,
            error: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Handler for GET `/drafts/guards`.
async fn handle_list_drafts(
    State(app_state): State<AppState>,
) -> Json<DraftListResponse<GuardRequisition>> {
    Json(app_state.drafts.with(|store| guardpost_api::list_drafts(store)))
}

/// Handler for POST `/drafts/guards`.
async fn handle_add_draft(
    State(app_state): State<AppState>,
    Json(record): Json<GuardRequisition>,
) -> Result<(StatusCode, Json<DraftCreatedResponse>), HttpError> {
    debug!(description = %record.description, "Handling add_draft request");
    let onboarding = app_state.onboarding.try_claim()?;
    let response: DraftCreatedResponse = app_state
        .drafts
        .with(|store| guardpost_api::add_draft(store, record))?;
    drop(onboarding);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for PUT `/drafts/guards/{id}`.
async fn handle_update_draft(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(record): Json<GuardRequisition>,
) -> Result<Json<DraftListResponse<GuardRequisition>>, HttpError> {
    debug!(id = %id, "Handling update_draft request");
    let onboarding = app_state.onboarding.try_claim()?;
    let response: DraftListResponse<GuardRequisition> = app_state
        .drafts
        .with(|store| guardpost_api::update_draft(store, DraftId::new(id), record))?;
    drop(onboarding);
    Ok(Json(response))
}

/// Handler for DELETE `/drafts/guards/{id}`.
async fn handle_delete_draft(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DraftListResponse<GuardRequisition>>, HttpError> {
    debug!(id = %id, "Handling delete_draft request");
    let id: DraftId = DraftId::new(id);
    let onboarding = app_state.onboarding.try_claim()?;
    let response: DraftListResponse<GuardRequisition> = app_state
        .drafts
        .with(|store| guardpost_api::delete_draft(store, &id))?;
    drop(onboarding);
    Ok(Json(response))
}

/// Handler for PUT `/drafts/guards/editing`.
async fn handle_set_editing(
    State(app_state): State<AppState>,
    Json(request): Json<SetEditingRequest>,
) -> Result<Json<DraftListResponse<GuardRequisition>>, HttpError> {
    let onboarding = app_state.onboarding.try_claim()?;
    let response: DraftListResponse<GuardRequisition> = app_state
        .drafts
        .with(|store| guardpost_api::set_editing(store, request))?;
    drop(onboarding);
    Ok(Json(response))
}

/// Handler for DELETE `/drafts/guards`.
async fn handle_reset_drafts(
    State(app_state): State<AppState>,
) -> Result<Json<DraftListResponse<GuardRequisition>>, HttpError> {
    info!("Handling reset_drafts request");
    let onboarding = app_state.onboarding.try_claim()?;
    let response: DraftListResponse<GuardRequisition> = app_state
        .drafts
        .with(|store| guardpost_api::reset_drafts(store))?;
    drop(onboarding);
    Ok(Json(response))
}

/// Wires the drafts, the token slot and the four wizards onto one storage
/// backend.
///
/// # Errors
///
/// Returns an error if the draft slot cannot be read.
fn build_app_state(
    storage: SqliteSlotStorage,
    draft_slot: &str,
    transport: &HttpTransport,
    timeout: Duration,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let storage: Storage = SharedStorage::new(storage);

    let mut store: DraftStore<GuardRequisition, Storage> =
        DraftStore::open_slot(storage.clone(), draft_slot)?;
    info!(slot = draft_slot, drafts = store.len(), "Guard drafts loaded");
    store.subscribe(|records| debug!(drafts = records.len(), "Guard drafts changed"));
    let drafts: GuardDrafts = SharedDraftStore::new(store);

    let credentials: Credentials = SlotCredentials::new(storage);

    let onboarding: Wizard<LocationOnboarding, HttpTransport, GuardDrafts> =
        Wizard::new(transport.clone(), drafts.clone()).with_timeout(timeout);
    let clients: Wizard<ClientOnboarding, HttpTransport> =
        Wizard::new(transport.clone(), NoBacking).with_timeout(timeout);
    let employees: Wizard<EmployeeRegistration, HttpTransport, NoBacking, Credentials> =
        Wizard::new(transport.clone(), NoBacking)
            .with_credentials(credentials.clone())
            .with_timeout(timeout);
    let guards: Wizard<GuardRegistration, HttpTransport, NoBacking, Credentials> =
        Wizard::new(transport.clone(), NoBacking)
            .with_credentials(credentials.clone())
            .with_timeout(timeout);

    Ok(AppState {
        drafts,
        credentials,
        onboarding: Arc::new(WizardHandle::new(onboarding)),
        clients: Arc::new(WizardHandle::new(clients)),
        employees: Arc::new(WizardHandle::new(employees)),
        guards: Arc::new(WizardHandle::new(guards)),
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/session/token",
            post(session::handle_store_token).delete(session::handle_clear_token),
        )
        .route(
            "/drafts/guards",
            axum::routing::get(handle_list_drafts)
                .post(handle_add_draft)
                .delete(handle_reset_drafts),
        )
        .route("/drafts/guards/editing", put(handle_set_editing))
        .route(
            "/drafts/guards/{id}",
            put(handle_update_draft).delete(handle_delete_draft),
        )
        .nest(
            "/wizards/onboarding",
            wizard_routes(Arc::clone(&app_state.onboarding)),
        )
        .nest(
            "/wizards/clients",
            wizard_routes(Arc::clone(&app_state.clients)),
        )
        .nest(
            "/wizards/employees",
            wizard_routes(Arc::clone(&app_state.employees)),
        )
        .nest(
            "/wizards/guards",
            wizard_routes(Arc::clone(&app_state.guards)),
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

    info!("Initializing Guardpost Server");

    // Initialize storage (in-memory or file-based based on CLI argument)
    let storage: SqliteSlotStorage = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqliteSlotStorage::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqliteSlotStorage::new_in_memory()?
    };

    let timeout: Duration = Duration::from_secs(args.submission_timeout_secs);
    let transport: HttpTransport = HttpTransport::with_timeout(&args.upstream_url, timeout)?;
    info!(upstream = %args.upstream_url, timeout_secs = args.submission_timeout_secs, "Submissions forwarded upstream");

    let app_state: AppState = build_app_state(storage, &args.draft_slot, &transport, timeout)?;

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
