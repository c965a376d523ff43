// Copyright (C) 2026 Shiftdesk Contributors
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

mod live;

use axum::{
    Json, Router,
    extract::State as AxumState,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use serde::{Deserialize, Serialize};
use shiftdesk::{AssignOutcome, ConflictGate, DoubleBooking, Removal};
use shiftdesk_domain::{
    Assignment, AssignmentId, DomainError, ShiftDefinition, ShiftId, ShiftKind, StaffId,
    StaffMember,
};
use shiftdesk_repository::{InMemoryDirectory, InMemoryStore};
use shiftdesk_session::{ReferenceData, RosterSession, SaveError, SaveReport, SessionError};
use std::sync::Arc;
use time::format_description::well_known::Iso8601;
use time::macros::time;
use time::{Date, Duration, OffsetDateTime, Time};
use tokio::sync::Mutex;
use tracing::{error, info};

/// Shiftdesk Server - demo HTTP facade over a roster editing session
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The roster session is wrapped in a Mutex: the engine is a
/// single-writer design, and the lock is what enforces it across
/// concurrent HTTP requests.
#[derive(Clone)]
struct AppState {
    /// The single roster session behind this server.
    session: Arc<Mutex<RosterSession<InMemoryStore>>>,
    /// Broadcaster for live roster-change events.
    live: LiveEventBroadcaster,
}

/// Serializable representation of a shift definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ShiftResponse {
    /// The shift identifier.
    id: String,
    /// The display name.
    name: String,
    /// The part of the day this shift covers.
    kind: String,
    /// Start of the shift (HH:MM).
    start_time: String,
    /// End of the shift (HH:MM).
    end_time: String,
}

/// Serializable representation of a staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StaffResponse {
    /// The staff identifier.
    id: i64,
    /// The display name.
    name: String,
    /// The login name.
    username: String,
    /// The contact email.
    email: String,
}

/// Serializable representation of one assignment in the edit buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AssignmentResponse {
    /// The assignment identifier (committed or placeholder).
    id: AssignmentId,
    /// The assigned staff member.
    staff_id: i64,
    /// The shift being worked.
    shift_id: String,
    /// The day being worked (ISO 8601).
    date: String,
    /// Free-form note, if any.
    notes: Option<String>,
    /// Whether this assignment exists only in the local buffer.
    pending: bool,
}

/// Serializable representation of the edit buffer for one week.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WeekResponse {
    /// The first day of the week (ISO 8601).
    week_start: String,
    /// Whether the buffer diverges from the loaded baseline.
    dirty: bool,
    /// Every assignment currently in the buffer.
    assignments: Vec<AssignmentResponse>,
}

/// API request for loading a different week.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoadWeekRequest {
    /// The first day of the week to load (ISO 8601).
    start: String,
}

/// API request for placing a staff member on a slot.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AssignRequest {
    /// The staff member to assign.
    staff_id: i64,
    /// The shift to assign them to.
    shift_id: String,
    /// The day to assign them on (ISO 8601).
    date: String,
    /// Whether a previously reported double-booking is confirmed.
    #[serde(default)]
    confirmed: bool,
}

/// API response for a successful assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AssignResponse {
    /// The identifier of the (possibly pre-existing) assignment.
    assignment_id: AssignmentId,
    /// True when the exact assignment was already in the buffer.
    already_assigned: bool,
}

/// API response for a double-booking that needs confirmation.
///
/// The client retries the same request with `confirmed: true` to place
/// the assignment anyway.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConflictResponse {
    /// Error indicator.
    error: bool,
    /// Human-readable description of the conflict.
    message: String,
    /// The double-booked staff member.
    staff_id: i64,
    /// The day of the conflict (ISO 8601).
    date: String,
    /// The shift the staff member already works that day.
    occupied_shift: String,
    /// The shift the request asked for.
    requested_shift: String,
}

/// API request for removing an assignment from the buffer.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UnassignRequest {
    /// The assignment to remove.
    assignment_id: AssignmentId,
}

/// API response for a removal request.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UnassignResponse {
    /// True when an assignment was actually removed.
    removed: bool,
}

/// API request for saving the buffer.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SaveRequest {
    /// The operator authorizing the created assignments.
    manager_id: i64,
}

/// API response for a save.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveResponse {
    /// True when every operation in the diff went through.
    fully_applied: bool,
    /// Repository ids successfully deleted.
    deleted: Vec<i64>,
    /// Repository ids issued for the created assignments.
    created: Vec<i64>,
    /// How many deletions failed.
    failed_deletions: usize,
    /// How many creations failed.
    failed_creations: usize,
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

impl From<SessionError> for HttpError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::UnknownStaff(_) | SessionError::UnknownShift(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            SessionError::Engine(_) => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            SessionError::Store(_) | SessionError::ReferenceUnavailable { .. } => {
                error!(error = %err, "Store error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Parses an ISO 8601 date from a request field.
fn parse_date(value: &str) -> Result<Date, HttpError> {
    Date::parse(value, &Iso8601::DEFAULT).map_err(|_| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: format!("Invalid date: '{value}'. Expected ISO 8601 (YYYY-MM-DD)"),
    })
}

/// Parses a shift id from a request field.
fn parse_shift_id(value: &str) -> Result<ShiftId, HttpError> {
    ShiftId::new(value).map_err(|err| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: err.to_string(),
    })
}

/// Formats a time of day as HH:MM for JSON responses.
fn format_time(value: Time) -> String {
    format!("{:02}:{:02}", value.hour(), value.minute())
}

/// Converts a buffer assignment to its JSON representation.
fn assignment_to_response(assignment: &Assignment) -> AssignmentResponse {
    AssignmentResponse {
        id: assignment.id,
        staff_id: assignment.staff_id.value(),
        shift_id: assignment.shift_id.value().to_string(),
        date: assignment.date.to_string(),
        notes: assignment.notes.clone(),
        pending: assignment.id.is_placeholder(),
    }
}

/// Converts the session's buffer to a week response.
fn week_to_response(session: &RosterSession<InMemoryStore>) -> WeekResponse {
    WeekResponse {
        week_start: session.buffer().week().start().to_string(),
        dirty: session.is_dirty(),
        assignments: session
            .buffer()
            .current()
            .iter()
            .map(assignment_to_response)
            .collect(),
    }
}

/// A conflict gate driven by the request's `confirmed` flag.
///
/// The first, unconfirmed request declines the double-booking so it can
/// be surfaced as a 409; the client's confirmed retry accepts it.
struct RequestGate {
    /// Whether the client already confirmed the double-booking.
    confirmed: bool,
}

impl ConflictGate for RequestGate {
    fn confirm_double_booking(&mut self, _conflict: &DoubleBooking) -> bool {
        self.confirmed
    }
}

/// Converts a declined double-booking to its 409 payload.
fn conflict_to_response(conflict: &DoubleBooking) -> ConflictResponse {
    ConflictResponse {
        error: true,
        message: format!(
            "Staff member {} already works shift '{}' on {}",
            conflict.staff_id, conflict.occupied_shift, conflict.date
        ),
        staff_id: conflict.staff_id.value(),
        date: conflict.date.to_string(),
        occupied_shift: conflict.occupied_shift.value().to_string(),
        requested_shift: conflict.requested_shift.value().to_string(),
    }
}

/// Handler for GET `/shifts` endpoint.
///
/// Lists the session's shift definitions.
async fn handle_list_shifts(AxumState(app_state): AxumState<AppState>) -> Json<Vec<ShiftResponse>> {
    let session = app_state.session.lock().await;
    let shifts: Vec<ShiftResponse> = session
        .reference()
        .shifts()
        .iter()
        .map(|shift| ShiftResponse {
            id: shift.id.value().to_string(),
            name: shift.name.clone(),
            kind: shift.kind.as_str().to_string(),
            start_time: format_time(shift.start_time),
            end_time: format_time(shift.end_time),
        })
        .collect();
    drop(session);
    Json(shifts)
}

/// Handler for GET `/staff` endpoint.
///
/// Lists the session's staff directory.
async fn handle_list_staff(AxumState(app_state): AxumState<AppState>) -> Json<Vec<StaffResponse>> {
    let session = app_state.session.lock().await;
    let staff: Vec<StaffResponse> = session
        .reference()
        .staff()
        .iter()
        .map(|member| StaffResponse {
            id: member.id.value(),
            name: member.name.clone(),
            username: member.username.clone(),
            email: member.email.clone(),
        })
        .collect();
    drop(session);
    Json(staff)
}

/// Handler for GET `/roster/week` endpoint.
///
/// Returns the edit buffer for the currently viewed week.
async fn handle_get_week(AxumState(app_state): AxumState<AppState>) -> Json<WeekResponse> {
    let session = app_state.session.lock().await;
    let response: WeekResponse = week_to_response(&session);
    drop(session);
    Json(response)
}

/// Handler for POST `/roster/week` endpoint.
///
/// Loads a different week, discarding any unsaved local changes.
async fn handle_load_week(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoadWeekRequest>,
) -> Result<Json<WeekResponse>, HttpError> {
    info!(start = %req.start, "Handling load_week request");

    let start: Date = parse_date(&req.start)?;
    let mut session = app_state.session.lock().await;
    session.load_week(start)?;
    let response: WeekResponse = week_to_response(&session);
    drop(session);
    Ok(Json(response))
}

/// Handler for POST `/roster/assign` endpoint.
///
/// Places a staff member on a slot. A double-booking that has not been
/// confirmed is reported as 409 with the conflict details; the client
/// retries with `confirmed: true` to place the assignment anyway.
async fn handle_assign(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AssignRequest>,
) -> Result<Response, HttpError> {
    info!(
        staff_id = req.staff_id,
        shift_id = %req.shift_id,
        date = %req.date,
        confirmed = req.confirmed,
        "Handling assign request"
    );

    let date: Date = parse_date(&req.date)?;
    let shift_id: ShiftId = parse_shift_id(&req.shift_id)?;
    let mut gate: RequestGate = RequestGate {
        confirmed: req.confirmed,
    };

    let mut session = app_state.session.lock().await;
    let outcome: AssignOutcome =
        session.on_entity_dropped_on_slot(StaffId::new(req.staff_id), date, shift_id, &mut gate)?;
    drop(session);

    let response: Response = match outcome {
        AssignOutcome::Assigned(id) => Json(AssignResponse {
            assignment_id: id,
            already_assigned: false,
        })
        .into_response(),
        AssignOutcome::AlreadyAssigned(id) => Json(AssignResponse {
            assignment_id: id,
            already_assigned: true,
        })
        .into_response(),
        AssignOutcome::Declined(conflict) => {
            (StatusCode::CONFLICT, Json(conflict_to_response(&conflict))).into_response()
        }
    };
    Ok(response)
}

/// Handler for POST `/roster/unassign` endpoint.
///
/// Removes an assignment from the buffer.
async fn handle_unassign(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<UnassignRequest>,
) -> Json<UnassignResponse> {
    info!(assignment_id = %req.assignment_id, "Handling unassign request");

    let mut session = app_state.session.lock().await;
    let removal: Removal = session.on_remove_requested(req.assignment_id);
    drop(session);

    Json(UnassignResponse {
        removed: matches!(removal, Removal::Removed(_)),
    })
}

/// Handler for POST `/roster/save` endpoint.
///
/// Pushes the buffer's pending changes to the store and broadcasts a
/// roster-changed event to live clients.
async fn handle_save(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, HttpError> {
    info!(manager_id = req.manager_id, "Handling save request");

    let mut session = app_state.session.lock().await;
    let week_start: String = session.buffer().week().start().to_string();
    let result: Result<SaveReport, SaveError> =
        session.on_save_requested(StaffId::new(req.manager_id));
    drop(session);

    match result {
        Ok(report) => {
            app_state.live.broadcast(&LiveEvent::RosterChanged {
                week_start,
                deleted: report.deleted.len(),
                created: report.created.len(),
            });
            Ok(Json(SaveResponse {
                fully_applied: report.fully_applied(),
                deleted: report.deleted,
                created: report.created.iter().map(|row| row.id).collect(),
                failed_deletions: report.failed_deletions.len(),
                failed_creations: report.failed_creations.len(),
            }))
        }
        Err(err @ SaveError::SaveInProgress) => Err(HttpError {
            status: StatusCode::CONFLICT,
            message: err.to_string(),
        }),
        Err(err @ SaveError::NothingToSave) => Err(HttpError {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.to_string(),
        }),
        Err(err @ SaveError::ReloadFailed { .. }) => {
            error!(error = %err, "Post-save reload failed");
            Err(HttpError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
            })
        }
    }
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/shifts", get(handle_list_shifts))
        .route("/staff", get(handle_list_staff))
        .route("/roster/week", get(handle_get_week))
        .route("/roster/week", post(handle_load_week))
        .route("/roster/assign", post(handle_assign))
        .route("/roster/unassign", post(handle_unassign))
        .route("/roster/save", post(handle_save))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

/// Builds the demo shift definitions.
fn demo_shifts() -> Result<Vec<ShiftDefinition>, DomainError> {
    Ok(vec![
        ShiftDefinition {
            id: ShiftId::new("morning")?,
            name: String::from("Morning"),
            kind: ShiftKind::Morning,
            start_time: time!(07:00),
            end_time: time!(15:00),
        },
        ShiftDefinition {
            id: ShiftId::new("afternoon")?,
            name: String::from("Afternoon"),
            kind: ShiftKind::Afternoon,
            start_time: time!(15:00),
            end_time: time!(23:00),
        },
        ShiftDefinition {
            id: ShiftId::new("night")?,
            name: String::from("Night"),
            kind: ShiftKind::Night,
            start_time: time!(23:00),
            end_time: time!(07:00),
        },
    ])
}

/// Builds the demo staff directory.
fn demo_staff() -> Vec<StaffMember> {
    let entry = |id: i64, name: &str, username: &str| StaffMember {
        id: StaffId::new(id),
        name: String::from(name),
        username: String::from(username),
        email: format!("{username}@shiftdesk.test"),
    };
    vec![
        entry(10, "Dana Reyes", "dana.reyes"),
        entry(11, "Kim Valdez", "kim.valdez"),
        entry(42, "Alex Tran", "alex.tran"),
    ]
}

/// Returns the Monday of the week containing `today`.
fn week_monday(today: Date) -> Option<Date> {
    today.checked_sub(Duration::days(i64::from(
        today.weekday().number_days_from_monday(),
    )))
}

/// Builds application state over a (possibly pre-seeded) store.
fn build_app_state(store: InMemoryStore, week_start: Date) -> Result<AppState, SessionError> {
    let mut directory: InMemoryDirectory = InMemoryDirectory::new(
        demo_shifts().map_err(|err| SessionError::Engine(err.into()))?,
        demo_staff(),
    );
    let reference: ReferenceData = ReferenceData::load(&mut directory)?;
    let session: RosterSession<InMemoryStore> = RosterSession::open(store, reference, week_start)?;
    Ok(AppState {
        session: Arc::new(Mutex::new(session)),
        live: LiveEventBroadcaster::new(),
    })
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

    info!("Initializing Shiftdesk Server");

    let today: Date = OffsetDateTime::now_utc().date();
    let week_start: Date = week_monday(today).ok_or("date arithmetic overflow")?;

    let app_state: AppState = build_app_state(InMemoryStore::new(), week_start)?;

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
