use std::sync::{Mutex, MutexGuard};

use actix_web::http::StatusCode;
use actix_web::{error, middleware, web, App, HttpRequest, HttpResponse, HttpServer, ResponseError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SchedulerConfig;
use crate::display::{unresolved_advisory, write_schedule_csv};
use crate::error::ScheduleError;
use crate::form::{validate_submission, WorkerSubmission};
use crate::parser::read_roster;
use crate::roster::{Roster, Session};
use crate::schedule::{generate_schedule, WeekSchedule};

/// Shared server state. The session is only locked briefly: generation
/// runs on a blocking thread against a snapshot of the roster.
pub struct AppState {
    pub session: Mutex<Session>,
    pub config: SchedulerConfig,
    pub admin_password: String,
}

impl AppState {
    pub fn new(roster: Roster, config: SchedulerConfig, admin_password: String) -> Self {
        Self {
            session: Mutex::new(Session::new(roster)),
            config,
            admin_password,
        }
    }

    /// True when the request carries the admin password
    fn is_admin(&self, req: &HttpRequest) -> bool {
        req.headers()
            .get("X-Admin-Password")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|password| password == self.admin_password)
    }

    fn session(&self) -> Result<MutexGuard<'_, Session>> {
        self.session
            .lock()
            .map_err(|_| error::ErrorInternalServerError("session state poisoned"))
    }
}

impl ResponseError for ScheduleError {
    fn status_code(&self) -> StatusCode {
        match self {
            ScheduleError::UnknownWorker(_) => StatusCode::NOT_FOUND,
            ScheduleError::DuplicateWorker(_) => StatusCode::CONFLICT,
            ScheduleError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({"success": false, "error": self.to_string()}))
    }
}

#[derive(Deserialize)]
pub struct RenameRequest {
    pub new_name: String,
}

#[derive(Deserialize, Default)]
pub struct GenerateRequest {
    pub seed: Option<u64>,
}

#[derive(Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub day: String,
    pub shift: String,
    pub workers: Vec<String>,
    pub is_empty: bool,
}

#[derive(Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub slots: Vec<ScheduleSlot>,
    pub unresolved: Vec<String>,
    pub advisory: Option<String>,
}

impl From<&WeekSchedule> for ScheduleResponse {
    fn from(schedule: &WeekSchedule) -> Self {
        let slots = schedule
            .assignments
            .iter()
            .map(|(slot, names)| ScheduleSlot {
                day: slot.day.to_string(),
                shift: slot.shift.to_string(),
                workers: names.to_vec(),
                is_empty: names.is_empty(),
            })
            .collect();
        Self {
            slots,
            unresolved: schedule.unresolved.clone(),
            advisory: unresolved_advisory(schedule),
        }
    }
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Unauthorized"}))
}

async fn list_workers(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = state.session()?;
    let workers: Vec<WorkerSubmission> = session
        .roster()
        .workers()
        .iter()
        .map(WorkerSubmission::from)
        .collect();
    Ok(HttpResponse::Ok().json(workers))
}

async fn add_worker(
    req: web::Json<WorkerSubmission>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let worker = validate_submission(&req)?;
    let name = worker.name.clone();
    state.session()?.add_worker(worker)?;
    info!(worker = %name, "worker added");
    Ok(HttpResponse::Created().json(serde_json::json!({"success": true, "name": name})))
}

async fn rename_worker(
    http: HttpRequest,
    name: web::Path<String>,
    req: web::Json<RenameRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !state.is_admin(&http) {
        return Ok(unauthorized());
    }
    state.session()?.rename_worker(&name, &req.new_name)?;
    info!(from = %name, to = %req.new_name.trim(), "worker renamed");
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

async fn remove_worker(
    http: HttpRequest,
    name: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !state.is_admin(&http) {
        return Ok(unauthorized());
    }
    let removed = state.session()?.remove_worker(&name)?;
    info!(worker = %removed.name, "worker removed");
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "name": removed.name})))
}

// Replaces the roster from an uploaded CSV body
async fn upload_roster(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !state.is_admin(&req) {
        return Ok(unauthorized());
    }

    let roster = read_roster(&body[..])?;
    let count = roster.len();
    state.session()?.replace_roster(roster);
    info!(workers = count, "roster replaced from upload");

    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "workers": count})))
}

/// An empty body means an unseeded run; anything else must be a valid request
fn parse_generate_request(body: &[u8]) -> serde_json::Result<GenerateRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GenerateRequest::default());
    }
    serde_json::from_slice(body)
}

async fn generate(body: web::Bytes, state: web::Data<AppState>) -> Result<HttpResponse> {
    let seed = match parse_generate_request(&body) {
        Ok(request) => request.seed,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": format!("Invalid generate request: {}", e)
            })))
        }
    };
    let (roster, revision) = {
        let session = state.session()?;
        (session.roster().clone(), session.revision())
    };
    let config = state.config;

    let schedule = web::block(move || {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        generate_schedule(roster.workers(), &config, &mut rng)
    })
    .await??;

    store_generated(&state, revision, schedule)
}

/// Keeps a finished schedule unless the roster moved past `revision` meanwhile
fn store_generated(state: &AppState, revision: u64, schedule: WeekSchedule) -> Result<HttpResponse> {
    let response = ScheduleResponse::from(&schedule);
    if !state.session()?.store_schedule(revision, schedule) {
        return Ok(HttpResponse::Conflict().json(serde_json::json!({
            "success": false,
            "error": "Roster changed while the schedule was being generated"
        })));
    }

    Ok(HttpResponse::Ok().json(response))
}

async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = state.session()?;
    match session.schedule() {
        Some(schedule) => Ok(HttpResponse::Ok().json(ScheduleResponse::from(schedule))),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "Schedule not available"}))),
    }
}

async fn export_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = state.session()?;
    let schedule = match session.schedule() {
        Some(schedule) => schedule,
        None => return Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "Schedule not available"}))),
    };

    let mut body = Vec::new();
    write_schedule_csv(schedule, &mut body)?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header(("Content-Disposition", "attachment; filename=\"schedule.csv\""))
        .body(body))
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Registers all routes; shared by the server and the endpoint tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/roster", web::get().to(list_workers))
        .route("/api/roster", web::post().to(add_worker))
        .route("/api/roster/{name}", web::put().to(rename_worker))
        .route("/api/roster/{name}", web::delete().to(remove_worker))
        .route("/api/upload", web::post().to(upload_roster))
        .route("/api/generate", web::post().to(generate))
        .route("/api/schedule", web::get().to(get_schedule))
        .route("/api/schedule.csv", web::get().to(export_schedule));
}

pub async fn start_server(port: u16, state: AppState) -> std::io::Result<()> {
    let app_state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
