//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{state::AppState, tasks::DialCommand};
use super::responses::{
    ApiResponse, HealthResponse, PointerRequest, RenderResponse, ResizeRequest, StatusResponse,
};

/// Forward a command to the dial loop and wrap the resulting snapshot
async fn run(state: &AppState, action: &str, command: DialCommand) -> Result<Json<ApiResponse>, StatusCode> {
    match state.dispatch(action, command).await {
        Ok(dial) => Ok(Json(ApiResponse::new(action, dial))),
        Err(e) => {
            error!("Failed to apply {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /dial/press - Pointer pressed on the dial
pub async fn press_handler(
    State(state): State<Arc<AppState>>,
    Json(pointer): Json<PointerRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    run(&state, "press", DialCommand::Press { x: pointer.x, y: pointer.y }).await
}

/// Handle POST /dial/drag/begin - Drag gesture started
pub async fn drag_begin_handler(
    State(state): State<Arc<AppState>>,
    Json(pointer): Json<PointerRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    run(&state, "drag-begin", DialCommand::DragBegin { x: pointer.x, y: pointer.y }).await
}

/// Handle POST /dial/drag/update - Pointer moved during a drag
pub async fn drag_update_handler(
    State(state): State<Arc<AppState>>,
    Json(pointer): Json<PointerRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    run(&state, "drag-update", DialCommand::DragUpdate { x: pointer.x, y: pointer.y }).await
}

/// Handle POST /dial/drag/end - Drag gesture finished
pub async fn drag_end_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run(&state, "drag-end", DialCommand::DragEnd).await
}

/// Handle POST /dial/set - Click at a point: set the duration there and run
pub async fn set_handler(
    State(state): State<Arc<AppState>>,
    Json(pointer): Json<PointerRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    run(&state, "set", DialCommand::Set { x: pointer.x, y: pointer.y }).await
}

/// Handle POST /dial/resize - The client widget changed size
pub async fn resize_handler(
    State(state): State<Arc<AppState>>,
    Json(size): Json<ResizeRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    run(&state, "resize", DialCommand::Resize { width: size.width, height: size.height }).await
}

/// Handle POST /toggle - Start or stop the session
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let response = run(&state, "toggle", DialCommand::Toggle).await?;
    info!("Toggle endpoint called - session is now {:?}", response.dial.phase);
    Ok(response)
}

/// Handle POST /time/add - Add 30 seconds
pub async fn add_time_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run(&state, "add-time", DialCommand::AddTime).await
}

/// Handle POST /time/remove - Remove 30 seconds
pub async fn remove_time_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run(&state, "remove-time", DialCommand::RemoveTime).await
}

/// Handle POST /alarm/stop - Silence the session-finished alarm
pub async fn stop_alarm_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run(&state, "stop-alarm", DialCommand::StopAlarm).await
}

/// Handle GET /status - Return the dial and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let dial = match state.dispatch("status", DialCommand::Snapshot).await {
        Ok(dial) => dial,
        Err(e) => {
            error!("Failed to read dial state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        dial,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /render - Latest drawing primitives
pub async fn render_handler(State(state): State<Arc<AppState>>) -> Json<RenderResponse> {
    Json(state.latest_snapshot().into())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
