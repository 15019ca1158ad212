use crate::errors::AppError;
use crate::models::{row_views, TableResponse, ToggleRequest, ToggleResponse};
use crate::scoring::{build_scoreboard, Scoreboard};
use crate::state::AppState;
use crate::status::{Status, User};
use crate::table::{TrackerTable, MONTHS};
use crate::ui::{render_error, render_index, Page};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chrono::{Datelike, Local};
use tracing::{error, warn};

pub async fn index(State(state): State<AppState>) -> Response {
    match state.tracker.load().await {
        Ok(table) => {
            let page = Page {
                title: &state.title,
                layout: state.tracker.layout(),
                table: &table,
                current_month: Some(Local::now().month0() as usize),
            };
            Html(render_index(&page)).into_response()
        }
        Err(err) => {
            error!("failed to load tracker sheet: {err}");
            let err = AppError::from(err);
            (err.status, Html(render_error(&state.title, &err.message))).into_response()
        }
    }
}

pub async fn get_table(State(state): State<AppState>) -> Result<Json<TableResponse>, AppError> {
    let table = state.tracker.load().await?;
    Ok(Json(TableResponse {
        worksheet: state.tracker.layout().worksheet.clone(),
        rows: row_views(&table),
        scores: build_scoreboard(&table, state.tracker.layout()),
    }))
}

pub async fn get_scores(State(state): State<AppState>) -> Result<Json<Scoreboard>, AppError> {
    let table = state.tracker.load().await?;
    Ok(Json(build_scoreboard(&table, state.tracker.layout())))
}

pub async fn toggle(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let (table, status) = apply_toggle(&state, payload.row, payload.user).await?;

    Ok(Json(ToggleResponse {
        row: payload.row,
        user: payload.user,
        status,
        icon: status.icon(),
        scores: build_scoreboard(&table, state.tracker.layout()),
    }))
}

pub async fn toggle_form(
    State(state): State<AppState>,
    Path((row, user)): Path<(usize, User)>,
) -> Result<Redirect, AppError> {
    apply_toggle(&state, row, user).await?;
    Ok(Redirect::to("/"))
}

/// One click: fresh load, advance the cell, write the whole table back.
///
/// The lock only orders clicks within this process. Another process or a hand
/// edit of the sheet between our load and write is still last-writer-wins.
async fn apply_toggle(
    state: &AppState,
    row: usize,
    user: User,
) -> Result<(TrackerTable, Status), AppError> {
    if row >= MONTHS {
        return Err(AppError::bad_request(format!(
            "row must be between 0 and {}",
            MONTHS - 1
        )));
    }

    let _guard = state.interaction.lock().await;
    let table = state.tracker.load().await?;
    let toggle = state.tracker.toggle(table, row, user).await?;
    if let Err(err) = toggle.saved {
        warn!(row, %user, "click not persisted; sheet may lag until the next reload");
        return Err(err.into());
    }

    Ok((toggle.table, toggle.status))
}
