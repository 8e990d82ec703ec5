use crate::dates::{days_in_month, normalize_month};
use crate::errors::AppError;
use crate::models::{
    DateKey, DialogRequest, DialogResponse, HoverRequest, ImportResponse, KeyOutcome, KeyRequest,
    Status, StatsResponse, StatusRequest, UpdateResponse,
};
use crate::selection::{ShortcutOutcome, apply_shortcut};
use crate::state::{AppState, Session};
use crate::stats::compute_statistics_with_quota;
use crate::storage::{export_file_name, persist_data};
use crate::store::StatusStore;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse},
};
use chrono::{Datelike, Local};
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = Local::now().date_naive();
    let mut session = state.session.lock().await;
    session.navigate(today.year(), today.month());
    Html(render_index(&session.view))
}

/// Month view; `month` is 0-based and may overflow into neighbouring years.
pub async fn calendar(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, i32)>,
) -> Result<Html<String>, AppError> {
    let (year, month) = month_in_range(year, month)?;
    let mut session = state.session.lock().await;
    session.navigate(year, month);
    Ok(Html(render_index(&session.view)))
}

pub async fn get_statuses(State(state): State<AppState>) -> Json<StatusStore> {
    let session = state.session.lock().await;
    Json(session.store.clone())
}

pub async fn get_stats(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, i32)>,
) -> Result<Json<StatsResponse>, AppError> {
    let (year, month) = month_in_range(year, month)?;
    let session = state.session.lock().await;
    let stats = compute_statistics_with_quota(&session.store, year, month, session.quota_percent);
    Ok(Json(stats.into()))
}

/// Assignment from the status dialog's buttons. The date becomes the sticky
/// dialog target, then the dialog starts closing once the change is saved.
pub async fn put_status(
    State(state): State<AppState>,
    Json(payload): Json<StatusRequest>,
) -> Result<Json<UpdateResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.selection.open_dialog(payload.date);
    let next = session.store.with_status(payload.date, payload.status);
    let response = apply_status(&state, &mut session, next, payload.date, payload.status).await?;
    Ok(Json(response))
}

pub async fn key(
    State(state): State<AppState>,
    Json(payload): Json<KeyRequest>,
) -> Result<Json<UpdateResponse>, AppError> {
    let mut session = state.session.lock().await;
    let session = &mut *session;

    let outcome = apply_shortcut(&payload.key, &mut session.selection, &session.store);
    let response = match outcome {
        ShortcutOutcome::Assigned { date, status, store } => {
            apply_status(&state, session, store, date, status).await?
        }
        ShortcutOutcome::Ignored => unchanged(session, KeyOutcome::Ignored),
        ShortcutOutcome::NoTarget => unchanged(session, KeyOutcome::NoTarget),
        ShortcutOutcome::Dismissed => unchanged(session, KeyOutcome::Dismissed),
    };
    Ok(Json(response))
}

pub async fn hover(
    State(state): State<AppState>,
    Json(payload): Json<HoverRequest>,
) -> Json<DialogResponse> {
    let mut session = state.session.lock().await;
    session.selection.hover(payload.date);
    Json(DialogResponse::from_selection(&session.selection))
}

pub async fn open_dialog(
    State(state): State<AppState>,
    Json(payload): Json<DialogRequest>,
) -> Json<DialogResponse> {
    let mut session = state.session.lock().await;
    session.selection.open_dialog(payload.date);
    Json(DialogResponse::from_selection(&session.selection))
}

pub async fn close_dialog(State(state): State<AppState>) -> Json<DialogResponse> {
    let mut session = state.session.lock().await;
    session.selection.close_dialog();
    Json(DialogResponse::from_selection(&session.selection))
}

pub async fn settle_dialog(State(state): State<AppState>) -> Json<DialogResponse> {
    let mut session = state.session.lock().await;
    session.selection.settle();
    Json(DialogResponse::from_selection(&session.selection))
}

pub async fn open_help(State(state): State<AppState>) -> Json<DialogResponse> {
    let mut session = state.session.lock().await;
    session.selection.open_help();
    Json(DialogResponse::from_selection(&session.selection))
}

pub async fn close_help(State(state): State<AppState>) -> Json<DialogResponse> {
    let mut session = state.session.lock().await;
    session.selection.close_help();
    Json(DialogResponse::from_selection(&session.selection))
}

pub async fn export(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.lock().await;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_file_name(Local::now())
    );
    (
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        session.store.snapshot(),
    )
}

/// Replaces the whole store with an uploaded backup.
pub async fn import(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    let mut session = state.session.lock().await;

    let mut next = session.store.clone();
    let imported = next.import_replace(&body).map_err(|err| {
        warn!("rejected import: {err}");
        AppError::from(err)
    })?;
    persist_data(&state.data_path, &next).await?;

    session.store = next;
    let statistics = session.rehydrate();
    info!(imported, "imported backup");

    Ok(Json(ImportResponse {
        message: "Data imported successfully!".to_string(),
        imported,
        cells: session.view.cells.clone(),
        summary: session.view.summary.clone(),
        statistics,
    }))
}

async fn apply_status(
    state: &AppState,
    session: &mut Session,
    next: StatusStore,
    date: DateKey,
    status: Option<Status>,
) -> Result<UpdateResponse, AppError> {
    persist_data(&state.data_path, &next).await?;
    let statistics = session.commit(next, date, status);
    info!(%date, status = status.map(Status::as_str).unwrap_or("unset"), "status updated");

    Ok(UpdateResponse {
        outcome: KeyOutcome::Assigned,
        date: Some(date),
        status,
        cell: session.view.cell(date).cloned(),
        summary: session.view.summary.clone(),
        statistics,
        dialog: DialogResponse::from_selection(&session.selection),
    })
}

fn unchanged(session: &Session, outcome: KeyOutcome) -> UpdateResponse {
    let statistics = compute_statistics_with_quota(
        &session.store,
        session.view.year,
        session.view.month,
        session.quota_percent,
    );
    UpdateResponse {
        outcome,
        date: None,
        status: None,
        cell: None,
        summary: session.view.summary.clone(),
        statistics,
        dialog: DialogResponse::from_selection(&session.selection),
    }
}

fn month_in_range(year: i32, month: i32) -> Result<(i32, u32), AppError> {
    let (year, month) = normalize_month(year, month);
    if days_in_month(year, month) == 0 {
        return Err(AppError::not_found(format!("no calendar for {year}-{month:02}")));
    }
    Ok((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::selection::Dialog;
    use std::path::PathBuf;

    fn june_state(data_path: PathBuf) -> AppState {
        let config = Config {
            data_path,
            ..Config::default()
        };
        AppState::new(&config, StatusStore::new())
    }

    fn temp_file(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let file = format!("office_days_{name}_{}_{nanos}.json", std::process::id());
        std::env::temp_dir().join(file)
    }

    fn date(value: &str) -> DateKey {
        value.parse().unwrap()
    }

    #[tokio::test]
    async fn failed_write_leaves_session_untouched() {
        // a directory cannot be overwritten as a file
        let state = june_state(std::env::temp_dir());
        let target = date("2024-06-03");
        {
            let mut session = state.session.lock().await;
            session.navigate(2024, 6);
            session.selection.hover(Some(target));
        }
        let before = {
            let session = state.session.lock().await;
            (session.store.clone(), session.view.clone())
        };

        let pressed = key(
            State(state.clone()),
            Json(KeyRequest {
                key: "o".to_string(),
            }),
        )
        .await;
        assert!(pressed.is_err());

        let assigned = put_status(
            State(state.clone()),
            Json(StatusRequest {
                date: target,
                status: Some(Status::Wfh),
            }),
        )
        .await;
        assert!(assigned.is_err());

        let imported = import(
            State(state.clone()),
            r#"{"2024-06-04":"office"}"#.to_string(),
        )
        .await;
        assert!(imported.is_err());

        let session = state.session.lock().await;
        assert_eq!(session.store, before.0);
        assert!(session.store.is_empty());
        assert_eq!(session.view.cell(target).unwrap().label, "");
        assert_eq!(session.view.summary, before.1.summary);
        assert_eq!(session.view, before.1);
    }

    #[tokio::test]
    async fn put_status_targets_dialog_date_and_starts_closing() {
        let path = temp_file("put_status");
        let state = june_state(path.clone());
        let target = date("2024-06-05");
        {
            let mut session = state.session.lock().await;
            session.navigate(2024, 6);
            session.selection.hover(Some(date("2024-06-06")));
        }

        let Json(update) = put_status(
            State(state.clone()),
            Json(StatusRequest {
                date: target,
                status: Some(Status::Holiday),
            }),
        )
        .await
        .unwrap();
        assert_eq!(update.date, Some(target));
        assert_eq!(update.cell.unwrap().label, "holiday");

        let session = state.session.lock().await;
        assert_eq!(session.selection.dialog(), Dialog::Closing(target));
        assert_eq!(session.selection.resolve_target_date(), Some(target));
        assert_eq!(session.store.get(target), Some(Status::Holiday));
        let _ = std::fs::remove_file(&path);
    }
}
