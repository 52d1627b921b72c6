//! Group API endpoints

use api_types::group::{GroupNew, GroupView};
use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use engine::GroupSummary;
use uuid::Uuid;

use crate::{ServerError, server::ServerState, users::user_view};

fn group_view(summary: &GroupSummary) -> GroupView {
    GroupView {
        id: summary.group.id,
        name: summary.group.name.clone(),
        users: summary.group.members.iter().map(user_view).collect(),
        total_expenses: summary.total_expenses,
    }
}

/// Handle requests for creating a new group
pub async fn group_new(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<GroupNew>, ServerError>,
) -> Result<Json<GroupView>, ServerError> {
    let group = state
        .engine
        .create_group(&payload.name, &payload.user_ids)
        .await?;

    Ok(Json(group_view(&GroupSummary {
        group,
        total_expenses: 0.0,
    })))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<GroupView>>, ServerError> {
    let groups = state.engine.groups().await?;
    Ok(Json(groups.iter().map(group_view).collect()))
}

/// Handle requests for one group with its expense total
pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(group_id), _): WithRejection<Path<Uuid>, ServerError>,
) -> Result<Json<GroupView>, ServerError> {
    let summary = state.engine.group(group_id).await?;
    Ok(Json(group_view(&summary)))
}
