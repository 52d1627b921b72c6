//! Balance and settlement API endpoints
//!
//! Every response is recomputed from the stored expenses on each request.

use api_types::{
    group::{GroupBalance, GroupBalancesResponse, GroupSettlementsResponse, SettlementTransaction},
    user::{UserBalance, UserBalancesResponse},
};
use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

/// Handle requests for one user's balance in every group they belong to
pub async fn user_balances(
    State(state): State<ServerState>,
    WithRejection(Path(user_id), _): WithRejection<Path<Uuid>, ServerError>,
) -> Result<Json<UserBalancesResponse>, ServerError> {
    let (person, balances) = state.engine.person_balances(user_id).await?;

    Ok(Json(UserBalancesResponse {
        user_id: person.id,
        user_name: person.name,
        balances: balances
            .into_iter()
            .map(|b| UserBalance {
                group_id: b.group_id,
                group_name: b.group_name,
                balance: b.balance,
            })
            .collect(),
    }))
}

/// Handle requests for the balance of every member of a group
pub async fn group_balances(
    State(state): State<ServerState>,
    WithRejection(Path(group_id), _): WithRejection<Path<Uuid>, ServerError>,
) -> Result<Json<GroupBalancesResponse>, ServerError> {
    let (group, balances) = state.engine.group_balances(group_id).await?;

    Ok(Json(GroupBalancesResponse {
        group_id: group.id,
        group_name: group.name,
        balances: balances
            .into_iter()
            .map(|b| GroupBalance {
                user_id: b.person.id,
                user_name: b.person.name,
                balance: b.balance,
            })
            .collect(),
    }))
}

/// Handle requests for the payments that settle a group
pub async fn group_settlements(
    State(state): State<ServerState>,
    WithRejection(Path(group_id), _): WithRejection<Path<Uuid>, ServerError>,
) -> Result<Json<GroupSettlementsResponse>, ServerError> {
    let (group, transactions) = state.engine.group_settlements(group_id).await?;

    Ok(Json(GroupSettlementsResponse {
        group_id: group.id,
        group_name: group.name,
        settlements: transactions
            .into_iter()
            .map(|t| SettlementTransaction {
                from_user_id: t.from.id,
                from_user_name: t.from.name,
                to_user_id: t.to.id,
                to_user_name: t.to.name,
                amount: t.amount,
            })
            .collect(),
    }))
}
