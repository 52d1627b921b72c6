//! Expense API endpoints

use api_types::expense::{ExpenseNew, ExpenseView, SplitType, SplitView};
use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use engine::{Expense, Group, NewExpenseCmd, ShareRequest, SplitKind};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn split_type(kind: SplitKind) -> SplitType {
    match kind {
        SplitKind::Equal => SplitType::Equal,
        SplitKind::Percentage => SplitType::Percentage,
    }
}

fn payer_name(group: &Group, expense: &Expense) -> String {
    group
        .member(expense.payer_id)
        .map(|person| person.name.clone())
        .unwrap_or_default()
}

fn expense_view(expense: Expense, payer_name: String) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        group_id: expense.group_id,
        description: expense.description,
        amount: expense.amount,
        paid_by: expense.payer_id,
        payer_name,
        split_type: split_type(expense.kind),
        created_at: expense.created_at,
        splits: expense
            .splits
            .into_iter()
            .map(|split| SplitView {
                user_id: split.person_id,
                amount: split.amount,
                percentage: split.percentage,
            })
            .collect(),
    }
}

fn expense_cmd(group_id: Uuid, payload: ExpenseNew) -> NewExpenseCmd {
    match payload.split_type {
        SplitType::Equal => {
            NewExpenseCmd::equal(group_id, payload.description, payload.amount, payload.paid_by)
        }
        SplitType::Percentage => {
            let shares = payload
                .splits
                .unwrap_or_default()
                .into_iter()
                .map(|split| ShareRequest::new(split.user_id, split.amount, split.percentage))
                .collect();
            NewExpenseCmd::percentage(
                group_id,
                payload.description,
                payload.amount,
                payload.paid_by,
                shares,
            )
        }
    }
}

/// Handle requests for recording a new expense in a group
pub async fn expense_new(
    State(state): State<ServerState>,
    WithRejection(Path(group_id), _): WithRejection<Path<Uuid>, ServerError>,
    WithRejection(Json(payload), _): WithRejection<Json<ExpenseNew>, ServerError>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state
        .engine
        .add_expense(expense_cmd(group_id, payload))
        .await?;
    let payer = state.engine.person(expense.payer_id).await?;

    Ok(Json(expense_view(expense, payer.name)))
}

/// Handle requests for listing a group's expenses
pub async fn list(
    State(state): State<ServerState>,
    WithRejection(Path(group_id), _): WithRejection<Path<Uuid>, ServerError>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let group = state.engine.group(group_id).await?.group;
    let expenses = state.engine.group_expenses(group_id).await?;

    Ok(Json(
        expenses
            .into_iter()
            .map(|expense| {
                let payer_name = payer_name(&group, &expense);
                expense_view(expense, payer_name)
            })
            .collect(),
    ))
}
