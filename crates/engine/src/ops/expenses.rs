use sea_orm::{TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Expense, NewExpenseCmd, ResultEngine, allocate_splits, expenses, splits};

use super::{Engine, with_tx};

impl Engine {
    /// Records an expense and its splits.
    ///
    /// The splits are allocated against the group's current membership and
    /// stored in the same transaction as the expense: either both land or
    /// neither does.
    pub async fn add_expense(&self, cmd: NewExpenseCmd) -> ResultEngine<Expense> {
        let NewExpenseCmd {
            group_id,
            description,
            amount,
            payer_id,
            policy,
        } = cmd;
        with_tx!(self, |db_tx| {
            let group = self.load_group(&db_tx, group_id).await?;
            let allocated = allocate_splits(amount, &policy, &group.members, payer_id)?;
            let expense = Expense::new(
                group.id,
                description.trim().to_string(),
                amount,
                payer_id,
                policy.kind(),
                allocated,
            )?;

            expenses::ActiveModel::from(&expense).insert(&db_tx).await?;
            for (position, split) in expense.splits.iter().enumerate() {
                splits::ActiveModel::for_expense(expense.id, position, split)
                    .insert(&db_tx)
                    .await?;
            }

            tracing::debug!(
                expense_id = %expense.id,
                group_id = %group.id,
                kind = expense.kind.as_str(),
                "recorded expense"
            );
            Ok(expense)
        })
    }

    /// Lists a group's expenses in the order they were recorded.
    pub async fn group_expenses(&self, group_id: Uuid) -> ResultEngine<Vec<Expense>> {
        with_tx!(self, |db_tx| {
            self.load_group(&db_tx, group_id).await?;
            self.load_expenses(&db_tx, group_id).await
        })
    }
}
