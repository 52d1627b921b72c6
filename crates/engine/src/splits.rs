//! Expense splits.
//!
//! A [`Split`] is one member's obligation arising from one expense. The
//! `percentage` is kept only as a record of the share that produced the
//! amount; balances are computed from `amount` alone.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub person_id: Uuid,
    pub amount: f64,
    pub percentage: Option<f64>,
}

impl Split {
    pub fn new(person_id: Uuid, amount: f64, percentage: Option<f64>) -> Self {
        Self {
            person_id,
            amount,
            percentage,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "splits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub expense_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub person_id: String,
    pub amount: f64,
    pub percentage: Option<f64>,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::expenses::Entity",
        from = "Column::ExpenseId",
        to = "super::expenses::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Expenses,
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Builds the row for `split`, the `position`-th split of `expense_id`.
    pub(crate) fn for_expense(expense_id: Uuid, position: usize, split: &Split) -> Self {
        Self {
            expense_id: ActiveValue::Set(expense_id.to_string()),
            person_id: ActiveValue::Set(split.person_id.to_string()),
            amount: ActiveValue::Set(split.amount),
            percentage: ActiveValue::Set(split.percentage),
            position: ActiveValue::Set(position as i32),
        }
    }
}

impl TryFrom<Model> for Split {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            person_id: parse_uuid(&model.person_id, "person")?,
            amount: model.amount,
            percentage: model.percentage,
        })
    }
}
