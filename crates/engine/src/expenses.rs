//! Expense primitives.
//!
//! An [`Expense`] is paid by one group member and is split into one
//! [`Split`] per member. Expenses are created together with their splits and
//! never change afterwards.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, Split, util::parse_uuid};

/// Stored tag of the policy an expense was split with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitKind {
    Equal,
    Percentage,
}

impl SplitKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Percentage => "percentage",
        }
    }
}

impl TryFrom<&str> for SplitKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "equal" => Ok(Self::Equal),
            "percentage" => Ok(Self::Percentage),
            other => Err(EngineError::InvalidSplitKind(other.to_string())),
        }
    }
}

/// One caller-supplied share of a percentage expense.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShareRequest {
    pub person_id: Uuid,
    pub amount: f64,
    pub percentage: Option<f64>,
}

impl ShareRequest {
    pub fn new(person_id: Uuid, amount: f64, percentage: Option<f64>) -> Self {
        Self {
            person_id,
            amount,
            percentage,
        }
    }
}

/// How an expense is divided among the group members.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "shares", rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Everybody, payer included, owes the same share.
    Equal,
    /// Explicit shares; members left out owe nothing.
    Percentage(Vec<ShareRequest>),
}

impl SplitPolicy {
    pub fn kind(&self) -> SplitKind {
        match self {
            Self::Equal => SplitKind::Equal,
            Self::Percentage(_) => SplitKind::Percentage,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub group_id: Uuid,
    pub description: String,
    pub amount: f64,
    pub payer_id: Uuid,
    pub kind: SplitKind,
    pub created_at: DateTime<Utc>,
    pub splits: Vec<Split>,
}

impl Expense {
    pub fn new(
        group_id: Uuid,
        description: String,
        amount: f64,
        payer_id: Uuid,
        kind: SplitKind,
        splits: Vec<Split>,
    ) -> ResultEngine<Self> {
        if description.trim().is_empty() {
            return Err(EngineError::InvalidDescription(
                "description must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            group_id,
            description,
            amount,
            payer_id,
            kind,
            created_at: Utc::now(),
            splits,
        })
    }

    /// Sum of the amounts owed through this expense.
    pub fn owed_total(&self) -> f64 {
        self.splits.iter().map(|s| s.amount).sum()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub group_id: String,
    pub description: String,
    pub amount: f64,
    pub payer_id: String,
    pub split_kind: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::groups::Entity",
        from = "Column::GroupId",
        to = "super::groups::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Groups,
    #[sea_orm(has_many = "super::splits::Entity")]
    Splits,
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Groups.def()
    }
}

impl Related<super::splits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Splits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(value: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            group_id: ActiveValue::Set(value.group_id.to_string()),
            description: ActiveValue::Set(value.description.clone()),
            amount: ActiveValue::Set(value.amount),
            payer_id: ActiveValue::Set(value.payer_id.to_string()),
            split_kind: ActiveValue::Set(value.kind.as_str().to_string()),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl TryFrom<(Model, Vec<Split>)> for Expense {
    type Error = EngineError;

    fn try_from((model, splits): (Model, Vec<Split>)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "expense")?,
            group_id: parse_uuid(&model.group_id, "group")?,
            description: model.description,
            amount: model.amount,
            payer_id: parse_uuid(&model.payer_id, "payer")?,
            kind: SplitKind::try_from(model.split_kind.as_str())?,
            created_at: model.created_at,
            splits,
        })
    }
}
