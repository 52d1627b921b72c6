use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub name: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub name: String,
    }

    /// Net position of a user inside one group.
    ///
    /// Positive means the user is owed money, negative means they owe.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct UserBalance {
        pub group_id: Uuid,
        pub group_name: String,
        pub balance: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserBalancesResponse {
        pub user_id: Uuid,
        pub user_name: String,
        pub balances: Vec<UserBalance>,
    }
}

pub mod group {
    use super::*;
    use crate::user::UserView;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupNew {
        pub name: String,
        pub user_ids: Vec<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupView {
        pub id: Uuid,
        pub name: String,
        /// Members in the order they were given at creation.
        pub users: Vec<UserView>,
        #[serde(default)]
        pub total_expenses: f64,
    }

    /// Net position of one member inside a group.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct GroupBalance {
        pub user_id: Uuid,
        pub user_name: String,
        pub balance: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupBalancesResponse {
        pub group_id: Uuid,
        pub group_name: String,
        pub balances: Vec<GroupBalance>,
    }

    /// One payment instruction: `from` pays `to`.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct SettlementTransaction {
        pub from_user_id: Uuid,
        pub from_user_name: String,
        pub to_user_id: Uuid,
        pub to_user_name: String,
        pub amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupSettlementsResponse {
        pub group_id: Uuid,
        pub group_name: String,
        pub settlements: Vec<SettlementTransaction>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SplitType {
        Equal,
        Percentage,
    }

    impl SplitType {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Equal => "equal",
                Self::Percentage => "percentage",
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct SplitView {
        pub user_id: Uuid,
        pub amount: f64,
        #[serde(default)]
        pub percentage: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub description: String,
        pub amount: f64,
        pub paid_by: Uuid,
        pub split_type: SplitType,
        /// Required for `percentage`, ignored for `equal`.
        #[serde(default)]
        pub splits: Option<Vec<SplitView>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub group_id: Uuid,
        pub description: String,
        pub amount: f64,
        pub paid_by: Uuid,
        pub payer_name: String,
        pub split_type: SplitType,
        pub created_at: DateTime<Utc>,
        pub splits: Vec<SplitView>,
    }
}
