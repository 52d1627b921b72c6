//! Command structs for engine operations.
//!
//! These types group the parameters of write operations, keeping call sites
//! readable and avoiding long argument lists.

use uuid::Uuid;

use crate::{ShareRequest, SplitPolicy};

/// Record a new expense in a group.
#[derive(Clone, Debug)]
pub struct NewExpenseCmd {
    pub group_id: Uuid,
    pub description: String,
    pub amount: f64,
    pub payer_id: Uuid,
    pub policy: SplitPolicy,
}

impl NewExpenseCmd {
    /// An expense split equally among every group member.
    #[must_use]
    pub fn equal(
        group_id: Uuid,
        description: impl Into<String>,
        amount: f64,
        payer_id: Uuid,
    ) -> Self {
        Self {
            group_id,
            description: description.into(),
            amount,
            payer_id,
            policy: SplitPolicy::Equal,
        }
    }

    /// An expense split by explicit shares.
    #[must_use]
    pub fn percentage(
        group_id: Uuid,
        description: impl Into<String>,
        amount: f64,
        payer_id: Uuid,
        shares: Vec<ShareRequest>,
    ) -> Self {
        Self {
            group_id,
            description: description.into(),
            amount,
            payer_id,
            policy: SplitPolicy::Percentage(shares),
        }
    }
}
