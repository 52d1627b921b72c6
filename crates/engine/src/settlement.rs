//! Debt settlement.
//!
//! Converts the balances of a group into point-to-point payments that bring
//! every balance back to zero.
//!
//! The walk is greedy: debtors and creditors are kept in membership order
//! and matched front to front, each payment moving as much as both sides
//! allow. The output is deterministic but not minimal in the number of
//! payments; its order and count are part of the contract.

use serde::{Deserialize, Serialize};

use crate::{
    MemberBalance, Person,
    amount::{TOLERANCE, is_negligible},
};

/// `from` pays `amount` to `to`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettlementTransaction {
    pub from: Person,
    pub to: Person,
    pub amount: f64,
}

/// Computes the payments that settle `balances`.
///
/// Balances within tolerance of zero are ignored. An input without
/// debtors or without creditors settles to an empty list.
pub fn settle(balances: &[MemberBalance]) -> Vec<SettlementTransaction> {
    let mut debtors: Vec<(&Person, f64)> = Vec::new();
    let mut creditors: Vec<(&Person, f64)> = Vec::new();
    for entry in balances.iter().filter(|b| !is_negligible(b.balance)) {
        if entry.balance < 0.0 {
            debtors.push((&entry.person, -entry.balance));
        } else {
            creditors.push((&entry.person, entry.balance));
        }
    }

    let mut transactions = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < debtors.len() && j < creditors.len() {
        let (debtor, debt) = &mut debtors[i];
        let (creditor, credit) = &mut creditors[j];

        let amount = (*debt).min(*credit);
        transactions.push(SettlementTransaction {
            from: (*debtor).clone(),
            to: (*creditor).clone(),
            amount,
        });
        *debt -= amount;
        *credit -= amount;

        if *debt < TOLERANCE {
            i += 1;
        }
        if *credit < TOLERANCE {
            j += 1;
        }
    }

    tracing::debug!(
        debtors = debtors.len(),
        creditors = creditors.len(),
        payments = transactions.len(),
        "computed settlement"
    );
    transactions
}
