//! Balance aggregation.
//!
//! A member's balance inside a group is what they paid minus what they owe:
//! positive means the group owes them, negative means they owe the group.
//! Balances are derived on every call from the expenses handed in and are
//! never stored.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Expense, Group, Person, amount::is_negligible};

/// A consistent snapshot of one group and all of its expenses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupLedger {
    pub group: Group,
    pub expenses: Vec<Expense>,
}

impl GroupLedger {
    pub fn new(group: Group, expenses: Vec<Expense>) -> Self {
        Self { group, expenses }
    }
}

/// Net balance of one member within one group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberBalance {
    pub person: Person,
    pub balance: f64,
}

impl MemberBalance {
    pub fn new(person: Person, balance: f64) -> Self {
        Self { person, balance }
    }

    /// `true` when the member neither owes nor is owed anything.
    pub fn is_settled(&self) -> bool {
        is_negligible(self.balance)
    }
}

/// Net balance of one person in one of their groups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupBalance {
    pub group_id: Uuid,
    pub group_name: String,
    pub balance: f64,
}

/// Balance of `person_id` over `expenses`: paid minus owed.
///
/// An empty expense list yields `0.0`.
pub fn member_balance(person_id: Uuid, expenses: &[Expense]) -> f64 {
    let paid: f64 = expenses
        .iter()
        .filter(|e| e.payer_id == person_id)
        .map(|e| e.amount)
        .sum();
    let owed: f64 = expenses
        .iter()
        .flat_map(|e| &e.splits)
        .filter(|s| s.person_id == person_id)
        .map(|s| s.amount)
        .sum();
    paid - owed
}

/// One balance per member of the ledger's group, in membership order.
pub fn group_balances(ledger: &GroupLedger) -> Vec<MemberBalance> {
    ledger
        .group
        .members
        .iter()
        .map(|member| {
            MemberBalance::new(member.clone(), member_balance(member.id, &ledger.expenses))
        })
        .collect()
}

/// Itemized balances of `person_id`, one per ledger whose group they belong
/// to, in the order the ledgers are given.
pub fn person_balances(person_id: Uuid, ledgers: &[GroupLedger]) -> Vec<GroupBalance> {
    ledgers
        .iter()
        .filter(|ledger| ledger.group.is_member(person_id))
        .map(|ledger| GroupBalance {
            group_id: ledger.group.id,
            group_name: ledger.group.name.clone(),
            balance: member_balance(person_id, &ledger.expenses),
        })
        .collect()
}

/// Total amount spent through `expenses`.
pub fn total_expenses(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SplitPolicy, ShareRequest, allocate_splits, amount::approx_eq};

    fn expense(group: &Group, amount: f64, payer: &Person, policy: SplitPolicy) -> Expense {
        let splits = allocate_splits(amount, &policy, &group.members, payer.id).unwrap();
        Expense::new(
            group.id,
            "test".to_string(),
            amount,
            payer.id,
            policy.kind(),
            splits,
        )
        .unwrap()
    }

    fn trio() -> Group {
        Group::new(
            "trip",
            vec![Person::new("a"), Person::new("b"), Person::new("c")],
        )
    }

    #[test]
    fn equal_expense_credits_payer_and_debits_others() {
        let group = trio();
        let payer = group.members[0].clone();
        let ledger = GroupLedger::new(
            group.clone(),
            vec![expense(&group, 90.0, &payer, SplitPolicy::Equal)],
        );

        let balances: Vec<f64> = group_balances(&ledger).iter().map(|b| b.balance).collect();

        assert!(approx_eq(balances[0], 60.0));
        assert!(approx_eq(balances[1], -30.0));
        assert!(approx_eq(balances[2], -30.0));
    }

    #[test]
    fn balances_always_sum_to_zero() {
        let group = trio();
        let [a, b, c] = [&group.members[0], &group.members[1], &group.members[2]];
        let expenses = vec![
            expense(&group, 100.0, a, SplitPolicy::Equal),
            expense(&group, 17.35, b, SplitPolicy::Equal),
            expense(
                &group,
                80.0,
                c,
                SplitPolicy::Percentage(vec![
                    ShareRequest::new(a.id, 20.0, Some(25.0)),
                    ShareRequest::new(b.id, 60.0, Some(75.0)),
                ]),
            ),
        ];
        let ledger = GroupLedger::new(group, expenses);

        let sum: f64 = group_balances(&ledger).iter().map(|b| b.balance).sum();
        assert!(approx_eq(sum, 0.0));
    }

    #[test]
    fn empty_ledger_is_all_zero() {
        let ledger = GroupLedger::new(trio(), Vec::new());

        let balances = group_balances(&ledger);
        assert_eq!(balances.len(), 3);
        assert!(balances.iter().all(MemberBalance::is_settled));
        assert_eq!(total_expenses(&ledger.expenses), 0.0);
    }

    #[test]
    fn person_balances_are_itemized_per_group() {
        let trip = trio();
        let alice = trip.members[0].clone();
        let bob = trip.members[1].clone();
        let flat = Group::new("flat", vec![bob.clone(), alice.clone()]);
        let other = Group::new("other", vec![Person::new("x"), bob.clone()]);

        let ledgers = vec![
            GroupLedger::new(
                trip.clone(),
                vec![expense(&trip, 30.0, &alice, SplitPolicy::Equal)],
            ),
            GroupLedger::new(other, Vec::new()),
            GroupLedger::new(
                flat.clone(),
                vec![expense(&flat, 50.0, &bob, SplitPolicy::Equal)],
            ),
        ];

        let balances = person_balances(alice.id, &ledgers);

        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0].group_id, trip.id);
        assert!(approx_eq(balances[0].balance, 20.0));
        assert_eq!(balances[1].group_name, "flat");
        assert!(approx_eq(balances[1].balance, -25.0));
    }

    #[test]
    fn total_expenses_adds_amounts() {
        let group = trio();
        let payer = group.members[1].clone();
        let expenses = vec![
            expense(&group, 12.5, &payer, SplitPolicy::Equal),
            expense(&group, 7.5, &payer, SplitPolicy::Equal),
        ];
        assert!(approx_eq(total_expenses(&expenses), 20.0));
    }
}
