//! Split allocation.
//!
//! Turns one expense (amount, payer, [`SplitPolicy`]) into one [`Split`] per
//! group member. Every check runs before the first split is built, so a
//! rejected expense never yields a partial allocation.
//!
//! Equal expenses charge every member, payer included, `amount / N`.

use std::collections::HashSet;

use uuid::Uuid;

use crate::{
    EngineError, Person, ResultEngine, ShareRequest, Split, SplitPolicy,
    amount::{approx_eq, is_non_negative_amount, is_positive_amount},
};

/// Allocates `amount` over `members` according to `policy`.
///
/// The returned splits follow the order of `members`, whatever the order of
/// the explicit shares.
pub fn allocate_splits(
    amount: f64,
    policy: &SplitPolicy,
    members: &[Person],
    payer_id: Uuid,
) -> ResultEngine<Vec<Split>> {
    if !is_positive_amount(amount) {
        return Err(EngineError::InvalidAmount(format!(
            "expense amount must be > 0, got {amount}"
        )));
    }
    if !members.iter().any(|m| m.id == payer_id) {
        return Err(EngineError::PayerNotInGroup(payer_id.to_string()));
    }

    match policy {
        SplitPolicy::Equal => Ok(equal_splits(amount, members)),
        SplitPolicy::Percentage(shares) => percentage_splits(amount, shares, members),
    }
}

fn equal_splits(amount: f64, members: &[Person]) -> Vec<Split> {
    let count = members.len() as f64;
    let share = amount / count;
    let percentage = 100.0 / count;
    members
        .iter()
        .map(|m| Split::new(m.id, share, Some(percentage)))
        .collect()
}

fn percentage_splits(
    amount: f64,
    shares: &[ShareRequest],
    members: &[Person],
) -> ResultEngine<Vec<Split>> {
    if shares.is_empty() {
        return Err(EngineError::MissingSplitsForPercentagePolicy);
    }

    let mut seen: HashSet<Uuid> = HashSet::with_capacity(shares.len());
    for share in shares {
        if !members.iter().any(|m| m.id == share.person_id) {
            return Err(EngineError::UnknownMember(share.person_id.to_string()));
        }
        if !seen.insert(share.person_id) {
            return Err(EngineError::DuplicateShare(share.person_id.to_string()));
        }
        if !is_non_negative_amount(share.amount) {
            return Err(EngineError::InvalidAmount(format!(
                "split amount must be >= 0, got {}",
                share.amount
            )));
        }
        if let Some(percentage) = share.percentage
            && !is_non_negative_amount(percentage)
        {
            return Err(EngineError::InvalidAmount(format!(
                "split percentage must be >= 0, got {percentage}"
            )));
        }
    }

    let total_percentage: f64 = shares.iter().filter_map(|s| s.percentage).sum();
    if !approx_eq(total_percentage, 100.0) {
        return Err(EngineError::PercentageSumMismatch(format!(
            "{total_percentage:.2}"
        )));
    }

    let total_amount: f64 = shares.iter().map(|s| s.amount).sum();
    if !approx_eq(total_amount, amount) {
        return Err(EngineError::SplitSumMismatch(format!(
            "expected {amount}, got {total_amount}"
        )));
    }

    // Members without an explicit share owe nothing.
    Ok(members
        .iter()
        .map(|m| match shares.iter().find(|s| s.person_id == m.id) {
            Some(share) => Split::new(m.id, share.amount, share.percentage),
            None => Split::new(m.id, 0.0, Some(0.0)),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(names: &[&str]) -> Vec<Person> {
        names.iter().map(|n| Person::new(*n)).collect()
    }

    fn total(splits: &[Split]) -> f64 {
        splits.iter().map(|s| s.amount).sum()
    }

    #[test]
    fn equal_policy_charges_every_member_including_payer() {
        let group = members(&["a", "b", "c"]);
        let splits = allocate_splits(90.0, &SplitPolicy::Equal, &group, group[0].id).unwrap();

        assert_eq!(splits.len(), 3);
        for (split, member) in splits.iter().zip(&group) {
            assert_eq!(split.person_id, member.id);
            assert!(approx_eq(split.amount, 30.0));
            assert!(approx_eq(split.percentage.unwrap(), 100.0 / 3.0));
        }
    }

    #[test]
    fn equal_policy_sums_to_amount_with_repeating_fractions() {
        let group = members(&["a", "b", "c", "d", "e", "f", "g"]);
        let splits = allocate_splits(100.0, &SplitPolicy::Equal, &group, group[3].id).unwrap();

        assert!(approx_eq(total(&splits), 100.0));
        let percentages: f64 = splits.iter().filter_map(|s| s.percentage).sum();
        assert!(approx_eq(percentages, 100.0));
    }

    #[test]
    fn percentage_policy_completes_missing_members_in_membership_order() {
        let group = members(&["a", "b"]);
        let policy = SplitPolicy::Percentage(vec![ShareRequest::new(group[1].id, 50.0, Some(100.0))]);

        let splits = allocate_splits(50.0, &policy, &group, group[0].id).unwrap();

        assert_eq!(
            splits,
            vec![
                Split::new(group[0].id, 0.0, Some(0.0)),
                Split::new(group[1].id, 50.0, Some(100.0)),
            ]
        );
    }

    #[test]
    fn percentage_policy_ignores_input_order() {
        let group = members(&["a", "b", "c"]);
        let policy = SplitPolicy::Percentage(vec![
            ShareRequest::new(group[2].id, 25.0, Some(25.0)),
            ShareRequest::new(group[0].id, 75.0, Some(75.0)),
        ]);

        let splits = allocate_splits(100.0, &policy, &group, group[1].id).unwrap();

        let order: Vec<Uuid> = splits.iter().map(|s| s.person_id).collect();
        assert_eq!(order, group.iter().map(|m| m.id).collect::<Vec<_>>());
        assert_eq!(splits[1], Split::new(group[1].id, 0.0, Some(0.0)));
    }

    #[test]
    fn percentage_policy_tolerates_rounding_of_thirds() {
        let group = members(&["a", "b", "c"]);
        let policy = SplitPolicy::Percentage(
            group
                .iter()
                .map(|m| ShareRequest::new(m.id, 33.0, Some(33.0)))
                .collect(),
        );

        let err = allocate_splits(99.0, &policy, &group, group[0].id).unwrap_err();
        assert!(matches!(err, EngineError::PercentageSumMismatch(_)));

        let policy = SplitPolicy::Percentage(vec![
            ShareRequest::new(group[0].id, 33.34, Some(33.334)),
            ShareRequest::new(group[1].id, 33.33, Some(33.333)),
            ShareRequest::new(group[2].id, 33.33, Some(33.333)),
        ]);
        let splits = allocate_splits(100.0, &policy, &group, group[0].id).unwrap();
        assert!(approx_eq(total(&splits), 100.0));
    }

    #[test]
    fn percentage_policy_requires_shares() {
        let group = members(&["a", "b"]);
        let err = allocate_splits(10.0, &SplitPolicy::Percentage(Vec::new()), &group, group[0].id)
            .unwrap_err();
        assert_eq!(err, EngineError::MissingSplitsForPercentagePolicy);
    }

    #[test]
    fn percentage_sum_must_be_one_hundred() {
        let group = members(&["a", "b"]);
        let policy = SplitPolicy::Percentage(vec![
            ShareRequest::new(group[0].id, 45.0, Some(45.0)),
            ShareRequest::new(group[1].id, 50.0, Some(50.0)),
        ]);

        let err = allocate_splits(100.0, &policy, &group, group[0].id).unwrap_err();
        assert_eq!(err, EngineError::PercentageSumMismatch("95.00".to_string()));
    }

    #[test]
    fn percentage_mismatch_reports_rounded_total() {
        let group = members(&["a", "b", "c"]);
        let policy = SplitPolicy::Percentage(
            group
                .iter()
                .map(|m| ShareRequest::new(m.id, 33.3, Some(33.3)))
                .collect(),
        );

        let err = allocate_splits(99.9, &policy, &group, group[0].id).unwrap_err();
        assert_eq!(err, EngineError::PercentageSumMismatch("99.90".to_string()));
    }

    #[test]
    fn missing_percentage_counts_as_zero() {
        let group = members(&["a", "b"]);
        let policy = SplitPolicy::Percentage(vec![
            ShareRequest::new(group[0].id, 40.0, None),
            ShareRequest::new(group[1].id, 60.0, Some(100.0)),
        ]);

        let splits = allocate_splits(100.0, &policy, &group, group[0].id).unwrap();
        assert_eq!(splits[0], Split::new(group[0].id, 40.0, None));
    }

    #[test]
    fn share_amounts_must_cover_the_expense() {
        let group = members(&["a", "b"]);
        let policy = SplitPolicy::Percentage(vec![ShareRequest::new(group[1].id, 40.0, Some(100.0))]);

        let err = allocate_splits(50.0, &policy, &group, group[0].id).unwrap_err();
        assert!(matches!(err, EngineError::SplitSumMismatch(_)));
    }

    #[test]
    fn payer_outside_group_is_rejected() {
        let group = members(&["a", "b"]);
        let outsider = Person::new("z");

        let err = allocate_splits(10.0, &SplitPolicy::Equal, &group, outsider.id).unwrap_err();
        assert_eq!(err, EngineError::PayerNotInGroup(outsider.id.to_string()));
    }

    #[test]
    fn share_for_non_member_is_rejected() {
        let group = members(&["a", "b"]);
        let outsider = Person::new("z");
        let policy = SplitPolicy::Percentage(vec![ShareRequest::new(outsider.id, 10.0, Some(100.0))]);

        let err = allocate_splits(10.0, &policy, &group, group[0].id).unwrap_err();
        assert_eq!(err, EngineError::UnknownMember(outsider.id.to_string()));
    }

    #[test]
    fn duplicate_share_is_rejected() {
        let group = members(&["a", "b"]);
        let policy = SplitPolicy::Percentage(vec![
            ShareRequest::new(group[1].id, 5.0, Some(50.0)),
            ShareRequest::new(group[1].id, 5.0, Some(50.0)),
        ]);

        let err = allocate_splits(10.0, &policy, &group, group[0].id).unwrap_err();
        assert_eq!(err, EngineError::DuplicateShare(group[1].id.to_string()));
    }

    #[test]
    fn non_positive_or_non_finite_amount_is_rejected() {
        let group = members(&["a"]);
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = allocate_splits(amount, &SplitPolicy::Equal, &group, group[0].id).unwrap_err();
            assert!(matches!(err, EngineError::InvalidAmount(_)));
        }
    }

    #[test]
    fn negative_share_is_rejected() {
        let group = members(&["a", "b"]);
        let policy = SplitPolicy::Percentage(vec![
            ShareRequest::new(group[0].id, -10.0, Some(-10.0)),
            ShareRequest::new(group[1].id, 20.0, Some(110.0)),
        ]);

        let err = allocate_splits(10.0, &policy, &group, group[0].id).unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }
}
