use sea_orm::{QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Group, GroupBalance, MemberBalance, Person, ResultEngine, SettlementTransaction,
    group_balances, group_members, person_balances, settle, util::parse_uuid,
};

use super::{Engine, with_tx};

impl Engine {
    /// Balances of every member of a group, in membership order.
    pub async fn group_balances(
        &self,
        group_id: Uuid,
    ) -> ResultEngine<(Group, Vec<MemberBalance>)> {
        with_tx!(self, |db_tx| {
            let ledger = self.load_ledger(&db_tx, group_id).await?;
            let balances = group_balances(&ledger);
            Ok((ledger.group, balances))
        })
    }

    /// Balances of one person, itemized per group and sorted by group name.
    pub async fn person_balances(
        &self,
        person_id: Uuid,
    ) -> ResultEngine<(Person, Vec<GroupBalance>)> {
        with_tx!(self, |db_tx| {
            let person = self.load_person(&db_tx, person_id).await?;
            let memberships = group_members::Entity::find()
                .filter(group_members::Column::PersonId.eq(person_id.to_string()))
                .all(&db_tx)
                .await?;

            let mut ledgers = Vec::with_capacity(memberships.len());
            for membership in memberships {
                let group_id = parse_uuid(&membership.group_id, "group")?;
                ledgers.push(self.load_ledger(&db_tx, group_id).await?);
            }
            ledgers.sort_by(|a, b| a.group.name.cmp(&b.group.name));

            let balances = person_balances(person.id, &ledgers);
            Ok((person, balances))
        })
    }

    /// Payments that settle every balance of a group.
    pub async fn group_settlements(
        &self,
        group_id: Uuid,
    ) -> ResultEngine<(Group, Vec<SettlementTransaction>)> {
        with_tx!(self, |db_tx| {
            let ledger = self.load_ledger(&db_tx, group_id).await?;
            let transactions = settle(&group_balances(&ledger));
            Ok((ledger.group, transactions))
        })
    }
}
