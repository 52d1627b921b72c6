use std::collections::HashSet;

use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Group, GroupSummary, ResultEngine, group_members, groups, total_expenses,
    util::{normalize_required_name, parse_uuid},
};

use super::{Engine, with_tx};

impl Engine {
    /// Creates a group with a fixed membership.
    ///
    /// The order of `member_ids` becomes the group's enumeration order.
    pub async fn create_group(&self, name: &str, member_ids: &[Uuid]) -> ResultEngine<Group> {
        let name = normalize_required_name(name, "group")?;
        if member_ids.is_empty() {
            return Err(EngineError::InvalidGroup(
                "a group needs at least one member".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(member_ids.len());
        if let Some(duplicate) = member_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(EngineError::InvalidGroup(format!(
                "member {duplicate} listed more than once"
            )));
        }

        with_tx!(self, |db_tx| {
            let mut members = Vec::with_capacity(member_ids.len());
            for id in member_ids {
                members.push(self.load_person(&db_tx, *id).await?);
            }

            let group = Group::new(name.clone(), members);
            groups::ActiveModel::from(&group).insert(&db_tx).await?;
            for (position, member) in group.members.iter().enumerate() {
                group_members::ActiveModel {
                    group_id: ActiveValue::Set(group.id.to_string()),
                    person_id: ActiveValue::Set(member.id.to_string()),
                    position: ActiveValue::Set(position as i32),
                }
                .insert(&db_tx)
                .await?;
            }

            tracing::debug!(group_id = %group.id, members = group.members.len(), "created group");
            Ok(group)
        })
    }

    /// Lists every group with its total spending, sorted by name.
    pub async fn groups(&self) -> ResultEngine<Vec<GroupSummary>> {
        with_tx!(self, |db_tx| {
            let models = groups::Entity::find()
                .order_by_asc(groups::Column::Name)
                .all(&db_tx)
                .await?;

            let mut summaries = Vec::with_capacity(models.len());
            for model in models {
                let group_id = parse_uuid(&model.id, "group")?;
                let ledger = self.load_ledger(&db_tx, group_id).await?;
                summaries.push(GroupSummary {
                    total_expenses: total_expenses(&ledger.expenses),
                    group: ledger.group,
                });
            }
            Ok(summaries)
        })
    }

    /// Returns one group with its total spending.
    pub async fn group(&self, group_id: Uuid) -> ResultEngine<GroupSummary> {
        with_tx!(self, |db_tx| {
            let ledger = self.load_ledger(&db_tx, group_id).await?;
            Ok(GroupSummary {
                total_expenses: total_expenses(&ledger.expenses),
                group: ledger.group,
            })
        })
    }
}
