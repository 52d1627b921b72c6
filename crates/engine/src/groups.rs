//! Expense groups.
//!
//! A [`Group`] owns a fixed, ordered membership chosen at creation time. The
//! order of [`Group::members`] is the enumeration order every derived view
//! (splits, balances, settlements) follows.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Person, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub members: Vec<Person>,
}

impl Group {
    pub fn new(name: impl Into<String>, members: Vec<Person>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members,
        }
    }

    /// Returns the member with the given id, if any.
    pub fn member(&self, person_id: Uuid) -> Option<&Person> {
        self.members.iter().find(|p| p.id == person_id)
    }

    pub fn is_member(&self, person_id: Uuid) -> bool {
        self.member(person_id).is_some()
    }
}

/// A group together with the total amount spent in it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub group: Group,
    pub total_expenses: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::group_members::Entity")]
    GroupMembers,
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
}

impl Related<super::group_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupMembers.def()
    }
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Group> for ActiveModel {
    fn from(value: &Group) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
        }
    }
}

impl TryFrom<(Model, Vec<Person>)> for Group {
    type Error = EngineError;

    fn try_from((model, members): (Model, Vec<Person>)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "group")?,
            name: model.name,
            members,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_lookup_follows_membership() {
        let alice = Person::new("alice");
        let bob = Person::new("bob");
        let group = Group::new("trip", vec![alice.clone(), bob.clone()]);

        assert_eq!(group.member(bob.id), Some(&bob));
        assert!(group.is_member(alice.id));
        assert!(!group.is_member(Uuid::new_v4()));
    }
}
