use std::collections::HashMap;

use sea_orm::{DatabaseConnection, DatabaseTransaction, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Expense, Group, GroupLedger, Person, ResultEngine, Split, group_members,
};

mod balances;
mod expenses;
mod groups;
mod persons;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
///
/// Reads go through a transaction too, so every derived view is computed
/// from one consistent snapshot of the ledger.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Entry point for every ledger operation backed by the database.
///
/// The engine keeps no state besides the connection: balances and
/// settlements are recomputed from storage on every call.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    async fn load_person(
        &self,
        db: &DatabaseTransaction,
        person_id: Uuid,
    ) -> ResultEngine<Person> {
        let model = crate::persons::Entity::find_by_id(person_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("person {person_id}")))?;
        Person::try_from(model)
    }

    async fn load_group(&self, db: &DatabaseTransaction, group_id: Uuid) -> ResultEngine<Group> {
        let model = crate::groups::Entity::find_by_id(group_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("group {group_id}")))?;

        let rows = group_members::Entity::find()
            .filter(group_members::Column::GroupId.eq(model.id.clone()))
            .order_by_asc(group_members::Column::Position)
            .find_also_related(crate::persons::Entity)
            .all(db)
            .await?;

        let mut members = Vec::with_capacity(rows.len());
        for (membership, person) in rows {
            let person = person.ok_or_else(|| {
                EngineError::KeyNotFound(format!("person {}", membership.person_id))
            })?;
            members.push(Person::try_from(person)?);
        }

        Group::try_from((model, members))
    }

    /// Expenses of a group in creation order, each with its splits.
    async fn load_expenses(
        &self,
        db: &DatabaseTransaction,
        group_id: Uuid,
    ) -> ResultEngine<Vec<Expense>> {
        let expense_models = crate::expenses::Entity::find()
            .filter(crate::expenses::Column::GroupId.eq(group_id.to_string()))
            .order_by_asc(crate::expenses::Column::CreatedAt)
            .all(db)
            .await?;
        if expense_models.is_empty() {
            return Ok(Vec::new());
        }

        let expense_ids: Vec<String> = expense_models.iter().map(|e| e.id.clone()).collect();
        let split_models = crate::splits::Entity::find()
            .filter(crate::splits::Column::ExpenseId.is_in(expense_ids))
            .order_by_asc(crate::splits::Column::ExpenseId)
            .order_by_asc(crate::splits::Column::Position)
            .all(db)
            .await?;

        let mut splits_by_expense: HashMap<String, Vec<Split>> = HashMap::new();
        for model in split_models {
            let expense_id = model.expense_id.clone();
            splits_by_expense
                .entry(expense_id)
                .or_default()
                .push(Split::try_from(model)?);
        }

        expense_models
            .into_iter()
            .map(|model| {
                let splits = splits_by_expense.remove(&model.id).unwrap_or_default();
                Expense::try_from((model, splits))
            })
            .collect()
    }

    async fn load_ledger(
        &self,
        db: &DatabaseTransaction,
        group_id: Uuid,
    ) -> ResultEngine<GroupLedger> {
        let group = self.load_group(db, group_id).await?;
        let expenses = self.load_expenses(db, group_id).await?;
        Ok(GroupLedger::new(group, expenses))
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
