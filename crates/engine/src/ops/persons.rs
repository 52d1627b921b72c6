use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, Person, ResultEngine, persons, util::normalize_required_name};

use super::{Engine, with_tx};

impl Engine {
    /// Creates a person with a unique name.
    pub async fn create_person(&self, name: &str) -> ResultEngine<Person> {
        let name = normalize_required_name(name, "person")?;
        with_tx!(self, |db_tx| {
            let existing = persons::Entity::find()
                .filter(persons::Column::Name.eq(name.clone()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::ExistingKey(name));
            }

            let person = Person::new(name.clone());
            persons::ActiveModel::from(&person).insert(&db_tx).await?;
            tracing::debug!(person_id = %person.id, "created person");
            Ok(person)
        })
    }

    /// Lists every person, sorted by name.
    pub async fn persons(&self) -> ResultEngine<Vec<Person>> {
        with_tx!(self, |db_tx| {
            persons::Entity::find()
                .order_by_asc(persons::Column::Name)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Person::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    pub async fn person(&self, person_id: Uuid) -> ResultEngine<Person> {
        with_tx!(self, |db_tx| self.load_person(&db_tx, person_id).await)
    }

    /// Looks a person up by (normalized) name.
    pub async fn person_by_name(&self, name: &str) -> ResultEngine<Person> {
        let name = normalize_required_name(name, "person")?;
        with_tx!(self, |db_tx| {
            let model = persons::Entity::find()
                .filter(persons::Column::Name.eq(name.clone()))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(name.clone()))?;
            Person::try_from(model)
        })
    }
}
