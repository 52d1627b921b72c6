//! User API endpoints

use api_types::user::{UserNew, UserView};
use axum::{Json, extract::State};
use axum_extra::extract::WithRejection;
use engine::Person;

use crate::{ServerError, server::ServerState};

pub(crate) fn user_view(person: &Person) -> UserView {
    UserView {
        id: person.id,
        name: person.name.clone(),
    }
}

/// Handle requests for creating a new user
pub async fn user_new(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<UserNew>, ServerError>,
) -> Result<Json<UserView>, ServerError> {
    let person = state.engine.create_person(&payload.name).await?;
    Ok(Json(user_view(&person)))
}

/// Handle requests for listing every user
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<UserView>>, ServerError> {
    let persons = state.engine.persons().await?;
    Ok(Json(persons.iter().map(user_view).collect()))
}
