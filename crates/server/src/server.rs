use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{balances, expenses, groups, users};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

impl ServerState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/users", post(users::user_new).get(users::list))
        .route("/users/{id}/balances", get(balances::user_balances))
        .route("/groups", post(groups::group_new).get(groups::list))
        .route("/groups/{id}", get(groups::get))
        .route(
            "/groups/{id}/expenses",
            post(expenses::expense_new).get(expenses::list),
        )
        .route("/groups/{id}/balances", get(balances::group_balances))
        .route("/groups/{id}/settle", get(balances::group_settlements))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState::new(engine))).await
}
