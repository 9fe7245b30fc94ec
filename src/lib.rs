use std::sync::Arc;

use fixtures::FixtureStore;

pub mod config;
pub mod error;
pub mod fixtures;
pub mod middleware;
pub mod router;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub fixtures: Arc<dyn FixtureStore>,
}
