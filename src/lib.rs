pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod services;

pub use config::Config;
pub use database::{PgRosterStore, RosterStore};
pub use services::{RosterFetcher, SessionState};

pub struct AppState<S> {
    pub fetcher: RosterFetcher<S>,
}

impl<S: RosterStore> AppState<S> {
    pub fn new(store: S, config: &Config) -> Self {
        Self {
            fetcher: RosterFetcher::from_config(store, config),
        }
    }
}
