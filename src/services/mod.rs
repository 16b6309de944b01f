pub mod auth;
pub mod fetchers;
pub mod mappers;
pub mod profile;
pub mod ranked;
pub mod sample;
pub mod search;
pub mod session;
pub mod thumbnail;

pub use auth::AuthUser;
pub use fetchers::RosterFetcher;
pub use session::SessionState;
