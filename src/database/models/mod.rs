pub mod career;
pub mod display_order;
pub mod team;
pub mod user;

// Re-export all models for easy importing
pub use career::*;
pub use display_order::*;
pub use team::*;
pub use user::*;
