pub mod career;
pub mod display_order;
pub mod team;
pub mod user;

// Re-export all repositories for easy importing
pub use career::{CareerOrder, CareerRepository};
pub use display_order::DisplayOrderRepository;
pub use team::TeamRepository;
pub use user::UserRepository;
