pub mod dashboard;
pub mod department;
pub mod employee;
pub mod user;

// Re-export all models for easy importing
pub use dashboard::*;
pub use department::*;
pub use employee::*;
pub use user::*;
