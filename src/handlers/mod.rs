pub mod auth;
pub mod dashboard;
pub mod departments;
pub mod employees;
pub mod shared;
