pub mod dashboard;
pub mod department;
pub mod employee;
pub mod user;

// Re-export all repositories for easy importing
pub use dashboard::DashboardRepository;
pub use department::{DepartmentDeleteOutcome, DepartmentRepository};
pub use employee::{EmployeeRepository, EmployeeUpdateOutcome};
pub use user::UserRepository;
