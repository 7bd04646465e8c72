// Not every test binary exercises every helper
#![allow(dead_code)]

use anyhow::Result;
use sqlx::SqlitePool;
use tempfile::TempDir;

use ems::Config;
use ems::database::init_database;
use ems::database::models::{Department, DepartmentInput, Employee, EmployeeInput, UserRole};
use ems::database::repositories::{DepartmentRepository, EmployeeRepository, UserRepository};
use ems::services::AuthService;

/// Per-test database and storage root backed by temp directories.
pub struct TestContext {
    pub pool: SqlitePool,
    pub config: Config,
    pub auth_service: AuthService,
    pub upload_dir: std::path::PathBuf,
    _temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());
        let pool = init_database(&database_url).await?;
        let upload_dir = temp_dir.path().join("uploads");

        let config = Config {
            database_url,
            jwt_secret: "test-jwt-secret-key-that-is-long-enough".to_string(),
            jwt_expiration_days: 1,
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            upload_dir: upload_dir.display().to_string(),
            admin_email: None,
            admin_password: None,
        };

        let auth_service = AuthService::new(UserRepository::new(pool.clone()), config.clone());

        Ok(TestContext {
            pool,
            config,
            auth_service,
            upload_dir,
            _temp_dir: temp_dir,
        })
    }

    /// Creates a user with the given role directly and returns a bearer token.
    pub async fn token_for(&self, email: &str, role: UserRole) -> Result<String> {
        let repo = UserRepository::new(self.pool.clone());
        let hash = bcrypt::hash("password123", bcrypt::DEFAULT_COST)?;
        let user = repo.create(email, &hash, "Test User", role).await?;
        self.auth_service.generate_token(&user)
    }

    pub async fn user_token(&self) -> Result<String> {
        self.token_for("user@example.com", UserRole::User).await
    }

    pub async fn admin_token(&self) -> Result<String> {
        self.token_for("admin@example.com", UserRole::Admin).await
    }

    pub async fn seed_department(&self, name: &str, code: Option<&str>) -> Result<Department> {
        let repo = DepartmentRepository::new(self.pool.clone());
        repo.create(DepartmentInput {
            name: name.to_string(),
            code: code.map(str::to_string),
        })
        .await
    }

    pub async fn seed_employee(
        &self,
        full_name: &str,
        department_id: i64,
        salary: f64,
    ) -> Result<Employee> {
        let repo = EmployeeRepository::new(self.pool.clone());
        repo.create(
            &EmployeeInput {
                full_name: full_name.to_string(),
                department_id,
                email: format!(
                    "{}@example.com",
                    full_name.to_lowercase().replace(' ', ".")
                ),
                salary,
                date_of_joining: chrono::NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            },
            None,
        )
        .await
    }
}

/// Builds a multipart/form-data body for the employee create endpoint.
/// Returns the content-type header value and the raw body bytes.
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> (String, Vec<u8>) {
    let boundary = "----ems-test-boundary";
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((name, file_name, data)) = file {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    (
        format!("multipart/form-data; boundary={}", boundary),
        body,
    )
}

/// Standard multipart field set for a valid employee create request.
pub fn employee_fields<'a>(department_id: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("fullName", "Jane Doe"),
        ("departmentId", department_id),
        ("email", "jane@example.com"),
        ("salary", "50000"),
        ("dateOfJoining", "2023-04-01"),
    ]
}
