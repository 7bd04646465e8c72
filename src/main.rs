use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, web};
use anyhow::Result;

use ems::database::{
    init_database,
    repositories::{DashboardRepository, DepartmentRepository, EmployeeRepository, UserRepository},
};
use ems::handlers::{auth, dashboard, departments, employees};
use ems::middleware::RequestId;
use ems::{AppState, AuthService, Config, FileStorage};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Employee Management API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    println!("🚀 Starting Employee Management API server...");

    // Load configuration
    let config = Config::from_env()?;
    println!(
        "📋 Configuration loaded (environment: {})",
        config.environment
    );

    // Initialize database
    let pool = init_database(&config.database_url).await?;
    println!("✅ Database initialized");

    // Initialize repositories and services
    let user_repository = UserRepository::new(pool.clone());
    let employee_repository = EmployeeRepository::new(pool.clone());
    let department_repository = DepartmentRepository::new(pool.clone());
    let dashboard_repository = DashboardRepository::new(pool.clone());
    let auth_service = AuthService::new(user_repository.clone(), config.clone());
    let file_storage = FileStorage::new(&config.upload_dir);

    // Seed the bootstrap admin account if configured
    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        auth_service.ensure_admin(email, password).await?;
    }

    let app_state = web::Data::new(AppState {
        auth_service: auth_service.clone(),
    });
    let user_repo_data = web::Data::new(user_repository);
    let employee_repo_data = web::Data::new(employee_repository);
    let department_repo_data = web::Data::new(department_repository);
    let dashboard_repo_data = web::Data::new(dashboard_repository);
    let file_storage_data = web::Data::new(file_storage);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    println!("🌐 Server starting on http://{}", server_address);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(user_repo_data.clone())
            .app_data(employee_repo_data.clone())
            .app_data(department_repo_data.clone())
            .app_data(dashboard_repo_data.clone())
            .app_data(file_storage_data.clone())
            .app_data(config_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin("http://localhost:3000")
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                        "X-Correlation-ID",
                    ])
                    .max_age(3600),
            )
            .wrap(RequestId)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
            .service(hello)
            .service(health)
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(auth::register))
                            .route("/login", web::post().to(auth::login))
                            .route("/me", web::get().to(auth::me)),
                    )
                    .service(
                        web::scope("/employees")
                            .route("", web::get().to(employees::list_employees))
                            .route("", web::post().to(employees::create_employee))
                            .route("/{id}", web::get().to(employees::get_employee))
                            .route("/{id}", web::put().to(employees::update_employee))
                            .route(
                                "/{id}/delete",
                                web::get().to(employees::get_employee_for_delete),
                            )
                            .route("/{id}", web::delete().to(employees::delete_employee)),
                    )
                    .service(
                        web::scope("/departments")
                            .route("", web::get().to(departments::list_departments))
                            .route("", web::post().to(departments::create_department))
                            .route("/{id}", web::get().to(departments::get_department))
                            .route("/{id}", web::put().to(departments::update_department))
                            .route("/{id}", web::delete().to(departments::delete_department)),
                    )
                    .service(
                        web::scope("/dashboard").route("", web::get().to(dashboard::get_dashboard)),
                    ),
            )
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
