use actix_web::{App, http::StatusCode, test, web};
use pretty_assertions::assert_eq;
use serde_json::json;

use ems::database::repositories::DashboardRepository;
use ems::handlers::dashboard;

mod common;

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(DashboardRepository::new($ctx.pool.clone())))
                .app_data(web::Data::new($ctx.config.clone()))
                .service(
                    web::scope("/api/v1")
                        .service(web::scope("/dashboard").route("", web::get().to(dashboard::get_dashboard))),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn summarize_aggregates_headcount_and_payroll() {
    let ctx = common::TestContext::new().await.unwrap();
    let app = init_app!(ctx);

    let it = ctx.seed_department("IT", None).await.unwrap();
    let hr = ctx.seed_department("HR", None).await.unwrap();
    // A department with no employees must not appear in the headcounts
    ctx.seed_department("Finance", None).await.unwrap();

    ctx.seed_employee("Employee A", it.id, 50_000.0).await.unwrap();
    ctx.seed_employee("Employee B", it.id, 60_000.0).await.unwrap();
    ctx.seed_employee("Employee C", hr.id, 40_000.0).await.unwrap();

    let token = ctx.admin_token().await.unwrap();
    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let snapshot = &body["data"];
    assert_eq!(snapshot["totalEmployees"], json!(3));
    assert_eq!(snapshot["totalDepartments"], json!(3));
    assert_eq!(snapshot["totalSalaryExpense"], json!(150_000.0));
    assert_eq!(snapshot["departmentHeadcounts"]["IT"], json!(2));
    assert_eq!(snapshot["departmentHeadcounts"]["HR"], json!(1));
    assert!(snapshot["departmentHeadcounts"].get("Finance").is_none());
}

#[actix_web::test]
async fn summarize_on_empty_store_is_all_zeroes() {
    let ctx = common::TestContext::new().await.unwrap();
    let app = init_app!(ctx);

    let token = ctx.admin_token().await.unwrap();
    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["totalEmployees"], json!(0));
    assert_eq!(body["data"]["totalDepartments"], json!(0));
    assert_eq!(body["data"]["totalSalaryExpense"], json!(0.0));
    assert!(
        body["data"]["departmentHeadcounts"]
            .as_object()
            .unwrap()
            .is_empty()
    );
}

#[actix_web::test]
async fn summarize_denies_non_admin_callers() {
    let ctx = common::TestContext::new().await.unwrap();
    let app = init_app!(ctx);

    // Anonymous caller: no credentials at all
    let req = test::TestRequest::get().uri("/api/v1/dashboard").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Standard-authenticated caller: denied before any query runs
    let token = ctx.user_token().await.unwrap();
    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
