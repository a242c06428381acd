//! End-to-end HTTP tests: registration, work logging, payment lifecycle and role gates.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use worksync_server::api::build_app;
use worksync_server::db::DbService;
use worksync_server::{Config, JwtService, ServerState};

const SECRET: &str = "integration-test-secret-0123456789abcdef";
const BOSS: &str = "boss@worksync.test";

struct TestApp {
    app: Router,
    jwt: Arc<JwtService>,
}

impl TestApp {
    async fn in_memory() -> Self {
        let state = ServerState::in_memory(test_config()).await.unwrap();
        Self::from_state(state)
    }

    fn from_state(state: ServerState) -> Self {
        let jwt = state.get_jwt_service();
        let app = build_app(&state).with_state(state);
        Self { app, jwt }
    }

    fn token(&self, uid: &str, email: &str) -> String {
        self.jwt.generate_token(uid, email, 60).unwrap()
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    /// Registers a user and returns (token, employee id)
    async fn register(&self, uid: &str, email: &str, body: Value) -> (String, i64) {
        let token = self.token(uid, email);
        let (status, employee) = self
            .call(Method::POST, "/api/users", Some(token.as_str()), Some(body))
            .await;
        assert_eq!(status, StatusCode::OK, "register {email}: {employee}");
        (token, employee["id"].as_i64().unwrap())
    }
}

fn test_config() -> Config {
    let mut config = Config::for_tests(SECRET);
    config.bootstrap_admin_email = Some(BOSS.into());
    config
}

fn error_code(body: &Value) -> u64 {
    body["code"].as_u64().unwrap_or_default()
}

/// admin, hr and one employee (ann, $20/h)
struct Staff {
    admin: String,
    hr: String,
    ann: String,
    ann_id: i64,
}

async fn staff(app: &TestApp) -> Staff {
    let (admin, _) = app
        .register("uid-boss", BOSS, json!({ "name": "Boss" }))
        .await;
    let (hr, _) = app
        .register(
            "uid-hr",
            "hr@worksync.test",
            json!({ "name": "Helen", "role": "hr" }),
        )
        .await;
    let (ann, ann_id) = app
        .register(
            "uid-ann",
            "ann@worksync.test",
            json!({ "name": "Ann", "role": "employee", "designation": "Sales" }),
        )
        .await;
    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/users/{ann_id}/salary"),
            Some(admin.as_str()),
            Some(json!({ "salary": 20.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "set salary: {body}");
    Staff {
        admin,
        hr,
        ann,
        ann_id,
    }
}

async fn log_work(app: &TestApp, token: &str, hours: f64) -> i64 {
    let (status, entry) = app
        .call(
            Method::POST,
            "/api/worksheet",
            Some(token),
            Some(json!({ "task": "Sales", "hours_worked": hours, "date": "2025-01-10" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "log work: {entry}");
    entry["id"].as_i64().unwrap()
}

async fn verify(app: &TestApp, token: &str, id: i64) {
    let (status, body) = app
        .call(
            Method::POST,
            &format!("/api/toggle-verification/{id}"),
            Some(token),
            Some(json!({ "is_verified": true })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "verify: {body}");
    assert_eq!(body["is_verified"], json!(true));
}

fn payment_body() -> Value {
    json!({ "email": "ann@worksync.test", "month": 1, "year": 2025 })
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::in_memory().await;
    let (status, body) = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["environment"], "test");

    let (status, body) = app.call(Method::GET, "/health/detailed", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn test_authentication_gates() {
    let app = TestApp::in_memory().await;

    let (status, _) = app.call(Method::GET, "/api/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .call(Method::GET, "/api/users/me", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // valid token, no employee record
    let stranger = app.token("uid-x", "x@worksync.test");
    let (status, body) = app
        .call(Method::GET, "/api/users/me", Some(stranger.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), 1008);
}

#[tokio::test]
async fn test_registration_rules() {
    let app = TestApp::in_memory().await;
    let staff = staff(&app).await;

    let (_, me) = app
        .call(Method::GET, "/api/users/me", Some(staff.admin.as_str()), None)
        .await;
    assert_eq!(me["role"], "admin");
    assert_eq!(me["is_verified"], json!(false));

    // second registration with the same identity
    let (status, body) = app
        .call(
            Method::POST,
            "/api/users",
            Some(staff.ann.as_str()),
            Some(json!({ "name": "Ann again" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), 3003);

    // admin cannot be self-assigned
    let mallory = app.token("uid-m", "mallory@worksync.test");
    let (status, _) = app
        .call(
            Method::POST,
            "/api/users",
            Some(mallory.as_str()),
            Some(json!({ "name": "Mallory", "role": "admin" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .call(
            Method::POST,
            "/api/users",
            Some(mallory.as_str()),
            Some(json!({ "name": "  " })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // the hourly rate is not client-controlled
    let (status, created) = app
        .call(
            Method::POST,
            "/api/users",
            Some(mallory.as_str()),
            Some(json!({ "name": "Mallory", "role": "employee", "salary": 1000000.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(created["salary"].is_null());
}

#[tokio::test]
async fn test_directory_access() {
    let app = TestApp::in_memory().await;
    let staff = staff(&app).await;

    let (status, _) = app
        .call(Method::GET, "/api/users", Some(staff.ann.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, list) = app
        .call(Method::GET, "/api/users?role=employee", Some(staff.hr.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = app
        .call(
            Method::GET,
            &format!("/api/users/{}", staff.ann_id),
            Some(staff.ann.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .call(Method::GET, "/api/users/999", Some(staff.hr.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_payment_lifecycle() {
    let app = TestApp::in_memory().await;
    let staff = staff(&app).await;

    let entry_id = log_work(&app, &staff.ann, 6.0).await;
    log_work(&app, &staff.ann, 4.0).await;

    // unverified employees cannot be paid
    let (status, body) = app
        .call(
            Method::POST,
            "/api/process-payment",
            Some(staff.hr.as_str()),
            Some(payment_body()),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 3002);

    verify(&app, &staff.hr, staff.ann_id).await;

    let (status, owed) = app
        .call(
            Method::GET,
            "/api/employee-owed/ann@worksync.test",
            Some(staff.hr.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(owed["total_hours"], json!(10.0));
    assert_eq!(owed["total_owed"], json!(200.0));

    let (status, request) = app
        .call(
            Method::POST,
            "/api/process-payment",
            Some(staff.hr.as_str()),
            Some(payment_body()),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{request}");
    assert_eq!(request["status"], "pending");
    assert_eq!(request["amount"], json!(200.0));
    assert_eq!(request["requested_by"], "hr@worksync.test");
    let request_id = request["id"].as_i64().unwrap();

    // one pending request per employee
    let (status, body) = app
        .call(
            Method::POST,
            "/api/process-payment",
            Some(staff.hr.as_str()),
            Some(payment_body()),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 5002);

    let (_, check) = app
        .call(
            Method::GET,
            "/api/check-pending-payment/ann@worksync.test",
            Some(staff.hr.as_str()),
            None,
        )
        .await;
    assert_eq!(check["has_pending_payment"], json!(true));

    // claimed entries are frozen
    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/worksheet/{entry_id}"),
            Some(staff.ann.as_str()),
            Some(json!({ "hours_worked": 8.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), 4002);

    // only admins approve
    let approve_uri = format!("/api/approve-payment/{request_id}");
    let (status, _) = app
        .call(Method::PUT, &approve_uri, Some(staff.ann.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app
        .call(Method::PUT, &approve_uri, Some(staff.hr.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, paid) = app
        .call(Method::PUT, &approve_uri, Some(staff.admin.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{paid}");
    assert_eq!(paid["status"], "paid");
    assert_eq!(paid["approved_by"], BOSS);
    assert!(paid["paid_date"].is_i64());

    let (status, body) = app
        .call(Method::PUT, &approve_uri, Some(staff.admin.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), 5005);

    let (_, owed) = app
        .call(
            Method::GET,
            "/api/employee-owed/ann@worksync.test",
            Some(staff.hr.as_str()),
            None,
        )
        .await;
    assert_eq!(owed["total_paid"], json!(200.0));
    assert_eq!(owed["total_owed"], json!(0.0));

    // nothing left to pay
    let (status, body) = app
        .call(
            Method::POST,
            "/api/process-payment",
            Some(staff.hr.as_str()),
            Some(payment_body()),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 5003);

    let (status, history) = app
        .call(
            Method::GET,
            &format!("/api/payment-history/{}", staff.ann_id),
            Some(staff.ann.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);

    let (_, payroll) = app
        .call(Method::GET, "/api/payroll?status=paid", Some(staff.admin.as_str()), None)
        .await;
    assert_eq!(payroll.as_array().unwrap().len(), 1);
    let (status, _) = app
        .call(Method::GET, "/api/payroll", Some(staff.hr.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_partial_payment_and_reject() {
    let app = TestApp::in_memory().await;
    let staff = staff(&app).await;
    let entry_id = log_work(&app, &staff.ann, 10.0).await;
    verify(&app, &staff.hr, staff.ann_id).await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/process-payment",
            Some(staff.hr.as_str()),
            Some(json!({ "email": "ann@worksync.test", "amount": 250.0, "month": 1, "year": 2025 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 5004);

    let (status, request) = app
        .call(
            Method::POST,
            "/api/process-payment",
            Some(staff.hr.as_str()),
            Some(json!({ "email": "ann@worksync.test", "amount": 150.0, "month": 1, "year": 2025 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let request_id = request["id"].as_i64().unwrap();

    let (status, rejected) = app
        .call(
            Method::PUT,
            &format!("/api/reject-payment/{request_id}"),
            Some(staff.admin.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], "rejected");
    assert_eq!(rejected["rejected_by"], BOSS);

    // rejected requests cannot be approved
    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/approve-payment/{request_id}"),
            Some(staff.admin.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), 5006);

    // entries are released and still fully owed
    let (status, _) = app
        .call(
            Method::PUT,
            &format!("/api/worksheet/{entry_id}"),
            Some(staff.ann.as_str()),
            Some(json!({ "task": "Support" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, owed) = app
        .call(
            Method::GET,
            "/api/employee-owed/ann@worksync.test",
            Some(staff.hr.as_str()),
            None,
        )
        .await;
    assert_eq!(owed["total_owed"], json!(200.0));

    let (status, _) = app
        .call(
            Method::POST,
            "/api/process-payment",
            Some(staff.hr.as_str()),
            Some(payment_body()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .call(
            Method::PUT,
            "/api/approve-payment/424242",
            Some(staff.admin.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), 5001);
}

async fn owed(app: &TestApp, token: &str) -> Value {
    let (status, owed) = app
        .call(
            Method::GET,
            "/api/employee-owed/ann@worksync.test",
            Some(token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "owed: {owed}");
    owed
}

async fn set_salary(app: &TestApp, staff: &Staff, salary: f64) {
    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/users/{}/salary", staff.ann_id),
            Some(staff.admin.as_str()),
            Some(json!({ "salary": salary })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "set salary: {body}");
}

async fn pay_in_full(app: &TestApp, staff: &Staff) -> Value {
    let (status, request) = app
        .call(
            Method::POST,
            "/api/process-payment",
            Some(staff.hr.as_str()),
            Some(payment_body()),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "process: {request}");
    let (status, paid) = app
        .call(
            Method::PUT,
            &format!("/api/approve-payment/{}", request["id"]),
            Some(staff.admin.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "approve: {paid}");
    paid
}

#[tokio::test]
async fn test_rate_change_only_prices_unpaid_hours() {
    let app = TestApp::in_memory().await;
    let staff = staff(&app).await;
    log_work(&app, &staff.ann, 10.0).await;
    verify(&app, &staff.hr, staff.ann_id).await;

    let paid = pay_in_full(&app, &staff).await;
    assert_eq!(paid["amount"], json!(200.0));
    assert_eq!(paid["hourly_rate"], json!(20.0));
    assert_eq!(paid["hours_covered"], json!(10.0));

    // rate cut: settled hours stay settled
    set_salary(&app, &staff, 10.0).await;
    assert_eq!(owed(&app, &staff.hr).await["total_owed"], json!(0.0));

    log_work(&app, &staff.ann, 5.0).await;
    let summary = owed(&app, &staff.hr).await;
    assert_eq!(summary["total_hours"], json!(15.0));
    assert_eq!(summary["unpaid_hours"], json!(5.0));
    assert_eq!(summary["total_owed"], json!(50.0));

    // raise: still only the unpaid 5h
    set_salary(&app, &staff, 30.0).await;
    assert_eq!(owed(&app, &staff.hr).await["total_owed"], json!(150.0));

    let paid = pay_in_full(&app, &staff).await;
    assert_eq!(paid["amount"], json!(150.0));
    let summary = owed(&app, &staff.hr).await;
    assert_eq!(summary["total_paid"], json!(350.0));
    assert_eq!(summary["total_owed"], json!(0.0));
}

#[tokio::test]
async fn test_contact_queries() {
    let app = TestApp::in_memory().await;
    let staff = staff(&app).await;

    let (status, query) = app
        .call(
            Method::POST,
            "/api/submit-query",
            Some(staff.ann.as_str()),
            Some(json!({
                "heading": "Missing hours",
                "designation": "employee",
                "details": "My 10 January entry is gone",
                "email": "spoofed@worksync.test",
                "submittedAt": "2020-01-01T00:00:00Z"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "submit: {query}");
    assert_eq!(query["email"], "ann@worksync.test");
    assert_eq!(query["employee_id"], json!(staff.ann_id));
    assert!(query["submitted_at"].as_i64().unwrap() > 1_700_000_000_000);

    // signed in but not registered
    let guest = app.token("uid-guest", "guest@worksync.test");
    let (status, query) = app
        .call(
            Method::POST,
            "/api/submit-query",
            Some(guest.as_str()),
            Some(json!({ "heading": "Access", "designation": "hr", "details": "Cannot register" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "guest submit: {query}");
    assert!(query["employee_id"].is_null());

    for body in [
        json!({ "heading": " ", "details": "x" }),
        json!({ "heading": "h", "details": "" }),
        json!({ "heading": "h", "designation": "admin", "details": "x" }),
        json!({ "heading": "h", "details": "x".repeat(5001) }),
    ] {
        let (status, err) = app
            .call(Method::POST, "/api/submit-query", Some(guest.as_str()), Some(body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{err}");
        assert_eq!(error_code(&err), 2);
    }

    let (status, _) = app
        .call(
            Method::POST,
            "/api/submit-query",
            None,
            Some(json!({ "heading": "h", "details": "x" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // inbox is admin only
    let (status, body) = app
        .call(Method::GET, "/api/queries", Some(staff.hr.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), 2003);

    let (status, inbox) = app
        .call(Method::GET, "/api/queries", Some(staff.admin.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let inbox = inbox.as_array().unwrap();
    assert_eq!(inbox.len(), 2);
    assert!(inbox.iter().any(|q| q["heading"] == "Missing hours"));
}

#[tokio::test]
async fn test_worksheet_rules() {
    let app = TestApp::in_memory().await;
    let staff = staff(&app).await;

    // hr does not log work
    let (status, _) = app
        .call(
            Method::POST,
            "/api/worksheet",
            Some(staff.hr.as_str()),
            Some(json!({ "task": "Sales", "hours_worked": 2.0, "date": "2025-01-10" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    for bad in [
        json!({ "task": "Sales", "hours_worked": 0.0, "date": "2025-01-10" }),
        json!({ "task": "Sales", "hours_worked": 25.0, "date": "2025-01-10" }),
        json!({ "task": "", "hours_worked": 2.0, "date": "2025-01-10" }),
        json!({ "task": "Sales", "hours_worked": 2.0, "date": "2999-01-01" }),
    ] {
        let (status, _) = app
            .call(Method::POST, "/api/worksheet", Some(staff.ann.as_str()), Some(bad))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let entry_id = log_work(&app, &staff.ann, 3.0).await;

    let (_, own) = app
        .call(Method::GET, "/api/worksheet", Some(staff.ann.as_str()), None)
        .await;
    assert_eq!(own.as_array().unwrap().len(), 1);

    let (status, _) = app
        .call(
            Method::GET,
            "/api/worksheet/ann@worksync.test",
            Some(staff.hr.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .call(
            Method::GET,
            "/api/worksheet/hr@worksync.test",
            Some(staff.ann.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, progress) = app
        .call(
            Method::GET,
            "/api/progress?month=1&year=2025",
            Some(staff.hr.as_str()),
            None,
        )
        .await;
    assert_eq!(progress.as_array().unwrap().len(), 1);
    let (_, progress) = app
        .call(
            Method::GET,
            "/api/progress?month=2&year=2025",
            Some(staff.hr.as_str()),
            None,
        )
        .await;
    assert!(progress.as_array().unwrap().is_empty());
    let (status, _) = app
        .call(Method::GET, "/api/progress?month=13", Some(staff.hr.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call(
            Method::DELETE,
            &format!("/api/worksheet/{entry_id}"),
            Some(staff.ann.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app
        .call(
            Method::DELETE,
            &format!("/api/worksheet/{entry_id}"),
            Some(staff.ann.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), 4001);
}

#[tokio::test]
async fn test_admin_controls() {
    let app = TestApp::in_memory().await;
    let staff = staff(&app).await;

    let (_, boss) = app
        .call(Method::GET, "/api/users/me", Some(staff.admin.as_str()), None)
        .await;
    let boss_id = boss["id"].as_i64().unwrap();

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/users/{boss_id}/role"),
            Some(staff.admin.as_str()),
            Some(json!({ "role": "hr" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), 2004);

    let (status, updated) = app
        .call(
            Method::PUT,
            &format!("/api/users/{}/salary", staff.ann_id),
            Some(staff.admin.as_str()),
            Some(json!({ "salary": 25.5 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["salary"], json!(25.5));

    let (status, _) = app
        .call(
            Method::PUT,
            &format!("/api/users/{}/salary", staff.ann_id),
            Some(staff.hr.as_str()),
            Some(json!({ "salary": 99.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, fired) = app
        .call(
            Method::PUT,
            &format!("/api/users/{}/status", staff.ann_id),
            Some(staff.admin.as_str()),
            Some(json!({ "status": "fired" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fired["status"], "fired");

    let (status, body) = app
        .call(Method::GET, "/api/users/me", Some(staff.ann.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), 1007);
}

#[tokio::test]
async fn test_concurrent_creates_leave_one_pending_request() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("worksync.db");
    let db = DbService::new(db_path.to_str().unwrap()).await.unwrap();
    let config = test_config();
    let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
    let app = TestApp::from_state(ServerState::new(config, db.pool, jwt));

    let staff = staff(&app).await;
    log_work(&app, &staff.ann, 10.0).await;
    verify(&app, &staff.hr, staff.ann_id).await;

    let calls = (0..8).map(|_| {
        app.call(
            Method::POST,
            "/api/process-payment",
            Some(staff.hr.as_str()),
            Some(payment_body()),
        )
    });
    let results = futures::future::join_all(calls).await;

    let created = results
        .iter()
        .filter(|(status, _)| *status == StatusCode::OK)
        .count();
    assert_eq!(created, 1);
    assert!(
        results
            .iter()
            .filter(|(status, _)| *status != StatusCode::OK)
            .all(|(_, body)| error_code(body) == 5002)
    );

    let (_, pending) = app
        .call(
            Method::GET,
            "/api/payroll?status=pending",
            Some(staff.admin.as_str()),
            None,
        )
        .await;
    assert_eq!(pending.as_array().unwrap().len(), 1);
}
