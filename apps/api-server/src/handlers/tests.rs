use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::Utc;
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use cyberprep_core::domain::{ProposedQuestion, ReportedQuestion, Stamped};
use cyberprep_core::ports::RateLimiter;
use cyberprep_infra::{InMemoryRateLimiter, Quota, RateLimitConfig};
use cyberprep_shared::dto::{
    ProposeQuestionRequest, ReportQuestionRequest, TranslationPair, Translations,
};

use super::{PROPOSE_ROUTE, REPORT_ROUTE, configure_routes};
use crate::config::{AppConfig, submission_rate_limits};
use crate::observability::RequestIdMiddleware;
use crate::state::AppState;

macro_rules! test_app {
    ($state:expr, $limits:expr) => {{
        let limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::new($limits));
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new($state))
                .configure(move |cfg| configure_routes(cfg, limiter)),
        )
        .await
    }};
}

fn config(data_dir: &Path) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        data_dir: data_dir.to_path_buf(),
        rate_limit: strict_limits(),
        propose_cooldown: Duration::from_secs(60),
    }
}

fn strict_limits() -> RateLimitConfig {
    submission_rate_limits(Quota::default(), Quota::new(1, Duration::from_secs(60)))
}

fn permissive_limits() -> RateLimitConfig {
    submission_rate_limits(Quota::default(), Quota::new(100, Duration::from_secs(60)))
}

fn proposal() -> ProposeQuestionRequest {
    ProposeQuestionRequest {
        category: "web".to_string(),
        difficulty: "easy".to_string(),
        frequency: "common".to_string(),
        translations: Translations {
            en: TranslationPair {
                question: "What does CSRF stand for?".to_string(),
                answer: "Cross-Site Request Forgery".to_string(),
            },
            fr: TranslationPair {
                question: "Que signifie CSRF ?".to_string(),
                answer: "Falsification de requête intersite".to_string(),
            },
        },
    }
}

fn report() -> ReportQuestionRequest {
    ReportQuestionRequest {
        question: json!({ "category": "web" }),
        reason: "incorrect".to_string(),
        description: None,
    }
}

#[actix_web::test]
async fn report_is_stored_with_timestamp() {
    let tmp = TempDir::new().unwrap();
    let state = AppState::new(&config(tmp.path()));
    let app = test_app!(state.clone(), strict_limits());
    let started = Utc::now();

    let req = test::TestRequest::post()
        .uri(REPORT_ROUTE)
        .insert_header(("X-Forwarded-For", "203.0.113.1"))
        .set_json(report())
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "success": true }));

    let entries = state.reports.read_all().await.unwrap();
    assert_eq!(entries.len(), 1);
    let stored: Stamped<ReportedQuestion> = serde_json::from_value(entries[0].clone()).unwrap();
    assert_eq!(stored.record.question, json!({ "category": "web" }));
    assert_eq!(stored.record.reason, "incorrect");
    assert_eq!(stored.record.description, "");
    assert!(stored.created_at.timestamp_millis() >= started.timestamp_millis());
}

#[actix_web::test]
async fn proposal_is_stored_as_submitted() {
    let tmp = TempDir::new().unwrap();
    let state = AppState::new(&config(tmp.path()));
    let app = test_app!(state.clone(), strict_limits());

    let req = test::TestRequest::post()
        .uri(PROPOSE_ROUTE)
        .insert_header(("X-Forwarded-For", "203.0.113.2"))
        .set_json(proposal())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let entries = state.proposals.read_all().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0]["createdAt"].is_string());
    let stored: Stamped<ProposedQuestion> = serde_json::from_value(entries[0].clone()).unwrap();
    assert_eq!(stored.record.category, "web");
    assert_eq!(stored.record.translations["fr"]["question"], "Que signifie CSRF ?");
}

#[actix_web::test]
async fn proposal_without_french_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let state = AppState::new(&config(tmp.path()));
    let app = test_app!(state.clone(), permissive_limits());

    let mut body = serde_json::to_value(proposal()).unwrap();
    body["translations"].as_object_mut().unwrap().remove("fr");

    let req = test::TestRequest::post()
        .uri(PROPOSE_ROUTE)
        .insert_header(("X-Forwarded-For", "203.0.113.3"))
        .set_json(body)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "error": "Invalid payload" }));
    assert!(state.proposals.read_all().await.unwrap().is_empty());

    // A rejected payload does not start the cooldown.
    let req = test::TestRequest::post()
        .uri(PROPOSE_ROUTE)
        .insert_header(("X-Forwarded-For", "203.0.113.3"))
        .set_json(proposal())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn proposal_with_empty_strings_is_accepted() {
    let tmp = TempDir::new().unwrap();
    let app = test_app!(AppState::new(&config(tmp.path())), strict_limits());

    let empty = TranslationPair {
        question: String::new(),
        answer: String::new(),
    };
    let body = ProposeQuestionRequest {
        category: String::new(),
        difficulty: String::new(),
        frequency: String::new(),
        translations: Translations {
            en: empty.clone(),
            fr: empty,
        },
    };

    let req = test::TestRequest::post()
        .uri(PROPOSE_ROUTE)
        .insert_header(("X-Forwarded-For", "203.0.113.4"))
        .set_json(body)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn malformed_json_and_blank_reason_are_bad_requests() {
    let tmp = TempDir::new().unwrap();
    let app = test_app!(AppState::new(&config(tmp.path())), permissive_limits());

    let req = test::TestRequest::post()
        .uri(REPORT_ROUTE)
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{ \"reason\": ")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(REPORT_ROUTE)
        .set_json(json!({ "question": { "category": "web" }, "reason": "   " }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "error": "Invalid payload" }));
}

#[actix_web::test]
async fn second_report_within_window_is_limited() {
    let tmp = TempDir::new().unwrap();
    let state = AppState::new(&config(tmp.path()));
    let app = test_app!(state.clone(), strict_limits());

    let send = || {
        test::TestRequest::post()
            .uri(REPORT_ROUTE)
            .insert_header(("X-Forwarded-For", "198.51.100.9, 10.0.0.1"))
            .set_json(report())
            .to_request()
    };

    assert_eq!(test::call_service(&app, send()).await.status(), StatusCode::CREATED);

    let res = test::call_service(&app, send()).await;
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_header: u64 = res
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap();
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Too many requests");
    assert_eq!(body["retryAfter"], retry_header);
    assert!((1..=60).contains(&retry_header));

    assert_eq!(state.reports.read_all().await.unwrap().len(), 1);

    // Another client, and the same client on another route, are unaffected.
    let req = test::TestRequest::post()
        .uri(REPORT_ROUTE)
        .insert_header(("X-Forwarded-For", "198.51.100.10"))
        .set_json(report())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri(PROPOSE_ROUTE)
        .insert_header(("X-Forwarded-For", "198.51.100.9"))
        .set_json(proposal())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn cooldown_applies_when_limiter_allows() {
    let tmp = TempDir::new().unwrap();
    let state = AppState::new(&config(tmp.path()));
    let app = test_app!(state.clone(), permissive_limits());

    let send = |ip: &str| {
        test::TestRequest::post()
            .uri(PROPOSE_ROUTE)
            .insert_header(("X-Real-IP", ip.to_string()))
            .set_json(proposal())
            .to_request()
    };

    assert_eq!(test::call_service(&app, send("192.0.2.50")).await.status(), StatusCode::CREATED);

    let res = test::call_service(&app, send("192.0.2.50")).await;
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(res.headers().contains_key(header::RETRY_AFTER));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Too many requests");

    assert_eq!(test::call_service(&app, send("192.0.2.51")).await.status(), StatusCode::CREATED);
    assert_eq!(state.proposals.read_all().await.unwrap().len(), 2);

    // The cooldown file outlives the state that wrote it.
    let reopened = AppState::new(&config(tmp.path()));
    assert!(!reopened.propose_cooldown.check("192.0.2.50").await.is_allowed());
}

#[actix_web::test]
async fn simultaneous_proposals_store_one_entry() {
    let tmp = TempDir::new().unwrap();
    let state = AppState::new(&config(tmp.path()));
    let app = test_app!(state.clone(), permissive_limits());

    let requests = (0..6).map(|_| {
        let req = test::TestRequest::post()
            .uri(PROPOSE_ROUTE)
            .insert_header(("X-Forwarded-For", "198.51.100.9"))
            .set_json(proposal())
            .to_request();
        test::call_service(&app, req)
    });
    let statuses: Vec<StatusCode> = futures::future::join_all(requests)
        .await
        .iter()
        .map(|res| res.status())
        .collect();

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let limited = statuses
        .iter()
        .filter(|s| **s == StatusCode::TOO_MANY_REQUESTS)
        .count();
    assert_eq!(created, 1);
    assert_eq!(limited, 5);
    assert_eq!(state.proposals.read_all().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn invalid_proposal_during_cooldown_is_bad_request() {
    let tmp = TempDir::new().unwrap();
    let state = AppState::new(&config(tmp.path()));
    let app = test_app!(state.clone(), permissive_limits());

    let req = test::TestRequest::post()
        .uri(PROPOSE_ROUTE)
        .insert_header(("X-Real-IP", "192.0.2.60"))
        .set_json(proposal())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri(PROPOSE_ROUTE)
        .insert_header(("X-Real-IP", "192.0.2.60"))
        .set_json(json!({ "category": "web" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.proposals.read_all().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn storage_failure_is_opaque_server_error() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("data");
    std::fs::write(&blocker, "not a directory").unwrap();
    let app = test_app!(AppState::new(&config(&blocker)), strict_limits());

    let req = test::TestRequest::post()
        .uri(REPORT_ROUTE)
        .set_json(report())
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "error": "Server error" }));
}

#[actix_web::test]
async fn health_echoes_request_id() {
    let tmp = TempDir::new().unwrap();
    let app = test_app!(AppState::new(&config(tmp.path())), strict_limits());

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "req-123"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get("x-request-id").unwrap(), "req-123");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "ok");
}
