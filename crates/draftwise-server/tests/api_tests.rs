//! Integration tests for the draftwise-server API routes.

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use draftwise_core::advisor::Advisor;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use draftwise_server::state::AppState;

/// Write a small but complete knowledge base into `dir`.
fn write_fixture(dir: &Path) {
    let pool = json!({
        "version": "1.0",
        "source": "liquipedia",
        "roles": ["exp_lane", "jungle", "mid_lane", "gold_lane", "roam"],
        "heroes": {
            "ling": {"possibleRoles": ["jungle"], "rolePower": {"jungle": 0.95}},
            "fanny": {"possibleRoles": ["jungle"], "rolePower": {"jungle": 0.90}},
            "lancelot": {"possibleRoles": ["jungle", "mid_lane"],
                         "rolePower": {"jungle": 0.88, "mid_lane": 0.80}},
            "chou": {"possibleRoles": ["exp_lane"], "rolePower": {"exp_lane": 0.85}},
            "khufra": {"possibleRoles": ["roam"], "rolePower": {"roam": 0.80}},
            "novaria": {"possibleRoles": ["mid_lane"], "rolePower": {"mid_lane": 0.80}},
            "karrie": {"possibleRoles": ["gold_lane"], "rolePower": {"gold_lane": 0.85}}
        }
    });
    let tier = json!({"roles": {
        "jungle": {"heroDetails": [
            {"hero": "ling", "tier": "SS",
             "stats": {"pickWinCount": 9, "pickCount": 15, "banCount": 11, "winRate": 0.6}},
            {"hero": "fanny", "tier": "S",
             "stats": {"pickWinCount": 7, "pickCount": 12, "banCount": 9, "winRate": 0.58}}
        ]},
        "exp_lane": {"heroDetails": [
            {"hero": "chou", "tier": "A",
             "stats": {"pickWinCount": 5, "pickCount": 10, "banCount": 2, "winRate": 0.5}}
        ]},
        "gold_lane": {"heroDetails": [
            {"hero": "karrie", "tier": "S",
             "stats": {"pickWinCount": 6, "pickCount": 9, "banCount": 3, "winRate": 0.67}}
        ]}
    }});
    std::fs::write(dir.join("hero_role_pool.json"), pool.to_string()).expect("write pool");
    std::fs::write(dir.join("hero_tier_list.json"), tier.to_string()).expect("write tier");
}

/// Create the test router backed by a tempdir knowledge base.
fn test_router() -> (tempfile::TempDir, axum::Router) {
    let dir = tempfile::tempdir().expect("tempdir");
    write_fixture(dir.path());
    let state = Arc::new(AppState {
        advisor: Advisor::new(dir.path()),
    });
    (dir, draftwise_server::build_router(state))
}

/// Helper: send a GET request and parse JSON from the response.
async fn get_json(router: axum::Router, path: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("build request");

    let response = router.oneshot(req).await.expect("send request");
    let status = response.status();
    let body = response.into_body().collect().await.expect("read body");
    let json: serde_json::Value = serde_json::from_slice(&body.to_bytes()).expect("parse JSON");

    (status, json)
}

/// Helper: send a POST request with a JSON body.
async fn post_json(
    router: axum::Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .expect("build request");

    let response = router.oneshot(req).await.expect("send request");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("read body");
    let json: serde_json::Value = serde_json::from_slice(&bytes.to_bytes()).expect("parse JSON");

    (status, json)
}

// ============================================================
// Health
// ============================================================

#[tokio::test]
async fn health_returns_ok() {
    let (_dir, router) = test_router();
    let (status, body) = get_json(router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

// ============================================================
// Meta
// ============================================================

#[tokio::test]
async fn meta_reports_sequence_and_pool() {
    let (_dir, router) = test_router();
    let (status, body) = get_json(router, "/draft/meta").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["engine"], "draftwise");
    assert_eq!(body["sequence"]["steps"].as_array().unwrap().len(), 15);
    assert_eq!(body["rolePool"]["heroesCount"], 7);
    assert_eq!(body["rolePool"]["roles"].as_array().unwrap().len(), 5);
    assert!(body["scoring"]["phaseWeights"]["early"]["meta"].is_number());
}

#[tokio::test]
async fn meta_without_knowledge_base_is_500() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = Arc::new(AppState {
        advisor: Advisor::new(dir.path()),
    });
    let router = draftwise_server::build_router(state);
    let (status, body) = get_json(router, "/draft/meta").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("hero_role_pool.json"));
}

// ============================================================
// Assign
// ============================================================

#[tokio::test]
async fn assign_returns_assignment_block() {
    let (_dir, router) = test_router();
    let (status, body) = post_json(
        router,
        "/draft/assign",
        json!({"heroes": ["Ling", "Chou", "Khufra"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assignment"]["isFeasible"], true);
    assert_eq!(body["assignment"]["heroToRole"]["ling"], "jungle");
    assert_eq!(body["assignment"]["openRoles"], json!(["mid_lane", "gold_lane"]));
    assert!(body.get("debug").is_none());
}

#[tokio::test]
async fn assign_with_debug_echoes_profiles() {
    let (_dir, router) = test_router();
    let (status, body) = post_json(
        router,
        "/draft/assign?debug=true",
        json!({"heroes": ["ling"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["debug"]["heroProfiles"]["ling"]["possibleRoles"], json!(["jungle"]));
}

#[tokio::test]
async fn assign_with_too_many_heroes_is_400() {
    let (_dir, router) = test_router();
    let (status, body) = post_json(
        router,
        "/draft/assign",
        json!({"heroes": ["a", "b", "c", "d", "e", "f"]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("cannot exceed 5"));
}

// ============================================================
// Recommend
// ============================================================

#[tokio::test]
async fn recommend_empty_state_is_first_ally_ban() {
    let (_dir, router) = test_router();
    let (status, body) = post_json(router, "/draft/recommend", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "ban");
    assert_eq!(body["side"], "ally");
    assert_eq!(body["turn"]["index"], 0);
    assert_eq!(body["turn"]["limit"], 2);
    let recs = body["recommendations"].as_array().unwrap();
    assert!(!recs.is_empty() && recs.len() <= 12);
    for rec in recs {
        assert!(rec["tierScore"].as_f64().unwrap() >= 45.0);
        assert!(rec["components"]["meta"].is_number());
    }
}

#[tokio::test]
async fn recommend_overlapping_state_is_400() {
    let (_dir, router) = test_router();
    let (status, body) = post_json(
        router,
        "/draft/recommend",
        json!({"picks": {"ally": ["ling"]}, "bans": {"enemy": ["ling"]}}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("picked and banned"));
}

#[tokio::test]
async fn recommend_complete_sequence_returns_message() {
    let (_dir, router) = test_router();
    let (status, body) = post_json(
        router,
        "/draft/recommend",
        json!({"turnIndex": 15}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], serde_json::Value::Null);
    assert_eq!(body["message"], "Draft sequence complete");
    assert!(body["recommendations"].as_array().unwrap().is_empty());
    assert_eq!(body["composition"]["ally"]["isFeasible"], true);
}

#[tokio::test]
async fn recommend_with_debug_includes_raw_ranking() {
    let (_dir, router) = test_router();
    let (status, body) = post_json(
        router,
        "/draft/recommend?debug=true",
        json!({"picks": {"ally": ["chou"]}, "turnIndex": 6}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "pick");
    assert!(body["debug"]["topCandidatesRaw"].is_array());
    assert_eq!(body["debug"]["normalizedState"]["picks"]["ally"], json!(["chou"]));
    let recs = body["recommendations"].as_array().unwrap();
    assert!(recs.iter().all(|r| r["debug"]["baseScore"].is_number()));
}

#[tokio::test]
async fn recommend_unknown_hero_warns_but_succeeds() {
    let (_dir, router) = test_router();
    let (status, body) = post_json(
        router,
        "/draft/recommend",
        json!({"bans": {"ally": ["zetian"]}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let warnings = body["warnings"].as_array().unwrap();
    assert!(warnings
        .iter()
        .any(|w| w.as_str().unwrap().contains("zetian")));
}
