mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{build_app, build_app_with_probe, read_json};
use serde_json::{json, Value};
use service::probe::mock::MockProbe;
use service::probe::ProbeError;

fn tracker_body(name: &str) -> Value {
    json!({
        "name": name,
        "cronExpr": "0 */6 * * *",
        "compareMode": "innerText",
        "websiteUrl": "https://example.com/pricing",
        "selector": "#price"
    })
}

#[tokio::test]
async fn create_and_get_roundtrip() {
    let app = build_app();
    let token = app.signup("owner@example.com").await;

    let resp = app.post_json("/trackers", Some(&token), &tracker_body("Pricing")).await;
    assert_eq!(resp.status(), 200);
    let created = read_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "Pricing");
    assert_eq!(created["cronExpr"], "0 */6 * * *");
    assert_eq!(created["compareMode"], "innerText");
    assert_eq!(created["websiteUrl"], "https://example.com/pricing");
    assert_eq!(created["selector"], "#price");
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());
    assert!(created.get("userId").is_some());

    let resp = app.get(&format!("/trackers/{id}"), Some(&token)).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(read_json(resp).await, created);
}

#[tokio::test]
async fn list_returns_only_the_callers_trackers() {
    let app = build_app();
    let alice = app.signup("alice@example.com").await;
    let bob = app.signup("bob@example.com").await;

    for name in ["One", "Two"] {
        let resp = app.post_json("/trackers", Some(&alice), &tracker_body(name)).await;
        assert_eq!(resp.status(), 200);
    }
    let resp = app.post_json("/trackers", Some(&bob), &tracker_body("Theirs")).await;
    assert_eq!(resp.status(), 200);

    let resp = app.get("/trackers", Some(&alice)).await;
    assert_eq!(resp.status(), 200);
    let rows = read_json(resp).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["name"] != "Theirs"));
}

#[tokio::test]
async fn foreign_trackers_are_indistinguishable_from_absent() {
    let app = build_app();
    let alice = app.signup("alice@example.com").await;
    let bob = app.signup("bob@example.com").await;

    let resp = app.post_json("/trackers", Some(&alice), &tracker_body("Mine")).await;
    let id = read_json(resp).await["id"].as_str().unwrap().to_string();

    let get = app.get(&format!("/trackers/{id}"), Some(&bob)).await;
    let put = app
        .put_json(&format!("/trackers/{id}"), Some(&bob), &tracker_body("Stolen"))
        .await;
    let del = app.delete(&format!("/trackers/{id}"), Some(&bob)).await;
    for resp in [get, put, del] {
        assert_eq!(resp.status(), 404);
    }

    // The failed attempts left the row untouched.
    let resp = app.get(&format!("/trackers/{id}"), Some(&alice)).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(read_json(resp).await["name"], "Mine");
}

#[tokio::test]
async fn update_replaces_every_field_and_bumps_updated_at() {
    let app = build_app();
    let token = app.signup("owner@example.com").await;

    let resp = app.post_json("/trackers", Some(&token), &tracker_body("Before")).await;
    let created = read_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();

    tokio::time::sleep(Duration::from_millis(5)).await;
    let replacement = json!({
        "name": "After",
        "cronExpr": "30 8 * * 1",
        "compareMode": "innerHtml",
        "websiteUrl": "https://example.org/changelog",
        "selector": ".entry"
    });
    let resp = app.put_json(&format!("/trackers/{id}"), Some(&token), &replacement).await;
    assert_eq!(resp.status(), 200);
    let updated = read_json(resp).await;
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "After");
    assert_eq!(updated["cronExpr"], "30 8 * * 1");
    assert_eq!(updated["compareMode"], "innerHtml");
    assert_eq!(updated["websiteUrl"], "https://example.org/changelog");
    assert_eq!(updated["selector"], ".entry");
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert!(updated["updatedAt"].as_str().unwrap() > created["updatedAt"].as_str().unwrap());
}

#[tokio::test]
async fn delete_then_delete_again_is_not_found() {
    let app = build_app();
    let token = app.signup("owner@example.com").await;

    let resp = app.post_json("/trackers", Some(&token), &tracker_body("Short-lived")).await;
    let id = read_json(resp).await["id"].as_str().unwrap().to_string();

    let resp = app.delete(&format!("/trackers/{id}"), Some(&token)).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(read_json(resp).await["message"], "Tracker deleted successfully");

    let resp = app.delete(&format!("/trackers/{id}"), Some(&token)).await;
    assert_eq!(resp.status(), 404);

    let resp = app.get(&format!("/trackers/{id}"), Some(&token)).await;
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_endpoint_returns_extracted_content() {
    let probe = Arc::new(MockProbe::returning(|d| {
        Ok(match d.compare_mode {
            models::tracker::CompareMode::InnerText => "Hi".to_string(),
            models::tracker::CompareMode::InnerHtml => "<b>Hi</b>".to_string(),
        })
    }));
    let app = build_app_with_probe(probe);
    let token = app.signup("probe@example.com").await;

    let resp = app
        .post_json(
            "/trackers/test",
            Some(&token),
            &json!({"websiteUrl": "https://example.com", "selector": "#x", "compareMode": "innerText"}),
        )
        .await;
    assert_eq!(resp.status(), 200);
    assert_eq!(read_json(resp).await["result"], "Hi");

    let resp = app
        .post_json(
            "/trackers/test",
            Some(&token),
            &json!({"websiteUrl": "https://example.com", "selector": "#x", "compareMode": "innerHtml"}),
        )
        .await;
    assert_eq!(resp.status(), 200);
    assert_eq!(read_json(resp).await["result"], "<b>Hi</b>");
}

#[tokio::test]
async fn probe_failures_map_to_distinct_statuses() {
    let probe = Arc::new(MockProbe::returning(|d| match d.selector.as_str() {
        "#missing" => Err(ProbeError::SelectorNotFound(d.selector.clone())),
        _ => Err(ProbeError::Navigation("net::ERR_NAME_NOT_RESOLVED".into())),
    }));
    let app = build_app_with_probe(probe);
    let token = app.signup("probe@example.com").await;

    let resp = app
        .post_json(
            "/trackers/test",
            Some(&token),
            &json!({"websiteUrl": "https://no-such-host.invalid", "selector": "#x", "compareMode": "innerText"}),
        )
        .await;
    assert_eq!(resp.status(), 502);

    let resp = app
        .post_json(
            "/trackers/test",
            Some(&token),
            &json!({"websiteUrl": "https://example.com", "selector": "#missing", "compareMode": "innerText"}),
        )
        .await;
    assert_eq!(resp.status(), 422);

    // Either way the gate got its slots back.
    assert_eq!(app.gate.available_permits(), app.gate.capacity());
}

#[tokio::test]
async fn test_endpoint_requires_a_session() {
    let app = build_app();
    let resp = app
        .post_json(
            "/trackers/test",
            None,
            &json!({"websiteUrl": "https://example.com", "selector": "#x", "compareMode": "innerText"}),
        )
        .await;
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn invalid_website_url_is_itemized() {
    let app = build_app();
    let token = app.signup("owner@example.com").await;

    let mut body = tracker_body("Bad URL");
    body["websiteUrl"] = json!("ftp://example.com/feed");
    let resp = app.post_json("/trackers", Some(&token), &body).await;
    assert_eq!(resp.status(), 400);
    let body = read_json(resp).await;
    let violations = body["error"].as_array().unwrap();
    assert!(violations.iter().any(|v| v["field"] == "websiteUrl"));
}

#[tokio::test]
async fn unknown_compare_mode_is_rejected_at_the_edge() {
    let app = build_app();
    let token = app.signup("owner@example.com").await;

    let mut body = tracker_body("Bad mode");
    body["compareMode"] = json!("outerHtml");
    let resp = app.post_json("/trackers", Some(&token), &body).await;
    assert!(resp.status().is_client_error(), "got {}", resp.status());
}
