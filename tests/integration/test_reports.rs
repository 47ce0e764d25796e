use super::helpers::{
    FakeReport, MEDIA_BASE_URL, expect_status, get, numbered, post_action, read_json, spawn_app,
};
use axum::http::StatusCode;
use moderation_console::domain::report::entity::MediaType;
use serde_json::{Value, json};

#[tokio::test]
async fn listing_posts_maps_media_state_per_report() {
    let app = spawn_app(vec![
        FakeReport::post("p1"),
        FakeReport::post("p2").with_media_action(4),
        FakeReport::post("p3"),
    ]);

    let res = expect_status(
        get(&app.app, "/api/v1/admin/reports?category=posts&page=1&limit=10").await,
        StatusCode::OK,
    )
    .await;
    let page: Value = read_json(res).await;

    let reports = page["reports"].as_array().expect("reports array");
    assert_eq!(reports.len(), 3);
    let media_states: Vec<&str> = reports
        .iter()
        .map(|r| r["media_status"].as_str().unwrap())
        .collect();
    assert_eq!(media_states, vec!["active", "suspended", "active"]);
    assert!(reports.iter().all(|r| r["status"] == "active"));
    assert_eq!(reports[0]["media"]["kind"], "Post");
    assert_eq!(
        reports[0]["media"]["media_urls"][0],
        format!("{}/uploads/photo.jpg", MEDIA_BASE_URL)
    );
    assert_eq!(page["total_records"], 3);
    assert_eq!(page["current_page"], 1);
}

#[tokio::test]
async fn repeated_listing_is_served_from_cache() {
    let app = spawn_app(vec![FakeReport::post("p1"), FakeReport::comment("c1")]);

    for _ in 0..3 {
        expect_status(
            get(&app.app, "/api/v1/admin/reports?category=posts&page=1&limit=10").await,
            StatusCode::OK,
        )
        .await;
    }
    assert_eq!(app.backend.fetch_count(MediaType::Post, 1), 1);
    assert_eq!(app.backend.fetch_count(MediaType::Comment, 1), 0);

    let res = expect_status(
        get(&app.app, "/api/v1/admin/reports?category=comments&page=1").await,
        StatusCode::OK,
    )
    .await;
    let page: Value = read_json(res).await;
    assert_eq!(page["category"], "comments");
    assert_eq!(page["reports"][0]["media"]["kind"], "Comment");
    assert_eq!(app.backend.fetch_count(MediaType::Comment, 1), 1);
    assert_eq!(app.backend.fetch_count(MediaType::Post, 1), 1);
}

#[tokio::test]
async fn anonymous_comment_report_maps_reporter_sentinel() {
    let app = spawn_app(vec![FakeReport::comment("c1").anonymous()]);

    let res = expect_status(
        get(&app.app, "/api/v1/admin/reports?category=comments").await,
        StatusCode::OK,
    )
    .await;
    let page: Value = read_json(res).await;
    let report = &page["reports"][0];

    assert_eq!(report["reporter_name"], "Anonymous");
    assert_eq!(report["reporter_email"], Value::Null);
    assert_eq!(report["reason_code"], "SPAM");
    assert_eq!(report["status"], "active");
}

#[tokio::test]
async fn delete_refetches_the_current_page_once() {
    let app = spawn_app(numbered("p", 15, FakeReport::post));

    let res = expect_status(
        get(&app.app, "/api/v1/admin/reports?category=posts&page=2").await,
        StatusCode::OK,
    )
    .await;
    let page: Value = read_json(res).await;
    assert_eq!(page["reports"].as_array().unwrap().len(), 5);
    assert_eq!(app.backend.fetch_count(MediaType::Post, 2), 1);

    let res = expect_status(
        post_action(&app.app, "p12", json!({ "action": "delete", "category": "posts" })).await,
        StatusCode::OK,
    )
    .await;
    let outcome: Value = read_json(res).await;
    assert_eq!(outcome["refreshed"], true);
    assert_eq!(app.backend.fetch_count(MediaType::Post, 2), 2);
    assert_eq!(app.backend.fetch_count(MediaType::Post, 1), 0);

    let res = expect_status(
        get(&app.app, "/api/v1/admin/reports?category=posts&page=2").await,
        StatusCode::OK,
    )
    .await;
    let page: Value = read_json(res).await;
    let deleted = page["reports"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == "p12")
        .expect("deleted report still listed");
    assert_eq!(deleted["status"], "deleted");
    assert_eq!(deleted["media_status"], "active");
    assert_eq!(app.backend.fetch_count(MediaType::Post, 2), 2);
}

#[tokio::test]
async fn escalating_twice_escalates_twice() {
    let app = spawn_app(vec![FakeReport::comment("R1")]);
    expect_status(
        get(&app.app, "/api/v1/admin/reports?category=comments").await,
        StatusCode::OK,
    )
    .await;

    for _ in 0..2 {
        expect_status(
            post_action(&app.app, "R1", json!({ "action": "escalate" })).await,
            StatusCode::OK,
        )
        .await;
    }

    assert_eq!(app.backend.fetch_count(MediaType::Comment, 1), 3);
    let page = app.console.catalog().get_page(Default::default()).await;
    assert!(page.reports.is_empty(), "posts tab was never loaded");

    let res = expect_status(
        get(&app.app, "/api/v1/admin/reports?category=comments").await,
        StatusCode::OK,
    )
    .await;
    let page: Value = read_json(res).await;
    assert_eq!(page["reports"][0]["escalation"], 2);
}

#[tokio::test]
async fn suspending_media_twice_stays_suspended() {
    let app = spawn_app(vec![FakeReport::post("p1")]);
    expect_status(
        get(&app.app, "/api/v1/admin/reports?category=posts").await,
        StatusCode::OK,
    )
    .await;

    for _ in 0..2 {
        expect_status(
            post_action(&app.app, "p1", json!({ "action": "suspend_media" })).await,
            StatusCode::OK,
        )
        .await;
        let page: Value = read_json(
            get(&app.app, "/api/v1/admin/reports?category=posts").await,
        )
        .await;
        assert_eq!(page["reports"][0]["media_status"], "suspended");
        assert_eq!(page["reports"][0]["status"], "active");
    }
}

#[tokio::test]
async fn activating_an_active_report_is_a_no_op() {
    let app = spawn_app(vec![FakeReport::post("p1")]);
    expect_status(
        get(&app.app, "/api/v1/admin/reports?category=posts").await,
        StatusCode::OK,
    )
    .await;

    let res = expect_status(
        post_action(&app.app, "p1", json!({ "action": "activate" })).await,
        StatusCode::OK,
    )
    .await;
    let outcome: Value = read_json(res).await;

    assert_eq!(outcome["skipped"], true);
    assert!(app.backend.actions().is_empty());
    assert_eq!(app.backend.report("p1").action_type, 1);
    assert_eq!(app.backend.fetch_count(MediaType::Post, 1), 1);
}

#[tokio::test]
async fn suspend_then_activate_round_trips_through_toggle() {
    let app = spawn_app(vec![FakeReport::post("p1")]);
    expect_status(
        get(&app.app, "/api/v1/admin/reports?category=posts").await,
        StatusCode::OK,
    )
    .await;

    expect_status(
        post_action(&app.app, "p1", json!({ "action": "suspend" })).await,
        StatusCode::OK,
    )
    .await;
    let page: Value = read_json(get(&app.app, "/api/v1/admin/reports?category=posts").await).await;
    assert_eq!(page["reports"][0]["status"], "suspended");

    // a second suspend must not flip it back
    let outcome: Value = read_json(
        post_action(&app.app, "p1", json!({ "action": "suspend" })).await,
    )
    .await;
    assert_eq!(outcome["skipped"], true);

    expect_status(
        post_action(&app.app, "p1", json!({ "action": "activate" })).await,
        StatusCode::OK,
    )
    .await;
    let page: Value = read_json(get(&app.app, "/api/v1/admin/reports?category=posts").await).await;
    assert_eq!(page["reports"][0]["status"], "active");
    assert_eq!(
        app.backend.actions(),
        vec!["suspend-report:p1".to_string(), "suspend-report:p1".to_string()]
    );
}

#[tokio::test]
async fn failed_action_leaves_list_untouched() {
    let app = spawn_app(vec![FakeReport::post("p1")]);
    expect_status(
        get(&app.app, "/api/v1/admin/reports?category=posts").await,
        StatusCode::OK,
    )
    .await;
    app.backend.set_fail_actions(true);

    let res = expect_status(
        post_action(&app.app, "p1", json!({ "action": "delete" })).await,
        StatusCode::SERVICE_UNAVAILABLE,
    )
    .await;
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], "Action failed");
    assert_eq!(app.backend.fetch_count(MediaType::Post, 1), 1);

    let page: Value = read_json(get(&app.app, "/api/v1/admin/reports?category=posts").await).await;
    assert_eq!(page["reports"][0]["status"], "active");
}

#[tokio::test]
async fn unknown_report_surfaces_not_found() {
    let app = spawn_app(vec![FakeReport::post("p1")]);

    let res = expect_status(
        post_action(&app.app, "missing", json!({ "action": "escalate" })).await,
        StatusCode::NOT_FOUND,
    )
    .await;
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], "Report not found");
}

#[tokio::test]
async fn fetch_failure_keeps_previous_page_and_allows_retry() {
    let app = spawn_app(numbered("c", 12, FakeReport::comment));
    expect_status(
        get(&app.app, "/api/v1/admin/reports?category=comments&page=2").await,
        StatusCode::OK,
    )
    .await;

    app.backend.set_fail_fetches(true);
    expect_status(
        get(&app.app, "/api/v1/admin/reports?category=comments&page=1").await,
        StatusCode::SERVICE_UNAVAILABLE,
    )
    .await;

    let catalog = app.console.catalog();
    let comments = moderation_console::domain::report::category::ReportCategory::Comments;
    assert!(!catalog.is_fetched(comments, 1).await);
    let cached = catalog.get_page(comments).await;
    assert_eq!(cached.reports.len(), 2, "page 2 stays visible");
    assert!(cached.last_error.is_some());

    app.backend.set_fail_fetches(false);
    let res = expect_status(
        get(&app.app, "/api/v1/admin/reports?category=comments&page=1").await,
        StatusCode::OK,
    )
    .await;
    let page: Value = read_json(res).await;
    assert_eq!(page["reports"].as_array().unwrap().len(), 10);
    assert_eq!(page["last_error"], Value::Null);
    assert_eq!(app.backend.fetch_count(MediaType::Comment, 1), 2);
}

#[tokio::test]
async fn invalid_paging_and_actions_are_rejected() {
    let app = spawn_app(vec![]);

    expect_status(
        get(&app.app, "/api/v1/admin/reports?category=posts&limit=0").await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    expect_status(
        get(&app.app, "/api/v1/admin/reports?category=posts&limit=101").await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    expect_status(
        get(&app.app, "/api/v1/admin/reports?category=posts&page=0").await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    expect_status(
        get(&app.app, "/api/v1/admin/reports?category=users").await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    expect_status(
        post_action(&app.app, "p1", json!({ "action": "ban" })).await,
        StatusCode::UNPROCESSABLE_ENTITY,
    )
    .await;
    assert_eq!(app.backend.total_fetches(), 0);
}

#[tokio::test]
async fn leaving_the_view_discards_the_cache() {
    let app = spawn_app(vec![FakeReport::post("p1")]);
    expect_status(
        get(&app.app, "/api/v1/admin/reports?category=posts").await,
        StatusCode::OK,
    )
    .await;

    let req = axum::http::Request::builder()
        .method("DELETE")
        .uri("/api/v1/admin/reports/cache")
        .body(axum::body::Body::empty())
        .expect("failed to build reset request");
    expect_status(super::helpers::send(&app.app, req).await, StatusCode::NO_CONTENT).await;

    expect_status(
        get(&app.app, "/api/v1/admin/reports?category=posts").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(app.backend.fetch_count(MediaType::Post, 1), 2);
}
