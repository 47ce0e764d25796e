use super::helpers::{FakeReport, expect_status, get, numbered, read_json, spawn_app};
use axum::http::StatusCode;
use futures_util::future::join;
use moderation_console::domain::report::{category::ReportCategory, entity::MediaType};
use serde_json::Value;
use std::time::Duration;

#[tokio::test]
async fn concurrent_requests_for_one_page_issue_a_single_fetch() {
    let app = spawn_app(vec![FakeReport::post("p1"), FakeReport::post("p2")]);
    app.backend.set_fetch_delay(Duration::from_millis(50));

    let (first, second) = join(
        get(&app.app, "/api/v1/admin/reports?category=posts&page=1"),
        get(&app.app, "/api/v1/admin/reports?category=posts&page=1"),
    )
    .await;
    let first: Value = read_json(expect_status(first, StatusCode::OK).await).await;
    let second: Value = read_json(expect_status(second, StatusCode::OK).await).await;

    // the second caller waits for the shared fetch instead of getting a loading page
    for page in [&first, &second] {
        assert_eq!(page["current_page"], 1);
        assert_eq!(page["reports"].as_array().unwrap().len(), 2);
        assert_eq!(page["loading"], false);
    }
    assert_eq!(app.backend.fetch_count(MediaType::Post, 1), 1);
    let page = app.console.catalog().get_page(ReportCategory::Posts).await;
    assert_eq!(page.reports.len(), 2);
    assert!(!page.loading);
}

#[tokio::test]
async fn slow_page_does_not_overwrite_the_newer_selection() {
    let app = spawn_app(numbered("p", 15, FakeReport::post));
    app.backend.set_fetch_delay(Duration::from_millis(20));

    // page 1 completes after page 2 was selected
    let (first, second) = join(
        get(&app.app, "/api/v1/admin/reports?category=posts&page=1"),
        async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            get(&app.app, "/api/v1/admin/reports?category=posts&page=2").await
        },
    )
    .await;
    let first: Value = read_json(expect_status(first, StatusCode::OK).await).await;
    let second: Value = read_json(expect_status(second, StatusCode::OK).await).await;

    assert_eq!(first["current_page"], 1);
    assert_eq!(first["reports"].as_array().unwrap().len(), 10);
    assert_eq!(first["reports"][0]["id"], "p1");
    assert_eq!(second["current_page"], 2);
    assert_eq!(second["reports"][0]["id"], "p11");

    let page = app.console.catalog().get_page(ReportCategory::Posts).await;
    assert_eq!(page.current_page, 2);
    assert_eq!(page.reports.len(), 5);

    // page 1 was kept, so selecting it again is a cache hit
    let res = expect_status(
        get(&app.app, "/api/v1/admin/reports?category=posts&page=1").await,
        StatusCode::OK,
    )
    .await;
    let page: Value = read_json(res).await;
    assert_eq!(page["current_page"], 1);
    assert_eq!(page["reports"].as_array().unwrap().len(), 10);
    assert_eq!(app.backend.fetch_count(MediaType::Post, 1), 1);
}

#[tokio::test]
async fn categories_are_cached_independently() {
    let app = spawn_app(vec![FakeReport::post("p1"), FakeReport::comment("c1")]);
    app.backend.set_fetch_delay(Duration::from_millis(10));

    let (posts, comments) = join(
        get(&app.app, "/api/v1/admin/reports?category=posts"),
        get(&app.app, "/api/v1/admin/reports?category=comments"),
    )
    .await;
    let posts: Value = read_json(expect_status(posts, StatusCode::OK).await).await;
    let comments: Value = read_json(expect_status(comments, StatusCode::OK).await).await;

    assert_eq!(posts["reports"][0]["id"], "p1");
    assert_eq!(comments["reports"][0]["id"], "c1");
    assert_eq!(app.backend.total_fetches(), 2);
}

#[tokio::test]
async fn waiter_on_a_failing_fetch_gets_the_error() {
    let app = spawn_app(vec![FakeReport::comment("c1")]);
    app.backend.set_fetch_delay(Duration::from_millis(30));
    app.backend.set_fail_fetches(true);

    let (first, second) = join(
        get(&app.app, "/api/v1/admin/reports?category=comments"),
        get(&app.app, "/api/v1/admin/reports?category=comments"),
    )
    .await;
    expect_status(first, StatusCode::SERVICE_UNAVAILABLE).await;
    expect_status(second, StatusCode::SERVICE_UNAVAILABLE).await;
    assert_eq!(app.backend.fetch_count(MediaType::Comment, 1), 1);
}
