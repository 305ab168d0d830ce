//! Broker traffic driven by comment mutations.
//!
//! The test app records publishes in memory, so every assertion here reads
//! the exact payloads a broker consumer would receive.

use actix_web::http::StatusCode;
use actix_web::test;
use backend::events::channels;
use backend_test_support::unique_helpers::unique_email;
use serde_json::{json, Value};

use crate::support::auth_helper::{authenticate, bearer, register_and_login};
use crate::support::factory::{seed_comment, seed_user};
use crate::support::spawn_app;

fn parse_all(payloads: Vec<String>) -> Vec<Value> {
    payloads
        .iter()
        .map(|p| serde_json::from_str(p).expect("event payloads should be JSON"))
        .collect()
}

#[actix_web::test]
async fn test_create_publishes_notification_and_count() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let jwt = register_and_login(&app.service, &unique_email("events-create")).await;

    let req = bearer(test::TestRequest::post().uri("/api/comments"), &jwt)
        .set_json(json!({"postId": 501, "body": "hello broker"}))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;

    let notifications = parse_all(app.events.published_on(channels::NOTIFICATION_COMMENT));
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["type"], "comment_created");
    assert_eq!(notifications[0]["comment_id"], created["id"]);
    assert_eq!(notifications[0]["post_id"], 501);
    assert_eq!(notifications[0]["preview"], "hello broker");

    let counts = parse_all(app.events.published_on(channels::COMMENT_COUNT));
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0]["type"], "comment_count_changed");
    assert_eq!(counts[0]["post_id"], 501);
    assert_eq!(counts[0]["comment_count"], 1);

    // One comment is no milestone.
    assert!(app.events.published_on(channels::NOTIFICATION_MILESTONE).is_empty());
    assert!(app.events.published_on(channels::FORUM_ID_REQUEST).is_empty());

    Ok(())
}

#[actix_web::test]
async fn test_tenth_comment_reaches_a_milestone() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let email = unique_email("events-milestone");

    let db = app.state.db.as_ref().expect("test app has a database");
    let user = seed_user(db, &email).await?;
    // Nine seeded directly, so the HTTP create below lands on exactly ten.
    for i in 0..9 {
        seed_comment(db, 502, user.id, &format!("warmup {i}")).await?;
    }

    let jwt = authenticate(&app.service, &email).await;
    let req = bearer(test::TestRequest::post().uri("/api/comments"), &jwt)
        .set_json(json!({"postId": 502, "body": "the tenth"}))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let milestones = parse_all(app.events.published_on(channels::NOTIFICATION_MILESTONE));
    assert_eq!(milestones.len(), 1);
    assert_eq!(milestones[0]["type"], "milestone_reached");
    assert_eq!(milestones[0]["post_id"], 502);
    assert_eq!(milestones[0]["comment_count"], 10);
    assert_eq!(milestones[0]["milestone"], 10);

    let forum_requests = parse_all(app.events.published_on(channels::FORUM_ID_REQUEST));
    assert_eq!(forum_requests.len(), 1);
    assert_eq!(forum_requests[0]["type"], "forum_id_requested");
    assert_eq!(forum_requests[0]["post_id"], 502);

    Ok(())
}

#[actix_web::test]
async fn test_counts_between_milestones_stay_quiet() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let email = unique_email("events-eleven");

    let db = app.state.db.as_ref().expect("test app has a database");
    let user = seed_user(db, &email).await?;
    for i in 0..10 {
        seed_comment(db, 503, user.id, &format!("filler {i}")).await?;
    }

    let jwt = authenticate(&app.service, &email).await;
    let req = bearer(test::TestRequest::post().uri("/api/comments"), &jwt)
        .set_json(json!({"postId": 503, "body": "the eleventh"}))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let counts = parse_all(app.events.published_on(channels::COMMENT_COUNT));
    assert_eq!(counts.last().map(|c| c["comment_count"].clone()), Some(json!(11)));
    assert!(
        app.events.published_on(channels::NOTIFICATION_MILESTONE).is_empty(),
        "eleven is not a milestone"
    );

    Ok(())
}

#[actix_web::test]
async fn test_delete_requests_attachment_cleanup() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let jwt = register_and_login(&app.service, &unique_email("events-delete")).await;

    let req = bearer(test::TestRequest::post().uri("/api/comments"), &jwt)
        .set_json(json!({
            "postId": 504,
            "body": "with files",
            "attachmentFileIds": [101, 102],
        }))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().expect("id should be numeric");

    app.events.clear();

    let req = bearer(test::TestRequest::delete().uri(&format!("/api/comments/{id}")), &jwt)
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let file_deletes = parse_all(app.events.published_on(channels::FILE_DELETE));
    assert_eq!(file_deletes.len(), 2);
    let mut file_ids: Vec<i64> = file_deletes
        .iter()
        .map(|e| {
            assert_eq!(e["type"], "file_delete_requested");
            assert_eq!(e["comment_id"], created["id"]);
            e["file_id"].as_i64().expect("file_id should be numeric")
        })
        .collect();
    file_ids.sort_unstable();
    assert_eq!(file_ids, vec![101, 102]);

    let deletions = parse_all(app.events.published_on(channels::COMMENT_DELETED));
    assert_eq!(deletions.len(), 1);
    assert_eq!(deletions[0]["type"], "comment_deleted");
    assert_eq!(deletions[0]["comment_id"], created["id"]);
    assert_eq!(deletions[0]["post_id"], 504);

    let counts = parse_all(app.events.published_on(channels::COMMENT_COUNT));
    assert_eq!(counts.len(), 1, "only the delete publishes after clear()");
    assert_eq!(counts[0]["comment_count"], 0);

    Ok(())
}

#[actix_web::test]
async fn test_notification_preview_is_truncated() -> Result<(), Box<dyn std::error::Error>> {
    let app = spawn_app().await?;
    let jwt = register_and_login(&app.service, &unique_email("events-preview")).await;

    let long_body = "y".repeat(120);
    let req = bearer(test::TestRequest::post().uri("/api/comments"), &jwt)
        .set_json(json!({"postId": 505, "body": long_body}))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let notifications = parse_all(app.events.published_on(channels::NOTIFICATION_COMMENT));
    let preview = notifications[0]["preview"]
        .as_str()
        .expect("preview should be a string");
    assert_eq!(preview.chars().count(), 80);
    assert_eq!(preview, "y".repeat(80));

    Ok(())
}
