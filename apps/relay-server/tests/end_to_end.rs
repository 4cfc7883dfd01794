mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::*;
use mock_slack::{MockSlack, PostedMessage};
use relay_core::SlackSender;
use relay_server::build_router;
use tower::ServiceExt;

async fn relay_against(mock: &MockSlack) -> axum::Router {
    let api_base = mock.spawn().await.expect("spawn mock slack");
    let sender = SlackSender::with_timeout("xoxb-e2e", Some(api_base), Duration::from_secs(5))
        .expect("client");
    build_router(state_with(Arc::new(sender)))
}

/// Join sends happen after the ack, so poll until they land.
async fn wait_for_posts(mock: &MockSlack, count: usize) -> Vec<PostedMessage> {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let posted = mock.posted().await;
            if posted.len() >= count {
                return posted;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("mock slack did not receive the join posts")
}

#[tokio::test]
async fn join_reaches_slack_api_twice() {
    let mock = MockSlack::new();
    let app = relay_against(&mock).await;

    let response = app
        .oneshot(signed_event(&team_join("UE2E"), now()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let posted = wait_for_posts(&mock, 2).await;
    assert_eq!(posted.len(), 2);
    assert!(posted.iter().all(|p| p.token == "xoxb-e2e"));
    assert_eq!(posted[0].channel(), Some("UE2E"));
    assert_eq!(posted[1].channel(), Some(WELCOME_CHANNEL));
}

#[tokio::test]
async fn slack_rejection_surfaces_as_500() {
    let mock = MockSlack::new();
    mock.fail_channel("CMISSING").await;
    let app = relay_against(&mock).await;

    let response = app
        .oneshot(json_post(
            "/api/send-channel-message",
            r#"{"userId":"U1","channelId":"CMISSING"}"#,
        ))
        .await
        .unwrap();
    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Slack channel message failed: channel_not_found"
    );
}

#[tokio::test]
async fn video_blocks_reach_slack_api() {
    let mock = MockSlack::new();
    let app = relay_against(&mock).await;

    let response = app
        .oneshot(json_post("/api/send-video", "{}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let posted = mock.posted().await;
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].channel(), Some(VIDEO_CHANNEL));
    assert_eq!(posted[0].payload["blocks"].as_array().map(Vec::len), Some(4));
}
