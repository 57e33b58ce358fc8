use axum::http::StatusCode;
use serde_json::{Value, json};

use instagram_graph::{
    COMMENT_FIELDS, GraphApi, InstagramError, InstagramGraphClient, MEDIA_FIELDS, PROFILE_FIELDS,
    REPLY_FIELDS,
};
use std::sync::Arc;

use crate::common::{closed_port_url, spawn_mock_graph};

#[tokio::test]
async fn test_profile_request_shape() {
    let mock = spawn_mock_graph().await;
    mock.respond(
        "/me",
        StatusCode::OK,
        r#"{"id":"1784","username":"jane","account_type":"BUSINESS","media_count":12}"#,
    );

    let profile = mock.service().get_profile("user-token").await.unwrap();

    assert_eq!(profile.username.as_deref(), Some("jane"));
    assert_eq!(profile.media_count, Some(12));
    assert!(profile.profile_picture_url.is_none());

    let request = &mock.requests_to("/me")[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.query["fields"], PROFILE_FIELDS);
    assert_eq!(request.query["access_token"], "user-token");
}

#[tokio::test]
async fn test_media_request_shape_and_paging_passthrough() {
    let mock = spawn_mock_graph().await;
    mock.respond(
        "/me/media",
        StatusCode::OK,
        r#"{"data":[{"id":"m1","media_type":"IMAGE","media_url":"https://cdn.example.com/m1.jpg","permalink":"https://www.instagram.com/p/abc/","timestamp":"2024-05-01T10:00:00+0000"}],"paging":{"cursors":{"before":"QVFI","after":"QVFJ"}}}"#,
    );

    let media = mock.service().get_media("user-token").await.unwrap();

    assert_eq!(media.data.len(), 1);
    assert_eq!(media.data[0].media_type.as_deref(), Some("IMAGE"));
    assert_eq!(
        media.paging,
        Some(json!({"cursors": {"before": "QVFI", "after": "QVFJ"}}))
    );
    assert_eq!(mock.requests_to("/me/media")[0].query["fields"], MEDIA_FIELDS);
}

#[tokio::test]
async fn test_profile_error_uses_graph_message() {
    let mock = spawn_mock_graph().await;
    mock.respond(
        "/me",
        StatusCode::BAD_REQUEST,
        r#"{"error":{"message":"Invalid OAuth access token - Cannot parse access token","type":"OAuthException","code":190}}"#,
    );

    let err = mock.service().get_profile("bad").await.unwrap_err();

    assert_eq!(
        err,
        InstagramError::Api {
            status: Some(400),
            message: "Invalid OAuth access token - Cannot parse access token".to_string()
        }
    );
}

#[tokio::test]
async fn test_fetch_comments_empty_body_becomes_empty_page() {
    let mock = spawn_mock_graph().await;
    mock.respond("/m1/comments", StatusCode::OK, "");
    let client = InstagramGraphClient::new(Arc::new(mock.config())).unwrap();

    let page = client.fetch_comments("m1", "token").await.unwrap();

    assert!(page.data.is_empty());
    assert!(page.paging.is_none());
    let request = &mock.requests_to("/m1/comments")[0];
    assert_eq!(request.query["fields"], COMMENT_FIELDS);
}

/// Comments come back in upstream order, each with a `replies` array added,
/// and a failing reply fetch empties only that comment's replies.
#[tokio::test]
async fn test_comments_with_replies_end_to_end() {
    let mock = spawn_mock_graph().await;
    mock.respond(
        "/m1/comments",
        StatusCode::OK,
        r#"{"data":[{"id":"a","text":"first","username":"ann","timestamp":"2024-05-01T10:00:00+0000","like_count":2},{"id":"b","text":"second","username":"bob","timestamp":"2024-05-01T11:00:00+0000","like_count":0}],"paging":{"cursors":{"after":"QVFJ"},"next":"https://graph.instagram.com/m1/comments?after=QVFJ"}}"#,
    );
    mock.respond(
        "/a/replies",
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error":{"message":"An unknown error has occurred."}}"#,
    );
    mock.respond(
        "/b/replies",
        StatusCode::OK,
        r#"{"data":[{"id":"b1","text":"reply","username":"carl","timestamp":"2024-05-01T12:00:00+0000","parent_id":"b"}]}"#,
    );

    let page = mock
        .service()
        .get_comments_with_replies("m1", "token")
        .await
        .unwrap();
    let value = serde_json::to_value(&page).unwrap();

    assert_eq!(value["data"][0]["id"], "a");
    assert_eq!(value["data"][0]["replies"], json!([]));
    assert_eq!(value["data"][0]["like_count"], 2);
    assert_eq!(value["data"][1]["id"], "b");
    assert_eq!(value["data"][1]["replies"][0]["id"], "b1");
    assert_eq!(value["data"][1]["replies"][0]["parent_id"], "b");
    assert!(value["data"][1]["replies"][0].get("replies").is_none());
    assert_eq!(
        value["paging"]["next"],
        "https://graph.instagram.com/m1/comments?after=QVFJ"
    );

    let data = value["data"].as_array().unwrap();
    let keys: Vec<&str> = data[1].as_object().unwrap().keys().map(String::as_str).collect();
    for key in ["id", "text", "username", "timestamp", "like_count", "replies"] {
        assert!(keys.contains(&key), "missing {key} in {keys:?}");
    }

    let reply_request = &mock.requests_to("/b/replies")[0];
    assert_eq!(reply_request.query["fields"], REPLY_FIELDS);
    assert_eq!(reply_request.query["access_token"], "token");
}

#[tokio::test]
async fn test_comments_without_paging_serialize_null_paging() {
    let mock = spawn_mock_graph().await;
    mock.respond("/m2/comments", StatusCode::OK, r#"{"data":[]}"#);

    let page = mock
        .service()
        .get_comments_with_replies("m2", "token")
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&page).unwrap(),
        json!({"data": [], "paging": null})
    );
}

#[tokio::test]
async fn test_create_comment_posts_json_message() {
    let mock = spawn_mock_graph().await;
    mock.respond("/m1/comments", StatusCode::OK, r#"{"id":"17900000000000001"}"#);

    let created = mock
        .service()
        .create_comment("m1", "Nice shot!", "token")
        .await
        .unwrap();

    assert_eq!(created.id, "17900000000000001");
    let request = &mock.requests_to("/m1/comments")[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body, json!({"message": "Nice shot!", "access_token": "token"}));
}

#[tokio::test]
async fn test_reply_posts_to_comment_replies_edge() {
    let mock = spawn_mock_graph().await;
    mock.respond("/c42/replies", StatusCode::OK, r#"{"id":"17900000000000002"}"#);

    let created = mock
        .service()
        .reply_to_comment("c42", "Thanks!", "token")
        .await
        .unwrap();

    assert_eq!(created.id, "17900000000000002");
    let request = &mock.requests_to("/c42/replies")[0];
    assert_eq!(request.method, "POST");
    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["message"], "Thanks!");
}

#[tokio::test]
async fn test_reply_without_comment_id_sends_nothing() {
    let mock = spawn_mock_graph().await;

    let err = mock
        .service()
        .reply_to_comment("", "Thanks!", "token")
        .await
        .unwrap_err();

    assert!(matches!(err, InstagramError::Validation(_)));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_reply_with_path_characters_in_comment_id_sends_nothing() {
    let mock = spawn_mock_graph().await;
    mock.respond("/m1/comments", StatusCode::OK, r#"{"id":"new-top-level"}"#);

    for comment_id in ["m1/comments#", "../m1/comments", "m1%2Fcomments"] {
        let err = mock
            .service()
            .reply_to_comment(comment_id, "hi", "token")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            InstagramError::Validation("Comment ID is invalid".to_string()),
            "{comment_id}"
        );
    }

    let err = mock
        .service()
        .create_comment("m1/replies?x=", "hi", "token")
        .await
        .unwrap_err();
    assert!(matches!(err, InstagramError::Validation(_)));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_unreachable_graph_errors_omit_access_token() {
    let base = closed_port_url().await;
    let config = instagram_graph::InstagramConfig {
        graph_api_url: base,
        ..Default::default()
    };
    let client = InstagramGraphClient::new(Arc::new(config)).unwrap();
    let token = "SECRET-TOKEN-123";

    let errors = vec![
        client.fetch_profile(token).await.unwrap_err(),
        client.fetch_media(token).await.unwrap_err(),
        client.fetch_comments("m1", token).await.unwrap_err(),
        client.fetch_replies("c1", token).await.unwrap_err(),
        client.create_comment("m1", "hi", token).await.unwrap_err(),
    ];

    for err in errors {
        assert!(matches!(err, InstagramError::Unreachable(_)), "{err:?}");
        assert!(!err.to_string().contains(token), "{err}");
        assert!(!format!("{err:?}").contains(token), "{err:?}");
    }
}
