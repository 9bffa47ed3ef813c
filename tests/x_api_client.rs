//! Integration tests for `XApiClient` using wiremock HTTP mocks.

use statsbot::platform::ReferenceKind;
use statsbot::{PlatformClient, PlatformError, TwitterConfig, UserLookup, XApiClient};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn test_client(base_url: &str) -> XApiClient {
    let config = TwitterConfig {
        api_key: "test-api-key".to_string(),
        api_secret: "test-api-secret".to_string(),
        bearer_token: "test-bearer".to_string(),
        access_token: "test-access-token".to_string(),
        access_token_secret: "test-access-secret".to_string(),
        api_base_url: base_url.to_string(),
    };
    XApiClient::new(config).expect("client construction should not fail")
}

fn is_oauth1(request: &Request) -> bool {
    request
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("OAuth ") && value.contains("oauth_signature=\""))
        .unwrap_or(false)
}

#[tokio::test]
async fn lookup_user_by_username_uses_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/by/username/alice"))
        .and(query_param("user.fields", "username"))
        .and(header("authorization", "Bearer test-bearer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "id": "2244994945", "name": "Alice", "username": "alice" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let user = client
        .lookup_user(UserLookup::Username("alice"))
        .await
        .expect("should find user");

    assert_eq!(user.id, "2244994945");
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn lookup_user_without_data_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/by/username/ghost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errors": [{
                "title": "Not Found Error",
                "detail": "Could not find user with username: [ghost]."
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .lookup_user(UserLookup::Username("ghost"))
        .await
        .unwrap_err();

    assert!(matches!(err, PlatformError::NotFound(_)));
}

#[tokio::test]
async fn malformed_username_never_reaches_the_api() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .lookup_user(UserLookup::Username("../2/tweets"))
        .await
        .unwrap_err();

    assert!(matches!(err, PlatformError::NotFound(_)));
}

#[tokio::test]
async fn authenticated_user_is_signed_as_the_bot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/me"))
        .and(is_oauth1)
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "id": "9000", "name": "Stats Bot", "username": "statsbot" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let me = client.authenticated_user().await.expect("should return bot");

    assert_eq!(me.id, "9000");
    assert_eq!(me.username, "statsbot");
}

#[tokio::test]
async fn list_user_posts_parses_timeline() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/42/tweets"))
        .and(query_param("max_results", "50"))
        .and(query_param("tweet.fields", "author_id,created_at"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "id": "1002",
                    "text": "#pizza again 🍕🍕",
                    "author_id": "42",
                    "created_at": "2024-03-02T12:00:00.000Z"
                },
                {
                    "id": "1001",
                    "text": "I love #pizza 🍕",
                    "author_id": "42",
                    "created_at": "2024-03-01T08:30:00.000Z"
                }
            ],
            "meta": { "result_count": 2, "newest_id": "1002", "oldest_id": "1001" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let posts = client
        .list_user_posts("42", 50)
        .await
        .expect("should parse timeline");

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, "1002");
    assert_eq!(posts[1].text, "I love #pizza 🍕");
    assert_eq!(posts[1].author_id, "42");
    assert_eq!(posts[1].created_at.to_rfc3339(), "2024-03-01T08:30:00+00:00");
}

#[tokio::test]
async fn empty_timeline_is_an_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/42/tweets"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "meta": { "result_count": 0 } })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let posts = client.list_user_posts("42", 50).await.expect("should parse");
    assert!(posts.is_empty());
}

#[tokio::test]
async fn list_mentions_expands_authors_and_references() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/9000/mentions"))
        .and(query_param("since_id", "500"))
        .and(query_param("expansions", "author_id"))
        .and(query_param("max_results", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "id": "502",
                    "text": "@statsbot their stats weekly",
                    "author_id": "2",
                    "created_at": "2024-03-02T12:00:00.000Z",
                    "referenced_tweets": [{ "type": "replied_to", "id": "450" }]
                },
                {
                    "id": "501",
                    "text": "@statsbot my stats",
                    "author_id": "1",
                    "created_at": "2024-03-02T11:00:00.000Z"
                }
            ],
            "includes": {
                "users": [
                    { "id": "1", "name": "Alice", "username": "alice" },
                    { "id": "2", "name": "Bob", "username": "bob" }
                ]
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mentions = client
        .list_mentions("9000", Some("500"))
        .await
        .expect("should parse mentions");

    assert_eq!(mentions.len(), 2);
    assert_eq!(mentions[0].post.id, "502");
    assert_eq!(mentions[0].author_username.as_deref(), Some("bob"));
    assert_eq!(mentions[0].referenced_posts[0].kind, ReferenceKind::RepliedTo);
    assert_eq!(mentions[0].replied_to_id(), Some("450"));
    assert_eq!(mentions[1].author_username.as_deref(), Some("alice"));
    assert_eq!(mentions[1].replied_to_id(), None);
}

#[tokio::test]
async fn rate_limit_carries_reset_time() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/users/9000/mentions"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("x-rate-limit-reset", "1700000000")
                .set_body_json(serde_json::json!({ "title": "Too Many Requests" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_mentions("9000", None).await.unwrap_err();

    match err {
        PlatformError::RateLimited { reset_at } => {
            assert_eq!(reset_at.map(|reset| reset.timestamp()), Some(1_700_000_000));
        }
        other => panic!("expected rate limit, got {:?}", other),
    }
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/77"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_post("77").await.unwrap_err();

    match err {
        PlatformError::Api { operation, status } => {
            assert_eq!(operation, "get_tweet");
            assert_eq!(status, 500);
        }
        other => panic!("expected api error, got {:?}", other),
    }
}

#[tokio::test]
async fn create_reply_posts_reply_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .and(is_oauth1)
        .and(body_json(serde_json::json!({
            "text": "📊 @alice's Twitter Stats:",
            "reply": { "in_reply_to_tweet_id": "100" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": { "id": "1234567890", "text": "📊 @alice's Twitter Stats:" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reply_id = client
        .create_reply("📊 @alice's Twitter Stats:", "100")
        .await
        .expect("should post reply");

    assert_eq!(reply_id, "1234567890");
}
