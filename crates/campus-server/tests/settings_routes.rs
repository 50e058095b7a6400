use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use campus_server::store::{MemoryUserStore, SettingsUpdate, UserStore};
use campus_server::{create_router, AppState, Config};
use campus_shared::{NewUser, ProfileUi, Theme, User};
use serde_json::{json, Value};
use tower::ServiceExt;

const DEV_EMAIL: &str = "foo@bar.com";

fn test_config() -> Config {
    Config {
        database_url: None,
        jwt_secret: "test-secret".to_string(),
        jwt_expires_in: 3600,
        port: 0,
        dev_login: true,
        cookie_secure: false,
    }
}

struct TestApp {
    router: Router,
    store: Arc<MemoryUserStore>,
    /// `Cookie` header carrying both the session and the CSRF secret.
    cookies: String,
    csrf_token: String,
}

impl TestApp {
    async fn signed_in() -> Self {
        let store = Arc::new(MemoryUserStore::new());
        let router = create_router(AppState::new(store.clone(), test_config()));

        let response = router
            .clone()
            .oneshot(
                Request::get("/auth/dev-callback")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|value| {
                let value = value.to_str().unwrap();
                value.split(';').next().unwrap().to_string()
            })
            .collect::<Vec<_>>()
            .join("; ");

        let body = body_json(response).await;
        let csrf_token = body["csrfToken"].as_str().unwrap().to_string();

        Self {
            router,
            store,
            cookies,
            csrf_token,
        }
    }

    async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, &self.cookies)
            .header("csrf-token", &self.csrf_token)
            .body(Body::from(body.to_string()))
            .unwrap();

        send(&self.router, request).await
    }

    async fn user(&self) -> User {
        self.store.find_by_email(DEV_EMAIL).await.unwrap().unwrap()
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

fn profile_ui() -> Value {
    json!({
        "isLocked": true,
        "showAbout": true,
        "showCerts": false,
        "showDonation": true,
        "showHeatMap": false,
        "showLocation": true,
        "showName": true,
        "showPoints": false,
        "showPortfolio": true,
        "showTimeLine": false
    })
}

fn expected_profile_ui() -> ProfileUi {
    ProfileUi {
        is_locked: true,
        show_about: true,
        show_donation: true,
        show_location: true,
        show_name: true,
        show_portfolio: true,
        ..ProfileUi::default()
    }
}

mod profile_ui {
    use super::*;

    #[tokio::test]
    async fn put_updates_and_returns_success() {
        let app = TestApp::signed_in().await;

        let (status, body) = app
            .put("/update-my-profileui", json!({ "profileUI": profile_ui() }))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "flash.privacy-updated", "type": "success" }));
        assert_eq!(app.user().await.profile_ui, expected_profile_ui());
    }

    #[tokio::test]
    async fn put_ignores_invalid_keys() {
        let app = TestApp::signed_in().await;
        let mut payload = profile_ui();
        payload["invalidKey"] = json!("invalidValue");

        let (status, _) = app
            .put("/update-my-profileui", json!({ "profileUI": payload }))
            .await;

        assert_eq!(status, StatusCode::OK);
        let stored = serde_json::to_value(app.user().await.profile_ui).unwrap();
        assert_eq!(stored, profile_ui());
    }

    #[tokio::test]
    async fn put_with_missing_keys_is_bad_request() {
        let app = TestApp::signed_in().await;

        let (status, body) = app
            .put(
                "/update-my-profileui",
                json!({
                    "profileUI": {
                        "isLocked": true,
                        "showName": true,
                        "showPoints": false,
                        "showPortfolio": true,
                        "showTimeLine": false
                    }
                }),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "statusCode": 400,
                "error": "Bad Request",
                "message": "body/profileUI must have required property 'showAbout'"
            })
        );
        assert_eq!(app.user().await.profile_ui, ProfileUi::default());
    }

    #[tokio::test]
    async fn every_missing_flag_is_named() {
        let app = TestApp::signed_in().await;

        for field in ProfileUi::FIELDS {
            let mut payload = profile_ui();
            payload.as_object_mut().unwrap().remove(field);

            let (status, body) = app
                .put("/update-my-profileui", json!({ "profileUI": payload }))
                .await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                body["message"],
                format!("body/profileUI must have required property '{field}'")
            );
        }
    }
}

mod theme {
    use super::*;

    #[tokio::test]
    async fn put_updates_theme() {
        let app = TestApp::signed_in().await;

        let (status, body) = app.put("/update-my-theme", json!({ "theme": "night" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "flash.updated-themes", "type": "success" }));
        assert_eq!(app.user().await.theme, Theme::Night);
    }

    #[tokio::test]
    async fn put_with_invalid_theme_is_bad_request() {
        let app = TestApp::signed_in().await;

        for theme in [json!("invalid"), json!("NIGHT"), json!(true)] {
            let (status, _) = app.put("/update-my-theme", json!({ "theme": theme })).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
        assert_eq!(app.user().await.theme, Theme::Default);
    }
}

mod socials {
    use super::*;

    #[tokio::test]
    async fn put_updates_only_provided_links() {
        let app = TestApp::signed_in().await;

        let (status, body) = app
            .put(
                "/update-my-socials",
                json!({
                    "website": "https://camper.dev",
                    "githubProfile": "https://github.com/camper"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "flash.updated-socials", "type": "success" }));

        let (status, _) = app
            .put("/update-my-socials", json!({ "linkedin": "https://linkedin.com/in/camper" }))
            .await;
        assert_eq!(status, StatusCode::OK);

        let user = app.user().await;
        assert_eq!(user.website.as_deref(), Some("https://camper.dev"));
        assert_eq!(user.github_profile.as_deref(), Some("https://github.com/camper"));
        assert_eq!(user.linkedin.as_deref(), Some("https://linkedin.com/in/camper"));
        assert_eq!(user.twitter, None);
    }

    #[tokio::test]
    async fn put_with_bad_url_is_bad_request() {
        let app = TestApp::signed_in().await;

        let (status, body) = app
            .put("/update-my-socials", json!({ "twitter": "not a url" }))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "body/twitter must match format \"url\"");
    }
}

mod username {
    use super::*;

    async fn seed(store: &MemoryUserStore, email: &str, username: &str) {
        let user = store.create_user(NewUser::with_defaults(email)).await.unwrap();
        store
            .apply(
                user.id,
                SettingsUpdate::Username {
                    username: username.to_string(),
                    display: username.to_string(),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn name_owned_by_someone_else_is_taken() {
        let app = TestApp::signed_in().await;
        seed(&app.store, "twaha@example.com", "twaha").await;

        let (status, body) = app.put("/update-my-username", json!({ "username": "Twaha" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "message": "flash.username-taken", "type": "info", "username": "twaha" })
        );
    }

    #[tokio::test]
    async fn special_characters_are_reported_with_the_name() {
        let app = TestApp::signed_in().await;

        let (status, body) = app.put("/update-my-username", json!({ "username": "twaha@" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Username twaha@ contains invalid characters");
        assert_eq!(body["type"], "info");
    }

    #[tokio::test]
    async fn reserved_route_names_are_taken() {
        let app = TestApp::signed_in().await;

        let (status, body) = app.put("/update-my-username", json!({ "username": "german" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "flash.username-taken");
    }

    #[tokio::test]
    async fn profanity_is_taken() {
        let app = TestApp::signed_in().await;

        let (status, body) = app.put("/update-my-username", json!({ "username": "ass" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "flash.username-taken");
        assert_eq!(body["type"], "info");
    }

    #[tokio::test]
    async fn http_status_codes_are_reserved() {
        let app = TestApp::signed_in().await;

        let (status, body) = app.put("/update-my-username", json!({ "username": "404" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Username 404 is a reserved error code");
    }

    #[tokio::test]
    async fn too_short_is_bad_request() {
        let app = TestApp::signed_in().await;

        let (status, body) = app.put("/update-my-username", json!({ "username": "fo" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "statusCode": 400,
                "error": "Bad Request",
                "message": "body/username must NOT have fewer than 3 characters"
            })
        );
    }

    #[tokio::test]
    async fn too_long_is_bad_request() {
        let app = TestApp::signed_in().await;

        let (status, _) = app
            .put("/update-my-username", json!({ "username": "thisusernameiswaytolongforuse" }))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn new_name_is_saved_in_both_forms() {
        let app = TestApp::signed_in().await;

        let (status, body) = app.put("/update-my-username", json!({ "username": "CamperBot" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "message": "flash.username-updated", "type": "success", "username": "camperbot" })
        );

        let user = app.user().await;
        assert_eq!(user.username, "camperbot");
        assert_eq!(user.username_display.as_deref(), Some("CamperBot"));
    }

    #[tokio::test]
    async fn resubmitting_the_current_name_is_used_without_a_write() {
        let app = TestApp::signed_in().await;
        app.put("/update-my-username", json!({ "username": "CamperBot" })).await;
        let before = app.user().await;

        let (status, body) = app.put("/update-my-username", json!({ "username": "CamperBot" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "message": "flash.username-used", "type": "info", "username": "camperbot" })
        );
        assert_eq!(app.user().await.updated_at, before.updated_at);
    }

    #[tokio::test]
    async fn changing_only_the_casing_updates_the_display_form() {
        let app = TestApp::signed_in().await;
        app.put("/update-my-username", json!({ "username": "camperbot" })).await;

        let (status, body) = app.put("/update-my-username", json!({ "username": "CamperBot" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "flash.username-updated");
        assert_eq!(app.user().await.username_display.as_deref(), Some("CamperBot"));
    }
}

mod preferences {
    use super::*;

    #[tokio::test]
    async fn keyboard_shortcuts() {
        let app = TestApp::signed_in().await;

        let (status, body) = app
            .put("/update-my-keyboard-shortcuts", json!({ "keyboardShortcuts": true }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "message": "flash.keyboard-shortcut-updated", "type": "success" })
        );
        assert!(app.user().await.keyboard_shortcuts);

        let (status, _) = app
            .put("/update-my-keyboard-shortcuts", json!({ "keyboardShortcuts": "invalid" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn quincy_email() {
        let app = TestApp::signed_in().await;

        let (status, body) = app
            .put("/update-my-quincy-email", json!({ "sendQuincyEmail": true }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "message": "flash.subscribe-to-quincy-updated", "type": "success" })
        );
        assert!(app.user().await.send_quincy_email);

        let (status, _) = app
            .put("/update-my-quincy-email", json!({ "sendQuincyEmail": "invalid" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn honesty_accepts_only_true() {
        let app = TestApp::signed_in().await;

        let (status, _) = app.put("/update-my-honesty", json!({ "isHonest": false })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!app.user().await.is_honest);

        let (status, body) = app.put("/update-my-honesty", json!({ "isHonest": true })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "buttons.accepted-honesty", "type": "success" }));
        assert!(app.user().await.is_honest);
    }

    #[tokio::test]
    async fn privacy_terms_accepts_terms_and_sets_email() {
        let app = TestApp::signed_in().await;

        let (status, body) = app
            .put("/update-privacy-terms", json!({ "quincyEmails": true }))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "flash.privacy-updated", "type": "success" }));
        let user = app.user().await;
        assert!(user.accepted_privacy_terms);
        assert!(user.send_quincy_email);

        let (status, _) = app
            .put("/update-privacy-terms", json!({ "quincyEmails": "yes" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_failure_is_a_generic_danger_message() {
        let app = TestApp::signed_in().await;
        app.store.set_failing(true);

        let (status, body) = app.put("/update-my-theme", json!({ "theme": "night" })).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "flash.wrong-updating", "type": "danger" }));
    }
}
