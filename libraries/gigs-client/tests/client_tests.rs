//! Tests for the Gigs client library.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real backend.

use gigs_client::{
    ClientConfig, ClientError, EditorSession, GigsClient, MemorySessionStore, NewUser, Session,
    SessionContext, MISSING_CREDENTIAL_MESSAGE,
};
use gigs_core::{
    Account, ArtistSchema, ArtistTags, EditorConfig, EditorMode, FetchOutcome, HostSchema,
    NoticeKind, ProfileError, Role, Submission, MAX_UPLOAD_BYTES,
};
use std::sync::Arc;
use std::time::Instant;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Helpers
// =============================================================================

fn account(role: Role) -> Account {
    Account {
        id: 42,
        email: "nimal@example.lk".into(),
        role,
        username: Some("nimal".into()),
    }
}

fn session(role: Role) -> Session {
    Session {
        token: "test-token".into(),
        account: account(role),
    }
}

async fn signed_in(role: Role) -> SessionContext {
    let ctx = SessionContext::new(Arc::new(MemorySessionStore::default()));
    ctx.set(session(role)).await.unwrap();
    ctx
}

fn client(server: &MockServer) -> GigsClient {
    GigsClient::new(ClientConfig::new(server.uri())).unwrap()
}

fn artist_profile(avatar: &str) -> serde_json::Value {
    serde_json::json!({
        "profile": {
            "id": 3,
            "user_id": 42,
            "full_name": "Nimal Perera",
            "stage_name": "DJ Nimal",
            "location": "Colombo",
            "skills": "[\"DJ\"]",
            "rating": "4.50",
            "review_count": 12,
            "direct_booking": 1,
            "profile_picture_url": avatar,
            "gallery_images": ["/uploads/gallery/one.png"]
        }
    })
}

async fn request_bodies(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| String::from_utf8_lossy(&r.body).into_owned())
        .collect()
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_empty_url_rejected() {
        let result = GigsClient::new(ClientConfig::new(""));

        match result.unwrap_err() {
            ClientError::InvalidUrl(msg) => assert!(msg.contains("empty")),
            e => panic!("Expected InvalidUrl error, got: {:?}", e),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        let result = GigsClient::new(ClientConfig::new("localhost:5000"));
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }
}

// =============================================================================
// Authentication Tests
// =============================================================================

mod authentication {
    use super::*;

    #[tokio::test]
    async fn test_login_populates_and_persists_session() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(serde_json::json!({
                "email": "nimal@example.lk",
                "password": "secret"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "jwt-123",
                "user": { "id": 42, "email": "nimal@example.lk", "role": "performer", "username": "nimal" }
            })))
            .mount(&mock_server)
            .await;

        let store = Arc::new(MemorySessionStore::default());
        let ctx = SessionContext::new(store.clone());
        let client = client(&mock_server);

        let account = ctx
            .login(&client.auth(), "nimal@example.lk", "secret")
            .await
            .unwrap();

        assert_eq!(account.role, Role::Performer);
        assert_eq!(ctx.credential().await.unwrap().token, "jwt-123");

        let restored = SessionContext::restore(store).await;
        assert_eq!(restored.account().await, Some(account));
    }

    #[tokio::test]
    async fn test_login_failure_leaves_context_signed_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "message": "Invalid credentials"
            })))
            .mount(&mock_server)
            .await;

        let ctx = signed_in(Role::Host).await;
        let client = client(&mock_server);

        let result = ctx.login(&client.auth(), "nimal@example.lk", "wrong").await;

        match result.unwrap_err() {
            ClientError::AuthFailed(msg) => assert_eq!(msg, "Invalid credentials"),
            e => panic!("Expected AuthFailed, got: {:?}", e),
        }
        assert!(!ctx.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_register_sends_role() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .and(body_json(serde_json::json!({
                "email": "kasun@example.lk",
                "password": "secret",
                "username": "kasun",
                "role": "host"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "message": "User registered successfully"
            })))
            .mount(&mock_server)
            .await;

        let message = client(&mock_server)
            .auth()
            .register("kasun@example.lk", "secret", "kasun", Role::Host)
            .await
            .unwrap();

        assert_eq!(message.as_deref(), Some("User registered successfully"));
    }

    #[tokio::test]
    async fn test_register_conflict_carries_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "message": "User already exists"
            })))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server)
            .auth()
            .register("kasun@example.lk", "secret", "kasun", Role::Host)
            .await;

        match result.unwrap_err() {
            ClientError::ServerError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "User already exists");
            }
            e => panic!("Expected ServerError, got: {:?}", e),
        }
    }
}

// =============================================================================
// Profile API Tests
// =============================================================================

mod profiles {
    use super::*;

    #[tokio::test]
    async fn test_fetch_sends_token_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/performers/profile"))
            .and(header("x-auth-token", "test-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(artist_profile("/uploads/profile_pictures/n.png")),
            )
            .mount(&mock_server)
            .await;

        let outcome = client(&mock_server)
            .profiles()
            .fetch::<ArtistSchema>(&session(Role::Performer))
            .await
            .unwrap();

        match outcome {
            FetchOutcome::Found(record) => {
                assert_eq!(record.skills, vec!["DJ"]);
                assert_eq!(record.rating, 4.5);
                assert!(record.direct_booking);
            }
            FetchOutcome::Missing => panic!("Expected a profile"),
        }
    }

    #[tokio::test]
    async fn test_null_profile_is_missing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/hosts/profile"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "profile": null })),
            )
            .mount(&mock_server)
            .await;

        let outcome = client(&mock_server)
            .profiles()
            .fetch::<HostSchema>(&session(Role::Host))
            .await
            .unwrap();

        assert!(matches!(outcome, FetchOutcome::Missing));
    }

    #[tokio::test]
    async fn test_fetch_error_uses_server_message_or_fallback() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/performers/profile"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "message": "Database unavailable"
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/hosts/profile"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server);

        let err = client
            .profiles()
            .fetch::<ArtistSchema>(&session(Role::Performer))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Profile(ProfileError::Fetch(ref m)) if m == "Database unavailable"));

        let err = client
            .profiles()
            .fetch::<HostSchema>(&session(Role::Host))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Profile(ProfileError::Fetch(ref m)) if m == "Failed to fetch host profile."));
    }

    #[tokio::test]
    async fn test_role_mismatch_fails_before_request() {
        let mock_server = MockServer::start().await;

        let err = client(&mock_server)
            .profiles()
            .fetch::<HostSchema>(&session(Role::Performer))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::Profile(ProfileError::Authentication(_))
        ));
        assert!(request_bodies(&mock_server).await.is_empty());
    }

    #[tokio::test]
    async fn test_save_sends_multipart_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/performers/profile"))
            .and(header("x-auth-token", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Performer profile updated successfully"
            })))
            .mount(&mock_server)
            .await;

        let mut submission = Submission::new();
        submission.push_text("stage_name", "DJ Nimal");
        submission.push_list("skills", &["DJ".to_string(), "MC".to_string()]);
        submission.push_file(
            "new_gallery_images",
            gigs_core::PendingFile::new("stage.png", "image/png", vec![1, 2, 3]),
        );

        let response = client(&mock_server)
            .profiles()
            .save::<ArtistSchema>(&session(Role::Performer), submission)
            .await
            .unwrap();

        assert_eq!(
            response.message.as_deref(),
            Some("Performer profile updated successfully")
        );

        let bodies = request_bodies(&mock_server).await;
        assert_eq!(bodies.len(), 1);
        let body = &bodies[0];
        assert!(body.contains(r#"name="stage_name""#));
        assert!(body.contains("DJ Nimal"));
        assert!(body.contains(r#"["DJ","MC"]"#));
        assert!(body.contains(r#"name="new_gallery_images"; filename="stage.png""#));
        assert!(body.contains("image/png"));
    }

    #[tokio::test]
    async fn test_save_error_carries_server_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/hosts/profile"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "message": "Profile picture must be less than 5MB"
            })))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server)
            .profiles()
            .save::<HostSchema>(&session(Role::Host), Submission::new())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Profile picture must be less than 5MB");
        assert!(matches!(err, ClientError::Profile(ProfileError::Save(_))));
    }
}

// =============================================================================
// Editor Session Tests
// =============================================================================

mod editor_session {
    use super::*;

    #[tokio::test]
    async fn test_open_without_session_fails_closed() {
        let mock_server = MockServer::start().await;
        let ctx = SessionContext::new(Arc::new(MemorySessionStore::default()));

        let err = EditorSession::<ArtistSchema>::open(
            client(&mock_server),
            ctx,
            EditorConfig::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), MISSING_CREDENTIAL_MESSAGE);
        assert!(request_bodies(&mock_server).await.is_empty());
    }

    #[tokio::test]
    async fn test_open_missing_profile_enters_creation_mode() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/hosts/profile"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "profile": null })),
            )
            .mount(&mock_server)
            .await;

        let editing = EditorSession::<HostSchema>::open(
            client(&mock_server),
            signed_in(Role::Host).await,
            EditorConfig::default(),
        )
        .await
        .unwrap();

        let editor = editing.editor();
        assert_eq!(editor.mode(), EditorMode::Editing);
        assert!(editor.is_creating());
        assert_eq!(
            editor.current().unwrap().fields.company_organization,
            "nimal"
        );
    }

    #[tokio::test]
    async fn test_save_uploads_and_refetches() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/performers/profile"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(artist_profile("/uploads/profile_pictures/old.png")),
            )
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/performers/profile"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(artist_profile("/uploads/profile_pictures/new.png")),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/performers/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Performer profile updated successfully"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let avatar = dir.path().join("new.png");
        std::fs::write(&avatar, b"png-bytes").unwrap();

        let mut editing = EditorSession::<ArtistSchema>::open(
            client(&mock_server),
            signed_in(Role::Performer).await,
            EditorConfig::default(),
        )
        .await
        .unwrap();

        editing.editor_mut().begin_edit().unwrap();
        editing
            .editor_mut()
            .add_tag(ArtistTags::Skills, "MC")
            .unwrap();
        editing.stage_avatar_path(&avatar).await.unwrap();
        editing.save().await.unwrap();

        let now = Instant::now();
        let editor = editing.editor();
        assert_eq!(editor.mode(), EditorMode::Viewing);
        assert!(editor.staging().is_empty());
        assert_eq!(
            editor.current().unwrap().avatar_url(),
            format!("{}/uploads/profile_pictures/new.png", mock_server.uri())
        );
        assert_eq!(
            editor.notice(NoticeKind::Success, now).unwrap().message,
            "Performer profile updated successfully"
        );

        let put_body = request_bodies(&mock_server)
            .await
            .into_iter()
            .find(|b| !b.is_empty())
            .unwrap();
        assert!(put_body.contains(r#"name="profile_picture"; filename="new.png""#));
        assert!(!put_body.contains(r#"name="profile_picture_url""#));
        assert!(put_body.contains(r#"["DJ","MC"]"#));
        assert!(put_body.contains(r#"["/uploads/gallery/one.png"]"#));
    }

    #[tokio::test]
    async fn test_failed_refetch_reloads_before_next_edit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/performers/profile"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(artist_profile("/uploads/profile_pictures/old.png")),
            )
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/performers/profile"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/performers/profile"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(artist_profile("/uploads/profile_pictures/new.png")),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/performers/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let avatar = dir.path().join("new.png");
        std::fs::write(&avatar, b"png-bytes").unwrap();

        let mut editing = EditorSession::<ArtistSchema>::open(
            client(&mock_server),
            signed_in(Role::Performer).await,
            EditorConfig::default(),
        )
        .await
        .unwrap();
        editing.begin_edit().await.unwrap();
        editing.stage_avatar_path(&avatar).await.unwrap();
        editing.save().await.unwrap();

        assert!(editing.editor().is_stale());
        assert!(matches!(
            editing.editor_mut().begin_edit(),
            Err(ProfileError::Fetch(_))
        ));

        editing.begin_edit().await.unwrap();
        assert!(!editing.editor().is_stale());
        editing.save().await.unwrap();

        let bodies = request_bodies(&mock_server).await;
        let last_put = bodies.iter().rev().find(|b| !b.is_empty()).unwrap();
        assert!(last_put.contains(r#"name="profile_picture_url""#));
        assert!(last_put.contains("/uploads/profile_pictures/new.png"));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_editing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/performers/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(artist_profile("")))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/performers/profile"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "message": "Profile picture must be less than 5MB"
            })))
            .mount(&mock_server)
            .await;

        let mut editing = EditorSession::<ArtistSchema>::open(
            client(&mock_server),
            signed_in(Role::Performer).await,
            EditorConfig::default(),
        )
        .await
        .unwrap();
        editing.editor_mut().begin_edit().unwrap();
        let before = editing.editor().buffer().unwrap().clone();

        let err = editing.save().await.unwrap_err();

        assert_eq!(err.to_string(), "Profile picture must be less than 5MB");
        let editor = editing.editor();
        assert_eq!(editor.mode(), EditorMode::Editing);
        assert_eq!(editor.buffer().unwrap(), &before);
        assert_eq!(
            editor
                .notice(NoticeKind::Error, Instant::now())
                .unwrap()
                .message,
            "Profile picture must be less than 5MB"
        );
    }

    #[tokio::test]
    async fn test_oversized_file_rejected_before_staging() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/performers/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(artist_profile("")))
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let big = dir.path().join("big.jpg");
        std::fs::File::create(&big)
            .unwrap()
            .set_len(MAX_UPLOAD_BYTES + 1)
            .unwrap();
        let exact = dir.path().join("exact.jpg");
        std::fs::File::create(&exact)
            .unwrap()
            .set_len(MAX_UPLOAD_BYTES)
            .unwrap();

        let mut editing = EditorSession::<ArtistSchema>::open(
            client(&mock_server),
            signed_in(Role::Performer).await,
            EditorConfig::default(),
        )
        .await
        .unwrap();
        editing.editor_mut().begin_edit().unwrap();

        let results = editing
            .stage_gallery_paths(&[&big, &exact])
            .await
            .unwrap();

        assert!(matches!(
            &results[0],
            Err(ClientError::Profile(ProfileError::Validation(m)))
                if m == "Gallery images must be less than 5MB each"
        ));
        assert!(results[1].is_ok());
        let pending = editing.editor().staging().pending_gallery();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].file.content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_missing_file_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/performers/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(artist_profile("")))
            .mount(&mock_server)
            .await;

        let mut editing = EditorSession::<ArtistSchema>::open(
            client(&mock_server),
            signed_in(Role::Performer).await,
            EditorConfig::default(),
        )
        .await
        .unwrap();
        editing.editor_mut().begin_edit().unwrap();

        let err = editing
            .stage_avatar_path(std::path::Path::new("/nonexistent/avatar.png"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::FileNotFound(_)));
        assert!(editing
            .editor()
            .notice(NoticeKind::Error, Instant::now())
            .is_some());
    }
}

// =============================================================================
// Directory Tests
// =============================================================================

mod directory {
    use super::*;

    #[tokio::test]
    async fn test_list_and_search_artists() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/performers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "profiles": [
                    {
                        "id": 1, "user_id": 10, "stage_name": "Ruwan Live",
                        "performance_type": "Guitarist", "location": "Kandy",
                        "rating": "4.80", "review_count": 31,
                        "profile_picture_url": "/uploads/profile_pictures/r.png"
                    },
                    { "id": 2, "user_id": 11, "full_name": null, "rating": null }
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server);
        let directory = client.directory().list_artists().await.unwrap();

        assert_eq!(directory.len(), 2);
        let cards: Vec<_> = directory.cards().collect();
        let ruwan = cards[0];
        assert_eq!(ruwan.rating, 4.8);
        assert_eq!(
            ruwan.image,
            format!("{}/uploads/profile_pictures/r.png", mock_server.uri())
        );
        assert_eq!(cards[1].name, "Unknown Artist");
        assert_eq!(directory.get("2").unwrap().bio, "No bio provided.");

        let hits = directory.search("kandy");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
        assert_eq!(directory.search("general").len(), 1);
    }
}

// =============================================================================
// Admin Tests
// =============================================================================

mod admin {
    use super::*;

    fn new_user(password: &str) -> NewUser {
        NewUser {
            username: "sahan".into(),
            email: "sahan@example.lk".into(),
            password: password.into(),
            role: Role::Performer,
        }
    }

    #[test]
    fn test_non_admin_is_forbidden() {
        let client = GigsClient::new(ClientConfig::new("http://localhost:5000")).unwrap();
        let session = session(Role::Host);
        assert!(matches!(
            client.admin(&session),
            Err(ClientError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_list_users() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/admin/users"))
            .and(header("x-auth-token", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "users": [
                    { "id": 1, "username": "admin", "email": "admin@example.lk", "role": "admin" },
                    { "id": 2, "username": "kasun", "email": "kasun@example.lk", "role": "host" }
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server);
        let session = session(Role::Admin);
        let users = client.admin(&session).unwrap().list_users().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[1].role, Role::Host);
        assert_eq!(users.iter().filter(|u| u.matches("HOST")).count(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_user_is_not_sent() {
        let mock_server = MockServer::start().await;
        let client = client(&mock_server);
        let session = session(Role::Admin);

        let err = client
            .admin(&session)
            .unwrap()
            .add_user(&new_user(""))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Please fill all fields for the new user.");
        assert!(request_bodies(&mock_server).await.is_empty());
    }

    #[tokio::test]
    async fn test_add_and_delete_user() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/admin/users"))
            .and(body_json(serde_json::json!({
                "username": "sahan",
                "email": "sahan@example.lk",
                "password": "secret",
                "role": "performer"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "message": "User added successfully!"
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/admin/users/7"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "message": "Cannot delete another admin"
            })))
            .mount(&mock_server)
            .await;

        let client = client(&mock_server);
        let session = session(Role::Admin);
        let admin = client.admin(&session).unwrap();

        let message = admin.add_user(&new_user("secret")).await.unwrap();
        assert_eq!(message.as_deref(), Some("User added successfully!"));

        match admin.delete_user(7).await.unwrap_err() {
            ClientError::Forbidden(msg) => assert_eq!(msg, "Cannot delete another admin"),
            e => panic!("Expected Forbidden, got: {:?}", e),
        }
    }
}
