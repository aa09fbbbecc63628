//! Workout backend client against a mocked server.

use liftlog_core::session::api::{AddSetRequest, NotesUpdate, SetUpdate};
use liftlog_core::session::{WorkoutApi, WorkoutBackend};
use liftlog_core::ApiError;
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn update_set_sends_csrf_and_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/set/update/")
        .match_header("x-csrftoken", "tok123")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "set_id": 9, "weight": 82.5, "reps": 5, "completed": true
        })))
        .with_status(200)
        .with_body(r#"{"status":"success"}"#)
        .create_async()
        .await;

    let api = WorkoutApi::new(&server.url(), Some("tok123".into())).unwrap();
    api.update_set(&SetUpdate {
        set_id: 9,
        weight: 82.5,
        reps: 5,
        completed: true,
    })
    .await
    .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn update_notes_posts_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/notes/update/")
        .match_body(Matcher::Json(json!({
            "exercise_session_id": 3, "notes": "felt heavy"
        })))
        .with_body(r#"{"status":"success"}"#)
        .create_async()
        .await;

    let api = WorkoutApi::new(&server.url(), None).unwrap();
    api.update_notes(&NotesUpdate {
        exercise_session_id: 3,
        notes: "felt heavy".into(),
    })
    .await
    .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn add_set_returns_new_set() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/set/add/")
        .match_body(Matcher::Json(json!({"exercise_session_id": 3})))
        .with_body(r#"{"status":"success","set_id":41,"set_number":4}"#)
        .create_async()
        .await;

    let api = WorkoutApi::new(&server.url(), None).unwrap();
    let added = api
        .add_set(&AddSetRequest {
            exercise_session_id: 3,
        })
        .await
        .unwrap();
    assert_eq!(added.set_id, 41);
    assert_eq!(added.set_number, 4);
}

#[tokio::test]
async fn error_status_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/set/update/")
        .with_status(400)
        .with_body(r#"{"status":"error","message":"Set matching query does not exist."}"#)
        .create_async()
        .await;

    let api = WorkoutApi::new(&server.url(), None).unwrap();
    let err = api
        .update_set(&SetUpdate {
            set_id: 1,
            weight: 0.0,
            reps: 0,
            completed: false,
        })
        .await
        .unwrap_err();
    match err {
        ApiError::Rejected { endpoint, message } => {
            assert_eq!(endpoint, "api/set/update/");
            assert!(message.contains("does not exist"));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_reply_is_a_request_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/notes/update/")
        .with_status(500)
        .with_body("<html>Server Error</html>")
        .create_async()
        .await;

    let api = WorkoutApi::new(&server.url(), None).unwrap();
    let err = api
        .update_notes(&NotesUpdate {
            exercise_session_id: 1,
            notes: String::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Request(_)));
}
