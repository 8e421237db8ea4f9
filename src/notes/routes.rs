use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth,
    ctx::BaseParams,
    errors::Result,
    extract::{Json, Path},
    state::AppState,
};

use super::{handlers, CreateNote, DeleteNoteResponse, FindNotesResponse, NoteResponse, UpdateNote, UpdateNotePinned};

#[derive(Debug, Deserialize)]
struct NoteIdPath {
    note_id: Uuid,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/add-note", post(add_note))
        .route("/edit-note/{note_id}", put(edit_note))
        .route("/get-notes", get(get_notes))
        .route("/delete-note/{note_id}", delete(delete_note))
        .route("/update-note-pinned/{note_id}", put(update_note_pinned))
        .with_state(state)
        .layer(middleware::from_fn(auth::middleware::protected))
}

async fn add_note(base: BaseParams, Json(args): Json<CreateNote>) -> Result<Json<NoteResponse>> {
    handlers::create_note(args, base).await.map(|note| {
        Json(NoteResponse {
            error: false,
            note,
            message: "Note added successfully".into(),
        })
    })
}

async fn edit_note(
    Path(NoteIdPath { note_id }): Path<NoteIdPath>,
    base: BaseParams,
    Json(args): Json<UpdateNote>,
) -> Result<Json<NoteResponse>> {
    handlers::update_note(note_id, args, base).await.map(|note| {
        Json(NoteResponse {
            error: false,
            note,
            message: "Note updated successfully".into(),
        })
    })
}

async fn get_notes(base: BaseParams) -> Result<Json<FindNotesResponse>> {
    handlers::find_notes(base)
        .await
        .map(|notes| Json(FindNotesResponse { error: false, notes }))
}

async fn delete_note(Path(NoteIdPath { note_id }): Path<NoteIdPath>, base: BaseParams) -> Result<Json<DeleteNoteResponse>> {
    handlers::delete_note(note_id, base).await.map(|_| {
        Json(DeleteNoteResponse {
            error: false,
            message: "Note deleted successfully".into(),
        })
    })
}

async fn update_note_pinned(
    Path(NoteIdPath { note_id }): Path<NoteIdPath>,
    base: BaseParams,
    Json(args): Json<UpdateNotePinned>,
) -> Result<Json<NoteResponse>> {
    handlers::set_pinned(note_id, args.is_pinned, base).await.map(|note| {
        Json(NoteResponse {
            error: false,
            note,
            message: "Note pin updated successfully".into(),
        })
    })
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum_test::TestServer;
    use serde_json::json;
    use uuid::Uuid;

    use crate::{
        db::{init_test_db, DB},
        errors::Result,
        notes::{DeleteNoteResponse, FindNotesResponse, Note, NoteResponse},
        state::AppState,
        users::RegisterResponse,
    };

    fn full_router(state: AppState) -> Router {
        crate::users::router(state.clone()).merge(super::router(state))
    }

    async fn test_server(db: DB) -> Result<TestServer> {
        crate::tests::test_server(db, full_router).await
    }

    async fn register(server: &TestServer, email: &str) -> String {
        server
            .post("/create-account")
            .json(&json!({ "fullName": "Test User", "email": email, "password": "p" }))
            .await
            .json::<RegisterResponse>()
            .access_token
            .unwrap()
    }

    async fn add_note(server: &TestServer, token: &str, title: &str, content: &str) -> Note {
        let response = server
            .post("/add-note")
            .authorization_bearer(token)
            .json(&json!({ "title": title, "content": content }))
            .await;

        assert_eq!(response.status_code(), 200);
        response.json::<NoteResponse>().note
    }

    #[tokio::test]
    async fn add_note_and_get_notes() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;
        let token = register(&server, "a@x.com").await;

        let response = server
            .post("/add-note")
            .authorization_bearer(&token)
            .json(&json!({ "title": "T", "content": "C", "tags": ["work", "todo"] }))
            .await;

        assert_eq!(response.status_code(), 200);

        let body = response.json::<NoteResponse>();
        assert!(!body.error);
        assert_eq!(body.note.title, "T");
        assert_eq!(body.note.content, "C");
        assert_eq!(body.note.tags, vec!["work", "todo"]);
        assert!(!body.note.is_pinned);

        let notes = server
            .get("/get-notes")
            .authorization_bearer(&token)
            .await
            .json::<FindNotesResponse>()
            .notes;

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, body.note.id);
        Ok(())
    }

    #[tokio::test]
    async fn add_note_defaults_tags_to_empty() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;
        let token = register(&server, "a@x.com").await;

        let note = add_note(&server, &token, "T", "C").await;

        assert!(note.tags.is_empty());
        assert!(!note.is_pinned);
        Ok(())
    }

    #[tokio::test]
    async fn add_note_missing_fields() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;
        let token = register(&server, "a@x.com").await;

        let response = server
            .post("/add-note")
            .authorization_bearer(&token)
            .json(&json!({ "title": "T" }))
            .await;
        assert_eq!(response.status_code(), 400);

        let response = server
            .post("/add-note")
            .authorization_bearer(&token)
            .json(&json!({ "title": "", "content": "C" }))
            .await;
        assert_eq!(response.status_code(), 400);
        Ok(())
    }

    #[tokio::test]
    async fn notes_require_auth() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;

        let response = server.get("/get-notes").await;
        assert_eq!(response.status_code(), 401);

        let response = server.get("/get-notes").authorization_bearer("garbage").await;
        assert_eq!(response.status_code(), 403);
        Ok(())
    }

    #[tokio::test]
    async fn edit_note_partial_update() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;
        let token = register(&server, "a@x.com").await;

        let note = add_note(&server, &token, "T", "C").await;

        let response = server
            .put(&format!("/edit-note/{}", note.id))
            .authorization_bearer(&token)
            .json(&json!({ "content": "C2" }))
            .await;

        assert_eq!(response.status_code(), 200);

        let updated = response.json::<NoteResponse>().note;
        assert_eq!(updated.title, "T");
        assert_eq!(updated.content, "C2");
        assert!(updated.tags.is_empty());
        assert!(updated.updated_on.is_some());

        let response = server
            .put(&format!("/edit-note/{}", note.id))
            .authorization_bearer(&token)
            .json(&json!({ "tags": ["x"], "isPinned": true }))
            .await;

        let updated = response.json::<NoteResponse>().note;
        assert_eq!(updated.content, "C2");
        assert_eq!(updated.tags, vec!["x"]);
        assert!(updated.is_pinned);
        Ok(())
    }

    #[tokio::test]
    async fn edit_note_is_idempotent_per_field() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;
        let token = register(&server, "a@x.com").await;

        let note = add_note(&server, &token, "T", "C").await;

        for _ in 0..2 {
            let response = server
                .put(&format!("/edit-note/{}", note.id))
                .authorization_bearer(&token)
                .json(&json!({ "title": "T2" }))
                .await;

            let updated = response.json::<NoteResponse>().note;
            assert_eq!(updated.title, "T2");
            assert_eq!(updated.content, "C");
        }
        Ok(())
    }

    #[tokio::test]
    async fn edit_note_rejects_non_boolean_pin() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;
        let token = register(&server, "a@x.com").await;

        let note = add_note(&server, &token, "T", "C").await;

        let response = server
            .put(&format!("/edit-note/{}", note.id))
            .authorization_bearer(&token)
            .json(&json!({ "isPinned": 1 }))
            .await;

        assert_eq!(response.status_code(), 400);
        Ok(())
    }

    #[tokio::test]
    async fn edit_note_not_found() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;
        let token = register(&server, "a@x.com").await;

        let response = server
            .put(&format!("/edit-note/{}", Uuid::new_v4()))
            .authorization_bearer(&token)
            .json(&json!({ "title": "T" }))
            .await;

        assert_eq!(response.status_code(), 404);
        Ok(())
    }

    #[tokio::test]
    async fn get_notes_pinned_first() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;
        let token = register(&server, "a@x.com").await;

        let first = add_note(&server, &token, "first", "1").await;
        let second = add_note(&server, &token, "second", "2").await;
        let third = add_note(&server, &token, "third", "3").await;

        server
            .put(&format!("/update-note-pinned/{}", third.id))
            .authorization_bearer(&token)
            .json(&json!({ "isPinned": true }))
            .await;

        let notes = server
            .get("/get-notes")
            .authorization_bearer(&token)
            .await
            .json::<FindNotesResponse>()
            .notes;

        let ids = notes.iter().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![third.id, first.id, second.id]);

        // unpin moves it back to insertion order
        server
            .put(&format!("/update-note-pinned/{}", third.id))
            .authorization_bearer(&token)
            .json(&json!({ "isPinned": false }))
            .await;

        let notes = server
            .get("/get-notes")
            .authorization_bearer(&token)
            .await
            .json::<FindNotesResponse>()
            .notes;

        let ids = notes.iter().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
        Ok(())
    }

    #[tokio::test]
    async fn update_note_pinned() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;
        let token = register(&server, "a@x.com").await;

        let note = add_note(&server, &token, "T", "C").await;

        let response = server
            .put(&format!("/update-note-pinned/{}", note.id))
            .authorization_bearer(&token)
            .json(&json!({ "isPinned": true }))
            .await;

        assert_eq!(response.status_code(), 200);
        assert!(response.json::<NoteResponse>().note.is_pinned);

        let response = server
            .put(&format!("/update-note-pinned/{}", Uuid::new_v4()))
            .authorization_bearer(&token)
            .json(&json!({ "isPinned": true }))
            .await;

        assert_eq!(response.status_code(), 404);
        Ok(())
    }

    #[tokio::test]
    async fn delete_note() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;
        let token = register(&server, "a@x.com").await;

        let note = add_note(&server, &token, "T", "C").await;

        let response = server
            .delete(&format!("/delete-note/{}", note.id))
            .authorization_bearer(&token)
            .await;

        assert_eq!(response.status_code(), 200);

        let body = response.json::<DeleteNoteResponse>();
        assert!(!body.error);
        assert_eq!(body.message, "Note deleted successfully");

        let notes = server
            .get("/get-notes")
            .authorization_bearer(&token)
            .await
            .json::<FindNotesResponse>()
            .notes;
        assert!(notes.is_empty());

        // second delete of the same id
        let response = server
            .delete(&format!("/delete-note/{}", note.id))
            .authorization_bearer(&token)
            .await;
        assert_eq!(response.status_code(), 404);
        Ok(())
    }

    #[tokio::test]
    async fn notes_are_scoped_to_their_owner() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;

        let token_a = register(&server, "a@x.com").await;
        let token_b = register(&server, "b@x.com").await;

        let note = add_note(&server, &token_a, "T", "C").await;

        let notes = server
            .get("/get-notes")
            .authorization_bearer(&token_b)
            .await
            .json::<FindNotesResponse>()
            .notes;
        assert!(notes.is_empty());

        // cross-user access is indistinguishable from absence
        let response = server
            .put(&format!("/edit-note/{}", note.id))
            .authorization_bearer(&token_b)
            .json(&json!({ "title": "stolen" }))
            .await;
        assert_eq!(response.status_code(), 404);

        let response = server
            .delete(&format!("/delete-note/{}", note.id))
            .authorization_bearer(&token_b)
            .await;
        assert_eq!(response.status_code(), 404);

        let response = server
            .put(&format!("/update-note-pinned/{}", note.id))
            .authorization_bearer(&token_b)
            .json(&json!({ "isPinned": true }))
            .await;
        assert_eq!(response.status_code(), 404);

        // untouched for the owner
        let notes = server
            .get("/get-notes")
            .authorization_bearer(&token_a)
            .await
            .json::<FindNotesResponse>()
            .notes;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "T");
        Ok(())
    }

    #[tokio::test]
    async fn register_login_pin_roundtrip() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;

        let registered = server
            .post("/create-account")
            .json(&json!({ "fullName": "A", "email": "a@x.com", "password": "p" }))
            .await;
        assert_eq!(registered.status_code(), 200);
        assert!(registered.json::<RegisterResponse>().access_token.is_some());

        let login = server
            .post("/login")
            .json(&json!({ "email": "a@x.com", "password": "p" }))
            .await;
        assert_eq!(login.status_code(), 200);

        let token = login.json::<crate::users::LoginResponse>().access_token;

        let note = add_note(&server, &token, "T", "C").await;
        assert!(!note.is_pinned);

        let pinned = server
            .put(&format!("/update-note-pinned/{}", note.id))
            .authorization_bearer(&token)
            .json(&json!({ "isPinned": true }))
            .await
            .json::<NoteResponse>()
            .note;
        assert!(pinned.is_pinned);

        let notes = server
            .get("/get-notes")
            .authorization_bearer(&token)
            .await
            .json::<FindNotesResponse>()
            .notes;

        assert_eq!(notes.len(), 1);
        assert!(notes[0].is_pinned);
        assert_eq!(notes[0].title, "T");
        Ok(())
    }
}
