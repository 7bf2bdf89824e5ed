/// Note endpoints
///
/// Ownership-checked CRUD over notes. Every route runs behind the token
/// guard; the owner recorded on a note at creation is the only identity
/// allowed to see, change, or delete it.
///
/// # Endpoints
///
/// - `GET /api/notes/fetch-all-notes` - list the caller's notes
/// - `POST /api/notes/add-note` - create a note owned by the caller
/// - `PUT /api/notes/update-note/:id` - partial update
/// - `DELETE /api/notes/delete-note/:id` - delete, returning the record

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use inkpad_shared::{
    auth::guard::AuthContext,
    models::note::{CreateNote, Note, UpdateNote},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Note creation request
///
/// `owner` is never part of the request body: it comes from the verified
/// token.
#[derive(Debug, Deserialize, Validate)]
pub struct AddNoteRequest {
    /// Note title
    #[validate(length(min = 4, message = "Enter a valid title"))]
    pub title: String,

    /// Note body
    #[validate(length(min = 6, message = "Enter a valid description"))]
    pub description: String,

    /// Optional tag; defaults to "General" when omitted
    pub tag: Option<String>,
}

/// Partial note update request
#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    /// New title
    pub title: Option<String>,

    /// New body
    pub description: Option<String>,

    /// New tag
    pub tag: Option<String>,
}

/// Single-note envelope
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    /// Human-readable outcome
    pub message: String,

    /// The note record
    pub note: Note,
}

/// List all notes owned by the authenticated user
///
/// Returns a bare array, newest first. Another user's notes can never
/// appear here: the store query is scoped to the verified identity.
pub async fn fetch_all_notes(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Note>>> {
    let notes = Note::list_by_owner(&state.db, auth.user_id).await?;

    Ok(Json(notes))
}

/// Create a note owned by the authenticated user
///
/// # Endpoint
///
/// ```text
/// POST /api/notes/add-note
/// auth-token: <token>
/// Content-Type: application/json
///
/// { "title": "Shop", "description": "Buy milk" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `401 Unauthorized`: missing or invalid token
pub async fn add_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<AddNoteRequest>,
) -> ApiResult<(StatusCode, Json<NoteResponse>)> {
    req.validate()?;

    let note = Note::create(
        &state.db,
        CreateNote {
            owner_id: auth.user_id,
            title: req.title,
            description: req.description,
            tag: req.tag,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(NoteResponse {
            message: "Note added successfully".to_string(),
            note,
        }),
    ))
}

/// Partially update a note
///
/// Fields absent from the request are untouched, not cleared.
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid token
/// - `403 Forbidden`: the note belongs to someone else
/// - `404 Not Found`: no note with that id
pub async fn update_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNoteRequest>,
) -> ApiResult<Json<NoteResponse>> {
    let existing = Note::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    if !existing.is_owned_by(auth.user_id) {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }

    let note = Note::update(
        &state.db,
        id,
        UpdateNote {
            title: req.title,
            description: req.description,
            tag: req.tag,
        },
    )
    .await?
    // Lost a race with a concurrent delete
    .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    Ok(Json(NoteResponse {
        message: "Note updated successfully".to_string(),
        note,
    }))
}

/// Delete a note, returning the deleted record
///
/// The id is shape-checked before any store access.
///
/// # Errors
///
/// - `400 Bad Request`: malformed note id
/// - `401 Unauthorized`: missing or invalid token
/// - `403 Forbidden`: the note belongs to someone else
/// - `404 Not Found`: no note with that id
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<NoteResponse>> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::InvalidId("Invalid note id".to_string()))?;

    let existing = Note::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    if !existing.is_owned_by(auth.user_id) {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }

    let note = Note::delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    Ok(Json(NoteResponse {
        message: "Note deleted successfully".to_string(),
        note,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_note_request_validation() {
        let ok = AddNoteRequest {
            title: "Shop".to_string(),
            description: "Buy milk".to_string(),
            tag: None,
        };
        assert!(ok.validate().is_ok());

        let short_title = AddNoteRequest {
            title: "Hi".to_string(),
            description: "Buy milk".to_string(),
            tag: None,
        };
        assert!(short_title.validate().is_err());

        let short_description = AddNoteRequest {
            title: "Shop".to_string(),
            description: "milk".to_string(),
            tag: None,
        };
        assert!(short_description.validate().is_err());
    }

    #[test]
    fn test_malformed_note_id_is_rejected() {
        assert!(Uuid::parse_str("not-a-uuid").is_err());
        assert!(Uuid::parse_str("123").is_err());
        assert!(Uuid::parse_str(&Uuid::new_v4().to_string()).is_ok());
    }
}
