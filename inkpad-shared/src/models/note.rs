/// Note model and database operations
///
/// Notes belong to exactly one user, recorded in `owner_id` at creation.
/// The column carries no foreign key: ownership is an application-level
/// rule, and notes of a deleted user simply go dark.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE notes (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL,
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL,
///     tag VARCHAR(100) NOT NULL DEFAULT 'General',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Fallback tag applied when a note is created without one
pub const DEFAULT_TAG: &str = "General";

/// Note record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Note {
    /// Unique note id, generated by the store
    pub id: Uuid,

    /// Id of the owning user; set from the authenticated identity at
    /// creation, never from client input
    pub owner_id: Uuid,

    /// Note title
    pub title: String,

    /// Note body
    pub description: String,

    /// Free-form tag, defaults to "General"
    pub tag: String,

    /// When the note was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new note
#[derive(Debug, Clone)]
pub struct CreateNote {
    /// Owning user id (from the authenticated identity)
    pub owner_id: Uuid,

    /// Note title
    pub title: String,

    /// Note body
    pub description: String,

    /// Tag; `None` falls back to [`DEFAULT_TAG`]
    pub tag: Option<String>,
}

/// Input for updating an existing note
///
/// Partial-update semantics: only `Some` fields are written, omitted
/// fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateNote {
    /// New title
    pub title: Option<String>,

    /// New body
    pub description: Option<String>,

    /// New tag
    pub tag: Option<String>,
}

impl UpdateNote {
    /// Returns true if no field would be written
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.tag.is_none()
    }
}

impl Note {
    /// Returns true if the given identity owns this note
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Creates a new note owned by `data.owner_id`
    pub async fn create(pool: &PgPool, data: CreateNote) -> Result<Self, sqlx::Error> {
        let tag = data.tag.unwrap_or_else(|| DEFAULT_TAG.to_string());

        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (owner_id, title, description, tag)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, title, description, tag, created_at
            "#,
        )
        .bind(data.owner_id)
        .bind(data.title)
        .bind(data.description)
        .bind(tag)
        .fetch_one(pool)
        .await?;

        Ok(note)
    }

    /// Finds a note by id, `None` if absent
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, owner_id, title, description, tag, created_at
            FROM notes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Lists all notes owned by the given user, newest first
    pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, owner_id, title, description, tag, created_at
            FROM notes
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(notes)
    }

    /// Updates a note, writing only the fields present in `data`
    ///
    /// Returns the updated note, or `None` if no note has that id.
    /// Ownership is the caller's check; this is a plain store write.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateNote,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.is_empty() {
            // Nothing to write; report current state
            return Self::find_by_id(pool, id).await;
        }

        let mut assignments: Vec<String> = Vec::new();
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            assignments.push(format!("title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            assignments.push(format!("description = ${}", bind_count));
        }
        if data.tag.is_some() {
            bind_count += 1;
            assignments.push(format!("tag = ${}", bind_count));
        }

        let query = format!(
            "UPDATE notes SET {} WHERE id = $1 RETURNING id, owner_id, title, description, tag, created_at",
            assignments.join(", ")
        );

        let mut q = sqlx::query_as::<_, Note>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(tag) = data.tag {
            q = q.bind(tag);
        }

        let note = q.fetch_optional(pool).await?;

        Ok(note)
    }

    /// Deletes a note by id, returning the removed record
    ///
    /// `None` means there was nothing to delete.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            DELETE FROM notes
            WHERE id = $1
            RETURNING id, owner_id, title, description, tag, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_note(owner_id: Uuid) -> Note {
        Note {
            id: Uuid::new_v4(),
            owner_id,
            title: "Shop".to_string(),
            description: "Buy milk".to_string(),
            tag: DEFAULT_TAG.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_ownership_check() {
        let owner = Uuid::new_v4();
        let note = sample_note(owner);

        assert!(note.is_owned_by(owner));
        assert!(!note.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn test_update_note_is_empty() {
        assert!(UpdateNote::default().is_empty());

        let update = UpdateNote {
            tag: Some("Work".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_note_serializes_owner() {
        let note = sample_note(Uuid::new_v4());
        let json = serde_json::to_value(&note).unwrap();

        assert_eq!(json["title"], "Shop");
        assert_eq!(json["tag"], "General");
        assert_eq!(json["owner_id"], note.owner_id.to_string());
    }
}
