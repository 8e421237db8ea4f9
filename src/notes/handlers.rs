use rusqlite::{params, Row};
use uuid::Uuid;

use crate::{ctx::BaseParams, db, errors::Error, Result};

use super::{CreateNote, Note, UpdateNote};

impl<'a> TryFrom<&Row<'a>> for Note {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> std::result::Result<Self, Self::Error> {
        let tags: String = row.get(3)?;
        let tags = serde_json::from_str(&tags)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, e.into()))?;

        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            tags,
            is_pinned: row.get(4)?,
            user_id: row.get(5)?,
            created_on: row.get(6)?,
            updated_on: row.get(7)?,
        })
    }
}

fn tags_json(tags: Vec<String>) -> Result<String> {
    serde_json::to_string(&tags).map_err(|e| Error::Unexpected(e.to_string()))
}

pub async fn find_notes(BaseParams { db, ctx }: BaseParams) -> Result<Vec<Note>> {
    let user_id = ctx.require_user_id()?;

    db.call(move |conn| {
        // rowid tiebreak keeps insertion order within each pin group
        let notes = conn
            .prepare(
                "SELECT id, title, content, tags, is_pinned, user_id, created_on, updated_on FROM notes
                WHERE user_id = ?
                ORDER BY is_pinned DESC, rowid ASC",
            )?
            .query_map(params![user_id], |row| Note::try_from(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(notes)
    })
    .await
    .map_err(db::Error::from)
    .map_err(Error::from)
}

pub async fn create_note(
    CreateNote { title, content, tags }: CreateNote,
    BaseParams { db, ctx }: BaseParams,
) -> Result<Note> {
    let user_id = ctx.require_user_id()?;

    let title = title.filter(|v| !v.is_empty());
    let content = content.filter(|v| !v.is_empty());

    let (Some(title), Some(content)) = (title, content) else {
        return Err(Error::Validation("Title and content are required".into()));
    };

    let tags = tags_json(tags.unwrap_or_default())?;

    db.call(move |conn| {
        conn.query_row(
            r#"INSERT INTO notes (title, content, tags, user_id) VALUES (?, ?, ?, ?)
            RETURNING id, title, content, tags, is_pinned, user_id, created_on, updated_on"#,
            params![title, content, tags, user_id],
            |row| Note::try_from(row),
        )
        .map_err(|e| e.into())
    })
    .await
    .map_err(db::Error::from)
    .map_err(Error::from)
}

pub async fn update_note(
    note_id: Uuid,
    UpdateNote {
        title,
        content,
        tags,
        is_pinned,
    }: UpdateNote,
    BaseParams { db, ctx }: BaseParams,
) -> Result<Note> {
    let user_id = ctx.require_user_id()?;

    let tags = match tags {
        Some(tags) => Some(tags_json(tags)?),
        None => None,
    };

    db.call(move |conn| {
        conn.query_row(
            r#"UPDATE notes
            SET title = coalesce(?, title),
                content = coalesce(?, content),
                tags = coalesce(?, tags),
                is_pinned = coalesce(?, is_pinned),
                updated_on = ?
            WHERE id = ? AND user_id = ?
            RETURNING id, title, content, tags, is_pinned, user_id, created_on, updated_on"#,
            params![title, content, tags, is_pinned, chrono::Utc::now(), note_id, user_id],
            |row| Note::try_from(row),
        )
        .map_err(|e| e.into())
    })
    .await
    .map_err(db::Error::from)
    .map_err(|e| db::Error::not_found_message(e, "Note not found"))
    .map_err(Error::from)
}

pub async fn set_pinned(note_id: Uuid, is_pinned: bool, BaseParams { db, ctx }: BaseParams) -> Result<Note> {
    let user_id = ctx.require_user_id()?;

    db.call(move |conn| {
        conn.query_row(
            r#"UPDATE notes SET is_pinned = ?, updated_on = ?
            WHERE id = ? AND user_id = ?
            RETURNING id, title, content, tags, is_pinned, user_id, created_on, updated_on"#,
            params![is_pinned, chrono::Utc::now(), note_id, user_id],
            |row| Note::try_from(row),
        )
        .map_err(|e| e.into())
    })
    .await
    .map_err(db::Error::from)
    .map_err(|e| db::Error::not_found_message(e, "Note not found"))
    .map_err(Error::from)
}

pub async fn delete_note(note_id: Uuid, BaseParams { db, ctx }: BaseParams) -> Result<Note> {
    let user_id = ctx.require_user_id()?;

    db.call(move |conn| {
        conn.query_row(
            r#"DELETE FROM notes
            WHERE id = ? AND user_id = ?
            RETURNING id, title, content, tags, is_pinned, user_id, created_on, updated_on"#,
            params![note_id, user_id],
            |row| Note::try_from(row),
        )
        .map_err(|e| e.into())
    })
    .await
    .map_err(db::Error::from)
    .map_err(|e| db::Error::not_found_message(e, "Note not found"))
    .map_err(Error::from)
}
