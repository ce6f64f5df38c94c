//! Notes and their owners.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::db::connection::DbConnection;
use crate::prelude::*;
use crate::schema::notes;

/// A stored note.
///
/// Field order is the serialized order.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = notes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Note {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub user_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A note about to be created.
#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = notes)]
pub struct NoteCreate {
    pub title: String,
    pub content: String,
    pub user_id: i32,
}

/// Replacement title and content for an existing note.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = notes)]
struct NoteChanges<'a> {
    title: &'a str,
    content: &'a str,
    updated_at: NaiveDateTime,
}

impl NoteCreate {
    pub fn save(self, connection: &DbConnection) -> Result<Note> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::insert_into(notes::table)
            .values(&self)
            .returning(Note::as_returning())
            .get_result(conn)?)
    }
}

impl Note {
    pub fn fetch_by_id(target: i32, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(notes::table
            .find(target)
            .select(Note::as_select())
            .first(conn)
            .optional()?)
    }

    /// All notes owned by `owner`, oldest first.
    pub fn fetch_by_owner(owner: i32, connection: &DbConnection) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(notes::table
            .filter(notes::user_id.eq(owner))
            .order(notes::id.asc())
            .select(Note::as_select())
            .load(conn)?)
    }

    /// Replaces title and content, bumping `updated_at`. The owner never changes.
    pub fn update(&self, title: &str, content: &str, connection: &DbConnection) -> Result<Self> {
        let conn = &mut connection.pool.get()?;

        let changes = NoteChanges {
            title,
            content,
            updated_at: Utc::now().naive_utc(),
        };
        Ok(diesel::update(self)
            .set(&changes)
            .returning(Note::as_returning())
            .get_result(conn)?)
    }

    pub fn delete(self, connection: &DbConnection) -> Result<()> {
        let conn = &mut connection.pool.get()?;

        diesel::delete(&self).execute(conn)?;
        Ok(())
    }
}
