//! Note access scoped to the authenticated user.
//!
//! Every operation hangs off [`Ctx`], so a note can only be reached through a
//! resolved identity. Addressing another user's note is [`Error::ApiForbidden`];
//! a note that does not exist is [`Error::NoteNotFound`].

use notes_models::{
    db::connection::DbConnection,
    note::{Note, NoteCreate},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::prelude::*;
use crate::validation::Validator;

/// Body of `POST /notes` and `PUT /notes/{id}`.
///
/// Any owner supplied by the client is ignored.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NotePayload {
    pub title: String,
    pub content: String,
}

impl NotePayload {
    fn validate(&self) -> Result<()> {
        let mut validator = Validator::new();
        validator.required("title", self.title.trim());
        validator.required("content", self.content.trim());
        validator.finish()
    }
}

impl Ctx {
    /// All notes owned by the caller.
    pub fn notes(&self, connection: &DbConnection) -> Result<Vec<Note>> {
        Ok(Note::fetch_by_owner(self.user_id(), connection)?)
    }

    /// The note `id`, provided the caller owns it.
    pub fn note(&self, id: i32, connection: &DbConnection) -> Result<Note> {
        let note = Note::fetch_by_id(id, connection)?.ok_or(Error::NoteNotFound)?;
        if note.user_id != self.user_id() {
            warn!("User {} denied access to note {}", self.user_id(), note.id);
            return Err(Error::ApiForbidden);
        }
        Ok(note)
    }

    /// Creates a note owned by the caller.
    pub fn create_note(&self, payload: NotePayload, connection: &DbConnection) -> Result<Note> {
        payload.validate()?;
        let note = NoteCreate {
            title: payload.title,
            content: payload.content,
            user_id: self.user_id(),
        }
        .save(connection)?;

        info!("User {} created note {}", self.user_id(), note.id);
        Ok(note)
    }

    /// Replaces title and content of a note the caller owns.
    pub fn update_note(
        &self,
        id: i32,
        payload: NotePayload,
        connection: &DbConnection,
    ) -> Result<Note> {
        let note = self.note(id, connection)?;
        payload.validate()?;
        Ok(note.update(&payload.title, &payload.content, connection)?)
    }

    /// Deletes a note the caller owns.
    pub fn delete_note(&self, id: i32, connection: &DbConnection) -> Result<()> {
        let note = self.note(id, connection)?;
        note.delete(connection)?;
        info!("User {} deleted note {}", self.user_id(), id);
        Ok(())
    }
}
