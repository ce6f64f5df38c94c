//! Registered users and their credentials.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::db::connection::DbConnection;
use crate::prelude::*;
use crate::schema::users;

/// A registered user.
///
/// Deliberately not `Serialize`: the password hash never leaves the store
/// through this type.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub hash: String,
    pub created_at: NaiveDateTime,
}

/// A user about to be registered.
#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = users)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub hash: String,
}

impl UserCreate {
    /// Inserts the user and returns the stored row.
    ///
    /// A duplicate username or email fails with a unique violation, see
    /// [`Error::is_unique_violation`].
    pub fn save(self, connection: &DbConnection) -> Result<User> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::insert_into(users::table)
            .values(&self)
            .returning(User::as_returning())
            .get_result(conn)?)
    }
}

impl User {
    pub fn fetch_by_id(target: i32, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(users::table
            .find(target)
            .select(User::as_select())
            .first(conn)
            .optional()?)
    }

    pub fn fetch_by_email(target: &str, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(users::table
            .filter(users::email.eq(target))
            .select(User::as_select())
            .first(conn)
            .optional()?)
    }

    /// Whether any user already holds `username` or `email`.
    pub fn is_taken(username: &str, email: &str, connection: &DbConnection) -> Result<bool> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::select(diesel::dsl::exists(
            users::table.filter(users::username.eq(username).or(users::email.eq(email))),
        ))
        .get_result(conn)?)
    }
}
