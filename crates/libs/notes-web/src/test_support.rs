use notes_auth::secret_hash::generate_secret_hash;
use notes_models::{
    db::{config::DbConfig, connection::DbConnection},
    user::UserCreate,
};

pub fn connection() -> DbConnection {
    DbConnection::new(&DbConfig::in_memory())
        .and_then(DbConnection::setup)
        .expect("in-memory database")
}

/// Stores `name` with email `{name}@x.com`; returns the user id.
pub fn register(conn: &DbConnection, name: &str, password: &str) -> i32 {
    UserCreate {
        username: name.to_string(),
        email: format!("{name}@x.com"),
        hash: generate_secret_hash(password).expect("hash"),
    }
    .save(conn)
    .expect("user")
    .id
}
