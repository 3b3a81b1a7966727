use anyhow::Result;
use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::models::{NewUser, User};
use crate::storage::connection::DbConnection;

/// Outcome of storing a new user
#[derive(Debug, Clone, PartialEq)]
pub enum UserInsert {
    Created(User),
    EmailTaken,
}

/// Repository for user accounts
#[derive(Clone)]
pub struct UserRepository {
    db: DbConnection,
}

impl UserRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a user. The UNIQUE email constraint decides races between
    /// concurrent registrations.
    pub async fn store_user(&self, user: &NewUser) -> Result<UserInsert> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .execute(self.db.pool())
        .await;

        match result {
            Ok(done) => Ok(UserInsert::Created(User {
                id: done.last_insert_rowid(),
                name: user.name.clone(),
                email: user.email.clone(),
                password_hash: user.password_hash.clone(),
            })),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Ok(UserInsert::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    fn map_row(row: &SqliteRow) -> Result<User> {
        Ok(User {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}
