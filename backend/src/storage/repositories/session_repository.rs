use anyhow::Result;
use uuid::Uuid;

use crate::storage::connection::DbConnection;

/// Repository for login sessions. A session is an opaque token mapped to a user.
#[derive(Clone)]
pub struct SessionRepository {
    db: DbConnection,
}

impl SessionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Create a session for a user and return its token
    pub async fn create_session(&self, user_id: i64) -> Result<String> {
        let token = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO sessions (token, user_id) VALUES (?, ?)")
            .bind(&token)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(token)
    }

    pub async fn find_user_id(&self, token: &str) -> Result<Option<i64>> {
        let user_id = sqlx::query_scalar("SELECT user_id FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(user_id)
    }

    /// Returns true if a session was removed
    pub async fn delete_session(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::create_test_user;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let user_id = create_test_user(&db, "a@example.com").await;
        let repo = SessionRepository::new(db);

        let token = repo.create_session(user_id).await.unwrap();
        assert_eq!(repo.find_user_id(&token).await.unwrap(), Some(user_id));

        assert!(repo.delete_session(&token).await.unwrap());
        assert_eq!(repo.find_user_id(&token).await.unwrap(), None);
        assert!(!repo.delete_session(&token).await.unwrap(), "second delete finds nothing");
    }

    #[tokio::test]
    async fn test_tokens_are_unique_per_login() {
        let db = DbConnection::init_test().await.unwrap();
        let user_id = create_test_user(&db, "a@example.com").await;
        let repo = SessionRepository::new(db);

        let first = repo.create_session(user_id).await.unwrap();
        let second = repo.create_session(user_id).await.unwrap();
        assert_ne!(first, second);
    }
}
