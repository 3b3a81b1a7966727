//! Registration, login and bearer-session lookup.

use anyhow::anyhow;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;
use tracing::{info, warn};

use crate::domain::commands::accounts::{LoginCommand, RegisterCommand, SessionResult};
use crate::domain::error::{TrackerError, TrackerResult, ValidationError};
use crate::domain::models::{NewUser, User};
use crate::storage::{DbConnection, SessionRepository, UserInsert, UserRepository};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 100;

#[derive(Clone)]
pub struct AccountService {
    user_repository: UserRepository,
    session_repository: SessionRepository,
}

impl AccountService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            user_repository: UserRepository::new(db.clone()),
            session_repository: SessionRepository::new(db),
        }
    }

    /// Create an account and sign it in
    pub async fn register(&self, command: RegisterCommand) -> TrackerResult<SessionResult> {
        let name = required(command.name.as_deref());
        let email = required(command.email.as_deref());
        let password = command.password.as_deref().filter(|p| !p.is_empty());
        let (name, email, password) = match (name, email, password) {
            (Some(name), Some(email), Some(password)) => (name, email, password),
            _ => return Err(ValidationError::MissingRegistrationFields.into()),
        };

        if name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong { field: "Name", max: MAX_NAME_LEN }.into());
        }
        if email.chars().count() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong { field: "Email", max: MAX_EMAIL_LEN }.into());
        }

        let new_user = NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
        };

        let user = match self.user_repository.store_user(&new_user).await? {
            UserInsert::Created(user) => user,
            UserInsert::EmailTaken => {
                info!("Registration rejected, email already in use");
                return Err(TrackerError::EmailTaken);
            }
        };

        let token = self.session_repository.create_session(user.id).await?;
        info!("Registered user {}", user.id);
        Ok(SessionResult { token, user })
    }

    pub async fn login(&self, command: LoginCommand) -> TrackerResult<SessionResult> {
        let email = required(command.email.as_deref());
        let password = command.password.as_deref().filter(|p| !p.is_empty());
        let (email, password) = match (email, password) {
            (Some(email), Some(password)) => (email, password),
            _ => return Err(ValidationError::MissingCredentials.into()),
        };

        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(TrackerError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(TrackerError::InvalidCredentials);
        }

        let token = self.session_repository.create_session(user.id).await?;
        info!("User {} logged in", user.id);
        Ok(SessionResult { token, user })
    }

    /// End a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> TrackerResult<()> {
        if self.session_repository.delete_session(token).await? {
            info!("Session ended");
        }
        Ok(())
    }

    /// Resolve a bearer token to its user id
    pub async fn authenticate(&self, token: &str) -> TrackerResult<i64> {
        self.session_repository
            .find_user_id(token)
            .await?
            .ok_or(TrackerError::Unauthorized)
    }

    pub async fn user(&self, user_id: i64) -> TrackerResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(TrackerError::Unauthorized)
    }
}

fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn hash_password(password: &str) -> TrackerResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password hash is unreadable: {}", e);
            false
        }
    }
}
