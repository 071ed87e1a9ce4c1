//! Account operations: registration and credential checks.

use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{Engine, EngineError, ResultEngine, User, normalize_name, users};

impl Engine {
    /// Register a new (non-admin) user.
    ///
    /// The username is trimmed before lookup; an existing username fails
    /// with [`EngineError::DuplicateUsername`].
    pub async fn register_user(&self, username: &str, password: &str) -> ResultEngine<User> {
        let username = normalize_name(username, "user")?;
        if password.is_empty() {
            return Err(EngineError::InvalidName(
                "password must not be empty".to_string(),
            ));
        }

        if users::Entity::find_by_id(username.clone())
            .one(&self.database)
            .await?
            .is_some()
        {
            return Err(EngineError::DuplicateUsername(username));
        }

        let model = users::ActiveModel {
            username: ActiveValue::Set(username),
            password: ActiveValue::Set(users::password_digest(password)),
            is_admin: ActiveValue::Set(false),
        };
        let model = model.insert(&self.database).await?;
        Ok(model.into())
    }

    /// Verify a username/password pair.
    ///
    /// The username goes through the same normalization as registration,
    /// so the stored and presented forms always compare equal. Unknown
    /// usernames and wrong passwords both fail with
    /// [`EngineError::InvalidCredentials`].
    pub async fn verify_credentials(&self, username: &str, password: &str) -> ResultEngine<User> {
        let Ok(username) = normalize_name(username, "user") else {
            return Err(EngineError::InvalidCredentials);
        };
        let model = users::Entity::find_by_id(username)
            .one(&self.database)
            .await?
            .ok_or(EngineError::InvalidCredentials)?;

        if !users::verify_password(password, &model.password) {
            return Err(EngineError::InvalidCredentials);
        }
        Ok(model.into())
    }

    /// Look up a user by username (normalized like registration).
    pub async fn find_user(&self, username: &str) -> ResultEngine<Option<User>> {
        let Ok(username) = normalize_name(username, "user") else {
            return Ok(None);
        };
        let model = users::Entity::find_by_id(username)
            .one(&self.database)
            .await?;
        Ok(model.map(Into::into))
    }

    /// Ensure an administrator account exists, creating it if missing.
    ///
    /// Used by first-run seeding. An existing user keeps its stored
    /// credential; only the admin flag is guaranteed.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> ResultEngine<User> {
        let username = normalize_name(username, "user")?;

        if let Some(model) = users::Entity::find_by_id(username.clone())
            .one(&self.database)
            .await?
        {
            if model.is_admin {
                return Ok(model.into());
            }
            let mut active: users::ActiveModel = model.into();
            active.is_admin = ActiveValue::Set(true);
            let model = active.update(&self.database).await?;
            return Ok(model.into());
        }

        let model = users::ActiveModel {
            username: ActiveValue::Set(username),
            password: ActiveValue::Set(users::password_digest(password)),
            is_admin: ActiveValue::Set(true),
        };
        let model = model.insert(&self.database).await?;
        Ok(model.into())
    }
}
