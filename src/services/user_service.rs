use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{self, Claims};
use crate::config::SecurityConfig;
use crate::database::{DocumentStore, Filter, Repository};
use crate::models::User;
use crate::validation::{Credentials, Registration};

use super::{on_conflict, ServiceError};

/// Registration, login and the out-of-band admin flag
pub struct UserService {
    users: Repository<User>,
    security: SecurityConfig,
}

impl UserService {
    pub fn new(store: Arc<dyn DocumentStore>, security: SecurityConfig) -> Self {
        Self {
            users: Repository::new(store),
            security,
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        Ok(self.users.find_one(&Filter::eq("email", email)).await?)
    }

    pub async fn register(&self, registration: Registration) -> Result<User, ServiceError> {
        if self.find_by_email(&registration.email).await?.is_some() {
            return Err(ServiceError::AlreadyRegistered);
        }

        let security = self.security.clone();
        let password = registration.password;
        // bcrypt is CPU bound; keep it off the async workers
        let hash = tokio::task::spawn_blocking(move || auth::hash_password(&password, &security)).await??;

        let user = User {
            id: Uuid::new_v4(),
            name: registration.name,
            email: registration.email,
            password: hash,
            is_admin: false,
        };
        // the store's unique email key settles concurrent registrations
        self.users
            .insert(&user)
            .await
            .map_err(|e| on_conflict(e, || ServiceError::AlreadyRegistered))?;

        info!("Registered user {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Returns a signed token and the authenticated user
    pub async fn authenticate(&self, credentials: Credentials) -> Result<(String, User), ServiceError> {
        let user = self
            .find_by_email(&credentials.email)
            .await?
            .ok_or(ServiceError::InvalidEmail)?;

        let hash = user.password.clone();
        let password = credentials.password;
        let valid = tokio::task::spawn_blocking(move || auth::verify_password(&password, &hash)).await?;

        if !valid {
            warn!("Rejected login for user {}: invalid password", user.id);
            return Err(ServiceError::InvalidPassword);
        }

        let token = auth::generate_token(&Claims::for_user(&user, &self.security), &self.security)?;
        Ok((token, user))
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<User, ServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
    }

    /// Admin rights are granted outside the HTTP surface
    pub async fn set_admin(&self, email: &str, is_admin: bool) -> Result<User, ServiceError> {
        let mut user = self
            .find_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No user registered with email {}", email)))?;

        user.is_admin = is_admin;
        self.users.save(&user).await?;

        info!("User {} admin flag set to {}", user.email, is_admin);
        Ok(user)
    }
}
