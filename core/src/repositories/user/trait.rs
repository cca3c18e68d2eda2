//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Contract for user account persistence.
///
/// Emails are stored normalized (trimmed, lowercased); callers are expected
/// to normalize before lookup.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Finds a user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Persists a new user, failing on duplicate email
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persists changes to an existing user
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
