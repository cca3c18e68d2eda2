//! Postgres implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use mz_core::domain::entities::user::User;
use mz_core::errors::DomainError;
use mz_core::repositories::UserRepository;

/// Postgres implementation of UserRepository
pub struct PgUserRepository {
    /// Database connection pool
    pool: PgPool,
}

const USER_COLUMNS: &str = r#"
    id, email, password_hash, name, phone, is_email_verified,
    otp_hash, otp_expires_at, otp_attempts,
    reset_token_hash, reset_token_expires_at,
    created_at, updated_at
"#;

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        let read = |e: sqlx::Error| DomainError::Database {
            message: format!("Failed to read user row: {}", e),
        };

        Ok(User {
            id: row.try_get("id").map_err(read)?,
            email: row.try_get("email").map_err(read)?,
            password_hash: row.try_get("password_hash").map_err(read)?,
            name: row.try_get("name").map_err(read)?,
            phone: row.try_get("phone").map_err(read)?,
            is_email_verified: row.try_get("is_email_verified").map_err(read)?,
            otp_hash: row.try_get("otp_hash").map_err(read)?,
            otp_expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("otp_expires_at")
                .map_err(read)?,
            otp_attempts: row.try_get("otp_attempts").map_err(read)?,
            reset_token_hash: row.try_get("reset_token_hash").map_err(read)?,
            reset_token_expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("reset_token_expires_at")
                .map_err(read)?,
            created_at: row.try_get("created_at").map_err(read)?,
            updated_at: row.try_get("updated_at").map_err(read)?,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 LIMIT 1"
        );

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find user by email: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 LIMIT 1");

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find user by id: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, password_hash, name, phone, is_email_verified,
                otp_hash, otp_expires_at, otp_attempts,
                reset_token_hash, reset_token_expires_at,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#;

        sqlx::query(query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.name)
            .bind(&user.phone)
            .bind(user.is_email_verified)
            .bind(&user.otp_hash)
            .bind(user.otp_expires_at)
            .bind(user.otp_attempts)
            .bind(&user.reset_token_hash)
            .bind(user.reset_token_expires_at)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                // users.email carries a unique index
                if e.as_database_error()
                    .map_or(false, |db| db.is_unique_violation())
                {
                    DomainError::Validation {
                        message: "Email already registered".to_string(),
                    }
                } else {
                    DomainError::Database {
                        message: format!("Failed to create user: {}", e),
                    }
                }
            })?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                email = $2,
                password_hash = $3,
                name = $4,
                phone = $5,
                is_email_verified = $6,
                otp_hash = $7,
                otp_expires_at = $8,
                otp_attempts = $9,
                reset_token_hash = $10,
                reset_token_expires_at = $11,
                updated_at = $12
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.name)
            .bind(&user.phone)
            .bind(user.is_email_verified)
            .bind(&user.otp_hash)
            .bind(user.otp_expires_at)
            .bind(user.otp_attempts)
            .bind(&user.reset_token_hash)
            .bind(user.reset_token_expires_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to update user: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("User with id {}", user.id),
            });
        }

        Ok(user)
    }
}
