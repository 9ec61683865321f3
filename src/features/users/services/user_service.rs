use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::models::{CreateUser, UpdateProfile, User};

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, \
     street, city, zip, country, latitude, longitude, created_at, updated_at";

/// Service for user account operations
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user account
    pub async fn create(&self, data: &CreateUser) -> Result<User> {
        let sql = format!(
            "INSERT INTO users \
                 (email, password_hash, first_name, last_name, street, city, zip, country, latitude, longitude) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&data.email)
            .bind(&data.password_hash)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(&data.street)
            .bind(&data.city)
            .bind(&data.zip)
            .bind(&data.country)
            .bind(data.latitude)
            .bind(data.longitude)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db) = e {
                    if db.is_unique_violation() {
                        return AppError::Conflict("Email is already registered".to_string());
                    }
                }
                tracing::error!("Failed to create user: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Created user: {} ({})", user.id, user.email);

        Ok(user)
    }

    /// Find a user by email, used during login
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to find user by email: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<User> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get user: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Replace the user's profile (names and address, with fresh coordinates)
    pub async fn update_profile(&self, id: Uuid, data: &UpdateProfile) -> Result<User> {
        let sql = format!(
            "UPDATE users \
             SET first_name = $2, last_name = $3, street = $4, city = $5, zip = $6, \
                 country = $7, latitude = $8, longitude = $9, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(&data.street)
            .bind(&data.city)
            .bind(&data.zip)
            .bind(&data.country)
            .bind(data.latitude)
            .bind(data.longitude)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update user profile: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        tracing::info!("Updated profile for user: {}", id);
        Ok(user)
    }

    /// Delete a user account. The user's own requests go with it (FK
    /// cascade); requests they accepted lose the acceptor reference.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete user: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        tracing::info!("Deleted user: {}", id);
        Ok(())
    }
}
