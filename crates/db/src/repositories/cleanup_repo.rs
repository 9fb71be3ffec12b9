//! Deletion-only repositories for the tables swept by account deletion.
//!
//! The CRUD surfaces for cars, bookings, and reviews live outside this
//! service; the auth core only ever deletes rows belonging to an account
//! being destroyed. Every method returns the number of rows removed --
//! zero is a normal outcome (idempotent cleanup).

use motorshare_core::types::UserId;
use sqlx::PgPool;

pub struct BookingRepo;

impl BookingRepo {
    /// Delete all bookings where the user is the renter.
    ///
    /// Bookings against the user's own cars are removed by the FK cascade
    /// when [`CarRepo::delete_for_owner`] runs.
    pub async fn delete_for_renter(pool: &PgPool, user_id: UserId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE renter_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        tracing::debug!(user_id = %user_id, rows = result.rows_affected(), "Deleted renter bookings");
        Ok(result.rows_affected())
    }
}

pub struct ReviewRepo;

impl ReviewRepo {
    /// Delete all reviews authored by the user.
    pub async fn delete_for_reviewer(pool: &PgPool, user_id: UserId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE reviewer_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        tracing::debug!(user_id = %user_id, rows = result.rows_affected(), "Deleted authored reviews");
        Ok(result.rows_affected())
    }
}

pub struct CarRepo;

impl CarRepo {
    /// Delete all cars owned by the user (cascades their bookings and reviews).
    pub async fn delete_for_owner(pool: &PgPool, user_id: UserId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cars WHERE owner_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        tracing::debug!(user_id = %user_id, rows = result.rows_affected(), "Deleted owned cars");
        Ok(result.rows_affected())
    }
}

pub struct SessionRepo;

impl SessionRepo {
    /// Delete all session rows for the user.
    pub async fn delete_for_user(pool: &PgPool, user_id: UserId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        tracing::debug!(user_id = %user_id, rows = result.rows_affected(), "Deleted session rows");
        Ok(result.rows_affected())
    }
}
