/// Admin model and database operations
///
/// Admin accounts have no self-service registration path; they are seeded at
/// startup from configuration. Admin passwords are hashed with Argon2id
/// exactly like user passwords and verified through the same code path.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE admins (
///     id BIGSERIAL PRIMARY KEY,
///     email TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Admin model representing an administrator account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Admin {
    /// Unique admin ID
    pub id: i64,

    /// Email address, unique across all admins
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// An admin row with the password hash stripped, safe to return to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicAdmin {
    /// Unique admin ID
    pub id: i64,

    /// Email address
    pub email: String,
}

impl From<Admin> for PublicAdmin {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
        }
    }
}

impl Admin {
    /// Finds an admin by email address
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM admins
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(admin)
    }

    /// Inserts an admin account if no row exists for the email
    ///
    /// Used by the startup seed; an existing row is left untouched so a
    /// changed `ADMIN_PASSWORD` does not silently rotate credentials.
    ///
    /// # Returns
    ///
    /// True if a row was inserted.
    pub async fn seed(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO admins (email, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_admin_strips_hash() {
        let admin = Admin {
            id: 1,
            email: "admin@lmsvision.test".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
        };

        let public = PublicAdmin::from(admin);
        let json = serde_json::to_value(&public).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["email"], "admin@lmsvision.test");
        assert!(json.get("password_hash").is_none());
    }
}
