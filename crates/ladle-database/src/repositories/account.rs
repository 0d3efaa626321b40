//! Account repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ladle_core::account::{Account, CreateAccount};
use ladle_core::error::{AppError, ErrorKind};
use ladle_core::result::AppResult;
use ladle_core::traits::{AccountStore, RotationOutcome};

/// Repository for account CRUD and refresh-token bookkeeping.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by id", e)
            })
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by email", e)
            })
    }

    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE external_id = $1")
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to find account by external id",
                    e,
                )
            })
    }

    async fn create(&self, data: &CreateAccount) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (email, password_hash, display_name, external_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.display_name)
        .bind(&data.external_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("accounts_email_key") => {
                AppError::duplicate("Email already in use".to_string())
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("accounts_external_id_key") =>
            {
                AppError::duplicate("External identity already registered".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create account", e),
        })
    }

    async fn add_refresh_token(&self, id: Uuid, token: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE accounts SET refresh_tokens = array_append(refresh_tokens, $2) WHERE id = $1",
        )
        .bind(id)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to add refresh token", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Account {id} not found")));
        }
        Ok(())
    }

    async fn remove_refresh_token(&self, id: Uuid, token: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE accounts SET refresh_tokens = array_remove(refresh_tokens, $2) \
             WHERE id = $1 AND $2 = ANY(refresh_tokens)",
        )
        .bind(id)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to remove refresh token", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        old: &str,
        new: &str,
    ) -> AppResult<RotationOutcome> {
        // Single conditional UPDATE: the membership check, removal, and
        // append happen in one statement, so two concurrent rotations of
        // the same token cannot both succeed.
        let result = sqlx::query(
            "UPDATE accounts \
             SET refresh_tokens = array_append(array_remove(refresh_tokens, $2), $3) \
             WHERE id = $1 AND $2 = ANY(refresh_tokens)",
        )
        .bind(id)
        .bind(old)
        .bind(new)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to rotate refresh token", e)
        })?;

        if result.rows_affected() > 0 {
            Ok(RotationOutcome::Rotated)
        } else {
            Ok(RotationOutcome::NotPresent)
        }
    }

    async fn revoke_all_refresh_tokens(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE accounts SET refresh_tokens = '{}' \
             WHERE id = $1 AND cardinality(refresh_tokens) > 0",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke refresh tokens", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
