use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::accounts::repo_types::Account;

const ACCOUNT_COLUMNS: &str =
    "id, name, email, password_hash, category, role, is_verified, otp, otp_expire, created_at";

impl Account {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(account)
    }

    /// Admin login accepts either the display name or the email.
    pub async fn find_by_name_or_email(db: &PgPool, who: &str) -> anyhow::Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE name = $1 OR email = $1"
        ))
        .bind(who)
        .fetch_optional(db)
        .await?;
        Ok(account)
    }

    /// Insert a new account. `None` means another request won the
    /// insert for the same email; the unique constraint is what makes
    /// concurrent signups safe.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        category: &str,
        is_verified: bool,
        otp: Option<&str>,
        otp_expire: Option<OffsetDateTime>,
    ) -> anyhow::Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts (name, email, password_hash, category, is_verified, otp, otp_expire)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (email) DO NOTHING
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(category)
        .bind(is_verified)
        .bind(otp)
        .bind(otp_expire)
        .fetch_optional(db)
        .await?;
        Ok(account)
    }

    /// Signup against an existing unverified row: overwrite the profile
    /// fields and hand out a fresh code instead of rejecting.
    pub async fn resignup(
        db: &PgPool,
        id: Uuid,
        name: &str,
        password_hash: &str,
        category: &str,
        otp: &str,
        otp_expire: OffsetDateTime,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE accounts
            SET name = $2, password_hash = $3, category = $4, otp = $5, otp_expire = $6
            WHERE id = $1 AND is_verified = FALSE
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(password_hash)
        .bind(category)
        .bind(otp)
        .bind(otp_expire)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn set_otp(
        db: &PgPool,
        id: Uuid,
        otp: &str,
        otp_expire: OffsetDateTime,
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE accounts SET otp = $2, otp_expire = $3 WHERE id = $1")
            .bind(id)
            .bind(otp)
            .bind(otp_expire)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn mark_verified(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE accounts SET is_verified = TRUE, otp = NULL, otp_expire = NULL WHERE id = $1",
        )
        .bind(id)
        .execute(db)
        .await?;
        Ok(())
    }

    /// One-statement reset: the code match, the expiry window and the
    /// password overwrite happen atomically. Returns false when no
    /// matching unexpired code exists, in which case nothing changed.
    pub async fn reset_password(
        db: &PgPool,
        email: &str,
        otp: &str,
        password_hash: &str,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $3, otp = NULL, otp_expire = NULL
            WHERE email = $1 AND otp = $2 AND otp_expire > now()
            "#,
        )
        .bind(email)
        .bind(otp)
        .bind(password_hash)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_students(db: &PgPool) -> anyhow::Result<Vec<Account>> {
        let students = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE role = 'student' ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await?;
        Ok(students)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
