use sqlx::PgPool;
use uuid::Uuid;

use crate::content::dto::{
    CreateMaterialRequest, CreateNoticeRequest, CreateVideoRequest, UpdateMaterialRequest,
    UpdateVideoRequest,
};
use crate::content::repo_types::{Material, Notice, Video};

impl Material {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Material>> {
        let rows = sqlx::query_as::<_, Material>(
            "SELECT id, title, drive_link, is_active, upload_date FROM materials",
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(db: &PgPool, body: &CreateMaterialRequest) -> anyhow::Result<Material> {
        let row = sqlx::query_as::<_, Material>(
            r#"
            INSERT INTO materials (title, drive_link)
            VALUES ($1, $2)
            RETURNING id, title, drive_link, is_active, upload_date
            "#,
        )
        .bind(&body.title)
        .bind(&body.drive_link)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        body: &UpdateMaterialRequest,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE materials
            SET title = COALESCE($2, title),
                drive_link = COALESCE($3, drive_link),
                is_active = COALESCE($4, is_active)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&body.title)
        .bind(&body.drive_link)
        .bind(body.is_active)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomic flip, no read-modify-write.
    pub async fn toggle(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE materials SET is_active = NOT is_active WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}

impl Video {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Video>> {
        let rows = sqlx::query_as::<_, Video>(
            "SELECT id, title, link, is_active, upload_date FROM videos",
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(db: &PgPool, body: &CreateVideoRequest) -> anyhow::Result<Video> {
        let row = sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos (title, link)
            VALUES ($1, $2)
            RETURNING id, title, link, is_active, upload_date
            "#,
        )
        .bind(&body.title)
        .bind(&body.link)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(db: &PgPool, id: Uuid, body: &UpdateVideoRequest) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE videos
            SET title = COALESCE($2, title),
                link = COALESCE($3, link),
                is_active = COALESCE($4, is_active)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&body.title)
        .bind(&body.link)
        .bind(body.is_active)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn toggle(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE videos SET is_active = NOT is_active WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}

impl Notice {
    /// Newest first, the way the board displays them.
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Notice>> {
        let rows = sqlx::query_as::<_, Notice>(
            "SELECT id, title, message, date FROM notices ORDER BY date DESC",
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(db: &PgPool, body: &CreateNoticeRequest) -> anyhow::Result<Notice> {
        let row = sqlx::query_as::<_, Notice>(
            r#"
            INSERT INTO notices (title, message)
            VALUES ($1, $2)
            RETURNING id, title, message, date
            "#,
        )
        .bind(&body.title)
        .bind(&body.message)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM notices WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
