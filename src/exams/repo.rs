use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::exams::dto::{CreateExamRequest, SaveResultRequest, UpdateExamRequest};
use crate::exams::repo_types::{Exam, ExamResult};

const EXAM_COLUMNS: &str =
    "id, exam_title, exam_time, negative_marks, is_active, kind, questions, created_at";

const RESULT_COLUMNS: &str = "id, student_name, student_email, student_phone, exam_title, score, \
     total_score, correct_answers, wrong_answers, details, submitted_text, admin_feedback, \
     status, completed_at";

impl Exam {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Exam>> {
        let rows = sqlx::query_as::<_, Exam>(&format!("SELECT {EXAM_COLUMNS} FROM exams"))
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    pub async fn create(db: &PgPool, body: CreateExamRequest) -> anyhow::Result<Exam> {
        let row = sqlx::query_as::<_, Exam>(&format!(
            r#"
            INSERT INTO exams (exam_title, exam_time, negative_marks, kind, questions)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {EXAM_COLUMNS}
            "#
        ))
        .bind(body.exam_title)
        .bind(body.exam_time)
        .bind(body.negative_marks)
        .bind(body.kind)
        .bind(Json(body.questions))
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(db: &PgPool, id: Uuid, body: UpdateExamRequest) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE exams
            SET exam_title = COALESCE($2, exam_title),
                exam_time = COALESCE($3, exam_time),
                negative_marks = COALESCE($4, negative_marks),
                kind = COALESCE($5, kind),
                questions = COALESCE($6, questions),
                is_active = COALESCE($7, is_active)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(body.exam_title)
        .bind(body.exam_time)
        .bind(body.negative_marks)
        .bind(body.kind)
        .bind(body.questions.map(Json))
        .bind(body.is_active)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn toggle(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE exams SET is_active = NOT is_active WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM exams WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}

impl ExamResult {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<ExamResult>> {
        let rows = sqlx::query_as::<_, ExamResult>(&format!("SELECT {RESULT_COLUMNS} FROM results"))
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    pub async fn create(db: &PgPool, body: SaveResultRequest) -> anyhow::Result<ExamResult> {
        let row = sqlx::query_as::<_, ExamResult>(&format!(
            r#"
            INSERT INTO results (student_name, student_email, student_phone, exam_title, score,
                                 total_score, correct_answers, wrong_answers, details,
                                 submitted_text, admin_feedback, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {RESULT_COLUMNS}
            "#
        ))
        .bind(body.student_name)
        .bind(body.student_email)
        .bind(body.student_phone)
        .bind(body.exam_title)
        .bind(body.score)
        .bind(body.total_score)
        .bind(body.correct_answers)
        .bind(body.wrong_answers)
        .bind(Json(body.details))
        .bind(body.submitted_text)
        .bind(body.admin_feedback)
        .bind(body.status)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Writing submissions waiting for a teacher, newest first.
    pub async fn pending_writings(db: &PgPool) -> anyhow::Result<Vec<ExamResult>> {
        let rows = sqlx::query_as::<_, ExamResult>(&format!(
            r#"
            SELECT {RESULT_COLUMNS} FROM results
            WHERE status = 'Pending' AND submitted_text <> ''
            ORDER BY completed_at DESC
            "#
        ))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Grading publishes the result in the same statement that stores
    /// the score and feedback.
    pub async fn grade(db: &PgPool, id: Uuid, score: f64, feedback: &str) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE results
            SET score = $2, admin_feedback = $3, status = 'Published'
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(score)
        .bind(feedback)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
