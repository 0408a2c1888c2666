use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Exam flavour. MCQ papers auto-grade; writing papers queue for
/// manual grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "exam_kind")]
pub enum ExamKind {
    #[sqlx(rename = "MCQ")]
    #[serde(rename = "MCQ")]
    Mcq,
    #[sqlx(rename = "Writing")]
    Writing,
}

impl Default for ExamKind {
    fn default() -> Self {
        ExamKind::Mcq
    }
}

/// A single exam question. Tagged so the two shapes cannot be mixed up
/// inside the jsonb column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum QuestionItem {
    Mcq {
        question: String,
        options: Vec<String>,
        correct_index: usize,
        #[serde(default = "default_marks")]
        marks: f64,
    },
    Writing {
        prompt: String,
        #[serde(default = "default_marks")]
        marks: f64,
    },
}

fn default_marks() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: Uuid,
    pub exam_title: String,
    /// Minutes allowed.
    pub exam_time: i32,
    pub negative_marks: f64,
    pub is_active: bool,
    #[serde(rename = "type")]
    pub kind: ExamKind,
    pub questions: Json<Vec<QuestionItem>>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "result_status")]
pub enum ResultStatus {
    #[sqlx(rename = "Published")]
    Published,
    #[sqlx(rename = "Pending")]
    Pending,
}

impl Default for ResultStatus {
    fn default() -> Self {
        ResultStatus::Published
    }
}

/// Per-question outcome stored with a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum AnswerDetail {
    Mcq {
        question: String,
        /// None when the student skipped the question.
        selected_index: Option<usize>,
        correct_index: usize,
        is_correct: bool,
    },
    Writing {
        prompt: String,
        answer: String,
    },
}

/// Exam outcome. Student and exam are referenced by denormalized
/// name/email strings, not ids — results survive account and exam
/// deletion.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    pub id: Uuid,
    pub student_name: String,
    pub student_email: String,
    pub student_phone: String,
    pub exam_title: String,
    pub score: f64,
    pub total_score: f64,
    pub correct_answers: i32,
    pub wrong_answers: i32,
    pub details: Json<Vec<AnswerDetail>>,
    /// Free-text answer for writing exams, empty otherwise.
    pub submitted_text: String,
    pub admin_feedback: String,
    pub status: ResultStatus,
    pub completed_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_items_carry_a_type_discriminant() {
        let q = QuestionItem::Mcq {
            question: "2 + 2 = ?".into(),
            options: vec!["3".into(), "4".into()],
            correct_index: 1,
            marks: 1.0,
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "mcq");
        assert_eq!(json["correctIndex"], 1);

        let w = QuestionItem::Writing {
            prompt: "Describe Newton's first law.".into(),
            marks: 10.0,
        };
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["type"], "writing");
        assert_eq!(json["prompt"], "Describe Newton's first law.");
    }

    #[test]
    fn question_marks_default_to_one() {
        let q: QuestionItem = serde_json::from_str(
            r#"{"type":"mcq","question":"q","options":["a","b"],"correctIndex":0}"#,
        )
        .unwrap();
        match q {
            QuestionItem::Mcq { marks, .. } => assert_eq!(marks, 1.0),
            QuestionItem::Writing { .. } => panic!("wrong variant"),
        }
    }

    #[test]
    fn unknown_question_type_is_rejected() {
        let parsed: Result<QuestionItem, _> =
            serde_json::from_str(r#"{"type":"essay","prompt":"p"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn answer_detail_skipped_question() {
        let d: AnswerDetail = serde_json::from_str(
            r#"{"type":"mcq","question":"q","selectedIndex":null,"correctIndex":2,"isCorrect":false}"#,
        )
        .unwrap();
        match d {
            AnswerDetail::Mcq {
                selected_index,
                is_correct,
                ..
            } => {
                assert_eq!(selected_index, None);
                assert!(!is_correct);
            }
            AnswerDetail::Writing { .. } => panic!("wrong variant"),
        }
    }

    #[test]
    fn exam_kind_uses_legacy_spelling() {
        assert_eq!(serde_json::to_string(&ExamKind::Mcq).unwrap(), r#""MCQ""#);
        assert_eq!(
            serde_json::to_string(&ExamKind::Writing).unwrap(),
            r#""Writing""#
        );
        assert_eq!(
            serde_json::to_string(&ResultStatus::Pending).unwrap(),
            r#""Pending""#
        );
    }
}
