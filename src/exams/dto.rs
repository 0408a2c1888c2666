use serde::Deserialize;
use uuid::Uuid;

use super::repo_types::{AnswerDetail, ExamKind, QuestionItem, ResultStatus};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExamRequest {
    pub exam_title: String,
    #[serde(default = "default_exam_time")]
    pub exam_time: i32,
    #[serde(default)]
    pub negative_marks: f64,
    #[serde(default, rename = "type")]
    pub kind: ExamKind,
    #[serde(default)]
    pub questions: Vec<QuestionItem>,
}

fn default_exam_time() -> i32 {
    10
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExamRequest {
    pub exam_title: Option<String>,
    pub exam_time: Option<i32>,
    pub negative_marks: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<ExamKind>,
    pub questions: Option<Vec<QuestionItem>>,
    pub is_active: Option<bool>,
}

/// Full result document as submitted by the exam frontend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResultRequest {
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub student_email: String,
    #[serde(default)]
    pub student_phone: String,
    #[serde(default)]
    pub exam_title: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub total_score: f64,
    #[serde(default)]
    pub correct_answers: i32,
    #[serde(default)]
    pub wrong_answers: i32,
    #[serde(default)]
    pub details: Vec<AnswerDetail>,
    #[serde(default)]
    pub submitted_text: String,
    #[serde(default)]
    pub admin_feedback: String,
    #[serde(default)]
    pub status: ResultStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeWritingRequest {
    pub result_id: Uuid,
    pub score: f64,
    #[serde(default)]
    pub feedback: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_exam_defaults() {
        let req: CreateExamRequest =
            serde_json::from_str(r#"{"examTitle":"Weekly physics"}"#).unwrap();
        assert_eq!(req.exam_time, 10);
        assert_eq!(req.negative_marks, 0.0);
        assert_eq!(req.kind, ExamKind::Mcq);
        assert!(req.questions.is_empty());
    }

    #[test]
    fn save_result_defaults_to_published() {
        let req: SaveResultRequest = serde_json::from_str(
            r#"{"studentName":"Alice","studentEmail":"a@x.com","examTitle":"Weekly physics","score":8,"totalScore":10}"#,
        )
        .unwrap();
        assert_eq!(req.status, ResultStatus::Published);
        assert!(req.submitted_text.is_empty());
    }

    #[test]
    fn pending_writing_submission_parses() {
        let req: SaveResultRequest = serde_json::from_str(
            r#"{"studentName":"Bob","examTitle":"Essay","submittedText":"My answer...","status":"Pending","totalScore":20}"#,
        )
        .unwrap();
        assert_eq!(req.status, ResultStatus::Pending);
        assert_eq!(req.submitted_text, "My answer...");
    }
}
