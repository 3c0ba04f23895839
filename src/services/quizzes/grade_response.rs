//! 单题作答评分
//!
//! 选择类题型自动判分，文本类题型落库后等待人工评分。

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::quizzes::{
    entities::{Question, QuestionOption, QuestionType, QuizResponse},
    requests::{ManualGradeRequest, SubmitResponseRequest, UpsertResponseData},
};
use crate::storage::Storage;

/// 自动判分结果
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AutoGrade {
    pub is_correct: Option<bool>,
    pub points_awarded: f64,
}

/// 按题型校验作答形态
fn validate_answer(question: &Question, req: &SubmitResponseRequest) -> Result<()> {
    if question.question_type.is_choice() && req.selected_option_id.is_none() {
        return Err(LearnifyError::validation(
            "选择类题目必须提供 selected_option_id",
        ));
    }

    if question.question_type.is_text()
        && req
            .text_response
            .as_deref()
            .map(|t| t.trim().is_empty())
            .unwrap_or(true)
    {
        return Err(LearnifyError::validation("文本类题目必须提供作答内容"));
    }

    Ok(())
}

/// 自动判分
///
/// - multiple_choice: 以所选选项的 is_correct 为准；选项查不到时不判分，计 0 分
/// - true_false: 按原始约定把所选选项 ID 与布尔型 correct_answer 做字面比较
/// - short_answer/essay: 不自动判分，等待人工评分
pub(crate) fn auto_grade(
    question: &Question,
    selected_option: Option<&QuestionOption>,
    selected_option_id: Option<i64>,
) -> AutoGrade {
    match question.question_type {
        QuestionType::MultipleChoice => match selected_option {
            Some(option) => {
                let is_correct = option.is_correct;
                AutoGrade {
                    is_correct: Some(is_correct),
                    points_awarded: if is_correct { question.points } else { 0.0 },
                }
            }
            None => AutoGrade {
                is_correct: None,
                points_awarded: 0.0,
            },
        },
        QuestionType::TrueFalse => {
            // 选项 ID 与布尔答案的字面比较，沿用既有数据模型的约定
            let is_correct = selected_option_id.map(|id| id.to_string())
                == question.correct_answer.map(|b| b.to_string());
            AutoGrade {
                is_correct: Some(is_correct),
                points_awarded: if is_correct { question.points } else { 0.0 },
            }
        }
        QuestionType::ShortAnswer | QuestionType::Essay => AutoGrade {
            is_correct: None,
            points_awarded: 0.0,
        },
    }
}

/// 单题作答评分并保存
///
/// 同一 (attempt, question) 重复提交时更新已有记录，不会产生重复行。
pub async fn grade_response(
    storage: &Arc<dyn Storage>,
    attempt_id: i64,
    req: SubmitResponseRequest,
) -> Result<QuizResponse> {
    // 作答必须存在
    storage
        .get_quiz_attempt_by_id(attempt_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("作答 {attempt_id} 不存在")))?;

    // 题目必须存在，max_points 从题目分值拷贝
    let question = storage
        .get_question_by_id(req.question_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("题目 {} 不存在", req.question_id)))?;

    validate_answer(&question, &req)?;

    // 选择题加载所选选项（查不到时不判分而不是报错）
    let selected_option = match (question.question_type, req.selected_option_id) {
        (QuestionType::MultipleChoice, Some(option_id)) => {
            storage.get_question_option_by_id(option_id).await?
        }
        _ => None,
    };

    let graded = auto_grade(&question, selected_option.as_ref(), req.selected_option_id);

    storage
        .upsert_quiz_response(UpsertResponseData {
            quiz_attempt_id: attempt_id,
            question_id: question.id,
            selected_option_id: req.selected_option_id,
            text_response: req.text_response,
            is_correct: graded.is_correct,
            points_awarded: graded.points_awarded,
            max_points: question.points,
        })
        .await
}

/// 文本题人工评分
pub async fn grade_response_manually(
    storage: &Arc<dyn Storage>,
    response_id: i64,
    grader_id: i64,
    req: ManualGradeRequest,
) -> Result<QuizResponse> {
    storage
        .update_response_manual_grade(response_id, grader_id, req)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("作答记录 {response_id} 不存在")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quizzes::entities::QuestionType;
    use chrono::Utc;

    fn question(question_type: QuestionType, points: f64, correct_answer: Option<bool>) -> Question {
        Question {
            id: 1,
            quiz_id: 1,
            text: "测试题目".to_string(),
            question_type,
            points,
            sort_order: 1,
            explanation: String::new(),
            sample_answer: None,
            correct_answer,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn option(id: i64, is_correct: bool) -> QuestionOption {
        QuestionOption {
            id,
            question_id: 1,
            text: "选项".to_string(),
            is_correct,
            sort_order: 1,
            explanation: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_multiple_choice_correct() {
        let q = question(QuestionType::MultipleChoice, 10.0, None);
        let opt = option(5, true);
        let graded = auto_grade(&q, Some(&opt), Some(5));
        assert_eq!(graded.is_correct, Some(true));
        assert_eq!(graded.points_awarded, 10.0);
    }

    #[test]
    fn test_multiple_choice_incorrect() {
        let q = question(QuestionType::MultipleChoice, 10.0, None);
        let opt = option(5, false);
        let graded = auto_grade(&q, Some(&opt), Some(5));
        assert_eq!(graded.is_correct, Some(false));
        assert_eq!(graded.points_awarded, 0.0);
    }

    #[test]
    fn test_multiple_choice_missing_option_scores_zero() {
        // 选项查不到时不判分，计 0 分，不报错
        let q = question(QuestionType::MultipleChoice, 10.0, None);
        let graded = auto_grade(&q, None, Some(99));
        assert_eq!(graded.is_correct, None);
        assert_eq!(graded.points_awarded, 0.0);
    }

    #[test]
    fn test_true_false_literal_comparison_never_matches() {
        // 选项 ID 与布尔答案的字面比较恒为不相等
        let q = question(QuestionType::TrueFalse, 5.0, Some(true));
        let graded = auto_grade(&q, None, Some(1));
        assert_eq!(graded.is_correct, Some(false));
        assert_eq!(graded.points_awarded, 0.0);
    }

    #[test]
    fn test_text_questions_not_auto_graded() {
        let q = question(QuestionType::Essay, 20.0, None);
        let graded = auto_grade(&q, None, None);
        assert_eq!(graded.is_correct, None);
        assert_eq!(graded.points_awarded, 0.0);
    }

    #[test]
    fn test_validate_choice_requires_option() {
        let q = question(QuestionType::MultipleChoice, 10.0, None);
        let req = SubmitResponseRequest {
            question_id: 1,
            selected_option_id: None,
            text_response: None,
        };
        assert!(validate_answer(&q, &req).is_err());
    }

    #[test]
    fn test_validate_text_requires_content() {
        let q = question(QuestionType::ShortAnswer, 10.0, None);
        let req = SubmitResponseRequest {
            question_id: 1,
            selected_option_id: None,
            text_response: Some("   ".to_string()),
        };
        assert!(validate_answer(&q, &req).is_err());

        let req = SubmitResponseRequest {
            question_id: 1,
            selected_option_id: None,
            text_response: Some("我的答案".to_string()),
        };
        assert!(validate_answer(&q, &req).is_ok());
    }
}
