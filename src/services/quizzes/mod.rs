pub mod attempts;
pub mod create;
pub mod grade_response;
pub mod score_attempt;
pub mod total_points;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::quizzes::{
    entities::{Question, QuestionOption, Quiz, QuizAttempt, QuizResponse},
    requests::{
        CreateQuestionOptionRequest, CreateQuestionRequest, CreateQuizRequest,
        ManualGradeRequest, SubmitResponseRequest,
    },
};
use crate::storage::Storage;

pub struct QuizService {
    storage: Arc<dyn Storage>,
}

impl QuizService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 创建测验
    pub async fn create_quiz(&self, req: CreateQuizRequest) -> Result<Quiz> {
        create::create_quiz(&self.storage, req).await
    }

    /// 创建题目（true_false 必须带 correct_answer）
    pub async fn create_question(&self, req: CreateQuestionRequest) -> Result<Question> {
        create::create_question(&self.storage, req).await
    }

    /// 创建选项
    pub async fn create_question_option(
        &self,
        req: CreateQuestionOptionRequest,
    ) -> Result<QuestionOption> {
        create::create_question_option(&self.storage, req).await
    }

    /// 重算测验总分（题目分值之和）
    pub async fn calculate_total_points(&self, quiz_id: i64) -> Result<f64> {
        total_points::calculate_total_points(&self.storage, quiz_id).await
    }

    /// 学生开始一次作答
    pub async fn start_attempt(&self, quiz_id: i64, student_id: i64) -> Result<QuizAttempt> {
        attempts::start_attempt(&self.storage, quiz_id, student_id).await
    }

    /// 放弃作答（外部触发的终态）
    pub async fn abandon_attempt(&self, attempt_id: i64) -> Result<QuizAttempt> {
        attempts::abandon_attempt(&self.storage, attempt_id).await
    }

    /// 单题作答评分并保存
    pub async fn grade_response(
        &self,
        attempt_id: i64,
        req: SubmitResponseRequest,
    ) -> Result<QuizResponse> {
        grade_response::grade_response(&self.storage, attempt_id, req).await
    }

    /// 汇总一次作答的总分，返回百分比
    pub async fn score_attempt(&self, attempt_id: i64) -> Result<f64> {
        score_attempt::score_attempt(&self.storage, attempt_id).await
    }

    /// 文本题人工评分
    pub async fn grade_response_manually(
        &self,
        response_id: i64,
        grader_id: i64,
        req: ManualGradeRequest,
    ) -> Result<QuizResponse> {
        grade_response::grade_response_manually(&self.storage, response_id, grader_id, req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LearnifyError;
    use crate::models::courses::{entities::CourseStatus, requests::CreateCourseRequest};
    use crate::models::quizzes::entities::{AttemptStatus, QuestionType};
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::storage::test_utils::memory_storage;

    async fn seed_user(storage: &Arc<dyn Storage>, email: &str, role: UserRole) -> i64 {
        storage
            .create_user(CreateUserRequest {
                firstname: "测试".to_string(),
                lastname: "用户".to_string(),
                email: email.to_string(),
                password: "$argon2id$fake$hash".to_string(),
                role,
                phone_number: None,
            })
            .await
            .expect("user should be created")
            .id
    }

    async fn seed_course(storage: &Arc<dyn Storage>, instructor_id: i64, slug: &str) -> i64 {
        storage
            .create_course(
                instructor_id,
                slug,
                CreateCourseRequest {
                    title: format!("课程 {slug}"),
                    description: "测试课程".to_string(),
                    cover_image: None,
                    status: CourseStatus::Published,
                    start_date: chrono::Utc::now(),
                    end_date: None,
                },
            )
            .await
            .expect("course should be created")
            .id
    }

    /// 搭一个带单选题（10 分，及格线 70）的测验
    async fn seed_quiz_with_question(
        storage: &Arc<dyn Storage>,
        service: &QuizService,
    ) -> (i64, i64, i64, i64, i64) {
        let instructor = seed_user(storage, "teacher@learnify.app", UserRole::Instructor).await;
        let student = seed_user(storage, "student@learnify.app", UserRole::Student).await;
        let course_id = seed_course(storage, instructor, "quiz-course").await;

        let quiz = service
            .create_quiz(CreateQuizRequest {
                course_id,
                lesson_id: None,
                title: "第一章测验".to_string(),
                description: None,
                time_limit: 30,
                passing_score: 70.0,
                due_date: None,
                is_published: true,
                shuffle_questions: false,
                show_results: true,
                attempts_allowed: 3,
            })
            .await
            .expect("quiz should be created");

        let question = service
            .create_question(CreateQuestionRequest {
                quiz_id: quiz.id,
                text: "2 + 2 = ?".to_string(),
                question_type: QuestionType::MultipleChoice,
                points: 10.0,
                sort_order: 1,
                explanation: None,
                sample_answer: None,
                correct_answer: None,
            })
            .await
            .expect("question should be created");

        let correct = service
            .create_question_option(CreateQuestionOptionRequest {
                question_id: question.id,
                text: "4".to_string(),
                is_correct: true,
                sort_order: 1,
                explanation: None,
            })
            .await
            .expect("option should be created");

        let wrong = service
            .create_question_option(CreateQuestionOptionRequest {
                question_id: question.id,
                text: "5".to_string(),
                is_correct: false,
                sort_order: 2,
                explanation: None,
            })
            .await
            .expect("option should be created");

        (student, quiz.id, question.id, correct.id, wrong.id)
    }

    #[tokio::test]
    async fn test_correct_answer_full_marks_and_pass() {
        let storage = memory_storage().await;
        let service = QuizService::new(storage.clone());
        let (student, quiz_id, question_id, correct_id, _) =
            seed_quiz_with_question(&storage, &service).await;

        let attempt = service.start_attempt(quiz_id, student).await.unwrap();
        assert_eq!(attempt.status, AttemptStatus::InProgress);
        assert_eq!(attempt.attempt_number, 1);

        let response = service
            .grade_response(
                attempt.id,
                SubmitResponseRequest {
                    question_id,
                    selected_option_id: Some(correct_id),
                    text_response: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(response.is_correct, Some(true));
        assert_eq!(response.points_awarded, 10.0);
        assert_eq!(response.max_points, 10.0);

        let score = service.score_attempt(attempt.id).await.unwrap();
        assert_eq!(score, 100.0);

        let saved = storage
            .get_quiz_attempt_by_id(attempt.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved.score, 100.0);
        assert!(saved.is_passed);
        assert_eq!(saved.status, AttemptStatus::Completed);
        assert!(saved.end_time.is_some());
    }

    #[tokio::test]
    async fn test_incorrect_answer_zero_and_fail() {
        let storage = memory_storage().await;
        let service = QuizService::new(storage.clone());
        let (student, quiz_id, question_id, _, wrong_id) =
            seed_quiz_with_question(&storage, &service).await;

        let attempt = service.start_attempt(quiz_id, student).await.unwrap();

        let response = service
            .grade_response(
                attempt.id,
                SubmitResponseRequest {
                    question_id,
                    selected_option_id: Some(wrong_id),
                    text_response: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(response.is_correct, Some(false));
        assert_eq!(response.points_awarded, 0.0);

        let score = service.score_attempt(attempt.id).await.unwrap();
        assert_eq!(score, 0.0);

        let saved = storage
            .get_quiz_attempt_by_id(attempt.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!saved.is_passed);
    }

    #[tokio::test]
    async fn test_resubmission_updates_instead_of_duplicating() {
        let storage = memory_storage().await;
        let service = QuizService::new(storage.clone());
        let (student, quiz_id, question_id, correct_id, wrong_id) =
            seed_quiz_with_question(&storage, &service).await;

        let attempt = service.start_attempt(quiz_id, student).await.unwrap();

        let first = service
            .grade_response(
                attempt.id,
                SubmitResponseRequest {
                    question_id,
                    selected_option_id: Some(wrong_id),
                    text_response: None,
                },
            )
            .await
            .unwrap();

        let second = service
            .grade_response(
                attempt.id,
                SubmitResponseRequest {
                    question_id,
                    selected_option_id: Some(correct_id),
                    text_response: None,
                },
            )
            .await
            .unwrap();

        // 同一 (attempt, question) 更新而不是新建
        assert_eq!(first.id, second.id);
        assert_eq!(second.is_correct, Some(true));

        let responses = storage.list_responses_by_attempt(attempt.id).await.unwrap();
        assert_eq!(responses.len(), 1);
    }

    #[tokio::test]
    async fn test_score_attempt_idempotent() {
        let storage = memory_storage().await;
        let service = QuizService::new(storage.clone());
        let (student, quiz_id, question_id, correct_id, _) =
            seed_quiz_with_question(&storage, &service).await;

        let attempt = service.start_attempt(quiz_id, student).await.unwrap();
        service
            .grade_response(
                attempt.id,
                SubmitResponseRequest {
                    question_id,
                    selected_option_id: Some(correct_id),
                    text_response: None,
                },
            )
            .await
            .unwrap();

        let first_score = service.score_attempt(attempt.id).await.unwrap();
        let first = storage
            .get_quiz_attempt_by_id(attempt.id)
            .await
            .unwrap()
            .unwrap();

        let second_score = service.score_attempt(attempt.id).await.unwrap();
        let second = storage
            .get_quiz_attempt_by_id(attempt.id)
            .await
            .unwrap()
            .unwrap();

        // 分数与通过状态不变，完成后计时字段不再变动
        assert_eq!(first_score, second_score);
        assert_eq!(first.is_passed, second.is_passed);
        assert_eq!(first.end_time, second.end_time);
        assert_eq!(first.time_spent, second.time_spent);
    }

    #[tokio::test]
    async fn test_score_attempt_without_responses_returns_zero() {
        let storage = memory_storage().await;
        let service = QuizService::new(storage.clone());
        let (student, quiz_id, _, _, _) = seed_quiz_with_question(&storage, &service).await;

        let attempt = service.start_attempt(quiz_id, student).await.unwrap();
        let score = service.score_attempt(attempt.id).await.unwrap();
        assert_eq!(score, 0.0);

        // 不写库：状态仍是 in_progress
        let saved = storage
            .get_quiz_attempt_by_id(attempt.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved.status, AttemptStatus::InProgress);
    }

    #[tokio::test]
    async fn test_total_points_matches_question_sum() {
        let storage = memory_storage().await;
        let service = QuizService::new(storage.clone());
        let (_, quiz_id, _, _, _) = seed_quiz_with_question(&storage, &service).await;

        service
            .create_question(CreateQuestionRequest {
                quiz_id,
                text: "地球是平的".to_string(),
                question_type: QuestionType::TrueFalse,
                points: 5.0,
                sort_order: 2,
                explanation: None,
                sample_answer: None,
                correct_answer: Some(false),
            })
            .await
            .unwrap();

        let total = service.calculate_total_points(quiz_id).await.unwrap();
        assert_eq!(total, 15.0);

        let quiz = storage.get_quiz_by_id(quiz_id).await.unwrap().unwrap();
        let questions = storage.list_questions_by_quiz(quiz_id).await.unwrap();
        let sum: f64 = questions.iter().map(|q| q.points).sum();
        assert_eq!(quiz.total_points, sum);
    }

    #[tokio::test]
    async fn test_true_false_requires_correct_answer() {
        let storage = memory_storage().await;
        let service = QuizService::new(storage.clone());
        let (_, quiz_id, _, _, _) = seed_quiz_with_question(&storage, &service).await;

        let result = service
            .create_question(CreateQuestionRequest {
                quiz_id,
                text: "判断题".to_string(),
                question_type: QuestionType::TrueFalse,
                points: 5.0,
                sort_order: 3,
                explanation: None,
                sample_answer: None,
                correct_answer: None,
            })
            .await;

        assert!(matches!(result, Err(LearnifyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_attempts_allowed_enforced() {
        let storage = memory_storage().await;
        let service = QuizService::new(storage.clone());
        let (student, quiz_id, _, _, _) = seed_quiz_with_question(&storage, &service).await;

        for expected in 1..=3 {
            let attempt = service.start_attempt(quiz_id, student).await.unwrap();
            assert_eq!(attempt.attempt_number, expected);
        }

        let result = service.start_attempt(quiz_id, student).await;
        assert!(matches!(result, Err(LearnifyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_question_rejected() {
        let storage = memory_storage().await;
        let service = QuizService::new(storage.clone());
        let (student, quiz_id, _, _, _) = seed_quiz_with_question(&storage, &service).await;

        let attempt = service.start_attempt(quiz_id, student).await.unwrap();
        let result = service
            .grade_response(
                attempt.id,
                SubmitResponseRequest {
                    question_id: 9999,
                    selected_option_id: Some(1),
                    text_response: None,
                },
            )
            .await;

        assert!(matches!(result, Err(LearnifyError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_text_question_pending_manual_grade() {
        let storage = memory_storage().await;
        let service = QuizService::new(storage.clone());
        let (student, quiz_id, _, _, _) = seed_quiz_with_question(&storage, &service).await;

        let essay = service
            .create_question(CreateQuestionRequest {
                quiz_id,
                text: "谈谈你的理解".to_string(),
                question_type: QuestionType::Essay,
                points: 20.0,
                sort_order: 2,
                explanation: None,
                sample_answer: None,
                correct_answer: None,
            })
            .await
            .unwrap();

        let attempt = service.start_attempt(quiz_id, student).await.unwrap();
        let response = service
            .grade_response(
                attempt.id,
                SubmitResponseRequest {
                    question_id: essay.id,
                    selected_option_id: None,
                    text_response: Some("我的理解是……".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(response.is_correct, None);
        assert_eq!(response.points_awarded, 0.0);
        assert_eq!(response.max_points, 20.0);

        // 人工评分后分数生效
        let graded = service
            .grade_response_manually(
                response.id,
                1,
                ManualGradeRequest {
                    is_correct: true,
                    points_awarded: 18.0,
                    feedback: Some("不错".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(graded.points_awarded, 18.0);
        assert_eq!(graded.is_correct, Some(true));
    }
}
