//! 课时增删改查
//!
//! 类型条件校验在写入前显式执行：video 必须有 video_url，
//! pdf 必须有 file_url，quiz 必须有 quiz_id。

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::lessons::{
    entities::{Lesson, LessonType},
    requests::{CreateLessonRequest, UpdateLessonRequest},
};
use crate::storage::Storage;

/// 按类型校验必填字段
pub(crate) fn validate_lesson_fields(
    lesson_type: LessonType,
    video_url: Option<&str>,
    file_url: Option<&str>,
    quiz_id: Option<i64>,
) -> Result<()> {
    match lesson_type {
        LessonType::Video if video_url.map(str::is_empty).unwrap_or(true) => Err(
            LearnifyError::validation("video 类型课时必须提供 video_url"),
        ),
        LessonType::Pdf if file_url.map(str::is_empty).unwrap_or(true) => Err(
            LearnifyError::validation("pdf 类型课时必须提供 file_url"),
        ),
        LessonType::Quiz if quiz_id.is_none() => Err(LearnifyError::validation(
            "quiz 类型课时必须提供 quiz_id",
        )),
        _ => Ok(()),
    }
}

/// 创建课时
pub async fn create_lesson(
    storage: &Arc<dyn Storage>,
    req: CreateLessonRequest,
) -> Result<Lesson> {
    if req.title.trim().is_empty() {
        return Err(LearnifyError::validation("课时标题不能为空"));
    }

    validate_lesson_fields(
        req.lesson_type,
        req.video_url.as_deref(),
        req.file_url.as_deref(),
        req.quiz_id,
    )?;

    // 章节必须存在
    storage
        .get_module_by_id(req.module_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("章节 {} 不存在", req.module_id)))?;

    storage.create_lesson(req).await
}

/// 获取课时
pub async fn get_lesson(storage: &Arc<dyn Storage>, lesson_id: i64) -> Result<Lesson> {
    storage
        .get_lesson_by_id(lesson_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("课时 {lesson_id} 不存在")))
}

/// 按展示顺序列出章节课时
pub async fn list_lessons(storage: &Arc<dyn Storage>, module_id: i64) -> Result<Vec<Lesson>> {
    storage.list_lessons_by_module(module_id).await
}

/// 更新课时
///
/// 用合并后的字段重新校验类型条件，避免更新把必填字段清掉。
pub async fn update_lesson(
    storage: &Arc<dyn Storage>,
    lesson_id: i64,
    req: UpdateLessonRequest,
) -> Result<Lesson> {
    let existing = storage
        .get_lesson_by_id(lesson_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("课时 {lesson_id} 不存在")))?;

    let merged_video = req.video_url.as_deref().or(existing.video_url.as_deref());
    let merged_file = req.file_url.as_deref().or(existing.file_url.as_deref());
    let merged_quiz = req.quiz_id.or(existing.quiz_id);

    validate_lesson_fields(existing.lesson_type, merged_video, merged_file, merged_quiz)?;

    storage
        .update_lesson(lesson_id, req)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("课时 {lesson_id} 不存在")))
}

/// 删除课时
pub async fn delete_lesson(storage: &Arc<dyn Storage>, lesson_id: i64) -> Result<()> {
    let deleted = storage.delete_lesson(lesson_id).await?;
    if !deleted {
        return Err(LearnifyError::not_found(format!("课时 {lesson_id} 不存在")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_requires_url() {
        assert!(validate_lesson_fields(LessonType::Video, None, None, None).is_err());
        assert!(
            validate_lesson_fields(LessonType::Video, Some("https://cdn/v.mp4"), None, None)
                .is_ok()
        );
    }

    #[test]
    fn test_pdf_requires_file() {
        assert!(validate_lesson_fields(LessonType::Pdf, None, None, None).is_err());
        assert!(
            validate_lesson_fields(LessonType::Pdf, None, Some("https://cdn/a.pdf"), None).is_ok()
        );
    }

    #[test]
    fn test_quiz_requires_quiz_id() {
        assert!(validate_lesson_fields(LessonType::Quiz, None, None, None).is_err());
        assert!(validate_lesson_fields(LessonType::Quiz, None, None, Some(3)).is_ok());
    }

    #[test]
    fn test_text_and_assignment_have_no_extra_requirements() {
        assert!(validate_lesson_fields(LessonType::Text, None, None, None).is_ok());
        assert!(validate_lesson_fields(LessonType::Assignment, None, None, None).is_ok());
    }
}
