//! 多态被评分项解析
//!
//! (item_id, item_type) 是没有外键约束的弱引用，解析成带类型的
//! GradedItem 枚举；exam/project/participation 没有对应实体。

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::grades::entities::{GradeItemType, GradedItem};
use crate::storage::Storage;

/// 解析成绩指向的被评分项
pub async fn get_graded_item(
    storage: &Arc<dyn Storage>,
    grade_id: i64,
) -> Result<Option<GradedItem>> {
    let grade = storage
        .get_grade_by_id(grade_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("成绩 {grade_id} 不存在")))?;

    match grade.item_type {
        GradeItemType::Quiz => Ok(storage
            .get_quiz_by_id(grade.item_id)
            .await?
            .map(GradedItem::Quiz)),
        GradeItemType::Assignment => Ok(storage
            .get_assignment_by_id(grade.item_id)
            .await?
            .map(GradedItem::Assignment)),
        // 其余类型没有可解析的实体
        GradeItemType::Exam | GradeItemType::Project | GradeItemType::Participation => Ok(None),
    }
}
