use serde::Deserialize;
use ts_rs::TS;

use super::entities::SubmissionStatus;
use crate::models::common::pagination::PaginationQuery;

/// 创建提交请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct CreateSubmissionRequest {
    pub student_id: i64,
    pub assignment_id: i64,
    pub question_id: i64,
    pub code: Option<String>,
    pub text_submission: Option<String>,
}

/// 更新提交状态请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct UpdateSubmissionStatusRequest {
    pub status: SubmissionStatus,
    pub feedback: Option<String>,
}

/// 教师手动给分请求，`null` 表示清除
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct UpdateCustomMarksRequest {
    pub custom_marks: Option<f64>,
}

/// 提交列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assignment_id: Option<i64>,
    pub student_id: Option<i64>,
    pub question_id: Option<i64>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assignment_id: Option<i64>,
    pub student_id: Option<i64>,
    pub question_id: Option<i64>,
}

impl SubmissionListQuery {
    pub fn pagination(&self) -> PaginationQuery {
        let defaults = PaginationQuery::default();
        PaginationQuery {
            page: self.page.unwrap_or(defaults.page),
            size: self.size.unwrap_or(defaults.size),
        }
    }
}

impl From<SubmissionListParams> for SubmissionListQuery {
    fn from(params: SubmissionListParams) -> Self {
        Self {
            page: params.page,
            size: params.size,
            assignment_id: params.assignment_id,
            student_id: params.student_id,
            question_id: params.question_id,
        }
    }
}
