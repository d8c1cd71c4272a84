pub mod create;
pub mod detail;
pub mod evaluate;
pub mod list;
pub mod results;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{
    CreateSubmissionRequest, SubmissionListQuery, UpdateCustomMarksRequest,
    UpdateSubmissionStatusRequest,
};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 创建提交（同时创建 pending 的 AI 评估）
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        req: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, req).await
    }

    /// 获取提交详情
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, submission_id).await
    }

    /// 列出提交
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        query: SubmissionListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, query).await
    }

    /// 更新状态
    pub async fn update_status(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        req: UpdateSubmissionStatusRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_status(self, request, submission_id, req).await
    }

    /// 教师手动给分
    pub async fn update_custom_marks(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        req: UpdateCustomMarksRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_custom_marks(self, request, submission_id, req).await
    }

    /// 运行测试用例评测
    pub async fn evaluate_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        evaluate::evaluate_submission(self, request, submission_id).await
    }

    /// 已存储的测试用例结果
    pub async fn get_testcase_results(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        results::get_testcase_results(self, request, submission_id).await
    }
}
