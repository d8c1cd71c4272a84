pub mod create;
pub mod detail;
pub mod questions;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::questions::requests::CreateQuestionRequest;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    // 创建作业并分发 AssignmentCreated
    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        req: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, req).await
    }

    // 作业详情（含题目）
    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, request, assignment_id).await
    }

    pub async fn create_question(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        req: CreateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        questions::create_question(self, request, assignment_id, req).await
    }

    // 作业下所有提交的评测汇总
    pub async fn get_testcase_summary(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        summary::get_testcase_summary(self, request, assignment_id).await
    }
}
