pub mod create;
pub mod list;
pub mod run;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::test_cases::requests::{
    CreateTestCaseRequest, RunTestCasesRequest, TestCaseListQuery,
};
use crate::storage::Storage;

pub struct TestCaseService {
    storage: Option<Arc<dyn Storage>>,
}

impl TestCaseService {
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

    pub async fn list_test_cases(
        &self,
        request: &HttpRequest,
        question_id: i64,
        query: TestCaseListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_test_cases(self, request, question_id, query).await
    }

    pub async fn create_test_case(
        &self,
        request: &HttpRequest,
        question_id: i64,
        req: CreateTestCaseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_test_case(self, request, question_id, req).await
    }

    // 试运行公开用例，不落库
    pub async fn run_test_cases(
        &self,
        request: &HttpRequest,
        req: RunTestCasesRequest,
    ) -> ActixResult<HttpResponse> {
        run::run_test_cases(self, request, req).await
    }
}
