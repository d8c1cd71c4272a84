use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::error_response;
use crate::models::ai_evaluations::requests::AiEvaluationListQuery;
use crate::models::ai_evaluations::responses::AiEvaluationListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct AiEvaluationService {
    storage: Option<Arc<dyn Storage>>,
}

impl AiEvaluationService {
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

    pub async fn list_evaluations(
        &self,
        request: &HttpRequest,
        query: AiEvaluationListQuery,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.list_ai_evaluations(query).await {
            Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                AiEvaluationListResponse {
                    total: items.len(),
                    items,
                },
                "AI evaluations retrieved successfully",
            ))),
            Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
        }
    }

    pub async fn get_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.get_ai_evaluation_by_id(evaluation_id).await {
            Ok(Some(evaluation)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                evaluation,
                "AI evaluation retrieved successfully",
            ))),
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AiEvaluationNotFound,
                "AI 评估不存在",
            ))),
            Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
        }
    }
}
