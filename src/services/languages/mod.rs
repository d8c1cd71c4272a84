use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::error_response;
use crate::models::languages::requests::CreateLanguageRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct LanguageService {
    storage: Option<Arc<dyn Storage>>,
}

impl LanguageService {
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

    // 列出启用的编程语言
    pub async fn list_languages(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.list_active_languages().await {
            Ok(languages) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                languages,
                "Languages retrieved successfully",
            ))),
            Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
        }
    }

    pub async fn create_language(
        &self,
        request: &HttpRequest,
        req: CreateLanguageRequest,
    ) -> ActixResult<HttpResponse> {
        if req.display_name.trim().is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "display_name 不能为空",
            )));
        }

        let storage = self.get_storage(request);
        match storage.create_language(req).await {
            Ok(language) => {
                info!(
                    "Programming language {} created (runtime: {})",
                    language.display_name,
                    language.runtime_name()
                );
                Ok(HttpResponse::Created()
                    .json(ApiResponse::success(language, "Language created successfully")))
            }
            Err(e) => Ok(error_response(&e, ErrorCode::LanguageCreationFailed)),
        }
    }
}
