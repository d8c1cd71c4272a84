use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::error_response;
use crate::models::notifications::requests::NotificationListQuery;
use crate::models::notifications::responses::NotificationListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct NotificationService {
    storage: Option<Arc<dyn Storage>>,
}

impl NotificationService {
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

    // 通知出站记录
    pub async fn list_notifications(
        &self,
        request: &HttpRequest,
        query: NotificationListQuery,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.list_notifications(query).await {
            Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                NotificationListResponse {
                    total: items.len(),
                    items,
                },
                "Notifications retrieved successfully",
            ))),
            Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
        }
    }
}
