use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::languages::requests::CreateLanguageRequest;
use crate::services::LanguageService;

// 懒加载的全局 LanguageService 实例
static LANGUAGE_SERVICE: Lazy<LanguageService> = Lazy::new(LanguageService::new_lazy);

pub async fn list_languages(req: HttpRequest) -> ActixResult<HttpResponse> {
    LANGUAGE_SERVICE.list_languages(&req).await
}

pub async fn create_language(
    req: HttpRequest,
    body: web::Json<CreateLanguageRequest>,
) -> ActixResult<HttpResponse> {
    LANGUAGE_SERVICE
        .create_language(&req, body.into_inner())
        .await
}

// 配置路由
pub fn configure_language_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/languages").service(
            web::resource("")
                .route(web::get().to(list_languages))
                .route(web::post().to(create_language)),
        ),
    );
}
