use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::ai_evaluations::requests::AiEvaluationListQuery;
use crate::services::AiEvaluationService;
use crate::utils::SafeIDI64;

static AI_EVALUATION_SERVICE: Lazy<AiEvaluationService> =
    Lazy::new(AiEvaluationService::new_lazy);

pub async fn list_evaluations(
    req: HttpRequest,
    query: web::Query<AiEvaluationListQuery>,
) -> ActixResult<HttpResponse> {
    AI_EVALUATION_SERVICE
        .list_evaluations(&req, query.into_inner())
        .await
}

pub async fn get_evaluation(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    AI_EVALUATION_SERVICE.get_evaluation(&req, path.0).await
}

// 配置路由
pub fn configure_ai_evaluation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/ai-evaluations")
            .service(web::resource("").route(web::get().to(list_evaluations)))
            .service(web::resource("/{id}").route(web::get().to(get_evaluation))),
    );
}
