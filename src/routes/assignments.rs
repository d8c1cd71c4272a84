use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::questions::requests::CreateQuestionRequest;
use crate::services::AssignmentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 创建作业
pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, body.into_inner())
        .await
}

// 获取作业详情
pub async fn get_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_assignment(&req, path.0).await
}

// 添加题目
pub async fn create_question(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_question(&req, path.0, body.into_inner())
        .await
}

// 作业评测汇总
pub async fn get_testcase_summary(
    req: HttpRequest,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_testcase_summary(&req, path.0).await
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .service(web::resource("").route(web::post().to(create_assignment)))
            .service(web::resource("/{id}").route(web::get().to(get_assignment)))
            .service(web::resource("/{id}/questions").route(web::post().to(create_question)))
            .service(
                web::resource("/{id}/testcase-summary").route(web::get().to(get_testcase_summary)),
            ),
    );
}
