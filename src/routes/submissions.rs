use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::submissions::requests::{
    CreateSubmissionRequest, SubmissionListParams, UpdateCustomMarksRequest,
    UpdateSubmissionStatusRequest,
};
use crate::services::SubmissionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 创建提交
pub async fn create_submission(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, body.into_inner())
        .await
}

// 列出提交
pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, query.into_inner().into())
        .await
}

// 获取提交详情
pub async fn get_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(&req, path.0).await
}

// 更新提交状态
pub async fn update_status(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateSubmissionStatusRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .update_status(&req, path.0, body.into_inner())
        .await
}

// 教师手动给分
pub async fn update_custom_marks(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateCustomMarksRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .update_custom_marks(&req, path.0, body.into_inner())
        .await
}

// 运行测试用例评测
pub async fn evaluate_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.evaluate_submission(&req, path.0).await
}

// 已存储的测试用例结果
pub async fn get_testcase_results(
    req: HttpRequest,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_testcase_results(&req, path.0).await
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .service(
                web::resource("")
                    .route(web::get().to(list_submissions))
                    .route(web::post().to(create_submission)),
            )
            .service(web::resource("/{id}").route(web::get().to(get_submission)))
            .service(web::resource("/{id}/status").route(web::put().to(update_status)))
            .service(
                web::resource("/{id}/custom-marks").route(web::put().to(update_custom_marks)),
            )
            .service(web::resource("/{id}/evaluate").route(web::post().to(evaluate_submission)))
            .service(
                web::resource("/{id}/testcase-results").route(web::get().to(get_testcase_results)),
            ),
    );
}
