use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RateLimit;
use crate::models::test_cases::requests::{
    CreateTestCaseRequest, RunTestCasesRequest, TestCaseListQuery,
};
use crate::services::TestCaseService;
use crate::utils::SafeIDI64;

// 懒加载的全局 TestCaseService 实例
static TEST_CASE_SERVICE: Lazy<TestCaseService> = Lazy::new(TestCaseService::new_lazy);

// 列出题目的测试用例
pub async fn list_test_cases(
    req: HttpRequest,
    path: SafeIDI64,
    query: web::Query<TestCaseListQuery>,
) -> ActixResult<HttpResponse> {
    TEST_CASE_SERVICE
        .list_test_cases(&req, path.0, query.into_inner())
        .await
}

// 添加测试用例
pub async fn create_test_case(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<CreateTestCaseRequest>,
) -> ActixResult<HttpResponse> {
    TEST_CASE_SERVICE
        .create_test_case(&req, path.0, body.into_inner())
        .await
}

// 提交前试运行公开用例
pub async fn run_test_cases(
    req: HttpRequest,
    body: web::Json<RunTestCasesRequest>,
) -> ActixResult<HttpResponse> {
    TEST_CASE_SERVICE
        .run_test_cases(&req, body.into_inner())
        .await
}

// 配置路由
pub fn configure_test_case_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/questions").service(
            web::resource("/{id}/testcases")
                .route(web::get().to(list_test_cases))
                .route(web::post().to(create_test_case)),
        ),
    )
    .service(
        web::scope("/api/v1/testcases").service(
            web::resource("/run")
                // 试运行会真实调用沙箱，按 IP 限流
                .wrap(RateLimit::testcase_run())
                .route(web::post().to(run_test_cases)),
        ),
    );
}
