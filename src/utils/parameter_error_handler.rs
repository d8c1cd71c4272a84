//! 请求参数错误处理
//!
//! 把 actix 的 JSON / Query 解析错误转换为统一的 `ApiResponse`。

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let (mut builder, message) = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => (
            HttpResponse::PayloadTooLarge(),
            "请求体过大".to_string(),
        ),
        JsonPayloadError::ContentType => (
            HttpResponse::UnsupportedMediaType(),
            "Content-Type 必须为 application/json".to_string(),
        ),
        JsonPayloadError::Deserialize(e) => {
            (HttpResponse::BadRequest(), format!("请求体格式错误: {e}"))
        }
        other => (HttpResponse::BadRequest(), format!("请求体解析失败: {other}")),
    };
    debug!("Invalid JSON payload for {}: {}", req.path(), message);

    let body = builder.json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, body).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        QueryPayloadError::Deserialize(e) => format!("查询参数格式错误: {e}"),
        other => format!("查询参数解析失败: {other}"),
    };
    debug!("Invalid query string for {}: {}", req.path(), message);

    let body =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, body).into()
}
