//! HTTP 요청 metrics middleware.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};

use crate::metrics::{record_http_duration, record_http_request, record_http_response};

/// 라우트에 매칭되지 않은 요청의 path 라벨.
const UNMATCHED_PATH: &str = "unmatched";

/// path 라벨 결정.
///
/// 라우트 템플릿(`/patients/{id}`)이 있으면 그대로 쓰고, 없으면 라벨 수가
/// 늘어나지 않도록 [`UNMATCHED_PATH`]로 묶습니다.
fn path_label(request: &Request) -> String {
    match request.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_string(),
        None => UNMATCHED_PATH.to_string(),
    }
}

/// HTTP 메트릭을 수집하는 미들웨어 레이어.
///
/// - `http_requests_total{method,path}`
/// - `http_responses_total{method,path,status}`
/// - `http_request_duration_seconds{method,path}`
pub async fn metrics_layer(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = path_label(&request);

    record_http_request(&method, &path);

    let response = next.run(request).await;

    record_http_response(&method, &path, response.status().as_u16());
    record_http_duration(&method, &path, start.elapsed().as_secs_f64());

    response
}
