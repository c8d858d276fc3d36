//! 라우트 정의.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::AppState;

/// 라우트 생성
pub fn ocr_routes() -> Router<AppState> {
    Router::new()
        // 이미지 업로드 → 텍스트 박스
        .route("/ocr", post(handlers::ocr::recognize))
        // 상태 확인
        .route("/health", get(handlers::health::get_health))
}
