//! API 에러 처리.
//!
//! 디코딩 실패(클라이언트 원인)는 4xx, 엔진 실패(서버 원인)는 5xx로 매핑한다.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ocrgate_core::error::{CoreError, ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API 에러
#[derive(Debug, Error)]
pub enum ApiError {
    /// 업로드가 읽을 수 없는/손상된 이미지
    #[error("{0}")]
    Decode(String),

    /// OCR 엔진 실패
    #[error("{0}")]
    Engine(String),

    /// 잘못된 요청 (multipart 아님, 파일 필드 없음)
    #[error("잘못된 요청: {0}")]
    BadRequest(String),

    /// 업로드 크기 초과
    #[error("업로드 크기 초과: {0}")]
    PayloadTooLarge(String),

    /// 내부 서버 오류
    #[error("내부 서버 오류: {0}")]
    Internal(String),
}

impl ApiError {
    /// 응답 본문의 `error` 필드 값
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Decode(_) => "decode_error",
            ApiError::Engine(_) => "engine_error",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Decode(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Engine(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 에러 응답 본문
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 에러 종류 (예: "decode_error")
    pub error: String,
    /// 사람이 읽을 수 있는 메시지
    pub message: String,
    /// HTTP 상태 코드
    pub status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err.kind() {
            ErrorKind::Decode => ApiError::Decode(err.to_string()),
            ErrorKind::Engine => ApiError::Engine(err.to_string()),
            ErrorKind::Other => ApiError::Internal(err.to_string()),
        }
    }
}
