//! OCR 업로드 핸들러.
//!
//! POST /ocr: multipart 파일 1개를 받아 `{"boxes": [...]}`를 반환한다.
//! 결과는 전부 아니면 전무: 실패 시 부분 결과 없이 에러 본문만 반환된다.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use ocrgate_core::error::ErrorKind;
use ocrgate_core::models::response::OcrResponse;
use std::time::Instant;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// 업로드 파일 필드 이름
pub const UPLOAD_FIELD: &str = "file";

/// 이미지 업로드 → 텍스트 박스
///
/// POST /ocr (multipart/form-data, 필드 `file`)
///
/// `file` 필드가 없으면 파일명이 붙은 첫 필드를 사용한다.
pub async fn recognize(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<OcrResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let started = Instant::now();

    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let upload = read_upload(&mut multipart).await?;
    let upload_len = upload.len();
    debug!(%request_id, upload_len, "업로드 수신");

    match state.pipeline.process(upload).await {
        Ok(response) => {
            debug!(
                %request_id,
                boxes = response.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "OCR 요청 완료"
            );
            Ok(Json(response))
        }
        Err(e) => {
            match e.kind() {
                ErrorKind::Decode => warn!(%request_id, upload_len, "업로드 디코딩 실패: {e}"),
                ErrorKind::Engine | ErrorKind::Other => {
                    error!(%request_id, upload_len, "OCR 처리 실패: {e}")
                }
            }
            Err(e.into())
        }
    }
}

/// multipart 본문에서 업로드 바이트 추출
async fn read_upload(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    let mut fallback: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let is_upload_field = field.name() == Some(UPLOAD_FIELD);
        let has_file_name = field.file_name().is_some();

        if !is_upload_field && (fallback.is_some() || !has_file_name) {
            continue;
        }

        let bytes = field.bytes().await.map_err(multipart_error)?;
        if is_upload_field {
            return Ok(Vec::from(bytes));
        }
        fallback = Some(Vec::from(bytes));
    }

    fallback.ok_or_else(|| {
        ApiError::BadRequest(format!("업로드 파일 필드 없음 ('{UPLOAD_FIELD}')"))
    })
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::BadRequest(e.body_text())
    }
}
