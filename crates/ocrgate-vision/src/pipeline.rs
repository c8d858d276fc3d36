//! 요청 처리 파이프라인 오케스트레이터.
//!
//! `Received → Decoded → Recognized → Assembled` 순으로 진행하며,
//! 디코딩 실패와 엔진 실패는 각자의 경계에서 바로 반환된다.
//! 부분 결과는 없다.

use ocrgate_core::error::CoreError;
use ocrgate_core::models::response::OcrResponse;
use ocrgate_core::ports::text_detector::TextDetector;
use std::sync::Arc;
use tracing::debug;

use crate::assembler;
use crate::decoder::{self, DecodeLimits};
use crate::normalizer;

/// 디코딩 → 엔진 → 정규화 → 조립
///
/// 프로세스당 하나를 만들어 모든 요청이 공유한다 (clone은 `Arc` 복사).
#[derive(Clone)]
pub struct OcrPipeline {
    detector: Arc<dyn TextDetector>,
    limits: DecodeLimits,
}

impl OcrPipeline {
    /// 새 파이프라인 생성
    pub fn new(detector: Arc<dyn TextDetector>, limits: DecodeLimits) -> Self {
        Self { detector, limits }
    }

    /// 사용 중인 엔진 이름
    pub fn engine_name(&self) -> &str {
        self.detector.engine_name()
    }

    /// 업로드 1건 처리
    pub async fn process(&self, upload: Vec<u8>) -> Result<OcrResponse, CoreError> {
        let upload_len = upload.len();
        let limits = self.limits;

        // 큰 이미지 디코딩이 런타임 워커를 막지 않도록 블로킹 풀에서 실행
        let image = tokio::task::spawn_blocking(move || {
            decoder::decode_image_with_limits(&upload, limits)
        })
        .await
        .map_err(|e| CoreError::Decode(format!("디코딩 작업 실패: {e}")))??;

        debug!(
            upload_len,
            width = image.width(),
            height = image.height(),
            "디코딩 완료"
        );

        let detections = self.detector.detect_text(&image).await?;
        drop(image);
        debug!(
            engine = self.detector.engine_name(),
            count = detections.len(),
            "인식 완료"
        );

        let boxes = normalizer::normalize_all(detections);
        Ok(assembler::assemble(boxes))
    }
}
