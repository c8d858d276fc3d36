//! 엔진 호출 직렬화 게이트.
//!
//! 동시 호출에 안전하지 않은 엔진은 이 래퍼로 감싸 한 번에 하나의
//! `detect_text`만 실행되게 한다. 게이트는 엔진 호출 구간만 잠그므로
//! 다른 요청의 업로드 수신/디코딩/정규화는 계속 병렬로 진행된다.
//! 처리량 상한은 `1 / 엔진 지연`이 된다.

use async_trait::async_trait;
use ocrgate_core::error::CoreError;
use ocrgate_core::models::detection::RawDetection;
use ocrgate_core::models::pixel_buffer::PixelBuffer;
use ocrgate_core::ports::text_detector::TextDetector;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// 상호 배제 게이트로 감싼 엔진
pub struct SerializedDetector {
    inner: Arc<dyn TextDetector>,
    gate: Mutex<()>,
}

impl SerializedDetector {
    pub fn new(inner: Arc<dyn TextDetector>) -> Self {
        Self {
            inner,
            gate: Mutex::new(()),
        }
    }
}

#[async_trait]
impl TextDetector for SerializedDetector {
    async fn detect_text(&self, image: &PixelBuffer) -> Result<Vec<RawDetection>, CoreError> {
        let _permit = self.gate.lock().await;
        debug!(engine = self.inner.engine_name(), "엔진 게이트 획득");
        self.inner.detect_text(image).await
    }

    fn engine_name(&self) -> &str {
        self.inner.engine_name()
    }
}

/// 엔진이 동시 호출에 안전하지 않거나 `force`가 켜져 있으면 게이트로 감싼다
pub fn serialize_if_needed(detector: Arc<dyn TextDetector>, force: bool) -> Arc<dyn TextDetector> {
    if force || !detector.is_concurrent_safe() {
        info!(
            engine = detector.engine_name(),
            "엔진 호출 직렬화 적용 (동시 1건)"
        );
        Arc::new(SerializedDetector::new(detector))
    } else {
        detector
    }
}
