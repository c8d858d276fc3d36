//! 엔진 호출 타임아웃.
//!
//! 만료 시 `CoreError::EngineTimeout`(엔진 실패 분류, HTTP 500).
//! 직렬화 게이트 바깥에 두면 게이트 대기 시간도 타임아웃에 포함된다.

use async_trait::async_trait;
use ocrgate_core::error::CoreError;
use ocrgate_core::models::detection::RawDetection;
use ocrgate_core::models::pixel_buffer::PixelBuffer;
use ocrgate_core::ports::text_detector::TextDetector;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// 호출당 타임아웃을 거는 엔진 래퍼
pub struct TimeoutDetector {
    inner: Arc<dyn TextDetector>,
    timeout: Duration,
}

impl TimeoutDetector {
    pub fn new(inner: Arc<dyn TextDetector>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl TextDetector for TimeoutDetector {
    async fn detect_text(&self, image: &PixelBuffer) -> Result<Vec<RawDetection>, CoreError> {
        match tokio::time::timeout(self.timeout, self.inner.detect_text(image)).await {
            Ok(result) => result,
            Err(_) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                warn!(
                    engine = self.inner.engine_name(),
                    timeout_ms, "엔진 호출 타임아웃"
                );
                Err(CoreError::EngineTimeout { timeout_ms })
            }
        }
    }

    fn engine_name(&self) -> &str {
        self.inner.engine_name()
    }

    fn is_concurrent_safe(&self) -> bool {
        self.inner.is_concurrent_safe()
    }
}
