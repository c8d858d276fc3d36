//! 결정적 스텁 엔진.
//!
//! 실제 OCR 모델 없이 파이프라인을 테스트/데모하기 위한 `TextDetector`.
//! 입력 이미지와 무관하게 항상 같은 검출 목록을 반환한다.

use async_trait::async_trait;
use ocrgate_core::error::CoreError;
use ocrgate_core::models::detection::RawDetection;
use ocrgate_core::models::pixel_buffer::PixelBuffer;
use ocrgate_core::ports::text_detector::TextDetector;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// 고정 검출 목록을 반환하는 스텁
#[derive(Debug, Default)]
pub struct StubTextDetector {
    detections: Vec<RawDetection>,
    /// 설정 시 항상 엔진 에러 반환
    failure: Option<String>,
    /// 인위적 지연 (동시성 테스트용)
    latency: Option<Duration>,
    calls: AtomicUsize,
}

impl StubTextDetector {
    /// 고정 검출 목록으로 생성
    pub fn new(detections: Vec<RawDetection>) -> Self {
        Self {
            detections,
            ..Self::default()
        }
    }

    /// 텍스트가 없는 이미지를 흉내내는 스텁
    pub fn empty() -> Self {
        Self::default()
    }

    /// 항상 실패하는 스텁
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// 호출마다 지연 추가
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// 지금까지의 `detect_text` 호출 수
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextDetector for StubTextDetector {
    async fn detect_text(&self, _image: &PixelBuffer) -> Result<Vec<RawDetection>, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match &self.failure {
            Some(message) => Err(CoreError::Engine(message.clone())),
            None => Ok(self.detections.clone()),
        }
    }

    fn engine_name(&self) -> &str {
        "stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocrgate_core::models::geometry::Point;

    fn pixel() -> PixelBuffer {
        PixelBuffer::new(1, 1, vec![0, 0, 0]).unwrap()
    }

    #[tokio::test]
    async fn returns_same_list_every_call() {
        let detection = RawDetection::new(vec![Point::new(1.0, 2.0)], "x", 0.3);
        let stub = StubTextDetector::new(vec![detection.clone()]);

        for _ in 0..3 {
            assert_eq!(stub.detect_text(&pixel()).await.unwrap(), vec![detection.clone()]);
        }
        assert_eq!(stub.call_count(), 3);
    }

    #[tokio::test]
    async fn failing_stub_reports_engine_error() {
        let stub = StubTextDetector::failing("boom");
        let err = stub.detect_text(&pixel()).await.unwrap_err();
        assert!(matches!(err, CoreError::Engine(ref m) if m == "boom"));
    }
}
