//! OCR 엔진 와이어링.
//!
//! 설정의 `engine.kind`로 어댑터를 고른 뒤 정책 래퍼를 씌운다:
//! 직렬화 게이트가 안쪽, 타임아웃이 바깥쪽이다.

use ocrgate_core::config::{EngineConfig, EngineKind};
use ocrgate_core::error::CoreError;
use ocrgate_core::ports::text_detector::TextDetector;
use ocrgate_network::remote_engine::RemoteTextDetector;
use ocrgate_vision::serialized::serialize_if_needed;
use ocrgate_vision::stub::StubTextDetector;
use ocrgate_vision::timeout::TimeoutDetector;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// 설정 → 요청 처리에 쓸 엔진
pub fn build_detector(config: &EngineConfig) -> Result<Arc<dyn TextDetector>, CoreError> {
    let base = build_adapter(config)?;
    let gated = serialize_if_needed(base, config.serialize_calls);

    let detector = match config.timeout_ms {
        Some(ms) if ms > 0 => {
            info!(timeout_ms = ms, "엔진 호출 타임아웃 적용");
            Arc::new(TimeoutDetector::new(gated, Duration::from_millis(ms))) as Arc<dyn TextDetector>
        }
        _ => gated,
    };

    info!(engine = detector.engine_name(), "OCR 엔진 준비 완료");
    Ok(detector)
}

fn build_adapter(config: &EngineConfig) -> Result<Arc<dyn TextDetector>, CoreError> {
    match config.kind {
        EngineKind::Stub => Ok(Arc::new(StubTextDetector::new(
            config.stub.detections.clone(),
        ))),
        EngineKind::Remote => Ok(Arc::new(RemoteTextDetector::new(&config.remote)?)),
        EngineKind::Tesseract => build_tesseract(config),
    }
}

#[cfg(feature = "tesseract")]
fn build_tesseract(config: &EngineConfig) -> Result<Arc<dyn TextDetector>, CoreError> {
    use ocrgate_vision::tesseract::TesseractTextDetector;

    Ok(Arc::new(TesseractTextDetector::new(
        config.tesseract.tessdata_path.clone(),
        &config.tesseract.language,
    )?))
}

#[cfg(not(feature = "tesseract"))]
fn build_tesseract(_config: &EngineConfig) -> Result<Arc<dyn TextDetector>, CoreError> {
    Err(CoreError::Config(
        "tesseract 엔진은 `tesseract` feature로 빌드해야 합니다".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocrgate_core::models::detection::RawDetection;
    use ocrgate_core::models::geometry::Point;
    use ocrgate_core::models::pixel_buffer::PixelBuffer;

    fn image() -> PixelBuffer {
        PixelBuffer::new(1, 1, vec![0, 0, 0]).unwrap()
    }

    #[tokio::test]
    async fn stub_returns_configured_detections() {
        let mut config = EngineConfig::default();
        config.stub.detections = vec![RawDetection::new(
            vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)],
            "hi",
            0.5,
        )];

        let detector = build_detector(&config).unwrap();
        assert_eq!(detector.engine_name(), "stub");

        let detections = detector.detect_text(&image()).await.unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].text, "hi");
    }

    #[tokio::test]
    async fn wrappers_keep_engine_name() {
        let config = EngineConfig {
            serialize_calls: true,
            timeout_ms: Some(1_000),
            ..EngineConfig::default()
        };

        let detector = build_detector(&config).unwrap();
        assert_eq!(detector.engine_name(), "stub");
        assert!(detector.detect_text(&image()).await.unwrap().is_empty());
    }

    #[test]
    fn remote_with_empty_endpoint_is_config_error() {
        let mut config = EngineConfig {
            kind: EngineKind::Remote,
            ..EngineConfig::default()
        };
        config.remote.endpoint.clear();

        assert!(matches!(
            build_detector(&config),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn remote_builds_from_defaults() {
        let config = EngineConfig {
            kind: EngineKind::Remote,
            ..EngineConfig::default()
        };
        let detector = build_detector(&config).unwrap();
        assert_eq!(detector.engine_name(), "remote");
    }

    #[cfg(not(feature = "tesseract"))]
    #[test]
    fn tesseract_without_feature_is_config_error() {
        let config = EngineConfig {
            kind: EngineKind::Tesseract,
            ..EngineConfig::default()
        };
        assert!(matches!(
            build_detector(&config),
            Err(CoreError::Config(_))
        ));
    }
}
