//! 외부 OCR 엔진 클라이언트.
//!
//! PaddleOCR 계열 추론 서버를 HTTP로 호출한다. 픽셀 버퍼를 PNG로 인코딩해
//! multipart `file` 필드로 보내고, 엔진의 원시 출력 형태를 그대로 받는다:
//!
//! ```text
//! {"result": [ page, ... ]}      또는 바로 [ page, ... ]
//! page = null | [ [polygon, [text, score]], ... ]
//! polygon = [[x1, y1], [x2, y2], ...]
//! ```
//!
//! 단일 이미지 입력이므로 첫 페이지만 사용한다. 나머지 페이지는 무시한다.

use async_trait::async_trait;
use image::{ImageFormat, RgbImage};
use ocrgate_core::config::RemoteEngineConfig;
use ocrgate_core::error::CoreError;
use ocrgate_core::models::detection::RawDetection;
use ocrgate_core::models::geometry::Point;
use ocrgate_core::models::pixel_buffer::PixelBuffer;
use ocrgate_core::ports::text_detector::TextDetector;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::io::Cursor;
use std::time::Duration;
use tracing::{debug, warn};

/// 엔진 출력 한 줄: (다각형, (텍스트, 점수))
type EngineLine = (Vec<Point>, (String, f64));

/// 엔진 출력 한 페이지 (텍스트가 없으면 null)
type EnginePage = Option<Vec<EngineLine>>;

#[derive(Deserialize)]
#[serde(untagged)]
enum EngineBody {
    Bare(Option<Vec<EnginePage>>),
    Envelope {
        #[serde(default)]
        result: Option<Vec<EnginePage>>,
    },
}

/// 외부 OCR 엔진 HTTP 클라이언트
#[derive(Debug)]
pub struct RemoteTextDetector {
    /// HTTP 클라이언트
    http_client: reqwest::Client,
    /// 엔진 엔드포인트 URL
    endpoint: String,
}

impl RemoteTextDetector {
    /// 새 RemoteTextDetector 생성
    pub fn new(config: &RemoteEngineConfig) -> Result<Self, CoreError> {
        if config.endpoint.is_empty() {
            return Err(CoreError::Config("OCR 엔진 엔드포인트 미설정".into()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CoreError::Config(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        debug!(
            endpoint = %config.endpoint,
            timeout = config.timeout_secs,
            "RemoteTextDetector 초기화"
        );

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// 픽셀 버퍼 → PNG 바이트
    fn encode_png(image: &PixelBuffer) -> Result<Vec<u8>, CoreError> {
        let rgb = RgbImage::from_raw(image.width(), image.height(), image.data().to_vec())
            .ok_or_else(|| CoreError::Engine("픽셀 버퍼 → 이미지 변환 실패".into()))?;

        let mut bytes = Vec::new();
        rgb.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| CoreError::Engine(format!("PNG 인코딩 실패: {}", e)))?;
        Ok(bytes)
    }

    /// 엔진 원시 출력 파싱 (첫 페이지만)
    fn parse_engine_output(body: &str) -> Result<Vec<RawDetection>, CoreError> {
        let parsed: EngineBody = serde_json::from_str(body)
            .map_err(|e| CoreError::Engine(format!("엔진 응답 파싱 실패: {}", e)))?;

        let pages = match parsed {
            EngineBody::Bare(pages) => pages,
            EngineBody::Envelope { result } => result,
        }
        .unwrap_or_default();

        if pages.len() > 1 {
            debug!(pages = pages.len(), "추가 페이지 무시 (첫 페이지만 사용)");
        }

        let lines = pages.into_iter().next().flatten().unwrap_or_default();

        Ok(lines
            .into_iter()
            .map(|(polygon, (text, score))| RawDetection::new(polygon, text, score))
            .collect())
    }
}

#[async_trait]
impl TextDetector for RemoteTextDetector {
    async fn detect_text(&self, image: &PixelBuffer) -> Result<Vec<RawDetection>, CoreError> {
        let png = Self::encode_png(image)?;
        let png_len = png.len();

        let part = Part::bytes(png)
            .file_name("image.png")
            .mime_str("image/png")
            .map_err(|e| CoreError::Engine(format!("multipart 구성 실패: {}", e)))?;
        let form = Form::new().part("file", part);

        debug!(
            endpoint = %self.endpoint,
            png_len,
            "외부 OCR 엔진 호출"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CoreError::Engine(format!("OCR 엔진 호출 실패: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Engine(format!("OCR 엔진 응답 읽기 실패: {}", e)))?;

        if !status.is_success() {
            warn!(status = %status, "OCR 엔진 오류 응답");
            return Err(CoreError::Engine(format!(
                "OCR 엔진 오류 ({}): {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let detections = Self::parse_engine_output(&body)?;
        debug!(count = detections.len(), "OCR 엔진 결과 수신");
        Ok(detections)
    }

    fn engine_name(&self) -> &str {
        "remote"
    }
}

// ============================================================
// 테스트
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn config(endpoint: String) -> RemoteEngineConfig {
        RemoteEngineConfig {
            endpoint,
            timeout_secs: 5,
        }
    }

    fn image() -> PixelBuffer {
        PixelBuffer::new(2, 2, vec![255; 12]).unwrap()
    }

    #[test]
    fn empty_endpoint_is_config_error() {
        let result = RemoteTextDetector::new(&config(String::new()));
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn parse_single_page() {
        let body = r#"{"result": [[
            [[[0, 0], [100, 0], [100, 50], [0, 50]], ["HELLO", 0.95]],
            [[[10.5, 60], [40, 60], [40, 80], [10.5, 80]], ["", 0.2]]
        ]]}"#;
        let detections = RemoteTextDetector::parse_engine_output(body).unwrap();
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].text, "HELLO");
        assert_eq!(detections[0].polygon[2], Point::new(100.0, 50.0));
        assert_eq!(detections[1].polygon[0].x, 10.5);
        assert_eq!(detections[1].text, "");
    }

    #[test]
    fn parse_bare_array() {
        let body = r#"[[ [[[1, 2], [3, 4], [5, 6]], ["x", 0.5]] ]]"#;
        let detections = RemoteTextDetector::parse_engine_output(body).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].polygon.len(), 3);
    }

    #[test]
    fn only_first_page_used() {
        let body = r#"{"result": [
            [ [[[0, 0], [1, 1]], ["first", 0.9]] ],
            [ [[[0, 0], [1, 1]], ["second", 0.9]] ]
        ]}"#;
        let detections = RemoteTextDetector::parse_engine_output(body).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].text, "first");
    }

    #[test]
    fn null_page_and_null_result_are_empty() {
        assert!(RemoteTextDetector::parse_engine_output(r#"{"result": [null]}"#)
            .unwrap()
            .is_empty());
        assert!(RemoteTextDetector::parse_engine_output(r#"{"result": null}"#)
            .unwrap()
            .is_empty());
        assert!(RemoteTextDetector::parse_engine_output("[]")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn malformed_output_is_engine_error() {
        let result = RemoteTextDetector::parse_engine_output(r#"{"result": [[["oops"]]]}"#);
        assert!(matches!(result, Err(CoreError::Engine(_))));
    }

    #[test]
    fn png_encoding_roundtrip_dimensions() {
        let png = RemoteTextDetector::encode_png(&image()).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2, 2));
    }

    #[tokio::test]
    async fn posts_multipart_and_parses_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/ocr/raw")
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data.*".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result": [[ [[[0, 0], [100, 0], [100, 50], [0, 50]], ["HELLO", 0.95]] ]]}"#)
            .create_async()
            .await;

        let detector =
            RemoteTextDetector::new(&config(format!("{}/ocr/raw", server.url()))).unwrap();
        let detections = detector.detect_text(&image()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].text, "HELLO");
        assert_eq!(detector.engine_name(), "remote");
    }

    #[tokio::test]
    async fn server_error_is_engine_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/ocr/raw")
            .with_status(500)
            .with_body("model crashed")
            .create_async()
            .await;

        let detector =
            RemoteTextDetector::new(&config(format!("{}/ocr/raw", server.url()))).unwrap();
        let err = detector.detect_text(&image()).await.unwrap_err();

        assert!(matches!(err, CoreError::Engine(ref m) if m.contains("model crashed")));
    }
}
