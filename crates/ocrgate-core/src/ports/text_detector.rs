//! 텍스트 검출 포트: 외부 OCR 엔진 경계.
//!
//! 구현체:
//! - `StubTextDetector` (ocrgate-vision): 고정 검출 목록, 테스트용
//! - `TesseractTextDetector` (ocrgate-vision, `tesseract` feature)
//! - `RemoteTextDetector` (ocrgate-network): 외부 OCR 서버 HTTP 호출

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::detection::RawDetection;
use crate::models::pixel_buffer::PixelBuffer;

/// OCR 엔진 능력: 픽셀 버퍼 → 원시 검출 목록
///
/// 시작 시 한 번 생성되어 `Arc<dyn TextDetector>`로 모든 요청이 공유한다.
/// 생성 이후에는 읽기 전용으로 취급된다.
#[async_trait]
pub trait TextDetector: Send + Sync {
    /// 이미지에서 텍스트 영역 검출 + 인식
    ///
    /// 검출 없음(빈 Vec)은 에러가 아니다.
    /// 엔진 내부 실패는 `CoreError::Engine`으로 보고한다.
    async fn detect_text(&self, image: &PixelBuffer) -> Result<Vec<RawDetection>, CoreError>;

    /// 엔진 이름 (예: "stub", "tesseract", "remote")
    fn engine_name(&self) -> &str;

    /// 여러 호출자가 동시에 `detect_text`를 호출해도 안전한지 여부.
    ///
    /// `false`이면 와이어링 단계에서 상호 배제 게이트로 감싼다.
    fn is_concurrent_safe(&self) -> bool {
        true
    }
}
