//! OCR 엔진 원시 검출 결과.

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// 엔진이 보고한 검출 1건: 영역 다각형, 인식 문자열, 신뢰도.
///
/// 다각형의 꼭짓점 순서(winding)는 엔진이 정한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    /// 검출 영역 윤곽 (보통 4점)
    pub polygon: Vec<Point>,
    /// 인식된 텍스트
    #[serde(default)]
    pub text: String,
    /// 인식 신뢰도 (명목상 0.0 ~ 1.0)
    pub confidence: f64,
}

impl RawDetection {
    pub fn new(polygon: Vec<Point>, text: impl Into<String>, confidence: f64) -> Self {
        Self {
            polygon,
            text: text.into(),
            confidence,
        }
    }
}
