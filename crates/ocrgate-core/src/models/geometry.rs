//! 좌표 및 축 정렬 바운딩 박스.

use serde::{Deserialize, Serialize};

/// 2D 점 (부동소수 좌표). JSON에서는 `[x, y]` 쌍으로 표현된다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// 다각형을 감싸는 최소 축 정렬 사각형 + 인식 결과.
///
/// `width`, `height`는 음수가 될 수 없다. 면적 0인 박스도 그대로 전달된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// 다각형 x 좌표 최솟값
    pub x: f64,
    /// 다각형 y 좌표 최솟값
    pub y: f64,
    /// max-x − min-x
    pub width: f64,
    /// max-y − min-y
    pub height: f64,
    /// 인식된 텍스트 (빈 문자열 가능)
    pub text: String,
    /// 인식 신뢰도 (엔진 값 그대로, 보정하지 않음)
    pub confidence: f64,
}
