//! 다각형 → 축 정렬 바운딩 박스 정규화.
//!
//! 좌표 클램핑도 신뢰도 보정도 하지 않는다. 엔진 값의 불일치는
//! 고치지 않고 그대로 드러낸다.

use ocrgate_core::models::detection::RawDetection;
use ocrgate_core::models::geometry::{BoundingBox, Point};

/// 검출 1건을 바운딩 박스로 변환
///
/// 점 1개나 일직선 다각형은 너비/높이 0 박스가 된다.
/// 빈 다각형은 원점의 0 박스로 취급한다.
pub fn normalize(detection: RawDetection) -> BoundingBox {
    let RawDetection {
        polygon,
        text,
        confidence,
    } = detection;

    let (x_min, y_min, x_max, y_max) = extent(&polygon).unwrap_or((0.0, 0.0, 0.0, 0.0));

    BoundingBox {
        x: x_min,
        y: y_min,
        width: x_max - x_min,
        height: y_max - y_min,
        text,
        confidence,
    }
}

/// 순서와 개수를 보존하며 일괄 변환
pub fn normalize_all(detections: Vec<RawDetection>) -> Vec<BoundingBox> {
    detections.into_iter().map(normalize).collect()
}

/// (x_min, y_min, x_max, y_max)
fn extent(polygon: &[Point]) -> Option<(f64, f64, f64, f64)> {
    let (first, rest) = polygon.split_first()?;
    Some(rest.iter().fold(
        (first.x, first.y, first.x, first.y),
        |(x_min, y_min, x_max, y_max), p| {
            (x_min.min(p.x), y_min.min(p.y), x_max.max(p.x), y_max.max(p.y))
        },
    ))
}
