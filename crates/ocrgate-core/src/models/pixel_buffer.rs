//! 정규화된 RGB 픽셀 버퍼.

use crate::error::CoreError;

/// 3채널 RGB, 좌상단 원점, 행 우선(row-major) 픽셀 버퍼.
///
/// 불변식: `data.len() == width * height * 3`, `width > 0`, `height > 0`.
/// 요청 처리 호출이 단독 소유하며 엔진 호출 후 폐기된다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// 픽셀당 채널 수 (RGB 고정)
    pub const CHANNELS: usize = 3;

    /// 새 픽셀 버퍼 생성: 크기/길이 불변식 검증
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::Decode(format!(
                "이미지 면적이 0: {width}x{height}"
            )));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(Self::CHANNELS))
            .ok_or_else(|| CoreError::Decode(format!("이미지가 너무 큼: {width}x{height}")))?;

        if data.len() != expected {
            return Err(CoreError::Decode(format!(
                "픽셀 데이터 길이 불일치: expected={expected}, actual={}",
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 행 우선 RGB 바이트
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// 한 행의 바이트 수
    pub fn stride(&self) -> usize {
        self.width as usize * Self::CHANNELS
    }

    /// (x, y) 위치 픽셀. 범위를 벗어나면 `None`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.stride() + x as usize * Self::CHANNELS;
        Some([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ])
    }

    /// 소유권을 넘기며 원시 바이트 반환
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}
