//! Tesseract OCR 엔진 어댑터.
//!
//! `leptess` 기반. `tesseract` feature flag 활성화 시에만 빌드된다.
//!
//! Tesseract 핸들은 여러 스레드에서 동시에 쓸 수 없으므로 전용 워커 스레드
//! 하나가 핸들을 소유하고, 요청은 큐로 전달되어 한 번에 하나씩 처리된다.
//! 핸들은 시작 시 한 번만 초기화된다.

use async_trait::async_trait;
use ocrgate_core::error::CoreError;
use ocrgate_core::models::detection::RawDetection;
use ocrgate_core::models::geometry::Point;
use ocrgate_core::models::pixel_buffer::PixelBuffer;
use ocrgate_core::ports::text_detector::TextDetector;
use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// 워커 큐 용량
const JOB_QUEUE_CAPACITY: usize = 64;

/// 워커로 보내는 작업 1건
struct Job {
    image: PixelBuffer,
    reply: oneshot::Sender<Result<Vec<RawDetection>, CoreError>>,
}

/// Tesseract 워드 단위 검출기
pub struct TesseractTextDetector {
    jobs: mpsc::Sender<Job>,
}

impl TesseractTextDetector {
    /// 워커 스레드를 띄우고 Tesseract를 초기화한다.
    ///
    /// 초기화 실패(언어 데이터 없음 등)는 여기서 `CoreError::Config`로 반환된다.
    pub fn new(tessdata_path: Option<PathBuf>, language: &str) -> Result<Self, CoreError> {
        let (jobs_tx, mut jobs_rx) = mpsc::channel::<Job>(JOB_QUEUE_CAPACITY);
        let (ready_tx, ready_rx) = std_mpsc::channel::<Result<(), CoreError>>();
        let language = language.to_string();

        std::thread::Builder::new()
            .name("tesseract-worker".to_string())
            .spawn(move || {
                let tessdata = tessdata_path.map(|p| p.to_string_lossy().to_string());
                let mut lt = match leptess::LepTess::new(tessdata.as_deref(), &language) {
                    Ok(lt) => {
                        let _ = ready_tx.send(Ok(()));
                        lt
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(CoreError::Config(format!(
                            "Tesseract 초기화 실패 ({language}): {e}"
                        ))));
                        return;
                    }
                };

                while let Some(job) = jobs_rx.blocking_recv() {
                    let result = recognize_words(&mut lt, &job.image);
                    let _ = job.reply.send(result);
                }
                debug!("Tesseract 워커 종료");
            })?;

        ready_rx
            .recv()
            .map_err(|_| CoreError::Config("Tesseract 워커가 초기화 전에 종료됨".to_string()))??;

        info!("Tesseract 엔진 초기화 완료");
        Ok(Self { jobs: jobs_tx })
    }
}

/// 워커 스레드 안에서 실행: 워드 박스별 텍스트 + 신뢰도
fn recognize_words(
    lt: &mut leptess::LepTess,
    image: &PixelBuffer,
) -> Result<Vec<RawDetection>, CoreError> {
    let (w, h) = (image.width() as i32, image.height() as i32);

    lt.set_image_from_mem(
        image.data(),
        w,
        h,
        PixelBuffer::CHANNELS as i32,
        image.stride() as i32,
    )
    .map_err(|_| CoreError::Engine("Tesseract 이미지 설정 실패".to_string()))?;

    let boxes = match lt.get_component_boxes(leptess::capi::TessPageIteratorLevel_RIL_WORD, true)
    {
        Some(boxes) => boxes,
        // 워드 없음
        None => return Ok(Vec::new()),
    };

    let mut detections = Vec::new();
    for b in boxes.iter() {
        let geom = b.get_geometry();
        lt.set_rectangle(geom.x, geom.y, geom.w, geom.h);

        let text = lt
            .get_utf8_text()
            .map_err(|e| CoreError::Engine(format!("Tesseract 텍스트 추출 실패: {e}")))?;
        let confidence = f64::from(lt.mean_text_conf()) / 100.0;

        let (x0, y0) = (f64::from(geom.x), f64::from(geom.y));
        let (x1, y1) = (x0 + f64::from(geom.w), y0 + f64::from(geom.h));
        detections.push(RawDetection::new(
            vec![
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ],
            text.trim(),
            confidence,
        ));
    }

    Ok(detections)
}

#[async_trait]
impl TextDetector for TesseractTextDetector {
    async fn detect_text(&self, image: &PixelBuffer) -> Result<Vec<RawDetection>, CoreError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let job = Job {
            image: image.clone(),
            reply: reply_tx,
        };

        self.jobs.send(job).await.map_err(|_| {
            warn!("Tesseract 워커 큐 닫힘");
            CoreError::Engine("Tesseract 워커가 실행 중이 아님".to_string())
        })?;

        reply_rx
            .await
            .map_err(|_| CoreError::Engine("Tesseract 워커 응답 없음".to_string()))?
    }

    fn engine_name(&self) -> &str {
        "tesseract"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_language_data_is_config_error() {
        let result = TesseractTextDetector::new(
            Some(PathBuf::from("/nonexistent/tessdata")),
            "no-such-language",
        );
        assert!(matches!(result, Err(CoreError::Config(_))));
    }
}
