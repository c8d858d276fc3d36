//! # ocrgate-web
//!
//! OCR HTTP 서버.
//! Axum 기반. 업로드 이미지 1장을 받아 텍스트 박스 목록을 JSON으로 반환한다.
//!
//! ## 엔드포인트
//! - `POST /ocr` multipart 이미지 업로드 → `{"boxes": [...]}`
//! - `GET /health` 상태 확인

pub mod error;
pub mod handlers;
pub mod routes;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use ocrgate_core::config::WebConfig;
use ocrgate_vision::pipeline::OcrPipeline;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// 포트 바인드 최대 시도 횟수
const MAX_PORT_ATTEMPTS: u16 = 10;

/// multipart 헤더/경계 여유분
const MULTIPART_OVERHEAD_BYTES: usize = 16 * 1024;

/// 웹 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// 요청 처리 파이프라인 (모든 요청이 공유)
    pub pipeline: Arc<OcrPipeline>,
}

impl AppState {
    pub fn new(pipeline: OcrPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// 라우터 구성
///
/// `max_upload_bytes`는 업로드 파일 기준이며, 본문 제한에는 multipart
/// 오버헤드가 더해진다.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .merge(routes::ocr_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// OCR HTTP 서버
pub struct WebServer {
    config: WebConfig,
    state: AppState,
}

impl WebServer {
    /// 새 서버 생성
    pub fn new(pipeline: OcrPipeline, config: WebConfig) -> Self {
        Self {
            config,
            state: AppState::new(pipeline),
        }
    }

    /// 서버 실행
    ///
    /// 설정 포트에서 시작하여, 포트가 이미 사용 중이면 다음 포트를 시도한다.
    /// 최대 `MAX_PORT_ATTEMPTS`개 포트를 시도한 후 실패하면 에러를 반환한다.
    pub async fn run(self, shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let host = if self.config.allow_external {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        let base_port = self.config.port;
        let mut last_error = None;

        for attempt in 0..MAX_PORT_ATTEMPTS {
            let port = base_port.saturating_add(attempt);

            // u16 끝에 도달하면 같은 포트 반복
            if port == base_port && attempt > 0 {
                break;
            }

            let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
                Ok(a) => a,
                Err(e) => {
                    error!("잘못된 주소 {}:{} ({})", host, port, e);
                    continue;
                }
            };

            match TcpListener::bind(addr).await {
                Ok(listener) => {
                    if attempt > 0 {
                        warn!("포트 {} 사용 불가, 대체 포트 {} 사용", base_port, port);
                    }
                    return self.serve(listener, shutdown_rx).await;
                }
                Err(e) => {
                    if e.kind() == std::io::ErrorKind::AddrInUse {
                        warn!("포트 {} 이미 사용 중, 다음 포트 시도...", port);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrInUse,
                format!(
                    "포트 {}-{} 모두 사용 불가",
                    base_port,
                    base_port.saturating_add(MAX_PORT_ATTEMPTS - 1)
                ),
            )
        }))
    }

    /// 이미 바인드된 리스너로 서버 실행
    ///
    /// 테스트는 포트 0으로 바인드한 리스너를 넘긴다.
    pub async fn serve(
        self,
        listener: TcpListener,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let engine = self.state.pipeline.engine_name().to_string();
        let app = router(self.state, self.config.max_upload_bytes);

        info!(%engine, "OCR 서버 시작: http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                loop {
                    if *shutdown_rx.borrow() {
                        info!("웹 서버 종료 신호 수신");
                        break;
                    }
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            })
            .await?;

        info!("OCR 서버 종료");
        Ok(())
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }
}
