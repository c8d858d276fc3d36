//! # ocrgate-app
//!
//! OCRGATE 서버 바이너리 진입점.
//! 설정 로드, OCR 엔진 와이어링, HTTP 서버 실행, 종료 처리.

mod engine;
mod lifecycle;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ocrgate_core::config::{AppConfig, EngineKind};
use ocrgate_core::config_manager::ConfigManager;
use ocrgate_vision::decoder::DecodeLimits;
use ocrgate_vision::pipeline::OcrPipeline;
use ocrgate_web::WebServer;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::lifecycle::LifecycleManager;

/// 이미지 업로드 → 텍스트 박스 OCR 서버
#[derive(Parser, Debug)]
#[command(name = "ocrgate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 수신 포트
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// 0.0.0.0 바인드 (기본: 127.0.0.1)
    #[arg(long)]
    allow_external: bool,

    /// OCR 엔진 종류
    #[arg(long, short = 'e', value_enum)]
    engine: Option<EngineArg>,

    /// 외부 OCR 엔진 엔드포인트 (remote 엔진)
    #[arg(long)]
    remote_endpoint: Option<String>,

    /// 엔진 호출 타임아웃 (밀리초)
    #[arg(long)]
    engine_timeout_ms: Option<u64>,

    /// 엔진 호출 강제 직렬화
    #[arg(long)]
    serialize_engine: bool,

    /// 최대 업로드 크기 (바이트)
    #[arg(long)]
    max_upload_bytes: Option<usize>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EngineArg {
    Stub,
    Tesseract,
    Remote,
}

impl From<EngineArg> for EngineKind {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Stub => EngineKind::Stub,
            EngineArg::Tesseract => EngineKind::Tesseract,
            EngineArg::Remote => EngineKind::Remote,
        }
    }
}

/// CLI 인자를 파일 설정 위에 덮어쓴다
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(port) = args.port {
        config.web.port = port;
    }
    if args.allow_external {
        config.web.allow_external = true;
    }
    if let Some(max) = args.max_upload_bytes {
        config.web.max_upload_bytes = max;
    }
    if let Some(engine) = args.engine {
        config.engine.kind = engine.into();
    }
    if let Some(ref endpoint) = args.remote_endpoint {
        config.engine.remote.endpoint = endpoint.clone();
    }
    if let Some(ms) = args.engine_timeout_ms {
        config.engine.timeout_ms = Some(ms);
    }
    if args.serialize_engine {
        config.engine.serialize_calls = true;
    }
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let manager = match args.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };

    let mut config = match manager {
        Ok(manager) => {
            info!("설정 파일: {:?}", manager.config_path());
            manager.get()
        }
        // 명시한 파일을 못 읽으면 시작하지 않는다
        Err(e) if args.config.is_some() => {
            return Err(e).context("설정 파일 로드 실패");
        }
        Err(e) => {
            warn!("설정 관리자 초기화 실패, 기본 설정 사용: {e}");
            AppConfig::default_config()
        }
    };

    apply_overrides(&mut config, args);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "ocrgate={level},ocrgate_app={level},ocrgate_core={level},ocrgate_vision={level},ocrgate_network={level},ocrgate_web={level},tower_http={level}",
        level = args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    info!("OCRGATE v{} 시작", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;
    let detector = engine::build_detector(&config.engine).context("OCR 엔진 초기화 실패")?;
    let pipeline = OcrPipeline::new(detector, DecodeLimits::from(config.decode));

    let lifecycle = LifecycleManager::new();
    let server = WebServer::new(pipeline, config.web.clone());
    let mut server_task = tokio::spawn(server.run(lifecycle.subscribe()));

    let result = tokio::select! {
        _ = lifecycle.wait_for_signal() => {
            // 진행 중인 요청 마무리 대기
            (&mut server_task).await
        }
        // 시그널 전에 끝났다면 바인드 실패 등
        result = &mut server_task => result,
    };

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            error!("웹 서버 오류: {e}");
            return Err(e).context("웹 서버 실행 실패");
        }
        Err(e) => return Err(e).context("웹 서버 태스크 중단"),
    }

    info!("OCRGATE 종료");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_file_config() {
        let args = Args::parse_from([
            "ocrgate",
            "--port",
            "9000",
            "--allow-external",
            "--engine",
            "remote",
            "--remote-endpoint",
            "http://ocr:8000/ocr/raw",
            "--engine-timeout-ms",
            "2500",
            "--serialize-engine",
        ]);

        let mut config = AppConfig::default_config();
        apply_overrides(&mut config, &args);

        assert_eq!(config.web.port, 9000);
        assert!(config.web.allow_external);
        assert_eq!(config.engine.kind, EngineKind::Remote);
        assert_eq!(config.engine.remote.endpoint, "http://ocr:8000/ocr/raw");
        assert_eq!(config.engine.timeout_ms, Some(2500));
        assert!(config.engine.serialize_calls);
    }

    #[test]
    fn no_flags_keep_file_config() {
        let args = Args::parse_from(["ocrgate"]);
        let mut config = AppConfig::default_config();
        config.web.port = 7000;
        apply_overrides(&mut config, &args);

        assert_eq!(config.web.port, 7000);
        assert_eq!(config.engine.kind, EngineKind::Stub);
        assert!(config.engine.timeout_ms.is_none());
    }

    #[test]
    fn explicit_config_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocrgate.json");
        std::fs::write(&path, r#"{"web": {"port": 9100}, "engine": {"kind": "stub"}}"#).unwrap();

        let args = Args::parse_from(["ocrgate", "--config", path.to_str().unwrap()]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.web.port, 9100);
    }

    #[test]
    fn unreadable_explicit_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let args = Args::parse_from(["ocrgate", "--config", path.to_str().unwrap()]);
        assert!(load_config(&args).is_err());
    }
}
