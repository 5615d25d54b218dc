// src/api/rest.rs
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn};

use super::{routes::api_routes, AppState};
use crate::config::{RestApiConfig, ServerConfig, ValidationUtils};
use crate::server::{ServerError, ServerResult};

/// 儀表板頁面與對應檔名
const STATIC_PAGES: [(&str, &str); 3] = [
    ("/", "index.html"),
    ("/bitcoin-etf", "bitcoin-etf.html"),
    ("/ethereum-etf", "ethereum-etf.html"),
];

pub struct RestApi {
    server_config: ServerConfig,
    api_config: RestApiConfig,
    state: AppState,
}

impl RestApi {
    pub fn new(server_config: ServerConfig, api_config: RestApiConfig, state: AppState) -> Self {
        Self {
            server_config,
            api_config,
            state,
        }
    }

    pub async fn start(self) -> ServerResult<()> {
        let app = build_router(self.state, &self.server_config, &self.api_config);

        let ip = ValidationUtils::ip_addr(&self.server_config.host, "server.host")
            .map_err(|e| ServerError::Config(e.to_string()))?;
        let addr = SocketAddr::from((ip, self.server_config.port));

        let listener = TcpListener::bind(addr).await?;
        info!("Starting REST API server on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Runtime(e.to_string()))?;

        info!("REST API server stopped");
        Ok(())
    }
}

/// 組裝完整應用：API 路由、靜態頁面與中間件
pub fn build_router(state: AppState, server_config: &ServerConfig, api_config: &RestApiConfig) -> Router {
    // axum 不允許巢狀掛載於根路徑
    let base_path = api_config.base_path.trim_end_matches('/');
    let mut app = if base_path.is_empty() {
        Router::new().merge(api_routes())
    } else {
        Router::new().nest(base_path, api_routes())
    };

    if server_config.serve_static {
        let dir = Path::new(&server_config.static_files_dir);
        for (path, file) in STATIC_PAGES {
            app = app.route_service(path, ServeFile::new(dir.join(file)));
        }
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(false))
                .on_response(DefaultOnResponse::new()),
        )
        .layer(build_cors_layer(api_config))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(server_config.request_timeout)))
}

fn build_cors_layer(api_config: &RestApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if api_config.cors_allow_all {
        return cors.allow_origin(Any);
    }

    let origins = api_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%origin, error = %e, "忽略無效的 CORS 來源");
                None
            }
        })
        .collect::<Vec<_>>();
    cors.allow_origin(origins)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("接收到關閉信號，正在退出..."),
        Err(e) => {
            warn!("無法監聽關閉信號，伺服器將持續運行: {}", e);
            std::future::pending::<()>().await
        }
    }
}
