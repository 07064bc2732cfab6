//! HTTP 适配层：把转换器暴露为 POST 接口
//! 全部中间商都失败时才返回错误；部分失败不是错误状态
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::GlobalConfig;
use crate::converter::LinkConverter;
use crate::error::ConvResult;
use crate::rule::MiddlemanInfo;

/// 转换请求体
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertRequest {
    pub url: String,
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    converter: Arc<LinkConverter>,
}

pub fn build_router(converter: Arc<LinkConverter>, config: &GlobalConfig) -> Router {
    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/api/converter", post(convert_handler))
        .route("/api/middlemen", get(middlemen_handler))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { converter })
}

/// 启动 HTTP 服务，Ctrl+C 优雅退出
pub async fn serve(converter: Arc<LinkConverter>, config: GlobalConfig) -> ConvResult<()> {
    let app = build_router(converter, &config);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("linkshift listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}

async fn convert_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Response {
    // 请求体错误与"无法转换"(422) 区分开，统一返回 400
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let url = req.url.trim();
    if url.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "url is required".to_string());
    }

    let target = req.target.as_deref().map(str::trim).filter(|t| !t.is_empty());
    match target {
        Some(target) => match state.converter.convert_one(url, target) {
            Ok(link) => {
                let mut body = Map::new();
                body.insert(target.to_string(), link.map(Value::String).unwrap_or(Value::Null));
                (StatusCode::OK, Json(Value::Object(body))).into_response()
            }
            Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        },
        None => {
            let result = state.converter.convert_all(url);
            if result.is_empty() {
                tracing::debug!(url = %url, "no middleman could convert the link");
                return error_response(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "No middleman link could be generated for this URL".to_string(),
                );
            }
            (StatusCode::OK, Json(result)).into_response()
        }
    }
}

async fn middlemen_handler(State(state): State<AppState>) -> Json<Vec<MiddlemanInfo>> {
    Json(state.converter.middlemen())
}

async fn health() -> &'static str {
    "ok"
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
