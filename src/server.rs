use crate::{
    api::types::{ImageQuery, LabelPayload, LabelQuery, ListQuery, ListResponse},
    config::Config,
    errors::{AppError, AppResult},
    security::Resolver,
    store::{image, labels, list},
};
use axum::{
    extract::{rejection::BytesRejection, DefaultBodyLimit, Query, Request, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bytes::Bytes;
use http::{header, StatusCode};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    services::ServeDir,
    trace::{DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::{info, Level};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub resolver: Resolver,
}

impl AppState {
    pub fn new(cfg: Config) -> Self {
        let resolver = Resolver::with_symlink_check(cfg.paths.symlink_check);
        Self { cfg: Arc::new(cfg), resolver }
    }
}

pub async fn serve(cfg: Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(cfg.socket_addr()?).await?;
    run(listener, cfg).await
}

pub async fn run(listener: TcpListener, cfg: Config) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    let assets = cfg.web.assets_dir.clone();
    let app = build_router(AppState::new(cfg));
    info!(addr = %addr, assets_dir = ?assets, "labelkit running at http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(shared: AppState) -> Router {
    let limit_bytes = shared.cfg.max_label_bytes();
    let assets = shared.cfg.web.assets_dir.clone();
    let api = Router::new()
        .route("/api/health", get(health))
        .route("/api/list", get(list_images))
        .route("/api/image", get(fetch_image))
        .route("/api/labels", get(read_label).post(write_label))
        .layer(DefaultBodyLimit::max(limit_bytes))
        .with_state(shared);
    let app = match assets {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };
    app.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request| {
                let request_id = uuid::Uuid::new_v4();
                tracing::info_span!("request", %request_id, method = %req.method(), path = %req.uri().path())
            })
            .on_response(DefaultOnResponse::new().level(Level::INFO).latency_unit(LatencyUnit::Millis)),
    )
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn list_images(Query(q): Query<ListQuery>) -> AppResult<Json<ListResponse>> {
    let images_dir = q.images_dir.trim();
    let labels_dir = Some(q.labels_dir.trim()).filter(|d| !d.is_empty());
    let images = list::list_images(images_dir, labels_dir)?;
    Ok(Json(ListResponse { images }))
}

async fn fetch_image(
    State(state): State<AppState>,
    Query(q): Query<ImageQuery>,
    req: Request,
) -> AppResult<Response> {
    let img = image::open_image(&state.resolver, q.images_dir.trim(), q.file.trim()).await?;
    Ok(img.serve(req).await)
}

async fn read_label(State(state): State<AppState>, Query(q): Query<LabelQuery>) -> AppResult<Response> {
    match labels::read_label(&state.resolver, q.labels_dir.trim(), q.file.trim())? {
        Some(text) => Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response()),
        None => Ok(StatusCode::OK.into_response()),
    }
}

async fn write_label(State(state): State<AppState>, body: Result<Bytes, BytesRejection>) -> AppResult<StatusCode> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::BodyTooLarge
        } else {
            AppError::InvalidBody
        }
    })?;
    let payload: LabelPayload = serde_json::from_slice(&body).map_err(AppError::InvalidJson)?;
    labels::write_label(
        &state.resolver,
        payload.labels_dir.trim(),
        payload.file.trim(),
        &payload.content,
        state.cfg.max_label_bytes(),
    )?;
    Ok(StatusCode::OK)
}
