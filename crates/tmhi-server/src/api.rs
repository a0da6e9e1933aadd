use crate::AppState;
use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tmhi_types::Reading;

/// 内嵌的单页面
pub const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Debug, Deserialize)]
pub struct UpdatesQuery {
    /// 只返回最近 N 条
    pub limit: Option<usize>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/updates", get(get_updates))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> &'static str {
    "OK"
}

/// 历史记录，按时间从旧到新
async fn get_updates(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UpdatesQuery>,
) -> Json<Vec<Reading>> {
    let readings = match query.limit {
        Some(limit) => state.history.recent(limit).await,
        None => state.history.snapshot().await,
    };
    Json(readings)
}
