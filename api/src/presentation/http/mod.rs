use axum::Router;

use crate::bootstrap::app_context::AppContext;

pub mod comments;
pub mod health;
pub mod posts;
pub mod tags;

/// Resource routes under `/api`. Health, docs and middleware are layered on in `main`.
pub fn api_router(ctx: AppContext) -> Router {
    Router::new()
        .nest("/api", posts::routes(ctx.clone()))
        .nest("/api", comments::routes(ctx.clone()))
        .nest("/api", tags::routes(ctx))
}
