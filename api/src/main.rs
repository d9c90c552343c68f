use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use blog_api::bootstrap::app_context::{AppContext, AppServices};
use blog_api::bootstrap::config::Config;
use blog_api::infrastructure::db::repositories::comment_repository_sqlx::SqlxCommentRepository;
use blog_api::infrastructure::db::repositories::post_repository_sqlx::SqlxPostRepository;
use blog_api::infrastructure::db::repositories::tag_repository_sqlx::SqlxTagRepository;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            blog_api::presentation::http::posts::create_post,
            blog_api::presentation::http::posts::get_post,
            blog_api::presentation::http::posts::list_posts,
            blog_api::presentation::http::posts::find_by_title,
            blog_api::presentation::http::posts::find_by_nickname,
            blog_api::presentation::http::posts::find_by_tag,
            blog_api::presentation::http::posts::update_likes,
            blog_api::presentation::http::posts::latest_notice,
            blog_api::presentation::http::posts::save_draft,
            blog_api::presentation::http::posts::delete_post,
            blog_api::presentation::http::posts::update_post,
            blog_api::presentation::http::comments::write_comment,
            blog_api::presentation::http::comments::list_post_comments,
            blog_api::presentation::http::comments::write_reply,
            blog_api::presentation::http::comments::list_replies,
            blog_api::presentation::http::comments::update_comment,
            blog_api::presentation::http::comments::delete_comment,
            blog_api::presentation::http::tags::word_cloud,
            blog_api::presentation::http::health::health,
        ),
        components(schemas(
            blog_api::presentation::http::posts::Post,
            blog_api::presentation::http::posts::PostDetail,
            blog_api::presentation::http::posts::CreatePostRequest,
            blog_api::presentation::http::posts::UpdatePostRequest,
            blog_api::presentation::http::posts::DraftRequest,
            blog_api::presentation::http::posts::LikesResponse,
            blog_api::presentation::http::comments::Comment,
            blog_api::presentation::http::comments::CommentThread,
            blog_api::presentation::http::comments::WriteCommentRequest,
            blog_api::presentation::http::comments::UpdateCommentRequest,
            blog_api::presentation::http::tags::WordCloudItem,
            blog_api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Posts", description = "Posts, drafts, likes and search"),
            (name = "Comments", description = "Comments and threaded replies"),
            (name = "Tags", description = "Tag word cloud"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];
    let origin = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(v)) => AllowOrigin::exact(v),
        Some(Err(_)) | None if cfg.is_production => {
            // Config::from_env already refuses this; deny everything if it slips through
            AllowOrigin::exact(HeaderValue::from_static("http://invalid"))
        }
        _ => AllowOrigin::mirror_request(),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers([http::header::CONTENT_TYPE])
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "blog_api=debug,axum=info,tower_http=info,sqlx=warn".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting blog backend");

    // Database
    let pool =
        blog_api::infrastructure::db::connect_pool(&cfg.database_url, cfg.db_max_connections)
            .await?;
    blog_api::infrastructure::db::migrate(&pool).await?;

    let services = AppServices::new(
        Arc::new(SqlxPostRepository::new(pool.clone())),
        Arc::new(SqlxCommentRepository::new(pool.clone())),
        Arc::new(SqlxTagRepository::new(pool.clone())),
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let app = blog_api::presentation::http::api_router(ctx)
        .nest(
            "/api",
            blog_api::presentation::http::health::routes(pool.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
    }
}
