use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::dto::posts::PostInput;
use crate::application::use_cases::posts::create_post::CreatePost;
use crate::application::use_cases::posts::delete_post::DeletePost;
use crate::application::use_cases::posts::errors::SavePostError;
use crate::application::use_cases::posts::get_notice::GetLatestNotice;
use crate::application::use_cases::posts::get_post::GetPost;
use crate::application::use_cases::posts::list_posts::ListPosts;
use crate::application::use_cases::posts::save_draft::SaveDraft;
use crate::application::use_cases::posts::search_posts::SearchPosts;
use crate::application::use_cases::posts::toggle_like::ToggleLike;
use crate::application::use_cases::posts::update_post::UpdatePost;
use crate::bootstrap::app_context::AppContext;
use crate::domain::posts::post::{self as domain, PostFilter};
use crate::presentation::http::comments::CommentThread;

#[derive(Debug, Serialize, ToSchema)]
pub struct Post {
    pub pid: i64,
    pub uid: i64,
    pub nickname: String,
    pub title: String,
    pub content: String,
    pub hits: i64,
    pub likes: i64,
    pub is_temp: bool,
    pub is_notice: bool,
    pub published_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<domain::Post> for Post {
    fn from(p: domain::Post) -> Self {
        Post {
            pid: p.pid,
            uid: p.uid,
            nickname: p.nickname,
            title: p.title,
            content: p.content,
            hits: p.hits,
            likes: p.likes,
            is_temp: p.is_temp,
            is_notice: p.is_notice,
            published_at: p.published_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostDetail {
    pub pid: i64,
    pub uid: i64,
    pub nickname: String,
    pub title: String,
    pub content: String,
    pub hits: i64,
    pub likes: i64,
    pub is_temp: bool,
    pub is_notice: bool,
    pub published_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub tags: Vec<String>,
    pub comments: Vec<CommentThread>,
}

impl From<domain::PostDetail> for PostDetail {
    fn from(d: domain::PostDetail) -> Self {
        let p = d.post;
        PostDetail {
            pid: p.pid,
            uid: p.uid,
            nickname: p.nickname,
            title: p.title,
            content: p.content,
            hits: p.hits,
            likes: p.likes,
            is_temp: p.is_temp,
            is_notice: p.is_notice,
            published_at: p.published_at,
            updated_at: p.updated_at,
            tags: d.tags,
            comments: d.comments.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "tag")]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    pub pid: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "tag")]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DraftRequest {
    pub pid: Option<i64>,
    pub uid: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "tag")]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LikesResponse {
    pub pid: i64,
    pub likes: i64,
}

fn save_error_status(err: SavePostError) -> StatusCode {
    match err {
        SavePostError::BlankTitle | SavePostError::MissingWriter => StatusCode::BAD_REQUEST,
        SavePostError::WriterNotFound | SavePostError::PostNotFound => StatusCode::NOT_FOUND,
        SavePostError::Repository(e) => {
            tracing::error!(error = ?e, "post_save_failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn internal(e: anyhow::Error) -> StatusCode {
    tracing::error!(error = ?e, "post_request_failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

#[utoipa::path(post, path = "/api/v2/{uid}", tag = "Posts", request_body = CreatePostRequest,
    params(("uid" = i64, Path, description = "Writer ID")),
    responses(
        (status = 201, body = Post),
        (status = 400, description = "Blank title"),
        (status = 404, description = "Writer not found")
    ))]
pub async fn create_post(
    State(ctx): State<AppContext>,
    Path(uid): Path<i64>,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), StatusCode> {
    let posts = ctx.post_repo();
    let uc = CreatePost {
        posts: posts.as_ref(),
    };
    let input = PostInput {
        title: req.title,
        content: req.content,
        tags: req.tags,
    };
    let post = uc.execute(uid, input).await.map_err(save_error_status)?;
    tracing::info!(pid = post.pid, uid, "post_created");
    Ok((StatusCode::CREATED, Json(post.into())))
}

#[utoipa::path(get, path = "/api/v2/p/{pid}", tag = "Posts",
    params(("pid" = i64, Path, description = "Post ID")),
    responses((status = 200, body = PostDetail), (status = 404, description = "Post not found")))]
pub async fn get_post(
    State(ctx): State<AppContext>,
    Path(pid): Path<i64>,
) -> Result<Json<PostDetail>, StatusCode> {
    let posts = ctx.post_repo();
    let tags = ctx.tag_repo();
    let comments = ctx.comment_repo();
    let uc = GetPost {
        posts: posts.as_ref(),
        tags: tags.as_ref(),
        comments: comments.as_ref(),
    };
    let detail = uc
        .execute(pid)
        .await
        .map_err(internal)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(detail.into()))
}

#[utoipa::path(get, path = "/api/v2/{option}", tag = "Posts",
    params(("option" = String, Path, description = "hits | likes | latest")),
    responses((status = 200, body = [Post])))]
pub async fn list_posts(
    State(ctx): State<AppContext>,
    Path(option): Path<String>,
) -> Result<Json<Vec<Post>>, StatusCode> {
    let repo = ctx.post_repo();
    let uc = ListPosts {
        repo: repo.as_ref(),
    };
    let items = uc.execute(&option).await.map_err(internal)?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

// `temp` is taken by the draft endpoint; reading it lists like any other unknown option
async fn list_temp(state: State<AppContext>) -> Result<Json<Vec<Post>>, StatusCode> {
    list_posts(state, Path("temp".to_string())).await
}

async fn search(ctx: &AppContext, filter: PostFilter) -> Result<Json<Vec<Post>>, StatusCode> {
    let repo = ctx.post_repo();
    let uc = SearchPosts {
        repo: repo.as_ref(),
    };
    let items = uc.execute(filter).await.map_err(internal)?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/api/v2/find/t/{keyword}", tag = "Posts",
    params(("keyword" = String, Path, description = "Substring of the title")),
    responses((status = 200, body = [Post])))]
pub async fn find_by_title(
    State(ctx): State<AppContext>,
    Path(keyword): Path<String>,
) -> Result<Json<Vec<Post>>, StatusCode> {
    search(&ctx, PostFilter::TitleContains(keyword)).await
}

#[utoipa::path(get, path = "/api/v2/find/u/{nickname}", tag = "Posts",
    params(("nickname" = String, Path, description = "Writer nickname")),
    responses((status = 200, body = [Post])))]
pub async fn find_by_nickname(
    State(ctx): State<AppContext>,
    Path(nickname): Path<String>,
) -> Result<Json<Vec<Post>>, StatusCode> {
    search(&ctx, PostFilter::WriterNickname(nickname)).await
}

#[utoipa::path(get, path = "/api/v2/find/a/{tag}", tag = "Posts",
    params(("tag" = String, Path, description = "Tag name")),
    responses((status = 200, body = [Post])))]
pub async fn find_by_tag(
    State(ctx): State<AppContext>,
    Path(tag): Path<String>,
) -> Result<Json<Vec<Post>>, StatusCode> {
    search(&ctx, PostFilter::Tag(tag)).await
}

#[utoipa::path(put, path = "/api/v2/likes/{pid}/{status}", tag = "Posts",
    params(
        ("pid" = i64, Path, description = "Post ID"),
        ("status" = bool, Path, description = "true adds a like, false removes one")
    ),
    responses((status = 200, body = LikesResponse), (status = 404, description = "Post not found")))]
pub async fn update_likes(
    State(ctx): State<AppContext>,
    Path((pid, status)): Path<(i64, bool)>,
) -> Result<Json<LikesResponse>, StatusCode> {
    let repo = ctx.post_repo();
    let uc = ToggleLike {
        repo: repo.as_ref(),
    };
    let likes = uc
        .execute(pid, status)
        .await
        .map_err(internal)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(LikesResponse { pid, likes }))
}

#[utoipa::path(get, path = "/api/v2/notice", tag = "Posts",
    responses((status = 200, body = Post), (status = 404, description = "No notice yet")))]
pub async fn latest_notice(State(ctx): State<AppContext>) -> Result<Json<Post>, StatusCode> {
    let repo = ctx.post_repo();
    let uc = GetLatestNotice {
        repo: repo.as_ref(),
    };
    let post = uc
        .execute()
        .await
        .map_err(internal)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(post.into()))
}

#[utoipa::path(put, path = "/api/v2/temp", tag = "Posts", request_body = DraftRequest,
    responses(
        (status = 200, body = Post),
        (status = 400, description = "Neither pid nor uid given"),
        (status = 404, description = "Post or writer not found")
    ))]
pub async fn save_draft(
    State(ctx): State<AppContext>,
    Json(req): Json<DraftRequest>,
) -> Result<Json<Post>, StatusCode> {
    let posts = ctx.post_repo();
    let uc = SaveDraft {
        posts: posts.as_ref(),
    };
    let input = PostInput {
        title: req.title,
        content: req.content,
        tags: req.tags,
    };
    let post = uc
        .execute(req.pid, req.uid, input)
        .await
        .map_err(save_error_status)?;
    Ok(Json(post.into()))
}

#[utoipa::path(delete, path = "/api/v2/{pid}", tag = "Posts",
    params(("pid" = i64, Path, description = "Post ID")),
    responses((status = 204), (status = 404, description = "Post not found")))]
pub async fn delete_post(
    State(ctx): State<AppContext>,
    Path(pid): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let repo = ctx.post_repo();
    let uc = DeletePost {
        repo: repo.as_ref(),
    };
    if uc.execute(pid).await.map_err(internal)? {
        tracing::info!(pid, "post_deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

#[utoipa::path(put, path = "/api/v2", tag = "Posts", request_body = UpdatePostRequest,
    responses(
        (status = 200, body = Post),
        (status = 400, description = "Blank title"),
        (status = 404, description = "Post not found")
    ))]
pub async fn update_post(
    State(ctx): State<AppContext>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<Post>, StatusCode> {
    let posts = ctx.post_repo();
    let uc = UpdatePost {
        posts: posts.as_ref(),
    };
    let input = PostInput {
        title: req.title,
        content: req.content,
        tags: req.tags,
    };
    let post = uc
        .execute(req.pid, input)
        .await
        .map_err(save_error_status)?;
    Ok(Json(post.into()))
}

// The bare `/v2/:key` segment is shared: GET lists by option, POST creates for a
// writer id, DELETE removes a post id.
pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/v2", put(update_post))
        .route(
            "/v2/:key",
            get(list_posts).post(create_post).delete(delete_post),
        )
        .route("/v2/p/:pid", get(get_post))
        .route("/v2/find/t/:keyword", get(find_by_title))
        .route("/v2/find/u/:nickname", get(find_by_nickname))
        .route("/v2/find/a/:tag", get(find_by_tag))
        .route("/v2/likes/:pid/:status", put(update_likes))
        .route("/v2/notice", get(latest_notice))
        .route("/v2/temp", get(list_temp).put(save_draft))
        .with_state(ctx)
}
