use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::comments::delete_comment::DeleteComment;
use crate::application::use_cases::comments::list_comments::{ListPostComments, ListReplies};
use crate::application::use_cases::comments::update_comment::UpdateComment;
use crate::application::use_cases::comments::write_comment::{
    WriteComment, WriteCommentError, WriteReply,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::comments::comment as domain;

#[derive(Debug, Serialize, ToSchema)]
pub struct Comment {
    pub cid: i64,
    pub pid: i64,
    pub uid: i64,
    pub nickname: String,
    pub parent_cid: Option<i64>,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<domain::Comment> for Comment {
    fn from(c: domain::Comment) -> Self {
        Comment {
            cid: c.cid,
            pid: c.pid,
            uid: c.uid,
            nickname: c.nickname,
            parent_cid: c.parent_cid,
            content: c.content,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentThread {
    pub cid: i64,
    pub uid: i64,
    pub nickname: String,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub replies: Vec<CommentThread>,
}

impl From<domain::CommentNode> for CommentThread {
    fn from(n: domain::CommentNode) -> Self {
        let c = n.comment;
        CommentThread {
            cid: c.cid,
            uid: c.uid,
            nickname: c.nickname,
            content: c.content,
            created_at: c.created_at,
            updated_at: c.updated_at,
            replies: n.replies.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct WriteCommentRequest {
    pub uid: i64,
    pub content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCommentRequest {
    pub content: String,
}

fn write_error_status(err: WriteCommentError) -> StatusCode {
    match err {
        WriteCommentError::BlankContent => StatusCode::BAD_REQUEST,
        WriteCommentError::TargetNotFound | WriteCommentError::ParentNotFound => {
            StatusCode::NOT_FOUND
        }
        WriteCommentError::Repository(e) => {
            tracing::error!(error = ?e, "comment_save_failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn internal(e: anyhow::Error) -> StatusCode {
    tracing::error!(error = ?e, "comment_request_failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

#[utoipa::path(post, path = "/api/v3/p/{pid}", tag = "Comments", request_body = WriteCommentRequest,
    params(("pid" = i64, Path, description = "Post ID")),
    responses(
        (status = 201, body = Comment),
        (status = 400, description = "Blank content"),
        (status = 404, description = "Post or writer not found")
    ))]
pub async fn write_comment(
    State(ctx): State<AppContext>,
    Path(pid): Path<i64>,
    Json(req): Json<WriteCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), StatusCode> {
    let repo = ctx.comment_repo();
    let uc = WriteComment {
        repo: repo.as_ref(),
    };
    let comment = uc
        .execute(pid, req.uid, &req.content)
        .await
        .map_err(write_error_status)?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

#[utoipa::path(get, path = "/api/v3/p/{pid}", tag = "Comments",
    params(("pid" = i64, Path, description = "Post ID")),
    responses((status = 200, body = [CommentThread])))]
pub async fn list_post_comments(
    State(ctx): State<AppContext>,
    Path(pid): Path<i64>,
) -> Result<Json<Vec<CommentThread>>, StatusCode> {
    let repo = ctx.comment_repo();
    let uc = ListPostComments {
        repo: repo.as_ref(),
    };
    let threads = uc.execute(pid).await.map_err(internal)?;
    Ok(Json(threads.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/v3/c/{cid}/replies", tag = "Comments", request_body = WriteCommentRequest,
    params(("cid" = i64, Path, description = "Parent comment ID")),
    responses(
        (status = 201, body = Comment),
        (status = 400, description = "Blank content"),
        (status = 404, description = "Parent comment or writer not found")
    ))]
pub async fn write_reply(
    State(ctx): State<AppContext>,
    Path(cid): Path<i64>,
    Json(req): Json<WriteCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), StatusCode> {
    let repo = ctx.comment_repo();
    let uc = WriteReply {
        repo: repo.as_ref(),
    };
    let reply = uc
        .execute(cid, req.uid, &req.content)
        .await
        .map_err(write_error_status)?;
    Ok((StatusCode::CREATED, Json(reply.into())))
}

#[utoipa::path(get, path = "/api/v3/c/{cid}/replies", tag = "Comments",
    params(("cid" = i64, Path, description = "Parent comment ID")),
    responses((status = 200, body = [Comment])))]
pub async fn list_replies(
    State(ctx): State<AppContext>,
    Path(cid): Path<i64>,
) -> Result<Json<Vec<Comment>>, StatusCode> {
    let repo = ctx.comment_repo();
    let uc = ListReplies {
        repo: repo.as_ref(),
    };
    let replies = uc.execute(cid).await.map_err(internal)?;
    Ok(Json(replies.into_iter().map(Into::into).collect()))
}

#[utoipa::path(put, path = "/api/v3/c/{cid}", tag = "Comments", request_body = UpdateCommentRequest,
    params(("cid" = i64, Path, description = "Comment ID")),
    responses(
        (status = 200, body = Comment),
        (status = 400, description = "Blank content"),
        (status = 404, description = "Comment not found")
    ))]
pub async fn update_comment(
    State(ctx): State<AppContext>,
    Path(cid): Path<i64>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<Json<Comment>, StatusCode> {
    let repo = ctx.comment_repo();
    let uc = UpdateComment {
        repo: repo.as_ref(),
    };
    let comment = uc
        .execute(cid, &req.content)
        .await
        .map_err(write_error_status)?;
    Ok(Json(comment.into()))
}

#[utoipa::path(delete, path = "/api/v3/c/{cid}", tag = "Comments",
    params(("cid" = i64, Path, description = "Comment ID")),
    responses((status = 204), (status = 404, description = "Comment not found")))]
pub async fn delete_comment(
    State(ctx): State<AppContext>,
    Path(cid): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let repo = ctx.comment_repo();
    let uc = DeleteComment {
        repo: repo.as_ref(),
    };
    if uc.execute(cid).await.map_err(internal)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/v3/p/:pid",
            get(list_post_comments).post(write_comment),
        )
        .route("/v3/c/:cid", put(update_comment).delete(delete_comment))
        .route("/v3/c/:cid/replies", get(list_replies).post(write_reply))
        .with_state(ctx)
}
