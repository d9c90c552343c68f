use crate::application::ports::comment_repository::{CommentRepository, NewComment};
use crate::domain::comments::comment::Comment;

#[derive(thiserror::Error, Debug)]
pub enum WriteCommentError {
    #[error("comment content must not be blank")]
    BlankContent,
    #[error("post or writer not found")]
    TargetNotFound,
    #[error("parent comment not found")]
    ParentNotFound,
    #[error("failed to persist comment")]
    Repository(#[source] anyhow::Error),
}

fn checked_content(content: &str) -> Result<String, WriteCommentError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(WriteCommentError::BlankContent);
    }
    Ok(trimmed.to_string())
}

pub struct WriteComment<'a, R: CommentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CommentRepository + ?Sized> WriteComment<'a, R> {
    pub async fn execute(
        &self,
        pid: i64,
        uid: i64,
        content: &str,
    ) -> Result<Comment, WriteCommentError> {
        let new = NewComment {
            pid,
            uid,
            parent_cid: None,
            content: checked_content(content)?,
        };
        self.repo
            .create(&new)
            .await
            .map_err(WriteCommentError::Repository)?
            .ok_or(WriteCommentError::TargetNotFound)
    }
}

pub struct WriteReply<'a, R: CommentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CommentRepository + ?Sized> WriteReply<'a, R> {
    /// Replies always land on the parent's post.
    pub async fn execute(
        &self,
        parent_cid: i64,
        uid: i64,
        content: &str,
    ) -> Result<Comment, WriteCommentError> {
        let content = checked_content(content)?;
        let parent = self
            .repo
            .get_by_id(parent_cid)
            .await
            .map_err(WriteCommentError::Repository)?
            .ok_or(WriteCommentError::ParentNotFound)?;
        let new = NewComment {
            pid: parent.pid,
            uid,
            parent_cid: Some(parent.cid),
            content,
        };
        self.repo
            .create(&new)
            .await
            .map_err(WriteCommentError::Repository)?
            .ok_or(WriteCommentError::TargetNotFound)
    }
}
