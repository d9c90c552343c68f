use crate::application::ports::comment_repository::CommentRepository;
use crate::application::use_cases::comments::write_comment::WriteCommentError;
use crate::domain::comments::comment::Comment;

pub struct UpdateComment<'a, R: CommentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CommentRepository + ?Sized> UpdateComment<'a, R> {
    pub async fn execute(&self, cid: i64, content: &str) -> Result<Comment, WriteCommentError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(WriteCommentError::BlankContent);
        }
        self.repo
            .update_content(cid, trimmed)
            .await
            .map_err(WriteCommentError::Repository)?
            .ok_or(WriteCommentError::TargetNotFound)
    }
}
