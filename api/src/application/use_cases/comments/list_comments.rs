use crate::application::ports::comment_repository::CommentRepository;
use crate::application::services::comment_thread::build_threads;
use crate::domain::comments::comment::{Comment, CommentNode};

pub struct ListPostComments<'a, R: CommentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CommentRepository + ?Sized> ListPostComments<'a, R> {
    pub async fn execute(&self, pid: i64) -> anyhow::Result<Vec<CommentNode>> {
        let rows = self.repo.list_for_post(pid).await?;
        Ok(build_threads(rows))
    }
}

pub struct ListReplies<'a, R: CommentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CommentRepository + ?Sized> ListReplies<'a, R> {
    pub async fn execute(&self, cid: i64) -> anyhow::Result<Vec<Comment>> {
        self.repo.list_replies(cid).await
    }
}
