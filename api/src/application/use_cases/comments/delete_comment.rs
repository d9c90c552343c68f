use crate::application::ports::comment_repository::CommentRepository;

pub struct DeleteComment<'a, R: CommentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CommentRepository + ?Sized> DeleteComment<'a, R> {
    pub async fn execute(&self, cid: i64) -> anyhow::Result<bool> {
        self.repo.delete(cid).await
    }
}
