use crate::application::ports::post_repository::PostRepository;

pub struct DeletePost<'a, R: PostRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PostRepository + ?Sized> DeletePost<'a, R> {
    // Comments and tag links are removed along with the post
    pub async fn execute(&self, pid: i64) -> anyhow::Result<bool> {
        self.repo.delete(pid).await
    }
}
