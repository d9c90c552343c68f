use crate::application::ports::post_repository::PostRepository;

pub struct ToggleLike<'a, R: PostRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PostRepository + ?Sized> ToggleLike<'a, R> {
    pub async fn execute(&self, pid: i64, liked: bool) -> anyhow::Result<Option<i64>> {
        let likes = self.repo.adjust_likes(pid, liked).await?;
        if let Some(n) = likes {
            tracing::debug!(pid, liked, likes = n, "post_likes_adjusted");
        }
        Ok(likes)
    }
}
