use crate::application::ports::post_repository::PostRepository;
use crate::domain::posts::post::Post;

pub struct GetLatestNotice<'a, R: PostRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PostRepository + ?Sized> GetLatestNotice<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Option<Post>> {
        self.repo.latest_notice().await
    }
}
