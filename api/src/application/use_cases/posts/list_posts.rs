use crate::application::ports::post_repository::PostRepository;
use crate::domain::posts::post::{Post, PostOrder};

pub struct ListPosts<'a, R: PostRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PostRepository + ?Sized> ListPosts<'a, R> {
    // Unknown options list nothing rather than failing
    pub async fn execute(&self, option: &str) -> anyhow::Result<Vec<Post>> {
        match PostOrder::parse(option) {
            Some(order) => self.repo.list_published(order).await,
            None => Ok(Vec::new()),
        }
    }
}
