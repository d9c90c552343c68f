use crate::application::ports::post_repository::PostRepository;
use crate::domain::posts::post::{Post, PostFilter};

pub struct SearchPosts<'a, R: PostRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PostRepository + ?Sized> SearchPosts<'a, R> {
    pub async fn execute(&self, filter: PostFilter) -> anyhow::Result<Vec<Post>> {
        let blank = match &filter {
            PostFilter::TitleContains(s) | PostFilter::WriterNickname(s) | PostFilter::Tag(s) => {
                s.trim().is_empty()
            }
        };
        if blank {
            return Ok(Vec::new());
        }
        let filter = match filter {
            PostFilter::Tag(t) => PostFilter::Tag(t.trim().to_lowercase()),
            other => other,
        };
        self.repo.search_published(&filter).await
    }
}
