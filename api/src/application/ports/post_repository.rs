use async_trait::async_trait;

use crate::domain::posts::post::{Post, PostFilter, PostOrder};

#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub is_temp: bool,
    /// Normalised tag names. Their links are replaced together with the post row.
    pub tags: Vec<String>,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    // None when the writer does not exist. Nothing is written unless the post
    // and its tag links are both stored.
    async fn create(&self, uid: i64, draft: &PostDraft) -> anyhow::Result<Option<Post>>;

    async fn get_by_id(&self, pid: i64) -> anyhow::Result<Option<Post>>;

    // Returns false if the post does not exist
    async fn increment_hits(&self, pid: i64) -> anyhow::Result<bool>;

    // Drafts are excluded from listings and searches
    async fn list_published(&self, order: PostOrder) -> anyhow::Result<Vec<Post>>;

    async fn search_published(&self, filter: &PostFilter) -> anyhow::Result<Vec<Post>>;

    // liked: true => +1, false => -1 (never below zero). Returns the new count.
    async fn adjust_likes(&self, pid: i64, liked: bool) -> anyhow::Result<Option<i64>>;

    async fn latest_notice(&self) -> anyhow::Result<Option<Post>>;

    // None when the post does not exist; same all-or-nothing rule as `create`
    async fn update(&self, pid: i64, draft: &PostDraft) -> anyhow::Result<Option<Post>>;

    async fn delete(&self, pid: i64) -> anyhow::Result<bool>;
}
