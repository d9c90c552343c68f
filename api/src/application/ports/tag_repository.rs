use async_trait::async_trait;

use crate::domain::tags::tag::Tag;

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Most viewed tags first, at most `limit` of them.
    async fn load_top_tags(&self, limit: i64) -> anyhow::Result<Vec<Tag>>;

    async fn tags_for_post(&self, pid: i64) -> anyhow::Result<Vec<String>>;

    /// Adds one hit to every tag attached to the post.
    async fn record_post_view(&self, pid: i64) -> anyhow::Result<()>;
}
