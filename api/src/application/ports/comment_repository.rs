use async_trait::async_trait;

use crate::domain::comments::comment::Comment;

#[derive(Debug, Clone)]
pub struct NewComment {
    pub pid: i64,
    pub uid: i64,
    pub parent_cid: Option<i64>,
    pub content: String,
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    // None when the post or the writer does not exist
    async fn create(&self, comment: &NewComment) -> anyhow::Result<Option<Comment>>;

    async fn get_by_id(&self, cid: i64) -> anyhow::Result<Option<Comment>>;

    async fn update_content(&self, cid: i64, content: &str) -> anyhow::Result<Option<Comment>>;

    // Replies go with their parent
    async fn delete(&self, cid: i64) -> anyhow::Result<bool>;

    /// Every comment of the post, replies included, oldest first.
    async fn list_for_post(&self, pid: i64) -> anyhow::Result<Vec<Comment>>;

    async fn list_replies(&self, cid: i64) -> anyhow::Result<Vec<Comment>>;
}
