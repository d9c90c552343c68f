use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Comment {
    pub cid: i64,
    pub pid: i64,
    pub uid: i64,
    pub nickname: String,
    pub parent_cid: Option<i64>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CommentNode {
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}
