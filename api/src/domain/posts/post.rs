use chrono::{DateTime, Utc};

use crate::domain::comments::comment::CommentNode;

#[derive(Debug, Clone)]
pub struct Post {
    pub pid: i64,
    pub uid: i64,
    pub nickname: String,
    pub title: String,
    pub content: String,
    pub hits: i64,
    pub likes: i64,
    pub is_temp: bool,
    pub is_notice: bool,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post as shown on its own page: the row plus its tags and comment threads.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub tags: Vec<String>,
    pub comments: Vec<CommentNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOrder {
    Hits,
    Likes,
    Latest,
}

impl PostOrder {
    pub fn parse(option: &str) -> Option<Self> {
        match option {
            "hits" => Some(PostOrder::Hits),
            "likes" => Some(PostOrder::Likes),
            "latest" => Some(PostOrder::Latest),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    TitleContains(String),
    WriterNickname(String),
    Tag(String),
}
