pub mod comment_repository_sqlx;
pub mod post_repository_sqlx;
pub mod tag_repository_sqlx;
