pub mod create_post;
pub mod delete_post;
pub mod errors;
pub mod get_notice;
pub mod get_post;
pub mod list_posts;
pub mod save_draft;
pub mod search_posts;
pub mod toggle_like;
pub mod update_post;
