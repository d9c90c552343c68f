pub mod delete_comment;
pub mod list_comments;
pub mod update_comment;
pub mod write_comment;
