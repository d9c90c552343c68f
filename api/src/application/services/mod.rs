pub mod comment_thread;
pub mod word_cloud;
