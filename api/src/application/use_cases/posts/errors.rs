#[derive(thiserror::Error, Debug)]
pub enum SavePostError {
    #[error("post title must not be blank")]
    BlankTitle,
    #[error("writer not found")]
    WriterNotFound,
    #[error("a draft needs either an existing post or a writer")]
    MissingWriter,
    #[error("post not found")]
    PostNotFound,
    #[error("failed to persist post")]
    Repository(#[source] anyhow::Error),
}
