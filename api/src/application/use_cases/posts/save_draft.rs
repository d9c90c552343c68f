use crate::application::dto::posts::PostInput;
use crate::application::ports::post_repository::{PostDraft, PostRepository};
use crate::application::use_cases::posts::errors::SavePostError;
use crate::domain::posts::post::Post;
use crate::domain::tags::tag::normalize_tag_names;

pub struct SaveDraft<'a, P: PostRepository + ?Sized> {
    pub posts: &'a P,
}

impl<'a, P: PostRepository + ?Sized> SaveDraft<'a, P> {
    /// Stores the input as a draft. An existing post is overwritten and
    /// unpublished; without `pid` a new draft is created for `uid`.
    pub async fn execute(
        &self,
        pid: Option<i64>,
        uid: Option<i64>,
        input: PostInput,
    ) -> Result<Post, SavePostError> {
        let draft = PostDraft {
            title: input.title.trim().to_string(),
            content: input.content,
            is_temp: true,
            tags: normalize_tag_names(&input.tags),
        };
        match (pid, uid) {
            (Some(pid), _) => self
                .posts
                .update(pid, &draft)
                .await
                .map_err(SavePostError::Repository)?
                .ok_or(SavePostError::PostNotFound),
            (None, Some(uid)) => self
                .posts
                .create(uid, &draft)
                .await
                .map_err(SavePostError::Repository)?
                .ok_or(SavePostError::WriterNotFound),
            (None, None) => Err(SavePostError::MissingWriter),
        }
    }
}
