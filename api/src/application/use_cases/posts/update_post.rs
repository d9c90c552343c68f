use crate::application::dto::posts::PostInput;
use crate::application::ports::post_repository::{PostDraft, PostRepository};
use crate::application::use_cases::posts::errors::SavePostError;
use crate::domain::posts::post::Post;
use crate::domain::tags::tag::normalize_tag_names;

pub struct UpdatePost<'a, P: PostRepository + ?Sized> {
    pub posts: &'a P,
}

impl<'a, P: PostRepository + ?Sized> UpdatePost<'a, P> {
    // Finishing an edit publishes a draft
    pub async fn execute(&self, pid: i64, input: PostInput) -> Result<Post, SavePostError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(SavePostError::BlankTitle);
        }
        let draft = PostDraft {
            title: title.to_string(),
            content: input.content,
            is_temp: false,
            tags: normalize_tag_names(&input.tags),
        };
        self.posts
            .update(pid, &draft)
            .await
            .map_err(SavePostError::Repository)?
            .ok_or(SavePostError::PostNotFound)
    }
}
