use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::tag_repository::TagRepository;
use crate::application::services::comment_thread::build_threads;
use crate::domain::posts::post::PostDetail;

pub struct GetPost<'a, P, T, C>
where
    P: PostRepository + ?Sized,
    T: TagRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    pub posts: &'a P,
    pub tags: &'a T,
    pub comments: &'a C,
}

impl<'a, P, T, C> GetPost<'a, P, T, C>
where
    P: PostRepository + ?Sized,
    T: TagRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    /// Loads a post for reading; counts as a view of the post and of its tags.
    pub async fn execute(&self, pid: i64) -> anyhow::Result<Option<PostDetail>> {
        if !self.posts.increment_hits(pid).await? {
            return Ok(None);
        }
        self.tags.record_post_view(pid).await?;

        let Some(post) = self.posts.get_by_id(pid).await? else {
            return Ok(None);
        };
        let tags = self.tags.tags_for_post(pid).await?;
        let comments = build_threads(self.comments.list_for_post(pid).await?);
        Ok(Some(PostDetail {
            post,
            tags,
            comments,
        }))
    }
}
