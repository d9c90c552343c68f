use crate::application::ports::tag_repository::TagRepository;
use crate::application::services::word_cloud::bucketize;
use crate::domain::tags::tag::WeightedTag;

pub struct GetWordCloud<'a, R: TagRepository + ?Sized> {
    pub repo: &'a R,
    pub limit: i64,
}

impl<'a, R: TagRepository + ?Sized> GetWordCloud<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<WeightedTag>> {
        let tags = self.repo.load_top_tags(self.limit).await?;
        Ok(bucketize(&tags))
    }
}
