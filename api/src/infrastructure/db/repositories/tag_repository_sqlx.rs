use async_trait::async_trait;
use sqlx::Row;

use crate::application::ports::tag_repository::TagRepository;
use crate::domain::tags::tag::Tag;
use crate::infrastructure::db::PgPool;

pub struct SqlxTagRepository {
    pub pool: PgPool,
}

impl SqlxTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for SqlxTagRepository {
    async fn load_top_tags(&self, limit: i64) -> anyhow::Result<Vec<Tag>> {
        let rows = sqlx::query(
            r#"SELECT tid, name, hits
               FROM tags
               ORDER BY hits DESC, name ASC
               LIMIT $1"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| Tag {
                tid: r.get("tid"),
                name: r.get("name"),
                hits: r.get("hits"),
            })
            .collect())
    }

    async fn tags_for_post(&self, pid: i64) -> anyhow::Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"SELECT t.name
               FROM post_tags pt
               JOIN tags t ON t.tid = pt.tid
               WHERE pt.pid = $1
               ORDER BY pt.position ASC, t.name ASC"#,
        )
        .bind(pid)
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    async fn record_post_view(&self, pid: i64) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE tags SET hits = hits + 1 WHERE tid IN (SELECT tid FROM post_tags WHERE pid = $1)",
        )
        .bind(pid)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
