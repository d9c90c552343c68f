use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};

use crate::application::ports::post_repository::{PostDraft, PostRepository};
use crate::domain::posts::post::{Post, PostFilter, PostOrder};
use crate::infrastructure::db::PgPool;

const POST_SELECT: &str = r#"SELECT p.pid, p.uid, u.nickname, p.title, p.content, p.hits, p.likes,
          p.is_temp, u.admin AS is_notice, p.published_at, p.updated_at
   FROM posts p
   JOIN users u ON u.uid = p.uid"#;

fn map_post(r: PgRow) -> Post {
    Post {
        pid: r.get("pid"),
        uid: r.get("uid"),
        nickname: r.get("nickname"),
        title: r.get("title"),
        content: r.get("content"),
        hits: r.get("hits"),
        likes: r.get("likes"),
        is_temp: r.get("is_temp"),
        is_notice: r.get("is_notice"),
        published_at: r.get("published_at"),
        updated_at: r.get("updated_at"),
    }
}

/// `ILIKE` pattern matching `keyword` literally anywhere in the text.
fn contains_pattern(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len() + 2);
    out.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

async fn replace_tag_links(conn: &mut PgConnection, pid: i64, names: &[String]) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM post_tags WHERE pid = $1")
        .bind(pid)
        .execute(&mut *conn)
        .await?;
    for (position, name) in names.iter().enumerate() {
        let tid: i64 = sqlx::query_scalar(
            "INSERT INTO tags(name) VALUES ($1) ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name RETURNING tid",
        )
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;
        sqlx::query(
            "INSERT INTO post_tags(pid, tid, position) VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
        )
        .bind(pid)
        .bind(tid)
        .bind(position as i32)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

pub struct SqlxPostRepository {
    pub pool: PgPool,
}

impl SqlxPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn create(&self, uid: i64, draft: &PostDraft) -> anyhow::Result<Option<Post>> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
            r#"WITH ins AS (
                   INSERT INTO posts (uid, title, content, is_temp)
                   SELECT uid, $2, $3, $4 FROM users WHERE uid = $1
                   RETURNING pid, uid, title, content, hits, likes, is_temp, published_at, updated_at
               )
               SELECT ins.*, u.nickname, u.admin AS is_notice
               FROM ins JOIN users u ON u.uid = ins.uid"#,
        )
        .bind(uid)
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(draft.is_temp)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let post = map_post(row);
        replace_tag_links(&mut tx, post.pid, &draft.tags).await?;
        tx.commit().await?;
        Ok(Some(post))
    }

    async fn get_by_id(&self, pid: i64) -> anyhow::Result<Option<Post>> {
        let sql = format!("{POST_SELECT} WHERE p.pid = $1");
        let row = sqlx::query(&sql)
            .bind(pid)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(map_post))
    }

    async fn increment_hits(&self, pid: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE posts SET hits = hits + 1 WHERE pid = $1")
            .bind(pid)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_published(&self, order: PostOrder) -> anyhow::Result<Vec<Post>> {
        let order_by = match order {
            PostOrder::Hits => "p.hits DESC, p.published_at DESC",
            PostOrder::Likes => "p.likes DESC, p.published_at DESC",
            PostOrder::Latest => "p.published_at DESC, p.pid DESC",
        };
        let sql = format!("{POST_SELECT} WHERE NOT p.is_temp ORDER BY {order_by}");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(map_post).collect())
    }

    async fn search_published(&self, filter: &PostFilter) -> anyhow::Result<Vec<Post>> {
        let (condition, value) = match filter {
            PostFilter::TitleContains(k) => (r"p.title ILIKE $1 ESCAPE '\'", contains_pattern(k)),
            PostFilter::WriterNickname(n) => ("u.nickname = $1", n.clone()),
            PostFilter::Tag(t) => (
                r#"EXISTS (SELECT 1 FROM post_tags pt JOIN tags t ON t.tid = pt.tid
                           WHERE pt.pid = p.pid AND t.name = $1)"#,
                t.clone(),
            ),
        };
        let sql = format!(
            "{POST_SELECT} WHERE NOT p.is_temp AND {condition} ORDER BY p.published_at DESC, p.pid DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(map_post).collect())
    }

    async fn adjust_likes(&self, pid: i64, liked: bool) -> anyhow::Result<Option<i64>> {
        let delta: i64 = if liked { 1 } else { -1 };
        let likes = sqlx::query_scalar::<_, i64>(
            "UPDATE posts SET likes = GREATEST(likes + $2, 0) WHERE pid = $1 RETURNING likes",
        )
        .bind(pid)
        .bind(delta)
        .fetch_optional(&self.pool)
        .await?;
        Ok(likes)
    }

    async fn latest_notice(&self) -> anyhow::Result<Option<Post>> {
        let sql = format!(
            "{POST_SELECT} WHERE u.admin AND NOT p.is_temp ORDER BY p.published_at DESC, p.pid DESC LIMIT 1"
        );
        let row = sqlx::query(&sql).fetch_optional(&self.pool).await?;
        Ok(row.map(map_post))
    }

    async fn update(&self, pid: i64, draft: &PostDraft) -> anyhow::Result<Option<Post>> {
        let mut tx = self.pool.begin().await?;
        // Publishing a draft restamps its publication time
        let row = sqlx::query(
            r#"WITH upd AS (
                   UPDATE posts
                   SET title = $2,
                       content = $3,
                       published_at = CASE WHEN is_temp AND NOT $4 THEN now() ELSE published_at END,
                       is_temp = $4,
                       updated_at = now()
                   WHERE pid = $1
                   RETURNING pid, uid, title, content, hits, likes, is_temp, published_at, updated_at
               )
               SELECT upd.*, u.nickname, u.admin AS is_notice
               FROM upd JOIN users u ON u.uid = upd.uid"#,
        )
        .bind(pid)
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(draft.is_temp)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let post = map_post(row);
        replace_tag_links(&mut tx, pid, &draft.tags).await?;
        tx.commit().await?;
        Ok(Some(post))
    }

    async fn delete(&self, pid: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM posts WHERE pid = $1")
            .bind(pid)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
