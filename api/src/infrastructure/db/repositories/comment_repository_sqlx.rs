use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::comment_repository::{CommentRepository, NewComment};
use crate::domain::comments::comment::Comment;
use crate::infrastructure::db::PgPool;

const COMMENT_SELECT: &str = r#"SELECT c.cid, c.pid, c.uid, u.nickname, c.parent_cid, c.content,
          c.created_at, c.updated_at
   FROM comments c
   JOIN users u ON u.uid = c.uid"#;

fn map_comment(r: PgRow) -> Comment {
    Comment {
        cid: r.get("cid"),
        pid: r.get("pid"),
        uid: r.get("uid"),
        nickname: r.get("nickname"),
        parent_cid: r.get("parent_cid"),
        content: r.get("content"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

pub struct SqlxCommentRepository {
    pub pool: PgPool,
}

impl SqlxCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, comment: &NewComment) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query(
            r#"WITH ins AS (
                   INSERT INTO comments (pid, uid, parent_cid, content)
                   SELECT p.pid, u.uid, $3, $4
                   FROM posts p, users u
                   WHERE p.pid = $1 AND u.uid = $2
                   RETURNING cid, pid, uid, parent_cid, content, created_at, updated_at
               )
               SELECT ins.*, u.nickname FROM ins JOIN users u ON u.uid = ins.uid"#,
        )
        .bind(comment.pid)
        .bind(comment.uid)
        .bind(comment.parent_cid)
        .bind(&comment.content)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_comment))
    }

    async fn get_by_id(&self, cid: i64) -> anyhow::Result<Option<Comment>> {
        let sql = format!("{COMMENT_SELECT} WHERE c.cid = $1");
        let row = sqlx::query(&sql)
            .bind(cid)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(map_comment))
    }

    async fn update_content(&self, cid: i64, content: &str) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query(
            r#"WITH upd AS (
                   UPDATE comments SET content = $2, updated_at = now()
                   WHERE cid = $1
                   RETURNING cid, pid, uid, parent_cid, content, created_at, updated_at
               )
               SELECT upd.*, u.nickname FROM upd JOIN users u ON u.uid = upd.uid"#,
        )
        .bind(cid)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_comment))
    }

    async fn delete(&self, cid: i64) -> anyhow::Result<bool> {
        // ON DELETE CASCADE on parent_cid removes the reply subtree
        let res = sqlx::query("DELETE FROM comments WHERE cid = $1")
            .bind(cid)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_for_post(&self, pid: i64) -> anyhow::Result<Vec<Comment>> {
        let sql = format!("{COMMENT_SELECT} WHERE c.pid = $1 ORDER BY c.created_at ASC, c.cid ASC");
        let rows = sqlx::query(&sql).bind(pid).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(map_comment).collect())
    }

    async fn list_replies(&self, cid: i64) -> anyhow::Result<Vec<Comment>> {
        let sql = format!(
            "{COMMENT_SELECT} WHERE c.parent_cid = $1 ORDER BY c.created_at ASC, c.cid ASC"
        );
        let rows = sqlx::query(&sql).bind(cid).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(map_comment).collect())
    }
}
