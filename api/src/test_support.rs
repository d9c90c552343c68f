//! In-memory ports used by unit and router tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::application::ports::comment_repository::{CommentRepository, NewComment};
use crate::application::ports::post_repository::{PostDraft, PostRepository};
use crate::application::ports::tag_repository::TagRepository;
use crate::bootstrap::app_context::{AppContext, AppServices};
use crate::bootstrap::config::Config;
use crate::domain::comments::comment::Comment;
use crate::domain::posts::post::{Post, PostFilter, PostOrder};
use crate::domain::tags::tag::Tag;

struct User {
    uid: i64,
    nickname: String,
    admin: bool,
}

#[derive(Default)]
struct State {
    users: Vec<User>,
    posts: Vec<Post>,
    tags: Vec<Tag>,
    // (pid, tid, position)
    post_tags: Vec<(i64, i64, usize)>,
    comments: Vec<Comment>,
    next_id: i64,
    fail_tag_links: bool,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn user(&self, uid: i64) -> Option<&User> {
        self.users.iter().find(|u| u.uid == uid)
    }

    // Checked before anything is written so a failed save leaves no trace,
    // like a rolled back transaction.
    fn check_tag_links(&self) -> anyhow::Result<()> {
        if self.fail_tag_links {
            anyhow::bail!("tag link write failed");
        }
        Ok(())
    }

    fn link_tags(&mut self, pid: i64, names: &[String]) {
        self.post_tags.retain(|(p, _, _)| *p != pid);
        for (position, name) in names.iter().enumerate() {
            let existing = self.tags.iter().find(|t| &t.name == name).map(|t| t.tid);
            let tid = match existing {
                Some(tid) => tid,
                None => {
                    let tid = self.next_id();
                    self.tags.push(Tag {
                        tid,
                        name: name.clone(),
                        hits: 0,
                    });
                    tid
                }
            };
            self.post_tags.push((pid, tid, position));
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_user(&self, nickname: &str, admin: bool) -> i64 {
        let mut st = self.state.lock().unwrap();
        let uid = st.next_id();
        st.users.push(User {
            uid,
            nickname: nickname.to_string(),
            admin,
        });
        uid
    }

    pub fn seed_tag(&self, name: &str, hits: i64) {
        let mut st = self.state.lock().unwrap();
        let tid = st.next_id();
        st.tags.push(Tag {
            tid,
            name: name.to_string(),
            hits,
        });
    }

    pub fn tag_hits(&self, name: &str) -> Option<i64> {
        let st = self.state.lock().unwrap();
        st.tags.iter().find(|t| t.name == name).map(|t| t.hits)
    }

    pub fn comment_count(&self) -> usize {
        self.state.lock().unwrap().comments.len()
    }

    /// Makes every following post save fail at the tag link step.
    pub fn fail_tag_links(&self, fail: bool) {
        self.state.lock().unwrap().fail_tag_links = fail;
    }

    pub fn tag_names(&self, pid: i64) -> Vec<String> {
        let st = self.state.lock().unwrap();
        let mut links: Vec<&(i64, i64, usize)> =
            st.post_tags.iter().filter(|(p, _, _)| *p == pid).collect();
        links.sort_by_key(|(_, _, pos)| *pos);
        links
            .into_iter()
            .filter_map(|(_, tid, _)| st.tags.iter().find(|t| t.tid == *tid))
            .map(|t| t.name.clone())
            .collect()
    }
}

pub fn context(store: Arc<MemoryStore>) -> AppContext {
    let services = AppServices::new(store.clone(), store.clone(), store);
    AppContext::new(Config::default(), services)
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn create(&self, uid: i64, draft: &PostDraft) -> anyhow::Result<Option<Post>> {
        let mut st = self.state.lock().unwrap();
        let Some((nickname, admin)) = st.user(uid).map(|u| (u.nickname.clone(), u.admin)) else {
            return Ok(None);
        };
        st.check_tag_links()?;
        let pid = st.next_id();
        let now = Utc::now();
        let post = Post {
            pid,
            uid,
            nickname,
            title: draft.title.clone(),
            content: draft.content.clone(),
            hits: 0,
            likes: 0,
            is_temp: draft.is_temp,
            is_notice: admin,
            published_at: now,
            updated_at: now,
        };
        st.posts.push(post.clone());
        st.link_tags(pid, &draft.tags);
        Ok(Some(post))
    }

    async fn get_by_id(&self, pid: i64) -> anyhow::Result<Option<Post>> {
        let st = self.state.lock().unwrap();
        Ok(st.posts.iter().find(|p| p.pid == pid).cloned())
    }

    async fn increment_hits(&self, pid: i64) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        match st.posts.iter_mut().find(|p| p.pid == pid) {
            Some(p) => {
                p.hits += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_published(&self, order: PostOrder) -> anyhow::Result<Vec<Post>> {
        let st = self.state.lock().unwrap();
        let mut out: Vec<Post> = st.posts.iter().filter(|p| !p.is_temp).cloned().collect();
        match order {
            PostOrder::Hits => out.sort_by(|a, b| b.hits.cmp(&a.hits)),
            PostOrder::Likes => out.sort_by(|a, b| b.likes.cmp(&a.likes)),
            PostOrder::Latest => out.sort_by(|a, b| {
                (b.published_at, b.pid).cmp(&(a.published_at, a.pid))
            }),
        }
        Ok(out)
    }

    async fn search_published(&self, filter: &PostFilter) -> anyhow::Result<Vec<Post>> {
        let st = self.state.lock().unwrap();
        let tagged: HashSet<i64> = match filter {
            PostFilter::Tag(name) => {
                let tids: HashSet<i64> = st
                    .tags
                    .iter()
                    .filter(|t| &t.name == name)
                    .map(|t| t.tid)
                    .collect();
                st.post_tags
                    .iter()
                    .filter(|(_, tid, _)| tids.contains(tid))
                    .map(|(pid, _, _)| *pid)
                    .collect()
            }
            _ => HashSet::new(),
        };
        let mut out: Vec<Post> = st
            .posts
            .iter()
            .filter(|p| !p.is_temp)
            .filter(|p| match filter {
                PostFilter::TitleContains(k) => {
                    p.title.to_lowercase().contains(&k.to_lowercase())
                }
                PostFilter::WriterNickname(n) => &p.nickname == n,
                PostFilter::Tag(_) => tagged.contains(&p.pid),
            })
            .cloned()
            .collect();
        out.sort_by(|a, b| (b.published_at, b.pid).cmp(&(a.published_at, a.pid)));
        Ok(out)
    }

    async fn adjust_likes(&self, pid: i64, liked: bool) -> anyhow::Result<Option<i64>> {
        let mut st = self.state.lock().unwrap();
        Ok(st.posts.iter_mut().find(|p| p.pid == pid).map(|p| {
            p.likes = if liked { p.likes + 1 } else { (p.likes - 1).max(0) };
            p.likes
        }))
    }

    async fn latest_notice(&self) -> anyhow::Result<Option<Post>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .posts
            .iter()
            .filter(|p| p.is_notice && !p.is_temp)
            .max_by_key(|p| (p.published_at, p.pid))
            .cloned())
    }

    async fn update(&self, pid: i64, draft: &PostDraft) -> anyhow::Result<Option<Post>> {
        let mut st = self.state.lock().unwrap();
        if !st.posts.iter().any(|p| p.pid == pid) {
            return Ok(None);
        }
        st.check_tag_links()?;
        let updated = st.posts.iter_mut().find(|p| p.pid == pid).map(|p| {
            let now = Utc::now();
            if p.is_temp && !draft.is_temp {
                p.published_at = now;
            }
            p.title = draft.title.clone();
            p.content = draft.content.clone();
            p.is_temp = draft.is_temp;
            p.updated_at = now;
            p.clone()
        });
        st.link_tags(pid, &draft.tags);
        Ok(updated)
    }

    async fn delete(&self, pid: i64) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.posts.len();
        st.posts.retain(|p| p.pid != pid);
        if st.posts.len() == before {
            return Ok(false);
        }
        st.comments.retain(|c| c.pid != pid);
        st.post_tags.retain(|(p, _, _)| *p != pid);
        Ok(true)
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn load_top_tags(&self, limit: i64) -> anyhow::Result<Vec<Tag>> {
        let st = self.state.lock().unwrap();
        let mut tags = st.tags.clone();
        tags.sort_by(|a, b| b.hits.cmp(&a.hits).then_with(|| a.name.cmp(&b.name)));
        tags.truncate(limit.max(0) as usize);
        Ok(tags)
    }

    async fn tags_for_post(&self, pid: i64) -> anyhow::Result<Vec<String>> {
        Ok(self.tag_names(pid))
    }

    async fn record_post_view(&self, pid: i64) -> anyhow::Result<()> {
        let mut st = self.state.lock().unwrap();
        let tids: HashSet<i64> = st
            .post_tags
            .iter()
            .filter(|(p, _, _)| *p == pid)
            .map(|(_, tid, _)| *tid)
            .collect();
        for t in st.tags.iter_mut().filter(|t| tids.contains(&t.tid)) {
            t.hits += 1;
        }
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create(&self, comment: &NewComment) -> anyhow::Result<Option<Comment>> {
        let mut st = self.state.lock().unwrap();
        if !st.posts.iter().any(|p| p.pid == comment.pid) {
            return Ok(None);
        }
        let Some(nickname) = st.user(comment.uid).map(|u| u.nickname.clone()) else {
            return Ok(None);
        };
        let cid = st.next_id();
        let now = Utc::now();
        let row = Comment {
            cid,
            pid: comment.pid,
            uid: comment.uid,
            nickname,
            parent_cid: comment.parent_cid,
            content: comment.content.clone(),
            created_at: now,
            updated_at: now,
        };
        st.comments.push(row.clone());
        Ok(Some(row))
    }

    async fn get_by_id(&self, cid: i64) -> anyhow::Result<Option<Comment>> {
        let st = self.state.lock().unwrap();
        Ok(st.comments.iter().find(|c| c.cid == cid).cloned())
    }

    async fn update_content(&self, cid: i64, content: &str) -> anyhow::Result<Option<Comment>> {
        let mut st = self.state.lock().unwrap();
        Ok(st.comments.iter_mut().find(|c| c.cid == cid).map(|c| {
            c.content = content.to_string();
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn delete(&self, cid: i64) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        if !st.comments.iter().any(|c| c.cid == cid) {
            return Ok(false);
        }
        let mut doomed: HashSet<i64> = HashSet::from([cid]);
        loop {
            let more: Vec<i64> = st
                .comments
                .iter()
                .filter(|c| !doomed.contains(&c.cid))
                .filter(|c| c.parent_cid.is_some_and(|p| doomed.contains(&p)))
                .map(|c| c.cid)
                .collect();
            if more.is_empty() {
                break;
            }
            doomed.extend(more);
        }
        st.comments.retain(|c| !doomed.contains(&c.cid));
        Ok(true)
    }

    async fn list_for_post(&self, pid: i64) -> anyhow::Result<Vec<Comment>> {
        let st = self.state.lock().unwrap();
        Ok(st.comments.iter().filter(|c| c.pid == pid).cloned().collect())
    }

    async fn list_replies(&self, cid: i64) -> anyhow::Result<Vec<Comment>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .comments
            .iter()
            .filter(|c| c.parent_cid == Some(cid))
            .cloned()
            .collect())
    }
}
