use std::collections::{HashMap, HashSet};

use crate::domain::comments::comment::{Comment, CommentNode};

/// Levels of nesting kept in a thread, roots included.
pub const MAX_THREAD_DEPTH: usize = 32;

/// Nests a post's flat comment rows into reply threads.
///
/// Rows whose parent is not in `comments` are treated as roots. Siblings keep
/// the order they had in the input. Replies below [`MAX_THREAD_DEPTH`] levels
/// are listed flat, in thread order, under their deepest kept ancestor.
pub fn build_threads(comments: Vec<Comment>) -> Vec<CommentNode> {
    let present: HashSet<i64> = comments.iter().map(|c| c.cid).collect();
    let mut children: HashMap<i64, Vec<Comment>> = HashMap::new();
    let mut roots: Vec<Comment> = Vec::new();
    for c in comments {
        match c.parent_cid {
            Some(parent) if parent != c.cid && present.contains(&parent) => {
                children.entry(parent).or_default().push(c)
            }
            _ => roots.push(c),
        }
    }
    roots
        .into_iter()
        .map(|c| attach(c, &mut children, 1))
        .collect()
}

fn attach(comment: Comment, children: &mut HashMap<i64, Vec<Comment>>, level: usize) -> CommentNode {
    // Removing the entry before descending guarantees termination on cyclic rows.
    let direct = children.remove(&comment.cid).unwrap_or_default();
    let replies = if level + 1 < MAX_THREAD_DEPTH {
        direct
            .into_iter()
            .map(|c| attach(c, children, level + 1))
            .collect()
    } else {
        flatten(direct, children)
    };
    CommentNode { comment, replies }
}

fn flatten(direct: Vec<Comment>, children: &mut HashMap<i64, Vec<Comment>>) -> Vec<CommentNode> {
    let mut out = Vec::new();
    let mut stack: Vec<Comment> = direct.into_iter().rev().collect();
    while let Some(comment) = stack.pop() {
        if let Some(kids) = children.remove(&comment.cid) {
            stack.extend(kids.into_iter().rev());
        }
        out.push(CommentNode {
            comment,
            replies: Vec::new(),
        });
    }
    out
}
