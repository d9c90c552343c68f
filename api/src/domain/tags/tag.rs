#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub tid: i64,
    pub name: String,
    pub hits: i64,
}

/// Display weight of a tag inside the word cloud. Tiers grow by a factor of 100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedTag {
    pub name: String,
    pub weight: u128,
}

pub const MAX_TAG_NAME_CHARS: usize = 64;

/// Trims, lower-cases and de-duplicates tag names, keeping first occurrence order.
pub fn normalize_tag_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for raw in names {
        let t: String = raw
            .as_ref()
            .trim()
            .to_lowercase()
            .chars()
            .take(MAX_TAG_NAME_CHARS)
            .collect();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}
