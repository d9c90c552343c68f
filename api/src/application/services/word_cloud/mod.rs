use crate::domain::tags::tag::{Tag, WeightedTag};

pub const TIER_COUNT: usize = 10;
pub const BASE_WEIGHT: u128 = 10;
pub const TIER_FACTOR: u128 = 100;

/// Assigns word cloud weights to tags ranked by hit count.
///
/// Tags are stably sorted ascending by hits and split into groups of
/// `max(n / 10, 1)`; each group gets the next tier, starting at 10 and
/// multiplying by 100. There is no clamp on the number of tiers, so fewer
/// than ten tags yields one tier per tag.
///
/// The tier index never exceeds 18 (n = 19 with interval 1 produces the most
/// groups), so the largest weight is 10^37 and always fits in a `u128`.
pub fn bucketize(tags: &[Tag]) -> Vec<WeightedTag> {
    let mut ranked: Vec<&Tag> = tags.iter().collect();
    ranked.sort_by(|a, b| a.hits.cmp(&b.hits));

    let interval = (ranked.len() / TIER_COUNT).max(1);
    let mut out = Vec::with_capacity(ranked.len());
    let mut weight = BASE_WEIGHT;
    let mut count = 0usize;
    for (i, tag) in ranked.into_iter().enumerate() {
        if i > 0 && count == 0 {
            weight *= TIER_FACTOR;
        }
        out.push(WeightedTag {
            name: tag.name.clone(),
            weight,
        });
        count += 1;
        if count == interval {
            count = 0;
        }
    }
    out
}
