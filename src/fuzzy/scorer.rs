//! Similarity scores on a 0-100 scale
//!
//! All scores are built on the normalized indel similarity
//! `100 * (1 - indel(a, b) / (|a| + |b|))`, computed over characters with
//! rapidfuzz. [`weighted_ratio`] combines the plain, token and partial
//! variants so that reordered words and a short label inside a longer line
//! still score high, while unrelated strings of similar length do not.

use rapidfuzz::distance::indel;
use std::collections::{BTreeSet, HashSet};

const UNBASE_SCALE: f64 = 0.95;

/// Lowercase, replace every non-alphanumeric character with a space, trim.
pub fn default_process(text: &str) -> String {
    let processed: String = text
        .chars()
        .flat_map(|c| {
            let mapped = if c.is_alphanumeric() { c } else { ' ' };
            mapped.to_lowercase()
        })
        .collect();
    processed.trim().to_string()
}

/// Plain indel similarity of two strings.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

fn indel_distance(a: &[char], b: &[char]) -> usize {
    indel::distance(a.iter().copied(), b.iter().copied())
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    100.0 * (1.0 - indel_distance(a, b) as f64 / total as f64)
}

/// Similarity of `a` and `b` when it can exceed `floor`.
///
/// The distance computation is cut off as soon as `floor` is out of reach.
fn ratio_above(a: &[char], b: &[char], floor: f64) -> Option<f64> {
    let total = a.len() + b.len();
    if total == 0 {
        return Some(100.0);
    }
    // score > floor  <=>  distance < total * (1 - floor / 100)
    let limit = total as f64 * (1.0 - floor / 100.0);
    if limit <= 0.0 {
        return None;
    }
    let max_distance = limit.ceil() as usize - 1;
    let args = indel::Args::default().score_cutoff(max_distance);
    indel::distance_with_args(a.iter().copied(), b.iter().copied(), &args)
        .map(|distance| 100.0 * (1.0 - distance as f64 / total as f64))
}

/// Best alignment of the shorter string against windows of the longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.len() == b.len() {
        return partial_ratio_chars(&a, &b).max(partial_ratio_chars(&b, &a));
    }
    if a.len() < b.len() {
        partial_ratio_chars(&a, &b)
    } else {
        partial_ratio_chars(&b, &a)
    }
}

fn improve(short: &[char], window: &[char], best: &mut f64) {
    if let Some(score) = ratio_above(short, window, *best) {
        if score > *best {
            *best = score;
        }
    }
}

/// `short` is aligned against every window of `long` with the same length,
/// plus the shorter windows hanging off either end.
///
/// A window whose outer character does not occur in `short` cannot beat
/// its neighbour one step inward, so it is not scored.
fn partial_ratio_chars(short: &[char], long: &[char]) -> f64 {
    let m = short.len();
    let n = long.len();
    let in_short: HashSet<char> = short.iter().copied().collect();
    let mut best: f64 = 0.0;

    for i in 1..m {
        if in_short.contains(&long[i - 1]) {
            improve(short, &long[..i], &mut best);
        }
    }
    for start in 0..=(n - m) {
        if start == 0 || in_short.contains(&long[start + m - 1]) {
            improve(short, &long[start..start + m], &mut best);
            if best >= 100.0 {
                return 100.0;
            }
        }
    }
    for start in (n - m + 1)..n {
        if in_short.contains(&long[start]) {
            improve(short, &long[start..], &mut best);
        }
    }
    best
}

fn sorted_join<'a>(tokens: impl IntoIterator<Item = &'a str>) -> String {
    let mut tokens: Vec<&str> = tokens.into_iter().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Ratio after sorting the whitespace-separated tokens of both strings.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(
        &sorted_join(a.split_whitespace()),
        &sorted_join(b.split_whitespace()),
    )
}

/// Ratio over the shared and differing token sets.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    // One side is a subset of the other
    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let diff_ab_joined: Vec<char> = diff_ab.join(" ").chars().collect();
    let diff_ba_joined: Vec<char> = diff_ba.join(" ").chars().collect();
    let ab_len = diff_ab_joined.len();
    let ba_len = diff_ba_joined.len();
    let sect_len = intersection.join(" ").chars().count();

    // Lengths of "intersection + remainder", joined by a space when both exist
    let separator = usize::from(sect_len > 0);
    let sect_ab_len = sect_len + separator + ab_len;
    let sect_ba_len = sect_len + separator + ba_len;

    let mut result: f64 = 0.0;
    let total = sect_ab_len + sect_ba_len;
    if total > 0 {
        let dist = indel_distance(&diff_ab_joined, &diff_ba_joined);
        result = 100.0 * (1.0 - dist as f64 / total as f64);
    }

    if sect_len == 0 {
        return result;
    }

    // Distance from the intersection alone to intersection + remainder is
    // just the remainder plus the joining space.
    let sect_ab = 100.0 * (1.0 - (separator + ab_len) as f64 / (sect_len + sect_ab_len) as f64);
    let sect_ba = 100.0 * (1.0 - (separator + ba_len) as f64 / (sect_len + sect_ba_len) as f64);

    result.max(sect_ab).max(sect_ba)
}

/// Best of the token-sort and token-set ratios.
pub fn token_ratio(a: &str, b: &str) -> f64 {
    token_sort_ratio(a, b).max(token_set_ratio(a, b))
}

/// Partial ratio over sorted tokens; any shared word scores 100.
pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let split_a: Vec<&str> = a.split_whitespace().collect();
    let split_b: Vec<&str> = b.split_whitespace().collect();
    let tokens_a: BTreeSet<&str> = split_a.iter().copied().collect();
    let tokens_b: BTreeSet<&str> = split_b.iter().copied().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }
    if !tokens_a.is_disjoint(&tokens_b) {
        return 100.0;
    }

    let result = partial_ratio(
        &sorted_join(split_a.iter().copied()),
        &sorted_join(split_b.iter().copied()),
    );

    // Without duplicate tokens the set form is the same string
    if split_a.len() == tokens_a.len() && split_b.len() == tokens_b.len() {
        return result;
    }

    result.max(partial_ratio(
        &sorted_join(tokens_a.iter().copied()),
        &sorted_join(tokens_b.iter().copied()),
    ))
}

/// Weighted combination of the ratios above.
///
/// Strings of similar length use the plain and token ratios; once one is
/// at least 1.5 times longer, partial alignments are considered at a
/// discount that grows with the length difference. Either input empty
/// scores 0.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
    let end_ratio = ratio(a, b);

    if len_ratio < 1.5 {
        return end_ratio.max(token_ratio(a, b) * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
    end_ratio
        .max(partial_ratio(a, b) * partial_scale)
        .max(partial_token_ratio(a, b) * UNBASE_SCALE * partial_scale)
}
