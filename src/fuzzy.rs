//! Approximate term matching.
//!
//! Similarity is the Ratcliff/Obershelp ratio `2 * M / T`, where `T` is the combined length of both
//! strings in characters and `M` is the number of characters in the matching blocks found by
//! repeatedly taking the longest common substring and recursing on both sides of it.

use std::cmp::Ordering;

/// Similarity of `a` and `b` in `[0, 1]`. Two empty strings are identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Total size of the matching blocks between `a` and `b`.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }
    matched
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Among runs of equal length the one starting earliest in `a`, then earliest in `b`, wins.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run[j] is the length of the common run ending at a[i - 1], b[j - 1]
    let mut prev = vec![0usize; bhi - blo + 1];
    let mut run = vec![0usize; bhi - blo + 1];
    for i in alo..ahi {
        for j in blo..bhi {
            let k = j - blo + 1;
            run[k] = if a[i] == b[j] { prev[k - 1] + 1 } else { 0 };
            if run[k] > best_size {
                best_size = run[k];
                best_i = i + 1 - best_size;
                best_j = j + 1 - best_size;
            }
        }
        std::mem::swap(&mut prev, &mut run);
    }
    (best_i, best_j, best_size)
}

/// The best `limit` candidates scoring at least `cutoff` against `word`, most similar first.
///
/// Equal scores are ordered by candidate, descending. `cutoff` is clamped to `[0, 1]`.
pub fn close_matches<'a, I>(word: &str, candidates: I, limit: usize, cutoff: f64) -> Vec<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    if limit == 0 {
        return Vec::new();
    }
    let cutoff = cutoff.clamp(0.0, 1.0);
    let mut scored: Vec<(&'a str, f64)> = candidates
        .into_iter()
        .map(|candidate| (candidate, ratio(word, candidate)))
        .filter(|(_, score)| *score >= cutoff)
        .collect();
    scored.sort_by(|(a, sa), (b, sb)| {
        sb.partial_cmp(sa)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.cmp(a))
    });
    scored.truncate(limit);
    scored
}
