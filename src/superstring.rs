//! Greedy shortest-superstring kernel shared by Lehman1's C-hierarchy.
//!
//! Gives a 4-approximation to the shortest common superstring of a set of
//! strings (Blum, Jiang, Li, Tromp, Yannakakis 1994), and additionally
//! reports where each input string's start landed in the merged result so
//! the caller can cut the superstring back into aligned segments.

use std::collections::HashMap;

/// Longest overlap between a proper, non-empty suffix of `s1` and a
/// proper, non-empty prefix of `s2`.
///
/// Returns `(overlap_len, split)` where `split` is the index in `s1` at
/// which the overlapping suffix begins, i.e. `s1[..split]` is the
/// non-overlapping prefix to keep when merging. `(0, s1.len())` means no
/// overlap was found.
pub fn overlap(s1: &str, s2: &str) -> (usize, usize) {
    let mut best = (0usize, s1.len());
    let bound = s1.len().min(s2.len());
    for i in 1..bound {
        if &s1[s1.len() - i..] == &s2[..i] {
            best = (i, s1.len() - i);
        }
    }
    best
}

/// Index pair `(i, j)` with `i < j` of the two strings in `strings` with
/// the greatest overlap. Ties favor the pair found last, since later
/// indices lexicographically dominate equal overlap lengths.
fn pair_with_max_overlap(strings: &[String]) -> (usize, usize) {
    let mut best = (0usize, 0usize, 0usize); // (overlap_len, i, j)
    for i in 0..strings.len() {
        for j in (i + 1)..strings.len() {
            let (len, _) = overlap(&strings[i], &strings[j]);
            if len >= best.0 {
                best = (len, i, j);
            }
        }
    }
    (best.1, best.2)
}

/// Greedily merges `strings` into a small superstring (4-approximation),
/// then cuts that superstring at every input string's start offset,
/// returning the resulting aligned segments.
pub fn greedy_superstring_with_breaks(strings: &[String]) -> Vec<String> {
    let mut pool: Vec<String> = strings.to_vec();
    let mut starts: HashMap<String, Vec<usize>> = HashMap::new();
    for s in &pool {
        starts.entry(s.clone()).or_default().push(0);
    }

    while pool.len() > 1 {
        let (i, j) = pair_with_max_overlap(&pool);
        let s1 = pool[i].clone();
        let s2 = pool[j].clone();

        let pos1 = pool.iter().position(|s| s == &s1).unwrap();
        pool.remove(pos1);
        let pos2 = pool.iter().position(|s| s == &s2).unwrap();
        pool.remove(pos2);

        let (_, split) = overlap(&s1, &s2);
        let merged = format!("{}{}", &s1[..split], s2);

        let s1_starts = starts.get(&s1).cloned().unwrap_or_default();
        let s2_starts = starts.get(&s2).cloned().unwrap_or_default();
        let merged_starts: Vec<usize> = s1_starts
            .into_iter()
            .chain(s2_starts.into_iter().map(|off| off + split))
            .collect();
        starts.entry(merged.clone()).or_default().extend(merged_starts);

        pool.push(merged);
    }

    let superstring = pool.into_iter().next().unwrap_or_default();
    let mut cuts = starts.remove(&superstring).unwrap_or_default();
    cuts.push(0);
    cuts.push(superstring.len());
    cuts.sort_unstable();
    cuts.dedup();

    cuts.windows(2)
        .map(|w| superstring[w[0]..w[1]].to_string())
        .collect()
}

/// Splits every string longer than `split_len` in half at its midpoint.
/// A single pass suffices: every call site feeds segments bounded by
/// twice the current threshold.
pub fn split_too_big(strings: &[String], split_len: usize) -> Vec<String> {
    let mut result = Vec::with_capacity(strings.len());
    for s in strings {
        if s.len() > split_len {
            let mid = s.len() / 2;
            result.push(s[..mid].to_string());
            result.push(s[mid..].to_string());
        } else {
            result.push(s.clone());
        }
    }
    result
}
