//! Lehman1 / substring construction: an O(log^3 n)-approximation built on
//! a hierarchy of progressively finer superstring segmentations.
//!
//! Three phases, following Charikar et al. (2005), pages 15-17:
//! - Phase A builds the C-hierarchy `C_n, C_{n/2}, ..., C_2` of
//!   segmentations of the input, each level produced from the previous
//!   one via [`crate::superstring::greedy_superstring_with_breaks`].
//! - Phase B (substring construction) emits a balanced grammar over each
//!   level's segments, and separately over the raw characters, giving
//!   every contiguous sub-range a home.
//! - Phase C (stitching) builds the production for every segment at every
//!   level by walking all finer levels and consuming the longest matching
//!   prefix at each step.

use crate::error::{GrammarError, Result};
use crate::grammar::Grammar;
use crate::superstring::{greedy_superstring_with_breaks, split_too_big};
use crate::symbol::Symbol;
use log::{debug, trace};

/// Builds the Lehman1 grammar for `s`.
pub fn lehman1_grammar(s: &str) -> Result<Grammar> {
    if s.is_empty() {
        return Err(GrammarError::EmptyInput);
    }

    let levels = generate_cs(s);
    debug!("lehman1: C-hierarchy has {} levels", levels.len());

    let mut grammar = Grammar::new();
    for level in &levels {
        substring_construction(level, &mut grammar);
    }
    let chars: Vec<String> = s.chars().map(|c| c.to_string()).collect();
    substring_construction(&chars, &mut grammar);

    for (i, level) in levels.iter().enumerate() {
        for segment in level {
            if segment.chars().count() == 1 {
                continue;
            }
            let rhs = stitch(segment, &levels[i + 1..], &grammar);
            grammar.insert(segment.clone(), rhs);
        }
    }

    grammar.verify_closure()?;
    Ok(grammar)
}

/// Ceiling of log2(n), for n >= 1.
fn ceil_log2(n: usize) -> u32 {
    if n <= 1 {
        0
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

/// The C-hierarchy `[C_n, C_{n/2}, ..., C_2]`: successive segmentations
/// of `s`, each built by re-superstringing the previous level and
/// halving any segment that grew past the current threshold.
fn generate_cs(s: &str) -> Vec<Vec<String>> {
    let n = s.chars().count();
    let clog = ceil_log2(n);
    let mut k: i64 = if clog == 0 { 0 } else { 1i64 << (clog - 1) };

    let mut levels = vec![vec![s.to_string()]];
    while k >= 2 {
        let merged = greedy_superstring_with_breaks(levels.last().unwrap());
        let split = split_too_big(&merged, k as usize);
        trace!("lehman1: level at k={} has {} segments", k, split.len());
        levels.push(split);
        k /= 2;
    }
    levels
}

/// Builds a balanced grammar over `pieces`, emitting a production for
/// every contiguous sub-range spanning the left or right half of any
/// recursively-bisected window.
fn substring_construction(pieces: &[String], grammar: &mut Grammar) {
    if pieces.len() == 1 {
        return;
    }
    let mid = pieces.len() / 2;

    for i in 0..mid.saturating_sub(1) {
        let key: String = pieces[i..mid].concat();
        let first = Symbol::from_piece(&pieces[i]);
        let rest: String = pieces[i + 1..mid].concat();
        grammar.insert(key, vec![first, Symbol::from_piece(&rest)]);
    }
    for i in (mid + 1)..pieces.len() {
        let key: String = pieces[mid..=i].concat();
        let rest: String = pieces[mid..i].concat();
        let last = Symbol::from_piece(&pieces[i]);
        grammar.insert(key, vec![Symbol::from_piece(&rest), last]);
    }

    substring_construction(&pieces[..mid], grammar);
    substring_construction(&pieces[mid..], grammar);
}

/// Locates `s` as a prefix of the concatenation of some contiguous range
/// of `small_strings`. Returns `(start, end, used)`: `small_strings` in
/// `[start, end)` cover the longest prefix of `s` they can, `used` is how
/// much of `s` that prefix consumed.
fn find_longest_prefix(s: &str, small_strings: &[String]) -> (usize, usize, usize) {
    let start = (0..small_strings.len())
        .find(|&i| {
            let joined: String = small_strings[i..].concat();
            joined.len() >= s.len() && &joined[..s.len()] == s
        })
        .expect("lehman1: string not found as a prefix of any finer-level suffix");

    let mut end = start;
    let mut remaining = s.len();
    while end < small_strings.len() && small_strings[end].len() <= remaining {
        remaining -= small_strings[end].len();
        end += 1;
    }
    (start, end, s.len() - remaining)
}

/// Builds the right-hand side for `segment` by consuming it against each
/// finer level in turn, reusing (or freshly splitting) whatever each
/// level already offers.
fn stitch(segment: &str, finer_levels: &[Vec<String>], grammar: &Grammar) -> Vec<Symbol> {
    let mut remainder = segment.to_string();
    let mut rhs = Vec::new();

    for level in finer_levels {
        let (start, end, used) = find_longest_prefix(&remainder, level);
        if start == end {
            continue;
        } else if start + 1 == end {
            rhs.push(Symbol::from_piece(&level[start]));
            remainder = remainder[used..].to_string();
        } else if start + 2 == end {
            rhs.push(Symbol::from_piece(&level[start]));
            rhs.push(Symbol::from_piece(&level[start + 1]));
            remainder = remainder[used..].to_string();
        } else {
            let mut half1 = String::new();
            let mut half2 = String::new();
            for split in (start + 1)..end {
                half1 = level[start..split].concat();
                half2 = level[split..end].concat();
                if (split == start + 1 || grammar.contains(&half1))
                    && (split == end - 1 || grammar.contains(&half2))
                {
                    break;
                }
            }
            rhs.push(Symbol::from_piece(&half1));
            rhs.push(Symbol::from_piece(&half2));
            remainder = remainder[used..].to_string();
        }
    }

    rhs.extend(remainder.chars().map(Symbol::Terminal));
    rhs
}
