//! Grammar model shared by every approximation algorithm.
//!
//! A [`Grammar`] is a map from nonterminal (identified by its canonical
//! expansion string) to the [`Production`] that derives it. It is built
//! up incrementally by each algorithm and is immutable once returned to a
//! caller.

use crate::error::{GrammarError, Result};
use crate::symbol::Symbol;
use std::collections::HashMap;
use std::fmt;

/// A production rule `lhs -> rhs`.
///
/// `lhs` is the nonterminal's canonical expansion (its derived string);
/// `rhs` is the sequence of symbols it decomposes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub lhs: String,
    pub rhs: Vec<Symbol>,
}

impl Production {
    pub fn new(lhs: impl Into<String>, rhs: Vec<Symbol>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs,
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> ", self.lhs)?;
        for (i, sym) in self.rhs.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", sym)?;
        }
        Ok(())
    }
}

/// A straight-line context-free grammar: one production per nonterminal,
/// each right-hand side a sequence of terminals and nonterminals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grammar {
    productions: HashMap<String, Production>,
}

impl Grammar {
    /// Constructs an empty grammar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or overwrites) the production for `lhs`.
    ///
    /// Overwriting is intentional: Bisection's recursion visits the same
    /// substring twice when a split is exactly in half, and Exhaustive's
    /// merge step relies on a later insert (the left child's production)
    /// winning over an earlier one.
    pub fn insert(&mut self, lhs: impl Into<String>, rhs: Vec<Symbol>) {
        let lhs = lhs.into();
        self.productions
            .insert(lhs.clone(), Production::new(lhs, rhs));
    }

    /// Looks up the production for a nonterminal by its expansion string.
    pub fn get(&self, lhs: &str) -> Option<&Production> {
        self.productions.get(lhs)
    }

    /// Returns true if `lhs` is a key of this grammar.
    pub fn contains(&self, lhs: &str) -> bool {
        self.productions.contains_key(lhs)
    }

    /// Iterates over all nonterminal keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.productions.keys().map(|s| s.as_str())
    }

    /// Iterates over all productions.
    pub fn all_productions(&self) -> impl Iterator<Item = &Production> {
        self.productions.values()
    }

    /// The number of distinct productions in this grammar.
    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    /// Grammar size: the sum of right-hand-side lengths across all
    /// productions. This is the quantity every algorithm approximates.
    pub fn size(&self) -> usize {
        self.productions.values().map(|p| p.rhs.len()).sum()
    }

    /// Expands `start` (a nonterminal's expansion string, or a lone
    /// terminal) into the terminal string it derives.
    ///
    /// Fails with [`GrammarError::UnresolvedNonterminal`] if closure is
    /// broken: some symbol reachable from `start` has no production.
    pub fn expand(&self, start: &str) -> Result<String> {
        let mut out = String::new();
        self.expand_symbol(&Symbol::from_piece(start), &mut out)?;
        Ok(out)
    }

    fn expand_symbol(&self, symbol: &Symbol, out: &mut String) -> Result<()> {
        match symbol {
            Symbol::Terminal(c) => {
                out.push(*c);
                Ok(())
            }
            Symbol::Nonterminal(name) => {
                let production = self
                    .get(name)
                    .ok_or_else(|| GrammarError::UnresolvedNonterminal(name.clone()))?;
                for sym in &production.rhs {
                    self.expand_symbol(sym, out)?;
                }
                Ok(())
            }
        }
    }

    /// Verifies the closure invariant: every symbol of length >= 2 used on
    /// any right-hand side must itself be a key of the grammar.
    ///
    /// Every algorithm in this crate calls this before returning; a
    /// failure indicates a bug in the algorithm, not bad input.
    pub fn verify_closure(&self) -> Result<()> {
        for production in self.productions.values() {
            for sym in &production.rhs {
                if let Symbol::Nonterminal(name) = sym {
                    if !self.contains(name) {
                        return Err(GrammarError::ClosureViolation(name.clone()));
                    }
                }
            }
        }
        Ok(())
    }

    /// Checks that the grammar is acyclic: no nonterminal's expansion
    /// reaches itself through a chain of productions.
    pub fn is_acyclic(&self) -> bool {
        fn visit<'a>(
            grammar: &'a Grammar,
            name: &'a str,
            on_stack: &mut std::collections::HashSet<&'a str>,
            visited: &mut std::collections::HashSet<&'a str>,
        ) -> bool {
            if on_stack.contains(name) {
                return false;
            }
            if visited.contains(name) {
                return true;
            }
            on_stack.insert(name);
            let Some(production) = grammar.get(name) else {
                on_stack.remove(name);
                visited.insert(name);
                return true;
            };
            for sym in &production.rhs {
                if let Symbol::Nonterminal(child) = sym {
                    if !visit(grammar, child, on_stack, visited) {
                        return false;
                    }
                }
            }
            on_stack.remove(name);
            visited.insert(name);
            true
        }

        let mut on_stack = std::collections::HashSet::new();
        let mut visited = std::collections::HashSet::new();
        self.keys().all(|k| visit(self, k, &mut on_stack, &mut visited))
    }

    /// Maximum derivation depth from `start` to a terminal: the number of
    /// production applications along the longest path. Used by Exhaustive
    /// to break ties between equally small grammars.
    pub fn stage_count(&self, start: &str) -> usize {
        match self.get(start) {
            None => 0,
            Some(production) => {
                production
                    .rhs
                    .iter()
                    .map(|sym| self.stage_count(&sym.expansion()))
                    .max()
                    .unwrap_or(0)
                    + 1
            }
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.productions.keys().collect();
        keys.sort();
        for key in keys {
            writeln!(f, "{}", self.productions[key])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut g = Grammar::new();
        g.insert("ab", vec![Symbol::Terminal('a'), Symbol::Terminal('b')]);
        assert_eq!(g.get("ab").unwrap().rhs.len(), 2);
        assert!(g.contains("ab"));
    }

    #[test]
    fn size_sums_rhs_lengths() {
        let mut g = Grammar::new();
        g.insert("ab", vec![Symbol::Terminal('a'), Symbol::Terminal('b')]);
        g.insert(
            "abab",
            vec![
                Symbol::Nonterminal("ab".to_string()),
                Symbol::Nonterminal("ab".to_string()),
            ],
        );
        assert_eq!(g.size(), 4);
    }

    #[test]
    fn expand_resolves_closure() {
        let mut g = Grammar::new();
        g.insert("ab", vec![Symbol::Terminal('a'), Symbol::Terminal('b')]);
        g.insert(
            "abab",
            vec![
                Symbol::Nonterminal("ab".to_string()),
                Symbol::Nonterminal("ab".to_string()),
            ],
        );
        assert_eq!(g.expand("abab").unwrap(), "abab");
    }

    #[test]
    fn expand_fails_on_missing_production() {
        let mut g = Grammar::new();
        g.insert(
            "abab",
            vec![
                Symbol::Nonterminal("ab".to_string()),
                Symbol::Nonterminal("ab".to_string()),
            ],
        );
        assert!(matches!(
            g.expand("abab"),
            Err(GrammarError::UnresolvedNonterminal(_))
        ));
    }

    #[test]
    fn verify_closure_catches_missing_key() {
        let mut g = Grammar::new();
        g.insert("abab", vec![Symbol::Nonterminal("ab".to_string())]);
        assert!(g.verify_closure().is_err());
    }

    #[test]
    fn detects_cycles() {
        let mut g = Grammar::new();
        g.insert(
            "ab",
            vec![
                Symbol::Nonterminal("ab".to_string()),
                Symbol::Terminal('b'),
            ],
        );
        assert!(!g.is_acyclic());
    }

    #[test]
    fn last_insert_wins() {
        let mut g = Grammar::new();
        g.insert("ab", vec![Symbol::Terminal('a'), Symbol::Terminal('b')]);
        g.insert("ab", vec![Symbol::Terminal('x')]);
        assert_eq!(g.get("ab").unwrap().rhs, vec![Symbol::Terminal('x')]);
    }
}
