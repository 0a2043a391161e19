//! Concrete scenarios and fuzz property from spec.md §8.

use grammar_approx::symbol::Symbol;
use grammar_approx::{bisection_grammar, exhaustive_grammar, lehman1_grammar, sakamoto_grammar};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn nt(s: &str) -> Symbol {
    Symbol::Nonterminal(s.to_string())
}

fn t(c: char) -> Symbol {
    Symbol::Terminal(c)
}

/// Scenario 1: Bisection("abcdefgh").
#[test]
fn scenario_bisection_eight_chars() {
    let g = bisection_grammar("abcdefgh").unwrap();
    assert_eq!(g.len(), 7);
    assert_eq!(g.get("abcdefgh").unwrap().rhs, vec![nt("abcd"), nt("efgh")]);
    assert_eq!(g.get("abcd").unwrap().rhs, vec![nt("ab"), nt("cd")]);
    assert_eq!(g.get("efgh").unwrap().rhs, vec![nt("ef"), nt("gh")]);
    assert_eq!(g.get("ab").unwrap().rhs, vec![t('a'), t('b')]);
    assert_eq!(g.get("cd").unwrap().rhs, vec![t('c'), t('d')]);
    assert_eq!(g.get("ef").unwrap().rhs, vec![t('e'), t('f')]);
    assert_eq!(g.get("gh").unwrap().rhs, vec![t('g'), t('h')]);
}

/// Scenario 2: Bisection("abababab") collapses to exactly three
/// productions because the repeated "abab" and "ab" keys are shared.
#[test]
fn scenario_bisection_key_collapse() {
    let g = bisection_grammar("abababab").unwrap();
    assert_eq!(g.len(), 3);
    assert_eq!(g.get("abababab").unwrap().rhs, vec![nt("abab"), nt("abab")]);
    assert_eq!(g.get("abab").unwrap().rhs, vec![nt("ab"), nt("ab")]);
    assert_eq!(g.get("ab").unwrap().rhs, vec![t('a'), t('b')]);
}

/// Scenario 3: Exhaustive("abab") has size 4.
#[test]
fn scenario_exhaustive_abab() {
    let g = exhaustive_grammar("abab").unwrap();
    assert_eq!(g.size(), 4);
    assert_eq!(g.get("abab").unwrap().rhs, vec![nt("ab"), nt("ab")]);
    assert_eq!(g.get("ab").unwrap().rhs, vec![t('a'), t('b')]);
}

/// Scenario 4: Exhaustive("abababab") has size 6.
#[test]
fn scenario_exhaustive_abababab() {
    let g = exhaustive_grammar("abababab").unwrap();
    assert_eq!(g.size(), 6);
    assert_eq!(g.get("abababab").unwrap().rhs, vec![nt("abab"), nt("abab")]);
    assert_eq!(g.get("abab").unwrap().rhs, vec![nt("ab"), nt("ab")]);
    assert_eq!(g.get("ab").unwrap().rhs, vec![t('a'), t('b')]);
}

/// Scenario 5: Lehman1 on the published vector produces the "abab"/"baba"
/// decomposition spec.md §4.5 calls out.
#[test]
fn scenario_lehman1_published_vector() {
    let g = lehman1_grammar("aababbabababbaba").unwrap();
    assert_eq!(g.get("abab").unwrap().rhs, vec![t('a'), nt("ba"), t('b')]);
    assert_eq!(g.get("baba").unwrap().rhs, vec![nt("ba"), nt("ba")]);
    assert_eq!(g.get("ba").unwrap().rhs, vec![t('b'), t('a')]);
    assert_eq!(g.expand("aababbabababbaba").unwrap(), "aababbabababbaba");
}

/// Scenario 6: Sakamoto on a two-letter run-heavy string must terminate
/// and satisfy the universal invariants.
#[test]
fn scenario_sakamoto_terminates_on_run_heavy_input() {
    let s = "aaaaaabbbbbbbaaaaaa";
    let g = sakamoto_grammar(s).unwrap();
    assert!(g.verify_closure().is_ok());
    assert!(g.is_acyclic());
    assert_eq!(g.expand(s).unwrap(), s);
}

/// Fuzz property: for random strings over a 2-letter alphabet up to 5000
/// characters, Lehman1 and Sakamoto terminate and satisfy the universal
/// invariants (spec.md §8's fuzz property).
#[test]
fn fuzz_lehman1_and_sakamoto_on_binary_alphabet() {
    let mut rng = StdRng::seed_from_u64(1234);
    let alphabet = ['a', 'b'];
    for _ in 0..20 {
        let n = rng.gen_range(1..=5000);
        let s: String = (0..n).map(|_| alphabet[rng.gen_range(0..2)]).collect();

        let lg = lehman1_grammar(&s).unwrap();
        assert!(lg.verify_closure().is_ok());
        assert!(lg.is_acyclic());
        assert_eq!(lg.expand(&s).unwrap(), s);

        let sg = sakamoto_grammar(&s).unwrap();
        assert!(sg.verify_closure().is_ok());
        assert!(sg.is_acyclic());
        assert_eq!(sg.expand(&s).unwrap(), s);
    }
}
