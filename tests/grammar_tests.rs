//! Cross-algorithm invariants (spec.md §8's "universal invariants"):
//! every algorithm must return a grammar that expands back to its input,
//! is closed, and is acyclic, regardless of which construction produced it.

use grammar_approx::{
    bisection_grammar, exhaustive_grammar, lehman1_grammar, sakamoto_grammar, Grammar,
};

type AlgorithmFn = fn(&str) -> grammar_approx::Result<Grammar>;

const ALGORITHMS: &[(&str, AlgorithmFn)] = &[
    ("bisection", bisection_grammar),
    ("lehman1", lehman1_grammar),
    ("sakamoto", sakamoto_grammar),
    ("exhaustive", exhaustive_grammar),
];

fn assert_universal_invariants(name: &str, s: &str, g: &Grammar) {
    assert!(g.verify_closure().is_ok(), "{name}: closure violation on {s:?}");
    assert!(g.is_acyclic(), "{name}: cyclic grammar on {s:?}");
    assert_eq!(
        g.expand(s).unwrap(),
        s,
        "{name}: expand(A({s:?})) did not round-trip"
    );
}

#[test]
fn all_algorithms_satisfy_universal_invariants() {
    let inputs = [
        "a",
        "ab",
        "aba",
        "abcdefgh",
        "abababab",
        "aababbabababbaba",
        "aaaaaabbbbbbbaaaaaa",
        "abcabcabc",
        "mississippi",
    ];
    for s in inputs {
        for (name, run) in ALGORITHMS {
            // Exhaustive is exponential; keep it to the short end of `inputs`.
            if *name == "exhaustive" && s.len() > 10 {
                continue;
            }
            let g = run(s).unwrap_or_else(|e| panic!("{name} failed on {s:?}: {e}"));
            assert_universal_invariants(name, s, &g);
        }
    }
}

#[test]
fn bisection_is_deterministic() {
    let s = "abcdefghabcdefgh";
    let g1 = bisection_grammar(s).unwrap();
    let g2 = bisection_grammar(s).unwrap();
    assert_eq!(g1, g2);
}

#[test]
fn exhaustive_is_never_larger_than_any_approximation() {
    for s in ["abab", "abcabc", "aabbaabb", "abcabcabc"] {
        let optimal = exhaustive_grammar(s).unwrap().size();
        for (name, run) in ALGORITHMS {
            if *name == "exhaustive" {
                continue;
            }
            let size = run(s).unwrap().size();
            assert!(
                optimal <= size,
                "{name}: exhaustive ({optimal}) should be <= approximation ({size}) on {s:?}"
            );
        }
    }
}

#[test]
fn single_character_input_yields_empty_grammar() {
    for (name, run) in ALGORITHMS {
        let g = run("x").unwrap_or_else(|e| panic!("{name} failed on \"x\": {e}"));
        assert!(g.is_empty(), "{name}: expected no productions for a single character");
    }
}

#[test]
fn all_algorithms_reject_empty_input() {
    for (name, run) in ALGORITHMS {
        assert!(run("").is_err(), "{name}: should reject empty input");
    }
}
