//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Pattern matching semantics
//! - Dependency chain value semantics and cycle monotonicity
//! - Canonicalization determinism and constraint ordering

use crate::chain::{ChainItem, DependencyChain};
use crate::pattern::Pattern;
use crate::policy::{OnBreak, Policy, RawConstraint, canonicalize};
use crate::test_support::constraint;
use proptest::prelude::*;
use regex::Regex;
use std::collections::BTreeMap;

// ============================================================================
// Strategies
// ============================================================================

fn arb_unit() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-c]{1,4}(/[a-c]{1,4}){0,2}").expect("unit regex")
}

fn arb_component() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["A", "B", "C", "D"]).prop_map(str::to_string)
}

/// Small regexes built from fragments that always compile.
fn arb_regex() -> impl Strategy<Value = String> {
    let fragment = prop::sample::select(vec!["a", "b", "c", "/", "[ab]", "a+", "b?", ".", "c*"]);
    (
        any::<bool>(),
        prop::collection::vec(fragment, 1..5),
        any::<bool>(),
    )
        .prop_map(|(start, parts, end)| {
            let mut raw = String::new();
            if start {
                raw.push('^');
            }
            raw.push_str(&parts.concat());
            if end {
                raw.push('$');
            }
            raw
        })
}

fn arb_chain() -> impl Strategy<Value = DependencyChain> {
    prop::collection::vec((arb_unit(), arb_component()), 0..8).prop_map(|items| {
        let mut chain = DependencyChain::new();
        for (unit, component) in items {
            chain.append(ChainItem::compound(unit, component));
        }
        chain
    })
}

fn arb_on_break() -> impl Strategy<Value = OnBreak> {
    prop_oneof![Just(OnBreak::Warn), Just(OnBreak::Error)]
}

fn arb_constraints() -> impl Strategy<Value = Vec<RawConstraint>> {
    let ids = prop::sample::subsequence(vec!["api", "db", "web", "core"], 1..4)
        .prop_map(|ids| ids.join(" "));
    let kind = prop::sample::select(vec!["allow", "forbid"]);
    prop::collection::vec((ids.clone(), kind, ids, arb_on_break()), 0..8).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(idx, (scope, kind, deps, on_break))| {
                constraint(&format!("c{idx}"), &scope, kind, &deps, on_break)
            })
            .collect()
    })
}

fn components() -> BTreeMap<String, String> {
    [
        ("api", "api/"),
        ("db", "db/ ~^store/"),
        ("web", "web/"),
        ("core", "api/core"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

// ============================================================================
// Pattern semantics
// ============================================================================

proptest! {
    /// A literal matches exactly when the candidate contains its text.
    #[test]
    fn literal_matches_iff_contained(text in "[a-c/]{0,3}", candidate in "[a-c/]{0,8}") {
        let pattern = Pattern::literal(text.clone());
        prop_assert_eq!(pattern.matches(&candidate), candidate.contains(&text));
    }

    /// A regex matches exactly when the expression finds a match anywhere in the candidate.
    #[test]
    fn regex_matches_iff_found(raw in arb_regex(), candidate in "[a-c/]{0,8}") {
        let pattern = Pattern::from_token(&format!("~{raw}")).expect("compiles");
        let expected = Regex::new(&raw).expect("compiles").is_match(&candidate);
        prop_assert_eq!(pattern.matches(&candidate), expected);
        prop_assert_eq!(pattern.as_str(), raw.as_str());
    }
}

// ============================================================================
// Dependency chain
// ============================================================================

proptest! {
    /// Appending to a clone never changes the original.
    #[test]
    fn clone_then_append_leaves_original(
        chain in arb_chain(),
        unit in arb_unit(),
        component in arb_component(),
    ) {
        let before = chain.clone();
        let extended = chain.with(ChainItem::compound(unit, component));

        prop_assert_eq!(&chain, &before);
        prop_assert_eq!(extended.len(), chain.len() + 1);
        prop_assert_eq!(&extended.items()[..chain.len()], chain.items());
    }

    /// Once cyclic, every further append keeps the chain cyclic.
    #[test]
    fn cyclic_is_monotonic(
        chain in arb_chain(),
        more in prop::collection::vec((arb_unit(), arb_component()), 0..6),
    ) {
        let mut current = chain;
        let mut was_cyclic = current.is_cyclic();
        for (unit, component) in more {
            current = current.with(ChainItem::compound(unit, component));
            if was_cyclic {
                prop_assert!(current.is_cyclic());
            }
            was_cyclic = current.is_cyclic();
        }
    }

    /// A chain whose items all share one component is never cyclic.
    #[test]
    fn single_component_chain_is_never_cyclic(units in prop::collection::vec(arb_unit(), 1..8)) {
        let mut chain = DependencyChain::new();
        for unit in units {
            chain.append(ChainItem::compound(unit, "A"));
        }
        prop_assert!(!chain.is_cyclic());
        prop_assert!(chain.edges().is_empty());
    }
}

// ============================================================================
// Policy resolution
// ============================================================================

proptest! {
    /// Canonicalizing again from the same inputs yields the same canonical constraints.
    #[test]
    fn canonicalize_is_idempotent(constraints in arb_constraints()) {
        let policy = Policy::new(&components(), &BTreeMap::new(), constraints).expect("policy");
        let again = canonicalize(policy.components(), policy.classes(), policy.raw_constraints())
            .expect("canonicalize");
        prop_assert_eq!(policy.canonical_constraints(), again.as_slice());
    }

    /// Applicable constraints keep their declaration order.
    #[test]
    fn applicable_constraints_preserve_order(
        constraints in arb_constraints(),
        unit in prop::sample::select(vec!["api/x", "api/core/y", "db/z", "store/q", "web/w", "none"]),
    ) {
        let policy = Policy::new(&components(), &BTreeMap::new(), constraints).expect("policy");
        let positions: Vec<usize> = policy
            .applicable_constraints(unit)
            .iter()
            .map(|c| {
                policy
                    .canonical_constraints()
                    .iter()
                    .position(|candidate| candidate.name == c.name)
                    .expect("declared")
            })
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
