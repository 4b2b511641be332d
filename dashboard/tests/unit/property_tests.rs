//! Property-based tests for the env-file format and the port allocator.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;

use proptest::prelude::*;

use nlq_dashboard::application::services::port_allocation::allocate;
use nlq_dashboard::domain::config::{EnvConfig, masked_view, parse_env, render_env, MASK};

use crate::mocks::FixedPortProbe;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

// ============================================================================
// Env-file format
// ============================================================================

proptest! {
    /// Keys are identifier-like; values may contain `=` and inner spaces but
    /// no surrounding whitespace or newlines.
    #[test]
    fn prop_render_then_parse_is_identity(
        entries in prop::collection::btree_map(
            "[A-Za-z_][A-Za-z0-9_]{0,15}",
            "([!-~]([ -~]{0,30}[!-~])?)?",
            0..12,
        )
    ) {
        let config: EnvConfig = entries;
        prop_assert_eq!(parse_env(&render_env(&config)), config);
    }

    /// Arbitrary text never panics the parser and never yields an empty key.
    #[test]
    fn prop_parse_never_yields_empty_keys(content in "\\PC{0,200}") {
        let parsed = parse_env(&content);
        prop_assert!(parsed.keys().all(|k| !k.is_empty()));
    }

    /// No non-empty secret value survives masking.
    #[test]
    fn prop_masked_view_hides_secret_values(
        name in "[A-Z]{1,8}_(PASSWORD|KEY|SECRET)",
        value in "[a-z0-9]{1,20}",
    ) {
        let config = EnvConfig::from([(name.clone(), value)]);
        let view = masked_view(&config);
        prop_assert_eq!(view.get(&name).map(String::as_str), Some(MASK));
    }
}

// ============================================================================
// Allocator minimality
// ============================================================================

proptest! {
    /// The allocated port is the smallest free candidate in range, and
    /// `None` means every candidate was busy.
    #[test]
    fn prop_allocate_returns_smallest_free_candidate(
        start in 1024u16..60000,
        attempts in 1u16..20,
        busy_offsets in prop::collection::btree_set(0u16..20, 0..20),
    ) {
        let busy: BTreeSet<u16> = busy_offsets.iter().map(|o| start + o).collect();
        let probe = FixedPortProbe::busy(busy.iter().copied());

        let allocated = runtime().block_on(allocate(&probe, start, attempts));
        let expected = (start..start + attempts).find(|p| !busy.contains(p));

        prop_assert_eq!(allocated, expected);
    }
}
