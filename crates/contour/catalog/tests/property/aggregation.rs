//! Property tests: aggregated behavior is consistent for any reference
//! payload.

use contour_catalog::{standard_catalogs, standard_registry};
use contour_engine::{analyze, Analyzer, ProbeConfig};
use contour_types::{CapabilityKind, Effect, Element};
use proptest::collection::btree_set;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Distinct, non-null payloads that always contain `a` and never `x`, the
/// element the catalogs insert.
fn arb_payload() -> impl Strategy<Value = Vec<Element>> {
    (btree_set("[b-w][a-w]{0,2}", 0..6), any::<prop::sample::Index>()).prop_map(
        |(others, position)| {
            let mut payload: Vec<Element> = others.into_iter().map(Element::value).collect();
            let at = position.index(payload.len() + 1);
            payload.insert(at, Element::from("a"));
            payload
        },
    )
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    /// Every standard container type characterizes without a fatal error,
    /// and accepted size changes always come with entry modification.
    #[test]
    fn standard_registry_is_consistent(payload in arb_payload()) {
        let config = ProbeConfig::default()
            .with_size_ceiling(6)
            .with_reference_payload(payload);
        let report = Analyzer::with_config(config)
            .analyze_registry(&standard_registry().unwrap(), &standard_catalogs().unwrap())
            .unwrap();
        prop_assert!(report.is_complete(), "failures: {:?}", report.failures);

        for behavior in &report.behaviors {
            if behavior.can_change_size() {
                prop_assert!(behavior.can_modify_entries(), "{}", behavior.container);
            }
            let size_altering = behavior
                .findings
                .iter()
                .any(|f| f.observed_effect() == Some(Effect::SizeAltering));
            prop_assert_eq!(size_altering, behavior.can_change_size());
            prop_assert_eq!(
                behavior.random_access.is_some(),
                behavior.capability == CapabilityKind::Sequence
            );
        }
    }

    /// Read-only probes never report a change on the container under test.
    #[test]
    fn read_only_probes_never_modify(payload in arb_payload()) {
        let config = ProbeConfig::default()
            .with_size_ceiling(4)
            .with_reference_payload(payload);
        let report = Analyzer::with_config(config)
            .analyze_registry(&standard_registry().unwrap(), &standard_catalogs().unwrap())
            .unwrap();
        for behavior in &report.behaviors {
            for finding in behavior
                .findings
                .iter()
                .filter(|f| f.has_tag(contour_types::OperationTag::ReadOnly))
            {
                prop_assert!(
                    !matches!(finding.effect, Effect::Modifying | Effect::SizeAltering),
                    "{} {}",
                    behavior.container,
                    finding.probe
                );
            }
        }
    }

    /// Analyzing the same type twice yields the same behavior.
    #[test]
    fn analysis_is_idempotent(index in any::<prop::sample::Index>()) {
        let registry = standard_registry().unwrap();
        let factory = &registry.factories()[index.index(registry.len())];
        let catalog = standard_catalogs()
            .unwrap()
            .catalog_for(factory.capability())
            .unwrap();
        let first = analyze(factory, &catalog).unwrap();
        let second = analyze(factory, &catalog).unwrap();
        prop_assert_eq!(first, second);
    }
}
