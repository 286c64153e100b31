//! End-to-end: configuration and the characterization report.

use contour_catalog::{standard_catalogs, standard_registry};
use contour_containers::{Container, ReferenceSequence};
use contour_engine::{
    Analyzer, CatalogSet, CharacterizationReport, DirectFactory, FactoryRegistry, ProbeConfig,
};
use contour_types::{CapabilityKind, ContainerError, ProbeError, SizeBound};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Builds every size except `gap`.
fn gapped(gap: usize) -> DirectFactory {
    DirectFactory::new("gapped sequence", CapabilityKind::Sequence, move |e| {
        if e.len() == gap {
            return Err(ContainerError::illegal_argument("unsupported length"));
        }
        Ok(Container::sequence(ReferenceSequence::new(e.to_vec())))
    })
}

fn catalogs() -> CatalogSet {
    standard_catalogs().unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn report_survives_a_json_round_trip() {
    crate::init_tracing();
    let report = Analyzer::new()
        .analyze_registry(&standard_registry().unwrap(), &catalogs())
        .unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let back: CharacterizationReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}

#[test]
fn config_from_json_lowers_the_ceiling() {
    crate::init_tracing();
    let config = ProbeConfig::from_json(r#"{ "size_ceiling": 6, "parallel": true }"#).unwrap();
    assert_eq!(config.size_ceiling, 6);
    let report = Analyzer::with_config(config)
        .analyze_registry(&standard_registry().unwrap(), &catalogs())
        .unwrap();
    let compact = report.behavior("compact frozen sequence").unwrap();
    let rendered: Vec<String> = compact.sizes.ranges.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec!["[0, 0] CompactN", "[1, 2] Compact12", "[3, unbounded] CompactN"]
    );
}

#[test]
fn rejected_configuration() {
    assert!(matches!(
        ProbeConfig::from_json(r#"{ "reference_payload": [] }"#),
        Err(ProbeError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        ProbeConfig::from_json(r#"{ "reference_payload": ["a", null] }"#),
        Err(ProbeError::InvalidConfiguration(_))
    ));
}

#[test]
fn failed_type_is_recorded_and_skipped() {
    crate::init_tracing();
    let registry = FactoryRegistry::new()
        .with(gapped(3))
        .and_then(|r| r.with(standard_registry().unwrap().get("resizable sequence").unwrap().clone()))
        .unwrap();
    let report = Analyzer::new().analyze_registry(&registry, &catalogs()).unwrap();
    assert!(!report.is_complete());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].container, "gapped sequence");
    let resizable = report.behavior("resizable sequence").unwrap();
    assert_eq!(resizable.sizes.supported.max, SizeBound::Unbounded);
}

#[test]
fn fail_fast_aborts_the_run() {
    crate::init_tracing();
    let registry = FactoryRegistry::new().with(gapped(3)).unwrap();
    let err = Analyzer::with_config(ProbeConfig::default().with_fail_fast(true))
        .analyze_registry(&registry, &catalogs())
        .unwrap_err();
    assert!(matches!(err, ProbeError::Factory(_)));
}
