//! End-to-end: the standard registry characterizes cleanly.

use contour_catalog::{standard_catalogs, standard_registry};
use contour_engine::{Analyzer, CharacterizationReport, ProbeConfig};
use contour_types::{AggregatedBehavior, CapabilityKind, Mutability};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn run(config: ProbeConfig) -> CharacterizationReport {
    crate::init_tracing();
    Analyzer::with_config(config)
        .analyze_registry(&standard_registry().unwrap(), &standard_catalogs().unwrap())
        .unwrap()
}

fn behavior<'a>(report: &'a CharacterizationReport, name: &str) -> &'a AggregatedBehavior {
    report
        .behavior(name)
        .unwrap_or_else(|| panic!("{} was not characterized", name))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn every_registered_type_is_characterized() {
    let report = run(ProbeConfig::default());
    assert!(report.is_complete(), "failures: {:?}", report.failures);
    assert_eq!(report.behaviors.len(), standard_registry().unwrap().len());
}

#[test]
fn mutability_classes() {
    let report = run(ProbeConfig::default());
    let expected = [
        ("resizable sequence", Mutability::Resizable),
        ("linked sequence", Mutability::Resizable),
        ("compact frozen sequence", Mutability::Immutable),
        ("fixed-size array view", Mutability::FixedSize),
        ("read-only sequence view", Mutability::Immutable),
        ("copied frozen sequence", Mutability::Immutable),
        ("collected sequence", Mutability::Resizable),
        ("collected frozen sequence", Mutability::Immutable),
        ("singleton sequence", Mutability::Resizable),
        ("empty sequence", Mutability::Immutable),
        ("resizable set", Mutability::Resizable),
        ("compact frozen set", Mutability::Immutable),
        ("read-only set view", Mutability::Immutable),
        ("collected set", Mutability::Resizable),
        ("empty set", Mutability::Immutable),
        ("resizable map", Mutability::Resizable),
        ("compact frozen map", Mutability::Immutable),
        ("read-only map view", Mutability::Immutable),
        ("singleton map", Mutability::Immutable),
        ("empty map", Mutability::Immutable),
    ];
    for (name, mutability) in expected {
        assert_eq!(behavior(&report, name).mutability(), mutability, "{}", name);
    }
}

#[test]
fn random_access_is_reported_for_sequences_only() {
    let report = run(ProbeConfig::default());
    assert_eq!(behavior(&report, "resizable sequence").random_access, Some(true));
    assert_eq!(behavior(&report, "linked sequence").random_access, Some(false));
    for b in &report.behaviors {
        assert_eq!(
            b.random_access.is_some(),
            b.capability == CapabilityKind::Sequence,
            "{}",
            b.container
        );
    }
}

#[test]
fn sequences_run_cursor_probes() {
    let report = run(ProbeConfig::default());
    let resizable = behavior(&report, "resizable sequence");
    let finding = resizable.findings_for("next(); remove()").next().unwrap();
    assert_eq!(finding.invocation.capability, CapabilityKind::SequenceIterator);
    assert!(finding.error.is_none());
}

#[test]
fn parallel_run_matches_sequential_run() {
    let sequential = run(ProbeConfig::default());
    let parallel = run(ProbeConfig::default().with_parallel(true));
    assert_ne!(sequential.run_id, parallel.run_id);
    assert_eq!(sequential.behaviors, parallel.behaviors);
}
