//! Validation orchestration.
//!
//! [`run_validation`] drives the five phases in order. Each phase runs to
//! completion across every document, and the first phase that reports
//! anything ends the run: later phases assume the earlier ones were clean.
//!
//! Per-document work (reading, parsing, field checks) runs on a dedicated
//! rayon pool sized from [`ValidationConfig::jobs`](crate::config::ValidationConfig::jobs).

use crate::config::Config;
use crate::crossref;
use crate::entity::{self, Entity};
use crate::error::RegistryError;
use crate::finding::{Finding, Phase, PhaseReport, ValidationReport};
use crate::loader;
use crate::structure;
use crate::validators::contributor::validate_contributor;
use crate::validators::resource::{validate_resource, ResourceContext};
use rayon::prelude::*;
use std::collections::HashMap;

/// Counters carried into the final report.
#[derive(Debug, Default)]
struct Tally {
    files: usize,
    contributors: usize,
    resources: usize,
}

/// Runs a complete validation of the registry described by `config`.
///
/// # Errors
///
/// Returns [`RegistryError`] only for conditions that stop the run before
/// any findings can be produced: an unreadable registry root or a worker
/// pool that cannot be started. Everything else is reported in the
/// returned [`ValidationReport`].
///
/// # Examples
///
/// ```rust,no_run
/// use oxidized_registry::{config::Config, pipeline};
///
/// let config = Config::load(None).unwrap();
/// let report = pipeline::run_validation(&config).unwrap();
///
/// std::process::exit(if report.passed { 0 } else { 1 });
/// ```
pub fn run_validation(config: &Config) -> Result<ValidationReport, RegistryError> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if config.validation.jobs > 0 {
        builder = builder.num_threads(config.validation.jobs);
    }
    let pool = builder.build()?;
    pool.install(|| run_phases(config))
}

fn run_phases(config: &Config) -> Result<ValidationReport, RegistryError> {
    let root = &config.registry.root;
    let root_label = root.display().to_string();
    let mut phases = Vec::new();
    let mut tally = Tally::default();

    let finish = |phases: Vec<PhaseReport>, tally: &Tally| {
        ValidationReport::from_phases(
            &root_label,
            phases,
            tally.files,
            tally.contributors,
            tally.resources,
        )
    };

    // Structure
    tracing::info!(phase = Phase::Structure.id(), dir = %root.display(), "validating repository structure");
    let findings = structure::validate_structure(root, &config.registry.icons_dir)?;
    if !record(&mut phases, Phase::Structure, findings) {
        return Ok(finish(phases, &tally));
    }

    // File load
    let locations = loader::discover_readmes(root);
    tally.files = locations.len();
    tracing::info!(phase = Phase::FileLoad.id(), num_files = locations.len(), "reading README files");
    let (documents, findings) = loader::load_documents(&locations);
    if !record(&mut phases, Phase::FileLoad, findings) {
        return Ok(finish(phases, &tally));
    }

    // Parse
    tracing::info!(phase = Phase::Parse.id(), num_files = documents.len(), "parsing README files");
    let results: Vec<Result<Entity, Vec<Finding>>> = documents
        .par_iter()
        .map(|doc| {
            tracing::debug!(path = %doc.path.display(), kind = %doc.kind, "parsing README");
            entity::decode(doc)
        })
        .collect();
    let mut entities = Vec::with_capacity(results.len());
    let mut findings = Vec::new();
    for result in results {
        match result {
            Ok(entity) => entities.push(entity),
            Err(errs) => findings.extend(errs),
        }
    }
    findings.extend(duplicate_identities(&entities));
    tally.contributors = entities
        .iter()
        .filter(|e| matches!(e, Entity::Contributor(_)))
        .count();
    tally.resources = entities.len() - tally.contributors;
    if !record(&mut phases, Phase::Parse, findings) {
        return Ok(finish(phases, &tally));
    }

    // Field validation
    tracing::info!(
        phase = Phase::FieldValidation.id(),
        num_contributors = tally.contributors,
        num_resources = tally.resources,
        "validating README contents"
    );
    let ctx = ResourceContext::new(&config.registry.icons_dir);
    let findings: Vec<Finding> = entities
        .par_iter()
        .flat_map_iter(|entity| match entity {
            Entity::Contributor(profile) => validate_contributor(profile),
            Entity::Resource(resource) => validate_resource(resource, &ctx),
        })
        .collect();
    if !record(&mut phases, Phase::FieldValidation, findings) {
        return Ok(finish(phases, &tally));
    }

    // Cross-reference
    tracing::info!(phase = Phase::CrossReference.id(), "cross-referencing README files");
    let findings = crossref::validate_cross_references(&entities, root);
    record(&mut phases, Phase::CrossReference, findings);

    Ok(finish(phases, &tally))
}

/// Stores a phase's findings and returns `true` if the next phase may run.
fn record(phases: &mut Vec<PhaseReport>, phase: Phase, findings: Vec<Finding>) -> bool {
    let report = PhaseReport::new(phase, findings);
    let clean = report.is_clean();
    if clean {
        tracing::info!(phase = phase.id(), "phase passed");
    } else {
        tracing::warn!(phase = phase.id(), num_findings = report.findings.len(), "phase failed");
    }
    phases.push(report);
    clean
}

/// Entities must have distinct identities; every README after the first to
/// claim one is reported.
fn duplicate_identities(entities: &[Entity]) -> Vec<Finding> {
    let mut seen: HashMap<&str, &Entity> = HashMap::new();
    let mut findings = Vec::new();
    for entity in entities {
        let Some(identity) = entity.identity() else {
            continue;
        };
        match seen.get(identity) {
            Some(first) => findings.push(
                Finding::new(
                    "parse/duplicate-identity",
                    format!(
                        "identity {identity:?} conflicts with the one declared in {}",
                        first.path().display()
                    ),
                )
                .in_file(entity.path())
                .at_line(entity.source().line_of("github")),
            ),
            None => {
                seen.insert(identity, entity);
            }
        }
    }
    findings
}
