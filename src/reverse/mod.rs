//! Reverse translation: source workspace → target model
//!
//! A single synchronous pass over the workspace. Dependencies are pulled in
//! on demand through identity-keyed memoization, so rule visitation order
//! never matters; re-visits are free and reference cycles terminate.

pub mod rules;

use std::collections::HashSet;

use crate::catalog::{fields, RecordKind, SchemaCatalog};
use crate::diagnostics::DiagnosticsSink;
use crate::entity::{Entity, TargetModel};
use crate::identity::{IdentityMap, RecordIdentity, UntranslatedSet};
use crate::progress::ProgressObserver;
use crate::record::{Record, SourceWorkspace};
use crate::version::FamilyVersion;

pub use rules::RuleSet;

const CHANNEL: &str = "simbridge.reverse";

/// Result of one reverse run
#[derive(Debug)]
pub struct ReverseOutcome {
    pub model: TargetModel,
    pub diagnostics: DiagnosticsSink,
    pub identity_map: IdentityMap,
    pub untranslated: UntranslatedSet,
}

/// Pre-translation workspace pass, e.g. the external geometry normalizer.
/// Runs before any record is translated.
pub trait WorkspacePass {
    fn run(&self, workspace: &mut SourceWorkspace, sink: &mut DiagnosticsSink);
}

/// Engine translating a [`SourceWorkspace`] into a [`TargetModel`].
///
/// One instance per concurrent run; no state is shared across runs, and the
/// diagnostics sink is owned here rather than being process-global.
pub struct ReverseTranslationEngine {
    catalog: SchemaCatalog,
    rules: RuleSet,
    sink: DiagnosticsSink,
    normalizer: Option<Box<dyn WorkspacePass>>,
}

impl ReverseTranslationEngine {
    pub fn new(catalog: SchemaCatalog) -> Self {
        Self {
            catalog,
            rules: RuleSet::standard(),
            sink: DiagnosticsSink::new(),
            normalizer: None,
        }
    }

    /// Replace the diagnostics sink configuration for subsequent runs
    pub fn with_sink(mut self, sink: DiagnosticsSink) -> Self {
        self.sink = sink;
        self
    }

    /// Install the external geometry-normalization pass
    pub fn with_normalizer(mut self, pass: Box<dyn WorkspacePass>) -> Self {
        self.normalizer = Some(pass);
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Translate a workspace into a model, best effort.
    ///
    /// Never fails for per-record problems; inspect the returned diagnostics.
    /// A schema-family mismatch aborts before any record is touched and
    /// yields an empty model plus one Error.
    pub fn translate(
        &self,
        mut workspace: SourceWorkspace,
        mut progress: Option<&mut dyn ProgressObserver>,
    ) -> ReverseOutcome {
        let mut sink = self.sink.clone();
        sink.reset();

        if let Err(e) = workspace.check_family(&self.catalog) {
            tracing::error!(family = workspace.family(), "schema family mismatch");
            sink.error(CHANNEL, e.to_string());
            return ReverseOutcome {
                model: TargetModel::new(),
                diagnostics: sink,
                identity_map: IdentityMap::new(),
                untranslated: UntranslatedSet::new(),
            };
        }

        if let Some(observer) = progress.as_deref_mut() {
            observer.set_title("Translating workspace");
            observer.set_bounds(0, workspace.len());
        }

        if let Some(pass) = &self.normalizer {
            pass.run(&mut workspace, &mut sink);
        }

        self.normalize_singletons(&mut workspace, &mut sink);
        self.check_version(&workspace, &mut sink);

        let mut run = ReverseRun {
            catalog: &self.catalog,
            rules: &self.rules,
            workspace: &workspace,
            model: TargetModel::new(),
            map: IdentityMap::new(),
            untranslated: UntranslatedSet::new(),
            sink,
            in_flight: HashSet::new(),
            progress,
        };

        // Priority passes: the two singletons later rules assume are mapped,
        // then the container kind in declaration order so its recursive
        // pull-through is attributed first in diagnostics.
        for kind in [RecordKind::Site, RecordKind::SimulationControl] {
            for id in record_ids_of_kind(&workspace, kind) {
                run.sweep_step(id);
            }
        }
        for id in record_ids_of_kind(&workspace, RecordKind::Zone) {
            run.sweep_step(id);
        }

        // General sweep; priority work is memoized, so re-visits are free
        for id in workspace.identities() {
            run.sweep_step(id);
        }

        tracing::debug!(
            entities = run.model.len(),
            untranslated = run.untranslated.len(),
            "reverse translation complete"
        );

        ReverseOutcome {
            model: run.model,
            diagnostics: run.sink,
            identity_map: run.map,
            untranslated: run.untranslated,
        }
    }

    /// Workspaces must hold at most one record of each global-singleton kind.
    /// Collisions are resolved pessimistically: every instance is removed and
    /// the caller is warned to re-supply an unambiguous singleton.
    fn normalize_singletons(&self, workspace: &mut SourceWorkspace, sink: &mut DiagnosticsSink) {
        let singleton_kinds: Vec<RecordKind> = workspace
            .records()
            .map(|r| r.kind())
            .filter(|k| k.is_global_singleton())
            .collect();
        let mut handled: HashSet<RecordKind> = HashSet::new();
        for kind in singleton_kinds {
            if !handled.insert(kind) {
                continue;
            }
            let count = workspace.records_of_kind(kind).len();
            if count > 1 {
                workspace.remove_all_of_kind(kind);
                tracing::warn!(kind = %kind, count, "singleton collision; removing all instances");
                sink.warning(
                    CHANNEL,
                    format!(
                        "Workspace contains {} {} records but at most one is allowed; \
                         all were removed, please re-supply an unambiguous one",
                        count, kind
                    ),
                );
            }
        }
    }

    /// Non-fatal version gate: absence and mismatch both warn, translation
    /// always proceeds
    fn check_version(&self, workspace: &SourceWorkspace, sink: &mut DiagnosticsSink) {
        let expected = self.catalog.expected_version();
        let Some(record) = workspace.version_record() else {
            sink.warning(CHANNEL, "Workspace carries no version record");
            return;
        };
        let declared = match record
            .text(fields::version::IDENTIFIER)
            .map(FamilyVersion::parse)
        {
            Some(Ok(version)) => version,
            _ => {
                sink.warning(CHANNEL, "Workspace version record is unparsable");
                return;
            }
        };
        if !declared.same_major_minor(&expected) {
            let hint = if expected.is_plausible_next(&declared) {
                " (one release ahead of this engine)"
            } else {
                ""
            };
            sink.warning(
                CHANNEL,
                format!(
                    "Workspace version {} does not match expected version {}{}; \
                     translating anyway",
                    declared, expected, hint
                ),
            );
        }
    }
}

fn record_ids_of_kind(workspace: &SourceWorkspace, kind: RecordKind) -> Vec<RecordIdentity> {
    workspace
        .records_of_kind(kind)
        .iter()
        .map(|r| r.identity())
        .collect()
}

// =============================================================================
// ReverseRun
// =============================================================================

/// Per-run state handed to rules.
///
/// Rules recurse only through [`ReverseRun::resolve`]; everything else they
/// touch is field access and diagnostics.
pub struct ReverseRun<'a, 'p> {
    catalog: &'a SchemaCatalog,
    rules: &'a RuleSet,
    workspace: &'a SourceWorkspace,
    model: TargetModel,
    map: IdentityMap,
    untranslated: UntranslatedSet,
    sink: DiagnosticsSink,
    in_flight: HashSet<RecordIdentity>,
    progress: Option<&'p mut dyn ProgressObserver>,
}

impl<'a, 'p> ReverseRun<'a, 'p> {
    fn sweep_step(&mut self, identity: RecordIdentity) {
        self.translate_and_map(identity);
        let processed = self.map.len() + self.untranslated.len();
        if let Some(observer) = self.progress.as_deref_mut() {
            observer.set_value(processed);
        }
    }

    /// Translate one record, memoized on its identity.
    ///
    /// Returns the identity of the mapped entity, if any was produced —
    /// either now or on an earlier visit.
    pub fn translate_and_map(&mut self, identity: RecordIdentity) -> Option<RecordIdentity> {
        if let Some(target) = self.map.target_of(identity) {
            return Some(target);
        }
        let workspace: &'a SourceWorkspace = self.workspace;
        let record = workspace.get(identity)?;
        let kind = record.kind();

        if self.rules.is_ignored(kind) {
            return None;
        }
        let Some(rule) = self.rules.rule_for(kind) else {
            tracing::debug!(kind = %kind, "no rule registered; record left untranslated");
            self.untranslated.insert(identity);
            return None;
        };
        if !self.in_flight.insert(identity) {
            // A rule asked for a record that is already being translated;
            // the requester sees an absent reference.
            self.sink.warning(
                CHANNEL,
                format!("Reference cycle through {} record {}", kind, identity),
            );
            return None;
        }
        let produced = rule(record, self);
        self.in_flight.remove(&identity);

        let mapped = self.map.target_of(identity);
        if produced.is_some() {
            // Contract break, not bad input: a rule that claims success must
            // have registered its entity.
            assert!(
                mapped.is_some(),
                "rule for {} claimed success without registering an entity",
                kind
            );
        }
        mapped
    }

    /// Narrow resolver capability for rules: translate the referenced record
    /// on demand and return its entity identity
    pub fn resolve(&mut self, identity: RecordIdentity) -> Option<RecordIdentity> {
        self.translate_and_map(identity)
    }

    /// Insert the entity into the model and register the identity mapping.
    ///
    /// Registration happens here, mid-rule, so dependents resolved afterwards
    /// see the in-progress entity instead of recursing back.
    pub fn register(&mut self, source: &Record, entity: Entity) -> Option<RecordIdentity> {
        let entity_id = entity.identity();
        if let Err(e) = self.model.insert(entity) {
            self.error(format!("{} record {}: {}", source.kind(), source.identity(), e));
            return None;
        }
        if let Err(e) = self.map.insert(source.identity(), entity_id) {
            self.error(e.to_string());
            return None;
        }
        Some(entity_id)
    }

    pub fn model(&mut self) -> &mut TargetModel {
        &mut self.model
    }

    pub fn entity(&self, identity: RecordIdentity) -> Option<&Entity> {
        self.model.get(identity)
    }

    pub fn record(&self, identity: RecordIdentity) -> Option<&'a Record> {
        self.workspace.get(identity)
    }

    pub fn records_of_kind(&self, kind: RecordKind) -> Vec<&'a Record> {
        self.workspace.records_of_kind(kind)
    }

    // --- field access with requirement semantics ---

    /// Required field: absence is an Error; the rule decides whether to
    /// continue partially or bail
    pub fn required_text(&mut self, record: &Record, index: usize) -> Option<String> {
        match record.text(index) {
            Some(text) => Some(text.to_string()),
            None => {
                self.missing_required(record, index);
                None
            }
        }
    }

    pub fn required_number(&mut self, record: &Record, index: usize) -> Option<f64> {
        match record.number(index) {
            Some(n) => Some(n),
            None => {
                self.missing_required(record, index);
                None
            }
        }
    }

    pub fn required_reference(&mut self, record: &Record, index: usize) -> Option<RecordIdentity> {
        match record.reference(index) {
            Some(id) => Some(id),
            None => {
                self.missing_required(record, index);
                None
            }
        }
    }

    /// Recommended field: absence warns and yields the schema default
    pub fn recommended_number(&mut self, record: &Record, index: usize) -> f64 {
        if let Some(n) = record.number(index) {
            return n;
        }
        let default = self
            .catalog
            .default_of(record.kind(), index)
            .and_then(|v| v.as_number())
            .unwrap_or(0.0);
        self.missing_recommended(record, index, &default.to_string());
        default
    }

    pub fn recommended_text(&mut self, record: &Record, index: usize) -> String {
        if let Some(text) = record.text(index) {
            return text.to_string();
        }
        let default = self
            .catalog
            .default_of(record.kind(), index)
            .and_then(|v| v.as_text().map(str::to_string))
            .unwrap_or_default();
        self.missing_recommended(record, index, &default);
        default
    }

    fn field_name(&self, record: &Record, index: usize) -> &'static str {
        self.catalog
            .fields_of(record.kind())
            .get(index)
            .map(|spec| spec.name)
            .unwrap_or("<unnamed field>")
    }

    fn missing_required(&mut self, record: &Record, index: usize) {
        let text = format!(
            "{} record {} is missing required field '{}'",
            record.kind(),
            record.identity(),
            self.field_name(record, index)
        );
        tracing::warn!("{}", text);
        self.sink.error(CHANNEL, text);
    }

    fn missing_recommended(&mut self, record: &Record, index: usize, default: &str) {
        let text = format!(
            "{} record {} is missing field '{}'; using default {}",
            record.kind(),
            record.identity(),
            self.field_name(record, index),
            default
        );
        self.sink.warning(CHANNEL, text);
    }

    // --- diagnostics ---

    pub fn error(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::warn!("{}", text);
        self.sink.error(CHANNEL, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.sink.warning(CHANNEL, text.into());
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.sink.info(CHANNEL, text.into());
    }
}
