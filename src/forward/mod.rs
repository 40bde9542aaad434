//! Forward translation: target model → source workspace
//!
//! Structurally symmetric to the reverse engine, with a target→source
//! identity map. Some kinds expand into more than one record; auxiliary
//! grouping records are synthesized here and have no target-side
//! counterpart.

pub mod rules;

use std::collections::HashSet;

use crate::catalog::{fields, RecordKind, SchemaCatalog};
use crate::diagnostics::DiagnosticsSink;
use crate::entity::{Entity, TargetModel};
use crate::identity::{IdentityMap, RecordIdentity, UntranslatedSet};
use crate::progress::ProgressObserver;
use crate::record::{FieldValue, Record, SourceWorkspace};

pub use rules::ForwardRuleSet;

const CHANNEL: &str = "simbridge.forward";

/// Result of one forward run
#[derive(Debug)]
pub struct ForwardOutcome {
    pub workspace: SourceWorkspace,
    pub diagnostics: DiagnosticsSink,
    pub identity_map: IdentityMap,
    pub untranslated: UntranslatedSet,
}

/// Engine translating a [`TargetModel`] into a [`SourceWorkspace`] ready for
/// external byte-level emission
pub struct ForwardTranslationEngine {
    catalog: SchemaCatalog,
    rules: ForwardRuleSet,
    sink: DiagnosticsSink,
}

impl ForwardTranslationEngine {
    pub fn new(catalog: SchemaCatalog) -> Self {
        Self {
            catalog,
            rules: ForwardRuleSet::standard(),
            sink: DiagnosticsSink::new(),
        }
    }

    /// Replace the diagnostics sink configuration for subsequent runs
    pub fn with_sink(mut self, sink: DiagnosticsSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn rules(&self) -> &ForwardRuleSet {
        &self.rules
    }

    /// Translate a model into a workspace, best effort; per-entity problems
    /// land in the diagnostics, never abort the sweep
    pub fn translate(
        &self,
        model: &TargetModel,
        mut progress: Option<&mut dyn ProgressObserver>,
    ) -> ForwardOutcome {
        let mut sink = self.sink.clone();
        sink.reset();

        if let Some(observer) = progress.as_deref_mut() {
            observer.set_title("Translating model");
            observer.set_bounds(0, model.len());
        }

        let mut workspace = SourceWorkspace::new(self.catalog.family());
        workspace.add(
            Record::new(RecordKind::Version).with_text(
                fields::version::IDENTIFIER,
                self.catalog.expected_version().to_string(),
            ),
        );

        let mut run = ForwardRun {
            model,
            rules: &self.rules,
            workspace,
            map: IdentityMap::new(),
            untranslated: UntranslatedSet::new(),
            sink,
            in_flight: HashSet::new(),
            progress,
        };

        let identities: Vec<RecordIdentity> =
            model.entities().map(|e| e.identity()).collect();
        for identity in identities {
            run.sweep_step(identity);
        }

        tracing::debug!(
            records = run.workspace.len(),
            untranslated = run.untranslated.len(),
            "forward translation complete"
        );

        ForwardOutcome {
            workspace: run.workspace,
            diagnostics: run.sink,
            identity_map: run.map,
            untranslated: run.untranslated,
        }
    }
}

// =============================================================================
// ForwardRun
// =============================================================================

/// Per-run state handed to forward rules
pub struct ForwardRun<'a, 'p> {
    model: &'a TargetModel,
    rules: &'a ForwardRuleSet,
    workspace: SourceWorkspace,
    map: IdentityMap,
    untranslated: UntranslatedSet,
    sink: DiagnosticsSink,
    in_flight: HashSet<RecordIdentity>,
    progress: Option<&'p mut dyn ProgressObserver>,
}

impl<'a, 'p> ForwardRun<'a, 'p> {
    fn sweep_step(&mut self, identity: RecordIdentity) {
        self.translate_and_map(identity);
        let processed = self.map.len() + self.untranslated.len();
        if let Some(observer) = self.progress.as_deref_mut() {
            observer.set_value(processed);
        }
    }

    /// Translate one entity, memoized on its identity
    pub fn translate_and_map(&mut self, identity: RecordIdentity) -> Option<RecordIdentity> {
        if let Some(target) = self.map.target_of(identity) {
            return Some(target);
        }
        let model: &'a TargetModel = self.model;
        let entity = model.get(identity)?;
        let kind = entity.kind();

        let Some(rule) = self.rules.rule_for(kind) else {
            tracing::debug!(kind = %kind, "no forward rule registered; entity left untranslated");
            self.untranslated.insert(identity);
            return None;
        };
        if !self.in_flight.insert(identity) {
            self.sink.warning(
                CHANNEL,
                format!("Reference cycle through {} entity {}", kind, identity),
            );
            return None;
        }
        let produced = rule(entity, self);
        self.in_flight.remove(&identity);

        if let Some(record_id) = produced {
            // Contract break, not bad input: a rule that claims success must
            // have put its primary record into the workspace.
            assert!(
                self.workspace.get(record_id).is_some(),
                "forward rule for {} claimed success without producing a record",
                kind
            );
        }
        self.map.target_of(identity)
    }

    /// Narrow resolver capability: translate the referenced entity on demand
    /// and return its primary record identity
    pub fn resolve(&mut self, identity: RecordIdentity) -> Option<RecordIdentity> {
        self.translate_and_map(identity)
    }

    /// Add the primary record for an entity and register the identity
    /// mapping. Like the reverse side, registration happens mid-rule so
    /// dependents resolved afterwards find the in-progress record.
    pub fn register(&mut self, source: &Entity, record: Record) -> Option<RecordIdentity> {
        let record_id = self.workspace.add(record);
        if let Err(e) = self.map.insert(source.identity(), record_id) {
            self.sink.error(CHANNEL, e.to_string());
            return None;
        }
        Some(record_id)
    }

    /// Add an auxiliary record (e.g. a synthesized grouping record) with no
    /// target-side counterpart and no identity mapping
    pub fn push_aux(&mut self, record: Record) -> RecordIdentity {
        self.workspace.add(record)
    }

    /// Mutate a field of an already-added record
    pub fn set_field(&mut self, record_id: RecordIdentity, index: usize, value: FieldValue) {
        if let Some(record) = self.workspace.get_mut(record_id) {
            record.set(index, value);
        }
    }

    /// Append to the repeating tail of an already-added record
    pub fn push_field(&mut self, record_id: RecordIdentity, value: FieldValue) {
        if let Some(record) = self.workspace.get_mut(record_id) {
            record.push_field(value);
        }
    }

    pub fn model(&self) -> &'a TargetModel {
        self.model
    }

    pub fn entity(&self, identity: RecordIdentity) -> Option<&'a Entity> {
        self.model.get(identity)
    }

    /// Name field of a produced record, for grouping-record membership
    pub fn record_name(&self, record_id: RecordIdentity) -> Option<String> {
        self.workspace
            .get(record_id)
            .and_then(|r| r.text(0))
            .map(str::to_string)
    }

    /// Required attribute: absence is an Error; the rule decides whether to
    /// continue partially or bail
    pub fn required_text_attr(&mut self, entity: &Entity, attribute: &str) -> Option<String> {
        match entity.text(attribute) {
            Some(text) => Some(text.to_string()),
            None => {
                self.missing_attr(entity, attribute);
                None
            }
        }
    }

    pub fn required_number_attr(&mut self, entity: &Entity, attribute: &str) -> Option<f64> {
        match entity.number(attribute) {
            Some(n) => Some(n),
            None => {
                self.missing_attr(entity, attribute);
                None
            }
        }
    }

    fn missing_attr(&mut self, entity: &Entity, attribute: &str) {
        let text = format!(
            "{} entity {} is missing attribute '{}'",
            entity.kind(),
            entity.identity(),
            attribute
        );
        tracing::warn!("{}", text);
        self.sink.error(CHANNEL, text);
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
        let text = text.into();
        tracing::debug!("{}", text);
        self.sink.info(CHANNEL, text);
    }
}
