//! Source workspace
//!
//! The loosely-typed side of the bridge: a flat collection of
//! schema-validated records, each referencing others by identity. Records are
//! owned exclusively by one workspace; field order follows the catalog's
//! descriptors, with repeating groups appended past the fixed head.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::{RecordKind, SchemaCatalog};
use crate::error::{BridgeError, Result};
use crate::identity::RecordIdentity;

// =============================================================================
// Field values
// =============================================================================

/// A single loosely-typed field slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Absent,
    Text(String),
    Number(f64),
    Reference(RecordIdentity),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<RecordIdentity> {
        match self {
            Self::Reference(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

// =============================================================================
// Record
// =============================================================================

/// A schema-typed, identity-bearing input unit with ordered field values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    kind: RecordKind,
    identity: RecordIdentity,
    fields: Vec<FieldValue>,
}

impl Record {
    /// New record with a fresh identity and no fields
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            identity: RecordIdentity::new(),
            fields: Vec::new(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn identity(&self) -> RecordIdentity {
        self.identity
    }

    /// Field at `index`; absent when past the end
    pub fn field(&self, index: usize) -> &FieldValue {
        self.fields.get(index).unwrap_or(&FieldValue::Absent)
    }

    pub fn text(&self, index: usize) -> Option<&str> {
        self.field(index).as_text()
    }

    pub fn number(&self, index: usize) -> Option<f64> {
        self.field(index).as_number()
    }

    pub fn reference(&self, index: usize) -> Option<RecordIdentity> {
        self.field(index).as_reference()
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    /// Set a field, growing the record with absent slots as needed
    pub fn set(&mut self, index: usize, value: FieldValue) {
        if index >= self.fields.len() {
            self.fields.resize(index + 1, FieldValue::Absent);
        }
        self.fields[index] = value;
    }

    /// Append to the repeating tail
    pub fn push_field(&mut self, value: FieldValue) {
        self.fields.push(value);
    }

    /// Builder-style field set
    pub fn with_field(mut self, index: usize, value: FieldValue) -> Self {
        self.set(index, value);
        self
    }

    pub fn with_text(self, index: usize, text: impl Into<String>) -> Self {
        self.with_field(index, FieldValue::Text(text.into()))
    }

    pub fn with_number(self, index: usize, number: f64) -> Self {
        self.with_field(index, FieldValue::Number(number))
    }

    pub fn with_reference(self, index: usize, target: RecordIdentity) -> Self {
        self.with_field(index, FieldValue::Reference(target))
    }
}

// =============================================================================
// SourceWorkspace
// =============================================================================

/// Flat, ordered collection of records declaring one schema family.
///
/// Lookup by identity is constant time; by-kind lookup preserves insertion
/// order. Removal exists for pre-translation normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceWorkspace {
    family: String,
    order: Vec<RecordIdentity>,
    records: HashMap<RecordIdentity, Record>,
}

impl SourceWorkspace {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            order: Vec::new(),
            records: HashMap::new(),
        }
    }

    /// Declared schema family
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Fail-fast family precondition used by the engines
    pub fn check_family(&self, catalog: &SchemaCatalog) -> Result<()> {
        if self.family == catalog.family() {
            Ok(())
        } else {
            Err(BridgeError::FamilyMismatch {
                expected: catalog.family().to_string(),
                actual: self.family.clone(),
            })
        }
    }

    /// Add a record, returning its identity
    pub fn add(&mut self, record: Record) -> RecordIdentity {
        let identity = record.identity();
        self.order.push(identity);
        self.records.insert(identity, record);
        identity
    }

    pub fn get(&self, identity: RecordIdentity) -> Option<&Record> {
        self.records.get(&identity)
    }

    /// Mutable access for the engines while a workspace is under construction
    pub fn get_mut(&mut self, identity: RecordIdentity) -> Option<&mut Record> {
        self.records.get_mut(&identity)
    }

    /// All records in insertion order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Identities in insertion order
    pub fn identities(&self) -> Vec<RecordIdentity> {
        self.order
            .iter()
            .filter(|id| self.records.contains_key(id))
            .copied()
            .collect()
    }

    /// Records of one kind, insertion order preserved
    pub fn records_of_kind(&self, kind: RecordKind) -> Vec<&Record> {
        self.records().filter(|r| r.kind() == kind).collect()
    }

    /// Remove one record
    pub fn remove(&mut self, identity: RecordIdentity) -> Option<Record> {
        self.records.remove(&identity)
    }

    /// Remove every record of a kind, returning how many were removed
    pub fn remove_all_of_kind(&mut self, kind: RecordKind) -> usize {
        let doomed: Vec<RecordIdentity> = self
            .records
            .values()
            .filter(|r| r.kind() == kind)
            .map(|r| r.identity())
            .collect();
        for id in &doomed {
            self.records.remove(id);
        }
        doomed.len()
    }

    /// The dedicated version record, if any
    pub fn version_record(&self) -> Option<&Record> {
        self.records().find(|r| r.kind() == RecordKind::Version)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fields;

    #[test]
    fn test_field_access_past_end_is_absent() {
        let record = Record::new(RecordKind::Zone).with_text(fields::zone::NAME, "Core");
        assert_eq!(record.text(fields::zone::NAME), Some("Core"));
        assert!(record.field(99).is_absent());
        assert_eq!(record.number(fields::zone::VOLUME), None);
    }

    #[test]
    fn test_set_grows_with_absent_slots() {
        let mut record = Record::new(RecordKind::Zone);
        record.set(fields::zone::MULTIPLIER, FieldValue::Number(2.0));
        assert!(record.field(fields::zone::NAME).is_absent());
        assert_eq!(record.number(fields::zone::MULTIPLIER), Some(2.0));
        assert_eq!(record.num_fields(), 3);
    }

    #[test]
    fn test_by_kind_lookup_preserves_insertion_order() {
        let mut ws = SourceWorkspace::new("energy.workspace");
        ws.add(Record::new(RecordKind::Zone).with_text(0, "A"));
        ws.add(Record::new(RecordKind::Lights).with_text(0, "L"));
        ws.add(Record::new(RecordKind::Zone).with_text(0, "B"));
        let zones = ws.records_of_kind(RecordKind::Zone);
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].text(0), Some("A"));
        assert_eq!(zones[1].text(0), Some("B"));
    }

    #[test]
    fn test_remove_all_of_kind() {
        let mut ws = SourceWorkspace::new("energy.workspace");
        ws.add(Record::new(RecordKind::RunPeriod).with_text(0, "annual"));
        ws.add(Record::new(RecordKind::RunPeriod).with_text(0, "extra"));
        let id = ws.add(Record::new(RecordKind::Zone).with_text(0, "Core"));
        assert_eq!(ws.remove_all_of_kind(RecordKind::RunPeriod), 2);
        assert_eq!(ws.len(), 1);
        assert!(ws.get(id).is_some());
        assert!(ws.records_of_kind(RecordKind::RunPeriod).is_empty());
    }

    #[test]
    fn test_family_check() {
        let catalog = SchemaCatalog::energy();
        let good = SourceWorkspace::new("energy.workspace");
        assert!(good.check_family(&catalog).is_ok());
        let bad = SourceWorkspace::new("daylight.workspace");
        assert!(bad.check_family(&catalog).is_err());
    }
}
