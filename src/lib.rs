//! Simulation Bridge
//!
//! A bidirectional translation engine between a loosely-typed source
//! workspace of flat, schema-validated records and a strongly-typed target
//! model whose object graph enforces per-kind invariants.
//!
//! ## Features
//!
//! - **Rule Dispatch**: One translation rule per record or entity kind,
//!   looked up from a closed dispatch table
//! - **Memoized Identity Mapping**: Each source unit is translated at most
//!   once; shared references converge on one output object
//! - **Cycle Safety**: Mutually-referencing units translate without
//!   unbounded recursion
//! - **Diagnostics**: Per-run severity-filtered diagnostics instead of
//!   panics; translation is best effort
//! - **Progress Reporting**: Observer hooks for long-running translations
//!
//! ## Architecture
//!
//! ```text
//! SourceWorkspace ──reverse──▶ TargetModel
//!        ▲                          │
//!        └─────────forward──────────┘
//! ```
//!
//! The reverse engine walks workspace records, dispatching each to its rule;
//! rules pull dependencies through [`reverse::ReverseRun::resolve`], which
//! memoizes on record identity. The forward engine mirrors the process from
//! entities back to records, synthesizing the grouping records the flat
//! schema needs.

pub mod catalog;
pub mod diagnostics;
pub mod entity;
pub mod error;
pub mod forward;
pub mod identity;
pub mod progress;
pub mod record;
pub mod reverse;
pub mod version;

pub use catalog::{EntityKind, FieldSpec, FieldType, KindClass, RecordKind, SchemaCatalog};
pub use diagnostics::{Diagnostic, DiagnosticsSink, Severity};
pub use entity::{AttributeValue, Entity, TargetModel};
pub use error::{BridgeError, Result};
pub use forward::{ForwardOutcome, ForwardTranslationEngine};
pub use identity::{IdentityMap, RecordIdentity, UntranslatedSet};
pub use progress::ProgressObserver;
pub use record::{FieldValue, Record, SourceWorkspace};
pub use reverse::{ReverseOutcome, ReverseTranslationEngine};
pub use version::FamilyVersion;
