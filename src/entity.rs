//! Target model
//!
//! The strongly-typed side of the bridge: an object graph whose per-kind
//! invariants (known attributes, value types, legal enumerated values,
//! numeric ranges) are enforced on every insert and mutation. Entities hold
//! shared references to other entities; many entities may point at one
//! sub-entity, e.g. a shared schedule.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::catalog::EntityKind;
use crate::error::{BridgeError, Result};
use crate::identity::RecordIdentity;

// =============================================================================
// Attribute values
// =============================================================================

/// Typed attribute state of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Text(String),
    Number(f64),
    Reference(RecordIdentity),
    ReferenceList(Vec<RecordIdentity>),
    NumberList(Vec<f64>),
}

impl AttributeValue {
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

    pub fn as_reference_list(&self) -> Option<&[RecordIdentity]> {
        match self {
            Self::ReferenceList(ids) => Some(ids),
            _ => None,
        }
    }

    pub fn as_number_list(&self) -> Option<&[f64]> {
        match self {
            Self::NumberList(ns) => Some(ns),
            _ => None,
        }
    }

    fn attr_type(&self) -> AttrType {
        match self {
            Self::Text(_) => AttrType::Text,
            Self::Number(_) => AttrType::Number,
            Self::Reference(_) => AttrType::Reference,
            Self::ReferenceList(_) => AttrType::ReferenceList,
            Self::NumberList(_) => AttrType::NumberList,
        }
    }
}

// =============================================================================
// Entity
// =============================================================================

/// A schema-typed, identity-bearing target-graph unit.
///
/// Free entities (not yet inserted) can be populated without checks; the
/// model validates everything on insert, and all post-insert mutation goes
/// through [`TargetModel::set_attribute`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    kind: EntityKind,
    identity: RecordIdentity,
    attributes: BTreeMap<String, AttributeValue>,
}

impl Entity {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            identity: RecordIdentity::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn identity(&self) -> RecordIdentity {
        self.identity
    }

    pub fn get(&self, attribute: &str) -> Option<&AttributeValue> {
        self.attributes.get(attribute)
    }

    pub fn text(&self, attribute: &str) -> Option<&str> {
        self.get(attribute).and_then(AttributeValue::as_text)
    }

    pub fn number(&self, attribute: &str) -> Option<f64> {
        self.get(attribute).and_then(AttributeValue::as_number)
    }

    pub fn reference(&self, attribute: &str) -> Option<RecordIdentity> {
        self.get(attribute).and_then(AttributeValue::as_reference)
    }

    /// The "name" attribute, present on most kinds
    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    /// Unchecked set; used while building a free entity
    pub fn set(&mut self, attribute: impl Into<String>, value: AttributeValue) {
        self.attributes.insert(attribute.into(), value);
    }

    pub fn with(mut self, attribute: impl Into<String>, value: AttributeValue) -> Self {
        self.set(attribute, value);
        self
    }

    pub fn with_text(self, attribute: impl Into<String>, text: impl Into<String>) -> Self {
        self.with(attribute, AttributeValue::Text(text.into()))
    }

    pub fn with_number(self, attribute: impl Into<String>, number: f64) -> Self {
        self.with(attribute, AttributeValue::Number(number))
    }

    pub fn with_reference(self, attribute: impl Into<String>, target: RecordIdentity) -> Self {
        self.with(attribute, AttributeValue::Reference(target))
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// =============================================================================
// Per-kind invariants
// =============================================================================

/// Declared type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrType {
    Text,
    Number,
    Reference,
    ReferenceList,
    NumberList,
}

use AttrType::{Number, NumberList, Reference, ReferenceList, Text};

/// Known attributes per entity kind, with their declared types
fn known_attributes(kind: EntityKind) -> &'static [(&'static str, AttrType)] {
    match kind {
        EntityKind::Site => &[
            ("name", Text),
            ("latitude", Number),
            ("longitude", Number),
            ("time_zone", Number),
            ("elevation", Number),
            ("north_axis_radians", Number),
        ],
        EntityKind::SimulationControl => &[
            ("do_zone_sizing", Text),
            ("do_system_sizing", Text),
            ("do_plant_sizing", Text),
            ("run_for_sizing_periods", Text),
            ("run_for_weather_periods", Text),
        ],
        EntityKind::RunPeriod => &[
            ("name", Text),
            ("begin_month", Number),
            ("begin_day", Number),
            ("end_month", Number),
            ("end_day", Number),
            ("use_weather_holidays", Text),
        ],
        EntityKind::Timestep => &[("steps_per_hour", Number)],
        EntityKind::DesignDay => &[
            ("name", Text),
            ("month", Number),
            ("day_of_month", Number),
            ("day_type", Text),
            ("max_drybulb", Number),
            ("daily_range", Number),
            ("humidity_indicator", Text),
            ("wetbulb_at_max_drybulb", Number),
            ("dewpoint_at_max_drybulb", Number),
            ("humidity_ratio_at_max_drybulb", Number),
            ("enthalpy_at_max_drybulb", Number),
            ("station_pressure_pa", Number),
            ("wind_speed", Number),
            ("wind_direction", Number),
        ],
        EntityKind::ScheduleTypeLimits => &[
            ("name", Text),
            ("lower_limit", Number),
            ("upper_limit", Number),
            ("numeric_type", Text),
        ],
        EntityKind::DaySchedule => &[
            ("name", Text),
            ("type_limits", Reference),
            ("interpolate", Text),
            ("until_hours", NumberList),
            ("values", NumberList),
        ],
        EntityKind::WeekSchedule => &[
            ("name", Text),
            ("weekday_schedule", Reference),
            ("weekend_schedule", Reference),
        ],
        EntityKind::YearSchedule => &[
            ("name", Text),
            ("type_limits", Reference),
            ("week_schedule", Reference),
        ],
        EntityKind::ConstantSchedule => &[
            ("name", Text),
            ("type_limits", Reference),
            ("value", Number),
        ],
        EntityKind::LinearCurve => &[
            ("name", Text),
            ("coefficient1", Number),
            ("coefficient2", Number),
            ("min_x", Number),
            ("max_x", Number),
        ],
        EntityKind::QuadraticCurve => &[
            ("name", Text),
            ("coefficient1", Number),
            ("coefficient2", Number),
            ("coefficient3", Number),
            ("min_x", Number),
            ("max_x", Number),
        ],
        EntityKind::BiquadraticCurve => &[
            ("name", Text),
            ("coefficient1", Number),
            ("coefficient2", Number),
            ("coefficient3", Number),
            ("coefficient4", Number),
            ("coefficient5", Number),
            ("coefficient6", Number),
            ("min_x", Number),
            ("max_x", Number),
            ("min_y", Number),
            ("max_y", Number),
        ],
        EntityKind::StandardMaterial => &[
            ("name", Text),
            ("roughness", Text),
            ("thickness", Number),
            ("conductivity", Number),
            ("density", Number),
            ("specific_heat", Number),
            ("thermal_absorptance", Number),
            ("solar_absorptance", Number),
            ("visible_absorptance", Number),
        ],
        EntityKind::MasslessMaterial => &[
            ("name", Text),
            ("roughness", Text),
            ("thermal_resistance", Number),
            ("thermal_absorptance", Number),
            ("solar_absorptance", Number),
            ("visible_absorptance", Number),
        ],
        EntityKind::Construction => &[("name", Text), ("layers", ReferenceList)],
        EntityKind::Zone => &[
            ("name", Text),
            ("direction_of_north", Number),
            ("multiplier", Number),
            ("ceiling_height", Number),
            ("volume", Number),
        ],
        EntityKind::Lights => &[
            ("name", Text),
            ("zone", Reference),
            ("schedule", Reference),
            ("design_level", Number),
            ("fraction_radiant", Number),
            ("fraction_visible", Number),
        ],
        EntityKind::People => &[
            ("name", Text),
            ("zone", Reference),
            ("schedule", Reference),
            ("number_of_people", Number),
            ("fraction_radiant", Number),
        ],
        EntityKind::ElectricEquipment => &[
            ("name", Text),
            ("zone", Reference),
            ("schedule", Reference),
            ("design_level", Number),
            ("fraction_latent", Number),
            ("fraction_radiant", Number),
        ],
        EntityKind::Infiltration => &[
            ("name", Text),
            ("zone", Reference),
            ("schedule", Reference),
            ("design_flow_rate", Number),
            ("constant_coefficient", Number),
        ],
        EntityKind::Chiller => &[
            ("name", Text),
            ("capacity", Number),
            ("cop", Number),
            ("condenser_type", Text),
            ("capacity_curve", Reference),
        ],
        EntityKind::CondenserLoop => &[("name", Text), ("equipment", ReferenceList)],
    }
}

static YES_NO: &[&str] = &["Yes", "No"];
static ROUGHNESS: &[&str] = &[
    "VeryRough",
    "Rough",
    "MediumRough",
    "MediumSmooth",
    "Smooth",
    "VerySmooth",
];
static HUMIDITY_INDICATORS: &[&str] = &["Wetbulb", "Dewpoint", "HumidityRatio", "Enthalpy"];
static DAY_TYPES: &[&str] = &["SummerDesignDay", "WinterDesignDay", "Holiday"];
static INTERPOLATION: &[&str] = &["No", "Average", "Linear"];
static NUMERIC_TYPES: &[&str] = &["Continuous", "Discrete"];
static CONDENSER_TYPES: &[&str] = &["AirCooled", "WaterCooled", "EvaporativelyCooled"];

/// Legal enumerated values, where an attribute is so constrained
fn legal_values(kind: EntityKind, attribute: &str) -> Option<&'static [&'static str]> {
    match (kind, attribute) {
        (EntityKind::SimulationControl, _) => Some(YES_NO),
        (EntityKind::RunPeriod, "use_weather_holidays") => Some(YES_NO),
        (EntityKind::DesignDay, "day_type") => Some(DAY_TYPES),
        (EntityKind::DesignDay, "humidity_indicator") => Some(HUMIDITY_INDICATORS),
        (EntityKind::ScheduleTypeLimits, "numeric_type") => Some(NUMERIC_TYPES),
        (EntityKind::DaySchedule, "interpolate") => Some(INTERPOLATION),
        (EntityKind::StandardMaterial | EntityKind::MasslessMaterial, "roughness") => {
            Some(ROUGHNESS)
        }
        (EntityKind::Chiller, "condenser_type") => Some(CONDENSER_TYPES),
        _ => None,
    }
}

/// Inclusive numeric range, where an attribute is so constrained
fn numeric_range(kind: EntityKind, attribute: &str) -> Option<(f64, f64)> {
    match (kind, attribute) {
        (EntityKind::Site, "latitude") => Some((-90.0, 90.0)),
        (EntityKind::Site, "longitude") => Some((-180.0, 180.0)),
        (EntityKind::Site, "time_zone") => Some((-14.0, 14.0)),
        (EntityKind::Timestep, "steps_per_hour") => Some((1.0, 60.0)),
        (EntityKind::RunPeriod | EntityKind::DesignDay, "begin_month" | "end_month" | "month") => {
            Some((1.0, 12.0))
        }
        (
            EntityKind::RunPeriod | EntityKind::DesignDay,
            "begin_day" | "end_day" | "day_of_month",
        ) => Some((1.0, 31.0)),
        (_, "fraction_radiant" | "fraction_visible" | "fraction_latent") => Some((0.0, 1.0)),
        (
            EntityKind::StandardMaterial | EntityKind::MasslessMaterial,
            "thermal_absorptance" | "solar_absorptance" | "visible_absorptance",
        ) => Some((0.0, 1.0)),
        (EntityKind::Zone, "multiplier") => Some((1.0, f64::INFINITY)),
        (EntityKind::People, "number_of_people") => Some((0.0, f64::INFINITY)),
        (EntityKind::Chiller, "capacity" | "cop") => Some((f64::MIN_POSITIVE, f64::INFINITY)),
        _ => None,
    }
}

fn validate_attribute(kind: EntityKind, attribute: &str, value: &AttributeValue) -> Result<()> {
    let declared = known_attributes(kind)
        .iter()
        .find(|(name, _)| *name == attribute)
        .map(|(_, t)| *t)
        .ok_or_else(|| BridgeError::UnknownAttribute {
            kind: kind.name().to_string(),
            attribute: attribute.to_string(),
        })?;

    let illegal = |value: &AttributeValue| BridgeError::IllegalValue {
        kind: kind.name().to_string(),
        attribute: attribute.to_string(),
        value: format!("{:?}", value),
    };

    if value.attr_type() != declared {
        return Err(illegal(value));
    }
    if let Some(legal) = legal_values(kind, attribute) {
        match value.as_text() {
            Some(text) if legal.contains(&text) => {}
            _ => return Err(illegal(value)),
        }
    }
    if let Some((lo, hi)) = numeric_range(kind, attribute) {
        match value.as_number() {
            Some(n) if n >= lo && n <= hi => {}
            _ => return Err(illegal(value)),
        }
    }
    Ok(())
}

// =============================================================================
// TargetModel
// =============================================================================

/// Owner of all entities in one run's output graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetModel {
    order: Vec<RecordIdentity>,
    entities: HashMap<RecordIdentity, Entity>,
}

impl TargetModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, validating every attribute against the kind's
    /// invariants
    pub fn insert(&mut self, entity: Entity) -> Result<RecordIdentity> {
        for (attribute, value) in entity.attributes() {
            validate_attribute(entity.kind(), attribute, value)?;
        }
        let identity = entity.identity();
        self.order.push(identity);
        self.entities.insert(identity, entity);
        Ok(identity)
    }

    /// Mutate one attribute of an owned entity, enforcing invariants
    pub fn set_attribute(
        &mut self,
        identity: RecordIdentity,
        attribute: &str,
        value: AttributeValue,
    ) -> Result<()> {
        let entity = self
            .entities
            .get_mut(&identity)
            .ok_or_else(|| BridgeError::NoSuchEntity(identity.to_string()))?;
        validate_attribute(entity.kind(), attribute, &value)?;
        entity.set(attribute, value);
        Ok(())
    }

    pub fn get(&self, identity: RecordIdentity) -> Option<&Entity> {
        self.entities.get(&identity)
    }

    /// All entities in insertion order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    pub fn entities_of_kind(&self, kind: EntityKind) -> Vec<&Entity> {
        self.entities().filter(|e| e.kind() == kind).collect()
    }

    /// First entity of a kind with a matching name
    pub fn find_by_name(&self, kind: EntityKind, name: &str) -> Option<&Entity> {
        self.entities()
            .find(|e| e.kind() == kind && e.name() == Some(name))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
