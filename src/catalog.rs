//! Schema catalog
//!
//! Static kind → field-descriptor data consumed by both engines. The catalog
//! declares the schema family and expected version, the ordered field layout
//! for every record kind, which kinds are global singletons, and which class
//! a kind belongs to. Kinds are closed enums so the registered and ignored
//! sets stay enumerable test data rather than code paths.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::version::FamilyVersion;

// =============================================================================
// Kinds
// =============================================================================

/// Discriminator for source-workspace records.
///
/// The production schema family has hundreds of kinds; this is the
/// representative subset the rule set covers, plus the topology kinds the
/// engines deliberately ignore and a few with no rule at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordKind {
    // simulation control
    Version,
    SimulationControl,
    RunPeriod,
    Timestep,
    Site,
    DesignDay,
    // schedules
    ScheduleTypeLimits,
    ScheduleDay,
    ScheduleWeek,
    ScheduleYear,
    ScheduleConstant,
    // resources
    CurveLinear,
    CurveQuadratic,
    CurveBiquadratic,
    MaterialStandard,
    MaterialMassless,
    Construction,
    // loads
    Lights,
    People,
    ElectricEquipment,
    Infiltration,
    // container
    Zone,
    // plant
    Chiller,
    CondenserLoop,
    // synthesized on forward translation only
    EquipmentGroup,
    // equipment topology (out of scope, ignored by the engines)
    Branch,
    BranchList,
    ConnectorList,
    NodeList,
    PipeAdiabatic,
    // reporting (no rule registered, lands in the untranslated set)
    OutputVariable,
    OutputMeter,
    DaylightingControl,
}

/// Coarse grouping of record kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KindClass {
    SimulationControl,
    Schedule,
    Resource,
    Load,
    Container,
    Plant,
    Grouping,
    Topology,
    Reporting,
}

impl RecordKind {
    /// Wire name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            Self::Version => "Version",
            Self::SimulationControl => "SimulationControl",
            Self::RunPeriod => "RunPeriod",
            Self::Timestep => "Timestep",
            Self::Site => "Site",
            Self::DesignDay => "DesignDay",
            Self::ScheduleTypeLimits => "ScheduleTypeLimits",
            Self::ScheduleDay => "Schedule:Day",
            Self::ScheduleWeek => "Schedule:Week",
            Self::ScheduleYear => "Schedule:Year",
            Self::ScheduleConstant => "Schedule:Constant",
            Self::CurveLinear => "Curve:Linear",
            Self::CurveQuadratic => "Curve:Quadratic",
            Self::CurveBiquadratic => "Curve:Biquadratic",
            Self::MaterialStandard => "Material",
            Self::MaterialMassless => "Material:NoMass",
            Self::Construction => "Construction",
            Self::Lights => "Lights",
            Self::People => "People",
            Self::ElectricEquipment => "ElectricEquipment",
            Self::Infiltration => "ZoneInfiltration",
            Self::Zone => "Zone",
            Self::Chiller => "Chiller",
            Self::CondenserLoop => "CondenserLoop",
            Self::EquipmentGroup => "EquipmentGroup",
            Self::Branch => "Branch",
            Self::BranchList => "BranchList",
            Self::ConnectorList => "ConnectorList",
            Self::NodeList => "NodeList",
            Self::PipeAdiabatic => "Pipe:Adiabatic",
            Self::OutputVariable => "Output:Variable",
            Self::OutputMeter => "Output:Meter",
            Self::DaylightingControl => "Daylighting:Controls",
        }
    }

    pub fn class(&self) -> KindClass {
        match self {
            Self::Version
            | Self::SimulationControl
            | Self::RunPeriod
            | Self::Timestep
            | Self::Site
            | Self::DesignDay => KindClass::SimulationControl,
            Self::ScheduleTypeLimits
            | Self::ScheduleDay
            | Self::ScheduleWeek
            | Self::ScheduleYear
            | Self::ScheduleConstant => KindClass::Schedule,
            Self::CurveLinear
            | Self::CurveQuadratic
            | Self::CurveBiquadratic
            | Self::MaterialStandard
            | Self::MaterialMassless
            | Self::Construction => KindClass::Resource,
            Self::Lights | Self::People | Self::ElectricEquipment | Self::Infiltration => {
                KindClass::Load
            }
            Self::Zone => KindClass::Container,
            Self::Chiller | Self::CondenserLoop => KindClass::Plant,
            Self::EquipmentGroup => KindClass::Grouping,
            Self::Branch
            | Self::BranchList
            | Self::ConnectorList
            | Self::NodeList
            | Self::PipeAdiabatic => KindClass::Topology,
            Self::OutputVariable | Self::OutputMeter | Self::DaylightingControl => {
                KindClass::Reporting
            }
        }
    }

    /// Whether at most one record of this kind may exist in a workspace
    pub fn is_global_singleton(&self) -> bool {
        matches!(
            self,
            Self::SimulationControl | Self::RunPeriod | Self::Timestep | Self::Site
        )
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Discriminator for target-model entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Site,
    SimulationControl,
    RunPeriod,
    Timestep,
    DesignDay,
    ScheduleTypeLimits,
    DaySchedule,
    WeekSchedule,
    YearSchedule,
    ConstantSchedule,
    LinearCurve,
    QuadraticCurve,
    BiquadraticCurve,
    StandardMaterial,
    MasslessMaterial,
    Construction,
    Zone,
    Lights,
    People,
    ElectricEquipment,
    Infiltration,
    Chiller,
    CondenserLoop,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Site => "Site",
            Self::SimulationControl => "SimulationControl",
            Self::RunPeriod => "RunPeriod",
            Self::Timestep => "Timestep",
            Self::DesignDay => "DesignDay",
            Self::ScheduleTypeLimits => "ScheduleTypeLimits",
            Self::DaySchedule => "DaySchedule",
            Self::WeekSchedule => "WeekSchedule",
            Self::YearSchedule => "YearSchedule",
            Self::ConstantSchedule => "ConstantSchedule",
            Self::LinearCurve => "LinearCurve",
            Self::QuadraticCurve => "QuadraticCurve",
            Self::BiquadraticCurve => "BiquadraticCurve",
            Self::StandardMaterial => "StandardMaterial",
            Self::MasslessMaterial => "MasslessMaterial",
            Self::Construction => "Construction",
            Self::Zone => "Zone",
            Self::Lights => "Lights",
            Self::People => "People",
            Self::ElectricEquipment => "ElectricEquipment",
            Self::Infiltration => "Infiltration",
            Self::Chiller => "Chiller",
            Self::CondenserLoop => "CondenserLoop",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// Field descriptors
// =============================================================================

/// Declared type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    Number,
    Reference,
}

/// How strongly a field is expected to be present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requirement {
    /// Absence is a per-record Error
    Required,
    /// Absence is a Warning; the schema default applies
    Recommended,
    /// Absence is silent
    Optional,
}

/// Ordered descriptor for one record field
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub requirement: Requirement,
    pub default_number: Option<f64>,
    pub default_text: Option<&'static str>,
}

impl FieldSpec {
    const fn text(name: &'static str, requirement: Requirement) -> Self {
        Self {
            name,
            field_type: FieldType::Text,
            requirement,
            default_number: None,
            default_text: None,
        }
    }

    const fn text_with_default(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::Text,
            requirement: Requirement::Recommended,
            default_number: None,
            default_text: Some(default),
        }
    }

    const fn number(name: &'static str, requirement: Requirement) -> Self {
        Self {
            name,
            field_type: FieldType::Number,
            requirement,
            default_number: None,
            default_text: None,
        }
    }

    const fn number_with_default(name: &'static str, default: f64) -> Self {
        Self {
            name,
            field_type: FieldType::Number,
            requirement: Requirement::Recommended,
            default_number: Some(default),
            default_text: None,
        }
    }

    const fn reference(name: &'static str, requirement: Requirement) -> Self {
        Self {
            name,
            field_type: FieldType::Reference,
            requirement,
            default_number: None,
            default_text: None,
        }
    }
}

// =============================================================================
// Field index constants
// =============================================================================

/// Per-kind field indices into `Record::fields`, matching the ordered
/// descriptor lists below. Rules index records through these, never through
/// bare integers.
pub mod fields {
    pub mod version {
        pub const IDENTIFIER: usize = 0;
    }

    pub mod site {
        pub const NAME: usize = 0;
        pub const LATITUDE: usize = 1;
        pub const LONGITUDE: usize = 2;
        pub const TIME_ZONE: usize = 3;
        pub const ELEVATION: usize = 4;
        pub const NORTH_AXIS_DEGREES: usize = 5;
    }

    pub mod simulation_control {
        pub const DO_ZONE_SIZING: usize = 0;
        pub const DO_SYSTEM_SIZING: usize = 1;
        pub const DO_PLANT_SIZING: usize = 2;
        pub const RUN_FOR_SIZING_PERIODS: usize = 3;
        pub const RUN_FOR_WEATHER_PERIODS: usize = 4;
    }

    pub mod run_period {
        pub const NAME: usize = 0;
        pub const BEGIN_MONTH: usize = 1;
        pub const BEGIN_DAY: usize = 2;
        pub const END_MONTH: usize = 3;
        pub const END_DAY: usize = 4;
        pub const USE_WEATHER_HOLIDAYS: usize = 5;
    }

    pub mod timestep {
        pub const STEPS_PER_HOUR: usize = 0;
    }

    pub mod design_day {
        pub const NAME: usize = 0;
        pub const MONTH: usize = 1;
        pub const DAY_OF_MONTH: usize = 2;
        pub const DAY_TYPE: usize = 3;
        pub const MAX_DRY_BULB: usize = 4;
        pub const DAILY_RANGE: usize = 5;
        pub const HUMIDITY_INDICATOR_TYPE: usize = 6;
        pub const HUMIDITY_INDICATOR_VALUE: usize = 7;
        pub const STATION_PRESSURE_KPA: usize = 8;
        pub const WIND_SPEED: usize = 9;
        pub const WIND_DIRECTION: usize = 10;
    }

    pub mod schedule_type_limits {
        pub const NAME: usize = 0;
        pub const LOWER_LIMIT: usize = 1;
        pub const UPPER_LIMIT: usize = 2;
        pub const NUMERIC_TYPE: usize = 3;
    }

    pub mod schedule_day {
        pub const NAME: usize = 0;
        pub const TYPE_LIMITS: usize = 1;
        pub const INTERPOLATE: usize = 2;
        /// Repeating (until-hour, value) number pairs start here
        pub const VALUES_START: usize = 3;
    }

    pub mod schedule_week {
        pub const NAME: usize = 0;
        pub const WEEKDAY_SCHEDULE: usize = 1;
        pub const WEEKEND_SCHEDULE: usize = 2;
    }

    pub mod schedule_year {
        pub const NAME: usize = 0;
        pub const TYPE_LIMITS: usize = 1;
        pub const WEEK_SCHEDULE: usize = 2;
    }

    pub mod schedule_constant {
        pub const NAME: usize = 0;
        pub const TYPE_LIMITS: usize = 1;
        pub const VALUE: usize = 2;
    }

    pub mod curve_linear {
        pub const NAME: usize = 0;
        pub const COEFFICIENT1: usize = 1;
        pub const COEFFICIENT2: usize = 2;
        pub const MIN_X: usize = 3;
        pub const MAX_X: usize = 4;
    }

    pub mod curve_quadratic {
        pub const NAME: usize = 0;
        pub const COEFFICIENT1: usize = 1;
        pub const COEFFICIENT2: usize = 2;
        pub const COEFFICIENT3: usize = 3;
        pub const MIN_X: usize = 4;
        pub const MAX_X: usize = 5;
    }

    pub mod curve_biquadratic {
        pub const NAME: usize = 0;
        pub const COEFFICIENT1: usize = 1;
        pub const COEFFICIENT2: usize = 2;
        pub const COEFFICIENT3: usize = 3;
        pub const COEFFICIENT4: usize = 4;
        pub const COEFFICIENT5: usize = 5;
        pub const COEFFICIENT6: usize = 6;
        pub const MIN_X: usize = 7;
        pub const MAX_X: usize = 8;
        pub const MIN_Y: usize = 9;
        pub const MAX_Y: usize = 10;
    }

    pub mod material_standard {
        pub const NAME: usize = 0;
        pub const ROUGHNESS: usize = 1;
        pub const THICKNESS: usize = 2;
        pub const CONDUCTIVITY: usize = 3;
        pub const DENSITY: usize = 4;
        pub const SPECIFIC_HEAT: usize = 5;
        pub const THERMAL_ABSORPTANCE: usize = 6;
        pub const SOLAR_ABSORPTANCE: usize = 7;
        pub const VISIBLE_ABSORPTANCE: usize = 8;
    }

    pub mod material_massless {
        pub const NAME: usize = 0;
        pub const ROUGHNESS: usize = 1;
        pub const THERMAL_RESISTANCE: usize = 2;
        pub const THERMAL_ABSORPTANCE: usize = 3;
        pub const SOLAR_ABSORPTANCE: usize = 4;
        pub const VISIBLE_ABSORPTANCE: usize = 5;
    }

    pub mod construction {
        pub const NAME: usize = 0;
        /// Repeating layer references start here, outside inward
        pub const LAYERS_START: usize = 1;
    }

    pub mod zone {
        pub const NAME: usize = 0;
        pub const DIRECTION_OF_NORTH: usize = 1;
        pub const MULTIPLIER: usize = 2;
        pub const CEILING_HEIGHT: usize = 3;
        pub const VOLUME: usize = 4;
        pub const EQUIPMENT_GROUP: usize = 5;
    }

    pub mod lights {
        pub const NAME: usize = 0;
        pub const ZONE: usize = 1;
        pub const SCHEDULE: usize = 2;
        pub const DESIGN_LEVEL: usize = 3;
        pub const FRACTION_RADIANT: usize = 4;
        pub const FRACTION_VISIBLE: usize = 5;
    }

    pub mod people {
        pub const NAME: usize = 0;
        pub const ZONE: usize = 1;
        pub const SCHEDULE: usize = 2;
        pub const NUMBER_OF_PEOPLE: usize = 3;
        pub const FRACTION_RADIANT: usize = 4;
    }

    pub mod electric_equipment {
        pub const NAME: usize = 0;
        pub const ZONE: usize = 1;
        pub const SCHEDULE: usize = 2;
        pub const DESIGN_LEVEL: usize = 3;
        pub const FRACTION_LATENT: usize = 4;
        pub const FRACTION_RADIANT: usize = 5;
    }

    pub mod infiltration {
        pub const NAME: usize = 0;
        pub const ZONE: usize = 1;
        pub const SCHEDULE: usize = 2;
        pub const DESIGN_FLOW_RATE: usize = 3;
        pub const CONSTANT_COEFFICIENT: usize = 4;
    }

    pub mod chiller {
        pub const NAME: usize = 0;
        pub const CAPACITY: usize = 1;
        pub const COP: usize = 2;
        pub const CONDENSER_TYPE: usize = 3;
        pub const CAPACITY_CURVE: usize = 4;
    }

    pub mod condenser_loop {
        pub const NAME: usize = 0;
        /// Repeating equipment references start here
        pub const EQUIPMENT_START: usize = 1;
    }

    pub mod equipment_group {
        pub const NAME: usize = 0;
        /// Repeating member names start here
        pub const MEMBERS_START: usize = 1;
    }
}

// =============================================================================
// Catalog
// =============================================================================

use Requirement::{Optional, Recommended, Required};

static VERSION_FIELDS: &[FieldSpec] = &[FieldSpec::text("Version Identifier", Required)];

static SITE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::number_with_default("Latitude", 0.0),
    FieldSpec::number_with_default("Longitude", 0.0),
    FieldSpec::number_with_default("Time Zone", 0.0),
    FieldSpec::number_with_default("Elevation", 0.0),
    FieldSpec::number_with_default("North Axis", 0.0),
];

static SIMULATION_CONTROL_FIELDS: &[FieldSpec] = &[
    FieldSpec::text_with_default("Do Zone Sizing Calculation", "No"),
    FieldSpec::text_with_default("Do System Sizing Calculation", "No"),
    FieldSpec::text_with_default("Do Plant Sizing Calculation", "No"),
    FieldSpec::text_with_default("Run Simulation for Sizing Periods", "Yes"),
    FieldSpec::text_with_default("Run Simulation for Weather File Run Periods", "Yes"),
];

static RUN_PERIOD_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::number("Begin Month", Required),
    FieldSpec::number("Begin Day of Month", Required),
    FieldSpec::number("End Month", Required),
    FieldSpec::number("End Day of Month", Required),
    FieldSpec::text_with_default("Use Weather File Holidays", "Yes"),
];

static TIMESTEP_FIELDS: &[FieldSpec] = &[FieldSpec::number_with_default("Steps per Hour", 6.0)];

static DESIGN_DAY_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::number("Month", Required),
    FieldSpec::number("Day of Month", Required),
    FieldSpec::text_with_default("Day Type", "SummerDesignDay"),
    FieldSpec::number("Maximum Dry-Bulb Temperature", Required),
    FieldSpec::number_with_default("Daily Dry-Bulb Temperature Range", 0.0),
    FieldSpec::text_with_default("Humidity Indicator Type", "Wetbulb"),
    FieldSpec::number("Humidity Indicator Value", Required),
    FieldSpec::number_with_default("Station Pressure", 101.325),
    FieldSpec::number_with_default("Wind Speed", 0.0),
    FieldSpec::number_with_default("Wind Direction", 0.0),
];

static SCHEDULE_TYPE_LIMITS_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::number("Lower Limit Value", Optional),
    FieldSpec::number("Upper Limit Value", Optional),
    FieldSpec::text_with_default("Numeric Type", "Continuous"),
];

static SCHEDULE_DAY_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::reference("Schedule Type Limits", Optional),
    FieldSpec::text_with_default("Interpolate to Timestep", "No"),
    // repeating (until-hour, value) pairs follow
];

static SCHEDULE_WEEK_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::reference("Weekday Schedule", Required),
    FieldSpec::reference("Weekend Schedule", Recommended),
];

static SCHEDULE_YEAR_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::reference("Schedule Type Limits", Optional),
    FieldSpec::reference("Week Schedule", Required),
];

static SCHEDULE_CONSTANT_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::reference("Schedule Type Limits", Optional),
    FieldSpec::number_with_default("Hourly Value", 0.0),
];

static CURVE_LINEAR_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::number("Coefficient1 Constant", Required),
    FieldSpec::number("Coefficient2 x", Required),
    FieldSpec::number_with_default("Minimum Value of x", 0.0),
    FieldSpec::number_with_default("Maximum Value of x", 1.0),
];

static CURVE_QUADRATIC_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::number("Coefficient1 Constant", Required),
    FieldSpec::number("Coefficient2 x", Required),
    FieldSpec::number("Coefficient3 x**2", Required),
    FieldSpec::number_with_default("Minimum Value of x", 0.0),
    FieldSpec::number_with_default("Maximum Value of x", 1.0),
];

static CURVE_BIQUADRATIC_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::number("Coefficient1 Constant", Required),
    FieldSpec::number("Coefficient2 x", Required),
    FieldSpec::number("Coefficient3 x**2", Required),
    FieldSpec::number("Coefficient4 y", Required),
    FieldSpec::number("Coefficient5 y**2", Required),
    FieldSpec::number("Coefficient6 x*y", Required),
    FieldSpec::number_with_default("Minimum Value of x", 0.0),
    FieldSpec::number_with_default("Maximum Value of x", 1.0),
    FieldSpec::number_with_default("Minimum Value of y", 0.0),
    FieldSpec::number_with_default("Maximum Value of y", 1.0),
];

static MATERIAL_STANDARD_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::text_with_default("Roughness", "MediumRough"),
    FieldSpec::number("Thickness", Required),
    FieldSpec::number("Conductivity", Required),
    FieldSpec::number("Density", Required),
    FieldSpec::number("Specific Heat", Required),
    FieldSpec::number_with_default("Thermal Absorptance", 0.9),
    FieldSpec::number_with_default("Solar Absorptance", 0.7),
    FieldSpec::number_with_default("Visible Absorptance", 0.7),
];

static MATERIAL_MASSLESS_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::text_with_default("Roughness", "MediumRough"),
    FieldSpec::number("Thermal Resistance", Required),
    FieldSpec::number_with_default("Thermal Absorptance", 0.9),
    FieldSpec::number_with_default("Solar Absorptance", 0.7),
    FieldSpec::number_with_default("Visible Absorptance", 0.7),
];

static CONSTRUCTION_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    // repeating layer references follow
];

static ZONE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::number("Direction of Relative North", Optional),
    FieldSpec::number_with_default("Multiplier", 1.0),
    FieldSpec::number("Ceiling Height", Optional),
    FieldSpec::number("Volume", Optional),
    FieldSpec::reference("Equipment Group", Optional),
];

static LIGHTS_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::reference("Zone Name", Required),
    FieldSpec::reference("Schedule Name", Recommended),
    FieldSpec::number("Lighting Level", Required),
    FieldSpec::number_with_default("Fraction Radiant", 0.37),
    FieldSpec::number_with_default("Fraction Visible", 0.18),
];

static PEOPLE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::reference("Zone Name", Required),
    FieldSpec::reference("Number of People Schedule Name", Recommended),
    FieldSpec::number("Number of People", Required),
    FieldSpec::number_with_default("Fraction Radiant", 0.3),
];

static ELECTRIC_EQUIPMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::reference("Zone Name", Required),
    FieldSpec::reference("Schedule Name", Recommended),
    FieldSpec::number("Design Level", Required),
    FieldSpec::number_with_default("Fraction Latent", 0.0),
    FieldSpec::number_with_default("Fraction Radiant", 0.0),
];

static INFILTRATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::reference("Zone Name", Required),
    FieldSpec::reference("Schedule Name", Recommended),
    FieldSpec::number("Design Flow Rate", Required),
    FieldSpec::number_with_default("Constant Term Coefficient", 1.0),
];

static CHILLER_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::number("Reference Capacity", Required),
    FieldSpec::number_with_default("Reference COP", 3.0),
    FieldSpec::text_with_default("Condenser Type", "AirCooled"),
    FieldSpec::reference("Capacity Curve", Optional),
];

static CONDENSER_LOOP_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    // repeating equipment references follow
];

static EQUIPMENT_GROUP_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    // repeating member names follow
];

static NAME_ONLY_FIELDS: &[FieldSpec] = &[FieldSpec::text("Name", Required)];

static OUTPUT_VARIABLE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Key Value", Optional),
    FieldSpec::text("Variable Name", Required),
    FieldSpec::text_with_default("Reporting Frequency", "Hourly"),
];

static DAYLIGHTING_CONTROL_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("Name", Required),
    FieldSpec::reference("Zone Name", Required),
];

/// The schema catalog: family identity plus per-kind field layouts.
///
/// Supplied as static data; the engines never mutate it.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    family: &'static str,
    expected_version: FamilyVersion,
}

impl SchemaCatalog {
    /// The catalog for the energy-workspace schema family
    pub fn energy() -> Self {
        Self {
            family: "energy.workspace",
            expected_version: FamilyVersion::new(9, 4),
        }
    }

    /// Declared schema family
    pub fn family(&self) -> &'static str {
        self.family
    }

    /// Version the engines were built against
    pub fn expected_version(&self) -> FamilyVersion {
        self.expected_version
    }

    /// Ordered field descriptors for a kind. Kinds with repeating field
    /// groups describe only the fixed head; the tail repeats.
    pub fn fields_of(&self, kind: RecordKind) -> &'static [FieldSpec] {
        match kind {
            RecordKind::Version => VERSION_FIELDS,
            RecordKind::Site => SITE_FIELDS,
            RecordKind::SimulationControl => SIMULATION_CONTROL_FIELDS,
            RecordKind::RunPeriod => RUN_PERIOD_FIELDS,
            RecordKind::Timestep => TIMESTEP_FIELDS,
            RecordKind::DesignDay => DESIGN_DAY_FIELDS,
            RecordKind::ScheduleTypeLimits => SCHEDULE_TYPE_LIMITS_FIELDS,
            RecordKind::ScheduleDay => SCHEDULE_DAY_FIELDS,
            RecordKind::ScheduleWeek => SCHEDULE_WEEK_FIELDS,
            RecordKind::ScheduleYear => SCHEDULE_YEAR_FIELDS,
            RecordKind::ScheduleConstant => SCHEDULE_CONSTANT_FIELDS,
            RecordKind::CurveLinear => CURVE_LINEAR_FIELDS,
            RecordKind::CurveQuadratic => CURVE_QUADRATIC_FIELDS,
            RecordKind::CurveBiquadratic => CURVE_BIQUADRATIC_FIELDS,
            RecordKind::MaterialStandard => MATERIAL_STANDARD_FIELDS,
            RecordKind::MaterialMassless => MATERIAL_MASSLESS_FIELDS,
            RecordKind::Construction => CONSTRUCTION_FIELDS,
            RecordKind::Lights => LIGHTS_FIELDS,
            RecordKind::People => PEOPLE_FIELDS,
            RecordKind::ElectricEquipment => ELECTRIC_EQUIPMENT_FIELDS,
            RecordKind::Infiltration => INFILTRATION_FIELDS,
            RecordKind::Zone => ZONE_FIELDS,
            RecordKind::Chiller => CHILLER_FIELDS,
            RecordKind::CondenserLoop => CONDENSER_LOOP_FIELDS,
            RecordKind::EquipmentGroup => EQUIPMENT_GROUP_FIELDS,
            RecordKind::Branch
            | RecordKind::BranchList
            | RecordKind::ConnectorList
            | RecordKind::NodeList
            | RecordKind::PipeAdiabatic
            | RecordKind::OutputMeter => NAME_ONLY_FIELDS,
            RecordKind::OutputVariable => OUTPUT_VARIABLE_FIELDS,
            RecordKind::DaylightingControl => DAYLIGHTING_CONTROL_FIELDS,
        }
    }

    /// Schema default for a field, as a loose field value
    pub fn default_of(&self, kind: RecordKind, index: usize) -> Option<crate::record::FieldValue> {
        let spec = self.fields_of(kind).get(index)?;
        if let Some(n) = spec.default_number {
            return Some(crate::record::FieldValue::Number(n));
        }
        spec.default_text
            .map(|t| crate::record::FieldValue::Text(t.to_string()))
    }
}

impl Default for SchemaCatalog {
    fn default() -> Self {
        Self::energy()
    }
}
