//! Per-kind reverse translation rules
//!
//! One record in, at most one registered entity out. Rules assume nothing
//! about visitation order; referenced records are pulled in through
//! [`ReverseRun::resolve`]. Unit conversions and enumerated-value remaps
//! (including legacy aliases) are explicit per-rule tables, never generic
//! pass-through.

use std::collections::{HashMap, HashSet};

use crate::catalog::{fields, EntityKind, RecordKind};
use crate::entity::{AttributeValue, Entity};
use crate::identity::RecordIdentity;
use crate::record::Record;

use super::ReverseRun;

/// A reverse rule: translate one record, register the product, return its
/// entity identity
pub type ReverseRule = for<'a> fn(&'a Record, &mut ReverseRun<'a, '_>) -> Option<RecordIdentity>;

// =============================================================================
// Rule table
// =============================================================================

/// Closed dispatch table: which kinds have a rule and which are deliberately
/// ignored. Built once; both sets are enumerable test data.
pub struct RuleSet {
    rules: HashMap<RecordKind, ReverseRule>,
    ignored: HashSet<RecordKind>,
}

impl RuleSet {
    /// The standard rule set: load, schedule, resource, simulation-control
    /// and plant kinds are in scope; equipment-topology kinds are not.
    pub fn standard() -> Self {
        let mut rules: HashMap<RecordKind, ReverseRule> = HashMap::new();
        rules.insert(RecordKind::Site, translate_site as ReverseRule);
        rules.insert(RecordKind::SimulationControl, translate_simulation_control);
        rules.insert(RecordKind::RunPeriod, translate_run_period);
        rules.insert(RecordKind::Timestep, translate_timestep);
        rules.insert(RecordKind::DesignDay, translate_design_day);
        rules.insert(RecordKind::ScheduleTypeLimits, translate_schedule_type_limits);
        rules.insert(RecordKind::ScheduleDay, translate_schedule_day);
        rules.insert(RecordKind::ScheduleWeek, translate_schedule_week);
        rules.insert(RecordKind::ScheduleYear, translate_schedule_year);
        rules.insert(RecordKind::ScheduleConstant, translate_schedule_constant);
        rules.insert(RecordKind::CurveLinear, translate_curve_linear);
        rules.insert(RecordKind::CurveQuadratic, translate_curve_quadratic);
        rules.insert(RecordKind::CurveBiquadratic, translate_curve_biquadratic);
        rules.insert(RecordKind::MaterialStandard, translate_material_standard);
        rules.insert(RecordKind::MaterialMassless, translate_material_massless);
        rules.insert(RecordKind::Construction, translate_construction);
        rules.insert(RecordKind::Zone, translate_zone);
        rules.insert(RecordKind::Lights, translate_lights);
        rules.insert(RecordKind::People, translate_people);
        rules.insert(RecordKind::ElectricEquipment, translate_electric_equipment);
        rules.insert(RecordKind::Infiltration, translate_infiltration);
        rules.insert(RecordKind::Chiller, translate_chiller);
        rules.insert(RecordKind::CondenserLoop, translate_condenser_loop);

        let ignored = HashSet::from([
            RecordKind::Version, // consumed by the version gate, not a rule
            RecordKind::EquipmentGroup, // synthesized grouping, no target counterpart
            RecordKind::Branch,
            RecordKind::BranchList,
            RecordKind::ConnectorList,
            RecordKind::NodeList,
            RecordKind::PipeAdiabatic,
        ]);

        Self { rules, ignored }
    }

    pub(crate) fn rule_for(&self, kind: RecordKind) -> Option<ReverseRule> {
        self.rules.get(&kind).copied()
    }

    pub fn is_ignored(&self, kind: RecordKind) -> bool {
        self.ignored.contains(&kind)
    }

    /// Kinds with a registered rule, sorted
    pub fn registered_kinds(&self) -> Vec<RecordKind> {
        let mut kinds: Vec<RecordKind> = self.rules.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Kinds deliberately left untranslated, sorted
    pub fn ignored_kinds(&self) -> Vec<RecordKind> {
        let mut kinds: Vec<RecordKind> = self.ignored.iter().copied().collect();
        kinds.sort();
        kinds
    }
}

// =============================================================================
// Conversion and remap tables
// =============================================================================

pub(crate) const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
pub(crate) const KPA_TO_PA: f64 = 1000.0;

/// Legacy humidity-indicator spellings still found in old documents
const HUMIDITY_INDICATOR_ALIASES: &[(&str, &str)] = &[
    ("Wet-Bulb", "Wetbulb"),
    ("WetBulb", "Wetbulb"),
    ("Dew-Point", "Dewpoint"),
    ("DewPoint", "Dewpoint"),
];

/// Legacy roughness spellings
const ROUGHNESS_ALIASES: &[(&str, &str)] = &[
    ("Medium", "MediumRough"),
    ("MedRough", "MediumRough"),
    ("MedSmooth", "MediumSmooth"),
];

/// Old documents wrote boolean flags as True/False
const FLAG_ALIASES: &[(&str, &str)] = &[("True", "Yes"), ("False", "No")];

/// Interpolation used to be a bare yes/no; "Yes" now means averaging
const INTERPOLATE_ALIASES: &[(&str, &str)] = &[("Yes", "Average")];

/// Legacy condenser-type spellings
const CONDENSER_ALIASES: &[(&str, &str)] = &[
    ("Air-Cooled", "AirCooled"),
    ("Water-Cooled", "WaterCooled"),
];

fn remap(aliases: &[(&str, &str)], value: &str) -> String {
    for (old, new) in aliases {
        if value.eq_ignore_ascii_case(old) {
            return (*new).to_string();
        }
    }
    value.to_string()
}

fn num(n: f64) -> AttributeValue {
    AttributeValue::Number(n)
}

// =============================================================================
// Simulation-control kinds
// =============================================================================

fn translate_site<'a>(record: &'a Record, run: &mut ReverseRun<'a, '_>) -> Option<RecordIdentity> {
    use fields::site as f;
    let name = run.required_text(record, f::NAME)?;
    let entity = Entity::new(EntityKind::Site)
        .with_text("name", name)
        .with("latitude", num(run.recommended_number(record, f::LATITUDE)))
        .with("longitude", num(run.recommended_number(record, f::LONGITUDE)))
        .with("time_zone", num(run.recommended_number(record, f::TIME_ZONE)))
        .with("elevation", num(run.recommended_number(record, f::ELEVATION)))
        .with(
            "north_axis_radians",
            num(record.number(f::NORTH_AXIS_DEGREES).unwrap_or(0.0) * DEG_TO_RAD),
        );
    run.register(record, entity)
}

fn translate_simulation_control<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::simulation_control as f;
    let mut entity = Entity::new(EntityKind::SimulationControl);
    for (index, attribute) in [
        (f::DO_ZONE_SIZING, "do_zone_sizing"),
        (f::DO_SYSTEM_SIZING, "do_system_sizing"),
        (f::DO_PLANT_SIZING, "do_plant_sizing"),
        (f::RUN_FOR_SIZING_PERIODS, "run_for_sizing_periods"),
        (f::RUN_FOR_WEATHER_PERIODS, "run_for_weather_periods"),
    ] {
        let flag = remap(FLAG_ALIASES, &run.recommended_text(record, index));
        entity.set(attribute, AttributeValue::Text(flag));
    }
    run.register(record, entity)
}

fn translate_run_period<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::run_period as f;
    let name = run.required_text(record, f::NAME)?;
    // A run period without its date window is useless; bail rather than
    // produce a partial entity.
    let begin_month = run.required_number(record, f::BEGIN_MONTH)?;
    let begin_day = run.required_number(record, f::BEGIN_DAY)?;
    let end_month = run.required_number(record, f::END_MONTH)?;
    let end_day = run.required_number(record, f::END_DAY)?;
    let holidays = remap(
        FLAG_ALIASES,
        &run.recommended_text(record, f::USE_WEATHER_HOLIDAYS),
    );
    let entity = Entity::new(EntityKind::RunPeriod)
        .with_text("name", name)
        .with("begin_month", num(begin_month))
        .with("begin_day", num(begin_day))
        .with("end_month", num(end_month))
        .with("end_day", num(end_day))
        .with_text("use_weather_holidays", holidays);
    run.register(record, entity)
}

fn translate_timestep<'a>(record: &'a Record, run: &mut ReverseRun<'a, '_>) -> Option<RecordIdentity> {
    let steps = run.recommended_number(record, fields::timestep::STEPS_PER_HOUR);
    let entity = Entity::new(EntityKind::Timestep).with("steps_per_hour", num(steps));
    run.register(record, entity)
}

fn translate_design_day<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::design_day as f;
    let name = run.required_text(record, f::NAME)?;
    let mut entity = Entity::new(EntityKind::DesignDay)
        .with_text("name", name)
        .with_text(
            "day_type",
            run.recommended_text(record, f::DAY_TYPE),
        )
        .with("daily_range", num(run.recommended_number(record, f::DAILY_RANGE)))
        .with(
            "station_pressure_pa",
            num(run.recommended_number(record, f::STATION_PRESSURE_KPA) * KPA_TO_PA),
        )
        .with("wind_speed", num(run.recommended_number(record, f::WIND_SPEED)))
        .with("wind_direction", num(run.recommended_number(record, f::WIND_DIRECTION)));

    if let Some(month) = run.required_number(record, f::MONTH) {
        entity.set("month", num(month));
    }
    if let Some(day) = run.required_number(record, f::DAY_OF_MONTH) {
        entity.set("day_of_month", num(day));
    }
    if let Some(max_drybulb) = run.required_number(record, f::MAX_DRY_BULB) {
        entity.set("max_drybulb", num(max_drybulb));
    }

    // The indicator gates where the humidity value lands; exactly one of the
    // four target attributes ends up populated.
    let indicator = remap(
        HUMIDITY_INDICATOR_ALIASES,
        &run.recommended_text(record, f::HUMIDITY_INDICATOR_TYPE),
    );
    entity.set("humidity_indicator", AttributeValue::Text(indicator.clone()));
    match run.required_number(record, f::HUMIDITY_INDICATOR_VALUE) {
        Some(value) => {
            let attribute = match indicator.as_str() {
                "Dewpoint" => "dewpoint_at_max_drybulb",
                "HumidityRatio" => "humidity_ratio_at_max_drybulb",
                "Enthalpy" => "enthalpy_at_max_drybulb",
                _ => "wetbulb_at_max_drybulb",
            };
            entity.set(attribute, num(value));
        }
        // Partial entity: the dry-bulb envelope is still usable
        None => {}
    }
    run.register(record, entity)
}

// =============================================================================
// Schedule kinds
// =============================================================================

fn translate_schedule_type_limits<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::schedule_type_limits as f;
    let name = run.required_text(record, f::NAME)?;
    let mut entity = Entity::new(EntityKind::ScheduleTypeLimits)
        .with_text("name", name)
        .with_text("numeric_type", run.recommended_text(record, f::NUMERIC_TYPE));
    if let Some(lower) = record.number(f::LOWER_LIMIT) {
        entity.set("lower_limit", num(lower));
    }
    if let Some(upper) = record.number(f::UPPER_LIMIT) {
        entity.set("upper_limit", num(upper));
    }
    run.register(record, entity)
}

fn translate_schedule_day<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::schedule_day as f;
    let name = run.required_text(record, f::NAME)?;
    let interpolate = remap(
        INTERPOLATE_ALIASES,
        &run.recommended_text(record, f::INTERPOLATE),
    );
    let mut entity = Entity::new(EntityKind::DaySchedule)
        .with_text("name", name.clone())
        .with_text("interpolate", interpolate);

    if let Some(limits) = record.reference(f::TYPE_LIMITS) {
        if let Some(limits_entity) = run.resolve(limits) {
            entity.set("type_limits", AttributeValue::Reference(limits_entity));
        }
    }

    // Repeating (until-hour, value) pairs
    let mut until_hours = Vec::new();
    let mut values = Vec::new();
    let mut index = f::VALUES_START;
    while index < record.num_fields() {
        match (record.number(index), record.number(index + 1)) {
            (Some(until), Some(value)) => {
                until_hours.push(until);
                values.push(value);
            }
            _ => {
                run.error(format!(
                    "Schedule:Day record '{}' has a malformed value pair at field {}",
                    name, index
                ));
            }
        }
        index += 2;
    }
    entity.set("until_hours", AttributeValue::NumberList(until_hours));
    entity.set("values", AttributeValue::NumberList(values));
    run.register(record, entity)
}

fn translate_schedule_week<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::schedule_week as f;
    let name = run.required_text(record, f::NAME)?;
    let weekday_record = run.required_reference(record, f::WEEKDAY_SCHEDULE)?;
    let weekday = run.resolve(weekday_record)?;
    // Weekend defaults to the weekday schedule when unspecified
    let weekend = match record.reference(f::WEEKEND_SCHEDULE) {
        Some(reference) => run.resolve(reference).unwrap_or(weekday),
        None => {
            run.warning(format!(
                "Schedule:Week record '{}' has no weekend schedule; reusing the weekday one",
                name
            ));
            weekday
        }
    };
    let entity = Entity::new(EntityKind::WeekSchedule)
        .with_text("name", name)
        .with_reference("weekday_schedule", weekday)
        .with_reference("weekend_schedule", weekend);
    run.register(record, entity)
}

fn translate_schedule_year<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::schedule_year as f;
    let name = run.required_text(record, f::NAME)?;
    let week_record = run.required_reference(record, f::WEEK_SCHEDULE)?;
    let week = run.resolve(week_record)?;
    let mut entity = Entity::new(EntityKind::YearSchedule)
        .with_text("name", name)
        .with_reference("week_schedule", week);
    if let Some(limits) = record.reference(f::TYPE_LIMITS) {
        if let Some(limits_entity) = run.resolve(limits) {
            entity.set("type_limits", AttributeValue::Reference(limits_entity));
        }
    }
    run.register(record, entity)
}

fn translate_schedule_constant<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::schedule_constant as f;
    let name = run.required_text(record, f::NAME)?;
    let mut entity = Entity::new(EntityKind::ConstantSchedule)
        .with_text("name", name)
        .with("value", num(run.recommended_number(record, f::VALUE)));
    if let Some(limits) = record.reference(f::TYPE_LIMITS) {
        if let Some(limits_entity) = run.resolve(limits) {
            entity.set("type_limits", AttributeValue::Reference(limits_entity));
        }
    }
    run.register(record, entity)
}

// =============================================================================
// Resource kinds
// =============================================================================

fn translate_curve_linear<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::curve_linear as f;
    let name = run.required_text(record, f::NAME)?;
    // A curve without coefficients is meaningless; no partial entity
    let c1 = run.required_number(record, f::COEFFICIENT1)?;
    let c2 = run.required_number(record, f::COEFFICIENT2)?;
    let entity = Entity::new(EntityKind::LinearCurve)
        .with_text("name", name)
        .with("coefficient1", num(c1))
        .with("coefficient2", num(c2))
        .with("min_x", num(run.recommended_number(record, f::MIN_X)))
        .with("max_x", num(run.recommended_number(record, f::MAX_X)));
    run.register(record, entity)
}

fn translate_curve_quadratic<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::curve_quadratic as f;
    let name = run.required_text(record, f::NAME)?;
    let c1 = run.required_number(record, f::COEFFICIENT1)?;
    let c2 = run.required_number(record, f::COEFFICIENT2)?;
    let c3 = run.required_number(record, f::COEFFICIENT3)?;
    let entity = Entity::new(EntityKind::QuadraticCurve)
        .with_text("name", name)
        .with("coefficient1", num(c1))
        .with("coefficient2", num(c2))
        .with("coefficient3", num(c3))
        .with("min_x", num(run.recommended_number(record, f::MIN_X)))
        .with("max_x", num(run.recommended_number(record, f::MAX_X)));
    run.register(record, entity)
}

fn translate_curve_biquadratic<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::curve_biquadratic as f;
    let name = run.required_text(record, f::NAME)?;
    let mut entity = Entity::new(EntityKind::BiquadraticCurve).with_text("name", name);
    for (index, attribute) in [
        (f::COEFFICIENT1, "coefficient1"),
        (f::COEFFICIENT2, "coefficient2"),
        (f::COEFFICIENT3, "coefficient3"),
        (f::COEFFICIENT4, "coefficient4"),
        (f::COEFFICIENT5, "coefficient5"),
        (f::COEFFICIENT6, "coefficient6"),
    ] {
        entity.set(attribute, num(run.required_number(record, index)?));
    }
    entity.set("min_x", num(run.recommended_number(record, f::MIN_X)));
    entity.set("max_x", num(run.recommended_number(record, f::MAX_X)));
    entity.set("min_y", num(run.recommended_number(record, f::MIN_Y)));
    entity.set("max_y", num(run.recommended_number(record, f::MAX_Y)));
    run.register(record, entity)
}

fn translate_material_standard<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::material_standard as f;
    let name = run.required_text(record, f::NAME)?;
    let thickness = run.required_number(record, f::THICKNESS)?;
    let conductivity = run.required_number(record, f::CONDUCTIVITY)?;
    let density = run.required_number(record, f::DENSITY)?;
    let specific_heat = run.required_number(record, f::SPECIFIC_HEAT)?;
    let roughness = remap(ROUGHNESS_ALIASES, &run.recommended_text(record, f::ROUGHNESS));
    let entity = Entity::new(EntityKind::StandardMaterial)
        .with_text("name", name)
        .with_text("roughness", roughness)
        .with("thickness", num(thickness))
        .with("conductivity", num(conductivity))
        .with("density", num(density))
        .with("specific_heat", num(specific_heat))
        .with(
            "thermal_absorptance",
            num(run.recommended_number(record, f::THERMAL_ABSORPTANCE)),
        )
        .with(
            "solar_absorptance",
            num(run.recommended_number(record, f::SOLAR_ABSORPTANCE)),
        )
        .with(
            "visible_absorptance",
            num(run.recommended_number(record, f::VISIBLE_ABSORPTANCE)),
        );
    run.register(record, entity)
}

fn translate_material_massless<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::material_massless as f;
    let name = run.required_text(record, f::NAME)?;
    let resistance = run.required_number(record, f::THERMAL_RESISTANCE)?;
    let roughness = remap(ROUGHNESS_ALIASES, &run.recommended_text(record, f::ROUGHNESS));
    let entity = Entity::new(EntityKind::MasslessMaterial)
        .with_text("name", name)
        .with_text("roughness", roughness)
        .with("thermal_resistance", num(resistance))
        .with(
            "thermal_absorptance",
            num(run.recommended_number(record, f::THERMAL_ABSORPTANCE)),
        )
        .with(
            "solar_absorptance",
            num(run.recommended_number(record, f::SOLAR_ABSORPTANCE)),
        )
        .with(
            "visible_absorptance",
            num(run.recommended_number(record, f::VISIBLE_ABSORPTANCE)),
        );
    run.register(record, entity)
}

fn translate_construction<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::construction as f;
    let name = run.required_text(record, f::NAME)?;
    let mut layers = Vec::new();
    for index in f::LAYERS_START..record.num_fields() {
        let Some(layer_record) = record.reference(index) else {
            run.error(format!(
                "Construction record '{}' has a non-reference layer at field {}",
                name, index
            ));
            continue;
        };
        match run.resolve(layer_record) {
            Some(layer) => layers.push(layer),
            None => run.error(format!(
                "Construction record '{}' references an untranslatable layer",
                name
            )),
        }
    }
    let entity = Entity::new(EntityKind::Construction)
        .with_text("name", name)
        .with("layers", AttributeValue::ReferenceList(layers));
    run.register(record, entity)
}

// =============================================================================
// Container and load kinds
// =============================================================================

/// Load kinds a zone pulls in, with the field referencing the zone
const ZONE_DEPENDENTS: &[(RecordKind, usize)] = &[
    (RecordKind::Lights, fields::lights::ZONE),
    (RecordKind::People, fields::people::ZONE),
    (RecordKind::ElectricEquipment, fields::electric_equipment::ZONE),
    (RecordKind::Infiltration, fields::infiltration::ZONE),
];

fn translate_zone<'a>(record: &'a Record, run: &mut ReverseRun<'a, '_>) -> Option<RecordIdentity> {
    use fields::zone as f;
    let name = run.required_text(record, f::NAME)?;
    let mut entity = Entity::new(EntityKind::Zone)
        .with_text("name", name)
        .with("multiplier", num(run.recommended_number(record, f::MULTIPLIER)));
    if let Some(direction) = record.number(f::DIRECTION_OF_NORTH) {
        entity.set("direction_of_north", num(direction));
    }
    if let Some(height) = record.number(f::CEILING_HEIGHT) {
        entity.set("ceiling_height", num(height));
    }
    if let Some(volume) = record.number(f::VOLUME) {
        entity.set("volume", num(volume));
    }
    // Register before pulling dependents so their back-references find the
    // in-progress entity instead of recursing into this rule again.
    let zone_entity = run.register(record, entity)?;

    for &(kind, zone_field) in ZONE_DEPENDENTS {
        let dependents: Vec<RecordIdentity> = run
            .records_of_kind(kind)
            .iter()
            .filter(|r| r.reference(zone_field) == Some(record.identity()))
            .map(|r| r.identity())
            .collect();
        for dependent in dependents {
            run.resolve(dependent);
        }
    }
    Some(zone_entity)
}

/// Shared shape of the four load rules: name, zone back-reference, optional
/// schedule. All load layouts share the same fixed head.
fn load_header<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
    kind: EntityKind,
    name_field: usize,
    zone_field: usize,
    schedule_field: usize,
) -> Option<Entity> {
    let name = run.required_text(record, name_field)?;
    let zone_record = run.required_reference(record, zone_field)?;
    // A load outside any zone has nowhere to live
    let zone = run.resolve(zone_record)?;
    let mut entity = Entity::new(kind)
        .with_text("name", name)
        .with_reference("zone", zone);
    match record.reference(schedule_field) {
        Some(schedule_record) => {
            if let Some(schedule) = run.resolve(schedule_record) {
                entity.set("schedule", AttributeValue::Reference(schedule));
            }
        }
        None => run.warning(format!(
            "{} record {} has no schedule; it will always operate at design level",
            record.kind(),
            record.identity()
        )),
    }
    Some(entity)
}

fn translate_lights<'a>(record: &'a Record, run: &mut ReverseRun<'a, '_>) -> Option<RecordIdentity> {
    use fields::lights as f;
    let mut entity = load_header(record, run, EntityKind::Lights, f::NAME, f::ZONE, f::SCHEDULE)?;
    // Partial entity on a missing level: the zone wiring is still worth
    // keeping
    if let Some(level) = run.required_number(record, f::DESIGN_LEVEL) {
        entity.set("design_level", num(level));
    }
    entity.set(
        "fraction_radiant",
        num(run.recommended_number(record, f::FRACTION_RADIANT)),
    );
    entity.set(
        "fraction_visible",
        num(run.recommended_number(record, f::FRACTION_VISIBLE)),
    );
    run.register(record, entity)
}

fn translate_people<'a>(record: &'a Record, run: &mut ReverseRun<'a, '_>) -> Option<RecordIdentity> {
    use fields::people as f;
    let mut entity = load_header(record, run, EntityKind::People, f::NAME, f::ZONE, f::SCHEDULE)?;
    if let Some(count) = run.required_number(record, f::NUMBER_OF_PEOPLE) {
        entity.set("number_of_people", num(count));
    }
    entity.set(
        "fraction_radiant",
        num(run.recommended_number(record, f::FRACTION_RADIANT)),
    );
    run.register(record, entity)
}

fn translate_electric_equipment<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::electric_equipment as f;
    let mut entity = load_header(
        record,
        run,
        EntityKind::ElectricEquipment,
        f::NAME,
        f::ZONE,
        f::SCHEDULE,
    )?;
    if let Some(level) = run.required_number(record, f::DESIGN_LEVEL) {
        entity.set("design_level", num(level));
    }
    entity.set(
        "fraction_latent",
        num(run.recommended_number(record, f::FRACTION_LATENT)),
    );
    entity.set(
        "fraction_radiant",
        num(run.recommended_number(record, f::FRACTION_RADIANT)),
    );
    run.register(record, entity)
}

fn translate_infiltration<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::infiltration as f;
    let mut entity = load_header(record, run, EntityKind::Infiltration, f::NAME, f::ZONE, f::SCHEDULE)?;
    if let Some(rate) = run.required_number(record, f::DESIGN_FLOW_RATE) {
        entity.set("design_flow_rate", num(rate));
    }
    entity.set(
        "constant_coefficient",
        num(run.recommended_number(record, f::CONSTANT_COEFFICIENT)),
    );
    run.register(record, entity)
}

// =============================================================================
// Plant kinds
// =============================================================================

fn translate_chiller<'a>(record: &'a Record, run: &mut ReverseRun<'a, '_>) -> Option<RecordIdentity> {
    use fields::chiller as f;
    let name = run.required_text(record, f::NAME)?;
    let capacity = run.required_number(record, f::CAPACITY)?;
    let mut entity = Entity::new(EntityKind::Chiller)
        .with_text("name", name)
        .with("capacity", num(capacity))
        .with("cop", num(run.recommended_number(record, f::COP)));
    // The condenser type stays defaulted (absent) unless the source was
    // explicit; the forward engine infers defaulted values from topology.
    if let Some(condenser) = record.text(f::CONDENSER_TYPE) {
        entity.set(
            "condenser_type",
            AttributeValue::Text(remap(CONDENSER_ALIASES, condenser)),
        );
    }
    if let Some(curve_record) = record.reference(f::CAPACITY_CURVE) {
        if let Some(curve) = run.resolve(curve_record) {
            entity.set("capacity_curve", AttributeValue::Reference(curve));
        }
    }
    run.register(record, entity)
}

fn translate_condenser_loop<'a>(
    record: &'a Record,
    run: &mut ReverseRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::condenser_loop as f;
    let name = run.required_text(record, f::NAME)?;
    let mut equipment = Vec::new();
    for index in f::EQUIPMENT_START..record.num_fields() {
        let Some(equipment_record) = record.reference(index) else {
            continue;
        };
        match run.resolve(equipment_record) {
            Some(id) => equipment.push(id),
            None => run.error(format!(
                "CondenserLoop record '{}' references untranslatable equipment",
                name
            )),
        }
    }
    let entity = Entity::new(EntityKind::CondenserLoop)
        .with_text("name", name)
        .with("equipment", AttributeValue::ReferenceList(equipment));
    run.register(record, entity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_and_ignored_kinds_are_disjoint() {
        let rules = RuleSet::standard();
        for kind in rules.registered_kinds() {
            assert!(!rules.is_ignored(kind), "{} both registered and ignored", kind);
        }
    }

    #[test]
    fn test_topology_kinds_are_ignored() {
        let rules = RuleSet::standard();
        for kind in [
            RecordKind::Branch,
            RecordKind::BranchList,
            RecordKind::ConnectorList,
            RecordKind::NodeList,
            RecordKind::PipeAdiabatic,
        ] {
            assert!(rules.is_ignored(kind));
        }
    }

    #[test]
    fn test_reporting_kinds_have_no_rule_and_are_not_ignored() {
        let rules = RuleSet::standard();
        for kind in [
            RecordKind::OutputVariable,
            RecordKind::OutputMeter,
            RecordKind::DaylightingControl,
        ] {
            assert!(rules.rule_for(kind).is_none());
            assert!(!rules.is_ignored(kind));
        }
    }

    #[test]
    fn test_legacy_aliases_remap() {
        assert_eq!(remap(HUMIDITY_INDICATOR_ALIASES, "Wet-Bulb"), "Wetbulb");
        assert_eq!(remap(HUMIDITY_INDICATOR_ALIASES, "Dew-Point"), "Dewpoint");
        assert_eq!(remap(ROUGHNESS_ALIASES, "Medium"), "MediumRough");
        assert_eq!(remap(INTERPOLATE_ALIASES, "Yes"), "Average");
        // Unknown values pass through for the model invariants to judge
        assert_eq!(remap(ROUGHNESS_ALIASES, "Slimy"), "Slimy");
    }
}
