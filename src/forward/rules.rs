//! Per-kind forward translation rules
//!
//! One entity in, one primary record out, plus any auxiliary records the
//! source schema needs. Discriminator attributes left at the schema default
//! are inferred from topology; explicit values are emitted verbatim even
//! when topologically inconsistent.

use std::collections::HashMap;

use crate::catalog::{fields, EntityKind, RecordKind};
use crate::entity::Entity;
use crate::identity::RecordIdentity;
use crate::record::{FieldValue, Record};

use super::ForwardRun;

/// A forward rule: translate one entity, register the primary record, return
/// its identity
pub type ForwardRule = for<'a> fn(&'a Entity, &mut ForwardRun<'a, '_>) -> Option<RecordIdentity>;

pub(crate) const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;
pub(crate) const PA_TO_KPA: f64 = 1.0 / 1000.0;

// =============================================================================
// Rule table
// =============================================================================

/// Closed dispatch table for the forward direction, built once
pub struct ForwardRuleSet {
    rules: HashMap<EntityKind, ForwardRule>,
}

impl ForwardRuleSet {
    pub fn standard() -> Self {
        let mut rules: HashMap<EntityKind, ForwardRule> = HashMap::new();
        rules.insert(EntityKind::Site, translate_site as ForwardRule);
        rules.insert(EntityKind::SimulationControl, translate_simulation_control);
        rules.insert(EntityKind::RunPeriod, translate_run_period);
        rules.insert(EntityKind::Timestep, translate_timestep);
        rules.insert(EntityKind::DesignDay, translate_design_day);
        rules.insert(EntityKind::ScheduleTypeLimits, translate_schedule_type_limits);
        rules.insert(EntityKind::DaySchedule, translate_day_schedule);
        rules.insert(EntityKind::WeekSchedule, translate_week_schedule);
        rules.insert(EntityKind::YearSchedule, translate_year_schedule);
        rules.insert(EntityKind::ConstantSchedule, translate_constant_schedule);
        rules.insert(EntityKind::LinearCurve, translate_linear_curve);
        rules.insert(EntityKind::QuadraticCurve, translate_quadratic_curve);
        rules.insert(EntityKind::BiquadraticCurve, translate_biquadratic_curve);
        rules.insert(EntityKind::StandardMaterial, translate_standard_material);
        rules.insert(EntityKind::MasslessMaterial, translate_massless_material);
        rules.insert(EntityKind::Construction, translate_construction);
        rules.insert(EntityKind::Zone, translate_zone);
        rules.insert(EntityKind::Lights, translate_lights);
        rules.insert(EntityKind::People, translate_people);
        rules.insert(EntityKind::ElectricEquipment, translate_electric_equipment);
        rules.insert(EntityKind::Infiltration, translate_infiltration);
        rules.insert(EntityKind::Chiller, translate_chiller);
        rules.insert(EntityKind::CondenserLoop, translate_condenser_loop);
        Self { rules }
    }

    pub(crate) fn rule_for(&self, kind: EntityKind) -> Option<ForwardRule> {
        self.rules.get(&kind).copied()
    }

    /// Kinds with a registered rule, sorted
    pub fn registered_kinds(&self) -> Vec<EntityKind> {
        let mut kinds: Vec<EntityKind> = self.rules.keys().copied().collect();
        kinds.sort();
        kinds
    }
}

/// Copy a numeric attribute into a record field, when present
fn copy_number(record: &mut Record, index: usize, entity: &Entity, attribute: &str) {
    if let Some(n) = entity.number(attribute) {
        record.set(index, FieldValue::Number(n));
    }
}

/// Copy a text attribute into a record field, when present
fn copy_text(record: &mut Record, index: usize, entity: &Entity, attribute: &str) {
    if let Some(t) = entity.text(attribute) {
        record.set(index, FieldValue::Text(t.to_string()));
    }
}

// =============================================================================
// Simulation-control kinds
// =============================================================================

fn translate_site<'a>(entity: &'a Entity, run: &mut ForwardRun<'a, '_>) -> Option<RecordIdentity> {
    use fields::site as f;
    let name = run.required_text_attr(entity, "name")?;
    let mut record = Record::new(RecordKind::Site).with_text(f::NAME, name);
    copy_number(&mut record, f::LATITUDE, entity, "latitude");
    copy_number(&mut record, f::LONGITUDE, entity, "longitude");
    copy_number(&mut record, f::TIME_ZONE, entity, "time_zone");
    copy_number(&mut record, f::ELEVATION, entity, "elevation");
    if let Some(radians) = entity.number("north_axis_radians") {
        record.set(
            f::NORTH_AXIS_DEGREES,
            FieldValue::Number(radians * RAD_TO_DEG),
        );
    }
    run.register(entity, record)
}

fn translate_simulation_control<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::simulation_control as f;
    let mut record = Record::new(RecordKind::SimulationControl);
    for (index, attribute) in [
        (f::DO_ZONE_SIZING, "do_zone_sizing"),
        (f::DO_SYSTEM_SIZING, "do_system_sizing"),
        (f::DO_PLANT_SIZING, "do_plant_sizing"),
        (f::RUN_FOR_SIZING_PERIODS, "run_for_sizing_periods"),
        (f::RUN_FOR_WEATHER_PERIODS, "run_for_weather_periods"),
    ] {
        copy_text(&mut record, index, entity, attribute);
    }
    run.register(entity, record)
}

fn translate_run_period<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::run_period as f;
    let name = run.required_text_attr(entity, "name")?;
    let mut record = Record::new(RecordKind::RunPeriod).with_text(f::NAME, name);
    for (index, attribute) in [
        (f::BEGIN_MONTH, "begin_month"),
        (f::BEGIN_DAY, "begin_day"),
        (f::END_MONTH, "end_month"),
        (f::END_DAY, "end_day"),
    ] {
        let value = run.required_number_attr(entity, attribute)?;
        record.set(index, FieldValue::Number(value));
    }
    copy_text(&mut record, f::USE_WEATHER_HOLIDAYS, entity, "use_weather_holidays");
    run.register(entity, record)
}

fn translate_timestep<'a>(entity: &'a Entity, run: &mut ForwardRun<'a, '_>) -> Option<RecordIdentity> {
    let mut record = Record::new(RecordKind::Timestep);
    copy_number(
        &mut record,
        fields::timestep::STEPS_PER_HOUR,
        entity,
        "steps_per_hour",
    );
    run.register(entity, record)
}

/// (indicator, attribute holding the value)
const HUMIDITY_ROUTES: &[(&str, &str)] = &[
    ("Wetbulb", "wetbulb_at_max_drybulb"),
    ("Dewpoint", "dewpoint_at_max_drybulb"),
    ("HumidityRatio", "humidity_ratio_at_max_drybulb"),
    ("Enthalpy", "enthalpy_at_max_drybulb"),
];

fn translate_design_day<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::design_day as f;
    let name = run.required_text_attr(entity, "name")?;
    let mut record = Record::new(RecordKind::DesignDay).with_text(f::NAME, name.clone());
    copy_number(&mut record, f::MONTH, entity, "month");
    copy_number(&mut record, f::DAY_OF_MONTH, entity, "day_of_month");
    copy_text(&mut record, f::DAY_TYPE, entity, "day_type");
    copy_number(&mut record, f::MAX_DRY_BULB, entity, "max_drybulb");
    copy_number(&mut record, f::DAILY_RANGE, entity, "daily_range");
    if let Some(pascals) = entity.number("station_pressure_pa") {
        record.set(
            f::STATION_PRESSURE_KPA,
            FieldValue::Number(pascals * PA_TO_KPA),
        );
    }
    copy_number(&mut record, f::WIND_SPEED, entity, "wind_speed");
    copy_number(&mut record, f::WIND_DIRECTION, entity, "wind_direction");

    let indicator = entity.text("humidity_indicator").unwrap_or("Wetbulb");
    record.set(
        f::HUMIDITY_INDICATOR_TYPE,
        FieldValue::Text(indicator.to_string()),
    );
    let value = HUMIDITY_ROUTES
        .iter()
        .find(|(name, _)| *name == indicator)
        .and_then(|(_, attribute)| entity.number(attribute));
    match value {
        Some(value) => record.set(f::HUMIDITY_INDICATOR_VALUE, FieldValue::Number(value)),
        None => run.error(format!(
            "DesignDay entity '{}' declares humidity indicator {} but carries no matching value",
            name, indicator
        )),
    }
    run.register(entity, record)
}

// =============================================================================
// Schedule kinds
// =============================================================================

fn translate_schedule_type_limits<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::schedule_type_limits as f;
    let name = run.required_text_attr(entity, "name")?;
    let mut record = Record::new(RecordKind::ScheduleTypeLimits).with_text(f::NAME, name);
    copy_number(&mut record, f::LOWER_LIMIT, entity, "lower_limit");
    copy_number(&mut record, f::UPPER_LIMIT, entity, "upper_limit");
    copy_text(&mut record, f::NUMERIC_TYPE, entity, "numeric_type");
    run.register(entity, record)
}

fn set_reference_via_resolve(
    run: &mut ForwardRun<'_, '_>,
    record_id: RecordIdentity,
    index: usize,
    target_entity: Option<RecordIdentity>,
) {
    if let Some(target) = target_entity {
        if let Some(target_record) = run.resolve(target) {
            run.set_field(record_id, index, FieldValue::Reference(target_record));
        }
    }
}

fn translate_day_schedule<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::schedule_day as f;
    let name = run.required_text_attr(entity, "name")?;
    let mut record = Record::new(RecordKind::ScheduleDay).with_text(f::NAME, name.clone());
    // Written even when defaulted so the repeating pairs land past the head
    let interpolate = entity.text("interpolate").unwrap_or("No");
    record.set(f::INTERPOLATE, FieldValue::Text(interpolate.to_string()));

    let until_hours = entity
        .get("until_hours")
        .and_then(|v| v.as_number_list())
        .unwrap_or(&[])
        .to_vec();
    let values = entity
        .get("values")
        .and_then(|v| v.as_number_list())
        .unwrap_or(&[])
        .to_vec();
    if until_hours.len() != values.len() {
        run.error(format!(
            "DaySchedule entity '{}' has {} until-hours but {} values",
            name,
            until_hours.len(),
            values.len()
        ));
    }
    for (until, value) in until_hours.iter().zip(values.iter()) {
        record.push_field(FieldValue::Number(*until));
        record.push_field(FieldValue::Number(*value));
    }

    let record_id = run.register(entity, record)?;
    set_reference_via_resolve(run, record_id, f::TYPE_LIMITS, entity.reference("type_limits"));
    Some(record_id)
}

fn translate_week_schedule<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::schedule_week as f;
    let name = run.required_text_attr(entity, "name")?;
    let record = Record::new(RecordKind::ScheduleWeek).with_text(f::NAME, name);
    let record_id = run.register(entity, record)?;
    set_reference_via_resolve(
        run,
        record_id,
        f::WEEKDAY_SCHEDULE,
        entity.reference("weekday_schedule"),
    );
    set_reference_via_resolve(
        run,
        record_id,
        f::WEEKEND_SCHEDULE,
        entity.reference("weekend_schedule"),
    );
    Some(record_id)
}

fn translate_year_schedule<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::schedule_year as f;
    let name = run.required_text_attr(entity, "name")?;
    let record = Record::new(RecordKind::ScheduleYear).with_text(f::NAME, name);
    let record_id = run.register(entity, record)?;
    set_reference_via_resolve(run, record_id, f::TYPE_LIMITS, entity.reference("type_limits"));
    set_reference_via_resolve(
        run,
        record_id,
        f::WEEK_SCHEDULE,
        entity.reference("week_schedule"),
    );
    Some(record_id)
}

fn translate_constant_schedule<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::schedule_constant as f;
    let name = run.required_text_attr(entity, "name")?;
    let mut record = Record::new(RecordKind::ScheduleConstant).with_text(f::NAME, name);
    copy_number(&mut record, f::VALUE, entity, "value");
    let record_id = run.register(entity, record)?;
    set_reference_via_resolve(run, record_id, f::TYPE_LIMITS, entity.reference("type_limits"));
    Some(record_id)
}

// =============================================================================
// Resource kinds
// =============================================================================

fn translate_linear_curve<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::curve_linear as f;
    let name = run.required_text_attr(entity, "name")?;
    let mut record = Record::new(RecordKind::CurveLinear).with_text(f::NAME, name);
    copy_number(&mut record, f::COEFFICIENT1, entity, "coefficient1");
    copy_number(&mut record, f::COEFFICIENT2, entity, "coefficient2");
    copy_number(&mut record, f::MIN_X, entity, "min_x");
    copy_number(&mut record, f::MAX_X, entity, "max_x");
    run.register(entity, record)
}

fn translate_quadratic_curve<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::curve_quadratic as f;
    let name = run.required_text_attr(entity, "name")?;
    let mut record = Record::new(RecordKind::CurveQuadratic).with_text(f::NAME, name);
    copy_number(&mut record, f::COEFFICIENT1, entity, "coefficient1");
    copy_number(&mut record, f::COEFFICIENT2, entity, "coefficient2");
    copy_number(&mut record, f::COEFFICIENT3, entity, "coefficient3");
    copy_number(&mut record, f::MIN_X, entity, "min_x");
    copy_number(&mut record, f::MAX_X, entity, "max_x");
    run.register(entity, record)
}

fn translate_biquadratic_curve<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::curve_biquadratic as f;
    let name = run.required_text_attr(entity, "name")?;
    let mut record = Record::new(RecordKind::CurveBiquadratic).with_text(f::NAME, name);
    for (index, attribute) in [
        (f::COEFFICIENT1, "coefficient1"),
        (f::COEFFICIENT2, "coefficient2"),
        (f::COEFFICIENT3, "coefficient3"),
        (f::COEFFICIENT4, "coefficient4"),
        (f::COEFFICIENT5, "coefficient5"),
        (f::COEFFICIENT6, "coefficient6"),
        (f::MIN_X, "min_x"),
        (f::MAX_X, "max_x"),
        (f::MIN_Y, "min_y"),
        (f::MAX_Y, "max_y"),
    ] {
        copy_number(&mut record, index, entity, attribute);
    }
    run.register(entity, record)
}

fn translate_standard_material<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::material_standard as f;
    let name = run.required_text_attr(entity, "name")?;
    let mut record = Record::new(RecordKind::MaterialStandard).with_text(f::NAME, name);
    copy_text(&mut record, f::ROUGHNESS, entity, "roughness");
    for (index, attribute) in [
        (f::THICKNESS, "thickness"),
        (f::CONDUCTIVITY, "conductivity"),
        (f::DENSITY, "density"),
        (f::SPECIFIC_HEAT, "specific_heat"),
        (f::THERMAL_ABSORPTANCE, "thermal_absorptance"),
        (f::SOLAR_ABSORPTANCE, "solar_absorptance"),
        (f::VISIBLE_ABSORPTANCE, "visible_absorptance"),
    ] {
        copy_number(&mut record, index, entity, attribute);
    }
    run.register(entity, record)
}

fn translate_massless_material<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::material_massless as f;
    let name = run.required_text_attr(entity, "name")?;
    let mut record = Record::new(RecordKind::MaterialMassless).with_text(f::NAME, name);
    copy_text(&mut record, f::ROUGHNESS, entity, "roughness");
    for (index, attribute) in [
        (f::THERMAL_RESISTANCE, "thermal_resistance"),
        (f::THERMAL_ABSORPTANCE, "thermal_absorptance"),
        (f::SOLAR_ABSORPTANCE, "solar_absorptance"),
        (f::VISIBLE_ABSORPTANCE, "visible_absorptance"),
    ] {
        copy_number(&mut record, index, entity, attribute);
    }
    run.register(entity, record)
}

fn translate_construction<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::construction as f;
    let name = run.required_text_attr(entity, "name")?;
    let record = Record::new(RecordKind::Construction).with_text(f::NAME, name.clone());
    let record_id = run.register(entity, record)?;
    let layers = entity
        .get("layers")
        .and_then(|v| v.as_reference_list())
        .unwrap_or(&[])
        .to_vec();
    for layer in layers {
        match run.resolve(layer) {
            Some(layer_record) => {
                run.push_field(record_id, FieldValue::Reference(layer_record))
            }
            None => run.error(format!(
                "Construction entity '{}' references an untranslatable layer",
                name
            )),
        }
    }
    Some(record_id)
}

// =============================================================================
// Container and load kinds
// =============================================================================

const ZONE_DEPENDENT_KINDS: &[EntityKind] = &[
    EntityKind::Lights,
    EntityKind::People,
    EntityKind::ElectricEquipment,
    EntityKind::Infiltration,
];

/// Zone expands into more than one record: the primary zone record plus a
/// synthesized grouping record listing the translated names of its loads.
fn translate_zone<'a>(entity: &'a Entity, run: &mut ForwardRun<'a, '_>) -> Option<RecordIdentity> {
    use fields::zone as f;
    let name = run.required_text_attr(entity, "name")?;
    let mut record = Record::new(RecordKind::Zone).with_text(f::NAME, name.clone());
    copy_number(&mut record, f::DIRECTION_OF_NORTH, entity, "direction_of_north");
    copy_number(&mut record, f::MULTIPLIER, entity, "multiplier");
    copy_number(&mut record, f::CEILING_HEIGHT, entity, "ceiling_height");
    copy_number(&mut record, f::VOLUME, entity, "volume");
    // Register before the loads resolve their zone back-reference
    let record_id = run.register(entity, record)?;

    let group = Record::new(RecordKind::EquipmentGroup)
        .with_text(fields::equipment_group::NAME, format!("{} Equipment", name));
    let group_id = run.push_aux(group);
    run.set_field(record_id, f::EQUIPMENT_GROUP, FieldValue::Reference(group_id));

    // Dependent loads in model iteration order; each translated name joins
    // the grouping record's repeating tail
    let model = run.model();
    let dependents: Vec<RecordIdentity> = model
        .entities()
        .filter(|e| {
            ZONE_DEPENDENT_KINDS.contains(&e.kind())
                && e.reference("zone") == Some(entity.identity())
        })
        .map(|e| e.identity())
        .collect();
    for dependent in dependents {
        if let Some(dependent_record) = run.resolve(dependent) {
            if let Some(member_name) = run.record_name(dependent_record) {
                run.push_field(group_id, FieldValue::Text(member_name));
            }
        }
    }
    Some(record_id)
}

fn load_record<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
    kind: RecordKind,
    name_field: usize,
    zone_field: usize,
    schedule_field: usize,
) -> Option<RecordIdentity> {
    let name = run.required_text_attr(entity, "name")?;
    let zone_entity = entity.reference("zone");
    if zone_entity.is_none() {
        run.error(format!(
            "{} entity '{}' is attached to no zone",
            entity.kind(),
            name
        ));
        return None;
    }
    let record = Record::new(kind).with_text(name_field, name);
    let record_id = run.register(entity, record)?;
    set_reference_via_resolve(run, record_id, zone_field, zone_entity);
    set_reference_via_resolve(run, record_id, schedule_field, entity.reference("schedule"));
    Some(record_id)
}

fn translate_lights<'a>(entity: &'a Entity, run: &mut ForwardRun<'a, '_>) -> Option<RecordIdentity> {
    use fields::lights as f;
    let record_id = load_record(entity, run, RecordKind::Lights, f::NAME, f::ZONE, f::SCHEDULE)?;
    for (index, attribute) in [
        (f::DESIGN_LEVEL, "design_level"),
        (f::FRACTION_RADIANT, "fraction_radiant"),
        (f::FRACTION_VISIBLE, "fraction_visible"),
    ] {
        if let Some(n) = entity.number(attribute) {
            run.set_field(record_id, index, FieldValue::Number(n));
        }
    }
    Some(record_id)
}

fn translate_people<'a>(entity: &'a Entity, run: &mut ForwardRun<'a, '_>) -> Option<RecordIdentity> {
    use fields::people as f;
    let record_id = load_record(entity, run, RecordKind::People, f::NAME, f::ZONE, f::SCHEDULE)?;
    for (index, attribute) in [
        (f::NUMBER_OF_PEOPLE, "number_of_people"),
        (f::FRACTION_RADIANT, "fraction_radiant"),
    ] {
        if let Some(n) = entity.number(attribute) {
            run.set_field(record_id, index, FieldValue::Number(n));
        }
    }
    Some(record_id)
}

fn translate_electric_equipment<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::electric_equipment as f;
    let record_id = load_record(
        entity,
        run,
        RecordKind::ElectricEquipment,
        f::NAME,
        f::ZONE,
        f::SCHEDULE,
    )?;
    for (index, attribute) in [
        (f::DESIGN_LEVEL, "design_level"),
        (f::FRACTION_LATENT, "fraction_latent"),
        (f::FRACTION_RADIANT, "fraction_radiant"),
    ] {
        if let Some(n) = entity.number(attribute) {
            run.set_field(record_id, index, FieldValue::Number(n));
        }
    }
    Some(record_id)
}

fn translate_infiltration<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::infiltration as f;
    let record_id = load_record(
        entity,
        run,
        RecordKind::Infiltration,
        f::NAME,
        f::ZONE,
        f::SCHEDULE,
    )?;
    for (index, attribute) in [
        (f::DESIGN_FLOW_RATE, "design_flow_rate"),
        (f::CONSTANT_COEFFICIENT, "constant_coefficient"),
    ] {
        if let Some(n) = entity.number(attribute) {
            run.set_field(record_id, index, FieldValue::Number(n));
        }
    }
    Some(record_id)
}

// =============================================================================
// Plant kinds
// =============================================================================

/// Whether any condenser loop in the model lists this entity as equipment
fn wired_into_condenser_loop(entity: &Entity, run: &ForwardRun<'_, '_>) -> bool {
    run.model()
        .entities_of_kind(EntityKind::CondenserLoop)
        .iter()
        .any(|lp| {
            lp.get("equipment")
                .and_then(|v| v.as_reference_list())
                .is_some_and(|ids| ids.contains(&entity.identity()))
        })
}

fn translate_chiller<'a>(entity: &'a Entity, run: &mut ForwardRun<'a, '_>) -> Option<RecordIdentity> {
    use fields::chiller as f;
    let name = run.required_text_attr(entity, "name")?;
    let mut record = Record::new(RecordKind::Chiller).with_text(f::NAME, name.clone());
    copy_number(&mut record, f::CAPACITY, entity, "capacity");
    copy_number(&mut record, f::COP, entity, "cop");

    // Condenser type: an explicit value is emitted verbatim, inconsistency
    // is only diagnosed; a defaulted value is inferred from the plant
    // topology.
    let wired = wired_into_condenser_loop(entity, run);
    match entity.text("condenser_type") {
        Some(explicit) => {
            if explicit == "WaterCooled" && !wired {
                run.error(format!(
                    "Chiller entity '{}' declares WaterCooled but is wired into no condenser loop",
                    name
                ));
            } else if explicit == "AirCooled" && wired {
                run.error(format!(
                    "Chiller entity '{}' declares AirCooled but is wired into a condenser loop",
                    name
                ));
            }
            record.set(f::CONDENSER_TYPE, FieldValue::Text(explicit.to_string()));
        }
        None => {
            let inferred = if wired { "WaterCooled" } else { "AirCooled" };
            run.info(format!(
                "Chiller entity '{}' left condenser type defaulted; inferring {} from {}",
                name,
                inferred,
                if wired {
                    "its condenser loop connection"
                } else {
                    "the absence of a condenser loop connection"
                }
            ));
            record.set(f::CONDENSER_TYPE, FieldValue::Text(inferred.to_string()));
        }
    }

    let record_id = run.register(entity, record)?;
    set_reference_via_resolve(
        run,
        record_id,
        f::CAPACITY_CURVE,
        entity.reference("capacity_curve"),
    );
    Some(record_id)
}

fn translate_condenser_loop<'a>(
    entity: &'a Entity,
    run: &mut ForwardRun<'a, '_>,
) -> Option<RecordIdentity> {
    use fields::condenser_loop as f;
    let name = run.required_text_attr(entity, "name")?;
    let record = Record::new(RecordKind::CondenserLoop).with_text(f::NAME, name.clone());
    let record_id = run.register(entity, record)?;
    let equipment = entity
        .get("equipment")
        .and_then(|v| v.as_reference_list())
        .unwrap_or(&[])
        .to_vec();
    for member in equipment {
        match run.resolve(member) {
            Some(member_record) => {
                run.push_field(record_id, FieldValue::Reference(member_record))
            }
            None => run.error(format!(
                "CondenserLoop entity '{}' references untranslatable equipment",
                name
            )),
        }
    }
    Some(record_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entity_kind_has_a_forward_rule() {
        let rules = ForwardRuleSet::standard();
        assert_eq!(rules.registered_kinds().len(), 23);
        assert!(rules.rule_for(EntityKind::Zone).is_some());
        assert!(rules.rule_for(EntityKind::Chiller).is_some());
    }

    #[test]
    fn test_unit_conversions_are_inverses() {
        use crate::reverse::rules::{DEG_TO_RAD, KPA_TO_PA};
        assert!((DEG_TO_RAD * RAD_TO_DEG - 1.0).abs() < 1e-12);
        assert!((KPA_TO_PA * PA_TO_KPA - 1.0).abs() < 1e-12);
    }
}
