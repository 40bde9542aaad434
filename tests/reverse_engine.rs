//! Reverse engine integration tests: whole-workspace translations through
//! the public API.

use simbridge::catalog::fields;
use simbridge::progress::RecordingObserver;
use simbridge::{
    AttributeValue, EntityKind, FieldValue, Record, RecordKind, ReverseTranslationEngine,
    SchemaCatalog, Severity, SourceWorkspace,
};

fn workspace() -> SourceWorkspace {
    let catalog = SchemaCatalog::energy();
    let mut ws = SourceWorkspace::new(catalog.family());
    ws.add(
        Record::new(RecordKind::Version).with_text(fields::version::IDENTIFIER, "9.4"),
    );
    ws
}

fn engine() -> ReverseTranslationEngine {
    ReverseTranslationEngine::new(SchemaCatalog::energy())
}

fn standard_material(name: &str) -> Record {
    use fields::material_standard as f;
    Record::new(RecordKind::MaterialStandard)
        .with_text(f::NAME, name)
        .with_text(f::ROUGHNESS, "Rough")
        .with_number(f::THICKNESS, 0.1)
        .with_number(f::CONDUCTIVITY, 1.7)
        .with_number(f::DENSITY, 2240.0)
        .with_number(f::SPECIFIC_HEAT, 900.0)
        .with_number(f::THERMAL_ABSORPTANCE, 0.9)
        .with_number(f::SOLAR_ABSORPTANCE, 0.7)
        .with_number(f::VISIBLE_ABSORPTANCE, 0.7)
}

#[test]
fn test_shared_material_translates_once() {
    let mut ws = workspace();
    let brick = ws.add(standard_material("Brick"));
    for name in ["Wall", "Roof"] {
        let mut construction =
            Record::new(RecordKind::Construction).with_text(fields::construction::NAME, name);
        construction.push_field(FieldValue::Reference(brick));
        ws.add(construction);
    }

    let outcome = engine().translate(ws, None);
    assert_eq!(outcome.diagnostics.error_count(), 0);

    let materials = outcome.model.entities_of_kind(EntityKind::StandardMaterial);
    assert_eq!(materials.len(), 1);
    let material_id = materials[0].identity();

    // Both constructions converge on the same entity
    for construction in outcome.model.entities_of_kind(EntityKind::Construction) {
        let layers = construction
            .get("layers")
            .and_then(AttributeValue::as_reference_list)
            .unwrap();
        assert_eq!(layers, &[material_id]);
    }
}

#[test]
fn test_unregistered_kinds_land_in_untranslated_set() {
    let mut ws = workspace();
    let output = ws.add(
        Record::new(RecordKind::OutputVariable).with_text(1, "Zone Mean Air Temperature"),
    );
    ws.add(Record::new(RecordKind::OutputMeter).with_text(0, "Electricity:Facility"));

    let outcome = engine().translate(ws, None);
    assert_eq!(outcome.untranslated.len(), 2);
    assert!(outcome.untranslated.contains(output));
    assert!(!outcome.identity_map.contains_source(output));
}

#[test]
fn test_ignored_kinds_are_silently_skipped() {
    let mut ws = workspace();
    let branch = ws.add(Record::new(RecordKind::Branch).with_text(0, "Main Branch"));
    ws.add(Record::new(RecordKind::NodeList).with_text(0, "Supply Nodes"));

    let outcome = engine().translate(ws, None);
    assert!(outcome.model.is_empty());
    assert!(outcome.untranslated.is_empty());
    assert!(!outcome.identity_map.contains_source(branch));
}

#[test]
fn test_singleton_collision_removes_all_instances() {
    use fields::run_period as f;
    let mut ws = workspace();
    for name in ["Annual", "Annual Again"] {
        ws.add(
            Record::new(RecordKind::RunPeriod)
                .with_text(f::NAME, name)
                .with_number(f::BEGIN_MONTH, 1.0)
                .with_number(f::BEGIN_DAY, 1.0)
                .with_number(f::END_MONTH, 12.0)
                .with_number(f::END_DAY, 31.0)
                .with_text(f::USE_WEATHER_HOLIDAYS, "Yes"),
        );
    }

    let outcome = engine().translate(ws, None);
    assert!(outcome.model.entities_of_kind(EntityKind::RunPeriod).is_empty());
    assert_eq!(outcome.diagnostics.error_count(), 0);
    let warnings = outcome.diagnostics.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].text.contains("RunPeriod"));
}

#[test]
fn test_version_mismatch_warns_but_translates() {
    let catalog = SchemaCatalog::energy();
    let mut ws = SourceWorkspace::new(catalog.family());
    ws.add(Record::new(RecordKind::Version).with_text(fields::version::IDENTIFIER, "1.2"));
    ws.add(
        Record::new(RecordKind::Site)
            .with_text(fields::site::NAME, "Denver")
            .with_number(fields::site::LATITUDE, 39.7)
            .with_number(fields::site::LONGITUDE, -104.9)
            .with_number(fields::site::TIME_ZONE, -7.0)
            .with_number(fields::site::ELEVATION, 1609.0),
    );

    let outcome = engine().translate(ws, None);
    assert!(!outcome.model.is_empty());
    assert_eq!(outcome.diagnostics.error_count(), 0);
    let warnings = outcome.diagnostics.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].text.contains("1.2"));
    assert!(warnings[0].text.contains("9.4"));
}

#[test]
fn test_missing_version_record_warns() {
    let catalog = SchemaCatalog::energy();
    let ws = SourceWorkspace::new(catalog.family());
    let outcome = engine().translate(ws, None);
    let warnings = outcome.diagnostics.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].text.contains("no version record"));
}

#[test]
fn test_family_mismatch_is_fatal() {
    let mut ws = SourceWorkspace::new("structural.workspace");
    ws.add(standard_material("Brick"));

    let outcome = engine().translate(ws, None);
    assert!(outcome.model.is_empty());
    assert!(outcome.identity_map.is_empty());
    assert!(outcome.untranslated.is_empty());
    let errors = outcome.diagnostics.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].text.contains("structural.workspace"));
}

#[test]
fn test_schedule_chain_pulls_dependencies_through() {
    let mut ws = workspace();
    let mut day = Record::new(RecordKind::ScheduleDay)
        .with_text(fields::schedule_day::NAME, "Always On Day")
        .with_text(fields::schedule_day::INTERPOLATE, "No");
    day.push_field(FieldValue::Number(24.0));
    day.push_field(FieldValue::Number(1.0));
    let day_id = ws.add(day);
    let week_id = ws.add(
        Record::new(RecordKind::ScheduleWeek)
            .with_text(fields::schedule_week::NAME, "Always On Week")
            .with_reference(fields::schedule_week::WEEKDAY_SCHEDULE, day_id),
    );
    ws.add(
        Record::new(RecordKind::ScheduleYear)
            .with_text(fields::schedule_year::NAME, "Always On")
            .with_reference(fields::schedule_year::WEEK_SCHEDULE, week_id),
    );

    let outcome = engine().translate(ws, None);
    assert_eq!(outcome.diagnostics.error_count(), 0);

    let year = outcome
        .model
        .find_by_name(EntityKind::YearSchedule, "Always On")
        .unwrap();
    let week = outcome.model.get(year.reference("week_schedule").unwrap()).unwrap();
    assert_eq!(week.kind(), EntityKind::WeekSchedule);
    let day = outcome
        .model
        .get(week.reference("weekday_schedule").unwrap())
        .unwrap();
    assert_eq!(day.kind(), EntityKind::DaySchedule);
    assert_eq!(
        day.get("until_hours").and_then(AttributeValue::as_number_list),
        Some(&[24.0][..])
    );
    assert_eq!(
        day.get("values").and_then(AttributeValue::as_number_list),
        Some(&[1.0][..])
    );
    // The missing weekend schedule falls back to the weekday one
    assert_eq!(
        week.reference("weekend_schedule"),
        week.reference("weekday_schedule")
    );
}

fn design_day(name: &str, indicator: &str, value: f64) -> Record {
    use fields::design_day as f;
    Record::new(RecordKind::DesignDay)
        .with_text(f::NAME, name)
        .with_number(f::MONTH, 7.0)
        .with_number(f::DAY_OF_MONTH, 21.0)
        .with_text(f::DAY_TYPE, "SummerDesignDay")
        .with_number(f::MAX_DRY_BULB, 33.0)
        .with_number(f::DAILY_RANGE, 10.7)
        .with_text(f::HUMIDITY_INDICATOR_TYPE, indicator)
        .with_number(f::HUMIDITY_INDICATOR_VALUE, value)
        .with_number(f::STATION_PRESSURE_KPA, 83.4)
        .with_number(f::WIND_SPEED, 4.9)
        .with_number(f::WIND_DIRECTION, 120.0)
}

#[test]
fn test_humidity_indicator_gates_the_value() {
    let mut ws = workspace();
    ws.add(design_day("Denver Summer", "Wetbulb", 15.5));
    ws.add(design_day("Denver Humid", "HumidityRatio", 0.012));

    let outcome = engine().translate(ws, None);
    assert_eq!(outcome.diagnostics.error_count(), 0);

    let wet = outcome
        .model
        .find_by_name(EntityKind::DesignDay, "Denver Summer")
        .unwrap();
    assert_eq!(wet.number("wetbulb_at_max_drybulb"), Some(15.5));
    assert_eq!(wet.number("humidity_ratio_at_max_drybulb"), None);
    // kPa on the wire, Pa in the model
    assert_eq!(wet.number("station_pressure_pa"), Some(83400.0));

    let humid = outcome
        .model
        .find_by_name(EntityKind::DesignDay, "Denver Humid")
        .unwrap();
    assert_eq!(humid.number("humidity_ratio_at_max_drybulb"), Some(0.012));
    assert_eq!(humid.number("wetbulb_at_max_drybulb"), None);
}

#[test]
fn test_legacy_humidity_alias_is_remapped() {
    let mut ws = workspace();
    ws.add(design_day("Old Document", "Wet-Bulb", 15.5));
    let outcome = engine().translate(ws, None);
    let day = outcome
        .model
        .find_by_name(EntityKind::DesignDay, "Old Document")
        .unwrap();
    assert_eq!(day.text("humidity_indicator"), Some("Wetbulb"));
    assert_eq!(day.number("wetbulb_at_max_drybulb"), Some(15.5));
}

#[test]
fn test_zone_pulls_its_loads() {
    use fields::{lights, zone};
    let mut ws = workspace();
    let zone_id = ws.add(
        Record::new(RecordKind::Zone)
            .with_text(zone::NAME, "Core")
            .with_number(zone::MULTIPLIER, 1.0),
    );
    ws.add(
        Record::new(RecordKind::Lights)
            .with_text(lights::NAME, "Core Lights")
            .with_reference(lights::ZONE, zone_id)
            .with_number(lights::DESIGN_LEVEL, 1200.0)
            .with_number(lights::FRACTION_RADIANT, 0.37)
            .with_number(lights::FRACTION_VISIBLE, 0.18),
    );

    let outcome = engine().translate(ws, None);
    let zone_entity = outcome.model.find_by_name(EntityKind::Zone, "Core").unwrap();
    let light = outcome
        .model
        .find_by_name(EntityKind::Lights, "Core Lights")
        .unwrap();
    assert_eq!(light.reference("zone"), Some(zone_entity.identity()));
    assert_eq!(light.number("design_level"), Some(1200.0));
}

#[test]
fn test_missing_required_field_is_an_error_not_a_panic() {
    use fields::curve_linear as f;
    let mut ws = workspace();
    let curve = ws.add(
        Record::new(RecordKind::CurveLinear)
            .with_text(f::NAME, "Broken")
            .with_number(f::COEFFICIENT1, 0.5),
    );

    let outcome = engine().translate(ws, None);
    assert!(outcome.model.entities_of_kind(EntityKind::LinearCurve).is_empty());
    assert!(!outcome.identity_map.contains_source(curve));
    assert_eq!(outcome.diagnostics.error_count(), 1);
}

#[test]
fn test_severity_filter_drops_warnings() {
    use simbridge::DiagnosticsSink;
    let catalog = SchemaCatalog::energy();
    let ws = SourceWorkspace::new(catalog.family());
    let engine = ReverseTranslationEngine::new(catalog)
        .with_sink(DiagnosticsSink::new().with_min_severity(Severity::Error));
    // The missing version record would normally warn
    let outcome = engine.translate(ws, None);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn test_progress_observer_sees_bounds_and_monotone_values() {
    let mut ws = workspace();
    ws.add(standard_material("Brick"));
    ws.add(standard_material("Plaster"));
    let total = ws.len();

    let mut observer = RecordingObserver::default();
    let outcome = engine().translate(ws, Some(&mut observer));
    assert_eq!(outcome.diagnostics.error_count(), 0);

    assert_eq!(observer.bounds, Some((0, total)));
    assert!(observer.values.windows(2).all(|w| w[0] <= w[1]));
    assert!(observer.values.last().copied().unwrap_or(0) <= total);
}
