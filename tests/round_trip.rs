//! Reverse-then-forward round trips: a record translated into the model and
//! back must come out field-for-field equivalent.

use simbridge::catalog::fields;
use simbridge::{
    ForwardTranslationEngine, Record, RecordKind, ReverseTranslationEngine, SchemaCatalog,
    SourceWorkspace,
};

fn round_trip(record: Record) -> SourceWorkspace {
    let catalog = SchemaCatalog::energy();
    let mut ws = SourceWorkspace::new(catalog.family());
    ws.add(Record::new(RecordKind::Version).with_text(fields::version::IDENTIFIER, "9.4"));
    ws.add(record);

    let reverse = ReverseTranslationEngine::new(SchemaCatalog::energy());
    let reversed = reverse.translate(ws, None);
    assert_eq!(reversed.diagnostics.error_count(), 0);

    let forward = ForwardTranslationEngine::new(SchemaCatalog::energy());
    let forwarded = forward.translate(&reversed.model, None);
    assert_eq!(forwarded.diagnostics.error_count(), 0);
    forwarded.workspace
}

#[test]
fn test_linear_curve_round_trips() {
    use fields::curve_linear as f;
    let record = Record::new(RecordKind::CurveLinear)
        .with_text(f::NAME, "CurveA")
        .with_number(f::COEFFICIENT1, 0.5)
        .with_number(f::COEFFICIENT2, 1.2)
        .with_number(f::MIN_X, 0.0)
        .with_number(f::MAX_X, 1.0);

    let ws = round_trip(record);
    let curves = ws.records_of_kind(RecordKind::CurveLinear);
    assert_eq!(curves.len(), 1);
    let curve = curves[0];
    assert_eq!(curve.text(f::NAME), Some("CurveA"));
    assert_eq!(curve.number(f::COEFFICIENT1), Some(0.5));
    assert_eq!(curve.number(f::COEFFICIENT2), Some(1.2));
    assert_eq!(curve.number(f::MIN_X), Some(0.0));
    assert_eq!(curve.number(f::MAX_X), Some(1.0));
}

#[test]
fn test_site_north_axis_survives_the_angle_conversion() {
    use fields::site as f;
    let record = Record::new(RecordKind::Site)
        .with_text(f::NAME, "Denver")
        .with_number(f::LATITUDE, 39.7)
        .with_number(f::LONGITUDE, -104.9)
        .with_number(f::TIME_ZONE, -7.0)
        .with_number(f::ELEVATION, 1609.0)
        .with_number(f::NORTH_AXIS_DEGREES, 30.0);

    let ws = round_trip(record);
    let site = &ws.records_of_kind(RecordKind::Site)[0];
    assert_eq!(site.number(f::LATITUDE), Some(39.7));
    // Degrees to radians and back
    let north = site.number(f::NORTH_AXIS_DEGREES).unwrap();
    assert!((north - 30.0).abs() < 1e-9);
}

#[test]
fn test_design_day_pressure_survives_the_unit_conversion() {
    use fields::design_day as f;
    let record = Record::new(RecordKind::DesignDay)
        .with_text(f::NAME, "Denver Summer")
        .with_number(f::MONTH, 7.0)
        .with_number(f::DAY_OF_MONTH, 21.0)
        .with_text(f::DAY_TYPE, "SummerDesignDay")
        .with_number(f::MAX_DRY_BULB, 33.0)
        .with_number(f::DAILY_RANGE, 10.7)
        .with_text(f::HUMIDITY_INDICATOR_TYPE, "Wetbulb")
        .with_number(f::HUMIDITY_INDICATOR_VALUE, 15.5)
        .with_number(f::STATION_PRESSURE_KPA, 83.4)
        .with_number(f::WIND_SPEED, 4.9)
        .with_number(f::WIND_DIRECTION, 120.0);

    let ws = round_trip(record);
    let day = &ws.records_of_kind(RecordKind::DesignDay)[0];
    assert_eq!(day.text(f::HUMIDITY_INDICATOR_TYPE), Some("Wetbulb"));
    assert_eq!(day.number(f::HUMIDITY_INDICATOR_VALUE), Some(15.5));
    let pressure = day.number(f::STATION_PRESSURE_KPA).unwrap();
    assert!((pressure - 83.4).abs() < 1e-9);
}

#[test]
fn test_construction_layer_order_round_trips() {
    use simbridge::FieldValue;
    let catalog = SchemaCatalog::energy();
    let mut ws = SourceWorkspace::new(catalog.family());
    ws.add(Record::new(RecordKind::Version).with_text(fields::version::IDENTIFIER, "9.4"));

    let mut layer_ids = Vec::new();
    for (name, thickness) in [("Stucco", 0.025), ("Brick", 0.1), ("Gypsum", 0.019)] {
        use fields::material_standard as m;
        layer_ids.push(ws.add(
            Record::new(RecordKind::MaterialStandard)
                .with_text(m::NAME, name)
                .with_text(m::ROUGHNESS, "Rough")
                .with_number(m::THICKNESS, thickness)
                .with_number(m::CONDUCTIVITY, 0.7)
                .with_number(m::DENSITY, 1800.0)
                .with_number(m::SPECIFIC_HEAT, 900.0)
                .with_number(m::THERMAL_ABSORPTANCE, 0.9)
                .with_number(m::SOLAR_ABSORPTANCE, 0.7)
                .with_number(m::VISIBLE_ABSORPTANCE, 0.7),
        ));
    }
    let mut construction =
        Record::new(RecordKind::Construction).with_text(fields::construction::NAME, "Exterior Wall");
    for id in &layer_ids {
        construction.push_field(FieldValue::Reference(*id));
    }
    ws.add(construction);

    let reversed = ReverseTranslationEngine::new(SchemaCatalog::energy()).translate(ws, None);
    assert_eq!(reversed.diagnostics.error_count(), 0);
    let forwarded =
        ForwardTranslationEngine::new(SchemaCatalog::energy()).translate(&reversed.model, None);
    assert_eq!(forwarded.diagnostics.error_count(), 0);

    let construction = &forwarded.workspace.records_of_kind(RecordKind::Construction)[0];
    let layer_names: Vec<&str> = (fields::construction::LAYERS_START..construction.num_fields())
        .filter_map(|i| construction.reference(i))
        .filter_map(|id| forwarded.workspace.get(id))
        .filter_map(|r| r.text(fields::material_standard::NAME))
        .collect();
    // Outside inward, preserved through both directions
    assert_eq!(layer_names, vec!["Stucco", "Brick", "Gypsum"]);
}
