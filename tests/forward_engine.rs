//! Forward engine integration tests: whole-model translations through the
//! public API.

use simbridge::catalog::fields;
use simbridge::{
    AttributeValue, DiagnosticsSink, Entity, EntityKind, ForwardTranslationEngine, RecordKind,
    SchemaCatalog, Severity, TargetModel,
};

fn engine() -> ForwardTranslationEngine {
    ForwardTranslationEngine::new(SchemaCatalog::energy())
}

fn verbose_engine() -> ForwardTranslationEngine {
    ForwardTranslationEngine::new(SchemaCatalog::energy())
        .with_sink(DiagnosticsSink::new().with_min_severity(Severity::Info))
}

#[test]
fn test_workspace_carries_family_and_version() {
    let model = TargetModel::new();
    let outcome = engine().translate(&model, None);
    assert_eq!(outcome.workspace.family(), "energy.workspace");
    let version = outcome.workspace.version_record().unwrap();
    assert_eq!(version.text(fields::version::IDENTIFIER), Some("9.4"));
}

#[test]
fn test_zone_synthesizes_an_equipment_group() {
    let mut model = TargetModel::new();
    let schedule = model
        .insert(
            Entity::new(EntityKind::ConstantSchedule)
                .with_text("name", "Always On")
                .with_number("value", 1.0),
        )
        .unwrap();
    let zone = model
        .insert(Entity::new(EntityKind::Zone).with_text("name", "Core"))
        .unwrap();
    model
        .insert(
            Entity::new(EntityKind::Lights)
                .with_text("name", "Core Lights")
                .with_reference("zone", zone)
                .with_reference("schedule", schedule)
                .with_number("design_level", 1200.0),
        )
        .unwrap();
    model
        .insert(
            Entity::new(EntityKind::People)
                .with_text("name", "Core People")
                .with_reference("zone", zone)
                .with_reference("schedule", schedule)
                .with_number("number_of_people", 12.0),
        )
        .unwrap();

    let outcome = engine().translate(&model, None);
    assert_eq!(outcome.diagnostics.error_count(), 0);

    let groups = outcome.workspace.records_of_kind(RecordKind::EquipmentGroup);
    assert_eq!(groups.len(), 1);
    let group = groups[0];
    assert_eq!(
        group.text(fields::equipment_group::NAME),
        Some("Core Equipment")
    );
    // Member names trail the group record in model order
    let members: Vec<&str> = (fields::equipment_group::MEMBERS_START..group.num_fields())
        .filter_map(|i| group.text(i))
        .collect();
    assert_eq!(members, vec!["Core Lights", "Core People"]);

    // The zone record points back at its grouping record
    let zones = outcome.workspace.records_of_kind(RecordKind::Zone);
    assert_eq!(zones.len(), 1);
    assert_eq!(
        zones[0].reference(fields::zone::EQUIPMENT_GROUP),
        Some(group.identity())
    );
    // The grouping record is synthesized, not mapped
    assert!(outcome.identity_map.source_of(group.identity()).is_none());
}

fn chiller(name: &str, condenser_type: Option<&str>) -> Entity {
    let mut entity = Entity::new(EntityKind::Chiller)
        .with_text("name", name)
        .with_number("capacity", 350_000.0)
        .with_number("cop", 5.5);
    if let Some(condenser) = condenser_type {
        entity.set("condenser_type", AttributeValue::Text(condenser.to_string()));
    }
    entity
}

fn wire_into_loop(model: &mut TargetModel, chiller: simbridge::RecordIdentity) {
    model
        .insert(
            Entity::new(EntityKind::CondenserLoop)
                .with_text("name", "Condenser Loop")
                .with("equipment", AttributeValue::ReferenceList(vec![chiller])),
        )
        .unwrap();
}

#[test]
fn test_defaulted_condenser_type_is_inferred_from_topology() {
    let mut model = TargetModel::new();
    let chiller_id = model.insert(chiller("CH-1", None)).unwrap();
    wire_into_loop(&mut model, chiller_id);

    let outcome = verbose_engine().translate(&model, None);
    assert_eq!(outcome.diagnostics.error_count(), 0);

    let chillers = outcome.workspace.records_of_kind(RecordKind::Chiller);
    assert_eq!(
        chillers[0].text(fields::chiller::CONDENSER_TYPE),
        Some("WaterCooled")
    );
    assert!(outcome
        .diagnostics
        .all()
        .iter()
        .any(|d| d.severity == Severity::Info && d.text.contains("inferring WaterCooled")));
}

#[test]
fn test_defaulted_condenser_type_without_loop_is_air_cooled() {
    let mut model = TargetModel::new();
    model.insert(chiller("CH-1", None)).unwrap();

    let outcome = verbose_engine().translate(&model, None);
    let chillers = outcome.workspace.records_of_kind(RecordKind::Chiller);
    assert_eq!(
        chillers[0].text(fields::chiller::CONDENSER_TYPE),
        Some("AirCooled")
    );
    assert!(outcome
        .diagnostics
        .all()
        .iter()
        .any(|d| d.severity == Severity::Info && d.text.contains("inferring AirCooled")));
}

#[test]
fn test_explicit_condenser_type_is_kept_and_inconsistency_diagnosed() {
    let mut model = TargetModel::new();
    // WaterCooled but wired into no loop
    model.insert(chiller("CH-1", Some("WaterCooled"))).unwrap();

    let outcome = engine().translate(&model, None);
    let chillers = outcome.workspace.records_of_kind(RecordKind::Chiller);
    // Verbatim despite the inconsistency
    assert_eq!(
        chillers[0].text(fields::chiller::CONDENSER_TYPE),
        Some("WaterCooled")
    );
    let errors = outcome.diagnostics.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].text.contains("CH-1"));
}

#[test]
fn test_consistent_explicit_condenser_type_is_silent() {
    let mut model = TargetModel::new();
    let chiller_id = model.insert(chiller("CH-1", Some("WaterCooled"))).unwrap();
    wire_into_loop(&mut model, chiller_id);

    let outcome = engine().translate(&model, None);
    assert_eq!(outcome.diagnostics.error_count(), 0);
    // The loop record lists the chiller record as equipment
    let loops = outcome.workspace.records_of_kind(RecordKind::CondenserLoop);
    let chillers = outcome.workspace.records_of_kind(RecordKind::Chiller);
    assert_eq!(
        loops[0].reference(fields::condenser_loop::EQUIPMENT_START),
        Some(chillers[0].identity())
    );
}

#[test]
fn test_shared_schedule_produces_one_record() {
    let mut model = TargetModel::new();
    let schedule = model
        .insert(
            Entity::new(EntityKind::ConstantSchedule)
                .with_text("name", "Always On")
                .with_number("value", 1.0),
        )
        .unwrap();
    let zone = model
        .insert(Entity::new(EntityKind::Zone).with_text("name", "Core"))
        .unwrap();
    for name in ["L1", "L2"] {
        model
            .insert(
                Entity::new(EntityKind::Lights)
                    .with_text("name", name)
                    .with_reference("zone", zone)
                    .with_reference("schedule", schedule)
                    .with_number("design_level", 600.0),
            )
            .unwrap();
    }

    let outcome = engine().translate(&model, None);
    assert_eq!(outcome.diagnostics.error_count(), 0);
    assert_eq!(
        outcome
            .workspace
            .records_of_kind(RecordKind::ScheduleConstant)
            .len(),
        1
    );
    let schedule_record = outcome.identity_map.target_of(schedule).unwrap();
    for light in outcome.workspace.records_of_kind(RecordKind::Lights) {
        assert_eq!(
            light.reference(fields::lights::SCHEDULE),
            Some(schedule_record)
        );
    }
}

#[test]
fn test_day_schedule_pairs_follow_the_fixed_head() {
    let mut model = TargetModel::new();
    model
        .insert(
            Entity::new(EntityKind::DaySchedule)
                .with_text("name", "Office Day")
                .with("until_hours", AttributeValue::NumberList(vec![8.0, 18.0, 24.0]))
                .with("values", AttributeValue::NumberList(vec![0.1, 1.0, 0.1])),
        )
        .unwrap();

    let outcome = engine().translate(&model, None);
    assert_eq!(outcome.diagnostics.error_count(), 0);
    let days = outcome.workspace.records_of_kind(RecordKind::ScheduleDay);
    let day = days[0];
    let start = fields::schedule_day::VALUES_START;
    assert_eq!(day.number(start), Some(8.0));
    assert_eq!(day.number(start + 1), Some(0.1));
    assert_eq!(day.number(start + 4), Some(24.0));
    assert_eq!(day.number(start + 5), Some(0.1));
    assert_eq!(day.num_fields(), start + 6);
}
