use approx::assert_relative_eq;
use energy_savings_toolbox::{
    building::{
        energy_label::{self, EnergyLabel, EnergyLabelInput, HeatingSystem, Ventilation},
        insulation::{self, InsulationInput, InsulationMeasure, MeasureInvestments},
        window_frames::{self, FrameMaterial, WindowFramesInput},
    },
    dwelling::{GlazingType, HouseType, InsulationStatus},
};

fn insulation_input(house: HouseType, measures: &[InsulationMeasure]) -> InsulationInput {
    InsulationInput {
        house_type: house,
        annual_gas_m3: 1500.0,
        measures: measures.to_vec(),
        current_glazing: None,
        gas_price: None,
        current_roof: None,
        current_wall: None,
        current_floor: None,
        construction_year: None,
        investments: None,
        subsidy: None,
    }
}

#[test]
fn insulation_single_measure_has_no_combination_discount() {
    let res = insulation::calculate(&insulation_input(HouseType::Terraced, &[InsulationMeasure::Roof]));
    assert_eq!(res.measures.len(), 1);
    assert_relative_eq!(res.total_gas_savings_m3, 270.0);
    assert_relative_eq!(res.total_cost_savings, 324.0);
    assert_relative_eq!(res.total_co2_reduction_kg, 486.0);
    assert_relative_eq!(res.new_gas_use_m3, 1230.0);
    assert_relative_eq!(res.total_investment, 5000.0);
}

#[test]
fn insulation_combination_factor_applies_to_totals() {
    let res = insulation::calculate(&insulation_input(
        HouseType::Terraced,
        &[InsulationMeasure::Roof, InsulationMeasure::CavityWall],
    ));
    let per_measure: f64 = res.measures.iter().map(|m| m.gas_savings_m3).sum();
    assert_relative_eq!(per_measure, 450.0);
    assert_relative_eq!(
        res.total_gas_savings_m3,
        450.0 * insulation::COMBINATION_FACTOR,
        epsilon = 1.0
    );
}

#[test]
fn insulation_more_measures_never_save_less() {
    let two = insulation::calculate(&insulation_input(
        HouseType::Detached,
        &[InsulationMeasure::Roof, InsulationMeasure::CavityWall],
    ));
    let three = insulation::calculate(&insulation_input(
        HouseType::Detached,
        &[
            InsulationMeasure::Roof,
            InsulationMeasure::CavityWall,
            InsulationMeasure::Floor,
        ],
    ));
    assert!(three.total_gas_savings_m3 >= two.total_gas_savings_m3);
    assert!(three.total_cost_savings >= two.total_cost_savings);
}

#[test]
fn insulation_priority_ranks_by_savings_per_euro() {
    let res = insulation::calculate(&insulation_input(HouseType::Corner, &InsulationMeasure::ALL));
    let order: Vec<InsulationMeasure> = res.priority.iter().map(|p| p.measure).collect();
    // 공동벽 단열이 투자비 대비 절감이 가장 크다
    assert_eq!(order[0], InsulationMeasure::CavityWall);
    assert!(res
        .priority
        .windows(2)
        .all(|w| w[0].impact_score >= w[1].impact_score));
}

#[test]
fn insulation_existing_insulation_reduces_savings() {
    let none = insulation::calculate(&insulation_input(HouseType::Terraced, &[InsulationMeasure::Floor]));
    let mut input = insulation_input(HouseType::Terraced, &[InsulationMeasure::Floor]);
    input.current_floor = Some(InsulationStatus::Good);
    let good = insulation::calculate(&input);
    assert!(none.total_gas_savings_m3 > good.total_gas_savings_m3);

    // 2000년 이후 준공은 이미 단열된 것으로 본다
    let mut recent = insulation_input(HouseType::Terraced, &[InsulationMeasure::Floor]);
    recent.construction_year = Some(2005);
    assert_relative_eq!(
        insulation::calculate(&recent).total_gas_savings_m3,
        good.total_gas_savings_m3
    );
}

#[test]
fn insulation_subsidy_and_scenarios() {
    let mut input = insulation_input(HouseType::Terraced, &[InsulationMeasure::Roof, InsulationMeasure::Floor]);
    input.subsidy = Some(1000.0);
    input.investments = Some(MeasureInvestments {
        roof: Some(6000.0),
        ..MeasureInvestments::default()
    });
    let res = insulation::calculate(&input);
    assert_relative_eq!(res.total_investment, 8500.0);
    assert_relative_eq!(res.total_net_investment, 7500.0);
    assert_relative_eq!(res.subsidy, 1000.0);
    assert!(res.gas_savings_range.optimistic >= res.gas_savings_range.normal);
    assert!(res.gas_savings_range.normal >= res.gas_savings_range.pessimistic);
    assert!(res.cost_savings_range.optimistic >= res.cost_savings_range.pessimistic);
}

#[test]
fn insulation_poor_house_saves_more_than_apartment() {
    let apartment = insulation::calculate(&insulation_input(HouseType::Apartment, &InsulationMeasure::ALL));
    let detached = insulation::calculate(&insulation_input(HouseType::Detached, &InsulationMeasure::ALL));
    assert!(detached.total_gas_savings_m3 >= apartment.total_gas_savings_m3);
}

fn frames(glazing: Option<GlazingType>) -> WindowFramesInput {
    WindowFramesInput {
        window_area_m2: 10.0,
        current_glazing: glazing,
        frame_material: FrameMaterial::Plastic,
        annual_gas_m3: 1500.0,
        gas_price: None,
        house_type: None,
        construction_year: None,
        investment: None,
    }
}

#[test]
fn window_frames_single_glazing() {
    let res = window_frames::calculate(&frames(Some(GlazingType::Single)));
    assert_relative_eq!(res.current_u_value, 5.7);
    assert_relative_eq!(res.new_u_value, window_frames::NEW_U_VALUE);
    assert_relative_eq!(res.heat_loss_reduction_w_per_k, 46.0);
    assert_relative_eq!(res.gas_savings_m3, 98.0);
    assert_relative_eq!(res.cost_savings, 117.0);
    assert_relative_eq!(res.investment, 2250.0);
    assert_eq!(res.payback_years, Some(19.2));
    assert!(res.comfort.contains("enkel glas"));
    assert!(res
        .comfort
        .contains("minder tocht, betere geluidsisolatie, en minder condensvorming."));
}

#[test]
fn window_frames_glazing_guessed_from_year() {
    let mut input = frames(None);
    input.construction_year = Some(1970);
    assert_eq!(window_frames::calculate(&input).glazing, GlazingType::Single);
    input.construction_year = Some(2010);
    assert_eq!(window_frames::calculate(&input).glazing, GlazingType::Hr);
    input.construction_year = None;
    assert_eq!(window_frames::calculate(&input).glazing, GlazingType::Double);
}

fn label_input() -> EnergyLabelInput {
    EnergyLabelInput {
        construction_year: 1965,
        house_type: HouseType::Detached,
        floor_area_m2: 150.0,
        roof_insulation: InsulationStatus::None,
        wall_insulation: InsulationStatus::None,
        floor_insulation: InsulationStatus::None,
        glazing: GlazingType::Single,
        heating_system: HeatingSystem::CvBoiler,
        solar_panels: false,
        solar_kwp: None,
        rc_roof: None,
        rc_wall: None,
        rc_floor: None,
        heat_emitter: None,
        ventilation: None,
    }
}

#[test]
fn energy_label_for_old_uninsulated_house() {
    let res = energy_label::calculate(&label_input());
    assert_relative_eq!(res.epg, 465.0);
    assert_eq!(res.label, EnergyLabel::F);
    assert_eq!(res.advice.len(), 5);
    assert_eq!(res.label_after_measure.len(), 5);
    assert_relative_eq!(res.potential_savings, 3650.0);
    assert!(res.explanation.contains("465"));
}

#[test]
fn energy_label_for_modern_house() {
    let input = EnergyLabelInput {
        construction_year: 2015,
        house_type: HouseType::Apartment,
        roof_insulation: InsulationStatus::Good,
        wall_insulation: InsulationStatus::Good,
        floor_insulation: InsulationStatus::Good,
        glazing: GlazingType::Hr,
        heating_system: HeatingSystem::HeatPump,
        solar_panels: true,
        solar_kwp: Some(6.0),
        ventilation: Some(Ventilation::Hrv),
        ..label_input()
    };
    let res = energy_label::calculate(&input);
    assert_relative_eq!(res.epg, 110.0);
    assert_eq!(res.label, EnergyLabel::A);
    assert!(res.advice.is_empty());
    assert_relative_eq!(res.potential_savings, 100.0);
    assert_relative_eq!(res.heat_loss.ventilation, 30.0);
}

#[test]
fn energy_label_measures_never_worsen_label() {
    let res = energy_label::calculate(&label_input());
    for after in &res.label_after_measure {
        assert!(after.new_label <= res.label, "{}", after.measure);
        assert!(after.epg_improvement > 0.0);
    }
}

#[test]
fn energy_label_heat_loss_grows_without_insulation() {
    let poor = energy_label::heat_loss(&label_input());
    let good = energy_label::heat_loss(&EnergyLabelInput {
        roof_insulation: InsulationStatus::Good,
        wall_insulation: InsulationStatus::Good,
        floor_insulation: InsulationStatus::Good,
        glazing: GlazingType::Hr,
        ..label_input()
    });
    assert!(poor.roof > good.roof);
    assert!(poor.walls > good.walls);
    assert!(poor.floor > good.floor);
    assert!(poor.windows > good.windows);
    assert_relative_eq!(poor.ventilation, good.ventilation);
}
