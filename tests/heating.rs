use approx::assert_relative_eq;
use energy_savings_toolbox::{
    dwelling::HouseType,
    heating::{
        boiler_replacement::{self, BoilerAge, BoilerReplacementInput, DesiredSystem},
        heat_pump::{self, HeatPumpInput, HeatPumpType, InsulationLevel},
        hot_water_boiler::{
            self, BoilerKind, BoilerLocation, CurrentHotWaterSystem, HotWaterBoilerInput,
            HotWaterDemand,
        },
    },
};

fn boiler(current: BoilerAge, desired: DesiredSystem) -> BoilerReplacementInput {
    BoilerReplacementInput {
        annual_gas_m3: 1500.0,
        current_boiler: current,
        occupants: 3,
        desired_system: desired,
        gas_price: None,
        electricity_price: None,
        boiler_age_years: None,
        installation_cost: Some(2500.0),
    }
}

#[test]
fn boiler_old_unit_is_replaced() {
    let res = boiler_replacement::calculate(&boiler(BoilerAge::Old, DesiredSystem::HrBoiler));
    assert_relative_eq!(res.required_power_kw, 7.3);
    assert_eq!(res.tap_water_class, "CW4 (25-30 kW tapwater)");
    assert_relative_eq!(res.current_efficiency_pct, 75.0);
    assert_relative_eq!(res.new_efficiency_pct, 96.0);
    assert_relative_eq!(res.gas_savings_m3, 328.0);
    assert_relative_eq!(res.cost_savings, 393.75, epsilon = 0.01);
    assert!(res.replacement_advised);
    assert!(res.hybrid.is_none());
    assert_relative_eq!(res.payback_years.unwrap_or_default(), 6.3);
}

#[test]
fn boiler_age_triggers_replacement_advice() {
    let mut input = boiler(BoilerAge::New, DesiredSystem::HrBoiler);
    assert!(!boiler_replacement::calculate(&input).replacement_advised);
    input.boiler_age_years = Some(boiler_replacement::REPLACEMENT_AGE_YEARS);
    assert!(boiler_replacement::calculate(&input).replacement_advised);
}

#[test]
fn boiler_older_type_saves_at_least_as_much() {
    let savings: Vec<f64> = [BoilerAge::Old, BoilerAge::Reasonable, BoilerAge::New]
        .into_iter()
        .map(|age| boiler_replacement::calculate(&boiler(age, DesiredSystem::HrBoiler)).gas_savings_m3)
        .collect();
    assert!(savings.windows(2).all(|w| w[0] >= w[1]), "{savings:?}");
    assert_relative_eq!(savings[2], 0.0);
}

#[test]
fn boiler_hybrid_alternative() {
    let res = boiler_replacement::calculate(&boiler(BoilerAge::Reasonable, DesiredSystem::Hybrid));
    let hybrid = res.hybrid.expect("hybrid advice");
    assert_relative_eq!(hybrid.heat_pump_power_kw, 2.9);
    assert_relative_eq!(hybrid.gas_savings_m3, 750.0);
    assert_relative_eq!(hybrid.cost_savings, 419.06, epsilon = 0.01);
    assert!(!res.replacement_advised);
}

#[test]
fn tap_water_class_by_household() {
    assert!(boiler_replacement::tap_water_class(1).starts_with("CW3"));
    assert!(boiler_replacement::tap_water_class(4).starts_with("CW4"));
    assert!(boiler_replacement::tap_water_class(6).starts_with("CW5"));
}

fn heat_pump_input(house: HouseType, insulation: InsulationLevel) -> HeatPumpInput {
    HeatPumpInput {
        annual_gas_m3: 1500.0,
        house_type: house,
        insulation,
        heat_pump_type: HeatPumpType::AllElectric,
        gas_price: 1.20,
        electricity_price: 0.30,
        cop: None,
        installation_cost: Some(9450.0),
        insulation_correction_pct: None,
        subsidy: None,
    }
}

#[test]
fn heat_pump_all_electric_removes_gas() {
    let res = heat_pump::calculate(&heat_pump_input(HouseType::Terraced, InsulationLevel::Moderate));
    assert_relative_eq!(res.electricity_use_kwh, 2850.0);
    assert_relative_eq!(res.remaining_gas_m3, 0.0);
    assert_relative_eq!(res.current_costs, 1800.0);
    assert_relative_eq!(res.new_costs, 855.0);
    assert_relative_eq!(res.net_savings, 945.0);
    assert_relative_eq!(res.gas_savings_m3, 1500.0);
    assert_relative_eq!(res.co2_reduction_kg, 2700.0);
    assert_eq!(res.payback_years, Some(10.0));
}

#[test]
fn heat_pump_hybrid_keeps_part_of_gas() {
    let mut input = heat_pump_input(HouseType::Terraced, InsulationLevel::Moderate);
    input.heat_pump_type = HeatPumpType::Hybrid;
    let res = heat_pump::calculate(&input);
    assert_relative_eq!(res.remaining_gas_m3, 600.0);
    assert_relative_eq!(res.gas_savings_m3, 900.0);
}

#[test]
fn heat_pump_scenarios_are_ordered() {
    for house in HouseType::ALL {
        let res = heat_pump::calculate(&heat_pump_input(house, InsulationLevel::Poor));
        assert!(res.power_range.optimistic <= res.power_range.normal);
        assert!(res.power_range.normal <= res.power_range.pessimistic);
        assert!(res.savings_range.optimistic >= res.savings_range.pessimistic);
        assert_relative_eq!(res.power_range.normal, res.required_power_kw);
        assert_relative_eq!(res.savings_range.normal, res.net_savings);
    }
}

#[test]
fn heat_pump_power_follows_house_and_insulation() {
    let apartment = heat_pump::calculate(&heat_pump_input(HouseType::Apartment, InsulationLevel::Moderate));
    let detached = heat_pump::calculate(&heat_pump_input(HouseType::Detached, InsulationLevel::Moderate));
    assert!(detached.required_power_kw >= apartment.required_power_kw);

    let poor = heat_pump::calculate(&heat_pump_input(HouseType::Corner, InsulationLevel::Poor));
    let good = heat_pump::calculate(&heat_pump_input(HouseType::Corner, InsulationLevel::Good));
    assert!(poor.required_power_kw >= good.required_power_kw);
}

#[test]
fn heat_pump_insulation_correction_is_capped() {
    let mut capped = heat_pump_input(HouseType::Terraced, InsulationLevel::Good);
    capped.insulation_correction_pct = Some(heat_pump::MAX_INSULATION_CORRECTION_PCT);
    let mut excessive = capped.clone();
    excessive.insulation_correction_pct = Some(90.0);
    assert_eq!(heat_pump::calculate(&capped), heat_pump::calculate(&excessive));

    let base = heat_pump::calculate(&heat_pump_input(HouseType::Terraced, InsulationLevel::Good));
    assert!(heat_pump::calculate(&capped).electricity_use_kwh < base.electricity_use_kwh);
}

fn hot_water(occupants: u32, current: CurrentHotWaterSystem) -> HotWaterBoilerInput {
    HotWaterBoilerInput {
        occupants,
        demand: None,
        current_system: current,
        electricity_price: None,
        gas_price: None,
        shower_minutes_per_day: None,
        baths_per_week: None,
        location: None,
        investment: Some(2000.0),
    }
}

#[test]
fn hot_water_family_gets_heat_pump_boiler() {
    let res = hot_water_boiler::calculate(&hot_water(4, CurrentHotWaterSystem::CvBoiler));
    // 4 × (8 min × 7 L + 5 L) = 244 L
    assert_relative_eq!(res.recommended_volume_l, 366.0);
    assert_relative_eq!(res.recommended_power_kw, 21.2);
    assert_eq!(res.recommended_kind, BoilerKind::HeatPump);
    assert_relative_eq!(res.legionella_kwh, 104.0);
    assert!(res.savings_vs_cv.is_some());
    assert!(res.comparison.heat_pump.cost < res.comparison.electric.cost);
}

#[test]
fn hot_water_small_household_gets_electric_boiler() {
    let mut input = hot_water(2, CurrentHotWaterSystem::Electric);
    input.demand = Some(HotWaterDemand::Low);
    let res = hot_water_boiler::calculate(&input);
    assert_eq!(res.recommended_kind, BoilerKind::Electric);
    assert!(res.savings_vs_cv.is_none());
    assert!(res.payback_years.is_none());
    assert_relative_eq!(res.annual_cost, res.comparison.electric.cost);
}

#[test]
fn hot_water_break_even_leaves_savings_out() {
    let mut input = hot_water(2, CurrentHotWaterSystem::CvBoiler);
    input.demand = Some(HotWaterDemand::Low);
    // 9,5 kWh/m³ 기준으로 가스와 전기 단가가 같은 에너지 가격이 된다
    input.electricity_price = Some(0.20);
    input.gas_price = Some(1.90);
    let res = hot_water_boiler::calculate(&input);
    assert_eq!(res.recommended_kind, BoilerKind::Electric);
    assert_relative_eq!(res.comparison.cv.cost, res.comparison.electric.cost);
    assert!(res.savings_vs_cv.is_none());
    assert!(res.payback_years.is_none());
    assert!(!res.advice.contains("Besparing"));
}

#[test]
fn hot_water_outdoor_location_costs_more() {
    let mut indoor = hot_water(5, CurrentHotWaterSystem::None);
    indoor.location = Some(BoilerLocation::Indoor);
    let mut outdoor = indoor.clone();
    outdoor.location = Some(BoilerLocation::Outdoor);
    let indoor = hot_water_boiler::calculate(&indoor);
    let outdoor = hot_water_boiler::calculate(&outdoor);
    assert!(outdoor.comparison.heat_pump.consumption > indoor.comparison.heat_pump.consumption);
    assert_relative_eq!(outdoor.comparison.electric.cost, indoor.comparison.electric.cost);
}
