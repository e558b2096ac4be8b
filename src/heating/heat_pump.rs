use serde::{Deserialize, Serialize};

use crate::dwelling::{
    simple_payback, HouseType, ScenarioRange, CO2_KG_PER_M3_GAS, FULL_LOAD_HOURS, GAS_KWH_PER_M3,
};
use crate::rounding::{round0, round1, round2};

/// 주택 전체 단열 수준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsulationLevel {
    Poor,
    Moderate,
    Good,
}

impl InsulationLevel {
    fn demand_factor(self) -> f64 {
        match self {
            InsulationLevel::Poor => 1.1,
            InsulationLevel::Moderate => 1.0,
            InsulationLevel::Good => 0.9,
        }
    }
}

/// 히트펌프 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeatPumpType {
    /// 보일러와 병행, 열수요의 60% 담당
    Hybrid,
    AllElectric,
}

impl HeatPumpType {
    fn coverage(self) -> f64 {
        match self {
            HeatPumpType::Hybrid => 0.6,
            HeatPumpType::AllElectric => 1.0,
        }
    }
}

/// 주택 형태별 열수요 보정 계수.
pub fn house_factor(house: HouseType) -> f64 {
    match house {
        HouseType::Apartment => 0.7,
        HouseType::Terraced => 0.8,
        HouseType::Corner => 1.0,
        HouseType::SemiDetached => 1.2,
        HouseType::Detached => 1.5,
    }
}

/// 히트펌프 계산 입력.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatPumpInput {
    /// 연간 가스 사용량 [m³]
    pub annual_gas_m3: f64,
    pub house_type: HouseType,
    pub insulation: InsulationLevel,
    pub heat_pump_type: HeatPumpType,
    pub gas_price: f64,
    pub electricity_price: f64,
    /// 성적계수, 기본 4
    #[serde(default)]
    pub cop: Option<f64>,
    /// 설치비 [€]
    #[serde(default)]
    pub installation_cost: Option<f64>,
    /// 추가 단열 보정 [%]. 0~50으로 제한된다.
    #[serde(default)]
    pub insulation_correction_pct: Option<f64>,
    /// 보조금 [€]
    #[serde(default)]
    pub subsidy: Option<f64>,
}

/// 히트펌프 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatPumpResult {
    /// 필요 출력 [kW]
    pub required_power_kw: f64,
    /// 히트펌프 전력 소비 [kWh/년]
    pub electricity_use_kwh: f64,
    /// 하이브리드 잔여 가스 [m³/년]
    pub remaining_gas_m3: f64,
    pub current_costs: f64,
    pub new_costs: f64,
    pub net_savings: f64,
    pub gas_savings_m3: f64,
    pub co2_reduction_kg: f64,
    pub payback_years: Option<f64>,
    /// 출력 [kW]과 순절감 [€/년]의 시나리오 범위
    pub power_range: ScenarioRange<f64>,
    pub savings_range: ScenarioRange<f64>,
}

/// 추가 단열 보정 상한 [%]
pub const MAX_INSULATION_CORRECTION_PCT: f64 = 50.0;
const DEFAULT_COP: f64 = 4.0;
const SCENARIO_DEMAND_SPREAD: f64 = 0.1;
const SCENARIO_COP_SPREAD: f64 = 0.5;
const MIN_SCENARIO_COP: f64 = 1.0;

struct Operating {
    power_kw: f64,
    electricity_kwh: f64,
    remaining_gas_m3: f64,
    new_costs: f64,
}

fn operate(input: &HeatPumpInput, heat_demand_kwh: f64, cop: f64) -> Operating {
    let power_kw = heat_demand_kwh * 8.0 / FULL_LOAD_HOURS;
    let coverage = input.heat_pump_type.coverage();
    let electricity_kwh = heat_demand_kwh * coverage / cop;
    let remaining_gas_m3 = match input.heat_pump_type {
        HeatPumpType::Hybrid => input.annual_gas_m3 * (1.0 - coverage),
        HeatPumpType::AllElectric => 0.0,
    };
    let new_costs = electricity_kwh * input.electricity_price + remaining_gas_m3 * input.gas_price;
    Operating {
        power_kw,
        electricity_kwh,
        remaining_gas_m3,
        new_costs,
    }
}

/// 가스 사용량을 열수요로 환산해 히트펌프 출력, 전력 소비, 절감액을 계산한다.
pub fn calculate(input: &HeatPumpInput) -> HeatPumpResult {
    let cop = input.cop.unwrap_or(DEFAULT_COP);
    let correction = input
        .insulation_correction_pct
        .unwrap_or(0.0)
        .clamp(0.0, MAX_INSULATION_CORRECTION_PCT);

    let heat_demand = input.annual_gas_m3
        * GAS_KWH_PER_M3
        * house_factor(input.house_type)
        * input.insulation.demand_factor()
        * (1.0 - correction / 100.0);

    let current_costs = input.annual_gas_m3 * input.gas_price;
    let normal = operate(input, heat_demand, cop);
    let net_savings = current_costs - normal.new_costs;
    let gas_savings = input.annual_gas_m3 - normal.remaining_gas_m3;

    let optimistic = operate(
        input,
        heat_demand * (1.0 - SCENARIO_DEMAND_SPREAD),
        cop + SCENARIO_COP_SPREAD,
    );
    let pessimistic = operate(
        input,
        heat_demand * (1.0 + SCENARIO_DEMAND_SPREAD),
        (cop - SCENARIO_COP_SPREAD).max(MIN_SCENARIO_COP),
    );

    let net_investment = (input.installation_cost.unwrap_or(0.0) - input.subsidy.unwrap_or(0.0)).max(0.0);

    HeatPumpResult {
        required_power_kw: round1(normal.power_kw),
        electricity_use_kwh: round0(normal.electricity_kwh),
        remaining_gas_m3: round0(normal.remaining_gas_m3),
        current_costs: round2(current_costs),
        new_costs: round2(normal.new_costs),
        net_savings: round2(net_savings),
        gas_savings_m3: round0(gas_savings),
        co2_reduction_kg: round0(gas_savings * CO2_KG_PER_M3_GAS),
        payback_years: simple_payback(net_investment, net_savings).map(round1),
        power_range: ScenarioRange {
            optimistic: round1(optimistic.power_kw),
            normal: round1(normal.power_kw),
            pessimistic: round1(pessimistic.power_kw),
        },
        savings_range: ScenarioRange {
            optimistic: round2(current_costs - optimistic.new_costs),
            normal: round2(net_savings),
            pessimistic: round2(current_costs - pessimistic.new_costs),
        },
    }
}
