use serde::{Deserialize, Serialize};

use crate::dwelling::{
    simple_payback, DEFAULT_ELECTRICITY_PRICE, DEFAULT_GAS_PRICE, FULL_LOAD_HOURS, GAS_KWH_PER_M3,
};
use crate::rounding::{round0, round1, round2};

/// 현재 보일러 연식 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoilerAge {
    /// 구형 (효율 75%)
    Old,
    /// 보통 (효율 90%)
    Reasonable,
    /// 신형 HR (효율 96%)
    New,
}

impl BoilerAge {
    pub fn efficiency(self) -> f64 {
        match self {
            BoilerAge::Old => 0.75,
            BoilerAge::Reasonable => 0.90,
            BoilerAge::New => 0.96,
        }
    }
}

/// 교체 후 희망 시스템.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DesiredSystem {
    HrBoiler,
    Hybrid,
}

/// CV 보일러 교체 계산 입력.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoilerReplacementInput {
    pub annual_gas_m3: f64,
    pub current_boiler: BoilerAge,
    pub occupants: u32,
    pub desired_system: DesiredSystem,
    #[serde(default)]
    pub gas_price: Option<f64>,
    #[serde(default)]
    pub electricity_price: Option<f64>,
    /// 현 보일러 사용 연수 [년]
    #[serde(default)]
    pub boiler_age_years: Option<f64>,
    /// 설치비 [€]
    #[serde(default)]
    pub installation_cost: Option<f64>,
}

/// 하이브리드 선택 시 추가 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HybridAdvice {
    pub heat_pump_power_kw: f64,
    pub gas_savings_m3: f64,
    pub cost_savings: f64,
}

/// CV 보일러 교체 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoilerReplacementResult {
    pub required_power_kw: f64,
    /// 급탕 CW 등급 안내
    pub tap_water_class: String,
    /// 현재 효율 [%]
    pub current_efficiency_pct: f64,
    /// 신규 효율 [%]
    pub new_efficiency_pct: f64,
    pub gas_savings_m3: f64,
    pub cost_savings: f64,
    pub hybrid: Option<HybridAdvice>,
    /// 교체 권장 여부
    pub replacement_advised: bool,
    pub payback_years: Option<f64>,
}

/// HR 보일러 효율
pub const NEW_BOILER_EFFICIENCY: f64 = 0.96;
/// 이 연수 이상이면 교체를 권장한다.
pub const REPLACEMENT_AGE_YEARS: f64 = 15.0;
const HYBRID_HEAT_SHARE: f64 = 0.5;
const HYBRID_POWER_SHARE: f64 = 0.4;
const HYBRID_COP: f64 = 4.0;

/// 인원수에 따른 급탕 CW 등급.
pub fn tap_water_class(occupants: u32) -> &'static str {
    if occupants <= 2 {
        "CW3 (20 kW tapwater)"
    } else if occupants <= 4 {
        "CW4 (25-30 kW tapwater)"
    } else {
        "CW5 (35-40 kW tapwater)"
    }
}

/// 효율 향상에 따른 가스 절감과 하이브리드 대안을 계산한다.
pub fn calculate(input: &BoilerReplacementInput) -> BoilerReplacementResult {
    let gas = input.annual_gas_m3;
    let gas_price = input.gas_price.unwrap_or(DEFAULT_GAS_PRICE);
    let electricity_price = input.electricity_price.unwrap_or(DEFAULT_ELECTRICITY_PRICE);
    let current_efficiency = input.current_boiler.efficiency();

    let power_kw = gas * 8.0 / FULL_LOAD_HOURS;
    let gas_savings = gas * (1.0 - current_efficiency / NEW_BOILER_EFFICIENCY);
    let cost_savings = gas_savings * gas_price;

    let hybrid = match input.desired_system {
        DesiredSystem::Hybrid => {
            let hybrid_gas_savings = gas * HYBRID_HEAT_SHARE;
            let heat_kwh = gas * GAS_KWH_PER_M3 * HYBRID_HEAT_SHARE;
            let electricity_cost = heat_kwh / HYBRID_COP * electricity_price;
            let gas_cost = (gas - hybrid_gas_savings) * gas_price;
            Some(HybridAdvice {
                heat_pump_power_kw: round1(power_kw * HYBRID_POWER_SHARE),
                gas_savings_m3: round0(hybrid_gas_savings),
                cost_savings: round2(gas * gas_price - (electricity_cost + gas_cost)),
            })
        }
        DesiredSystem::HrBoiler => None,
    };

    let replacement_advised = input.current_boiler == BoilerAge::Old
        || input
            .boiler_age_years
            .is_some_and(|age| age >= REPLACEMENT_AGE_YEARS);

    BoilerReplacementResult {
        required_power_kw: round1(power_kw),
        tap_water_class: tap_water_class(input.occupants).to_string(),
        current_efficiency_pct: round0(current_efficiency * 100.0),
        new_efficiency_pct: round0(NEW_BOILER_EFFICIENCY * 100.0),
        gas_savings_m3: round0(gas_savings),
        cost_savings: round2(cost_savings),
        hybrid,
        replacement_advised,
        payback_years: input
            .installation_cost
            .and_then(|cost| simple_payback(cost, cost_savings))
            .map(round1),
    }
}
