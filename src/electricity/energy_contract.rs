use serde::{Deserialize, Serialize};

use crate::rounding::{round1, round2};

/// 계약 형태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractType {
    Fixed,
    Variable,
    /// 시간대별 동적 요금. 평균 34% 저렴한 것으로 가정한다.
    Dynamic,
}

/// 향후 가격 전망.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceOutlook {
    Stable,
    Rising,
    Falling,
}

/// 에너지 계약 비교 입력.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyContractInput {
    pub current_electricity_price: f64,
    pub current_gas_price: f64,
    pub new_electricity_price: f64,
    pub new_gas_price: f64,
    /// 연간 전력 사용량 [kWh]
    pub annual_electricity_kwh: f64,
    /// 연간 가스 사용량 [m³]
    pub annual_gas_m3: f64,
    #[serde(default)]
    pub contract_type: Option<ContractType>,
    /// 현재 기본요금 [€/년], 기본 250
    #[serde(default)]
    pub standing_charge_current: Option<f64>,
    /// 신규 기본요금 [€/년], 기본 250
    #[serde(default)]
    pub standing_charge_new: Option<f64>,
    /// 망 사업자 비용 [€/년], 기본 300
    #[serde(default)]
    pub grid_operator_costs: Option<f64>,
    #[serde(default)]
    pub green_electricity: Option<bool>,
    #[serde(default)]
    pub price_outlook: Option<PriceOutlook>,
}

/// 에너지 계약 비교 결과. `difference`가 음수이면 절감.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyContractResult {
    pub current_costs: f64,
    pub new_costs: f64,
    pub difference: f64,
    pub difference_pct: f64,
    pub monthly_difference: f64,
    pub electricity_costs_current: f64,
    pub electricity_costs_new: f64,
    pub gas_costs_current: f64,
    pub gas_costs_new: f64,
    /// 고정비 포함 총액
    pub total_costs_current: f64,
    pub total_costs_new: f64,
    pub difference_3_years: f64,
    pub difference_5_years: f64,
}

const DYNAMIC_DISCOUNT: f64 = 0.66;
const GREEN_SURCHARGE: f64 = 1.05;

/// 현재/신규 계약의 연간 비용 차이를 계산한다.
pub fn calculate(input: &EnergyContractInput) -> EnergyContractResult {
    let contract = input.contract_type.unwrap_or(ContractType::Fixed);
    let standing_current = input.standing_charge_current.unwrap_or(250.0);
    let standing_new = input.standing_charge_new.unwrap_or(250.0);
    let grid_costs = input.grid_operator_costs.unwrap_or(300.0);
    let outlook = input.price_outlook.unwrap_or(PriceOutlook::Stable);

    let (mut new_electricity_price, new_gas_price) = match contract {
        ContractType::Dynamic => (
            input.new_electricity_price * DYNAMIC_DISCOUNT,
            input.new_gas_price * DYNAMIC_DISCOUNT,
        ),
        ContractType::Fixed | ContractType::Variable => {
            (input.new_electricity_price, input.new_gas_price)
        }
    };
    if input.green_electricity.unwrap_or(false) {
        new_electricity_price *= GREEN_SURCHARGE;
    }

    let electricity_current = input.annual_electricity_kwh * input.current_electricity_price;
    let gas_current = input.annual_gas_m3 * input.current_gas_price;
    let variable_current = electricity_current + gas_current;

    let electricity_new = input.annual_electricity_kwh * new_electricity_price;
    let gas_new = input.annual_gas_m3 * new_gas_price;
    let variable_new = electricity_new + gas_new;

    let difference = variable_new - variable_current;
    let difference_pct = if variable_current > 0.0 {
        difference / variable_current * 100.0
    } else {
        0.0
    };

    let (factor_3, factor_5) = match outlook {
        PriceOutlook::Stable => (1.0, 1.0),
        PriceOutlook::Rising => (1.1, 1.2),
        PriceOutlook::Falling => (0.9, 0.8),
    };

    EnergyContractResult {
        current_costs: round2(variable_current),
        new_costs: round2(variable_new),
        difference: round2(difference),
        difference_pct: round1(difference_pct),
        monthly_difference: round2(difference / 12.0),
        electricity_costs_current: round2(electricity_current),
        electricity_costs_new: round2(electricity_new),
        gas_costs_current: round2(gas_current),
        gas_costs_new: round2(gas_new),
        total_costs_current: round2(variable_current + standing_current + grid_costs),
        total_costs_new: round2(variable_new + standing_new + grid_costs),
        difference_3_years: round2(difference * 3.0 * factor_3),
        difference_5_years: round2(difference * 5.0 * factor_5),
    }
}
