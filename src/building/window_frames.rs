use serde::{Deserialize, Serialize};

use crate::dwelling::{
    simple_payback, GlazingType, HouseType, CO2_KG_PER_M3_GAS, DEFAULT_GAS_PRICE,
};
use crate::rounding::{round0, round1, round2};

/// 창틀 재질.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameMaterial {
    Wood,
    Plastic,
    Aluminium,
}

/// 창호 교체 계산 입력.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowFramesInput {
    /// 창 면적 [m²]
    pub window_area_m2: f64,
    #[serde(default)]
    pub current_glazing: Option<GlazingType>,
    pub frame_material: FrameMaterial,
    pub annual_gas_m3: f64,
    #[serde(default)]
    pub gas_price: Option<f64>,
    #[serde(default)]
    pub house_type: Option<HouseType>,
    #[serde(default)]
    pub construction_year: Option<i32>,
    #[serde(default)]
    pub investment: Option<f64>,
}

/// 창호 교체 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowFramesResult {
    /// 적용된 현재 유리 종류
    pub glazing: GlazingType,
    /// 현재 열관류율 [W/m²K]
    pub current_u_value: f64,
    /// 교체 후 열관류율 [W/m²K]
    pub new_u_value: f64,
    /// 열손실 감소 [W/K]
    pub heat_loss_reduction_w_per_k: f64,
    pub gas_savings_m3: f64,
    pub cost_savings: f64,
    pub co2_reduction_kg: f64,
    pub comfort: String,
    pub payback_years: Option<f64>,
    pub investment: f64,
}

/// HR++ 교체 후 U값 [W/m²K].
pub const NEW_U_VALUE: f64 = 1.1;
/// 면적당 기본 투자비 [€/m²].
pub const INVESTMENT_PER_M2: f64 = 225.0;

pub fn u_value(glazing: GlazingType) -> f64 {
    match glazing {
        GlazingType::Single => 5.7,
        GlazingType::Double => 2.8,
        GlazingType::Hr => 1.2,
    }
}

/// 준공 연도로 추정한 유리 종류. 연도를 모르면 복층.
pub fn default_glazing(construction_year: Option<i32>) -> GlazingType {
    match construction_year {
        None => GlazingType::Double,
        Some(year) if year < 1980 => GlazingType::Single,
        Some(year) if year < 2000 => GlazingType::Double,
        Some(_) => GlazingType::Hr,
    }
}

/// 창 1 m²당 연간 가스 절감 [m³].
fn savings_per_m2(glazing: GlazingType, house: HouseType) -> f64 {
    let row: [f64; 5] = match glazing {
        GlazingType::Single => [6.5, 9.75, 13.0, 14.5, 16.0],
        GlazingType::Double => [1.6, 2.4, 3.25, 3.5, 4.0],
        GlazingType::Hr => [0.5, 0.75, 1.0, 1.2, 1.5],
    };
    match house {
        HouseType::Apartment => row[0],
        HouseType::Terraced => row[1],
        HouseType::Corner => row[2],
        HouseType::SemiDetached => row[3],
        HouseType::Detached => row[4],
    }
}

pub fn calculate(input: &WindowFramesInput) -> WindowFramesResult {
    let glazing = input
        .current_glazing
        .unwrap_or_else(|| default_glazing(input.construction_year));
    let house = input.house_type.unwrap_or(HouseType::Terraced);
    let gas_price = input.gas_price.unwrap_or(DEFAULT_GAS_PRICE);
    let area = input.window_area_m2;

    let current_u = u_value(glazing);
    let heat_loss_reduction = (current_u - NEW_U_VALUE) * area;
    let gas = savings_per_m2(glazing, house) * area;
    let cost = gas * gas_price;
    let investment = input
        .investment
        .filter(|v| *v > 0.0)
        .unwrap_or(area * INVESTMENT_PER_M2);

    let mut comfort = String::from(
        "Nieuwe kozijnen met HR++ glas verbeteren het comfort door: \
         minder tocht, betere geluidsisolatie, en minder condensvorming.",
    );
    if glazing == GlazingType::Single {
        comfort.push_str(" De verbetering is zeer significant ten opzichte van enkel glas.");
    }

    WindowFramesResult {
        glazing,
        current_u_value: round1(current_u),
        new_u_value: round1(NEW_U_VALUE),
        heat_loss_reduction_w_per_k: round1(heat_loss_reduction),
        gas_savings_m3: round0(gas),
        cost_savings: round2(cost),
        co2_reduction_kg: round0(gas * CO2_KG_PER_M3_GAS),
        comfort,
        payback_years: simple_payback(investment, cost).map(round1),
        investment: round0(investment),
    }
}
