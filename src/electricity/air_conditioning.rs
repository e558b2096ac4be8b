use serde::{Deserialize, Serialize};

use crate::dwelling::{CO2_KG_PER_KWH, DEFAULT_ELECTRICITY_PRICE};
use crate::rounding::{round0, round1, round2};

/// 실내 단열 수준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomInsulation {
    Good,
    Average,
    Poor,
}

impl RoomInsulation {
    /// 체적당 필요 냉방 출력 [W/m³].
    pub fn watts_per_m3(self) -> f64 {
        match self {
            RoomInsulation::Good => 30.0,
            RoomInsulation::Average => 40.0,
            RoomInsulation::Poor => 50.0,
        }
    }

    fn label_nl(self) -> &'static str {
        match self {
            RoomInsulation::Good => "goed",
            RoomInsulation::Average => "gemiddeld",
            RoomInsulation::Poor => "slecht",
        }
    }
}

/// 용도: 냉방 전용 또는 냉난방.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AirconApplication {
    Cooling,
    CoolingHeating,
}

/// 일사량.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SunExposure {
    None,
    Moderate,
    Much,
}

impl SunExposure {
    fn surcharge(self) -> f64 {
        match self {
            SunExposure::None => 0.0,
            SunExposure::Moderate => 0.1,
            SunExposure::Much => 0.2,
        }
    }
}

/// 시스템 구성 추천.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitAdvice {
    Split,
    MultiSplit,
}

/// 에어컨 용량 계산 입력.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirConditioningInput {
    /// 바닥 면적 [m²]
    pub floor_area_m2: f64,
    /// 천장 높이 [m]
    pub ceiling_height_m: f64,
    pub insulation: RoomInsulation,
    pub application: AirconApplication,
    /// 연간 냉방 시간 [h], 기본 720 (8h × 90일)
    #[serde(default)]
    pub cooling_hours_per_year: Option<f64>,
    #[serde(default)]
    pub electricity_price: Option<f64>,
    /// 재실 인원, 기본 2
    #[serde(default)]
    pub occupants: Option<u32>,
    /// 창 면적 [m²]
    #[serde(default)]
    pub window_area_m2: Option<f64>,
    #[serde(default)]
    pub sun_exposure: Option<SunExposure>,
    /// 냉방할 방 개수, 기본 1
    #[serde(default)]
    pub rooms: Option<u32>,
}

/// 에어컨 용량 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirConditioningResult {
    pub required_capacity_kw: f64,
    pub required_capacity_btu: f64,
    pub room_volume_m3: f64,
    pub annual_consumption_kwh: f64,
    pub annual_cost: f64,
    pub split_advice: SplitAdvice,
    pub co2_kg: f64,
    pub advice: String,
}

/// 최소 추천 용량 [kW]
pub const MIN_CAPACITY_KW: f64 = 2.0;
const EXPERT_THRESHOLD_KW: f64 = 7.0;
const BTU_PER_KW: f64 = 3412.0;
/// 정격 대비 평균 소비 비율
const AVERAGE_LOAD_SHARE: f64 = 0.75;

/// 체적, 단열, 일사, 인원, 창 면적으로 냉방 용량을 구한다. 결과는 최소 2 kW.
pub fn calculate(input: &AirConditioningInput) -> AirConditioningResult {
    let hours = input.cooling_hours_per_year.unwrap_or(720.0);
    let price = input.electricity_price.unwrap_or(DEFAULT_ELECTRICITY_PRICE);
    let occupants = f64::from(input.occupants.unwrap_or(2));
    let sun = input.sun_exposure.unwrap_or(SunExposure::Moderate);
    let rooms = input.rooms.unwrap_or(1);

    let volume = input.floor_area_m2 * input.ceiling_height_m;
    let occupant_watts = (occupants - 2.0) * 100.0;
    let window_watts = input.window_area_m2.unwrap_or(0.0) * 5.0;
    let watts = volume * input.insulation.watts_per_m3() * (1.0 + sun.surcharge())
        + occupant_watts
        + window_watts;

    let capacity_kw = (watts / 1000.0).max(MIN_CAPACITY_KW);
    let capacity_btu = capacity_kw * BTU_PER_KW;
    let split_advice = if rooms > 1 {
        SplitAdvice::MultiSplit
    } else {
        SplitAdvice::Split
    };

    let consumption = capacity_kw * AVERAGE_LOAD_SHARE * hours;
    let cost = consumption * price;

    let mut advice = format!(
        "Voor een ruimte van {} m³ met {} isolatie is een {} airco van ongeveer {} kW ({}k BTU) geschikt.",
        round0(volume),
        input.insulation.label_nl(),
        match split_advice {
            SplitAdvice::MultiSplit => "multi-split",
            SplitAdvice::Split => "split",
        },
        round1(capacity_kw),
        round0(capacity_btu / 1000.0)
    );
    if capacity_kw > EXPERT_THRESHOLD_KW {
        advice.push_str(" Raadpleeg een expert voor advies op maat.");
    }
    if input.insulation == RoomInsulation::Poor {
        advice.push_str(" Overweeg eerst isolatie te verbeteren voor betere energie-efficiëntie.");
    }
    if rooms > 1 {
        advice.push_str(&format!(" Voor {rooms} ruimtes is een multi-split systeem aanbevolen."));
    }

    AirConditioningResult {
        required_capacity_kw: round1(capacity_kw),
        required_capacity_btu: round0(capacity_btu),
        room_volume_m3: round0(volume),
        annual_consumption_kwh: round0(consumption),
        annual_cost: round2(cost),
        split_advice,
        co2_kg: round0(consumption * CO2_KG_PER_KWH),
        advice,
    }
}
