use serde::{Deserialize, Serialize};

use crate::dwelling::DEFAULT_FEED_IN_TARIFF;
use crate::rounding::{round0, round1, round2};

/// 지붕 방위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoofOrientation {
    South,
    SouthEast,
    SouthWest,
    East,
    West,
    North,
}

impl RoofOrientation {
    pub const ALL: [RoofOrientation; 6] = [
        RoofOrientation::South,
        RoofOrientation::SouthEast,
        RoofOrientation::SouthWest,
        RoofOrientation::East,
        RoofOrientation::West,
        RoofOrientation::North,
    ];

    /// 방위별 발전 계수 [kWh/Wp/년].
    pub fn yield_factor(self) -> f64 {
        match self {
            RoofOrientation::South => 0.85,
            RoofOrientation::SouthEast | RoofOrientation::SouthWest => 0.80,
            RoofOrientation::East | RoofOrientation::West => 0.70,
            RoofOrientation::North => 0.50,
        }
    }
}

/// 태양광 계산 입력.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarPanelsInput {
    /// 연간 전력 사용량 [kWh]
    pub annual_consumption_kwh: f64,
    pub roof_orientation: RoofOrientation,
    /// 지붕 경사 [°]
    pub roof_tilt_deg: f64,
    /// 지붕 면적 [m²] (참고용)
    #[serde(default)]
    pub roof_area_m2: Option<f64>,
    /// 패널 1장 출력 [Wp]
    pub panel_power_wp: f64,
    /// 전력 단가 [€/kWh]
    pub electricity_price: f64,
    /// 음영 비율 [%] (0~50)
    #[serde(default)]
    pub shading_pct: Option<f64>,
    /// 투자비 [€]. 없으면 kWp당 €1000으로 추정한다.
    #[serde(default)]
    pub investment: Option<f64>,
    /// 상계(saldering) 적용 여부, 기본 true
    #[serde(default)]
    pub net_metering: Option<bool>,
    /// 역송 보상 단가 [€/kWh]
    #[serde(default)]
    pub feed_in_tariff: Option<f64>,
    /// 가정용 배터리 보유 여부
    #[serde(default)]
    pub home_battery: Option<bool>,
}

/// 태양광 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarPanelsResult {
    /// 사용량을 충당하는 데 필요한 용량 [kWp]
    pub required_power_kwp: f64,
    pub panel_count: u32,
    /// 연간 발전량 [kWh]
    pub annual_generation_kwh: f64,
    /// 연간 절감액 [€]
    pub annual_savings: f64,
    /// 회수기간 [년]
    pub payback_years: Option<f64>,
    /// 사용량 대비 발전량 [%]
    pub coverage_pct: f64,
    pub savings_with_net_metering: f64,
    pub savings_without_net_metering: f64,
    /// 배터리 사용 시 자가소비율 [%]
    pub self_consumption_with_battery_pct: Option<f64>,
}

const OPTIMAL_TILT_DEG: f64 = 35.0;
const SELF_CONSUMPTION_SHARE: f64 = 0.30;
const SELF_CONSUMPTION_SHARE_BATTERY: f64 = 0.70;
const ESTIMATED_COST_PER_KWP: f64 = 1000.0;

/// 최적 경사(35°)에서 벗어난 정도에 따른 보정 계수.
pub fn tilt_factor(tilt_deg: f64) -> f64 {
    let diff = (tilt_deg - OPTIMAL_TILT_DEG).abs();
    if diff <= 10.0 {
        1.0
    } else if diff <= 20.0 {
        0.95
    } else if diff <= 30.0 {
        0.9
    } else {
        0.85
    }
}

/// 패널 수량, 발전량, 상계 유무별 절감액을 계산한다.
pub fn calculate(input: &SolarPanelsInput) -> SolarPanelsResult {
    let consumption = input.annual_consumption_kwh;
    let shading = input.shading_pct.unwrap_or(0.0);
    let net_metering = input.net_metering.unwrap_or(true);
    let feed_in = input.feed_in_tariff.unwrap_or(DEFAULT_FEED_IN_TARIFF);
    let battery = input.home_battery.unwrap_or(false);

    let yield_factor = input.roof_orientation.yield_factor()
        * tilt_factor(input.roof_tilt_deg)
        * (1.0 - shading / 100.0);
    let yield_per_kwp = yield_factor * 1000.0;

    let required_kwp = consumption / yield_per_kwp;
    let panel_count = ((required_kwp * 1000.0) / input.panel_power_wp).ceil().max(0.0);
    let installed_kwp = panel_count * input.panel_power_wp / 1000.0;
    let generation = installed_kwp * yield_per_kwp;

    let self_use_plain = consumption.min(generation * SELF_CONSUMPTION_SHARE);
    let self_use = if battery {
        consumption.min(generation * SELF_CONSUMPTION_SHARE_BATTERY)
    } else {
        self_use_plain
    };
    let exported = (generation - self_use).max(0.0);

    let with_net_metering = generation.min(consumption) * input.electricity_price;
    let without_net_metering = self_use * input.electricity_price + exported * feed_in;
    let annual_savings = if net_metering {
        with_net_metering
    } else {
        without_net_metering
    };

    // 투자비 미입력 시 설치 용량 기준 추정
    let investment = match input.investment {
        Some(v) if v > 0.0 => v,
        _ => installed_kwp * ESTIMATED_COST_PER_KWP,
    };
    let payback_years = if investment > 0.0 && annual_savings > 0.0 {
        Some(round1(investment / annual_savings))
    } else {
        None
    };

    let coverage_pct = if consumption > 0.0 {
        generation / consumption * 100.0
    } else {
        0.0
    };
    let self_consumption_with_battery_pct = if battery && generation > 0.0 {
        Some(round1(self_use / generation * 100.0))
    } else {
        None
    };

    SolarPanelsResult {
        required_power_kwp: round1(required_kwp),
        panel_count: panel_count as u32,
        annual_generation_kwh: round0(generation),
        annual_savings: round2(annual_savings),
        payback_years,
        coverage_pct: round1(coverage_pct),
        savings_with_net_metering: round2(with_net_metering),
        savings_without_net_metering: round2(without_net_metering),
        self_consumption_with_battery_pct,
    }
}
