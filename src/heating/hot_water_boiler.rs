use serde::{Deserialize, Serialize};

use crate::dwelling::{simple_payback, DEFAULT_ELECTRICITY_PRICE, DEFAULT_GAS_PRICE, GAS_KWH_PER_M3};
use crate::rounding::{round0, round1, round2};

/// 1인당 온수 수요 수준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HotWaterDemand {
    Low,
    Average,
    High,
}

impl HotWaterDemand {
    /// 1인 1일 온수량 [L].
    pub fn litres_per_person(self) -> f64 {
        match self {
            HotWaterDemand::Low => 30.0,
            HotWaterDemand::Average => 40.0,
            HotWaterDemand::High => 60.0,
        }
    }
}

/// 현재 급탕 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurrentHotWaterSystem {
    CvBoiler,
    Electric,
    None,
}

/// 히트펌프 보일러 설치 위치.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoilerLocation {
    Indoor,
    Outdoor,
    VentilationAir,
}

impl BoilerLocation {
    /// 계절 성능계수(SCOP).
    pub fn scop(self) -> f64 {
        match self {
            BoilerLocation::Indoor => 3.5,
            BoilerLocation::VentilationAir => 3.0,
            BoilerLocation::Outdoor => 2.5,
        }
    }
}

/// 추천 보일러 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoilerKind {
    Electric,
    HeatPump,
}

/// 온수 보일러 계산 입력.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotWaterBoilerInput {
    pub occupants: u32,
    #[serde(default)]
    pub demand: Option<HotWaterDemand>,
    pub current_system: CurrentHotWaterSystem,
    #[serde(default)]
    pub electricity_price: Option<f64>,
    #[serde(default)]
    pub gas_price: Option<f64>,
    /// 1인 하루 샤워 시간 [분], 기본 8
    #[serde(default)]
    pub shower_minutes_per_day: Option<f64>,
    /// 1인 주간 목욕 횟수, 기본 0
    #[serde(default)]
    pub baths_per_week: Option<f64>,
    #[serde(default)]
    pub location: Option<BoilerLocation>,
    #[serde(default)]
    pub investment: Option<f64>,
}

/// 방식별 연간 소비량과 비용.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemCost {
    /// kWh (전기) 또는 m³ (가스)
    pub consumption: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemComparison {
    pub electric: SystemCost,
    pub cv: SystemCost,
    pub heat_pump: SystemCost,
}

/// 온수 보일러 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotWaterBoilerResult {
    /// 추천 용량 [L]
    pub recommended_volume_l: f64,
    /// 추천 히터 출력 [kW]
    pub recommended_power_kw: f64,
    pub recommended_kind: BoilerKind,
    pub annual_consumption_kwh: f64,
    pub annual_cost: f64,
    /// CV 보일러 대비 절감 [€/년]
    pub savings_vs_cv: Option<f64>,
    pub comparison: SystemComparison,
    pub payback_years: Option<f64>,
    /// 레지오넬라 살균 가열 [kWh/년]
    pub legionella_kwh: f64,
    pub advice: String,
}

const SHOWER_LITRES_PER_MIN: f64 = 7.0;
const BATH_LITRES: f64 = 150.0;
const KITCHEN_LITRES_PER_PERSON: f64 = 5.0;
const WATER_KJ_PER_L_K: f64 = 4.186;
const DELTA_T_K: f64 = 50.0;
/// 주 1회 60°C 살균, 회당 약 2 kWh
const LEGIONELLA_KWH_PER_YEAR: f64 = 2.0 * 52.0;

/// 샤워/목욕 습관에서 온수 수요를 추정하고 전기, CV, 히트펌프 보일러를 비교한다.
pub fn calculate(input: &HotWaterBoilerInput) -> HotWaterBoilerResult {
    let persons = f64::from(input.occupants.max(1));
    let demand = input.demand.unwrap_or(HotWaterDemand::Average);
    let electricity_price = input.electricity_price.unwrap_or(DEFAULT_ELECTRICITY_PRICE);
    let gas_price = input.gas_price.unwrap_or(DEFAULT_GAS_PRICE);
    let shower_minutes = input.shower_minutes_per_day.unwrap_or(8.0);
    let baths = input.baths_per_week.unwrap_or(0.0);
    let location = input.location.unwrap_or(BoilerLocation::Indoor);

    let litres_per_day = shower_minutes * SHOWER_LITRES_PER_MIN * persons
        + baths * BATH_LITRES * persons / 7.0
        + persons * KITCHEN_LITRES_PER_PERSON;
    let per_person = litres_per_day / persons;
    let per_person = if per_person > 0.0 {
        per_person
    } else {
        demand.litres_per_person()
    };

    let volume = (persons * per_person * 1.5).ceil();
    // 100 L를 10°C → 60°C로 1시간에 가열하는 데 약 5.8 kW
    let power_kw = (volume / 100.0 * 5.8).max(2.0);
    let kind = if input.occupants >= 4 || demand == HotWaterDemand::High {
        BoilerKind::HeatPump
    } else {
        BoilerKind::Electric
    };

    let litres_per_year = persons * per_person * 365.0;
    let energy_kwh = litres_per_year * WATER_KJ_PER_L_K * DELTA_T_K / 3600.0;

    let electric_kwh = energy_kwh;
    let electric_cost = electric_kwh * electricity_price;
    let cv_m3 = energy_kwh / GAS_KWH_PER_M3;
    let cv_cost = cv_m3 * gas_price;
    let heat_pump_kwh = energy_kwh / location.scop() + LEGIONELLA_KWH_PER_YEAR;
    let heat_pump_cost = heat_pump_kwh * electricity_price;

    let (annual_kwh, annual_cost) = match kind {
        BoilerKind::HeatPump => (heat_pump_kwh, heat_pump_cost),
        BoilerKind::Electric => (electric_kwh, electric_cost),
    };

    // 차이가 없으면 비교 항목 자체를 뺀다
    let savings_vs_cv = match input.current_system {
        CurrentHotWaterSystem::CvBoiler => Some(round2(cv_cost - annual_cost)).filter(|s| *s != 0.0),
        CurrentHotWaterSystem::Electric | CurrentHotWaterSystem::None => None,
    };
    let payback_years = match (input.investment, savings_vs_cv) {
        (Some(inv), Some(savings)) => simple_payback(inv, savings).map(round1),
        _ => None,
    };

    let mut advice = format!(
        "Voor {} personen is een {} liter boiler aanbevolen.",
        input.occupants, volume
    );
    advice.push_str(match kind {
        BoilerKind::HeatPump => " Type: warmtepompboiler.",
        BoilerKind::Electric => " Type: elektrische boiler.",
    });
    advice.push_str(&format!(
        " Jaarlijkse kosten: ongeveer €{}.",
        round0(annual_cost)
    ));
    if let Some(savings) = savings_vs_cv.filter(|s| *s > 0.0) {
        advice.push_str(&format!(
            " Besparing ten opzichte van CV-boiler: €{} per jaar.",
            round0(savings)
        ));
    }

    HotWaterBoilerResult {
        recommended_volume_l: volume,
        recommended_power_kw: round1(power_kw),
        recommended_kind: kind,
        annual_consumption_kwh: round0(annual_kwh),
        annual_cost: round2(annual_cost),
        savings_vs_cv,
        comparison: SystemComparison {
            electric: SystemCost {
                consumption: round0(electric_kwh),
                cost: round2(electric_cost),
            },
            cv: SystemCost {
                consumption: round0(cv_m3),
                cost: round2(cv_cost),
            },
            heat_pump: SystemCost {
                consumption: round0(heat_pump_kwh),
                cost: round2(heat_pump_cost),
            },
        },
        payback_years,
        legionella_kwh: round0(LEGIONELLA_KWH_PER_YEAR),
        advice,
    }
}
