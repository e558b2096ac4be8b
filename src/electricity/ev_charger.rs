use serde::{Deserialize, Serialize};

use crate::rounding::{round1, round2};

/// 주택 전원 상(phase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HouseConnection {
    #[serde(rename = "1-phase")]
    SinglePhase,
    #[serde(rename = "3-phase")]
    ThreePhase,
}

/// 계약 전류 용량.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridConnection {
    #[serde(rename = "25A")]
    Amp25,
    #[serde(rename = "35A")]
    Amp35,
    #[serde(rename = "unknown")]
    Unknown,
}

/// 권장 충전 시간대.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChargeMoment {
    Daytime,
    Night,
    Flexible,
}

/// EV 충전기 계산 입력.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvChargerInput {
    /// 배터리 용량 [kWh]
    pub battery_capacity_kwh: f64,
    /// 희망 완충 시간 [h]
    pub desired_charge_hours: f64,
    pub house_connection: HouseConnection,
    #[serde(default)]
    pub solar_panels: Option<bool>,
    /// 차량 모델명 (내장 충전기 한도 조회용)
    #[serde(default)]
    pub ev_model: Option<String>,
    #[serde(default)]
    pub grid_connection: Option<GridConnection>,
    #[serde(default)]
    pub dynamic_contract: Option<bool>,
    /// 주간 요금 [€/kWh], 기본 0.35
    #[serde(default)]
    pub day_tariff: Option<f64>,
    /// 야간 요금 [€/kWh], 기본 0.20
    #[serde(default)]
    pub night_tariff: Option<f64>,
}

/// EV 충전기 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvChargerResult {
    pub required_power_kw: f64,
    pub advised_power_kw: f64,
    pub charge_hours_at_advised: f64,
    pub charge_hours_at_3_7_kw: f64,
    pub charge_hours_at_7_4_kw: f64,
    pub charge_hours_at_11_kw: f64,
    pub cost_per_charge: f64,
    /// 차량 내장 충전기 최대 출력 [kW]
    pub max_onboard_charger_kw: Option<f64>,
    pub charge_moment: ChargeMoment,
    pub monthly_cost: f64,
    pub advice: String,
}

/// 주요 전기차의 내장 충전기 최대 출력 [kW].
const ONBOARD_CHARGERS: &[(&str, f64)] = &[
    ("Tesla Model 3", 11.0),
    ("Tesla Model Y", 11.0),
    ("Tesla Model S", 11.0),
    ("Tesla Model X", 11.0),
    ("Nissan Leaf", 6.6),
    ("BMW i3", 11.0),
    ("Hyundai Kona", 7.2),
    ("Kia e-Niro", 7.2),
    ("Volkswagen ID.3", 11.0),
    ("Volkswagen ID.4", 11.0),
    ("Audi e-tron", 11.0),
    ("Mercedes EQC", 11.0),
];

const CHARGES_PER_MONTH: f64 = 4.0;

/// 알려진 차량 모델 목록.
pub fn known_models() -> impl Iterator<Item = &'static str> {
    ONBOARD_CHARGERS.iter().map(|(name, _)| *name)
}

/// 모델명으로 내장 충전기 출력을 찾는다 (대소문자 무시).
pub fn onboard_charger_kw(model: &str) -> Option<f64> {
    let model = model.trim();
    ONBOARD_CHARGERS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(model))
        .map(|(_, kw)| *kw)
}

fn step_power(connection: HouseConnection, required_kw: f64) -> f64 {
    match connection {
        HouseConnection::SinglePhase => {
            if required_kw <= 3.7 {
                3.7
            } else {
                7.4
            }
        }
        HouseConnection::ThreePhase => {
            if required_kw <= 7.4 {
                7.4
            } else if required_kw <= 11.0 {
                11.0
            } else {
                22.0
            }
        }
    }
}

/// 주택 전원과 차량 한도에 맞는 충전기 출력을 추천한다.
pub fn calculate(input: &EvChargerInput) -> EvChargerResult {
    let capacity = input.battery_capacity_kwh;
    let solar = input.solar_panels.unwrap_or(false);
    let dynamic = input.dynamic_contract.unwrap_or(false);
    let day_tariff = input.day_tariff.unwrap_or(0.35);
    let night_tariff = input.night_tariff.unwrap_or(0.20);

    let required_kw = capacity / input.desired_charge_hours;
    let mut advised_kw = step_power(input.house_connection, required_kw);

    let max_onboard = input.ev_model.as_deref().and_then(onboard_charger_kw);
    let limited_by_car = matches!(max_onboard, Some(max) if advised_kw > max);
    if let Some(max) = max_onboard {
        advised_kw = advised_kw.min(max);
    }
    if input.grid_connection == Some(GridConnection::Amp25)
        && input.house_connection == HouseConnection::SinglePhase
    {
        advised_kw = advised_kw.min(7.4);
    }

    let charge_moment = if solar {
        ChargeMoment::Daytime
    } else if dynamic {
        ChargeMoment::Night
    } else {
        ChargeMoment::Flexible
    };
    let tariff = match charge_moment {
        ChargeMoment::Night => night_tariff,
        ChargeMoment::Daytime | ChargeMoment::Flexible => day_tariff,
    };
    let cost_per_charge = capacity * tariff;
    let hours_at_advised = capacity / advised_kw;

    let mut advice = format!(
        "Voor een {capacity} kWh accu en gewenste laadtijd van {} uur is een {} kW laadpaal aanbevolen.",
        input.desired_charge_hours,
        round1(advised_kw)
    );
    advice.push_str(&format!(
        " Hiermee duurt volledig laden ongeveer {} uur.",
        round1(hours_at_advised)
    ));
    if let (true, Some(max), Some(model)) = (limited_by_car, max_onboard, input.ev_model.as_deref()) {
        advice.push_str(&format!(" Let op: uw {} kan maximaal {max} kW laden.", model.trim()));
    }
    if input.house_connection == HouseConnection::SinglePhase && required_kw > 7.4 {
        advice.push_str(" Voor sneller laden is een 3-fase aansluiting nodig.");
    }
    if solar {
        advice.push_str(" Met zonnepanelen kun je overdag laden op eigen zonnestroom voor extra besparing.");
    }
    if dynamic {
        advice.push_str(" Met een dynamisch contract kun je 's nachts goedkoper laden.");
    }

    EvChargerResult {
        required_power_kw: round1(required_kw),
        advised_power_kw: round1(advised_kw),
        charge_hours_at_advised: round1(hours_at_advised),
        charge_hours_at_3_7_kw: round1(capacity / 3.7),
        charge_hours_at_7_4_kw: round1(capacity / 7.4),
        charge_hours_at_11_kw: round1(capacity / 11.0),
        cost_per_charge: round2(cost_per_charge),
        max_onboard_charger_kw: max_onboard,
        charge_moment,
        monthly_cost: round2(cost_per_charge * CHARGES_PER_MONTH),
        advice,
    }
}
