use serde::{Deserialize, Serialize};

use crate::dwelling::{simple_payback, DEFAULT_ELECTRICITY_PRICE, DEFAULT_FEED_IN_TARIFF};
use crate::rounding::{round1, round2};

/// 배터리 설치 목적.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatteryGoal {
    /// 자가소비 증대
    SelfConsumption,
    /// 정전 대비 백업
    Backup,
    /// 동적 요금제 활용
    Dynamic,
}

/// 가정용 배터리 계산 입력.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeBatteryInput {
    /// 태양광 용량 [kWp]
    pub pv_power_kwp: f64,
    /// 연간 사용량 [kWh]
    pub annual_consumption_kwh: f64,
    /// 연간 발전량 [kWh]. 없으면 kWp × 850으로 추정한다.
    #[serde(default)]
    pub annual_generation_kwh: Option<f64>,
    pub goal: BatteryGoal,
    /// 백업 목표 시간 [h], 기본 4
    #[serde(default)]
    pub autonomy_hours: Option<f64>,
    #[serde(default)]
    pub net_metering: Option<bool>,
    #[serde(default)]
    pub electricity_price: Option<f64>,
    #[serde(default)]
    pub feed_in_tariff: Option<f64>,
    /// 배터리 투자비 [€]
    #[serde(default)]
    pub investment: Option<f64>,
}

/// 가정용 배터리 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeBatteryResult {
    pub recommended_capacity_kwh: f64,
    pub min_capacity_kwh: f64,
    pub max_capacity_kwh: f64,
    /// 배터리 없을 때 자가소비율 [%]
    pub self_consumption_without_pct: f64,
    /// 배터리 있을 때 자가소비율 [%]
    pub self_consumption_with_pct: f64,
    pub annual_savings: f64,
    pub payback_years: Option<f64>,
    pub advice: String,
}

const YIELD_KWH_PER_KWP: f64 = 850.0;
const SELF_USE_SHARE_WITHOUT: f64 = 0.35;
const SELF_USE_SHARE_WITH: f64 = 0.70;
const MIN_BACKUP_CAPACITY_KWH: f64 = 5.0;
/// 상계 적용 중 역송 비용 [€/kWh]
const FEED_IN_COST: f64 = 0.13;

/// 배터리 용량 범위와 자가소비 증가에 따른 절감액을 계산한다.
pub fn calculate(input: &HomeBatteryInput) -> HomeBatteryResult {
    let consumption = input.annual_consumption_kwh;
    let kwp = input.pv_power_kwp;
    let autonomy = input.autonomy_hours.unwrap_or(4.0);
    let net_metering = input.net_metering.unwrap_or(true);
    let price = input.electricity_price.unwrap_or(DEFAULT_ELECTRICITY_PRICE);
    let feed_in = input.feed_in_tariff.unwrap_or(DEFAULT_FEED_IN_TARIFF);

    let generation = match input.annual_generation_kwh {
        Some(g) if g > 0.0 => g,
        _ => kwp * YIELD_KWH_PER_KWP,
    };

    let self_use_without = consumption.min(generation * SELF_USE_SHARE_WITHOUT);
    let self_use_with = consumption.min(generation * SELF_USE_SHARE_WITH);
    let pct = |v: f64| if generation > 0.0 { v / generation * 100.0 } else { 0.0 };
    let without_pct = pct(self_use_without);
    let with_pct = pct(self_use_with);

    let (recommended, min, max) = match input.goal {
        BatteryGoal::Backup => {
            let hourly = consumption / (365.0 * 24.0);
            let needed = hourly * autonomy;
            (needed.max(MIN_BACKUP_CAPACITY_KWH), needed, needed * 1.5)
        }
        BatteryGoal::SelfConsumption | BatteryGoal::Dynamic => (kwp * 1.25, kwp, kwp * 1.5),
    };

    let extra_self_use = self_use_with - self_use_without;
    let annual_savings = if net_metering {
        extra_self_use * FEED_IN_COST
    } else {
        extra_self_use * (price - feed_in)
    };

    let mut advice = format!(
        "Voor {kwp} kWp zonnepanelen is een batterij van {} kWh aanbevolen (range: {} - {} kWh).",
        round1(recommended),
        round1(min),
        round1(max)
    );
    advice.push_str(&format!(
        " Zelfconsumptie stijgt van {}% naar {}%.",
        round1(without_pct),
        round1(with_pct)
    ));
    if net_metering {
        advice.push_str(
            " Momenteel met saldering is de financiële besparing beperkt. Na afbouw saldering wordt een batterij financieel interessanter.",
        );
    }

    HomeBatteryResult {
        recommended_capacity_kwh: round1(recommended),
        min_capacity_kwh: round1(min),
        max_capacity_kwh: round1(max),
        self_consumption_without_pct: round1(without_pct),
        self_consumption_with_pct: round1(with_pct),
        annual_savings: round2(annual_savings),
        payback_years: input
            .investment
            .and_then(|inv| simple_payback(inv, annual_savings))
            .map(round1),
        advice,
    }
}
