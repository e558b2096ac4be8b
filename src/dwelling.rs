//! 여러 계산기가 공유하는 주택 분류와 물리 상수.

use serde::{Deserialize, Serialize};

/// 가스 1 m³의 열량 [kWh].
pub const GAS_KWH_PER_M3: f64 = 9.5;
/// 가스 1 m³ 연소 시 CO₂ 배출량 [kg].
pub const CO2_KG_PER_M3_GAS: f64 = 1.8;
/// 전력 1 kWh당 CO₂ 배출량 [kg] (네덜란드 전력망 평균).
pub const CO2_KG_PER_KWH: f64 = 0.5;
/// 연간 난방 전부하 시간 [h].
pub const FULL_LOAD_HOURS: f64 = 1650.0;

/// 기본 가스 단가 [€/m³].
pub const DEFAULT_GAS_PRICE: f64 = 1.20;
/// 기본 전력 단가 [€/kWh].
pub const DEFAULT_ELECTRICITY_PRICE: f64 = 0.27;
/// 기본 역송 보상 단가 [€/kWh].
pub const DEFAULT_FEED_IN_TARIFF: f64 = 0.08;

/// 주택 형태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HouseType {
    /// 아파트 (appartement)
    Apartment,
    /// 연립 중간 세대 (tussenwoning)
    Terraced,
    /// 연립 끝 세대 (hoekwoning)
    Corner,
    /// 2세대 연립 (2-onder-1-kap)
    SemiDetached,
    /// 단독 주택 (vrijstaand)
    Detached,
}

impl HouseType {
    pub const ALL: [HouseType; 5] = [
        HouseType::Apartment,
        HouseType::Terraced,
        HouseType::Corner,
        HouseType::SemiDetached,
        HouseType::Detached,
    ];

    /// 네덜란드어 표기.
    pub fn label_nl(self) -> &'static str {
        match self {
            HouseType::Apartment => "appartement",
            HouseType::Terraced => "tussenwoning",
            HouseType::Corner => "hoekwoning",
            HouseType::SemiDetached => "2-onder-1-kap",
            HouseType::Detached => "vrijstaand",
        }
    }
}

/// 부위별 현재 단열 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsulationStatus {
    None,
    Moderate,
    Good,
}

impl InsulationStatus {
    pub const ALL: [InsulationStatus; 3] = [
        InsulationStatus::None,
        InsulationStatus::Moderate,
        InsulationStatus::Good,
    ];

    pub fn label_nl(self) -> &'static str {
        match self {
            InsulationStatus::None => "geen",
            InsulationStatus::Moderate => "matig",
            InsulationStatus::Good => "goed",
        }
    }
}

/// 유리 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GlazingType {
    /// 단판 유리
    Single,
    /// 일반 복층 유리
    Double,
    /// HR++ 고단열 유리
    Hr,
}

impl GlazingType {
    pub const ALL: [GlazingType; 3] = [GlazingType::Single, GlazingType::Double, GlazingType::Hr];
}

/// 낙관/기준/비관 시나리오 값 묶음.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRange<T> {
    pub optimistic: T,
    pub normal: T,
    pub pessimistic: T,
}

/// 투자비와 연간 절감액으로 단순 회수기간 [년]을 구한다. 둘 중 하나라도 0 이하이면 None.
pub fn simple_payback(investment: f64, annual_savings: f64) -> Option<f64> {
    if investment > 0.0 && annual_savings > 0.0 {
        Some(investment / annual_savings)
    } else {
        None
    }
}
