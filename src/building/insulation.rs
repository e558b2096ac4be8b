use serde::{Deserialize, Serialize};

use crate::dwelling::{
    GlazingType, HouseType, InsulationStatus, ScenarioRange, CO2_KG_PER_M3_GAS, DEFAULT_GAS_PRICE,
};
use crate::rounding::{round0, round1, round2};

/// 단열 조치 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsulationMeasure {
    /// 지붕 단열 (dakisolatie)
    Roof,
    /// 중공벽 충전 (spouwmuurisolatie)
    CavityWall,
    /// 바닥 단열 (vloerisolatie)
    Floor,
    /// HR++ 유리 교체
    Glass,
}

impl InsulationMeasure {
    pub const ALL: [InsulationMeasure; 4] = [
        InsulationMeasure::Roof,
        InsulationMeasure::CavityWall,
        InsulationMeasure::Floor,
        InsulationMeasure::Glass,
    ];

    pub fn label_nl(self) -> &'static str {
        match self {
            InsulationMeasure::Roof => "dakisolatie",
            InsulationMeasure::CavityWall => "spouwmuurisolatie",
            InsulationMeasure::Floor => "vloerisolatie",
            InsulationMeasure::Glass => "HR++ glas",
        }
    }

    /// 기본 투자비 [€], 최소/최대의 평균.
    pub fn default_investment(self) -> f64 {
        let (min, max) = match self {
            InsulationMeasure::Roof => (4000.0, 6000.0),
            InsulationMeasure::CavityWall => (1000.0, 1000.0),
            InsulationMeasure::Floor => (2000.0, 3000.0),
            InsulationMeasure::Glass => (150.0, 300.0),
        };
        (min + max) / 2.0
    }
}

/// 조치별 투자비 직접 입력 [€].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureInvestments {
    #[serde(default)]
    pub roof: Option<f64>,
    #[serde(default)]
    pub cavity_wall: Option<f64>,
    #[serde(default)]
    pub floor: Option<f64>,
    #[serde(default)]
    pub glass: Option<f64>,
}

impl MeasureInvestments {
    fn get(&self, measure: InsulationMeasure) -> Option<f64> {
        match measure {
            InsulationMeasure::Roof => self.roof,
            InsulationMeasure::CavityWall => self.cavity_wall,
            InsulationMeasure::Floor => self.floor,
            InsulationMeasure::Glass => self.glass,
        }
    }
}

/// 단열 계산 입력.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsulationInput {
    pub house_type: HouseType,
    pub annual_gas_m3: f64,
    pub measures: Vec<InsulationMeasure>,
    #[serde(default)]
    pub current_glazing: Option<GlazingType>,
    #[serde(default)]
    pub gas_price: Option<f64>,
    #[serde(default)]
    pub current_roof: Option<InsulationStatus>,
    #[serde(default)]
    pub current_wall: Option<InsulationStatus>,
    #[serde(default)]
    pub current_floor: Option<InsulationStatus>,
    /// 준공 연도, 현재 단열 상태의 기본값 추정에 쓴다.
    #[serde(default)]
    pub construction_year: Option<i32>,
    #[serde(default)]
    pub investments: Option<MeasureInvestments>,
    /// 전체 조치에 대한 보조금 합계 [€]
    #[serde(default)]
    pub subsidy: Option<f64>,
}

/// 조치별 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureResult {
    pub measure: InsulationMeasure,
    pub gas_savings_m3: f64,
    pub cost_savings: f64,
    pub co2_reduction_kg: f64,
    pub investment: f64,
    pub payback_years: Option<f64>,
}

/// 우선순위 목록 항목. 투자 효율 순으로 정렬된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityAdvice {
    pub measure: InsulationMeasure,
    pub gas_savings_m3: f64,
    pub cost_savings: f64,
    pub net_investment: f64,
    pub payback_years: Option<f64>,
    pub impact_score: f64,
}

/// 단열 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsulationResult {
    pub measures: Vec<MeasureResult>,
    pub total_gas_savings_m3: f64,
    pub total_cost_savings: f64,
    pub total_co2_reduction_kg: f64,
    pub new_gas_use_m3: f64,
    pub priority: Vec<PriorityAdvice>,
    pub total_investment: f64,
    pub total_net_investment: f64,
    pub subsidy: f64,
    pub gas_savings_range: ScenarioRange<f64>,
    pub cost_savings_range: ScenarioRange<f64>,
}

/// 두 개 이상 조치를 함께 할 때의 중복 효과 보정.
pub const COMBINATION_FACTOR: f64 = 0.87;

/// 조치별, 주택 형태별 연간 가스 절감 기준값 [m³].
fn base_savings(measure: InsulationMeasure, glazing: GlazingType, house: HouseType) -> f64 {
    let row: [f64; 5] = match measure {
        InsulationMeasure::Roof => [150.0, 270.0, 340.0, 400.0, 525.0],
        InsulationMeasure::CavityWall => [100.0, 180.0, 400.0, 410.0, 600.0],
        InsulationMeasure::Floor => [50.0, 80.0, 130.0, 170.0, 250.0],
        InsulationMeasure::Glass if glazing == GlazingType::Single => {
            [150.0, 250.0, 260.0, 290.0, 370.0]
        }
        InsulationMeasure::Glass => [40.0, 65.0, 70.0, 75.0, 100.0],
    };
    let idx = match house {
        HouseType::Apartment => 0,
        HouseType::Terraced => 1,
        HouseType::Corner => 2,
        HouseType::SemiDetached => 3,
        HouseType::Detached => 4,
    };
    row[idx]
}

/// 준공 연도로 추정한 현재 단열 상태.
pub fn default_status(construction_year: Option<i32>) -> InsulationStatus {
    match construction_year {
        Some(year) if year >= 2000 => InsulationStatus::Good,
        Some(year) if year >= 1992 => InsulationStatus::Moderate,
        _ => InsulationStatus::None,
    }
}

/// 이미 단열된 부위는 절감 여지가 작다.
fn status_correction(status: InsulationStatus) -> f64 {
    match status {
        InsulationStatus::None => 1.0,
        InsulationStatus::Moderate => 0.5,
        InsulationStatus::Good => 0.2,
    }
}

/// 선택한 단열 조치별 절감과 투자비를 구하고 투자 효율 순으로 우선순위를 매긴다.
pub fn calculate(input: &InsulationInput) -> InsulationResult {
    let glazing = input.current_glazing.unwrap_or(GlazingType::Double);
    let gas_price = input.gas_price.unwrap_or(DEFAULT_GAS_PRICE);
    let fallback = default_status(input.construction_year);
    let subsidy = input.subsidy.unwrap_or(0.0).max(0.0);
    let investments = input.investments.unwrap_or_default();
    let subsidy_share = if input.measures.is_empty() {
        0.0
    } else {
        subsidy / input.measures.len() as f64
    };

    let mut measures = Vec::with_capacity(input.measures.len());
    let mut priority = Vec::with_capacity(input.measures.len());
    let mut total_gas = 0.0;
    let mut total_investment = 0.0;
    let mut total_net_investment = 0.0;

    for &measure in &input.measures {
        let correction = match measure {
            InsulationMeasure::Glass if glazing == GlazingType::Hr => 0.3,
            InsulationMeasure::Glass => 1.0,
            InsulationMeasure::Roof => status_correction(input.current_roof.unwrap_or(fallback)),
            InsulationMeasure::CavityWall => {
                status_correction(input.current_wall.unwrap_or(fallback))
            }
            InsulationMeasure::Floor => {
                status_correction(input.current_floor.unwrap_or(fallback))
            }
        };
        let gas = base_savings(measure, glazing, input.house_type) * correction;
        if gas <= 0.0 {
            continue;
        }

        let cost = gas * gas_price;
        let investment = investments
            .get(measure)
            .filter(|v| *v > 0.0)
            .unwrap_or_else(|| measure.default_investment());
        let net_investment = (investment - subsidy_share).max(0.0);
        let payback = if cost > 0.0 && net_investment > 0.0 {
            Some(round1(net_investment / cost))
        } else {
            None
        };

        measures.push(MeasureResult {
            measure,
            gas_savings_m3: round0(gas),
            cost_savings: round2(cost),
            co2_reduction_kg: round0(gas * CO2_KG_PER_M3_GAS),
            investment: round0(investment),
            payback_years: payback,
        });
        priority.push(PriorityAdvice {
            measure,
            gas_savings_m3: round0(gas),
            cost_savings: round2(cost),
            net_investment: round0(net_investment),
            payback_years: payback,
            impact_score: if net_investment > 0.0 {
                gas / net_investment
            } else {
                gas
            },
        });

        total_gas += gas;
        total_investment += investment;
        total_net_investment += net_investment;
    }

    // sort_by는 안정 정렬이라 동점이면 입력 순서를 유지한다.
    priority.sort_by(|a, b| b.impact_score.total_cmp(&a.impact_score));

    let combination = if input.measures.len() > 1 {
        COMBINATION_FACTOR
    } else {
        1.0
    };
    let corrected_gas = total_gas * combination;
    let total_cost = corrected_gas * gas_price;

    InsulationResult {
        measures,
        total_gas_savings_m3: round0(corrected_gas),
        total_cost_savings: round2(total_cost),
        total_co2_reduction_kg: round0(corrected_gas * CO2_KG_PER_M3_GAS),
        new_gas_use_m3: round0((input.annual_gas_m3 - corrected_gas).max(0.0)),
        priority,
        total_investment: round0(total_investment),
        total_net_investment: round0(total_net_investment),
        subsidy,
        gas_savings_range: ScenarioRange {
            optimistic: round0(corrected_gas * 1.1),
            normal: round0(corrected_gas),
            pessimistic: round0(corrected_gas * 0.9),
        },
        cost_savings_range: ScenarioRange {
            optimistic: round2(total_cost * 1.1),
            normal: round2(total_cost),
            pessimistic: round2(total_cost * 0.9),
        },
    }
}
