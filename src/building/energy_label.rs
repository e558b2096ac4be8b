use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dwelling::{GlazingType, HouseType, InsulationStatus};
use crate::rounding::round0;

/// 주 난방 설비.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeatingSystem {
    CvBoiler,
    HeatPump,
    Hybrid,
}

/// 방열 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeatEmitter {
    Radiators,
    UnderfloorHeating,
    Both,
}

/// 환기 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ventilation {
    Natural,
    Mechanical,
    /// 열회수 환기 (WTW)
    Hrv,
}

/// 에너지 라벨 등급. A++가 가장 좋다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnergyLabel {
    #[serde(rename = "A++")]
    APlusPlus,
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl EnergyLabel {
    /// EPG 값에서 라벨 등급으로.
    pub fn from_epg(epg: f64) -> Self {
        match epg {
            e if e <= 50.0 => EnergyLabel::APlusPlus,
            e if e <= 100.0 => EnergyLabel::APlus,
            e if e <= 150.0 => EnergyLabel::A,
            e if e <= 200.0 => EnergyLabel::B,
            e if e <= 250.0 => EnergyLabel::C,
            e if e <= 300.0 => EnergyLabel::D,
            e if e <= 400.0 => EnergyLabel::E,
            e if e <= 500.0 => EnergyLabel::F,
            _ => EnergyLabel::G,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnergyLabel::APlusPlus => "A++",
            EnergyLabel::APlus => "A+",
            EnergyLabel::A => "A",
            EnergyLabel::B => "B",
            EnergyLabel::C => "C",
            EnergyLabel::D => "D",
            EnergyLabel::E => "E",
            EnergyLabel::F => "F",
            EnergyLabel::G => "G",
        }
    }
}

impl fmt::Display for EnergyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 에너지 라벨 추정 입력.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyLabelInput {
    pub construction_year: i32,
    pub house_type: HouseType,
    pub floor_area_m2: f64,
    pub roof_insulation: InsulationStatus,
    pub wall_insulation: InsulationStatus,
    pub floor_insulation: InsulationStatus,
    pub glazing: GlazingType,
    pub heating_system: HeatingSystem,
    #[serde(default)]
    pub solar_panels: bool,
    #[serde(default)]
    pub solar_kwp: Option<f64>,
    /// 부위별 열저항 Rc [m²K/W], 참고용
    #[serde(default)]
    pub rc_roof: Option<f64>,
    #[serde(default)]
    pub rc_wall: Option<f64>,
    #[serde(default)]
    pub rc_floor: Option<f64>,
    #[serde(default)]
    pub heat_emitter: Option<HeatEmitter>,
    #[serde(default)]
    pub ventilation: Option<Ventilation>,
}

/// 부위별 열손실 [W/K].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatLossBreakdown {
    pub roof: f64,
    pub walls: f64,
    pub floor: f64,
    pub windows: f64,
    pub ventilation: f64,
}

/// 조치 하나를 했을 때의 예상 라벨.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelAfterMeasure {
    pub measure: String,
    pub new_label: EnergyLabel,
    pub epg_improvement: f64,
}

/// 에너지 라벨 추정 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyLabelResult {
    pub label: EnergyLabel,
    pub epg: f64,
    pub advice: Vec<String>,
    /// 연간 절감 가능액 [€]
    pub potential_savings: f64,
    pub heat_loss: HeatLossBreakdown,
    pub label_after_measure: Vec<LabelAfterMeasure>,
    pub explanation: String,
}

/// EPG (Energieprestatie Gebouwen) 간이 점수. 낮을수록 좋다.
pub fn epg(input: &EnergyLabelInput) -> f64 {
    let mut epg = 200.0;

    epg += match input.construction_year {
        y if y < 1975 => 100.0,
        y if y < 1990 => 50.0,
        y if y < 2000 => 25.0,
        y if y < 2010 => 10.0,
        _ => 0.0,
    };
    epg += match input.house_type {
        HouseType::Apartment => -20.0,
        HouseType::Terraced => 0.0,
        HouseType::Corner => 20.0,
        HouseType::SemiDetached => 40.0,
        HouseType::Detached => 60.0,
    };
    epg += status_penalty(input.roof_insulation, 30.0, 15.0);
    epg += status_penalty(input.wall_insulation, 30.0, 15.0);
    epg += status_penalty(input.floor_insulation, 20.0, 10.0);
    epg += match input.glazing {
        GlazingType::Single => 25.0,
        GlazingType::Double => 10.0,
        GlazingType::Hr => 0.0,
    };
    epg += match input.heating_system {
        HeatingSystem::CvBoiler => 0.0,
        HeatingSystem::HeatPump => -40.0,
        HeatingSystem::Hybrid => -20.0,
    };
    if input.solar_panels {
        // kWp당 약 5점
        epg -= input.solar_kwp.unwrap_or(0.0) * 5.0;
    }

    epg.max(0.0)
}

fn status_penalty(status: InsulationStatus, none: f64, moderate: f64) -> f64 {
    match status {
        InsulationStatus::None => none,
        InsulationStatus::Moderate => moderate,
        InsulationStatus::Good => 0.0,
    }
}

fn status_loss(status: InsulationStatus, good: f64, moderate: f64, none: f64) -> f64 {
    match status {
        InsulationStatus::Good => good,
        InsulationStatus::Moderate => moderate,
        InsulationStatus::None => none,
    }
}

pub fn heat_loss(input: &EnergyLabelInput) -> HeatLossBreakdown {
    HeatLossBreakdown {
        roof: status_loss(input.roof_insulation, 50.0, 100.0, 200.0),
        walls: status_loss(input.wall_insulation, 80.0, 150.0, 300.0),
        floor: status_loss(input.floor_insulation, 40.0, 80.0, 150.0),
        windows: match input.glazing {
            GlazingType::Hr => 20.0,
            GlazingType::Double => 50.0,
            GlazingType::Single => 100.0,
        },
        ventilation: match input.ventilation {
            Some(Ventilation::Hrv) => 30.0,
            Some(Ventilation::Mechanical) => 60.0,
            Some(Ventilation::Natural) | None => 100.0,
        },
    }
}

pub fn calculate(input: &EnergyLabelInput) -> EnergyLabelResult {
    let epg = epg(input);
    let label = EnergyLabel::from_epg(epg);

    let mut advice = Vec::new();
    let mut label_after_measure = Vec::new();
    let mut add = |text: &str, measure: &str, improvement: f64| {
        advice.push(text.to_string());
        label_after_measure.push(LabelAfterMeasure {
            measure: measure.to_string(),
            new_label: EnergyLabel::from_epg((epg - improvement).max(0.0)),
            epg_improvement: improvement,
        });
    };

    if input.roof_insulation != InsulationStatus::Good {
        add(
            "Dakisolatie verbeteren kan het label met 1-2 stappen verbeteren",
            "Dakisolatie verbeteren",
            15.0,
        );
    }
    if input.wall_insulation != InsulationStatus::Good {
        add(
            "Spouwmuurisolatie is een relatief goedkope maatregel met groot effect",
            "Spouwmuurisolatie",
            20.0,
        );
    }
    if input.glazing != GlazingType::Hr {
        add(
            "HR++ glas plaatsen verbetert comfort en energielabel",
            "HR++ glas",
            10.0,
        );
    }
    if input.heating_system == HeatingSystem::CvBoiler {
        add(
            "Warmtepomp (hybride of all-electric) kan label met 2-3 stappen verbeteren",
            "Warmtepomp",
            30.0,
        );
    }
    if !input.solar_panels {
        add(
            "Zonnepanelen installeren verbetert het energielabel aanzienlijk",
            "Zonnepanelen (5 kWp)",
            15.0,
        );
    }

    let explanation = format!(
        "De EPG (Energieprestatie Gebouwen) waarde van {} wordt berekend op basis van:\n\
         - Bouwjaar en woningtype\n\
         - Isolatieniveau (dak, muren, vloer)\n\
         - Glastype\n\
         - Verwarmingssysteem\n\
         - Zonnepanelen\n\n\
         Lagere EPG = beter label. Elke maatregel verlaagt de EPG waarde.",
        round0(epg)
    );

    EnergyLabelResult {
        label,
        epg: round0(epg),
        advice,
        // EPG 100 초과 1점당 €10
        potential_savings: round0(((epg - 100.0) * 10.0).max(0.0)),
        heat_loss: heat_loss(input),
        label_after_measure,
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_bands_are_inclusive_at_upper_bound() {
        assert_eq!(EnergyLabel::from_epg(50.0), EnergyLabel::APlusPlus);
        assert_eq!(EnergyLabel::from_epg(50.5), EnergyLabel::APlus);
        assert_eq!(EnergyLabel::from_epg(400.0), EnergyLabel::E);
        assert_eq!(EnergyLabel::from_epg(501.0), EnergyLabel::G);
    }

    #[test]
    fn label_serializes_with_plus_signs() {
        let json = serde_json::to_string(&EnergyLabel::APlusPlus).unwrap();
        assert_eq!(json, "\"A++\"");
    }
}
