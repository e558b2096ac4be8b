//! 계산기 이름(슬러그)과 JSON 입력 디스패치.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::building::{energy_label, insulation, window_frames};
use crate::electricity::{air_conditioning, energy_contract, ev_charger, home_battery, solar_panels};
use crate::heating::{boiler_replacement, heat_pump, hot_water_boiler};
use crate::validation::{Validate, ValidationErrors};

/// 계산기 11종. 직렬화 값은 사이트 URL에 쓰던 네덜란드어 슬러그다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolName {
    #[serde(rename = "zonnepanelen")]
    SolarPanels,
    #[serde(rename = "warmtepomp")]
    HeatPump,
    #[serde(rename = "airco")]
    AirConditioning,
    #[serde(rename = "thuisbatterij")]
    HomeBattery,
    #[serde(rename = "isolatie")]
    Insulation,
    #[serde(rename = "cv-ketel")]
    BoilerReplacement,
    #[serde(rename = "laadpaal")]
    EvCharger,
    #[serde(rename = "energiecontract")]
    EnergyContract,
    #[serde(rename = "kozijnen")]
    WindowFrames,
    #[serde(rename = "energielabel")]
    EnergyLabel,
    #[serde(rename = "boilers")]
    HotWaterBoiler,
}

impl ToolName {
    pub const ALL: [ToolName; 11] = [
        ToolName::SolarPanels,
        ToolName::HeatPump,
        ToolName::AirConditioning,
        ToolName::HomeBattery,
        ToolName::Insulation,
        ToolName::BoilerReplacement,
        ToolName::EvCharger,
        ToolName::EnergyContract,
        ToolName::WindowFrames,
        ToolName::EnergyLabel,
        ToolName::HotWaterBoiler,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ToolName::SolarPanels => "zonnepanelen",
            ToolName::HeatPump => "warmtepomp",
            ToolName::AirConditioning => "airco",
            ToolName::HomeBattery => "thuisbatterij",
            ToolName::Insulation => "isolatie",
            ToolName::BoilerReplacement => "cv-ketel",
            ToolName::EvCharger => "laadpaal",
            ToolName::EnergyContract => "energiecontract",
            ToolName::WindowFrames => "kozijnen",
            ToolName::EnergyLabel => "energielabel",
            ToolName::HotWaterBoiler => "boilers",
        }
    }

    /// 번역 키 (`tool.<slug>`).
    pub fn i18n_key(self) -> String {
        format!("tool.{}", self.slug())
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("onbekende tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for ToolName {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ToolName::ALL
            .into_iter()
            .find(|t| t.slug() == needle)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum CalcError {
    #[error(transparent)]
    UnknownTool(#[from] UnknownTool),
    #[error("ongeldige invoer: {0}")]
    InvalidInput(#[source] serde_json::Error),
    #[error("validatie mislukt: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("resultaat kon niet worden geserialiseerd: {0}")]
    Output(#[source] serde_json::Error),
}

fn run<I, R>(input: Value, calculate: fn(&I) -> R) -> Result<Value, CalcError>
where
    I: DeserializeOwned + Validate,
    R: Serialize,
{
    let input: I = serde_json::from_value(input).map_err(CalcError::InvalidInput)?;
    input.validate()?;
    serde_json::to_value(calculate(&input)).map_err(CalcError::Output)
}

/// JSON 입력을 해당 계산기 입력으로 읽고, 검사한 뒤 결과를 JSON으로 돌려준다.
pub fn run_calculation(tool: ToolName, input: Value) -> Result<Value, CalcError> {
    match tool {
        ToolName::SolarPanels => run(input, solar_panels::calculate),
        ToolName::HeatPump => run(input, heat_pump::calculate),
        ToolName::AirConditioning => run(input, air_conditioning::calculate),
        ToolName::HomeBattery => run(input, home_battery::calculate),
        ToolName::Insulation => run(input, insulation::calculate),
        ToolName::BoilerReplacement => run(input, boiler_replacement::calculate),
        ToolName::EvCharger => run(input, ev_charger::calculate),
        ToolName::EnergyContract => run(input, energy_contract::calculate),
        ToolName::WindowFrames => run(input, window_frames::calculate),
        ToolName::EnergyLabel => run(input, energy_label::calculate),
        ToolName::HotWaterBoiler => run(input, hot_water_boiler::calculate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slug_parse_is_case_insensitive() {
        assert_eq!("CV-Ketel".parse::<ToolName>().unwrap(), ToolName::BoilerReplacement);
        assert!("stoom".parse::<ToolName>().is_err());
    }

    #[test]
    fn slug_matches_serde_name() {
        for tool in ToolName::ALL {
            let json = serde_json::to_value(tool).unwrap();
            assert_eq!(json, Value::String(tool.slug().to_string()));
        }
    }

    #[test]
    fn invalid_input_is_reported_before_calculation() {
        let err = run_calculation(
            ToolName::BoilerReplacement,
            json!({
                "annualGasM3": 50,
                "currentBoiler": "old",
                "occupants": 3,
                "desiredSystem": "hr-boiler"
            }),
        )
        .unwrap_err();
        match err {
            CalcError::Validation(errors) => assert!(errors.has_field("annualGasM3")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_field_is_invalid_input() {
        let err = run_calculation(ToolName::HeatPump, json!({ "annualGasM3": 1500 })).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(_)));
    }
}
