//! 계산기 입력 범위 검사.
//!
//! 모든 오류를 한 번에 모아 돌려준다. 필드 이름은 JSON(camelCase) 표기를 따르고
//! 메시지는 사용자에게 그대로 보여 줄 네덜란드어다.

use std::collections::HashSet;
use std::fmt;

use chrono::Datelike;
use serde::Serialize;
use thiserror::Error;

use crate::building::energy_label::EnergyLabelInput;
use crate::building::insulation::InsulationInput;
use crate::building::window_frames::WindowFramesInput;
use crate::electricity::air_conditioning::AirConditioningInput;
use crate::electricity::energy_contract::EnergyContractInput;
use crate::electricity::ev_charger::EvChargerInput;
use crate::electricity::home_battery::HomeBatteryInput;
use crate::electricity::solar_panels::SolarPanelsInput;
use crate::heating::boiler_replacement::BoilerReplacementInput;
use crate::heating::heat_pump::HeatPumpInput;
use crate::heating::hot_water_boiler::HotWaterBoilerInput;

/// 필드 하나에 대한 검사 실패.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// 입력 하나에서 나온 검사 실패 목록. 비어 있으면 만들어지지 않는다.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// 올해. 준공 연도 상한으로 쓴다.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// 검사 결과를 모으는 도우미.
#[derive(Debug, Default)]
struct Checker {
    errors: Vec<ValidationError>,
}

impl Checker {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// 필수 수치. 메시지를 지정하지 않으면 "Minimaal {min}" 형식.
    fn range(&mut self, field: &str, value: f64, min: f64, max: f64, unit: &str) {
        if !value.is_finite() {
            self.push(field, "Ongeldig getal");
        } else if value < min {
            self.push(field, format!("Minimaal {}{}", nl_number(min), unit));
        } else if value > max {
            self.push(field, format!("Maximaal {}{}", nl_number(max), unit));
        }
    }

    /// 단가용. "Minimaal €0.10/kWh" 형식.
    fn price(&mut self, field: &str, value: f64, min: f64, max: f64, unit: &str) {
        if !value.is_finite() {
            self.push(field, "Ongeldig getal");
        } else if value < min {
            self.push(field, format!("Minimaal €{min:.2}{unit}"));
        } else if value > max {
            self.push(field, format!("Maximaal €{max:.2}{unit}"));
        }
    }

    fn optional_range(&mut self, field: &str, value: Option<f64>, min: f64, max: f64) {
        if let Some(v) = value {
            self.range(field, v, min, max, "");
        }
    }

    fn optional_price(&mut self, field: &str, value: Option<f64>, min: f64, max: f64, unit: &str) {
        if let Some(v) = value {
            self.price(field, v, min, max, unit);
        }
    }

    fn non_negative(&mut self, field: &str, value: Option<f64>) {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                self.push(field, "Mag niet negatief zijn");
            }
        }
    }

    fn count(&mut self, field: &str, value: u32, min: u32, max: u32, unit: &str) {
        self.range(field, f64::from(value), f64::from(min), f64::from(max), unit);
    }

    fn year(&mut self, field: &str, year: i32) {
        if year < 1900 {
            self.push(field, "Minimaal 1900");
        } else if year > current_year() {
            self.push(field, "Kan niet in de toekomst liggen");
        }
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

/// 천 단위 구분에 점을 쓰는 정수 표기 (10000 → "10.000").
fn nl_number(value: f64) -> String {
    if value.fract() != 0.0 {
        return value.to_string();
    }
    let digits = format!("{}", value.abs() as u64);
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if value < 0.0 {
        format!("-{out}")
    } else {
        out
    }
}

impl Validate for SolarPanelsInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::default();
        c.range("annualConsumptionKwh", self.annual_consumption_kwh, 100.0, 50_000.0, " kWh");
        c.range("roofTiltDeg", self.roof_tilt_deg, 0.0, 90.0, " graden");
        c.optional_range("roofAreaM2", self.roof_area_m2, 1.0, 1000.0);
        c.range("panelPowerWp", self.panel_power_wp, 100.0, 1000.0, " Wp");
        c.price("electricityPrice", self.electricity_price, 0.10, 1.00, "/kWh");
        c.optional_range("shadingPct", self.shading_pct, 0.0, 50.0);
        c.non_negative("investment", self.investment);
        c.optional_price("feedInTariff", self.feed_in_tariff, 0.0, 0.50, "/kWh");
        c.finish()
    }
}

impl Validate for HeatPumpInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::default();
        c.range("annualGasM3", self.annual_gas_m3, 100.0, 10_000.0, " m³/jaar");
        c.price("gasPrice", self.gas_price, 0.50, 3.00, "/m³");
        c.price("electricityPrice", self.electricity_price, 0.10, 1.00, "/kWh");
        c.optional_range("cop", self.cop, 3.0, 5.0);
        c.non_negative("installationCost", self.installation_cost);
        c.optional_range("insulationCorrectionPct", self.insulation_correction_pct, 0.0, 50.0);
        c.non_negative("subsidy", self.subsidy);
        c.finish()
    }
}

impl Validate for AirConditioningInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::default();
        c.range("floorAreaM2", self.floor_area_m2, 5.0, 500.0, " m²");
        c.range("ceilingHeightM", self.ceiling_height_m, 2.0, 5.0, " m");
        c.optional_range("coolingHoursPerYear", self.cooling_hours_per_year, 0.0, 8760.0);
        c.optional_price("electricityPrice", self.electricity_price, 0.10, 1.00, "/kWh");
        if let Some(n) = self.occupants {
            c.count("occupants", n, 1, 20, "");
        }
        c.optional_range("windowAreaM2", self.window_area_m2, 0.0, 100.0);
        if let Some(n) = self.rooms {
            c.count("rooms", n, 1, 10, "");
        }
        c.finish()
    }
}

impl Validate for HomeBatteryInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::default();
        c.range("pvPowerKwp", self.pv_power_kwp, 1.0, 50.0, " kWp");
        c.range("annualConsumptionKwh", self.annual_consumption_kwh, 100.0, 50_000.0, " kWh");
        c.optional_range("annualGenerationKwh", self.annual_generation_kwh, 0.0, 100_000.0);
        c.optional_range("autonomyHours", self.autonomy_hours, 1.0, 168.0);
        c.optional_price("electricityPrice", self.electricity_price, 0.10, 1.00, "/kWh");
        c.optional_price("feedInTariff", self.feed_in_tariff, 0.0, 0.50, "/kWh");
        c.non_negative("investment", self.investment);
        c.finish()
    }
}

impl Validate for InsulationInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::default();
        c.range("annualGasM3", self.annual_gas_m3, 100.0, 10_000.0, " m³/jaar");
        if self.measures.is_empty() {
            c.push("measures", "Selecteer minimaal één isolatiemaatregel");
        } else {
            let mut seen = HashSet::new();
            if !self.measures.iter().all(|m| seen.insert(*m)) {
                c.push("measures", "Elke maatregel mag maar één keer gekozen worden");
            }
        }
        c.optional_price("gasPrice", self.gas_price, 0.50, 3.00, "/m³");
        if let Some(year) = self.construction_year {
            c.year("constructionYear", year);
        }
        if let Some(inv) = &self.investments {
            c.non_negative("investments.roof", inv.roof);
            c.non_negative("investments.cavityWall", inv.cavity_wall);
            c.non_negative("investments.floor", inv.floor);
            c.non_negative("investments.glass", inv.glass);
        }
        c.non_negative("subsidy", self.subsidy);
        c.finish()
    }
}

impl Validate for BoilerReplacementInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::default();
        c.range("annualGasM3", self.annual_gas_m3, 100.0, 10_000.0, " m³/jaar");
        c.count("occupants", self.occupants, 1, 20, " personen");
        c.optional_price("gasPrice", self.gas_price, 0.50, 3.00, "/m³");
        c.optional_price("electricityPrice", self.electricity_price, 0.10, 1.00, "/kWh");
        c.optional_range("boilerAgeYears", self.boiler_age_years, 0.0, 50.0);
        c.non_negative("installationCost", self.installation_cost);
        c.finish()
    }
}

impl Validate for EvChargerInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::default();
        c.range("batteryCapacityKwh", self.battery_capacity_kwh, 10.0, 200.0, " kWh");
        c.range("desiredChargeHours", self.desired_charge_hours, 1.0, 24.0, " uur");
        c.optional_price("dayTariff", self.day_tariff, 0.10, 1.00, "/kWh");
        c.optional_price("nightTariff", self.night_tariff, 0.10, 1.00, "/kWh");
        c.finish()
    }
}

impl Validate for EnergyContractInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::default();
        c.price("currentElectricityPrice", self.current_electricity_price, 0.10, 1.00, "/kWh");
        c.price("currentGasPrice", self.current_gas_price, 0.50, 3.00, "/m³");
        c.price("newElectricityPrice", self.new_electricity_price, 0.10, 1.00, "/kWh");
        c.price("newGasPrice", self.new_gas_price, 0.50, 3.00, "/m³");
        c.range("annualElectricityKwh", self.annual_electricity_kwh, 100.0, 50_000.0, " kWh");
        c.range("annualGasM3", self.annual_gas_m3, 100.0, 10_000.0, " m³");
        c.optional_range("standingChargeCurrent", self.standing_charge_current, 0.0, 1000.0);
        c.optional_range("standingChargeNew", self.standing_charge_new, 0.0, 1000.0);
        c.optional_range("gridOperatorCosts", self.grid_operator_costs, 0.0, 1000.0);
        c.finish()
    }
}

impl Validate for WindowFramesInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::default();
        c.range("windowAreaM2", self.window_area_m2, 1.0, 200.0, " m²");
        c.range("annualGasM3", self.annual_gas_m3, 100.0, 10_000.0, " m³/jaar");
        c.optional_price("gasPrice", self.gas_price, 0.50, 3.00, "/m³");
        if let Some(year) = self.construction_year {
            c.year("constructionYear", year);
        }
        c.non_negative("investment", self.investment);
        c.finish()
    }
}

impl Validate for EnergyLabelInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::default();
        c.year("constructionYear", self.construction_year);
        c.range("floorAreaM2", self.floor_area_m2, 20.0, 1000.0, " m²");
        c.optional_range("solarKwp", self.solar_kwp, 0.0, 100.0);
        c.optional_range("rcRoof", self.rc_roof, 0.0, 20.0);
        c.optional_range("rcWall", self.rc_wall, 0.0, 20.0);
        c.optional_range("rcFloor", self.rc_floor, 0.0, 20.0);
        c.finish()
    }
}

impl Validate for HotWaterBoilerInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut c = Checker::default();
        c.count("occupants", self.occupants, 1, 20, " personen");
        c.optional_price("electricityPrice", self.electricity_price, 0.10, 1.00, "/kWh");
        c.optional_price("gasPrice", self.gas_price, 0.50, 3.00, "/m³");
        c.optional_range("showerMinutesPerDay", self.shower_minutes_per_day, 0.0, 120.0);
        c.optional_range("bathsPerWeek", self.baths_per_week, 0.0, 20.0);
        c.non_negative("investment", self.investment);
        c.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_use_dot_separator() {
        assert_eq!(nl_number(10_000.0), "10.000");
        assert_eq!(nl_number(100.0), "100");
        assert_eq!(nl_number(50_000.0), "50.000");
    }

    #[test]
    fn checker_collects_every_failure() {
        let mut c = Checker::default();
        c.range("a", 1.0, 5.0, 10.0, " m²");
        c.range("b", 20.0, 5.0, 10.0, "");
        c.range("c", f64::NAN, 5.0, 10.0, "");
        let errors = c.finish().unwrap_err();
        assert_eq!(errors.0.len(), 3);
        assert_eq!(errors.0[0].message, "Minimaal 5 m²");
        assert_eq!(errors.0[1].message, "Maximaal 10");
    }
}
