//! 전력 측 계산기 모음 (태양광, 배터리, 충전기, 계약, 에어컨).

pub mod air_conditioning;
pub mod energy_contract;
pub mod ev_charger;
pub mod home_battery;
pub mod solar_panels;
