//! 난방/급탕 계산기 모음.

pub mod boiler_replacement;
pub mod heat_pump;
pub mod hot_water_boiler;
