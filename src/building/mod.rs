//! 건물 외피 계산기 모음.

pub mod energy_label;
pub mod insulation;
pub mod window_frames;
