//! 네덜란드 가정용 에너지 절감 계산기 라이브러리.
//!
//! 계산 로직은 순수 함수로 두고, 대화형 CLI(`app`, `ui_cli`)와 HTTP 서비스(`api`)가
//! 같은 계산기와 검증을 공유한다.

pub mod advisor;
pub mod api;
pub mod app;
pub mod building;
pub mod config;
pub mod dwelling;
pub mod electricity;
pub mod format;
pub mod heating;
pub mod i18n;
pub mod lead;
pub mod rounding;
pub mod tool;
pub mod ui_cli;
pub mod validation;
