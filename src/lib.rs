//! 히트펌프(ASHP/GSHP) 엑서지 수지 계산 라이브러리.
//!
//! 입력 변수 카탈로그, 엑서지 계산 엔진, 시스템 세션을 라이브러리로 분리하여 CLI 외의
//! 화면에서도 같은 계산을 재사용할 수 있게 한다.

pub mod app;
pub mod catalog;
pub mod config;
pub mod exergy;
pub mod i18n;
pub mod inputs;
pub mod quantity;
pub mod session;
pub mod ui_cli;
pub mod units;
