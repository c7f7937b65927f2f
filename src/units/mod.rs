//! 단위 정의 모듈. 엔진 내부의 온도는 모두 절대온도로 다룬다.

pub mod temperature;

pub use temperature::{Kelvin, TemperatureError, CELSIUS_OFFSET};
