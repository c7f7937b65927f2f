use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 섭씨와 켈빈 사이의 오프셋.
pub const CELSIUS_OFFSET: f64 = 273.15;

/// 절대온도가 0 K 이하이거나 유한하지 않을 때의 오류.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("절대온도가 0 K 이하입니다: {what} = {kelvin} K")]
pub struct TemperatureError {
    pub what: &'static str,
    pub kelvin: f64,
}

/// 절대온도 [K].
///
/// 섭씨 입력은 `from_celsius`로만 변환되므로 273.15 오프셋은 값마다 정확히 한 번 적용된다.
/// 생성된 값은 항상 0 K보다 크다.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(f64);

impl Kelvin {
    /// 섭씨 값을 켈빈으로 변환한다. `what`은 오류 메시지에 쓰이는 변수 이름이다.
    pub fn from_celsius(value_c: f64, what: &'static str) -> Result<Self, TemperatureError> {
        Self::new(value_c + CELSIUS_OFFSET, what)
    }

    /// 이미 켈빈 단위인 값을 검증한다.
    pub fn new(kelvin: f64, what: &'static str) -> Result<Self, TemperatureError> {
        if kelvin.is_finite() && kelvin > 0.0 {
            Ok(Self(kelvin))
        } else {
            Err(TemperatureError { what, kelvin })
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// 표시용 섭씨 값.
    pub fn celsius(self) -> f64 {
        self.0 - CELSIUS_OFFSET
    }

    /// 기준온도 `t_0`에 대한 카르노 계수 `1 - T_0/T`.
    pub fn carnot_factor(self, t_0: Kelvin) -> f64 {
        1.0 - t_0.0 / self.0
    }
}
