use serde::Serialize;

use super::ExergyError;
use crate::units::Kelvin;

/// 공기 정압비열 [kJ/(kg·K)]
pub const C_A: f64 = 1.005;
/// 공기 밀도 [kg/m³]
pub const RHO_A: f64 = 1.2;

/// 열교환기를 지나는 공기 흐름 하나.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirStream {
    /// 체적유량 [m³/s]
    pub volume_flow: f64,
    /// 질량유량 [kg/s]
    pub mass_flow: f64,
    pub t_in: Kelvin,
    pub t_out: Kelvin,
    /// 입구 공기의 유동 엑서지 [kW]
    pub exergy_in: f64,
    /// 출구 공기의 유동 엑서지 [kW]
    pub exergy_out: f64,
}

impl AirStream {
    /// 열량 `heat_kw`를 온도차 `delta_k`로 주고받는 공기 흐름을 구성한다.
    ///
    /// `delta_k`는 열을 전달하는 방향의 부호를 가진 온도차이며 0이면 유량이 정의되지 않는다.
    pub fn from_heat(
        heat_kw: f64,
        delta_k: f64,
        t_in: Kelvin,
        t_out: Kelvin,
        t_0: Kelvin,
        what: &'static str,
    ) -> Result<Self, ExergyError> {
        if delta_k == 0.0 {
            return Err(ExergyError::ZeroFlow { what });
        }
        let volume_flow = heat_kw / (C_A * RHO_A * delta_k);
        let mass_flow = volume_flow * RHO_A;
        Ok(Self {
            volume_flow,
            mass_flow,
            t_in,
            t_out,
            exergy_in: flow_exergy(mass_flow, t_in, t_0),
            exergy_out: flow_exergy(mass_flow, t_out, t_0),
        })
    }

    /// 공기가 얻은 엑서지 (출구 - 입구).
    pub fn exergy_gain(&self) -> f64 {
        self.exergy_out - self.exergy_in
    }
}

/// 기준온도 `t_0`에 대한 공기의 유동 엑서지 `c_a·m·[(T - T_0) - T_0·ln(T/T_0)]` [kW].
pub fn flow_exergy(mass_flow: f64, t: Kelvin, t_0: Kelvin) -> f64 {
    let (t, t0) = (t.value(), t_0.value());
    C_A * mass_flow * ((t - t0) - t0 * (t / t0).ln())
}
