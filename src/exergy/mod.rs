//! 히트펌프 엑서지 수지 계산 엔진.
//!
//! 입력 온도(℃)와 동력(kW)으로부터 실내기, 냉매 사이클, 실외기(또는 지중 열교환기),
//! 전체의 엑서지 투입·산출·소비를 구한다. 계산은 순수 함수이며 공유 상태가 없다.
//! 온도는 `Kelvin`으로 한 번 변환한 뒤에만 엑서지 항에 사용한다.

pub mod air;
pub mod ashp;
pub mod gshp;
pub mod result;

use thiserror::Error;

use crate::catalog::Topology;
use crate::inputs::{InputError, InputVector};
use crate::units::{Kelvin, TemperatureError};

pub use air::{AirStream, C_A, RHO_A};
pub use ashp::AshpInputs;
pub use gshp::GshpInputs;
pub use result::{
    Capacities, ExergyResult, OutdoorSide, StageBalance, StepKind, Temperatures, WaterfallStep,
};

/// 엑서지 계산 중 발생 가능한 오류. 오류가 나면 부분 결과는 반환하지 않는다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExergyError {
    #[error("입력값이 없습니다: {id}")]
    MissingDependency { id: String },
    #[error("유한하지 않은 입력값: {id} = {value}")]
    NonFiniteInput { id: String, value: f64 },
    #[error(transparent)]
    InvalidTemperature(#[from] TemperatureError),
    /// 온도 상승폭이 0 이하이거나 COP가 0 이하/비유한값
    #[error("COP를 계산할 수 없습니다: 온도 상승폭 {lift} K, COP {cop}")]
    DegenerateCop { lift: f64, cop: f64 },
    #[error("{what} 유량 계산의 온도차가 0입니다")]
    ZeroFlow { what: &'static str },
}

/// 입력 벡터로 지정한 형식의 엑서지 수지를 계산한다.
///
/// 필요한 입력은 산술 계산 전에 모두 조회한다.
pub fn compute_exergy(
    inputs: &InputVector,
    topology: Topology,
) -> Result<ExergyResult, ExergyError> {
    match topology {
        Topology::Ashp => ashp::compute(&AshpInputs::from_vector(inputs)?),
        Topology::Gshp => gshp::compute(&GshpInputs::from_vector(inputs)?),
    }
}

impl From<InputError> for ExergyError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::Missing { id } => ExergyError::MissingDependency { id },
            InputError::NonFinite { id, value } => ExergyError::NonFiniteInput { id, value },
        }
    }
}

/// 보정계수 모델 COP = k·T_r_int / (T_r_ext - T_r_int).
///
/// 실외 측 냉매 온도가 실내 측보다 높아야 한다. 상승폭이 0 이하이면 `DegenerateCop`.
pub fn cop(k: f64, t_r_int: Kelvin, t_r_ext: Kelvin) -> Result<f64, ExergyError> {
    let lift = t_r_ext.value() - t_r_int.value();
    if lift <= 0.0 {
        return Err(ExergyError::DegenerateCop {
            lift,
            cop: k * t_r_int.value() / lift,
        });
    }
    Ok(k * t_r_int.value() / lift)
}

/// 압축기 동력 E_cmp = Q_r_int / COP. COP는 유한한 양수여야 한다.
pub fn compressor_power(q_r_int: f64, cop: f64, lift: f64) -> Result<f64, ExergyError> {
    if !(cop.is_finite() && cop > 0.0) {
        return Err(ExergyError::DegenerateCop { lift, cop });
    }
    Ok(q_r_int / cop)
}

/// 온도 `t`에서 전달되는 열량 `heat_kw`의 엑서지 `Q·(1 - T_0/T)`.
pub fn heat_exergy(heat_kw: f64, t: Kelvin, t_0: Kelvin) -> f64 {
    heat_kw * t.carnot_factor(t_0)
}

/// 두 형식이 공유하는 실내 측 온도.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IndoorTemperatures {
    pub t_0: Kelvin,
    pub t_a_int_in: Kelvin,
    pub t_a_int_out: Kelvin,
    pub t_r_int: Kelvin,
}

impl IndoorTemperatures {
    /// T_a_int_out = T_a_int_in - ΔT_a, T_r_int = T_a_int_out - ΔT_r.
    pub fn derive(
        t_0_c: f64,
        t_a_int_in_c: f64,
        dt_a: f64,
        dt_r: f64,
    ) -> Result<Self, ExergyError> {
        let t_a_int_out_c = t_a_int_in_c - dt_a;
        let t_r_int_c = t_a_int_out_c - dt_r;
        Ok(Self {
            t_0: Kelvin::from_celsius(t_0_c, "T_0")?,
            t_a_int_in: Kelvin::from_celsius(t_a_int_in_c, "T_a_int_in")?,
            t_a_int_out: Kelvin::from_celsius(t_a_int_out_c, "T_a_int_out")?,
            t_r_int: Kelvin::from_celsius(t_r_int_c, "T_r_int")?,
        })
    }
}

/// 실내기 단계: 냉매가 공급한 엑서지와 팬 동력이 실내 공기의 엑서지로 바뀐다.
pub(crate) struct IndoorUnit {
    pub air: AirStream,
    pub x_r_int: f64,
    pub balance: StageBalance,
}

impl IndoorUnit {
    pub fn compute(
        t: &IndoorTemperatures,
        q_r_int: f64,
        e_f_int: f64,
    ) -> Result<Self, ExergyError> {
        let air = AirStream::from_heat(
            q_r_int,
            t.t_a_int_in.value() - t.t_a_int_out.value(),
            t.t_a_int_in,
            t.t_a_int_out,
            t.t_0,
            "V_int",
        )?;
        let x_r_int = -heat_exergy(q_r_int, t.t_r_int, t.t_0);
        let balance = StageBalance::new(e_f_int + x_r_int, air.exergy_gain());
        Ok(Self {
            air,
            x_r_int,
            balance,
        })
    }
}
