use tracing::debug;

use super::result::{Capacities, ExergyResult, OutdoorSide, StageBalance, Temperatures};
use super::{
    compressor_power, cop, heat_exergy, AirStream, ExergyError, IndoorTemperatures, IndoorUnit,
};
use crate::catalog::Topology;
use crate::inputs::InputVector;
use crate::units::Kelvin;

/// 공기열원 히트펌프(냉방) 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AshpInputs {
    /// 환경(기준) 온도 [℃]
    pub t_0: f64,
    /// 실내기 입구 공기 온도 [℃]
    pub t_a_int_in: f64,
    /// 공기 입출구 온도차 [K]
    pub dt_a: f64,
    /// 냉매-공기 온도차 [K]
    pub dt_r: f64,
    /// COP 보정 계수
    pub k: f64,
    /// 실내기 팬 동력 [kW]
    pub e_f_int: f64,
    /// 실외기 팬 동력 [kW]
    pub e_f_ext: f64,
    /// 실내 흡열량 [kW]
    pub q_r_int: f64,
}

impl AshpInputs {
    pub fn from_vector(v: &InputVector) -> Result<Self, ExergyError> {
        Ok(Self {
            t_0: v.require("T_0")?,
            t_a_int_in: v.require("T_a_int_in")?,
            dt_a: v.require("dT_a")?,
            dt_r: v.require("dT_r")?,
            k: v.require("k")?,
            e_f_int: v.require("E_f_int")?,
            e_f_ext: v.require("E_f_ext")?,
            q_r_int: v.require("Q_r_int_A")?,
        })
    }
}

/// ASHP 엑서지 수지.
///
/// 실외기 공기는 T_0로 들어와 ΔT_a만큼 데워져 나가며, 실외 측 냉매 온도는
/// 실외기 출구 공기보다 ΔT_r 높다.
pub fn compute(i: &AshpInputs) -> Result<ExergyResult, ExergyError> {
    let indoor_t = IndoorTemperatures::derive(i.t_0, i.t_a_int_in, i.dt_a, i.dt_r)?;
    let t_0 = indoor_t.t_0;

    let t_a_ext_in_c = i.t_0;
    let t_a_ext_out_c = t_a_ext_in_c + i.dt_a;
    let t_r_ext_c = t_a_ext_out_c + i.dt_r;
    let t_a_ext_in = Kelvin::from_celsius(t_a_ext_in_c, "T_a_ext_in")?;
    let t_a_ext_out = Kelvin::from_celsius(t_a_ext_out_c, "T_a_ext_out")?;
    let t_r_ext = Kelvin::from_celsius(t_r_ext_c, "T_r_ext_A")?;

    let cop = cop(i.k, indoor_t.t_r_int, t_r_ext)?;
    let lift = t_r_ext.value() - indoor_t.t_r_int.value();
    let e_cmp = compressor_power(i.q_r_int, cop, lift)?;
    let q_r_ext = i.q_r_int + e_cmp;
    debug!(cop, e_cmp, q_r_ext, "ASHP 용량");

    let indoor = IndoorUnit::compute(&indoor_t, i.q_r_int, i.e_f_int)?;
    let outdoor_air = AirStream::from_heat(
        q_r_ext,
        t_a_ext_out.value() - t_a_ext_in.value(),
        t_a_ext_in,
        t_a_ext_out,
        t_0,
        "V_ext",
    )?;

    // 냉매가 실외 공기로 열을 내보낸다.
    let x_r_ext = heat_exergy(q_r_ext, t_r_ext, t_0);
    let refrigerant = StageBalance::new(e_cmp, indoor.x_r_int + x_r_ext);
    let outdoor_unit = StageBalance::new(i.e_f_ext + x_r_ext, outdoor_air.exergy_gain());
    let total = StageBalance::new(
        e_cmp + i.e_f_int + i.e_f_ext,
        indoor.balance.output + outdoor_unit.output,
    );
    debug!(
        xc_int = indoor.balance.consumption,
        xc_r = refrigerant.consumption,
        xc_ext = outdoor_unit.consumption,
        xc_total = total.consumption,
        "ASHP 엑서지 소비"
    );

    Ok(ExergyResult {
        topology: Topology::Ashp,
        temperatures: Temperatures {
            t_0,
            t_a_int_in: indoor_t.t_a_int_in,
            t_a_int_out: indoor_t.t_a_int_out,
            t_r_int: indoor_t.t_r_int,
            t_r_ext,
        },
        cop,
        capacities: Capacities {
            q_r_int: i.q_r_int,
            e_cmp,
            q_r_ext,
        },
        indoor_air: indoor.air,
        outdoor: OutdoorSide::Air {
            fan_power: i.e_f_ext,
            stream: outdoor_air,
            x_r_ext,
        },
        x_r_int: indoor.x_r_int,
        indoor_unit: indoor.balance,
        refrigerant,
        outdoor_unit,
        total,
    })
}
