use tracing::debug;

use super::result::{Capacities, ExergyResult, OutdoorSide, StageBalance, Temperatures};
use super::{compressor_power, cop, heat_exergy, ExergyError, IndoorTemperatures, IndoorUnit};
use crate::catalog::Topology;
use crate::inputs::InputVector;
use crate::units::Kelvin;

/// 지열원 히트펌프(냉방) 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GshpInputs {
    /// 환경(기준) 온도 [℃]
    pub t_0: f64,
    /// 토양 온도 [℃]
    pub t_g: f64,
    pub t_a_int_in: f64,
    pub dt_a: f64,
    pub dt_r: f64,
    pub k: f64,
    pub e_f_int: f64,
    /// 지중 순환 펌프 동력 [kW]
    pub e_pmp: f64,
    pub q_r_int: f64,
}

impl GshpInputs {
    pub fn from_vector(v: &InputVector) -> Result<Self, ExergyError> {
        Ok(Self {
            t_0: v.require("T_0")?,
            t_g: v.require("T_g")?,
            t_a_int_in: v.require("T_a_int_in")?,
            dt_a: v.require("dT_a")?,
            dt_r: v.require("dT_r")?,
            k: v.require("k")?,
            e_f_int: v.require("E_f_int")?,
            e_pmp: v.require("E_pmp_G")?,
            q_r_int: v.require("Q_r_int_G")?,
        })
    }
}

/// GSHP 엑서지 수지.
///
/// 실외 측 냉매 온도는 토양 온도보다 ΔT_a 높다. 지중 루프는 펌프 동력과 토양의
/// 엑서지를 받아 냉매 사이클에 엑서지를 공급한다.
pub fn compute(i: &GshpInputs) -> Result<ExergyResult, ExergyError> {
    let indoor_t = IndoorTemperatures::derive(i.t_0, i.t_a_int_in, i.dt_a, i.dt_r)?;
    let t_0 = indoor_t.t_0;

    let t_r_ext_c = i.t_g + i.dt_a;
    let t_g = Kelvin::from_celsius(i.t_g, "T_g")?;
    let t_r_ext = Kelvin::from_celsius(t_r_ext_c, "T_r_ext_G")?;

    let cop = cop(i.k, indoor_t.t_r_int, t_r_ext)?;
    let lift = t_r_ext.value() - indoor_t.t_r_int.value();
    let e_cmp = compressor_power(i.q_r_int, cop, lift)?;
    let q_r_ext = i.q_r_int + e_cmp;
    let q_g = q_r_ext + i.e_pmp;
    debug!(cop, e_cmp, q_r_ext, q_g, "GSHP 용량");

    let indoor = IndoorUnit::compute(&indoor_t, i.q_r_int, i.e_f_int)?;

    // 지중 루프 측에서 냉매로 들어가는 엑서지.
    let x_r_ext = -heat_exergy(q_r_ext, t_r_ext, t_0);
    let x_g = -heat_exergy(q_g, t_g, t_0);
    let refrigerant = StageBalance::new(e_cmp + x_r_ext, indoor.x_r_int);
    let ground_loop = StageBalance::new(i.e_pmp + x_g, x_r_ext);
    let total = StageBalance::new(e_cmp + i.e_f_int + i.e_pmp + x_g, indoor.balance.output);
    debug!(
        xc_int = indoor.balance.consumption,
        xc_r = refrigerant.consumption,
        xc_ghe = ground_loop.consumption,
        xc_total = total.consumption,
        "GSHP 엑서지 소비"
    );

    Ok(ExergyResult {
        topology: Topology::Gshp,
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
        outdoor: OutdoorSide::Ground {
            t_g,
            pump_power: i.e_pmp,
            q_g,
            x_g,
            x_r_ext,
        },
        x_r_int: indoor.x_r_int,
        indoor_unit: indoor.balance,
        refrigerant,
        outdoor_unit: ground_loop,
        total,
    })
}
