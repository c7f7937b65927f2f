use serde::Serialize;

use super::air::AirStream;
use crate::catalog::Topology;
use crate::units::Kelvin;

/// 한 단계의 엑서지 수지. 소비는 항상 투입 - 산출이다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageBalance {
    pub input: f64,
    pub output: f64,
    pub consumption: f64,
}

impl StageBalance {
    pub fn new(input: f64, output: f64) -> Self {
        Self {
            input,
            output,
            consumption: input - output,
        }
    }
}

/// 두 형식이 공유하는 절대온도.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Temperatures {
    pub t_0: Kelvin,
    pub t_a_int_in: Kelvin,
    pub t_a_int_out: Kelvin,
    pub t_r_int: Kelvin,
    pub t_r_ext: Kelvin,
}

/// 열량과 압축기 동력 [kW].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Capacities {
    /// 실내 흡열량
    pub q_r_int: f64,
    /// 압축기 동력
    pub e_cmp: f64,
    /// 실외(지중) 측 방열량
    pub q_r_ext: f64,
}

/// 실외 측 열교환 매체별 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "medium", rename_all = "snake_case")]
pub enum OutdoorSide {
    Air {
        fan_power: f64,
        stream: AirStream,
        /// 냉매가 실외 공기로 내보내는 엑서지
        x_r_ext: f64,
    },
    Ground {
        t_g: Kelvin,
        pump_power: f64,
        /// 지중 열교환량 `Q_g = Q_r_ext + E_pmp`
        q_g: f64,
        /// 지중에서 공급되는 엑서지
        x_g: f64,
        /// 지중 루프에서 냉매로 들어가는 엑서지
        x_r_ext: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Input,
    Loss,
    Output,
}

/// waterfall 표시용 한 칸. 손실 칸의 값은 음수다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaterfallStep {
    pub label: &'static str,
    pub kind: StepKind,
    pub value: f64,
}

/// 한 형식의 엑서지 수지 계산 결과. 재계산할 때마다 새로 만든다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExergyResult {
    pub topology: Topology,
    pub temperatures: Temperatures,
    pub cop: f64,
    pub capacities: Capacities,
    pub indoor_air: AirStream,
    pub outdoor: OutdoorSide,
    /// 냉매가 실내기 측에 공급하는 엑서지
    pub x_r_int: f64,
    pub indoor_unit: StageBalance,
    pub refrigerant: StageBalance,
    /// ASHP는 실외기, GSHP는 지중 열교환기
    pub outdoor_unit: StageBalance,
    pub total: StageBalance,
}

impl ExergyResult {
    /// 단계별 소비의 합. 전체 소비와 부동소수점 오차 내에서 같아야 한다.
    pub fn consumption_sum(&self) -> f64 {
        self.indoor_unit.consumption
            + self.refrigerant.consumption
            + self.outdoor_unit.consumption
    }

    /// 실내 공기가 얻은 엑서지. 시스템의 유효 산출이다.
    pub fn useful_output(&self) -> f64 {
        self.indoor_unit.output
    }

    pub fn exergy_efficiency(&self) -> f64 {
        self.useful_output() / self.total.input
    }

    pub fn t_a_ext_in(&self) -> Option<Kelvin> {
        match &self.outdoor {
            OutdoorSide::Air { stream, .. } => Some(stream.t_in),
            OutdoorSide::Ground { .. } => None,
        }
    }

    pub fn t_a_ext_out(&self) -> Option<Kelvin> {
        match &self.outdoor {
            OutdoorSide::Air { stream, .. } => Some(stream.t_out),
            OutdoorSide::Ground { .. } => None,
        }
    }

    pub fn outdoor_stage_label(&self) -> &'static str {
        match self.topology {
            Topology::Ashp => "X_c,ext",
            Topology::Gshp => "X_c,GHE",
        }
    }

    /// 투입에서 단계별 소비를 차례로 빼 유효 산출에 이르는 흐름.
    ///
    /// ASHP는 실외 공기로 버려지는 엑서지(`X_ext,out`)를 별도 칸으로 둔다.
    pub fn waterfall(&self) -> Vec<WaterfallStep> {
        let loss = |label, value: f64| WaterfallStep {
            label,
            kind: StepKind::Loss,
            value: -value,
        };
        let mut steps = vec![
            WaterfallStep {
                label: "Input",
                kind: StepKind::Input,
                value: self.total.input,
            },
            loss("X_c,int", self.indoor_unit.consumption),
            loss("X_c,ref", self.refrigerant.consumption),
            loss(self.outdoor_stage_label(), self.outdoor_unit.consumption),
        ];
        if let OutdoorSide::Air { .. } = self.outdoor {
            steps.push(loss("X_ext,out", self.outdoor_unit.output));
        }
        steps.push(WaterfallStep {
            label: "Output",
            kind: StepKind::Output,
            value: self.useful_output(),
        });
        steps
    }
}
