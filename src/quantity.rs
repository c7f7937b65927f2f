use serde::{Deserialize, Serialize};

/// 입력 변수가 나타내는 물리량 종류.
///
/// 경계에서의 단위는 고정이다: 온도는 °C, 온도차는 K, 동력/열량은 kW.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    Temperature,
    TemperatureDifference,
    Power,
    Dimensionless,
}

impl QuantityKind {
    /// 표에 표시할 단위 기호.
    pub fn symbol(self) -> &'static str {
        match self {
            QuantityKind::Temperature => "℃",
            QuantityKind::TemperatureDifference => "K",
            QuantityKind::Power => "kW",
            QuantityKind::Dimensionless => "-",
        }
    }
}
