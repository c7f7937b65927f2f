use std::fmt;

use serde::Serialize;
use tracing::warn;

use super::{CatalogError, ParameterSpec};
use crate::inputs::InputVector;

/// 범위 위반 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    BelowMinimum,
    AboveMaximum,
    /// NaN 또는 무한대
    NotFinite,
}

/// 입력값 하나의 범위 위반.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub id: String,
    pub kind: ViolationKind,
    pub value: f64,
    /// 위반한 경계의 계산된 값. `NotFinite`이면 없다.
    pub bound: Option<f64>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.bound) {
            (ViolationKind::BelowMinimum, Some(b)) => {
                write!(f, "{} = {} < {b}", self.id, self.value)
            }
            (ViolationKind::AboveMaximum, Some(b)) => {
                write!(f, "{} = {} > {b}", self.id, self.value)
            }
            _ => write!(f, "{} = {}", self.id, self.value),
        }
    }
}

/// 변수 정의 순서대로 입력값을 검사하고 위반 목록을 반환한다.
///
/// NaN/무한대 입력은 `NotFinite` 위반으로 보고한다. 입력값이나 범위 식이 참조하는 값이
/// 없으면 `MissingDependency`로 실패한다.
pub fn validate_inputs(
    specs: &[ParameterSpec],
    inputs: &InputVector,
) -> Result<Vec<Violation>, CatalogError> {
    let mut violations = Vec::new();
    for spec in specs {
        let value = inputs
            .get(&spec.id)
            .ok_or_else(|| CatalogError::MissingDependency {
                id: spec.id.clone(),
                required_by: None,
            })?;
        let (low, high) = spec.resolve_range(inputs)?;
        let violation = if !value.is_finite() {
            Some((ViolationKind::NotFinite, None))
        } else if value < low {
            Some((ViolationKind::BelowMinimum, Some(low)))
        } else if value > high {
            Some((ViolationKind::AboveMaximum, Some(high)))
        } else {
            None
        };
        if let Some((kind, bound)) = violation {
            let v = Violation {
                id: spec.id.clone(),
                kind,
                value,
                bound,
            };
            warn!(violation = %v, "입력값 범위 위반");
            violations.push(v);
        }
    }
    Ok(violations)
}
