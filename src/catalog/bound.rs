use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::CatalogError;
use crate::inputs::InputVector;

/// 범위의 한쪽 경계.
///
/// 숫자 상수이거나, 다른 변수의 값에 부호 있는 오프셋을 더한 식(`T_a_int_in-2`)이다.
/// 식은 카탈로그 로드 시 한 번만 파싱한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    Literal(f64),
    Ref { id: String, offset: f64 },
}

/// 경계 식 문자열을 해석하지 못했을 때의 오류.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundParseError(pub String);

impl Bound {
    pub fn reference(id: impl Into<String>, offset: f64) -> Self {
        Bound::Ref {
            id: id.into(),
            offset,
        }
    }

    /// 참조하는 변수 기호. 상수면 `None`.
    pub fn dependency(&self) -> Option<&str> {
        match self {
            Bound::Literal(_) => None,
            Bound::Ref { id, .. } => Some(id),
        }
    }

    /// `owner` 변수의 경계를 입력 벡터에 대해 계산한다.
    pub fn resolve(&self, owner: &str, inputs: &InputVector) -> Result<f64, CatalogError> {
        match self {
            Bound::Literal(v) => Ok(*v),
            Bound::Ref { id, offset } => {
                if id == owner {
                    return Err(CatalogError::CyclicRange {
                        cycle: vec![owner.to_string(), owner.to_string()],
                    });
                }
                let base = inputs
                    .get(id)
                    .ok_or_else(|| CatalogError::MissingDependency {
                        id: id.clone(),
                        required_by: Some(owner.to_string()),
                    })?;
                Ok(base + offset)
            }
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for Bound {
    type Err = BoundParseError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        // 수식 표기의 마이너스 기호(U+2212)도 허용한다.
        let text = src.trim().replace('\u{2212}', "-");
        if let Ok(v) = text.parse::<f64>() {
            return Ok(Bound::Literal(v));
        }
        let err = || BoundParseError(src.to_string());

        let (id, rest) = match text.find(['+', '-']) {
            Some(pos) => text.split_at(pos),
            None => (text.as_str(), ""),
        };
        let id = id.trim();
        if !is_identifier(id) {
            return Err(err());
        }
        let offset = if rest.is_empty() {
            0.0
        } else {
            let (sign, magnitude) = rest.split_at(1);
            let magnitude: f64 = magnitude.trim().parse().map_err(|_| err())?;
            if !magnitude.is_finite() || magnitude < 0.0 {
                return Err(err());
            }
            if sign == "-" {
                -magnitude
            } else {
                magnitude
            }
        };
        Ok(Bound::reference(id, offset))
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Literal(v) => write!(f, "{v}"),
            Bound::Ref { id, offset } if *offset == 0.0 => write!(f, "{id}"),
            Bound::Ref { id, offset } if *offset < 0.0 => write!(f, "{id}-{}", -offset),
            Bound::Ref { id, offset } => write!(f, "{id}+{offset}"),
        }
    }
}
