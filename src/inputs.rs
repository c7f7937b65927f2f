use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::ParameterSpec;

/// 필수 입력값 조회 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("입력값이 없습니다: {id}")]
    Missing { id: String },
    #[error("유한하지 않은 입력값: {id} = {value}")]
    NonFinite { id: String, value: f64 },
}

/// 변수 기호 → 수치 값 매핑. 시스템 인스턴스 하나가 소유한다.
///
/// 온도는 °C, 온도차는 K, 동력과 열량은 kW 단위로 담는다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputVector {
    values: BTreeMap<String, f64>,
}

impl InputVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 카탈로그 기본값으로 채운 입력 벡터를 만든다.
    pub fn from_specs(specs: &[ParameterSpec]) -> Self {
        specs
            .iter()
            .map(|spec| (spec.id.clone(), spec.default))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.values.get(id).copied()
    }

    /// 필수 입력값을 조회한다. 값이 없거나 NaN/무한대이면 오류다.
    pub fn require(&self, id: &str) -> Result<f64, InputError> {
        match self.get(id) {
            Some(value) if value.is_finite() => Ok(value),
            Some(value) => Err(InputError::NonFinite {
                id: id.to_string(),
                value,
            }),
            None => Err(InputError::Missing { id: id.to_string() }),
        }
    }

    /// 값을 설정하고 이전 값을 반환한다.
    pub fn set(&mut self, id: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(id.into(), value)
    }

    pub fn remove(&mut self, id: &str) -> Option<f64> {
        self.values.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for InputVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
