//! 사용자가 구성한 시스템 인스턴스 모음.
//!
//! 화면 상태와 분리된 명시적 소유 컬렉션이며, 계산 엔진에는 인스턴스별 입력 벡터만
//! 빌려준다.

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::catalog::{Application, Catalog, CatalogError, Topology, Violation};
use crate::exergy::{self, ExergyError, ExergyResult};
use crate::inputs::InputVector;

/// 세션 조작 중 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("시스템을 찾을 수 없습니다: {0}")]
    UnknownSystem(String),
    #[error("{system}에 정의되지 않은 변수: {id}")]
    UnknownParameter { system: String, id: String },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// 구성된 시스템 하나. 입력 벡터를 단독으로 소유한다.
#[derive(Debug, Clone, Serialize)]
pub struct SystemInstance {
    pub name: String,
    pub application: Application,
    pub topology: Topology,
    pub inputs: InputVector,
}

impl SystemInstance {
    /// 현재 입력의 스냅샷으로 엑서지 수지를 계산한다.
    pub fn compute(&self) -> Result<ExergyResult, ExergyError> {
        exergy::compute_exergy(&self.inputs, self.topology)
    }
}

/// 시스템 인스턴스 모음. 이름은 "System N" 형식이며 번호는 제거 후에도 재사용하지 않는다.
#[derive(Debug, Default)]
pub struct Session {
    systems: Vec<SystemInstance>,
    counter: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 카탈로그 기본값으로 새 시스템을 추가하고 이름을 반환한다.
    pub fn add_system(
        &mut self,
        catalog: &Catalog,
        application: Application,
        topology: Topology,
    ) -> Result<&SystemInstance, SessionError> {
        let inputs = catalog.case(application, topology)?.defaults();
        self.counter += 1;
        let name = format!("System {}", self.counter);
        info!(%name, %application, %topology, "시스템 추가");
        self.systems.push(SystemInstance {
            name,
            application,
            topology,
            inputs,
        });
        let idx = self.systems.len() - 1;
        Ok(&self.systems[idx])
    }

    pub fn remove_system(&mut self, name: &str) -> Result<SystemInstance, SessionError> {
        let idx = self
            .systems
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| SessionError::UnknownSystem(name.to_string()))?;
        info!(name, "시스템 제거");
        Ok(self.systems.remove(idx))
    }

    pub fn get(&self, name: &str) -> Option<&SystemInstance> {
        self.systems.iter().find(|s| s.name == name)
    }

    pub fn systems(&self) -> &[SystemInstance] {
        &self.systems
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// 시스템의 입력값 하나를 바꾸고, 바뀐 입력 전체에 대한 범위 위반 목록을 반환한다.
    ///
    /// 범위를 벗어난 값도 저장한다. 재입력 여부는 호출 측이 판단한다.
    pub fn set_value(
        &mut self,
        catalog: &Catalog,
        name: &str,
        id: &str,
        value: f64,
    ) -> Result<Vec<Violation>, SessionError> {
        let system = self
            .systems
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| SessionError::UnknownSystem(name.to_string()))?;
        let case = catalog.case(system.application, system.topology)?;
        if case.spec(id).is_none() {
            return Err(SessionError::UnknownParameter {
                system: name.to_string(),
                id: id.to_string(),
            });
        }
        system.inputs.set(id, value);
        Ok(catalog.validate(&system.inputs, system.application, system.topology)?)
    }

    /// 모든 시스템을 병렬로 계산한다. 결과는 시스템 순서를 따른다.
    pub fn compute_all(&self) -> Vec<(&str, Result<ExergyResult, ExergyError>)> {
        self.systems
            .par_iter()
            .map(|s| (s.name.as_str(), s.compute()))
            .collect()
    }
}
