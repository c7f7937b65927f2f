//! 적용 분야(냉방/난방/급탕) × 시스템 형식(ASHP/GSHP)별 입력 변수 카탈로그.
//!
//! 카탈로그는 TOML로 기술하며 내장본은 `builtin.toml`이다. 범위 경계 식은 로드 시
//! 한 번 파싱하고, 참조 무결성·순환·기본값 범위를 그 자리에서 검사한다.

pub mod bound;
pub mod validate;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::i18n::{Language, LocalizedText};
use crate::inputs::InputVector;
use crate::quantity::QuantityKind;

pub use bound::Bound;
pub use validate::{Violation, ViolationKind};

const BUILTIN_CATALOG: &str = include_str!("builtin.toml");

/// 적용 분야.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Application {
    Cooling,
    Heating,
    HotWater,
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Application::Cooling => "COOLING",
            Application::Heating => "HEATING",
            Application::HotWater => "HOT_WATER",
        })
    }
}

/// 히트펌프 시스템 형식.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Topology {
    /// 공기열원 히트펌프
    Ashp,
    /// 지열원 히트펌프
    Gshp,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Topology::Ashp => "ASHP",
            Topology::Gshp => "GSHP",
        })
    }
}

/// 카탈로그 조회/로드/검증 중 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("정의되지 않은 시스템 케이스: {application}/{topology}")]
    UnknownCase {
        application: Application,
        topology: Topology,
    },
    #[error("입력값이 없습니다: {id}{}", referenced_by(.required_by))]
    MissingDependency {
        id: String,
        required_by: Option<String>,
    },
    #[error("{application}/{topology}에 정의되지 않은 변수: {id}")]
    UnknownParameter {
        application: Application,
        topology: Topology,
        id: String,
    },
    #[error("범위 경계가 순환 참조합니다: {}", .cycle.join(" -> "))]
    CyclicRange { cycle: Vec<String> },
    #[error("잘못된 범위 식: {parameter} = '{expr}'")]
    InvalidBound { parameter: String, expr: String },
    #[error("중복된 변수 기호: {id}")]
    DuplicateParameter { id: String },
    #[error("기본값이 범위를 벗어남: {id} = {default} (범위 {low} ~ {high})")]
    InconsistentDefault {
        id: String,
        default: f64,
        low: f64,
        high: f64,
    },
    #[error("카탈로그 파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("카탈로그 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
}

fn referenced_by(owner: &Option<String>) -> String {
    owner
        .as_ref()
        .map(|p| format!(" ({p}의 범위에서 참조)"))
        .unwrap_or_default()
}

/// 입력 변수 하나의 정의.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub id: String,
    pub label: LocalizedText,
    pub latex: String,
    pub unit: QuantityKind,
    pub default: f64,
    pub step: f64,
    pub range: (Bound, Bound),
}

impl ParameterSpec {
    pub fn label(&self, lang: Language) -> &str {
        self.label.get(lang)
    }

    /// 범위 경계를 입력 벡터에 대해 계산한다.
    pub fn resolve_range(&self, inputs: &InputVector) -> Result<(f64, f64), CatalogError> {
        resolve_range(self, inputs)
    }
}

/// 변수의 (하한, 상한)을 주어진 입력 벡터에 대해 계산한다.
pub fn resolve_range(
    spec: &ParameterSpec,
    inputs: &InputVector,
) -> Result<(f64, f64), CatalogError> {
    let low = spec.range.0.resolve(&spec.id, inputs)?;
    let high = spec.range.1.resolve(&spec.id, inputs)?;
    Ok((low, high))
}

/// (적용 분야, 시스템 형식) 하나에 속한 변수 목록.
#[derive(Debug, Clone, Serialize)]
pub struct SystemCase {
    pub application: Application,
    pub topology: Topology,
    pub parameters: Vec<ParameterSpec>,
}

impl SystemCase {
    pub fn spec(&self, id: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.id == id)
    }

    pub fn defaults(&self) -> InputVector {
        InputVector::from_specs(&self.parameters)
    }

    /// 정적 무결성 검사: 중복 기호, 미정의 참조, 순환 참조, 기본값 범위.
    fn check_integrity(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for spec in &self.parameters {
            if !seen.insert(spec.id.as_str()) {
                return Err(CatalogError::DuplicateParameter {
                    id: spec.id.clone(),
                });
            }
        }
        for spec in &self.parameters {
            for dep in [&spec.range.0, &spec.range.1]
                .into_iter()
                .filter_map(Bound::dependency)
            {
                if !seen.contains(dep) {
                    return Err(CatalogError::MissingDependency {
                        id: dep.to_string(),
                        required_by: Some(spec.id.clone()),
                    });
                }
            }
        }
        if let Some(cycle) = find_cycle(&self.parameters) {
            return Err(CatalogError::CyclicRange { cycle });
        }

        let defaults = self.defaults();
        for spec in &self.parameters {
            let (low, high) = spec.resolve_range(&defaults)?;
            if !(low <= spec.default && spec.default <= high) {
                return Err(CatalogError::InconsistentDefault {
                    id: spec.id.clone(),
                    default: spec.default,
                    low,
                    high,
                });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// 범위 참조 그래프에서 순환을 찾아 경로를 반환한다.
fn find_cycle(specs: &[ParameterSpec]) -> Option<Vec<String>> {
    let edges: HashMap<&str, Vec<&str>> = specs
        .iter()
        .map(|s| {
            let deps = [&s.range.0, &s.range.1]
                .into_iter()
                .filter_map(Bound::dependency)
                .collect();
            (s.id.as_str(), deps)
        })
        .collect();

    fn visit<'a>(
        node: &'a str,
        edges: &HashMap<&'a str, Vec<&'a str>>,
        marks: &mut HashMap<&'a str, Mark>,
        path: &mut Vec<&'a str>,
    ) -> Option<Vec<String>> {
        match marks.get(node) {
            Some(Mark::Done) => return None,
            Some(Mark::Visiting) => {
                let start = path.iter().position(|n| *n == node).unwrap_or(0);
                let mut cycle: Vec<String> =
                    path[start..].iter().map(|n| n.to_string()).collect();
                cycle.push(node.to_string());
                return Some(cycle);
            }
            None => {}
        }
        marks.insert(node, Mark::Visiting);
        path.push(node);
        for next in edges.get(node).into_iter().flatten() {
            if let Some(cycle) = visit(*next, edges, marks, path) {
                return Some(cycle);
            }
        }
        path.pop();
        marks.insert(node, Mark::Done);
        None
    }

    let mut marks = HashMap::new();
    let mut path = Vec::new();
    specs
        .iter()
        .find_map(|s| visit(s.id.as_str(), &edges, &mut marks, &mut path))
}

/// 전체 카탈로그.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    cases: Vec<SystemCase>,
}

impl Catalog {
    /// 빌드 시 포함된 내장 카탈로그를 로드한다.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(src: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = toml::from_str(src)?;
        let mut cases = Vec::with_capacity(raw.case.len());
        for raw_case in raw.case {
            let parameters = raw_case
                .parameter
                .into_iter()
                .map(RawParameter::into_spec)
                .collect::<Result<Vec<_>, _>>()?;
            let case = SystemCase {
                application: raw_case.application,
                topology: raw_case.topology,
                parameters,
            };
            case.check_integrity()?;
            debug!(
                application = %case.application,
                topology = %case.topology,
                parameters = case.parameters.len(),
                "카탈로그 케이스 로드"
            );
            cases.push(case);
        }
        Ok(Self { cases })
    }

    pub fn cases(&self) -> &[SystemCase] {
        &self.cases
    }

    /// 변수 정의가 있는 케이스를 찾는다. 비어 있는 케이스도 미정의로 취급한다.
    pub fn case(
        &self,
        application: Application,
        topology: Topology,
    ) -> Result<&SystemCase, CatalogError> {
        self.cases
            .iter()
            .find(|c| {
                c.application == application
                    && c.topology == topology
                    && !c.parameters.is_empty()
            })
            .ok_or(CatalogError::UnknownCase {
                application,
                topology,
            })
    }

    /// 케이스의 변수 정의를 순서대로 반환한다.
    pub fn specs(
        &self,
        application: Application,
        topology: Topology,
    ) -> Result<&[ParameterSpec], CatalogError> {
        Ok(&self.case(application, topology)?.parameters)
    }

    /// 입력 벡터를 해당 케이스의 범위로 검사한다. 카탈로그와 입력은 변경하지 않는다.
    pub fn validate(
        &self,
        inputs: &InputVector,
        application: Application,
        topology: Topology,
    ) -> Result<Vec<Violation>, CatalogError> {
        validate::validate_inputs(self.specs(application, topology)?, inputs)
    }
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    case: Vec<RawCase>,
}

#[derive(Debug, Deserialize)]
struct RawCase {
    application: Application,
    topology: Topology,
    #[serde(default)]
    parameter: Vec<RawParameter>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBound {
    Number(f64),
    Expr(String),
}

#[derive(Debug, Deserialize)]
struct RawParameter {
    id: String,
    label: LocalizedText,
    latex: String,
    unit: QuantityKind,
    default: f64,
    step: f64,
    range: [RawBound; 2],
}

impl RawParameter {
    fn into_spec(self) -> Result<ParameterSpec, CatalogError> {
        let [low, high] = self.range;
        let parse = |raw: RawBound| match raw {
            RawBound::Number(v) => Ok(Bound::Literal(v)),
            RawBound::Expr(expr) => expr.parse().map_err(|_| CatalogError::InvalidBound {
                parameter: self.id.clone(),
                expr,
            }),
        };
        let range = (parse(low)?, parse(high)?);
        Ok(ParameterSpec {
            id: self.id,
            label: self.label,
            latex: self.latex,
            unit: self.unit,
            default: self.default,
            step: self.step,
            range,
        })
    }
}
