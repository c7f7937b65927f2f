use serde::{Deserialize, Serialize};
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const SESSION_MENU_TITLE: &str = "session_menu.title";
    pub const SESSION_MENU_ADD: &str = "session_menu.add";
    pub const SESSION_MENU_REMOVE: &str = "session_menu.remove";
    pub const SESSION_MENU_EDIT: &str = "session_menu.edit";
    pub const SESSION_MENU_LIST: &str = "session_menu.list";
    pub const SESSION_MENU_CALCULATE: &str = "session_menu.calculate";
    pub const SESSION_MENU_EXIT: &str = "session_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const PROMPT_TOPOLOGY: &str = "prompt.topology";
    pub const PROMPT_SYSTEM_NAME: &str = "prompt.system_name";
    pub const PROMPT_PARAMETER_ID: &str = "prompt.parameter_id";
    pub const PROMPT_VALUE: &str = "prompt.value";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const SESSION_EMPTY: &str = "session.empty";
    pub const SESSION_ADDED: &str = "session.added";
    pub const SESSION_REMOVED: &str = "session.removed";
    pub const SESSION_UPDATED: &str = "session.updated";

    pub const PARAMS_HEADING: &str = "params.heading";
    pub const HEADER_ID: &str = "header.id";
    pub const HEADER_LABEL: &str = "header.label";
    pub const HEADER_UNIT: &str = "header.unit";
    pub const HEADER_DEFAULT: &str = "header.default";
    pub const HEADER_STEP: &str = "header.step";
    pub const HEADER_RANGE: &str = "header.range";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_TEMPERATURES: &str = "result.temperatures";
    pub const RESULT_PERFORMANCE: &str = "result.performance";
    pub const RESULT_STAGES: &str = "result.stages";
    pub const RESULT_WATERFALL: &str = "result.waterfall";
    pub const RESULT_EFFICIENCY: &str = "result.efficiency";
    pub const RESULT_COMPARE_HEADING: &str = "result.compare_heading";

    pub const STAGE_INDOOR: &str = "stage.indoor";
    pub const STAGE_REFRIGERANT: &str = "stage.refrigerant";
    pub const STAGE_OUTDOOR: &str = "stage.outdoor";
    pub const STAGE_GROUND: &str = "stage.ground";
    pub const STAGE_TOTAL: &str = "stage.total";
    pub const COLUMN_INPUT: &str = "column.input";
    pub const COLUMN_OUTPUT: &str = "column.output";
    pub const COLUMN_CONSUMPTION: &str = "column.consumption";

    pub const VIOLATION_BELOW: &str = "violation.below";
    pub const VIOLATION_ABOVE: &str = "violation.above";
    pub const VIOLATION_NOT_FINITE: &str = "violation.not_finite";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 언어별 설명 문자열. 카탈로그의 변수 설명에 쓰인다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub ko: String,
}

impl LocalizedText {
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Ko => &self.ko,
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    lang: Language,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "ko".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        SESSION_MENU_TITLE => "\n=== Exergy Analyzer ===",
        SESSION_MENU_ADD => "1) 시스템 추가",
        SESSION_MENU_REMOVE => "2) 시스템 제거",
        SESSION_MENU_EDIT => "3) 입력값 수정",
        SESSION_MENU_LIST => "4) 시스템 목록",
        SESSION_MENU_CALCULATE => "5) 엑서지 계산",
        SESSION_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        PROMPT_TOPOLOGY => "시스템 종류 (1=ASHP, 2=GSHP): ",
        PROMPT_SYSTEM_NAME => "시스템 이름: ",
        PROMPT_PARAMETER_ID => "변수 기호 (ex: T_0): ",
        PROMPT_VALUE => "값 입력: ",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        SESSION_EMPTY => "추가된 시스템이 없습니다.",
        SESSION_ADDED => "시스템을 추가했습니다:",
        SESSION_REMOVED => "시스템을 제거했습니다:",
        SESSION_UPDATED => "입력값을 변경했습니다:",
        PARAMS_HEADING => "\n-- 입력 변수 --",
        HEADER_ID => "기호",
        HEADER_LABEL => "설명",
        HEADER_UNIT => "단위",
        HEADER_DEFAULT => "기본값",
        HEADER_STEP => "간격",
        HEADER_RANGE => "범위",
        RESULT_HEADING => "\n-- 엑서지 수지 --",
        RESULT_TEMPERATURES => "온도 [℃]",
        RESULT_PERFORMANCE => "성능",
        RESULT_STAGES => "단계별 엑서지 [kW]",
        RESULT_WATERFALL => "엑서지 흐름 (waterfall) [kW]",
        RESULT_EFFICIENCY => "엑서지 효율",
        RESULT_COMPARE_HEADING => "\n-- ASHP / GSHP 비교 --",
        STAGE_INDOOR => "실내기",
        STAGE_REFRIGERANT => "냉매 사이클",
        STAGE_OUTDOOR => "실외기",
        STAGE_GROUND => "지중 열교환기",
        STAGE_TOTAL => "전체",
        COLUMN_INPUT => "투입",
        COLUMN_OUTPUT => "산출",
        COLUMN_CONSUMPTION => "소비",
        VIOLATION_BELOW => "하한 미만",
        VIOLATION_ABOVE => "상한 초과",
        VIOLATION_NOT_FINITE => "유한한 값이 아님",
        _ => "",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        SESSION_MENU_TITLE => "\n=== Exergy Analyzer ===",
        SESSION_MENU_ADD => "1) Add system",
        SESSION_MENU_REMOVE => "2) Remove system",
        SESSION_MENU_EDIT => "3) Edit input",
        SESSION_MENU_LIST => "4) List systems",
        SESSION_MENU_CALCULATE => "5) Calculate exergy",
        SESSION_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        PROMPT_TOPOLOGY => "System type (1=ASHP, 2=GSHP): ",
        PROMPT_SYSTEM_NAME => "System name: ",
        PROMPT_PARAMETER_ID => "Parameter symbol (ex: T_0): ",
        PROMPT_VALUE => "Value: ",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        SESSION_EMPTY => "No system added yet.",
        SESSION_ADDED => "Added system:",
        SESSION_REMOVED => "Removed system:",
        SESSION_UPDATED => "Updated input:",
        PARAMS_HEADING => "\n-- Input Parameters --",
        HEADER_ID => "Symbol",
        HEADER_LABEL => "Explanation",
        HEADER_UNIT => "Unit",
        HEADER_DEFAULT => "Default",
        HEADER_STEP => "Step",
        HEADER_RANGE => "Range",
        RESULT_HEADING => "\n-- Exergy Balance --",
        RESULT_TEMPERATURES => "Temperatures [℃]",
        RESULT_PERFORMANCE => "Performance",
        RESULT_STAGES => "Exergy by stage [kW]",
        RESULT_WATERFALL => "Exergy waterfall [kW]",
        RESULT_EFFICIENCY => "Exergy efficiency",
        RESULT_COMPARE_HEADING => "\n-- ASHP / GSHP Comparison --",
        STAGE_INDOOR => "Indoor unit",
        STAGE_REFRIGERANT => "Refrigerant loop",
        STAGE_OUTDOOR => "Outdoor unit",
        STAGE_GROUND => "Ground heat exchanger",
        STAGE_TOTAL => "Total",
        COLUMN_INPUT => "Input",
        COLUMN_OUTPUT => "Output",
        COLUMN_CONSUMPTION => "Consumption",
        VIOLATION_BELOW => "below lower bound",
        VIOLATION_ABOVE => "above upper bound",
        VIOLATION_NOT_FINITE => "not a finite number",
        _ => return None,
    })
}
