//! Placement-analysis collaborator surface.
//!
//! The analysis service itself is an opaque remote model; this module
//! owns everything around it that has testable behavior: the read-only
//! request snapshot, the typed report schema, student-name masking, the
//! Korean prompt, parsing of the service's JSON payload, and the
//! classification of service failures into human-readable narratives.
//!
//! The core never acts on a report automatically. Suggested moves are
//! display data; applying one funnels back through
//! [`ClassBoard::move_student`](crate::ClassBoard::move_student).
//! While a request is outstanding the board keeps mutating normally, so
//! a report always describes the state at request time and may be stale
//! by the time it arrives.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AppState, Gender, SchoolLevel, SeparationRule, Student, TagDefinition};

/// Read-only input to one analysis request.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest<'a> {
    pub students: &'a [Student],
    pub tags: &'a [TagDefinition],
    pub rules: &'a [SeparationRule],
    pub class_count: u32,
    pub school_level: SchoolLevel,
}

impl<'a> AnalysisRequest<'a> {
    /// Borrows a request from a board snapshot.
    pub fn from_state(state: &'a AppState) -> Self {
        Self {
            students: &state.students,
            tags: &state.tags,
            rules: &state.separation_rules,
            class_count: state.class_count,
            school_level: state.school_level,
        }
    }
}

/// Structured analysis report, mirroring the service's JSON schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Overall placement balance, 0–100, higher is better.
    pub overall_score: f64,
    /// Free-form overall assessment.
    pub overall_comment: String,
    /// Per-class assessments.
    pub classes: Vec<ClassAssessment>,
    /// General improvement suggestions.
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Concrete student moves the service proposes.
    #[serde(default)]
    pub suggested_moves: Vec<SuggestedMove>,
    /// Predicted overall score if every suggested move were applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_score: Option<f64>,
}

/// One class's risk/balance assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassAssessment {
    pub class_id: String,
    /// Teaching-burden risk, 0–100, higher is worse.
    pub risk_score: f64,
    /// Member harmony/balance, 0–100, higher is better.
    pub balance_score: f64,
    pub comment: String,
}

/// A proposed student move, keyed by display name (the service only
/// ever sees masked names, never ids).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedMove {
    pub student_name: String,
    /// `"미배정"` when the student is currently unassigned.
    pub current_class: String,
    pub target_class: String,
    pub reason: String,
}

/// A classified analysis failure. Non-fatal: the board stays fully
/// interactive and undo/redo-safe regardless.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// No API credentials configured.
    #[error("analysis credentials missing")]
    MissingCredentials,

    /// The credential rejected this caller (referrer/origin block).
    #[error("analysis credentials rejected for this origin")]
    ReferrerBlocked,

    /// Quota or rate limit exhausted.
    #[error("analysis quota exceeded")]
    QuotaExceeded,

    /// Transport or remote-side failure.
    #[error("analysis service error: {message}")]
    Remote { message: String },

    /// The service answered but the payload did not match the schema.
    #[error("analysis response could not be parsed")]
    MalformedResponse,
}

impl AnalysisError {
    /// Operator-facing narrative for this failure, shown verbatim in
    /// place of a report.
    pub fn narrative(&self) -> String {
        match self {
            AnalysisError::MissingCredentials => "🚫 **API 키 미설정**\n\n시스템 설정에서 API 키를 확인할 수 없습니다. 관리자에게 문의하거나 네트워크 상태를 확인해주세요.".to_string(),
            AnalysisError::ReferrerBlocked => "🚫 **API 키 설정 오류**\n\n현재 도메인(Referer)이 API 키 허용 목록에 포함되지 않았습니다. API 키 설정을 확인하고 현재 도메인 주소를 추가해주세요.".to_string(),
            AnalysisError::QuotaExceeded => "⚠️ **API 사용량 초과**\n\n잠시 후 다시 시도해 주세요. (Quota Exceeded)".to_string(),
            AnalysisError::Remote { message } => format!(
                "⚠️ **AI 분석 중 오류 발생**\n\n오류 내용: {message}\n\n잠시 후 다시 시도하거나, 문제가 지속되면 관리자에게 문의하세요."
            ),
            AnalysisError::MalformedResponse => "⚠️ **AI 분석 중 오류 발생**\n\n분석 결과를 해석할 수 없습니다. 잠시 후 다시 시도해주세요.".to_string(),
        }
    }
}

/// Transport seam for the remote analysis service.
///
/// Implementations issue one request against a snapshot taken at call
/// time and return a single report or a classified failure; there are
/// no partial or streaming updates, and "cancellation" is simply firing
/// a new request and discarding the previous response.
pub trait AnalysisService {
    fn analyze(&self, request: &AnalysisRequest<'_>) -> Result<AnalysisReport, AnalysisError>;
}

/// Masks a student name for the outbound prompt.
///
/// Two-character names mask the second character; longer names mask the
/// second character only (홍길동 → 홍○동, 남궁민수 → 남○민수).
pub fn mask_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    match chars.len() {
        0 | 1 => name.to_string(),
        2 => format!("{}○", chars[0]),
        _ => {
            let tail: String = chars[2..].iter().collect();
            format!("{}○{}", chars[0], tail)
        }
    }
}

/// Classifies a raw service/transport error message.
///
/// Substring matching mirrors the error strings the remote service is
/// known to emit; anything unrecognized stays a generic remote error.
pub fn classify_service_error(message: &str) -> AnalysisError {
    if message.contains("API_KEY_HTTP_REFERRER_BLOCKED")
        || message.contains("Requests from referer")
        || (message.contains("403") && message.contains("blocked"))
    {
        return AnalysisError::ReferrerBlocked;
    }
    if message.contains("429")
        || message.contains("Quota")
        || message.contains("RESOURCE_EXHAUSTED")
    {
        return AnalysisError::QuotaExceeded;
    }
    AnalysisError::Remote {
        message: message.to_string(),
    }
}

/// Parses the service's JSON payload into a report.
pub fn parse_report(payload: &str) -> Result<AnalysisReport, AnalysisError> {
    serde_json::from_str(payload).map_err(|_| AnalysisError::MalformedResponse)
}

/// Builds the Korean analysis prompt over masked rosters.
///
/// Names are always masked; ids never leave the process.
pub fn build_prompt(request: &AnalysisRequest<'_>) -> String {
    let capacity = request.school_level.capacity_per_class();
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "당신은 특수학교 반편성 전문가입니다.\n현재 반 편성 상황을 분석하고, 개선이 필요하다면 구체적인 학생 이동 제안을 포함한 리포트를 JSON 형식으로 제공해주세요.\n"
    );
    let _ = writeln!(
        prompt,
        "**설정 정보:**\n- 학교 급: {} (정원 {capacity}명)\n- 총 학급 수: {}개\n- 반 정원 제한: {capacity}명\n",
        request.school_level.label(),
        request.class_count
    );
    let _ = writeln!(
        prompt,
        "**특성 Tag 해석 가이드:**\n1. 부담 가중 요소: '공격성', '화장실지원', '보행지원', '휠체어', '학부모예민', '분쇄식' 등 -> 교사의 지도 부담을 높임. 특정 반에 몰리면 안 됨.\n2. 부담 경감 요소: '잦은결석', '교사보조가능' -> 지도 부담을 다소 완화해줌.\n3. 목표: 모든 반의 Risk Score를 비슷하게 유지, 성별 균형 고려, '분리 배정 규칙' 준수 필수.\n"
    );

    let _ = writeln!(prompt, "**현재 편성 현황:**");
    for class_id in 1..=request.class_count {
        let class_id = class_id.to_string();
        let members: Vec<&Student> = request
            .students
            .iter()
            .filter(|s| s.is_in_class(&class_id))
            .collect();
        let males = members
            .iter()
            .filter(|s| s.gender == Some(Gender::Male))
            .count();
        let females = members
            .iter()
            .filter(|s| s.gender == Some(Gender::Female))
            .count();
        let roster = members
            .iter()
            .map(|s| describe_student(s, request.tags))
            .collect::<Vec<_>>()
            .join(" / ");
        let _ = writeln!(
            prompt,
            "[{class_id}반] (총 {}명 - 남:{males} / 여:{females})\n학생들: {roster}",
            members.len()
        );
    }

    let unassigned = request
        .students
        .iter()
        .filter(|s| !s.is_assigned())
        .map(|s| describe_student(s, request.tags))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(
        prompt,
        "\n**미배정 학생:**\n{}",
        if unassigned.is_empty() { "없음" } else { unassigned.as_str() }
    );

    let _ = writeln!(prompt, "\n**분리 배정 규칙(서로 같은 반이 되면 안됨):**");
    if request.rules.is_empty() {
        let _ = writeln!(prompt, "없음");
    } else {
        for (idx, rule) in request.rules.iter().enumerate() {
            let names = rule
                .student_ids
                .iter()
                .filter_map(|sid| request.students.iter().find(|s| &s.id == sid))
                .map(|s| mask_name(&s.name))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(prompt, "{}. {names}", idx + 1);
        }
    }

    let _ = writeln!(
        prompt,
        "\n**요청 사항:**\n1. 현재 상태의 점수(overallScore)와 반별 점수를 계산하세요.\n2. 불균형이 심하거나 미배정 학생이 있다면 suggestedMoves 배열에 구체적인 이동/배정 제안을 담아주세요.\n3. 제안된 이동을 적용했을 때 예상되는 predictedScore를 예측해주세요."
    );

    prompt
}

fn describe_student(student: &Student, tags: &[TagDefinition]) -> String {
    let gender = match student.gender {
        Some(Gender::Male) => "남",
        Some(Gender::Female) => "여",
        None => "",
    };
    let tag_labels = student
        .tag_ids
        .iter()
        .filter_map(|tid| tags.iter().find(|t| &t.id == tid))
        .map(|t| t.label.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut info = Vec::new();
    if !gender.is_empty() {
        info.push(gender.to_string());
    }
    if !tag_labels.is_empty() {
        info.push(tag_labels);
    }
    format!("{}({})", mask_name(&student.name), info.join(", "))
}
