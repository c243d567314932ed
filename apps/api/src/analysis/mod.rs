//! Prompt builder and dispatcher — maps an analysis kind to its prompt
//! template, fills the slots, and runs the model call(s).

pub mod prompts;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::grammar::GrammarClient;
use crate::llm_client::LlmClient;
use prompts::{
    BASIC_MATCH_PROMPT_TEMPLATE, COVER_LETTER_PROMPT_TEMPLATE, FOLLOW_UP_PROMPT_TEMPLATE,
    INDUSTRY_CLASSIFY_PROMPT_TEMPLATE, INDUSTRY_FEEDBACK_PROMPT_TEMPLATE,
    INTERVIEW_PREP_PROMPT_TEMPLATE, RESUME_VERSIONS_PROMPT_TEMPLATE, SKILL_GAP_PROMPT_TEMPLATE,
};

/// The seven kinds of feedback a session can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisKind {
    BasicMatch,
    SkillGap,
    CoverLetter,
    InterviewPrep,
    ResumeVersions,
    IndustryFeedback,
    GrammarCheck,
}

impl AnalysisKind {
    /// Human-readable name, used in logs and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisKind::BasicMatch => "Basic Resume Analysis",
            AnalysisKind::SkillGap => "Skill Gap Analysis",
            AnalysisKind::CoverLetter => "Cover Letter Generation",
            AnalysisKind::InterviewPrep => "Interview Preparation",
            AnalysisKind::ResumeVersions => "Resume Versions",
            AnalysisKind::IndustryFeedback => "Industry-Specific Feedback",
            AnalysisKind::GrammarCheck => "Grammar Check on Resume",
        }
    }
}

/// Fills the two interpolation slots shared by every analysis template.
pub fn render_prompt(template: &str, resume_text: &str, job_text: &str) -> String {
    template
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_text)
}

/// Builds the follow-up chat prompt for one question.
pub fn follow_up_prompt(question: &str, resume_text: &str, job_text: &str) -> String {
    render_prompt(
        &FOLLOW_UP_PROMPT_TEMPLATE.replace("{question}", question),
        resume_text,
        job_text,
    )
}

/// The step-one reply is used as-is apart from trimming surrounding
/// whitespace. There is no fallback for an empty or unexpected label.
fn industry_label(reply: &str) -> String {
    reply.trim().to_string()
}

fn industry_feedback_prompt(industry: &str, resume_text: &str, job_text: &str) -> String {
    render_prompt(
        &INDUSTRY_FEEDBACK_PROMPT_TEMPLATE.replace("{industry}", industry),
        resume_text,
        job_text,
    )
}

/// Runs the analysis for `kind` and returns the result text verbatim.
/// Every kind maps to a single model call, except industry feedback
/// (two sequential calls) and grammar check (LanguageTool, no model call).
pub async fn run_analysis(
    kind: AnalysisKind,
    resume_text: &str,
    job_text: &str,
    llm: &LlmClient,
    grammar: &GrammarClient,
) -> Result<String, AppError> {
    let template = match kind {
        AnalysisKind::BasicMatch => BASIC_MATCH_PROMPT_TEMPLATE,
        AnalysisKind::SkillGap => SKILL_GAP_PROMPT_TEMPLATE,
        AnalysisKind::CoverLetter => COVER_LETTER_PROMPT_TEMPLATE,
        AnalysisKind::InterviewPrep => INTERVIEW_PREP_PROMPT_TEMPLATE,
        AnalysisKind::ResumeVersions => RESUME_VERSIONS_PROMPT_TEMPLATE,
        AnalysisKind::IndustryFeedback => {
            return industry_feedback(resume_text, job_text, llm).await;
        }
        AnalysisKind::GrammarCheck => {
            return Ok(grammar.check(resume_text).await);
        }
    };

    let prompt = render_prompt(template, resume_text, job_text);
    llm.call(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("{} failed: {e}", kind.label())))
}

/// Two-step pipeline: classify the industry from the job description, then
/// embed the label in the feedback prompt.
async fn industry_feedback(
    resume_text: &str,
    job_text: &str,
    llm: &LlmClient,
) -> Result<String, AppError> {
    let classify_prompt = INDUSTRY_CLASSIFY_PROMPT_TEMPLATE.replace("{job_description}", job_text);
    let reply = llm
        .call(&classify_prompt)
        .await
        .map_err(|e| AppError::Llm(format!("industry classification failed: {e}")))?;
    let industry = industry_label(&reply);

    let feedback_prompt = industry_feedback_prompt(&industry, resume_text, job_text);
    llm.call(&feedback_prompt)
        .await
        .map_err(|e| AppError::Llm(format!("industry feedback failed: {e}")))
}
