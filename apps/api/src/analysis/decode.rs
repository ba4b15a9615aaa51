//! Decode-with-default for model output.
//!
//! Strictly decode the expected shape; on any failure build the documented
//! degraded default from the raw text. Parse errors never escape.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::analysis::types::{AtsAnalysis, JobMatchAnalysis};
use crate::llm_client::strip_json_fences;

pub const ATS_DEGRADED_SCORE: u32 = 75;
pub const JOB_MATCH_DEGRADED_SCORE: u32 = 70;

/// A result shape with a deterministic fallback.
pub trait AnalysisShape: DeserializeOwned {
    /// Label used in logs.
    const KIND: &'static str;
    /// Notice shown when the collaborator call itself fails.
    const FAILURE_NOTICE: &'static str;

    /// The placeholder result; non-blank `raw` text is folded into
    /// `recommendations`.
    fn degraded(raw: &str) -> Self;
}

impl AnalysisShape for AtsAnalysis {
    const KIND: &'static str = "ATS";
    const FAILURE_NOTICE: &'static str = "Failed to analyze resume. Please try again.";

    fn degraded(raw: &str) -> Self {
        AtsAnalysis {
            score: ATS_DEGRADED_SCORE,
            strengths: vec![
                "Professional formatting".to_string(),
                "Clear structure".to_string(),
            ],
            improvements: vec![
                "Add more keywords".to_string(),
                "Quantify achievements".to_string(),
            ],
            recommendations: fold_raw(raw),
            keywords: vec![],
        }
    }
}

impl AnalysisShape for JobMatchAnalysis {
    const KIND: &'static str = "job match";
    const FAILURE_NOTICE: &'static str = "Failed to analyze job match. Please try again.";

    fn degraded(raw: &str) -> Self {
        JobMatchAnalysis {
            match_score: JOB_MATCH_DEGRADED_SCORE,
            matching_skills: vec![],
            missing_skills: vec![],
            recommendations: fold_raw(raw),
            key_phrases: vec![],
        }
    }
}

fn fold_raw(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        vec![]
    } else {
        vec![raw.to_string()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub degraded: bool,
}

impl<T> Decoded<T> {
    fn strict(value: T) -> Self {
        Self {
            value,
            degraded: false,
        }
    }

    fn fallback(value: T) -> Self {
        Self {
            value,
            degraded: true,
        }
    }
}

/// Decodes model text (optionally fenced) into `T`.
pub fn decode_or_degraded<T: AnalysisShape>(raw: &str) -> Decoded<T> {
    match serde_json::from_str::<T>(strip_json_fences(raw)) {
        Ok(value) => Decoded::strict(value),
        Err(e) => {
            warn!("{} analysis is not the expected JSON ({e}); substituting default", T::KIND);
            Decoded::fallback(T::degraded(raw))
        }
    }
}

/// Decodes an already-parsed JSON value. A string value is treated as model
/// text and decoded with [`decode_or_degraded`].
pub fn decode_value_or_degraded<T: AnalysisShape>(value: Value) -> Decoded<T> {
    if let Value::String(text) = &value {
        return decode_or_degraded(text);
    }
    let raw = value.to_string();
    match serde_json::from_value::<T>(value) {
        Ok(decoded) => Decoded::strict(decoded),
        Err(_) => {
            warn!("{} analysis payload has the wrong shape; substituting default", T::KIND);
            Decoded::fallback(T::degraded(&raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_json_text_degrades_ats() {
        let decoded = decode_or_degraded::<AtsAnalysis>("Looks good");
        assert!(decoded.degraded);
        assert_eq!(decoded.value.score, 75);
        assert_eq!(decoded.value.recommendations, vec!["Looks good".to_string()]);
        assert!(decoded.value.keywords.is_empty());
    }

    #[test]
    fn test_non_json_text_degrades_job_match() {
        let decoded = decode_or_degraded::<JobMatchAnalysis>("Decent fit overall");
        assert!(decoded.degraded);
        assert_eq!(decoded.value.match_score, 70);
        assert_eq!(decoded.value.recommendations, vec!["Decent fit overall".to_string()]);
        assert!(decoded.value.matching_skills.is_empty());
        assert!(decoded.value.missing_skills.is_empty());
        assert!(decoded.value.key_phrases.is_empty());
    }

    #[test]
    fn test_valid_fenced_json_decodes_strictly() {
        let raw = "```json\n{\"score\": 88, \"strengths\": [\"Clear\"], \"improvements\": [], \
                   \"recommendations\": [\"Add metrics\"], \"keywords\": [\"Rust\"]}\n```";
        let decoded = decode_or_degraded::<AtsAnalysis>(raw);
        assert!(!decoded.degraded);
        assert_eq!(decoded.value.score, 88);
        assert_eq!(decoded.value.keywords, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_missing_fields_degrade() {
        let decoded = decode_or_degraded::<AtsAnalysis>("{}");
        assert!(decoded.degraded);
        assert_eq!(decoded.value.score, ATS_DEGRADED_SCORE);
        assert_eq!(decoded.value.recommendations, vec!["{}".to_string()]);
    }

    #[test]
    fn test_out_of_range_score_is_clamped_not_degraded() {
        let raw = r#"{"matchScore": 140, "matchingSkills": [], "missingSkills": [],
                      "recommendations": [], "keyPhrases": []}"#;
        let decoded = decode_or_degraded::<JobMatchAnalysis>(raw);
        assert!(!decoded.degraded);
        assert_eq!(decoded.value.match_score, 100);
    }

    #[test]
    fn test_fractional_score_decodes_strictly() {
        let raw = "```json\n{\"score\": 85.5, \"strengths\": [], \"improvements\": [], \
                   \"recommendations\": [], \"keywords\": []}\n```";
        let decoded = decode_or_degraded::<AtsAnalysis>(raw);
        assert!(!decoded.degraded);
        assert_eq!(decoded.value.score, 86);
    }

    #[test]
    fn test_blank_raw_text_yields_empty_recommendations() {
        let decoded = decode_or_degraded::<AtsAnalysis>("   ");
        assert!(decoded.value.recommendations.is_empty());
    }

    #[test]
    fn test_decode_value_object() {
        let value = json!({
            "matchScore": 64,
            "matchingSkills": ["Go"],
            "missingSkills": ["Kafka"],
            "recommendations": [],
            "keyPhrases": ["event streaming"]
        });
        let decoded = decode_value_or_degraded::<JobMatchAnalysis>(value);
        assert!(!decoded.degraded);
        assert_eq!(decoded.value.missing_skills, vec!["Kafka".to_string()]);
    }

    #[test]
    fn test_decode_value_string_is_treated_as_model_text() {
        let decoded = decode_value_or_degraded::<AtsAnalysis>(json!("Looks good"));
        assert!(decoded.degraded);
        assert_eq!(decoded.value.recommendations, vec!["Looks good".to_string()]);
    }
}
