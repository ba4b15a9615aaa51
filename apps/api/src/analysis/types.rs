use serde::{Deserialize, Deserializer, Serialize};

/// ATS compatibility analysis. Every field is required when decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsAnalysis {
    #[serde(deserialize_with = "percent_score")]
    pub score: u32,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub recommendations: Vec<String>,
    pub keywords: Vec<String>,
}

/// Resume vs job description fit analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchAnalysis {
    #[serde(deserialize_with = "percent_score")]
    pub match_score: u32,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<String>,
    pub key_phrases: Vec<String>,
}

/// Models return fractional or out-of-range scores; round to the nearest
/// whole point and clamp to 0..=100.
fn percent_score<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.round().clamp(0.0, 100.0) as u32)
}
