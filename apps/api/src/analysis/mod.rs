// Resume analysis: ATS scoring, job matching, and text enhancement.
// `client` is the caller side; `handlers` are the gateway functions it calls.
// All model calls go through llm_client.

pub mod client;
pub mod decode;
pub mod handlers;
pub mod prompts;
pub mod types;

pub use client::{AnalysisClient, AnalysisError, Assessed};
pub use types::{AtsAnalysis, JobMatchAnalysis};
