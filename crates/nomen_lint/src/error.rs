/// Reasons an analysis pass produced no result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// The pass was cancelled; nothing was reported.
    #[error("analysis cancelled")]
    Cancelled,
}
