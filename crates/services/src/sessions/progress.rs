use serde::Serialize;

/// Aggregated view of quiz progress, useful for UI.
///
/// `position` is 1-based: the first question reports `position == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub position: usize,
    pub total: usize,
    pub score: usize,
}

impl SessionProgress {
    /// Share of the quiz reached so far, `position / total`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.position as f64 / self.total as f64
    }
}
