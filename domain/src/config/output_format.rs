//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for board results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every member's full answer plus totals (default)
    #[default]
    Full,
    /// One line per member
    Brief,
    /// JSON output
    Json,
}
