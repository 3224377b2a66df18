use serde::{Deserialize, Serialize};

use super::scoring::ScoringThresholds;
use super::tagger::TaggerConfig;

/// Root configuration structure for the scoring engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BlinkConfig {
    #[serde(default)]
    pub tagger: TaggerConfig,

    #[serde(default)]
    pub scoring: ScoringThresholds,
}
