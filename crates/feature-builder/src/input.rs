//! Raw Channel Statistics

use serde::{Deserialize, Serialize};

/// Channel statistics supplied per request. Range policy is enforced by
/// the caller; the pipeline only requires the country to be in the known
/// vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInput {
    pub subscribers: u64,
    pub total_views: u64,
    pub country: String,
    pub channel_age_years: u32,
    pub views_last_30_days: u64,
    pub subscribers_last_30_days: u64,
}
