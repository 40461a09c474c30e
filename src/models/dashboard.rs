use crate::models::candidate::CandidateStatus;
use crate::utils::serde_flex::deserialize_count_flexible;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "deserialize_count_flexible")]
    pub total: i64,
    #[serde(default, deserialize_with = "deserialize_count_flexible")]
    pub pending: i64,
    #[serde(default, deserialize_with = "deserialize_count_flexible")]
    pub approved: i64,
    #[serde(default, deserialize_with = "deserialize_count_flexible")]
    pub rejected: i64,
    #[serde(default, deserialize_with = "deserialize_count_flexible")]
    pub interviewed: i64,
    #[serde(default, deserialize_with = "deserialize_count_flexible")]
    pub offered: i64,
}

impl DashboardStats {
    pub fn count_for(&self, status: CandidateStatus) -> i64 {
        match status {
            CandidateStatus::Pending => self.pending,
            CandidateStatus::Interviewed => self.interviewed,
            CandidateStatus::Approved => self.approved,
            CandidateStatus::Rejected => self.rejected,
            CandidateStatus::Offered => self.offered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_textual_counters() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"total": "4", "pending": 3, "offered": null}"#).unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.count_for(CandidateStatus::Pending), 3);
        assert_eq!(stats.count_for(CandidateStatus::Offered), 0);
        assert_eq!(stats.approved, 0);
    }
}
