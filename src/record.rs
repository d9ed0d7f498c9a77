use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// CSV structure of the data file. Field order is column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub amount: u64,
    pub description: String,
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.id,
            self.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.amount,
            self.description
        )
    }
}
