//! A single row of ad performance data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of one campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdRecord {
    /// Campaign the row belongs to
    pub campaign_name: String,
    /// Reporting date, `None` when the cell is missing or malformed
    pub date: Option<NaiveDate>,
    /// Amount spent
    pub spend: f64,
    /// Impressions served
    pub impressions: f64,
    /// Clicks received
    pub clicks: f64,
    /// Click-through rate
    pub ctr: f64,
    /// Return on ad spend
    pub roas: f64,
    /// Ad copy shown
    pub creative_message: String,
}

/// Numeric columns the statistics operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Metric {
    /// Return on ad spend
    Roas,
    /// Click-through rate
    Ctr,
    /// Amount spent
    Spend,
}

impl Metric {
    /// Read this metric from a record.
    pub fn of(&self, record: &AdRecord) -> f64 {
        match self {
            Metric::Roas => record.roas,
            Metric::Ctr => record.ctr,
            Metric::Spend => record.spend,
        }
    }
}

/// Parse the leading `YYYY-MM-DD` of a date cell.
///
/// Timestamps such as `2024-03-01 00:00:00` keep only their date part.
pub(crate) fn parse_date(cell: &str) -> Option<NaiveDate> {
    let head = cell.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
