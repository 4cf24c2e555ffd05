//! CSV-backed dataset of ad records.

use crate::record::parse_date;
use crate::{AdRecord, Metric, stats};
use adlens_error::{AdlensResult, DataError, DataErrorKind};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument};

const REQUIRED_COLUMNS: [&str; 2] = ["campaign_name", "roas"];

/// Row shape as it appears in the CSV. Optional columns default when absent.
#[derive(Debug, Deserialize)]
struct CsvRow {
    campaign_name: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    spend: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    impressions: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    clicks: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    ctr: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    roas: Option<f64>,
    #[serde(default)]
    creative_message: Option<String>,
}

impl From<CsvRow> for AdRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            date: row.date.as_deref().and_then(parse_date),
            campaign_name: row.campaign_name,
            spend: row.spend.unwrap_or(0.0),
            impressions: row.impressions.unwrap_or(0.0),
            clicks: row.clicks.unwrap_or(0.0),
            ctr: row.ctr.unwrap_or(0.0),
            roas: row.roas.unwrap_or(0.0),
            creative_message: row.creative_message.unwrap_or_default(),
        }
    }
}

/// Lookup result for a single campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct CampaignDetails {
    /// Campaign name
    campaign_name: String,
    /// Number of rows
    record_count: usize,
    /// Mean ROAS
    avg_roas: f64,
    /// Mean CTR
    avg_ctr: f64,
    /// Total spend
    total_spend: f64,
    /// Up to three distinct creative messages, in first-seen order
    creative_samples: Vec<String>,
}

/// Immutable collection of ad records.
///
/// # Examples
///
/// ```
/// use adlens_data::Dataset;
///
/// let csv = "campaign_name,date,roas,ctr,spend\n\
///            Summer,2024-06-01,2.5,0.02,100\n\
///            Winter,2024-06-01,1.2,0.01,80\n\
///            Summer,2024-06-02,2.1,0.018,120\n";
/// let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
///
/// assert_eq!(dataset.len(), 3);
/// assert_eq!(dataset.campaigns(), vec!["Summer", "Winter"]);
/// assert_eq!(dataset.records_for("Summer").len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<AdRecord>,
}

impl Dataset {
    /// Load a dataset from a CSV file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> AdlensResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            DataError::new(DataErrorKind::FileRead(format!("{}: {}", path.display(), e)))
        })?;
        let dataset = Self::from_reader(file)?;
        info!(
            records = dataset.len(),
            campaigns = dataset.campaigns().len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    /// Load a dataset from any CSV source with a header row.
    pub fn from_reader<R: Read>(reader: R) -> AdlensResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| DataError::new(DataErrorKind::Csv(e.to_string())))?
            .clone();

        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(DataError::new(DataErrorKind::MissingColumn(column.to_string())).into());
            }
        }

        let records = csv_reader
            .deserialize::<CsvRow>()
            .map(|row| {
                row.map(AdRecord::from)
                    .map_err(|e| DataError::new(DataErrorKind::Csv(e.to_string())))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if records.is_empty() {
            return Err(DataError::new(DataErrorKind::Empty).into());
        }

        debug!(records = records.len(), "Parsed CSV rows");
        Ok(Self { records })
    }

    /// Build a dataset from records already in memory.
    ///
    /// # Errors
    ///
    /// Returns `DataErrorKind::Empty` when `records` is empty.
    pub fn from_records(records: Vec<AdRecord>) -> AdlensResult<Self> {
        if records.is_empty() {
            return Err(DataError::new(DataErrorKind::Empty).into());
        }
        Ok(Self { records })
    }

    /// All records in file order.
    pub fn records(&self) -> &[AdRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; construction rejects empty data.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique campaign names in first-seen order.
    pub fn campaigns(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.campaign_name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Records ordered by date. Undated records keep file order after dated ones.
    pub fn sorted_by_date(&self) -> Vec<&AdRecord> {
        let mut sorted: Vec<&AdRecord> = self.records.iter().collect();
        sorted.sort_by_key(|r| (r.date.is_none(), r.date));
        sorted
    }

    /// Records for one campaign, in file order.
    pub fn records_for(&self, campaign: &str) -> Vec<&AdRecord> {
        self.records
            .iter()
            .filter(|r| r.campaign_name == campaign)
            .collect()
    }

    /// All values of a metric, in file order.
    pub fn values(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().map(|r| metric.of(r)).collect()
    }

    /// Summary of one campaign, or `None` if it does not appear.
    pub fn campaign_details(&self, name: &str) -> Option<CampaignDetails> {
        let rows = self.records_for(name);
        if rows.is_empty() {
            return None;
        }

        let column = |metric: Metric| rows.iter().map(|r| metric.of(r)).collect::<Vec<_>>();

        let mut seen = HashSet::new();
        let creative_samples = rows
            .iter()
            .map(|r| r.creative_message.as_str())
            .filter(|m| !m.is_empty() && seen.insert(*m))
            .take(3)
            .map(str::to_string)
            .collect();

        Some(CampaignDetails {
            campaign_name: name.to_string(),
            record_count: rows.len(),
            avg_roas: stats::mean(&column(Metric::Roas)),
            avg_ctr: stats::mean(&column(Metric::Ctr)),
            total_spend: stats::sum(&column(Metric::Spend)),
            creative_samples,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "campaign_name,date,spend,impressions,clicks,ctr,roas,creative_message\n\
        A,2024-01-03,100,1000,20,0.02,2.5,Buy now\n\
        B,2024-01-01,50,800,8,0.01,1.0,Hello\n\
        A,,70,900,9,0.01,1.5,Buy now\n\
        A,2024-01-02,90,1000,15,0.015,2.0,Fresh deals\n";

    #[test]
    fn optional_columns_default() {
        let dataset = Dataset::from_reader("campaign_name,roas\nA,2.0\n".as_bytes()).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.spend, 0.0);
        assert_eq!(record.date, None);
        assert!(record.creative_message.is_empty());
    }

    #[test]
    fn missing_required_column_is_reported() {
        let err = Dataset::from_reader("campaign_name,ctr\nA,0.01\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("roas"));
    }

    #[test]
    fn header_only_file_is_empty() {
        let err = Dataset::from_reader("campaign_name,roas\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("no records"));
    }

    #[test]
    fn sorting_puts_undated_rows_last() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let sorted = dataset.sorted_by_date();
        let spends: Vec<f64> = sorted.iter().map(|r| r.spend).collect();
        assert_eq!(spends, vec![50.0, 90.0, 100.0, 70.0]);
    }

    #[test]
    fn campaign_details_dedupe_creatives() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let details = dataset.campaign_details("A").unwrap();
        assert_eq!(*details.record_count(), 3);
        assert_eq!(*details.total_spend(), 260.0);
        assert_eq!(details.creative_samples(), &vec!["Buy now", "Fresh deals"]);
        assert!(dataset.campaign_details("Z").is_none());
    }

    #[test]
    fn whitespace_is_trimmed() {
        let dataset =
            Dataset::from_reader("campaign_name , roas\n  Spring  , 3.5 \n".as_bytes()).unwrap();
        assert_eq!(dataset.records()[0].campaign_name, "Spring");
        assert_eq!(dataset.records()[0].roas, 3.5);
    }
}
