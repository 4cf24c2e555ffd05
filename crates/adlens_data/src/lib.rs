//! Ad performance dataset loading and statistics.
//!
//! A [`Dataset`] is read once from CSV and then only queried. The
//! [`DataSummary`] condenses it into the JSON document the agents reason
//! over: global metrics, per-campaign aggregates, early/recent trends,
//! textual patterns and ROAS outliers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dataset;
mod record;
pub mod stats;
mod summary;

pub use dataset::{CampaignDetails, Dataset};
pub use record::{AdRecord, Metric};
pub use summary::{
    CampaignAggregate, CtrMetrics, DataSummary, DateRange, Metrics, Outlier, OutlierKind,
    Outliers, RoasMetrics, SpendMetrics, Trend, campaign_aggregates,
};
