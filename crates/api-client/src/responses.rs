use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

// Alpha Vantage sends every number as a JSON string.
fn string_to_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<f64>().map_err(serde::de::Error::custom)
}

// Placeholders the provider uses for fields it has no value for.
fn absent_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "None" && s != "-" && s != "N/A"))
}

/// Keys the provider uses instead of data when a request cannot be served.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderNotice {
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
}

impl ProviderNotice {
    /// The first notice present, if any.
    pub fn message(&self) -> Option<&str> {
        self.error_message
            .as_deref()
            .or(self.note.as_deref())
            .or(self.information.as_deref())
    }
}

/// The `function=OVERVIEW` company profile. Only the fields the dashboard
/// displays are kept.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OverviewResponse {
    #[serde(default, deserialize_with = "absent_as_none")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "absent_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "absent_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "absent_as_none")]
    pub sector: Option<String>,
    #[serde(default, deserialize_with = "absent_as_none")]
    pub industry: Option<String>,
    #[serde(flatten)]
    pub notice: ProviderNotice,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyMetaData {
    #[serde(rename = "2. Symbol")]
    pub symbol: String,
    #[serde(rename = "3. Last Refreshed")]
    pub last_refreshed: String,
}

/// One trading day of `function=TIME_SERIES_DAILY`.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyBar {
    #[serde(rename = "4. close", deserialize_with = "string_to_f64")]
    pub close: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailySeriesResponse {
    #[serde(rename = "Meta Data")]
    pub meta_data: Option<DailyMetaData>,
    /// Date (`YYYY-MM-DD`) -> bar.
    #[serde(rename = "Time Series (Daily)", default)]
    pub time_series: BTreeMap<String, DailyBar>,
    #[serde(flatten)]
    pub notice: ProviderNotice,
}
