//! Defines the closed set of document categories landed from the weather API,
//! together with the landing directory and bronze table each one maps to.

use crate::error::LakeError;
use std::fmt;
use std::str::FromStr;

/// The kind of weather API document stored in the landing zone.
///
/// Every category has exactly one payload shape and one bronze table. The set
/// is fixed: flattening never infers a mapping at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Grid metadata for a latitude/longitude (`/points/{lat},{lon}`).
    Points,
    /// The 12-hour period forecast. One bronze row per period.
    Forecasts,
    /// The hourly forecast. One bronze row per period.
    Hourly,
    /// The latest observation of a single station.
    Observations,
    /// Feature collection of observation stations. One bronze row per station.
    Stations,
    /// Forecast zone features. One bronze row per zone.
    Zones,
    /// Raw numerical grid forecast; each weather layer is kept as a structured value.
    GridData,
}

impl Category {
    /// All categories, in the order a full bronze load processes them.
    pub const ALL: [Category; 7] = [
        Category::Points,
        Category::Forecasts,
        Category::Hourly,
        Category::Observations,
        Category::Stations,
        Category::Zones,
        Category::GridData,
    ];

    /// The landing directory name, which is also the category string written
    /// into every envelope.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Points => "points",
            Category::Forecasts => "forecasts",
            Category::Hourly => "hourly",
            Category::Observations => "observations",
            Category::Stations => "stations",
            Category::Zones => "zones",
            Category::GridData => "grid_data",
        }
    }

    /// The bronze table that receives the flattened rows of this category.
    pub fn table_name(&self) -> &'static str {
        match self {
            Category::Points => "bronze_points",
            Category::Forecasts => "bronze_forecast_periods",
            Category::Hourly => "bronze_hourly_periods",
            Category::Observations => "bronze_observations",
            Category::Stations => "bronze_stations",
            Category::Zones => "bronze_zones",
            Category::GridData => "bronze_grid_data",
        }
    }
}

/// Formats a `Category` using its landing directory name.
///
/// # Examples
///
/// ```
/// use weather_lake::Category;
///
/// assert_eq!(Category::GridData.to_string(), "grid_data");
/// assert_eq!(format!("{}", Category::Points), "points");
/// ```
impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = LakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| LakeError::UnknownCategory(s.to_string()))
    }
}
