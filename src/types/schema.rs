//! Fixed column layouts of the bronze tables.
//!
//! Every table starts with the four lineage columns, followed by the columns
//! of its category in the order the flatteners emit them.

use crate::types::category::Category;
use polars::prelude::{DataType, Field, Schema, TimeUnit};

/// Logical type of a bronze column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Boolean,
    Int64,
    Float64,
    Utf8,
    /// Timezone-naive UTC, microsecond precision.
    Timestamp,
    /// A structured value (list, object) stored as compact JSON text.
    Json,
}

impl ColumnType {
    /// The polars data type the column is materialized with.
    pub fn dtype(&self) -> DataType {
        match self {
            ColumnType::Boolean => DataType::Boolean,
            ColumnType::Int64 => DataType::Int64,
            ColumnType::Float64 => DataType::Float64,
            ColumnType::Utf8 | ColumnType::Json => DataType::String,
            ColumnType::Timestamp => DataType::Datetime(TimeUnit::Microseconds, None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnType,
}

const fn utf8(name: &'static str) -> ColumnDef {
    ColumnDef { name, kind: ColumnType::Utf8 }
}
const fn int(name: &'static str) -> ColumnDef {
    ColumnDef { name, kind: ColumnType::Int64 }
}
const fn float(name: &'static str) -> ColumnDef {
    ColumnDef { name, kind: ColumnType::Float64 }
}
const fn boolean(name: &'static str) -> ColumnDef {
    ColumnDef { name, kind: ColumnType::Boolean }
}
const fn ts(name: &'static str) -> ColumnDef {
    ColumnDef { name, kind: ColumnType::Timestamp }
}
const fn json(name: &'static str) -> ColumnDef {
    ColumnDef { name, kind: ColumnType::Json }
}

pub const COL_CAPTURED_AT: &str = "captured_at";
pub const COL_CATEGORY: &str = "category";
pub const COL_IDENTIFIER: &str = "identifier";
pub const COL_LOGICAL_TIME: &str = "logical_time";

/// The lineage quadruple, first in every bronze table.
pub const LINEAGE_COLUMNS: [ColumnDef; 4] = [
    ts(COL_CAPTURED_AT),
    utf8(COL_CATEGORY),
    utf8(COL_IDENTIFIER),
    ts(COL_LOGICAL_TIME),
];

const POINTS_COLUMNS: &[ColumnDef] = &[
    utf8("id"),
    utf8("type"),
    utf8("cwa"),
    utf8("forecastOffice"),
    utf8("gridId"),
    int("gridX"),
    int("gridY"),
    utf8("forecast"),
    utf8("forecastHourly"),
    utf8("forecastGridData"),
    utf8("observationStations"),
    utf8("forecastZone"),
    utf8("county"),
    utf8("fireWeatherZone"),
    utf8("timeZone"),
    utf8("radarStation"),
    utf8("city"),
    utf8("state"),
    utf8("geometry_type"),
    float("longitude"),
    float("latitude"),
    float("elevation"),
];

// Shared by the 12-hour and the hourly forecast tables.
const FORECAST_PERIOD_COLUMNS: &[ColumnDef] = &[
    ts("generatedAt"),
    ts("updateTime"),
    utf8("units"),
    utf8("forecastGenerator"),
    float("elevation_value"),
    utf8("elevation_unitCode"),
    int("number"),
    utf8("name"),
    ts("startTime"),
    ts("endTime"),
    boolean("isDaytime"),
    float("temperature"),
    utf8("temperature_unitCode"),
    utf8("temperatureUnit"),
    utf8("temperatureTrend"),
    utf8("windSpeed"),
    utf8("windDirection"),
    utf8("icon"),
    utf8("shortForecast"),
    utf8("detailedForecast"),
    float("probabilityOfPrecipitation_value"),
    utf8("probabilityOfPrecipitation_unitCode"),
    float("dewpoint_value"),
    utf8("dewpoint_unitCode"),
    float("relativeHumidity_value"),
    utf8("relativeHumidity_unitCode"),
];

const OBSERVATION_COLUMNS: &[ColumnDef] = &[
    utf8("id"),
    utf8("type"),
    utf8("station"),
    utf8("station_id"),
    ts("timestamp"),
    utf8("rawMessage"),
    utf8("textDescription"),
    utf8("icon"),
    utf8("geometry_type"),
    float("longitude"),
    float("latitude"),
    float("elevation_value"),
    utf8("elevation_unitCode"),
    float("temperature_value"),
    utf8("temperature_unitCode"),
    float("dewpoint_value"),
    utf8("dewpoint_unitCode"),
    float("heatIndex_value"),
    utf8("heatIndex_unitCode"),
    float("windChill_value"),
    utf8("windChill_unitCode"),
    float("maxTemperatureLast24Hours_value"),
    utf8("maxTemperatureLast24Hours_unitCode"),
    float("minTemperatureLast24Hours_value"),
    utf8("minTemperatureLast24Hours_unitCode"),
    float("windDirection_value"),
    utf8("windDirection_unitCode"),
    float("windSpeed_value"),
    utf8("windSpeed_unitCode"),
    float("windGust_value"),
    utf8("windGust_unitCode"),
    float("barometricPressure_value"),
    utf8("barometricPressure_unitCode"),
    float("seaLevelPressure_value"),
    utf8("seaLevelPressure_unitCode"),
    float("precipitationLastHour_value"),
    utf8("precipitationLastHour_unitCode"),
    float("precipitationLast3Hours_value"),
    utf8("precipitationLast3Hours_unitCode"),
    float("precipitationLast6Hours_value"),
    utf8("precipitationLast6Hours_unitCode"),
    float("visibility_value"),
    utf8("visibility_unitCode"),
    float("relativeHumidity_value"),
    utf8("relativeHumidity_unitCode"),
    json("presentWeather"),
    json("cloudLayers"),
];

const STATION_COLUMNS: &[ColumnDef] = &[
    utf8("id"),
    utf8("type"),
    utf8("stationIdentifier"),
    utf8("name"),
    utf8("timeZone"),
    utf8("geometry_type"),
    float("longitude"),
    float("latitude"),
    float("elevation_value"),
    utf8("elevation_unitCode"),
    utf8("forecast"),
    utf8("county"),
    utf8("fireWeatherZone"),
];

const ZONE_COLUMNS: &[ColumnDef] = &[
    utf8("id"),
    utf8("type"),
    utf8("id_code"),
    utf8("type_code"),
    utf8("name"),
    utf8("state"),
    ts("effectiveDate"),
    ts("expirationDate"),
    json("cwa"),
    json("forecastOffices"),
    json("timeZone"),
    json("observationStations"),
    utf8("radarStation"),
    utf8("geometry_type"),
    json("geometry_coordinates"),
];

/// Grid layers kept whole, one structured column each, in column order.
pub(crate) const GRID_LAYERS: [&str; 21] = [
    "temperature",
    "dewpoint",
    "maxTemperature",
    "minTemperature",
    "relativeHumidity",
    "apparentTemperature",
    "heatIndex",
    "windChill",
    "skyCover",
    "windDirection",
    "windSpeed",
    "windGust",
    "probabilityOfPrecipitation",
    "quantitativePrecipitation",
    "iceAccumulation",
    "snowfallAmount",
    "snowLevel",
    "ceilingHeight",
    "visibility",
    "weather",
    "hazards",
];

const GRID_DATA_COLUMNS: &[ColumnDef] = &[
    utf8("gridId"),
    int("gridX"),
    int("gridY"),
    utf8("forecastOffice"),
    ts("updateTime"),
    utf8("validTimes"),
    float("elevation_value"),
    utf8("elevation_unitCode"),
    utf8("geometry_type"),
    json("geometry_coordinates"),
];

/// The name and full column layout of one bronze table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    /// Lineage columns followed by `columns`.
    pub fn with_lineage(name: &'static str, columns: &[ColumnDef]) -> Self {
        Self {
            name,
            columns: LINEAGE_COLUMNS.iter().chain(columns).copied().collect(),
        }
    }

    /// The bronze table layout of a category.
    pub fn for_category(category: Category) -> Self {
        let name = category.table_name();
        match category {
            Category::Points => Self::with_lineage(name, POINTS_COLUMNS),
            Category::Forecasts | Category::Hourly => {
                Self::with_lineage(name, FORECAST_PERIOD_COLUMNS)
            }
            Category::Observations => Self::with_lineage(name, OBSERVATION_COLUMNS),
            Category::Stations => Self::with_lineage(name, STATION_COLUMNS),
            Category::Zones => Self::with_lineage(name, ZONE_COLUMNS),
            Category::GridData => {
                let mut schema = Self::with_lineage(name, GRID_DATA_COLUMNS);
                schema.columns.extend(GRID_LAYERS.into_iter().map(json));
                schema
            }
        }
    }

    /// All seven bronze tables.
    pub fn bronze_tables() -> Vec<TableSchema> {
        Category::ALL.into_iter().map(Self::for_category).collect()
    }

    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    pub fn polars_schema(&self) -> Schema {
        self.columns
            .iter()
            .map(|c| Field::new(c.name.into(), c.kind.dtype()))
            .collect()
    }
}
