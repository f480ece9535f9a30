//! `forecasts` and `hourly`: one row per forecast period.
//!
//! Both categories share the payload shape. Document-level fields
//! (`generatedAt`, `units`, elevation, ...) are repeated on every period row.

use crate::flatten::error::MappingError;
use crate::flatten::{coerce, require, section};
use crate::types::category::Category;
use crate::types::document::RawDocument;
use crate::types::payload::QuantitativeValue;
use crate::types::row::{FlatRow, RowBuilder};
use chrono::NaiveDateTime;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct ForecastDocument {
    properties: Option<ForecastProperties>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastProperties {
    #[serde(default, deserialize_with = "coerce::lenient_timestamp")]
    generated_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "coerce::lenient_timestamp")]
    update_time: Option<NaiveDateTime>,
    units: Option<String>,
    forecast_generator: Option<String>,
    elevation: Option<QuantitativeValue>,
    periods: Option<Vec<ForecastPeriod>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastPeriod {
    #[serde(default, deserialize_with = "coerce::lenient_i64")]
    number: Option<i64>,
    name: Option<String>,
    #[serde(default, deserialize_with = "coerce::lenient_timestamp")]
    start_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "coerce::lenient_timestamp")]
    end_time: Option<NaiveDateTime>,
    is_daytime: Option<bool>,
    // A bare number in the classic API, a quantitative value in the newer one.
    #[serde(default, deserialize_with = "coerce::lenient_quantity")]
    temperature: Option<QuantitativeValue>,
    temperature_unit: Option<String>,
    temperature_trend: Option<String>,
    wind_speed: Option<String>,
    wind_direction: Option<String>,
    icon: Option<String>,
    short_forecast: Option<String>,
    detailed_forecast: Option<String>,
    probability_of_precipitation: Option<QuantitativeValue>,
    dewpoint: Option<QuantitativeValue>,
    relative_humidity: Option<QuantitativeValue>,
}

pub(super) fn flatten(
    category: Category,
    document: &RawDocument,
) -> Result<Vec<FlatRow>, MappingError> {
    if !document.payload.is_object() {
        return Err(MappingError::NotAnObject { category });
    }
    let forecast: ForecastDocument = section(category, "properties", &document.payload)?;
    let properties = require(category, "properties.periods", forecast.properties)?;
    let periods = require(category, "properties.periods", properties.periods)?;

    let template = RowBuilder::new(document.lineage())
        .field("generatedAt", properties.generated_at)
        .field("updateTime", properties.update_time)
        .field("units", properties.units)
        .field("forecastGenerator", properties.forecast_generator)
        .quantity("elevation", properties.elevation.as_ref());

    let rows = periods
        .into_iter()
        .map(|period| {
            let temperature = period.temperature.unwrap_or_default();
            // A bare number is in the unit named by `temperatureUnit`.
            let temperature_unit_code = temperature
                .unit_code
                .or_else(|| period.temperature_unit.clone());
            template
                .clone()
                .field("number", period.number)
                .field("name", period.name)
                .field("startTime", period.start_time)
                .field("endTime", period.end_time)
                .field("isDaytime", period.is_daytime)
                .field("temperature", temperature.value)
                .field("temperature_unitCode", temperature_unit_code)
                .field("temperatureUnit", period.temperature_unit)
                .field("temperatureTrend", period.temperature_trend)
                .field("windSpeed", period.wind_speed)
                .field("windDirection", period.wind_direction)
                .field("icon", period.icon)
                .field("shortForecast", period.short_forecast)
                .field("detailedForecast", period.detailed_forecast)
                .quantity(
                    "probabilityOfPrecipitation",
                    period.probability_of_precipitation.as_ref(),
                )
                .quantity("dewpoint", period.dewpoint.as_ref())
                .quantity("relativeHumidity", period.relative_humidity.as_ref())
                .build()
        })
        .collect();

    Ok(rows)
}
