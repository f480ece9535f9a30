//! `observations`: one row per latest-observation document.

use crate::flatten::error::MappingError;
use crate::flatten::{coerce, object_of, require, section};
use crate::types::category::Category;
use crate::types::document::RawDocument;
use crate::types::payload::{position_of, Geometry, QuantitativeValue};
use crate::types::row::{FlatRow, RowBuilder};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;

const CATEGORY: Category = Category::Observations;

#[derive(Debug, Default, Deserialize)]
struct ObservationDocument {
    geometry: Option<Geometry>,
    properties: Option<ObservationProperties>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObservationProperties {
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "@type")]
    kind: Option<String>,
    station: Option<String>,
    #[serde(default, deserialize_with = "coerce::lenient_timestamp")]
    timestamp: Option<NaiveDateTime>,
    raw_message: Option<String>,
    text_description: Option<String>,
    icon: Option<String>,
    elevation: Option<QuantitativeValue>,
    temperature: Option<QuantitativeValue>,
    dewpoint: Option<QuantitativeValue>,
    heat_index: Option<QuantitativeValue>,
    wind_chill: Option<QuantitativeValue>,
    max_temperature_last24_hours: Option<QuantitativeValue>,
    min_temperature_last24_hours: Option<QuantitativeValue>,
    wind_direction: Option<QuantitativeValue>,
    wind_speed: Option<QuantitativeValue>,
    wind_gust: Option<QuantitativeValue>,
    barometric_pressure: Option<QuantitativeValue>,
    sea_level_pressure: Option<QuantitativeValue>,
    precipitation_last_hour: Option<QuantitativeValue>,
    precipitation_last3_hours: Option<QuantitativeValue>,
    precipitation_last6_hours: Option<QuantitativeValue>,
    visibility: Option<QuantitativeValue>,
    relative_humidity: Option<QuantitativeValue>,
    #[serde(default)]
    present_weather: Value,
    #[serde(default)]
    cloud_layers: Value,
}

pub(super) fn flatten(document: &RawDocument) -> Result<Vec<FlatRow>, MappingError> {
    object_of(CATEGORY, &document.payload)?;
    let observation: ObservationDocument = section(CATEGORY, "properties", &document.payload)?;
    let p = require(CATEGORY, "properties", observation.properties)?;
    let timestamp = require(CATEGORY, "properties.timestamp", p.timestamp)?;

    let geometry = observation.geometry.as_ref();
    let position = position_of(geometry);
    let station_id = p.station.as_deref().and_then(coerce::last_path_segment);

    let row = RowBuilder::new(document.lineage())
        .field("id", p.id)
        .field("type", p.kind)
        .field("station", p.station)
        .field("station_id", station_id)
        .field("timestamp", timestamp)
        .field("rawMessage", p.raw_message)
        .field("textDescription", p.text_description)
        .field("icon", p.icon)
        .field("geometry_type", geometry.and_then(|g| g.kind.clone()))
        .field("longitude", position.longitude)
        .field("latitude", position.latitude)
        .quantity("elevation", p.elevation.as_ref())
        .quantity("temperature", p.temperature.as_ref())
        .quantity("dewpoint", p.dewpoint.as_ref())
        .quantity("heatIndex", p.heat_index.as_ref())
        .quantity("windChill", p.wind_chill.as_ref())
        .quantity("maxTemperatureLast24Hours", p.max_temperature_last24_hours.as_ref())
        .quantity("minTemperatureLast24Hours", p.min_temperature_last24_hours.as_ref())
        .quantity("windDirection", p.wind_direction.as_ref())
        .quantity("windSpeed", p.wind_speed.as_ref())
        .quantity("windGust", p.wind_gust.as_ref())
        .quantity("barometricPressure", p.barometric_pressure.as_ref())
        .quantity("seaLevelPressure", p.sea_level_pressure.as_ref())
        .quantity("precipitationLastHour", p.precipitation_last_hour.as_ref())
        .quantity("precipitationLast3Hours", p.precipitation_last3_hours.as_ref())
        .quantity("precipitationLast6Hours", p.precipitation_last6_hours.as_ref())
        .quantity("visibility", p.visibility.as_ref())
        .quantity("relativeHumidity", p.relative_humidity.as_ref())
        .field("presentWeather", p.present_weather)
        .field("cloudLayers", p.cloud_layers)
        .build();

    Ok(vec![row])
}
