//! `points`: one row per document, grid metadata plus a single coordinate.

use crate::flatten::error::MappingError;
use crate::flatten::{coerce, object_of, require, section};
use crate::types::category::Category;
use crate::types::document::RawDocument;
use crate::types::payload::{position_of, Geometry};
use crate::types::row::{FlatRow, RowBuilder};
use serde::Deserialize;
use serde_json::Value;

const CATEGORY: Category = Category::Points;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointsProperties {
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "@type")]
    kind: Option<String>,
    cwa: Option<String>,
    forecast_office: Option<String>,
    grid_id: Option<String>,
    #[serde(default, deserialize_with = "coerce::lenient_i64")]
    grid_x: Option<i64>,
    #[serde(default, deserialize_with = "coerce::lenient_i64")]
    grid_y: Option<i64>,
    forecast: Option<String>,
    forecast_hourly: Option<String>,
    forecast_grid_data: Option<String>,
    observation_stations: Option<String>,
    forecast_zone: Option<String>,
    county: Option<String>,
    fire_weather_zone: Option<String>,
    time_zone: Option<String>,
    radar_station: Option<String>,
    city: Option<String>,
    state: Option<String>,
    relative_location: Option<RelativeLocation>,
}

#[derive(Debug, Default, Deserialize)]
struct RelativeLocation {
    properties: Option<Place>,
}

#[derive(Debug, Default, Deserialize)]
struct Place {
    city: Option<String>,
    state: Option<String>,
}

impl PointsProperties {
    fn place(&self) -> Option<&Place> {
        self.relative_location.as_ref()?.properties.as_ref()
    }

    fn city(&self) -> Option<&str> {
        self.city
            .as_deref()
            .or_else(|| self.place()?.city.as_deref())
    }

    fn state(&self) -> Option<&str> {
        self.state
            .as_deref()
            .or_else(|| self.place()?.state.as_deref())
    }
}

pub(super) fn flatten(document: &RawDocument) -> Result<Vec<FlatRow>, MappingError> {
    let object = object_of(CATEGORY, &document.payload)?;

    // A GeoJSON feature keeps its fields under `properties`; a bare
    // properties object is accepted as well.
    let properties_value = match object.get("properties") {
        Some(value) if !value.is_null() => value,
        _ => &document.payload,
    };
    let properties: PointsProperties = section(CATEGORY, "properties", properties_value)?;
    let geometry: Option<Geometry> = section(
        CATEGORY,
        "geometry",
        object.get("geometry").unwrap_or(&Value::Null),
    )?;

    require(CATEGORY, "properties.gridId", properties.grid_id.as_deref())?;
    let position = position_of(geometry.as_ref());

    let row = RowBuilder::new(document.lineage())
        .field("id", properties.id.as_deref())
        .field("type", properties.kind.as_deref())
        .field("cwa", properties.cwa.as_deref())
        .field("forecastOffice", properties.forecast_office.as_deref())
        .field("gridId", properties.grid_id.as_deref())
        .field("gridX", properties.grid_x)
        .field("gridY", properties.grid_y)
        .field("forecast", properties.forecast.as_deref())
        .field("forecastHourly", properties.forecast_hourly.as_deref())
        .field("forecastGridData", properties.forecast_grid_data.as_deref())
        .field("observationStations", properties.observation_stations.as_deref())
        .field("forecastZone", properties.forecast_zone.as_deref())
        .field("county", properties.county.as_deref())
        .field("fireWeatherZone", properties.fire_weather_zone.as_deref())
        .field("timeZone", properties.time_zone.as_deref())
        .field("radarStation", properties.radar_station.as_deref())
        .field("city", properties.city())
        .field("state", properties.state())
        .field("geometry_type", geometry.as_ref().and_then(|g| g.kind.as_deref()))
        .field("longitude", position.longitude)
        .field("latitude", position.latitude)
        .field("elevation", position.elevation)
        .build();

    Ok(vec![row])
}
