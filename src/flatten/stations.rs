//! `stations`: one row per observation station feature.

use crate::flatten::error::MappingError;
use crate::flatten::{features_of, require, section};
use crate::types::category::Category;
use crate::types::document::RawDocument;
use crate::types::payload::{position_of, Geometry, QuantitativeValue};
use crate::types::row::{FlatRow, RowBuilder};
use serde::Deserialize;

const CATEGORY: Category = Category::Stations;

#[derive(Debug, Default, Deserialize)]
struct StationFeature {
    geometry: Option<Geometry>,
    properties: Option<StationProperties>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationProperties {
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "@type")]
    kind: Option<String>,
    station_identifier: Option<String>,
    name: Option<String>,
    time_zone: Option<String>,
    elevation: Option<QuantitativeValue>,
    forecast: Option<String>,
    county: Option<String>,
    fire_weather_zone: Option<String>,
}

pub(super) fn flatten(document: &RawDocument) -> Result<Vec<FlatRow>, MappingError> {
    let lineage = document.lineage();
    features_of(CATEGORY, &document.payload)?
        .into_iter()
        .map(|feature| -> Result<FlatRow, MappingError> {
            let feature: StationFeature = section(CATEGORY, "features[]", feature)?;
            let p = require(CATEGORY, "features[].properties", feature.properties)?;
            let identifier = require(
                CATEGORY,
                "features[].properties.stationIdentifier",
                p.station_identifier,
            )?;
            let geometry = feature.geometry.as_ref();
            let position = position_of(geometry);

            Ok(RowBuilder::new(lineage.clone())
                .field("id", p.id)
                .field("type", p.kind)
                .field("stationIdentifier", identifier)
                .field("name", p.name)
                .field("timeZone", p.time_zone)
                .field("geometry_type", geometry.and_then(|g| g.kind.clone()))
                .field("longitude", position.longitude)
                .field("latitude", position.latitude)
                .quantity("elevation", p.elevation.as_ref())
                .field("forecast", p.forecast)
                .field("county", p.county)
                .field("fireWeatherZone", p.fire_weather_zone)
                .build())
        })
        .collect()
}
