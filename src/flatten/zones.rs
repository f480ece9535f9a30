//! `zones`: one row per forecast zone feature.
//!
//! Zone properties carry both JSON-LD keys (`@id`, `@type`) and plain ones
//! (`id`, `type`). The plain keys land in `id_code` and `type_code`.

use crate::flatten::error::MappingError;
use crate::flatten::{coerce, features_of, require, section};
use crate::types::category::Category;
use crate::types::document::RawDocument;
use crate::types::payload::Geometry;
use crate::types::row::{FlatRow, RowBuilder};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;

const CATEGORY: Category = Category::Zones;

#[derive(Debug, Default, Deserialize)]
struct ZoneFeature {
    geometry: Option<Geometry>,
    properties: Option<ZoneProperties>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ZoneProperties {
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "@type")]
    kind: Option<String>,
    #[serde(rename = "id")]
    id_code: Option<String>,
    #[serde(rename = "type")]
    type_code: Option<String>,
    name: Option<String>,
    state: Option<String>,
    #[serde(default, deserialize_with = "coerce::lenient_timestamp")]
    effective_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "coerce::lenient_timestamp")]
    expiration_date: Option<NaiveDateTime>,
    #[serde(default)]
    cwa: Value,
    #[serde(default)]
    forecast_offices: Value,
    #[serde(default)]
    time_zone: Value,
    #[serde(default)]
    observation_stations: Value,
    radar_station: Option<String>,
}

pub(super) fn flatten(document: &RawDocument) -> Result<Vec<FlatRow>, MappingError> {
    let lineage = document.lineage();
    features_of(CATEGORY, &document.payload)?
        .into_iter()
        .map(|feature| -> Result<FlatRow, MappingError> {
            let feature: ZoneFeature = section(CATEGORY, "features[]", feature)?;
            let p = require(CATEGORY, "features[].properties", feature.properties)?;
            let id_code = require(CATEGORY, "features[].properties.id", p.id_code)?;
            let (geometry_type, coordinates) = match feature.geometry {
                Some(geometry) => (geometry.kind.clone(), geometry.coordinates()),
                None => (None, Value::Null),
            };

            Ok(RowBuilder::new(lineage.clone())
                .field("id", p.id)
                .field("type", p.kind)
                .field("id_code", id_code)
                .field("type_code", p.type_code)
                .field("name", p.name)
                .field("state", p.state)
                .field("effectiveDate", p.effective_date)
                .field("expirationDate", p.expiration_date)
                .field("cwa", p.cwa)
                .field("forecastOffices", p.forecast_offices)
                .field("timeZone", p.time_zone)
                .field("observationStations", p.observation_stations)
                .field("radarStation", p.radar_station)
                .field("geometry_type", geometry_type)
                .field("geometry_coordinates", coordinates)
                .build())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::fixtures;
    use crate::types::row::FieldValue;
    use crate::types::schema::TableSchema;
    use serde_json::json;

    #[test]
    fn test_single_zone_feature() {
        let doc = fixtures::document("zones", "MEZ008", fixtures::zone());
        let rows = flatten(&doc).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];

        assert_eq!(
            row.get("id").unwrap().as_str(),
            Some("https://api.weather.gov/zones/forecast/MEZ008")
        );
        assert_eq!(row.get("type").unwrap().as_str(), Some("wx:Zone"));
        assert_eq!(row.get("id_code").unwrap().as_str(), Some("MEZ008"));
        assert_eq!(row.get("type_code").unwrap().as_str(), Some("public"));
        assert_eq!(row.get("cwa"), Some(FieldValue::Json(json!(["GYX"]))));
        assert_eq!(
            row.get("timeZone"),
            Some(FieldValue::Json(json!(["America/New_York"])))
        );
        assert_eq!(row.get("radarStation"), Some(FieldValue::Null));
        assert_eq!(row.get("geometry_type"), Some(FieldValue::Null));
        assert_eq!(row.get("geometry_coordinates"), Some(FieldValue::Null));
        assert_eq!(
            row.get("expirationDate").and_then(|v| v.as_timestamp()).map(|t| t.to_string()),
            Some("2200-01-01 00:00:00".to_string())
        );
        assert_eq!(
            row.column_names(),
            TableSchema::for_category(Category::Zones).column_names()
        );
    }

    #[test]
    fn test_zone_collection_keeps_polygons_whole() {
        let doc = fixtures::document("zones", "ME", fixtures::zones());
        let rows = flatten(&doc).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("id_code").unwrap().as_str(), Some("MEZ007"));
        assert_eq!(rows[1].get("geometry_type").unwrap().as_str(), Some("Polygon"));
        let coordinates = rows[1].get("geometry_coordinates").unwrap();
        assert_eq!(
            coordinates.as_json().and_then(|c| c[0].as_array()).map(Vec::len),
            Some(4)
        );
    }

    #[test]
    fn test_missing_zone_code_fails() {
        let mut payload = fixtures::zone();
        payload["properties"].as_object_mut().unwrap().remove("id");
        let doc = fixtures::document("zones", "MEZ008", payload);
        assert!(matches!(
            flatten(&doc),
            Err(MappingError::MissingField { path: "features[].properties.id", .. })
        ));

        let doc = fixtures::document("zones", "MEZ008", json!("MEZ008"));
        assert!(matches!(flatten(&doc), Err(MappingError::NotAnObject { .. })));
    }
}
