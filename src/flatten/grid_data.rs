//! `grid_data`: one row per raw gridpoint document.
//!
//! Time-series layers are not exploded; each layer is kept whole in its own
//! structured column.

use crate::flatten::error::MappingError;
use crate::flatten::{coerce, object_of, section};
use crate::types::category::Category;
use crate::types::document::RawDocument;
use crate::types::payload::{Geometry, QuantitativeValue};
use crate::types::row::{FlatRow, RowBuilder};
use crate::types::schema::GRID_LAYERS;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;

const CATEGORY: Category = Category::GridData;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridProperties {
    grid_id: Option<String>,
    #[serde(default, deserialize_with = "coerce::lenient_i64")]
    grid_x: Option<i64>,
    #[serde(default, deserialize_with = "coerce::lenient_i64")]
    grid_y: Option<i64>,
    forecast_office: Option<String>,
    #[serde(default, deserialize_with = "coerce::lenient_timestamp")]
    update_time: Option<NaiveDateTime>,
    valid_times: Option<String>,
    elevation: Option<QuantitativeValue>,
}

pub(super) fn flatten(document: &RawDocument) -> Result<Vec<FlatRow>, MappingError> {
    let object = object_of(CATEGORY, &document.payload)?;
    let raw_properties = match object.get("properties") {
        Some(value @ Value::Object(_)) => value,
        Some(Value::Null) | None => {
            return Err(MappingError::MissingField {
                category: CATEGORY,
                path: "properties",
            })
        }
        Some(other) => {
            return Err(MappingError::Malformed {
                category: CATEGORY,
                path: "properties",
                source: serde::de::Error::custom(format!("expected an object, found {other}")),
            })
        }
    };
    let properties: GridProperties = section(CATEGORY, "properties", raw_properties)?;
    let geometry: Option<Geometry> = section(
        CATEGORY,
        "geometry",
        object.get("geometry").unwrap_or(&Value::Null),
    )?;

    let (geometry_type, coordinates) = match geometry {
        Some(geometry) => (geometry.kind.clone(), geometry.coordinates()),
        None => (None, Value::Null),
    };

    let row = RowBuilder::new(document.lineage())
        .field("gridId", properties.grid_id)
        .field("gridX", properties.grid_x)
        .field("gridY", properties.grid_y)
        .field("forecastOffice", properties.forecast_office)
        .field("updateTime", properties.update_time)
        .field("validTimes", properties.valid_times)
        .quantity("elevation", properties.elevation.as_ref())
        .field("geometry_type", geometry_type)
        .field("geometry_coordinates", coordinates);

    let row = GRID_LAYERS.into_iter().fold(row, |row, layer| {
        let value = raw_properties.get(layer).cloned().unwrap_or(Value::Null);
        row.field(layer, value)
    });

    Ok(vec![row.build()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::fixtures;
    use crate::types::row::FieldValue;
    use crate::types::schema::TableSchema;
    use serde_json::json;

    #[test]
    fn test_grid_row_keeps_layers_whole() {
        let doc = fixtures::document("grid_data", "Sugarloaf", fixtures::grid_data());
        let rows = flatten(&doc).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];

        assert_eq!(row.get("gridId").unwrap().as_str(), Some("GYX"));
        assert_eq!(row.get("gridX"), Some(FieldValue::Int(43)));
        assert_eq!(row.get("gridY"), Some(FieldValue::Int(60)));
        assert_eq!(row.get("elevation_value"), Some(FieldValue::Float(853.1)));
        assert_eq!(row.get("geometry_type").unwrap().as_str(), Some("Polygon"));

        let temperature = row.get("temperature").unwrap();
        let values = temperature.as_json().and_then(|t| t["values"].as_array()).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1]["value"], json!(-7.8));

        assert!(row.get("snowfallAmount").unwrap().as_json().is_some());
        assert_eq!(row.get("hazards"), Some(FieldValue::Json(json!({"values": []}))));
        assert_eq!(row.get("iceAccumulation"), Some(FieldValue::Null));
        assert_eq!(
            row.column_names(),
            TableSchema::for_category(Category::GridData).column_names()
        );
    }

    #[test]
    fn test_grid_requires_properties() {
        let doc = fixtures::document("grid_data", "Sugarloaf", json!({"type": "Feature"}));
        assert!(matches!(
            flatten(&doc),
            Err(MappingError::MissingField { path: "properties", .. })
        ));

        let doc = fixtures::document("grid_data", "Sugarloaf", json!({"properties": [1, 2]}));
        assert!(matches!(flatten(&doc), Err(MappingError::Malformed { .. })));

        let mut payload = fixtures::grid_data();
        payload["properties"]["gridX"] = json!("forty-three");
        let doc = fixtures::document("grid_data", "Sugarloaf", payload);
        assert!(matches!(flatten(&doc), Err(MappingError::Malformed { .. })));
    }

    #[test]
    fn test_grid_id_is_optional() {
        let mut payload = fixtures::grid_data();
        payload["properties"].as_object_mut().unwrap().remove("gridId");
        let doc = fixtures::document("grid_data", "Sugarloaf", payload);
        let rows = flatten(&doc).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("gridId"), Some(FieldValue::Null));
        assert_eq!(rows[0].get("gridX"), Some(FieldValue::Int(43)));
    }
}
