//! Payload building blocks shared by several weather API document shapes.

use crate::flatten::coerce;
use serde::Deserialize;
use serde_json::Value;

/// A measured quantity as the API reports it, e.g.
/// `{"value": 5.2, "unitCode": "wmoUnit:degC"}`.
///
/// Numeric strings in `value` are accepted and converted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeValue {
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit_code: Option<String>,
    #[serde(default)]
    pub quality_control: Option<String>,
}

/// A GeoJSON geometry. Coordinates are kept untyped because points and
/// polygons share the field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub coordinates: Value,
}

/// A position decoded from a point's `[longitude, latitude, elevation?]` array.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub elevation: Option<f64>,
}

impl Geometry {
    /// Reads the coordinates positionally. Missing slots, non-numeric slots and
    /// non-array coordinates all decode to `None`.
    pub fn position(&self) -> Position {
        let Value::Array(coordinates) = &self.coordinates else {
            return Position::default();
        };
        let at = |idx: usize| coordinates.get(idx).and_then(coerce::number_of);
        Position {
            longitude: at(0),
            latitude: at(1),
            elevation: at(2),
        }
    }

    /// The raw coordinates, or `Value::Null` when absent.
    pub fn coordinates(&self) -> Value {
        self.coordinates.clone()
    }
}

/// Position of an optional geometry.
pub(crate) fn position_of(geometry: Option<&Geometry>) -> Position {
    geometry.map(Geometry::position).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn geometry(value: Value) -> Geometry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_position_with_elevation() {
        let g = geometry(json!({"type": "Point", "coordinates": [-70.31, 45.05, 1200.5]}));
        assert_eq!(
            g.position(),
            Position {
                longitude: Some(-70.31),
                latitude: Some(45.05),
                elevation: Some(1200.5),
            }
        );
    }

    #[test]
    fn test_position_without_elevation() {
        let g = geometry(json!({"type": "Point", "coordinates": [-70.31, 45.05]}));
        let p = g.position();
        assert_eq!(p.longitude, Some(-70.31));
        assert_eq!(p.latitude, Some(45.05));
        assert_eq!(p.elevation, None);
    }

    #[test]
    fn test_polygon_has_no_position() {
        let g = geometry(json!({"type": "Polygon", "coordinates": [[[-70.0, 45.0], [-70.1, 45.1]]]}));
        assert_eq!(g.position(), Position::default());
        assert_eq!(g.kind.as_deref(), Some("Polygon"));
    }

    #[test]
    fn test_quantity_accepts_numeric_strings() {
        let q: QuantitativeValue =
            serde_json::from_value(json!({"value": "5.2", "unitCode": "wmoUnit:degC"})).unwrap();
        assert_eq!(q.value, Some(5.2));
        assert_eq!(q.unit_code.as_deref(), Some("wmoUnit:degC"));

        let q: QuantitativeValue = serde_json::from_value(json!({"value": null})).unwrap();
        assert_eq!(q, QuantitativeValue::default());

        assert!(serde_json::from_value::<QuantitativeValue>(json!({"value": "warm"})).is_err());
    }
}
