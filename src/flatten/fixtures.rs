//! Trimmed but structurally faithful weather.gov payloads used across tests.

use crate::types::document::RawDocument;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};

pub(crate) fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub(crate) fn document(category: &str, identifier: &str, payload: Value) -> RawDocument {
    RawDocument {
        category: category.to_string(),
        identifier: identifier.to_string(),
        captured_at: at(30, 12) + chrono::Duration::seconds(7),
        logical_time: at(30, 12),
        payload,
    }
}

pub(crate) fn points() -> Value {
    json!({
        "id": "https://api.weather.gov/points/45.0314,-70.3131",
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [-70.3131, 45.0314]},
        "properties": {
            "@id": "https://api.weather.gov/points/45.0314,-70.3131",
            "@type": "wx:Point",
            "cwa": "GYX",
            "forecastOffice": "https://api.weather.gov/offices/GYX",
            "gridId": "GYX",
            "gridX": 43,
            "gridY": 60,
            "forecast": "https://api.weather.gov/gridpoints/GYX/43,60/forecast",
            "forecastHourly": "https://api.weather.gov/gridpoints/GYX/43,60/forecast/hourly",
            "forecastGridData": "https://api.weather.gov/gridpoints/GYX/43,60",
            "observationStations": "https://api.weather.gov/gridpoints/GYX/43,60/stations",
            "forecastZone": "https://api.weather.gov/zones/forecast/MEZ008",
            "county": "https://api.weather.gov/zones/county/MEC007",
            "fireWeatherZone": "https://api.weather.gov/zones/fire/MEZ008",
            "timeZone": "America/New_York",
            "radarStation": "KCBW",
            "relativeLocation": {
                "type": "Feature",
                "properties": {
                    "city": "Carrabassett Valley",
                    "state": "ME",
                    "distance": {"unitCode": "wmoUnit:m", "value": 4211.2},
                    "bearing": {"unitCode": "wmoUnit:degree_(angle)", "value": 172}
                }
            }
        }
    })
}

fn period(number: i64, start: &str, end: &str, temperature: i64) -> Value {
    json!({
        "number": number,
        "name": format!("Period {number}"),
        "startTime": start,
        "endTime": end,
        "isDaytime": number % 2 == 1,
        "temperature": temperature,
        "temperatureUnit": "F",
        "temperatureTrend": null,
        "probabilityOfPrecipitation": {"unitCode": "wmoUnit:percent", "value": 20 + number},
        "dewpoint": {"unitCode": "wmoUnit:degC", "value": -8.3},
        "relativeHumidity": {"unitCode": "wmoUnit:percent", "value": 71},
        "windSpeed": "5 to 10 mph",
        "windDirection": "NW",
        "icon": "https://api.weather.gov/icons/land/day/snow,20?size=medium",
        "shortForecast": "Chance Snow Showers",
        "detailedForecast": "A chance of snow showers. Mostly cloudy."
    })
}

/// A forecast document with `periods` entries, twelve hours apart
/// (or one hour apart when `hourly`).
pub(crate) fn forecast(periods: usize, hourly: bool) -> Value {
    let step = if hourly { 1 } else { 12 };
    let start = NaiveDate::from_ymd_opt(2025, 12, 30)
        .unwrap()
        .and_hms_opt(6, 0, 0)
        .unwrap();
    let periods: Vec<Value> = (0..periods)
        .map(|i| {
            let begin = start + chrono::Duration::hours((i * step) as i64);
            let end = begin + chrono::Duration::hours(step as i64);
            period(
                i as i64 + 1,
                &format!("{}-05:00", begin.format("%Y-%m-%dT%H:%M:%S")),
                &format!("{}-05:00", end.format("%Y-%m-%dT%H:%M:%S")),
                10 + i as i64,
            )
        })
        .collect();

    json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[-70.33, 45.04], [-70.32, 45.02], [-70.29, 45.03], [-70.33, 45.04]]]
        },
        "properties": {
            "units": "us",
            "forecastGenerator": if hourly { "HourlyForecastGenerator" } else { "BaselineForecastGenerator" },
            "generatedAt": "2025-12-30T16:42:10+00:00",
            "updateTime": "2025-12-30T15:10:01+00:00",
            "validTimes": "2025-12-30T09:00:00+00:00/P7DT16H",
            "elevation": {"unitCode": "wmoUnit:m", "value": 853.1},
            "periods": periods
        }
    })
}

pub(crate) fn observation() -> Value {
    json!({
        "id": "https://api.weather.gov/stations/KSFM/observations/2025-12-30T11:56:00+00:00",
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [-70.71, 43.4]},
        "properties": {
            "@id": "https://api.weather.gov/stations/KSFM/observations/2025-12-30T11:56:00+00:00",
            "@type": "wx:ObservationStation",
            "elevation": {"unitCode": "wmoUnit:m", "value": 74},
            "station": "https://api.weather.gov/stations/KSFM",
            "timestamp": "2025-12-30T11:56:00+00:00",
            "rawMessage": "KSFM 301156Z 31008KT 10SM FEW045 M06/M11 A3001",
            "textDescription": "Mostly Clear",
            "icon": "https://api.weather.gov/icons/land/day/few?size=medium",
            "presentWeather": [],
            "temperature": {"unitCode": "wmoUnit:degC", "value": -6.1, "qualityControl": "V"},
            "dewpoint": {"unitCode": "wmoUnit:degC", "value": 5.2, "qualityControl": "V"},
            "windDirection": {"unitCode": "wmoUnit:degree_(angle)", "value": 310, "qualityControl": "V"},
            "windSpeed": {"unitCode": "wmoUnit:km_h-1", "value": "14.8", "qualityControl": "V"},
            "windGust": {"unitCode": "wmoUnit:km_h-1", "value": null, "qualityControl": "Z"},
            "barometricPressure": {"unitCode": "wmoUnit:Pa", "value": 101630, "qualityControl": "V"},
            "seaLevelPressure": {"unitCode": "wmoUnit:Pa", "value": null, "qualityControl": "Z"},
            "visibility": {"unitCode": "wmoUnit:m", "value": 16090, "qualityControl": "C"},
            "maxTemperatureLast24Hours": {"unitCode": "wmoUnit:degC", "value": null},
            "minTemperatureLast24Hours": {"unitCode": "wmoUnit:degC", "value": null},
            "precipitationLastHour": {"unitCode": "wmoUnit:mm", "value": null, "qualityControl": "Z"},
            "precipitationLast3Hours": {"unitCode": "wmoUnit:mm", "value": null, "qualityControl": "Z"},
            "precipitationLast6Hours": {"unitCode": "wmoUnit:mm", "value": null, "qualityControl": "Z"},
            "relativeHumidity": {"unitCode": "wmoUnit:percent", "value": 67.43, "qualityControl": "V"},
            "windChill": {"unitCode": "wmoUnit:degC", "value": -11.4, "qualityControl": "V"},
            "heatIndex": {"unitCode": "wmoUnit:degC", "value": null, "qualityControl": "V"},
            "cloudLayers": [
                {"base": {"unitCode": "wmoUnit:m", "value": 1370}, "amount": "FEW"}
            ]
        }
    })
}

fn station(identifier: &str, name: &str, coordinates: Value, elevation: f64) -> Value {
    json!({
        "id": format!("https://api.weather.gov/stations/{identifier}"),
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": coordinates},
        "properties": {
            "@id": format!("https://api.weather.gov/stations/{identifier}"),
            "@type": "wx:ObservationStation",
            "elevation": {"unitCode": "wmoUnit:m", "value": elevation},
            "stationIdentifier": identifier,
            "name": name,
            "timeZone": "America/New_York",
            "forecast": "https://api.weather.gov/zones/forecast/MEZ008",
            "county": "https://api.weather.gov/zones/county/MEC007",
            "fireWeatherZone": "https://api.weather.gov/zones/fire/MEZ008"
        }
    })
}

pub(crate) fn stations() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [
            station("KSFM", "Sanford Seacoast Regional Airport", json!([-70.71, 43.4]), 74.0),
            station("KIZG", "Fryeburg, Eastern Slopes Regional Airport", json!([-70.95, 43.99, 135.6]), 135.6),
            station("K8B0", "Rangeley", json!([-70.7, 44.99]), 500.2)
        ],
        "observationStations": [
            "https://api.weather.gov/stations/KSFM",
            "https://api.weather.gov/stations/KIZG",
            "https://api.weather.gov/stations/K8B0"
        ]
    })
}

pub(crate) fn zone() -> Value {
    json!({
        "id": "https://api.weather.gov/zones/forecast/MEZ008",
        "type": "Feature",
        "geometry": null,
        "properties": {
            "@id": "https://api.weather.gov/zones/forecast/MEZ008",
            "@type": "wx:Zone",
            "id": "MEZ008",
            "type": "public",
            "name": "Northern Franklin",
            "effectiveDate": "2025-03-18T18:00:00+00:00",
            "expirationDate": "2200-01-01T00:00:00+00:00",
            "state": "ME",
            "cwa": ["GYX"],
            "forecastOffices": ["https://api.weather.gov/offices/GYX"],
            "timeZone": ["America/New_York"],
            "observationStations": ["https://api.weather.gov/stations/K8B0"],
            "radarStation": null
        }
    })
}

pub(crate) fn zones() -> Value {
    let mut second = zone();
    second["properties"]["id"] = json!("MEZ007");
    second["properties"]["name"] = json!("Northern Oxford");
    second["geometry"] = json!({
        "type": "Polygon",
        "coordinates": [[[-71.0, 45.0], [-70.8, 45.1], [-70.9, 44.9], [-71.0, 45.0]]]
    });
    json!({"type": "FeatureCollection", "features": [zone(), second]})
}

pub(crate) fn grid_data() -> Value {
    json!({
        "@id": "https://api.weather.gov/gridpoints/GYX/43,60",
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[-70.33, 45.04], [-70.32, 45.02], [-70.29, 45.03], [-70.33, 45.04]]]
        },
        "properties": {
            "@id": "https://api.weather.gov/gridpoints/GYX/43,60",
            "@type": "wx:Gridpoint",
            "updateTime": "2025-12-30T15:10:01+00:00",
            "validTimes": "2025-12-30T09:00:00+00:00/P7DT16H",
            "elevation": {"unitCode": "wmoUnit:m", "value": 853.1},
            "forecastOffice": "https://api.weather.gov/offices/GYX",
            "gridId": "GYX",
            "gridX": "43",
            "gridY": "60",
            "temperature": {
                "uom": "wmoUnit:degC",
                "values": [
                    {"validTime": "2025-12-30T09:00:00+00:00/PT1H", "value": -7.2},
                    {"validTime": "2025-12-30T10:00:00+00:00/PT2H", "value": -7.8}
                ]
            },
            "snowfallAmount": {
                "uom": "wmoUnit:mm",
                "values": [{"validTime": "2025-12-30T09:00:00+00:00/PT6H", "value": 12.7}]
            },
            "weather": {
                "values": [{
                    "validTime": "2025-12-30T09:00:00+00:00/PT6H",
                    "value": [{"coverage": "chance", "weather": "snow_showers", "intensity": "light"}]
                }]
            },
            "hazards": {"values": []}
        }
    })
}
