use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};
use weather_lake::{flatten, Category, RawDocument};

fn hourly_payload(periods: usize) -> Value {
    let start = NaiveDate::from_ymd_opt(2025, 12, 30)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let periods: Vec<Value> = (0..periods)
        .map(|i| {
            let begin = start + Duration::hours(i as i64);
            json!({
                "number": i + 1,
                "name": "",
                "startTime": format!("{}-05:00", begin.format("%Y-%m-%dT%H:%M:%S")),
                "endTime": format!("{}-05:00", (begin + Duration::hours(1)).format("%Y-%m-%dT%H:%M:%S")),
                "isDaytime": i % 24 > 6 && i % 24 < 18,
                "temperature": (i % 30) as i64,
                "temperatureUnit": "F",
                "temperatureTrend": "",
                "probabilityOfPrecipitation": {"unitCode": "wmoUnit:percent", "value": i % 100},
                "dewpoint": {"unitCode": "wmoUnit:degC", "value": -8.3},
                "relativeHumidity": {"unitCode": "wmoUnit:percent", "value": 71},
                "windSpeed": "10 mph",
                "windDirection": "NW",
                "icon": "https://api.weather.gov/icons/land/night/snow,20?size=small",
                "shortForecast": "Chance Light Snow",
                "detailedForecast": ""
            })
        })
        .collect();
    json!({
        "type": "Feature",
        "properties": {
            "units": "us",
            "forecastGenerator": "HourlyForecastGenerator",
            "generatedAt": "2025-12-30T16:42:10+00:00",
            "updateTime": "2025-12-30T15:10:01+00:00",
            "elevation": {"unitCode": "wmoUnit:m", "value": 853.1},
            "periods": periods
        }
    })
}

fn documents(count: usize) -> Vec<RawDocument> {
    let noon = NaiveDate::from_ymd_opt(2025, 12, 30)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    (0..count)
        .map(|i| RawDocument {
            category: "hourly".to_string(),
            identifier: format!("Resort_{i}"),
            captured_at: noon,
            logical_time: noon,
            payload: hourly_payload(156),
        })
        .collect()
}

fn bench_flatten(c: &mut Criterion) {
    let batch = documents(20);
    c.bench_function("flatten_hourly_20x156", |b| {
        b.iter(|| flatten(Category::Hourly, black_box(&batch)))
    });
}

criterion_group!(benches, bench_flatten);
criterion_main!(benches);
