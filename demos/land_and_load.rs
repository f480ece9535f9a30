//! Lands a few hand-written documents, loads them into the bronze tables and
//! queries the result.
//!
//! `DATALAKE_PATH` and `DATABASE_URL` choose the directories; by default they
//! are created under the current directory.

use polars::prelude::*;
use serde_json::json;
use std::env;
use weather_lake::{hash_key, Category, LakeError, WeatherLake};

#[tokio::main]
async fn main() -> Result<(), LakeError> {
    configure_polars_display();
    let lake = WeatherLake::from_env()?;
    println!(
        "Landing zone: {}\nBronze store: {}",
        lake.config().landing_root.display(),
        lake.config().store_path.display()
    );

    lake.land()
        .category(Category::Points)
        .identifier("Sugarloaf")
        .payload(&json!({
            "properties": {
                "gridId": "GYX",
                "gridX": 43,
                "gridY": 60,
                "relativeLocation": {"properties": {"city": "Carrabassett Valley", "state": "ME"}}
            },
            "geometry": {"type": "Point", "coordinates": [-70.3131, 45.0314]}
        }))
        .call()?;

    lake.land()
        .category(Category::Forecasts)
        .identifier("Sugarloaf")
        .payload(&json!({
            "properties": {
                "units": "us",
                "generatedAt": "2025-12-30T16:42:10+00:00",
                "periods": [
                    {"number": 1, "name": "Tonight", "temperature": 12, "temperatureUnit": "F",
                     "startTime": "2025-12-30T18:00:00-05:00", "endTime": "2025-12-31T06:00:00-05:00",
                     "shortForecast": "Snow Showers Likely",
                     "probabilityOfPrecipitation": {"unitCode": "wmoUnit:percent", "value": 70}},
                    {"number": 2, "name": "Wednesday", "temperature": 21, "temperatureUnit": "F",
                     "startTime": "2025-12-31T06:00:00-05:00", "endTime": "2025-12-31T18:00:00-05:00",
                     "shortForecast": "Mostly Cloudy",
                     "probabilityOfPrecipitation": {"unitCode": "wmoUnit:percent", "value": 20}}
                ]
            }
        }))
        .call()?;

    let summary = lake.reload_all().await?;
    for report in &summary.reports {
        println!(
            "{:<13} {} documents, {} rows, {} failed",
            report.category.to_string(),
            report.documents,
            report.rows_appended,
            report.failures.len()
        );
    }
    for (category, error) in &summary.failed {
        println!("{category} failed: {error}");
    }

    let periods = lake
        .scan(Category::Forecasts)?
        .select([
            col("identifier"),
            col("name"),
            col("startTime"),
            col("temperature"),
            col("probabilityOfPrecipitation_value"),
        ])
        .sort(["startTime"], Default::default())
        .collect()
        .map_err(|e| weather_lake::SinkError::Polars {
            table: Category::Forecasts.table_name().to_string(),
            source: e,
        })?;
    println!("{periods}");

    println!("Resort key: {}", hash_key(["Sugarloaf", "ME"]));
    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
