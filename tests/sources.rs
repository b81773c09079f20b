//! CSV loaders: validation errors, date formats, row selection.

use chrono::NaiveDate;
use riskradar::sources::{location_matches, parse_date, DataError, HotspotLog, WeatherLog};
use std::path::{Path, PathBuf};

fn write_csv(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn missing_file_is_reported_by_path() {
    let err = WeatherLog::load(Path::new("no-such-weather.csv")).unwrap_err();
    match &err {
        DataError::FileNotFound { path } => assert_eq!(path, Path::new("no-such-weather.csv")),
        other => panic!("unexpected {other:?}"),
    }
    assert!(err.to_string().contains("no-such-weather.csv"));
}

#[test]
fn missing_columns_are_named() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "w.csv", "date,temperature\n2026-01-01,30\n");
    let err = WeatherLog::load(&path).unwrap_err();
    match &err {
        DataError::MissingColumns {
            missing, available, ..
        } => {
            assert_eq!(missing, &vec!["wind_speed".to_string(), "precipitation".to_string()]);
            assert_eq!(available, &vec!["date".to_string(), "temperature".to_string()]);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(err.to_string().contains("wind_speed"));
}

#[test]
fn weather_log_loads_both_date_formats_and_optional_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "w.csv",
        "date,location,weather_type,temperature,humidity,wind_speed,precipitation\n\
         2026-01-14,California,Sunny,31.5,22,18,0\n\
         15-01-2026,Texas,Cloudy,24,,9.5,1.2\n\
         ,California,Windy,35,30,27,0\n",
    );
    let log = WeatherLog::load(&path).unwrap();
    assert_eq!(log.len(), 3);
    assert_eq!(log.skipped, 0);

    let first = &log.records[0];
    assert_eq!(first.date, Some(ymd(2026, 1, 14)));
    assert_eq!(first.location.as_deref(), Some("California"));
    assert_eq!(first.weather_type.as_deref(), Some("Sunny"));
    assert_eq!(first.humidity, Some(22.0));
    assert_eq!(first.vegetation_dryness, None);

    let second = &log.records[1];
    assert_eq!(second.date, Some(ymd(2026, 1, 15)));
    assert_eq!(second.humidity, None);

    assert_eq!(log.records[2].date, None);
    assert_eq!(log.latest().map(|r| r.temperature), Some(35.0));
}

#[test]
fn weather_rows_that_do_not_parse_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "w.csv",
        "date,temperature,wind_speed,precipitation\n\
         2026-02-01,hot,10,0\n\
         not-a-date,30,10,0\n\
         2026-02-02,30,10,0\n",
    );
    let log = WeatherLog::load(&path).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log.skipped, 2);
}

#[test]
fn select_prefers_last_matching_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "w.csv",
        "date,location,temperature,wind_speed,precipitation\n\
         2026-01-10,California,30,10,0\n\
         2026-01-10,california,33,12,0\n\
         2026-01-11,California,36,14,0\n\
         2026-01-10,Oregon,20,5,4\n",
    );
    let log = WeatherLog::load(&path).unwrap();

    let r = log.select("California, USA", Some(ymd(2026, 1, 10))).unwrap();
    assert_eq!(r.temperature, 33.0);

    let r = log.select("California", None).unwrap();
    assert_eq!(r.temperature, 36.0);

    assert!(log.select("Texas", None).is_none());
    assert!(log.select("Oregon", Some(ymd(2026, 1, 11))).is_none());
}

#[test]
fn rows_without_location_match_any_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "w.csv",
        "weather_type,wind_speed,precipitation,temperature\nSunny,12,0,31\nRain,20,8,22\n",
    );
    let log = WeatherLog::load(&path).unwrap();
    let r = log.select("Shimla, Himachal Pradesh", None).unwrap();
    assert_eq!(r.weather_type.as_deref(), Some("Rain"));
}

#[test]
fn location_matching_rules() {
    assert!(location_matches("California", "California, USA"));
    assert!(location_matches("CALIFORNIA, usa", "California, USA"));
    assert!(location_matches(" Patiala ", "Patiala, Punjab"));
    assert!(!location_matches("Punjab", "Patiala, Punjab"));
    assert!(!location_matches("Cali", "California, USA"));
}

#[test]
fn parse_date_formats() {
    assert_eq!(parse_date("2026-02-12"), Some(ymd(2026, 2, 12)));
    assert_eq!(parse_date("12-02-2026"), Some(ymd(2026, 2, 12)));
    assert_eq!(parse_date(" 2026-02-12 "), Some(ymd(2026, 2, 12)));
    assert_eq!(parse_date("02/12/2026"), None);
}

const FIRMS: &str = "latitude,longitude,bright_t31,frp,daynight,acq_date,confidence\n\
    36.71,-119.40,310.5,25.3,D,2026-01-15,n\n\
    36.80,-119.52,295.0,3.1,N,2026-01-15,l\n\
    37.02,-119.11,330.2,88.0,D,16-01-2026,h\n\
    36.50,-119.90,305.0,,D,2026-01-16,n\n";

#[test]
fn hotspot_log_groups_by_acquisition_date() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "f.csv", FIRMS);
    let log = HotspotLog::load(&path).unwrap();
    assert_eq!(log.len(), 3);
    assert_eq!(log.skipped, 1);
    assert_eq!(log.dates(), vec![ymd(2026, 1, 15), ymd(2026, 1, 16)]);
    assert_eq!(log.latest_date(), Some(ymd(2026, 1, 16)));
    assert_eq!(log.on(ymd(2026, 1, 15)).len(), 2);
    assert_eq!(log.on(ymd(2026, 1, 16))[0].frp, 88.0);
    assert!(log.on(ymd(2026, 1, 17)).is_empty());
}

#[test]
fn hotspot_file_without_frp_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "f.csv",
        "latitude,longitude,bright_t31,daynight,acq_date\n36.7,-119.4,310,D,2026-01-15\n",
    );
    match HotspotLog::load(&path).unwrap_err() {
        DataError::MissingColumns { missing, .. } => assert_eq!(missing, vec!["frp".to_string()]),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn bundled_sample_data_loads_cleanly() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let hotspots = HotspotLog::load(&root.join("nasa_firms_data.csv")).unwrap();
    let weather = WeatherLog::load(&root.join("weather_data.csv")).unwrap();
    assert_eq!(hotspots.skipped, 0);
    assert_eq!(weather.skipped, 0);
    let latest = hotspots.latest_date().unwrap();
    for name in ["California, USA", "Patiala, Punjab", "Shimla, Himachal Pradesh"] {
        assert!(weather.select(name, Some(latest)).is_some(), "{name}");
    }
}
