use geoweather::polygons::{self, geohash_to_polygon, ExportError, ExportOptions};
use geoweather::table;
use polars::prelude::*;
use serde_json::Value;

fn boxes() -> DataFrame {
    df! {
        "sw_lon" => [-0.13, -0.12],
        "sw_lat" => [51.50, 51.51],
        "se_lon" => [-0.12, -0.11],
        "se_lat" => [51.50, 51.51],
        "ne_lon" => [-0.12, -0.11],
        "ne_lat" => [51.51, 51.52],
        "nw_lon" => [-0.13, -0.12],
        "nw_lat" => [51.51, 51.52],
        "avg_temp" => [12.5, 14.0],
    }
    .unwrap()
}

#[test]
fn test_two_rows_to_geojson_and_csv() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("polygons.geojson");
    let csv_path = dir.path().join("magnitudes.csv");
    let df = boxes();

    geohash_to_polygon(
        Some(&df),
        Some("avg_temp"),
        Some(&json_path),
        Some(&csv_path),
        &ExportOptions::default(),
    )
    .unwrap();

    let doc: Value = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(doc["type"], "FeatureCollection");
    let features = doc["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["id"], 0);
    assert_eq!(features[1]["id"], 1);
    assert_eq!(features[0]["type"], "Feature");
    assert_eq!(features[0]["properties"]["Temperature"], 12.5);
    assert_eq!(features[1]["properties"]["Temperature"], 14.0);
    assert_eq!(features[0]["geometry"]["type"], "Polygon");
    assert_eq!(features[0]["geometry"]["coordinates"][0][1][0], -0.12);

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "id,avg_temp");
    assert!(lines[1].starts_with("0,12.5"));
    assert!(lines[2].starts_with("1,14"));

    let magnitudes = table::read_csv(&csv_path).unwrap();
    assert_eq!(
        table::column_f64(&magnitudes, "avg_temp").unwrap(),
        vec![Some(12.5), Some(14.0)]
    );
}

#[test]
fn test_open_ring_keeps_four_corners() {
    let options = ExportOptions { close_ring: false };
    let collection = polygons::build_feature_collection(&boxes(), "avg_temp", &options).unwrap();
    for feature in &collection.features {
        assert_eq!(feature.geometry.exterior().len(), 4);
    }
}

#[test]
fn test_any_missing_parameter_creates_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("out.geojson");
    let csv_path = dir.path().join("out.csv");
    let df = boxes();
    let options = ExportOptions::default();

    let results = [
        geohash_to_polygon(None, Some("avg_temp"), Some(&json_path), Some(&csv_path), &options),
        geohash_to_polygon(Some(&df), None, Some(&json_path), Some(&csv_path), &options),
        geohash_to_polygon(Some(&df), Some("avg_temp"), None, Some(&csv_path), &options),
        geohash_to_polygon(Some(&df), Some("avg_temp"), Some(&json_path), None, &options),
    ];

    for result in results {
        assert!(matches!(result, Err(ExportError::MissingParameter)));
    }
    assert!(!json_path.exists());
    assert!(!csv_path.exists());
}

#[test]
fn test_missing_magnitude_column_surfaces_table_error() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("out.geojson");
    let csv_path = dir.path().join("out.csv");
    let df = boxes();

    let err = geohash_to_polygon(
        Some(&df),
        Some("humidity"),
        Some(&json_path),
        Some(&csv_path),
        &ExportOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ExportError::Polars(_)));
}

#[test]
fn test_read_bounding_boxes_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("boxes.csv");
    let mut df = boxes();
    table::write_csv(&mut df, &input).unwrap();

    let loaded = polygons::read_bounding_boxes(&input).unwrap();
    assert_eq!(loaded.height(), 2);

    let collection =
        polygons::build_feature_collection(&loaded, "avg_temp", &ExportOptions::default())
            .unwrap();
    assert_eq!(collection.len(), 2);
}
