use geoweather::chart::fonts;
use geoweather::chart::units::FAHRENHEIT_TO_CELSIUS;
use geoweather::chart::{temperature_plot, ChartError, LayerKind, TemperatureSeries};
use geoweather::config::ChartConfig;
use geoweather::properties::PropertyReader;
use serde_json::json;

fn sparse_series() -> TemperatureSeries {
    TemperatureSeries::new(
        vec![14.0, 3.0, 22.0, 9.0],
        vec![24.5, 11.0, 15.5, 18.0],
        vec![12.0, 2.0, 7.0, 30.0],
    )
}

#[test]
fn test_sparse_hours_densify_to_24_slots() {
    let chart = temperature_plot(&sparse_series(), &ChartConfig::default()).unwrap();
    let hourly = &chart.series;

    assert_eq!(hourly.hours.len(), 24);
    assert_eq!(hourly.values.len(), 24);
    assert_eq!(hourly.counts.len(), 24);

    for (hour, value, count) in [(3, 11.0, 2.0), (9, 18.0, 30.0), (14, 24.5, 12.0), (22, 15.5, 7.0)] {
        assert_eq!(hourly.hours[hour], hour as f64);
        assert_eq!(hourly.values[hour], value);
        assert_eq!(hourly.counts[hour], count);
    }

    let empty = hourly.values.iter().filter(|v| v.is_nan()).count();
    assert_eq!(empty, 20);
    assert!(hourly.counts[0].is_nan());

    // Only sampled hours get a marker
    assert_eq!(chart.scatter.points.len(), 4);
}

#[test]
fn test_hours_as_object_is_rejected() {
    let series = TemperatureSeries::new(
        json!({"0": 1, "1": 2}),
        vec![20.0, 21.0],
        vec![1.0, 2.0],
    );

    let err = temperature_plot(&series, &ChartConfig::default()).unwrap_err();
    assert!(matches!(err, ChartError::InvalidParameter { name: "hours" }));
    assert_eq!(err.to_string(), "Error: hours must be a numeric array or list");
}

#[test]
fn test_stdev_as_string_is_rejected() {
    let series = sparse_series().with_stdev(json!("1.5"));
    let err = temperature_plot(&series, &ChartConfig::default()).unwrap_err();
    assert!(matches!(err, ChartError::InvalidParameter { name: "stdev" }));
}

#[test]
fn test_reference_bounds_need_both() {
    let config = ChartConfig::default();

    let both = sparse_series().with_reference_max(30.0).with_reference_min(15.0);
    let chart = temperature_plot(&both, &config).unwrap();
    assert!(chart.has_layer(LayerKind::ReferenceMax));
    assert!(chart.has_layer(LayerKind::ReferenceMin));
    let max = chart.layer(LayerKind::ReferenceMax).unwrap();
    assert!(max.points.iter().all(|&(_, y)| y == 30.0));

    let only_max = sparse_series().with_reference_max(30.0);
    let chart = temperature_plot(&only_max, &config).unwrap();
    assert!(!chart.has_layer(LayerKind::ReferenceMax));
    assert!(!chart.has_layer(LayerKind::ReferenceMin));
}

#[test]
fn test_right_axis_is_exact_fahrenheit_of_left() {
    let chart = temperature_plot(&sparse_series(), &ChartConfig::default()).unwrap();
    let (lo, hi) = chart.left_limits;

    assert_eq!(
        chart.right_limits,
        (lo / FAHRENHEIT_TO_CELSIUS + 32.0, hi / FAHRENHEIT_TO_CELSIUS + 32.0)
    );
}

#[test]
fn test_switched_axes_convert_back_to_celsius() {
    let props = PropertyReader::from_assignments(["axis.y.switch=true"]);
    let config = ChartConfig::from_properties(&props);
    let series = TemperatureSeries::new(vec![0.0, 12.0], vec![50.0, 77.0], vec![1.0, 4.0]);

    let chart = temperature_plot(&series, &config).unwrap();
    let (lo, hi) = chart.left_limits;
    assert_eq!(
        chart.right_limits,
        ((lo - 32.0) * FAHRENHEIT_TO_CELSIUS, (hi - 32.0) * FAHRENHEIT_TO_CELSIUS)
    );
    assert_eq!(chart.y_label_left, "Temperature (°F)");
    assert_eq!(chart.y_label_right, "Temperature (°C)");
}

#[test]
fn test_full_overlay_layers_and_legend() {
    let hours: Vec<f64> = (0..24).map(f64::from).collect();
    let values: Vec<f64> = hours.iter().map(|h| 15.0 + (h - 12.0).abs() * -0.5).collect();
    let counts: Vec<f64> = hours.iter().map(|h| h + 1.0).collect();
    let reference: Vec<f64> = values.iter().map(|v| v - 1.0).collect();

    let series = TemperatureSeries::new(hours, values, counts)
        .with_stdev(vec![0.5; 24])
        .with_reference_values(reference)
        .with_reference_max(16.0)
        .with_reference_min(8.0);

    let chart = temperature_plot(&series, &ChartConfig::default()).unwrap();
    let kinds: Vec<LayerKind> = chart.lines.iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        vec![
            LayerKind::Measured,
            LayerKind::ReferenceMax,
            LayerKind::ReferenceMin,
            LayerKind::Reference,
            LayerKind::StdevUpper,
            LayerKind::StdevLower,
        ]
    );

    let labels: Vec<String> = chart.legend_entries().into_iter().map(|e| e.label).collect();
    assert!(labels.contains(&"Measured Temperature".to_string()));
    assert!(labels.contains(&"Standard Deviation".to_string()));
    assert_eq!(
        labels.iter().filter(|l| l.as_str() == "Standard Deviation").count(),
        1
    );
    assert_eq!(chart.colormap.range(), (1.0, 24.0));
}

#[test]
#[ignore = "needs a system TTF font; run with --ignored"]
fn test_render_png_and_svg() {
    assert!(
        fonts::locate_font(None).is_some(),
        "no system font found in the known font directories"
    );

    let props = PropertyReader::from_assignments(["plot.width=900", "plot.height=300"]);
    let config = ChartConfig::from_properties(&props);
    let series = sparse_series().with_reference_max(25.0).with_reference_min(10.0);
    let chart = temperature_plot(&series, &config).unwrap();

    let png = chart.to_png_bytes().unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let svg = chart.to_svg_string().unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Hour"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.svg");
    chart.save(&path).unwrap();
    assert!(path.exists());
}
