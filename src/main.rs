//! Geoweather command line
//!
//! Subcommands:
//! - `plot`: render the hourly temperature chart from a samples CSV
//! - `polygons`: export geohash bounding boxes to GeoJSON plus a magnitude CSV

use anyhow::{anyhow, bail, Context, Result};
use std::path::PathBuf;

use geoweather::chart::{temperature_plot, SampleColumns, TemperatureSeries};
use geoweather::config::ChartConfig;
use geoweather::polygons::{self, ExportOptions};
use geoweather::properties::PropertyReader;
use geoweather::table;

const USAGE: &str = "\
Usage:
  geoweather plot --input <samples.csv> --output <chart.png|chart.svg> [options]
      --svg                   write SVG whatever the output extension
      --hour-col <name>       hour column (default Hour)
      --value-col <name>      temperature column (default Temperature)
      --count-col <name>      distinct id count column (default DistinctIds)
      --stdev-col <name>      standard deviation column
      --reference <file.csv>  reference temperatures, one row per hour
      --reference-col <name>  column in the reference file (default Temperature)
      --reference-max <f64>   daily maximum reference temperature
      --reference-min <f64>   daily minimum reference temperature
      --set <key=value>       chart property, repeatable
  geoweather polygons --input <boxes.csv> --magnitude <column> --json <out.geojson> --csv <out.csv> [--open-ring]";

#[derive(Debug, Default)]
struct PlotArgs {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    svg: bool,
    columns: SampleColumns,
    reference: Option<PathBuf>,
    reference_col: Option<String>,
    reference_max: Option<f64>,
    reference_min: Option<f64>,
    properties: Vec<String>,
}

#[derive(Debug, Default)]
struct PolygonArgs {
    input: Option<PathBuf>,
    magnitude: Option<String>,
    json: Option<PathBuf>,
    csv: Option<PathBuf>,
    open_ring: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let result = match args.get(1).map(String::as_str) {
        Some("plot") => parse_plot_args(&args[2..]).and_then(run_plot),
        Some("polygons") => parse_polygon_args(&args[2..]).and_then(run_polygons),
        Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            Ok(())
        }
        _ => Err(anyhow!("missing or unknown subcommand\n\n{}", USAGE)),
    };

    if let Err(e) = result {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

/// Value following a flag
fn flag_value<'a>(args: &'a [String], i: usize) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{} requires a value", args[i]))
}

fn parse_f64(flag: &str, value: &str) -> Result<f64> {
    value
        .parse()
        .with_context(|| format!("{} expects a number, got '{}'", flag, value))
}

fn parse_plot_args(args: &[String]) -> Result<PlotArgs> {
    let mut parsed = PlotArgs::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--svg" => {
                parsed.svg = true;
                i += 1;
                continue;
            }
            "--input" => parsed.input = Some(flag_value(args, i)?.into()),
            "--output" => parsed.output = Some(flag_value(args, i)?.into()),
            "--hour-col" => parsed.columns.hour = flag_value(args, i)?.to_string(),
            "--value-col" => parsed.columns.value = flag_value(args, i)?.to_string(),
            "--count-col" => parsed.columns.count = flag_value(args, i)?.to_string(),
            "--stdev-col" => parsed.columns.stdev = Some(flag_value(args, i)?.to_string()),
            "--reference" => parsed.reference = Some(flag_value(args, i)?.into()),
            "--reference-col" => parsed.reference_col = Some(flag_value(args, i)?.to_string()),
            "--reference-max" => {
                parsed.reference_max = Some(parse_f64(&args[i], flag_value(args, i)?)?)
            }
            "--reference-min" => {
                parsed.reference_min = Some(parse_f64(&args[i], flag_value(args, i)?)?)
            }
            "--set" => parsed.properties.push(flag_value(args, i)?.to_string()),
            other => bail!("unknown option '{}'\n\n{}", other, USAGE),
        }
        i += 2;
    }
    Ok(parsed)
}

fn parse_polygon_args(args: &[String]) -> Result<PolygonArgs> {
    let mut parsed = PolygonArgs::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--open-ring" => {
                parsed.open_ring = true;
                i += 1;
                continue;
            }
            "--input" => parsed.input = Some(flag_value(args, i)?.into()),
            "--magnitude" => parsed.magnitude = Some(flag_value(args, i)?.to_string()),
            "--json" => parsed.json = Some(flag_value(args, i)?.into()),
            "--csv" => parsed.csv = Some(flag_value(args, i)?.into()),
            other => bail!("unknown option '{}'\n\n{}", other, USAGE),
        }
        i += 2;
    }
    Ok(parsed)
}

fn run_plot(args: PlotArgs) -> Result<()> {
    let input = args.input.context("--input is required")?;
    let output = args.output.context("--output is required")?;

    let props = PropertyReader::from_assignments(args.properties.iter().map(String::as_str));
    let config = ChartConfig::from_properties(&props);

    println!("Reading samples from {}", input.display());
    let samples = table::read_csv(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let mut series = TemperatureSeries::from_dataframe(&samples, &args.columns)?;

    if let Some(reference) = &args.reference {
        let df = table::read_csv(reference)
            .with_context(|| format!("failed to read {}", reference.display()))?;
        let column = args.reference_col.as_deref().unwrap_or("Temperature");
        series = series.with_reference_values(table::column_f64(&df, column)?);
    }
    if let Some(max) = args.reference_max {
        series = series.with_reference_max(max);
    }
    if let Some(min) = args.reference_min {
        series = series.with_reference_min(min);
    }

    let chart = temperature_plot(&series, &config)?;
    println!(
        "Built chart: {} line layers, {} scatter points, palette {}",
        chart.lines.len(),
        chart.scatter.points.len(),
        chart.colormap.palette_name()
    );

    if args.svg {
        chart.render_svg(&output)?;
    } else {
        chart.save(&output)?;
    }
    println!("✓ Wrote {}", output.display());
    Ok(())
}

fn run_polygons(args: PolygonArgs) -> Result<()> {
    let df = match &args.input {
        Some(input) => {
            println!("Reading bounding boxes from {}", input.display());
            Some(
                polygons::read_bounding_boxes(input)
                    .with_context(|| format!("failed to read {}", input.display()))?,
            )
        }
        None => None,
    };

    let options = ExportOptions {
        close_ring: !args.open_ring,
    };
    polygons::geohash_to_polygon(
        df.as_ref(),
        args.magnitude.as_deref(),
        args.json.as_deref(),
        args.csv.as_deref(),
        &options,
    )?;

    if let (Some(json), Some(csv)) = (&args.json, &args.csv) {
        println!("✓ Wrote {} and {}", json.display(), csv.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_plot_args() {
        let args = strings(&[
            "--input",
            "s.csv",
            "--output",
            "c.png",
            "--svg",
            "--reference-max",
            "30",
            "--set",
            "palette=Viridis",
        ]);
        let parsed = parse_plot_args(&args).unwrap();
        assert_eq!(parsed.input, Some(PathBuf::from("s.csv")));
        assert!(parsed.svg);
        assert_eq!(parsed.reference_max, Some(30.0));
        assert_eq!(parsed.properties, vec!["palette=Viridis".to_string()]);
        assert_eq!(parsed.columns.hour, "Hour");
    }

    #[test]
    fn test_parse_plot_args_errors() {
        assert!(parse_plot_args(&strings(&["--input"])).is_err());
        assert!(parse_plot_args(&strings(&["--reference-min", "cold"])).is_err());
        assert!(parse_plot_args(&strings(&["--bogus", "1"])).is_err());
    }

    #[test]
    fn test_parse_polygon_args() {
        let args = strings(&["--open-ring", "--magnitude", "Temperature", "--csv", "o.csv"]);
        let parsed = parse_polygon_args(&args).unwrap();
        assert!(parsed.open_ring);
        assert_eq!(parsed.magnitude.as_deref(), Some("Temperature"));
        assert_eq!(parsed.json, None);
    }
}
