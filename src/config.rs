//! Chart configuration from chart properties
//!
//! Defaults come from chart_properties.json via `PropertyReader`, so
//! `ChartConfig::default()` and `ChartConfig::from_properties` with no
//! overrides always agree.

use std::path::PathBuf;

use crate::chart::units::TemperatureUnit;
use crate::properties::PropertyReader;

/// Text labels shown on the chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLabels {
    /// Measured series legend entry
    pub plot: String,
    /// Reference comparison series legend entry
    pub compare: String,
    /// Density scatter legend entry and colorbar title
    pub colormap: String,
    /// Reference maximum legend entry
    pub max: String,
    /// Reference minimum legend entry
    pub min: String,
    /// Upper uncertainty band legend entry (the lower band is unlabeled)
    pub stdev: String,
    pub x_axis: String,
    /// Left axis title when Celsius is on the left
    pub y_axis_left: String,
    /// Right axis title when Fahrenheit is on the right
    pub y_axis_right: String,
    /// Empty string means no title
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub labels: ChartLabels,

    /// false: Celsius left, Fahrenheit right. true: Fahrenheit left, Celsius right
    pub switch_y: bool,

    /// X-axis range, ticks every 1 unit
    pub x_limits: (f64, f64),

    /// Sequential palette name for the density scatter
    pub palette: String,

    /// Scatter marker radius in pixels
    pub point_size: f64,

    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Font file for chart text (None = search system font directories)
    pub font_path: Option<PathBuf>,
}

impl ChartConfig {
    /// Create config from property overrides
    pub fn from_properties(props: &PropertyReader) -> Self {
        let labels = ChartLabels {
            plot: props.get_string("label.plot"),
            compare: props.get_string("label.compare"),
            colormap: props.get_string("label.colormap"),
            max: props.get_string("label.max"),
            min: props.get_string("label.min"),
            stdev: props.get_string("label.stdev"),
            x_axis: props.get_string("axis.x.label"),
            y_axis_left: props.get_string("axis.y.label.left"),
            y_axis_right: props.get_string("axis.y.label.right"),
            title: props.get_string("plot.title"),
        };

        let x_limits = props.get_pair("axis.x.limits").unwrap_or((0.0, 23.0));
        let x_limits = if x_limits.0 < x_limits.1 {
            x_limits
        } else {
            log::warn!(
                "X-axis limits {:?} are not increasing, using (0, 23)",
                x_limits
            );
            (0.0, 23.0)
        };

        Self {
            labels,
            switch_y: props.get_bool("axis.y.switch"),
            x_limits,
            palette: props.get_enum("palette"),
            point_size: props.get_f64_in_range("point.size", 1.0, 100.0),
            width: props.get_f64_in_range("plot.width", 200.0, 20000.0) as u32,
            height: props.get_f64_in_range("plot.height", 100.0, 10000.0) as u32,
            font_path: props.get_optional_string("font.path").map(PathBuf::from),
        }
    }

    /// Unit presented on the left axis
    pub fn left_unit(&self) -> TemperatureUnit {
        if self.switch_y {
            TemperatureUnit::Fahrenheit
        } else {
            TemperatureUnit::Celsius
        }
    }

    /// (left, right) Y-axis titles after unit switching
    pub fn y_axis_titles(&self) -> (&str, &str) {
        if self.switch_y {
            (&self.labels.y_axis_right, &self.labels.y_axis_left)
        } else {
            (&self.labels.y_axis_left, &self.labels.y_axis_right)
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::from_properties(&PropertyReader::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChartConfig::default();
        assert_eq!(config.labels.plot, "Measured Temperature");
        assert_eq!(config.labels.colormap, "# of Distinct Hardware IDs");
        assert_eq!(config.labels.title, "");
        assert!(!config.switch_y);
        assert_eq!(config.x_limits, (0.0, 23.0));
        assert_eq!(config.palette, "Plasma");
        assert_eq!((config.width, config.height), (3000, 500));
        assert_eq!(config.font_path, None);
    }

    #[test]
    fn test_switch_y_swaps_titles_and_units() {
        let config = ChartConfig::default();
        assert_eq!(config.left_unit(), TemperatureUnit::Celsius);
        assert_eq!(
            config.y_axis_titles(),
            ("Temperature (°C)", "Temperature (°F)")
        );

        let props = PropertyReader::from_assignments(["axis.y.switch=true"]);
        let switched = ChartConfig::from_properties(&props);
        assert_eq!(switched.left_unit(), TemperatureUnit::Fahrenheit);
        assert_eq!(
            switched.y_axis_titles(),
            ("Temperature (°F)", "Temperature (°C)")
        );
    }

    #[test]
    fn test_decreasing_x_limits_rejected() {
        let props = PropertyReader::from_assignments(["axis.x.limits=23,0"]);
        let config = ChartConfig::from_properties(&props);
        assert_eq!(config.x_limits, (0.0, 23.0));
    }
}
