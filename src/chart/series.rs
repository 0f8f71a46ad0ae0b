//! Hour-of-day sample input and densification
//!
//! Callers hand over sparse hourly samples in whatever array-like shape they
//! have. `densify` turns them into 24 hour-indexed slots where a missing hour
//! holds NaN ("no data"), never zero.

use polars::prelude::*;

use super::error::{ChartError, Result};
use crate::table;

/// Number of slots after densification
pub const HOURS_PER_DAY: usize = 24;

/// An array-like chart parameter
///
/// Only `List` and `Array` are accepted by `temperature_plot`; `Other`
/// carries the description of whatever else the caller passed (e.g. a JSON
/// object) so validation can name the offending parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayLike {
    /// List of nullable numbers
    List(Vec<Option<f64>>),
    /// Dense numeric array, NaN means no data
    Array(Vec<f64>),
    /// Anything that is neither a list nor a numeric array
    Other(String),
}

impl ArrayLike {
    /// Nullable values, or None for `Other`
    pub fn to_options(&self) -> Option<Vec<Option<f64>>> {
        match self {
            Self::List(values) => Some(values.clone()),
            Self::Array(values) => Some(
                values
                    .iter()
                    .map(|v| if v.is_nan() { None } else { Some(*v) })
                    .collect(),
            ),
            Self::Other(_) => None,
        }
    }

    /// Validate as the named parameter
    fn validated(&self, name: &'static str) -> Result<Vec<Option<f64>>> {
        self.to_options().ok_or_else(|| {
            if let Self::Other(kind) = self {
                log::debug!("Rejecting {} given as {}", name, kind);
            }
            ChartError::InvalidParameter { name }
        })
    }
}

impl From<Vec<f64>> for ArrayLike {
    fn from(values: Vec<f64>) -> Self {
        Self::Array(values)
    }
}

impl From<&[f64]> for ArrayLike {
    fn from(values: &[f64]) -> Self {
        Self::Array(values.to_vec())
    }
}

impl From<Vec<Option<f64>>> for ArrayLike {
    fn from(values: Vec<Option<f64>>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<i64>> for ArrayLike {
    fn from(values: Vec<i64>) -> Self {
        Self::List(values.into_iter().map(|v| Some(v as f64)).collect())
    }
}

impl From<serde_json::Value> for ArrayLike {
    /// JSON arrays of numbers and nulls are lists; every other JSON value is
    /// rejected later by validation
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in &items {
                    match item {
                        Value::Null => values.push(None),
                        Value::Number(n) => values.push(n.as_f64()),
                        _ => return Self::Other("array with non-numeric items".to_string()),
                    }
                }
                Self::List(values)
            }
            Value::Object(_) => Self::Other("object".to_string()),
            Value::String(_) => Self::Other("string".to_string()),
            Value::Number(_) => Self::Other("number".to_string()),
            Value::Bool(_) => Self::Other("boolean".to_string()),
            Value::Null => Self::Other("null".to_string()),
        }
    }
}

/// Raw chart input as supplied by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSeries {
    /// Hours of day (subset of 0..=23, any order)
    pub hours: ArrayLike,
    /// Measured temperature per hour
    pub values: ArrayLike,
    /// Density (e.g. distinct hardware ids) per hour
    pub counts: ArrayLike,
    /// Standard deviation per hour
    pub stdev: Option<ArrayLike>,
    /// Reference comparison series, index i is hour i
    pub reference_values: Option<ArrayLike>,
    pub reference_max: Option<f64>,
    pub reference_min: Option<f64>,
}

impl TemperatureSeries {
    pub fn new(
        hours: impl Into<ArrayLike>,
        values: impl Into<ArrayLike>,
        counts: impl Into<ArrayLike>,
    ) -> Self {
        Self {
            hours: hours.into(),
            values: values.into(),
            counts: counts.into(),
            stdev: None,
            reference_values: None,
            reference_max: None,
            reference_min: None,
        }
    }

    pub fn with_stdev(mut self, stdev: impl Into<ArrayLike>) -> Self {
        self.stdev = Some(stdev.into());
        self
    }

    pub fn with_reference_values(mut self, values: impl Into<ArrayLike>) -> Self {
        self.reference_values = Some(values.into());
        self
    }

    pub fn with_reference_max(mut self, max: f64) -> Self {
        self.reference_max = Some(max);
        self
    }

    pub fn with_reference_min(mut self, min: f64) -> Self {
        self.reference_min = Some(min);
        self
    }

    /// Read hour/value/count(/stdev) columns from a table
    ///
    /// Nulls become "no data"; integer columns are cast to f64.
    pub fn from_dataframe(df: &DataFrame, columns: &SampleColumns) -> Result<Self> {
        let mut series = Self::new(
            table::column_f64(df, &columns.hour)?,
            table::column_f64(df, &columns.value)?,
            table::column_f64(df, &columns.count)?,
        );
        if let Some(stdev) = &columns.stdev {
            series = series.with_stdev(table::column_f64(df, stdev)?);
        }
        Ok(series)
    }

    /// Validate every array-like parameter and densify to 24 hours
    pub fn normalize(&self) -> Result<NormalizedSeries> {
        let hours = self.hours.validated("hours")?;
        let values = self.values.validated("values")?;
        let stdev = self
            .stdev
            .as_ref()
            .map(|s| s.validated("stdev"))
            .transpose()?;
        let counts = self.counts.validated("counts")?;
        let reference = self
            .reference_values
            .as_ref()
            .map(|r| r.validated("reference_values"))
            .transpose()?;

        let hourly = densify(&hours, &values, &counts, stdev.as_deref())?;
        let reference = reference.map(|r| r.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect());

        Ok(NormalizedSeries {
            hourly,
            reference,
            reference_bounds: match (self.reference_max, self.reference_min) {
                (Some(max), Some(min)) => Some((max, min)),
                _ => None,
            },
        })
    }
}

/// Column names used by `TemperatureSeries::from_dataframe`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleColumns {
    pub hour: String,
    pub value: String,
    pub count: String,
    pub stdev: Option<String>,
}

impl Default for SampleColumns {
    fn default() -> Self {
        Self {
            hour: "Hour".to_string(),
            value: "Temperature".to_string(),
            count: "DistinctIds".to_string(),
            stdev: None,
        }
    }
}

/// Dense 24-slot series, index i is hour i
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    pub hours: Vec<f64>,
    pub values: Vec<f64>,
    pub counts: Vec<f64>,
    pub stdev: Option<Vec<f64>>,
}

/// Validated chart input
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    pub hourly: HourlySeries,
    /// Reference comparison series (not densified)
    pub reference: Option<Vec<f64>>,
    /// (max, min), present only when both were given
    pub reference_bounds: Option<(f64, f64)>,
}

/// Fill 24 hour slots by lookup
///
/// `values`, `counts` and `stdev` are parallel to `hours`. Slots without a
/// sample hold NaN.
pub fn densify(
    hours: &[Option<f64>],
    values: &[Option<f64>],
    counts: &[Option<f64>],
    stdev: Option<&[Option<f64>]>,
) -> Result<HourlySeries> {
    check_length("values", hours.len(), values.len())?;
    check_length("counts", hours.len(), counts.len())?;
    if let Some(stdev) = stdev {
        check_length("stdev", hours.len(), stdev.len())?;
    }

    let mut slots: [Option<usize>; HOURS_PER_DAY] = [None; HOURS_PER_DAY];
    for (position, hour) in hours.iter().enumerate() {
        let slot = hour_slot(*hour)?;
        if slots[slot].replace(position).is_some() {
            log::warn!("Hour {} given more than once, keeping the last sample", slot);
        }
    }

    let pick = |column: &[Option<f64>], slot: &Option<usize>| -> f64 {
        slot.and_then(|position| column[position])
            .unwrap_or(f64::NAN)
    };

    let filled = slots.iter().filter(|s| s.is_some()).count();
    if filled < HOURS_PER_DAY {
        log::debug!(
            "Densified {} sampled hours, {} filled with no data",
            filled,
            HOURS_PER_DAY - filled
        );
    }

    Ok(HourlySeries {
        hours: (0..HOURS_PER_DAY).map(|h| h as f64).collect(),
        values: slots.iter().map(|s| pick(values, s)).collect(),
        counts: slots.iter().map(|s| pick(counts, s)).collect(),
        stdev: stdev.map(|stdev| slots.iter().map(|s| pick(stdev, s)).collect()),
    })
}

fn check_length(name: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(ChartError::LengthMismatch {
            name,
            expected,
            actual,
        })
    }
}

fn hour_slot(hour: Option<f64>) -> Result<usize> {
    match hour {
        Some(h) if h.fract() == 0.0 && (0.0..HOURS_PER_DAY as f64).contains(&h) => Ok(h as usize),
        Some(h) => Err(ChartError::HourOutOfRange { hour: h }),
        None => Err(ChartError::HourOutOfRange { hour: f64::NAN }),
    }
}
