//! GeoJSON documents written by the polygon exporter
//!
//! Field order follows the emitted JSON: `type`, `properties`, `id`,
//! `geometry`.

use serde::{Deserialize, Serialize};

/// A (longitude, latitude) pair
pub type Position = [f64; 2];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Feature {
    pub properties: FeatureProperties,
    pub id: usize,
    pub geometry: Geometry,
}

/// The magnitude is always stored under `Temperature`, whatever the source
/// column is called
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(rename = "Temperature")]
    pub temperature: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// Rings of positions; the exporter writes a single ring
    Polygon(Vec<Vec<Position>>),
}

impl Geometry {
    /// The outer ring
    pub fn exterior(&self) -> &[Position] {
        match self {
            Self::Polygon(rings) => rings.first().map(Vec::as_slice).unwrap_or(&[]),
        }
    }
}
