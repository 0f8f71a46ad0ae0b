//! Chart property definitions with defaults from chart_properties.json
//!
//! The property file is embedded at compile time so defaults are defined in
//! ONE place. `PropertyReader` layers user-supplied `key=value` overrides on
//! top of the registry and falls back to the default when a value is invalid.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// chart_properties.json embedded at compile time
const CHART_PROPERTIES_JSON: &str = include_str!("../chart_properties.json");

/// Property definition from chart_properties.json
#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    pub default_value: String,
    pub description: String,
    /// For EnumeratedProperty, the valid values
    pub valid_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    String,
    Enumerated,
    Boolean,
    Numeric,
}

impl PropertyKind {
    fn parse(kind: &str) -> Option<Self> {
        match kind {
            "StringProperty" => Some(Self::String),
            "EnumeratedProperty" => Some(Self::Enumerated),
            "BooleanProperty" => Some(Self::Boolean),
            "NumericProperty" => Some(Self::Numeric),
            _ => None,
        }
    }
}

/// Registry of all chart properties with their defaults
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
    /// Declaration order, for listing
    names: Vec<String>,
}

impl PropertyRegistry {
    /// Parse a property document of the chart_properties.json shape
    pub fn from_json(json: &str) -> Result<Self, String> {
        let doc: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse chart properties JSON: {}", e))?;

        let entries = doc["properties"]
            .as_array()
            .ok_or_else(|| "chart properties JSON missing 'properties' array".to_string())?;

        let mut registry = Self::default();

        for prop in entries {
            let name = prop["name"]
                .as_str()
                .ok_or_else(|| "property missing 'name'".to_string())?
                .to_string();

            let kind_str = prop["kind"].as_str().unwrap_or("");
            let kind = PropertyKind::parse(kind_str)
                .ok_or_else(|| format!("Unknown property kind '{}' for '{}'", kind_str, name))?;

            let valid_values = if kind == PropertyKind::Enumerated {
                prop["values"].as_array().map(|arr| {
                    arr.iter()
                        .filter_map(|v| v.as_str().map(|s| s.to_string()))
                        .collect()
                })
            } else {
                None
            };

            registry.names.push(name.clone());
            registry.properties.insert(
                name.clone(),
                PropertyDef {
                    name,
                    kind,
                    default_value: prop["defaultValue"].as_str().unwrap_or("").to_string(),
                    description: prop["description"].as_str().unwrap_or("").to_string(),
                    valid_values,
                },
            );
        }

        log::debug!("Loaded {} chart properties", registry.names.len());
        Ok(registry)
    }

    /// Get the default value for a property
    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    /// Get the property definition
    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// Property names in declaration order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Check if a value is valid for an enumerated property
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true)
    }
}

static REGISTRY: Lazy<PropertyRegistry> = Lazy::new(|| {
    PropertyRegistry::from_json(CHART_PROPERTIES_JSON).unwrap_or_else(|e| {
        log::error!("Failed to load chart_properties.json: {}", e);
        PropertyRegistry::default()
    })
});

/// Get the global property registry
pub fn registry() -> &'static PropertyRegistry {
    &REGISTRY
}

/// Typed property reader over user overrides and registry defaults
#[derive(Debug, Clone, Default)]
pub struct PropertyReader {
    user_values: HashMap<String, String>,
}

impl PropertyReader {
    /// Create from user overrides. Empty values count as "not set".
    pub fn new<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let user_values = overrides
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, v)| {
                if registry().get_property(k).is_none() {
                    log::warn!("Ignoring unknown chart property '{}'", k);
                    return false;
                }
                !v.is_empty()
            })
            .collect();

        Self { user_values }
    }

    /// Parse `key=value` pairs, e.g. from the command line
    pub fn from_assignments<'a>(assignments: impl IntoIterator<Item = &'a str>) -> Self {
        let pairs = assignments.into_iter().filter_map(|a| match a.split_once('=') {
            Some((k, v)) => Some((k.trim().to_string(), v.to_string())),
            None => {
                log::warn!("Ignoring malformed property assignment '{}'", a);
                None
            }
        });
        Self::new(pairs)
    }

    /// Get string property (user value or registry default)
    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }
        registry().get_default(name).unwrap_or("").to_string()
    }

    /// Get optional string property (None if empty)
    pub fn get_optional_string(&self, name: &str) -> Option<String> {
        let value = self.get_string(name);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Get enumerated property with validation
    ///
    /// Returns the canonical spelling from the registry so lookups stay
    /// case-insensitive for the user.
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            let canonical = reg
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .and_then(|values| values.iter().find(|v| v.eq_ignore_ascii_case(value)));
            match canonical {
                Some(v) => return v.clone(),
                None if reg.is_valid_enum_value(name, value) => return value.clone(),
                None => {
                    let valid_values = reg
                        .get_property(name)
                        .and_then(|p| p.valid_values.as_ref())
                        .map(|v| v.join(", "))
                        .unwrap_or_default();
                    log::warn!(
                        "Invalid value '{}' for property '{}'. Valid values: [{}]. Using default: '{}'",
                        value,
                        name,
                        valid_values,
                        default
                    );
                }
            }
        }

        default.to_string()
    }

    /// Get boolean property ("true"/"false")
    pub fn get_bool(&self, name: &str) -> bool {
        let default = registry().get_default(name) == Some("true");
        match self.user_values.get(name).map(|v| v.to_ascii_lowercase()) {
            Some(v) if v == "true" => true,
            Some(v) if v == "false" => false,
            Some(other) => {
                log::warn!(
                    "Invalid boolean value '{}' for property '{}'. Using default: {}",
                    other,
                    name,
                    default
                );
                default
            }
            None => default,
        }
    }

    /// Get f64 property, falling back to the default on parse failure
    pub fn get_f64(&self, name: &str) -> f64 {
        let default = registry()
            .get_default(name)
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(0.0);

        let value = self.get_string(name);
        if value.is_empty() {
            return default;
        }

        match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                log::warn!(
                    "Invalid numeric value '{}' for property '{}'. Using default: {}",
                    value,
                    name,
                    default
                );
                default
            }
        }
    }

    /// Get f64 property with range validation
    pub fn get_f64_in_range(&self, name: &str, min: f64, max: f64) -> f64 {
        let value = self.get_f64(name);
        if (min..=max).contains(&value) {
            return value;
        }

        let default = registry()
            .get_default(name)
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(min);
        log::warn!(
            "Value {} for property '{}' out of range [{}, {}]. Using default: {}",
            value,
            name,
            min,
            max,
            default
        );
        default
    }

    /// Parse a "a,b" pair into (f64, f64)
    ///
    /// Falls back to the registry default when the user value is malformed.
    pub fn get_pair(&self, name: &str) -> Option<(f64, f64)> {
        let value = self.get_string(name);
        match parse_pair(&value) {
            Some(pair) => Some(pair),
            None => {
                if !value.is_empty() {
                    log::warn!(
                        "Invalid pair '{}' for property '{}', expected 'a,b'. Using default",
                        value,
                        name
                    );
                }
                registry().get_default(name).and_then(parse_pair)
            }
        }
    }
}

fn parse_pair(value: &str) -> Option<(f64, f64)> {
    let (a, b) = value.split_once(',')?;
    let a = a.trim().parse::<f64>().ok()?;
    let b = b.trim().parse::<f64>().ok()?;
    if a.is_finite() && b.is_finite() {
        Some((a, b))
    } else {
        None
    }
}
