//! Tracker configuration: declared metrics and step tracking

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Direction;
use crate::{Error, Result};

/// A tracked metric: its name and which direction is better.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSpec {
    name: String,
    direction: Direction,
}

impl MetricSpec {
    /// Create a metric spec.
    #[must_use]
    pub fn new(name: impl Into<String>, direction: impl Into<Direction>) -> Self {
        Self {
            name: name.into(),
            direction: direction.into(),
        }
    }

    /// Get the metric name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the comparison direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

const fn default_track_step() -> bool {
    true
}

/// Ordered metric declarations plus the step-tracking flag.
///
/// Declaration order is the order in which [`update`] expects values.
///
/// [`update`]: crate::BestValueTracker::update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    metrics: Vec<MetricSpec>,
    #[serde(default = "default_track_step")]
    track_step: bool,
}

impl TrackerConfig {
    /// Create a config from `(name, direction)` pairs with step tracking on.
    ///
    /// Directions may be given as [`Direction`] or as `bool`
    /// (`true` = larger is better).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if no metrics are given, a name is
    /// blank, or a name appears twice.
    pub fn new<I, N, D>(metrics: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<Direction>,
    {
        let metrics = metrics
            .into_iter()
            .map(|(name, direction)| MetricSpec::new(name, direction))
            .collect();
        let config = Self {
            metrics,
            track_step: true,
        };
        config.validate()?;
        Ok(config)
    }

    /// Start building a config metric by metric.
    #[must_use]
    pub fn builder() -> TrackerConfigBuilder {
        TrackerConfigBuilder::default()
    }

    /// Parse a config from JSON.
    ///
    /// Accepts either a flat object of `name -> bool` (`true` = larger is
    /// better), or `{"metrics": {...}, "track_step": bool}` with no other
    /// keys. Directions may also be spelled `"higher_is_better"` /
    /// `"lower_is_better"`. Key order in the document is the declaration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use best_tracker::TrackerConfig;
    ///
    /// let config = TrackerConfig::from_json(r#"{"val_loss": false, "val_auroc": true}"#)?;
    /// assert_eq!(config.metric_names().collect::<Vec<_>>(), ["val_loss", "val_auroc"]);
    /// assert!(config.track_step());
    /// # Ok::<(), best_tracker::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] for invalid JSON and
    /// [`Error::Configuration`] for a malformed or empty metric mapping.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(mut root) = value else {
            return Err(Error::Configuration(
                "expected a JSON object mapping metric names to directions".to_string(),
            ));
        };

        let mut track_step = true;
        let wrapped = matches!(root.get("metrics"), Some(Value::Object(_)));
        let metrics = if wrapped {
            if let Some(key) = root
                .keys()
                .find(|key| !matches!(key.as_str(), "metrics" | "track_step"))
            {
                return Err(Error::Configuration(format!(
                    "unexpected key '{key}' next to \"metrics\" (only \"track_step\" is allowed)"
                )));
            }
            if let Some(flag) = root.get("track_step") {
                track_step = flag.as_bool().ok_or_else(|| {
                    Error::Configuration(format!("track_step must be a bool, got {flag}"))
                })?;
            }
            match root.get_mut("metrics") {
                Some(Value::Object(metrics)) => std::mem::take(metrics),
                _ => serde_json::Map::new(),
            }
        } else {
            root
        };

        let metrics = metrics
            .into_iter()
            .map(|(name, flag)| parse_direction(&name, flag).map(|d| MetricSpec::new(name, d)))
            .collect::<Result<Vec<_>>>()?;

        let config = Self {
            metrics,
            track_step,
        };
        config.validate()?;
        Ok(config)
    }

    /// Return a copy with step tracking switched on or off.
    #[must_use]
    pub const fn with_track_step(mut self, track_step: bool) -> Self {
        self.track_step = track_step;
        self
    }

    /// Declared metrics, in order.
    #[must_use]
    pub fn metrics(&self) -> &[MetricSpec] {
        &self.metrics
    }

    /// Declared metric names, in order.
    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(MetricSpec::name)
    }

    /// Number of declared metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Always `false` for a validated config.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Whether best steps are recorded.
    #[must_use]
    pub const fn track_step(&self) -> bool {
        self.track_step
    }

    /// Check the shape constraints. Deserialized configs bypass the
    /// constructors, so the tracker calls this again on construction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.metrics.is_empty() {
            return Err(Error::Configuration(
                "at least one metric must be declared".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.metrics.len());
        for spec in &self.metrics {
            if spec.name.trim().is_empty() {
                return Err(Error::Configuration(
                    "metric names must not be blank".to_string(),
                ));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(Error::Configuration(format!(
                    "metric '{}' declared more than once",
                    spec.name
                )));
            }
        }
        Ok(())
    }
}

fn parse_direction(name: &str, flag: Value) -> Result<Direction> {
    match flag {
        Value::Bool(larger_is_better) => Ok(larger_is_better.into()),
        Value::String(_) => serde_json::from_value(flag).map_err(|_| {
            Error::Configuration(format!(
                "metric '{name}': direction must be \"higher_is_better\" or \"lower_is_better\""
            ))
        }),
        other => Err(Error::Configuration(format!(
            "metric '{name}': expected a bool (true = larger is better), got {other}"
        ))),
    }
}

/// Builder for [`TrackerConfig`].
#[derive(Debug)]
pub struct TrackerConfigBuilder {
    metrics: Vec<MetricSpec>,
    track_step: bool,
}

impl Default for TrackerConfigBuilder {
    fn default() -> Self {
        Self {
            metrics: Vec::new(),
            track_step: true,
        }
    }
}

impl TrackerConfigBuilder {
    /// Declare a metric.
    #[must_use]
    pub fn metric(mut self, name: impl Into<String>, direction: impl Into<Direction>) -> Self {
        self.metrics.push(MetricSpec::new(name, direction));
        self
    }

    /// Declare a metric where larger is better.
    #[must_use]
    pub fn higher_is_better(self, name: impl Into<String>) -> Self {
        self.metric(name, Direction::HigherIsBetter)
    }

    /// Declare a metric where smaller is better.
    #[must_use]
    pub fn lower_is_better(self, name: impl Into<String>) -> Self {
        self.metric(name, Direction::LowerIsBetter)
    }

    /// Record best steps (default `true`).
    #[must_use]
    pub const fn track_step(mut self, track_step: bool) -> Self {
        self.track_step = track_step;
        self
    }

    /// Build the config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the declared metrics are invalid.
    pub fn build(self) -> Result<TrackerConfig> {
        let config = TrackerConfig {
            metrics: self.metrics,
            track_step: self.track_step,
        };
        config.validate()?;
        Ok(config)
    }
}
