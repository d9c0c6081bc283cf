//! Sensor factory, registry, and the custom-tag registration hook.

use std::collections::HashSet;
use std::f64::consts::TAU;

use gsim_core::{CoreError, Vec2};
use indexmap::IndexMap;

use crate::error::{SensorError, SensorResult};
use crate::kind::SensorKind;
use crate::sensor::{SenseContext, Sensor};

/// Owns every sensor instance and the registry of custom sensor tags.
#[derive(Default)]
pub struct SensorEngine {
    sensors: IndexMap<String, Sensor>,
    custom_tags: HashSet<String>,
}

impl SensorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new custom sensor tag. Duplicate
    /// names fail [`CoreError::AlreadyExists`].
    pub fn register_custom_tag(&mut self, tag: impl Into<String>) -> SensorResult<()> {
        let tag = tag.into();
        if !self.custom_tags.insert(tag.clone()) {
            return Err(SensorError::Core(CoreError::AlreadyExists(format!(
                "custom sensor tag {tag}"
            ))));
        }
        Ok(())
    }

    /// Construct and register a built-in sensor. `range`/`fov` are ignored
    /// (forced to `∞`/`2π`) for variants that don't use them.
    pub fn create_sensor(
        &mut self,
        sensor_id: impl Into<String>,
        kind: SensorKind,
        range: f64,
        fov: f64,
        orientation: Option<Vec2>,
    ) -> SensorResult<()> {
        let sensor_id = sensor_id.into();
        if self.sensors.contains_key(&sensor_id) {
            return Err(SensorError::Core(CoreError::AlreadyExists(format!(
                "sensor {sensor_id}"
            ))));
        }
        if let SensorKind::Custom(tag) = &kind {
            if !self.custom_tags.contains(tag) {
                return Err(SensorError::Core(CoreError::Invalid(format!(
                    "unregistered custom sensor tag {tag}"
                ))));
            }
        }

        let (range, fov) = normalize_params(&kind, range, fov);
        let mut sensor = Sensor::new(sensor_id.clone(), kind, range, fov);
        if let Some(o) = orientation {
            sensor.orientation = o;
        }
        self.sensors.insert(sensor_id, sensor);
        Ok(())
    }

    /// Construct and register a `Custom` sensor with a user-supplied sense
    /// function. The tag must already be registered via
    /// [`SensorEngine::register_custom_tag`].
    pub fn create_custom_sensor(
        &mut self,
        sensor_id: impl Into<String>,
        tag: impl Into<String>,
        sense_fn: Box<dyn FnMut(&SenseContext) -> crate::kind::SensorData>,
    ) -> SensorResult<()> {
        let sensor_id = sensor_id.into();
        let tag = tag.into();
        if self.sensors.contains_key(&sensor_id) {
            return Err(SensorError::Core(CoreError::AlreadyExists(format!(
                "sensor {sensor_id}"
            ))));
        }
        if !self.custom_tags.contains(&tag) {
            return Err(SensorError::Core(CoreError::Invalid(format!(
                "unregistered custom sensor tag {tag}"
            ))));
        }
        let sensor = Sensor::with_custom_sense(sensor_id.clone(), tag, sense_fn);
        self.sensors.insert(sensor_id, sensor);
        Ok(())
    }

    pub fn get_sensor(&self, sensor_id: &str) -> SensorResult<&Sensor> {
        self.sensors
            .get(sensor_id)
            .ok_or_else(|| SensorError::Core(CoreError::NotFound(format!("sensor {sensor_id}"))))
    }

    pub fn get_sensor_mut(&mut self, sensor_id: &str) -> SensorResult<&mut Sensor> {
        self.sensors
            .get_mut(sensor_id)
            .ok_or_else(|| SensorError::Core(CoreError::NotFound(format!("sensor {sensor_id}"))))
    }

    pub fn remove_sensor(&mut self, sensor_id: &str) -> SensorResult<()> {
        self.sensors
            .shift_remove(sensor_id)
            .map(|_| ())
            .ok_or_else(|| SensorError::Core(CoreError::NotFound(format!("sensor {sensor_id}"))))
    }
}

/// Force range/fov to their fixed values for variants that don't
/// take them as parameters.
fn normalize_params(kind: &SensorKind, range: f64, fov: f64) -> (f64, f64) {
    match kind {
        SensorKind::Neighbor => (0.0, 0.0),
        SensorKind::Map | SensorKind::Agent => (f64::INFINITY, TAU),
        SensorKind::Range | SensorKind::AgentRange => (range, TAU),
        SensorKind::Arc | SensorKind::AgentArc => (range, fov),
        SensorKind::Custom(_) => (range, fov),
    }
}
