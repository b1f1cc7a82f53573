//! Named configuration for dimension annotations.
//!
//! Defaults come from `constants::measure_settings`. A JSON asset with the same
//! field names can override any subset of them at runtime.

use bevy::prelude::*;
use constants::measure_settings::{
    ARROWHEAD_ANGLE_DEGREES, ARROWHEAD_SIZE, COARSE_SNAP_STEP, EXTENSION_OFFSET,
    EXTENSION_OVERSHOOT, FINE_SNAP_STEP, LABEL_CORNER_RADIUS, LABEL_FONT_SIZE, LABEL_OFFSET,
    LABEL_PADDING, MEASURE_OPTIONS_PATH,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected option values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("`{name}` must be a finite number greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("`{name}` must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f32 },
    #[error("`arrowhead_angle_degrees` must lie strictly between 0 and 180, got {0}")]
    ArrowheadAngle(f32),
}

/// Tunable sizes and snap steps for the measure tool.
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureOptions {
    pub extension_offset: f32,
    pub extension_overshoot: f32,
    pub arrowhead_size: f32,
    pub arrowhead_angle_degrees: f32,
    pub label_padding: f32,
    pub label_corner_radius: f32,
    pub label_font_size: f32,
    pub label_offset: f32,
    pub coarse_snap_step: f32,
    pub fine_snap_step: f32,
}

impl Default for MeasureOptions {
    fn default() -> Self {
        Self {
            extension_offset: EXTENSION_OFFSET,
            extension_overshoot: EXTENSION_OVERSHOOT,
            arrowhead_size: ARROWHEAD_SIZE,
            arrowhead_angle_degrees: ARROWHEAD_ANGLE_DEGREES,
            label_padding: LABEL_PADDING,
            label_corner_radius: LABEL_CORNER_RADIUS,
            label_font_size: LABEL_FONT_SIZE,
            label_offset: LABEL_OFFSET,
            coarse_snap_step: COARSE_SNAP_STEP,
            fine_snap_step: FINE_SNAP_STEP,
        }
    }
}

impl MeasureOptions {
    /// Check every field; the first offending one is reported.
    pub fn validate(&self) -> Result<(), OptionsError> {
        positive("arrowhead_size", self.arrowhead_size)?;
        positive("label_font_size", self.label_font_size)?;
        positive("coarse_snap_step", self.coarse_snap_step)?;
        positive("fine_snap_step", self.fine_snap_step)?;

        finite("extension_offset", self.extension_offset)?;
        finite("extension_overshoot", self.extension_overshoot)?;
        finite("label_padding", self.label_padding)?;
        finite("label_corner_radius", self.label_corner_radius)?;
        finite("label_offset", self.label_offset)?;

        let angle = self.arrowhead_angle_degrees;
        if !angle.is_finite() || angle <= 0.0 || angle >= 180.0 {
            return Err(OptionsError::ArrowheadAngle(angle));
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), OptionsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OptionsError::NotPositive { name, value })
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), OptionsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OptionsError::NotFinite { name, value })
    }
}

/// Handle of the options asset requested at startup.
#[derive(Resource, Default)]
pub struct MeasureOptionsLoader {
    handle: Option<Handle<MeasureOptions>>,
    applied: bool,
}

impl MeasureOptionsLoader {
    /// Wait for `handle` and apply it once it is available.
    pub fn new(handle: Handle<MeasureOptions>) -> Self {
        Self {
            handle: Some(handle),
            applied: false,
        }
    }

    /// Whether the requested asset has been seen, valid or not.
    pub fn is_applied(&self) -> bool {
        self.applied
    }
}

/// Request the options asset from the asset server.
pub fn start_options_loading(
    mut loader: ResMut<MeasureOptionsLoader>,
    asset_server: Res<AssetServer>,
) {
    *loader = MeasureOptionsLoader::new(asset_server.load(MEASURE_OPTIONS_PATH));
}

/// Copy loaded options into the tool once. Invalid files keep the defaults.
pub fn apply_loaded_options(
    mut loader: ResMut<MeasureOptionsLoader>,
    options_assets: Res<Assets<MeasureOptions>>,
    mut tool: ResMut<super::MeasureTool>,
) {
    if loader.applied {
        return;
    }
    let Some(options) = loader.handle.as_ref().and_then(|h| options_assets.get(h)) else {
        return;
    };

    match options.validate() {
        Ok(()) => {
            info!("Measure options loaded from {}", MEASURE_OPTIONS_PATH);
            tool.set_options(options.clone());
        }
        Err(err) => warn!("Ignoring {}: {}", MEASURE_OPTIONS_PATH, err),
    }
    loader.applied = true;
}
