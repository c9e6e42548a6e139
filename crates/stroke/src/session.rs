//! Stroke session orchestration
//!
//! Wires pointer events through stabilizer -> resampler -> dab emission.
//! One stroke session lives from pointer-down to its matching
//! pointer-up; every stateful pipeline component is reconstructed on
//! pointer-down so no state leaks across strokes.

use std::sync::Arc;

use glam::Vec2;
use impasto_config::EngineConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::brush::{BrushPreset, Dab};
use crate::curve::{ParametricCurve, PathError};
use crate::math::clamp01;
use crate::point::{RawPoint, Sample};
use crate::sampler::{MultiSnapSampler, RulerSampler, Sampler, SnapSampler, SplineSampler};
use crate::speed_alpha::SpeedAlpha;
use crate::stabilizer::Stabilizer;

/// Pointer device class, as reported by the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerType {
    Mouse,
    Pen,
    Touch,
}

/// One pointer event sample
#[derive(Debug, Clone, Copy)]
pub struct PointerInput {
    pub pointer_id: u64,
    pub pointer_type: PointerType,
    pub x: f32,
    pub y: f32,
    /// Device pressure; ignored for non-stylus input
    pub pressure: f32,
    pub tilt_x: f32,
    pub tilt_y: f32,
    pub timestamp_ms: f64,
}

/// How the next stroke is resampled
pub enum StrokeMode {
    /// Free drawing along a Catmull-Rom fit of the input
    Freehand,
    /// Snap onto a single fixed curve
    Snap(Arc<dyn ParametricCurve>),
    /// Snap onto whichever candidate curve the stroke starts nearest to
    SnapAny(Vec<Arc<dyn ParametricCurve>>),
    /// Stamp along a straightedge polyline
    Ruler(Vec<Vec2>),
}

/// The stroke engine: pointer events in, dabs out
///
/// Rendering stays behind [`crate::brush::DabRenderer`]; the engine only
/// produces dab placements, in arrival order.
pub struct StrokeEngine {
    config: EngineConfig,
    brush: BrushPreset,
    mode: StrokeMode,
    active_pointer: Option<u64>,
    /// Last processed raw coordinates, for duplicate-event suppression
    last_point: Option<(f32, f32)>,
    stabilizer: Stabilizer,
    sampler: Box<dyn Sampler>,
    speed_alpha: SpeedAlpha,
}

impl StrokeEngine {
    pub fn new(config: EngineConfig) -> Self {
        let brush = BrushPreset::from_config(&config.brush);
        Self {
            stabilizer: Stabilizer::new(config.smoothing.window),
            sampler: Box::new(SplineSampler::new(brush.spacing)),
            speed_alpha: SpeedAlpha::new(config.speed_alpha.clone()),
            brush,
            mode: StrokeMode::Freehand,
            active_pointer: None,
            last_point: None,
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Current brush preset
    pub fn brush(&self) -> &BrushPreset {
        &self.brush
    }

    /// Replace the brush preset; takes effect for the next stroke's
    /// spacing, immediately for size/flow/color
    pub fn set_brush(&mut self, preset: BrushPreset) {
        self.brush = preset;
    }

    /// Select how the next stroke is resampled
    ///
    /// Path modes are validated here so that stroke start stays
    /// infallible.
    pub fn set_mode(&mut self, mode: StrokeMode) -> Result<(), PathError> {
        match &mode {
            StrokeMode::Ruler(points) if points.len() < 2 => {
                return Err(PathError::TooFewPoints(points.len()));
            }
            StrokeMode::SnapAny(paths) if paths.is_empty() => {
                return Err(PathError::NoSegments);
            }
            _ => {}
        }
        self.mode = mode;
        Ok(())
    }

    /// Whether a stroke is currently in progress
    pub fn is_stroking(&self) -> bool {
        self.active_pointer.is_some()
    }

    /// The pointer id owning the active stroke, if any
    pub fn active_pointer(&self) -> Option<u64> {
        self.active_pointer
    }

    /// Start a stroke: reconstructs all per-stroke pipeline state and
    /// processes the first point
    pub fn pointer_down(&mut self, input: PointerInput) -> Vec<Dab> {
        self.active_pointer = Some(input.pointer_id);
        self.last_point = None;
        self.stabilizer = Stabilizer::new(self.config.smoothing.window);
        self.sampler = self.build_sampler();
        self.speed_alpha = SpeedAlpha::new(self.config.speed_alpha.clone());
        self.speed_alpha.down(input.x, input.y, input.timestamp_ms);

        debug!(
            "stroke started: pointer {} at ({:.1}, {:.1})",
            input.pointer_id, input.x, input.y
        );

        let raw = self.raw_point(&input);
        let stable = self.stabilizer.next(raw);
        let samples = self.sampler.next(stable);
        self.last_point = Some((input.x, input.y));

        let alpha = self.speed_alpha.alpha();
        self.emit(samples, alpha)
    }

    /// Continue a stroke
    ///
    /// Events from other pointers and events whose coordinates match the
    /// last processed point are ignored.
    pub fn pointer_move(&mut self, input: PointerInput) -> Vec<Dab> {
        if self.active_pointer != Some(input.pointer_id) {
            return Vec::new();
        }
        if self.last_point == Some((input.x, input.y)) {
            return Vec::new();
        }

        let alpha = self.speed_alpha.move_to(input.x, input.y, input.timestamp_ms);
        let raw = self.raw_point(&input);
        let stable = self.stabilizer.next(raw);
        let samples = self.sampler.next(stable);
        self.last_point = Some((input.x, input.y));

        self.emit(samples, alpha)
    }

    /// End a stroke: processes the final point, flushes the stabilizer
    /// tail-off and the sampler's trailing partial segment, and releases
    /// the pointer
    pub fn pointer_up(&mut self, input: PointerInput) -> Vec<Dab> {
        if self.active_pointer != Some(input.pointer_id) {
            return Vec::new();
        }

        let alpha = self.speed_alpha.move_to(input.x, input.y, input.timestamp_ms);
        let raw = self.raw_point(&input);
        let stable = self.stabilizer.next(raw);
        let mut samples = self.sampler.next(stable);
        for tail in self.stabilizer.close() {
            samples.extend(self.sampler.next(tail));
        }
        samples.extend(self.sampler.close());

        self.active_pointer = None;
        self.last_point = None;

        debug!("stroke ended: {} final samples", samples.len());

        self.emit(samples, alpha)
    }

    fn build_sampler(&self) -> Box<dyn Sampler> {
        let spacing = self.brush.spacing;
        match &self.mode {
            StrokeMode::Freehand => Box::new(SplineSampler::new(spacing)),
            StrokeMode::Snap(path) => Box::new(SnapSampler::new(
                path.clone(),
                spacing,
                self.config.snap.offset_threshold,
            )),
            StrokeMode::SnapAny(paths) => {
                Box::new(MultiSnapSampler::new(paths.clone(), spacing))
            }
            StrokeMode::Ruler(points) => match RulerSampler::new(points, spacing) {
                Ok(sampler) => Box::new(sampler),
                // set_mode validates ruler points; an invalid mode
                // degrades to freehand
                Err(_) => Box::new(SplineSampler::new(spacing)),
            },
        }
    }

    /// Convert a pointer event into a raw stroke point, substituting a
    /// synthetic pressure of 0.5 for devices with no real pressure
    fn raw_point(&self, input: &PointerInput) -> RawPoint {
        let pressure = if input.pointer_type == PointerType::Pen {
            input.pressure
        } else {
            0.5
        };
        RawPoint {
            x: input.x,
            y: input.y,
            pressure,
            tilt_x: input.tilt_x,
            tilt_y: input.tilt_y,
            timestamp_ms: input.timestamp_ms,
        }
    }

    fn emit(&self, samples: Vec<Sample>, alpha: f32) -> Vec<Dab> {
        samples
            .into_iter()
            .map(|sample| {
                let pressure = clamp01(sample.point.pressure);
                Dab {
                    x: sample.point.x,
                    y: sample.point.y,
                    size: self.brush.size_for_pressure(pressure),
                    angle: sample.angle,
                    flow: pressure * alpha * self.brush.flow,
                    color: self.brush.color,
                }
            })
            .collect()
    }
}
