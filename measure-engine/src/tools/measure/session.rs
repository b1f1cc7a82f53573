//! Two-click measurement workflow.
//!
//! ```text
//! Idle ──click──> Pending ──click──> Idle   (measurement registered)
//!                    │
//!                    └──cancel/deactivate──> Idle
//! ```

use super::annotation::{Segment, build};
use super::geometry::{distance, snap_to_increment};
use super::options::MeasureOptions;
use super::registry::MeasurementRegistry;
use super::scene::{AnnotationScene, PreviewSegment};
use bevy::prelude::*;

/// Scene root and camera the tool draws into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneWiring {
    pub scene: Entity,
    pub camera: Entity,
}

/// First point of a measurement and its live preview.
#[derive(Debug)]
pub struct PendingMeasurement {
    start: Vec3,
    preview: PreviewSegment,
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Tool inactive.
    Ignored,
    Started { start: Vec3 },
    Completed {
        index: usize,
        start: Vec3,
        end: Vec3,
        distance: f32,
    },
    /// Second point landed on the first; nothing was built.
    Discarded,
}

/// The measurement session: activation flag, pending state and completed
/// measurements. One instance lives in the app as a resource.
#[derive(Resource, Default)]
pub struct MeasureTool {
    is_active: bool,
    disposed: bool,
    wiring: Option<SceneWiring>,
    pending: Option<PendingMeasurement>,
    measurements: MeasurementRegistry,
    options: MeasureOptions,
}

impl MeasureTool {
    /// Wire the tool to its scene root and camera. Only the first call counts.
    pub fn init(&mut self, scene: Entity, camera: Entity) {
        if let Some(wiring) = self.wiring {
            warn!("Measure tool already wired to {:?}; ignoring init", wiring);
            return;
        }
        self.wiring = Some(SceneWiring { scene, camera });
    }

    /// Start processing input. Requires a prior [`init`](Self::init).
    pub fn activate(&mut self) -> bool {
        if self.wiring.is_none() || self.disposed {
            warn!("Measure tool cannot be activated before init");
            return false;
        }
        if self.is_active {
            return false;
        }
        self.is_active = true;
        info!("Measure tool activated");
        true
    }

    /// Stop processing input and drop any pending measurement.
    pub fn deactivate<S: AnnotationScene>(&mut self, scene: &mut S) -> bool {
        let was_active = std::mem::replace(&mut self.is_active, false);
        self.cancel_measurement(scene);
        if was_active {
            info!("Measure tool deactivated");
        }
        was_active
    }

    /// Move the preview endpoint. Returns the live distance when a
    /// measurement is pending.
    pub fn handle_pointer_move<S: AnnotationScene>(
        &mut self,
        point: Vec3,
        scene: &mut S,
    ) -> Option<f32> {
        if !self.is_active {
            return None;
        }
        let pending = self.pending.as_mut()?;
        pending.preview.segment.end = point;
        scene.move_preview(&pending.preview);
        Some(distance(pending.start, point))
    }

    /// First click starts a measurement, second click completes it.
    ///
    /// `coarse_snap` wins over `fine_snap` when both are set.
    pub fn handle_click<S: AnnotationScene>(
        &mut self,
        point: Vec3,
        coarse_snap: bool,
        fine_snap: bool,
        scene: &mut S,
    ) -> ClickOutcome {
        if !self.is_active {
            return ClickOutcome::Ignored;
        }

        let Some(start) = self.start_point() else {
            let preview = scene.spawn_preview(Segment::new(point, point));
            self.pending = Some(PendingMeasurement {
                start: point,
                preview,
            });
            debug!("Measurement started at {}", point);
            return ClickOutcome::Started { start: point };
        };

        let end = match self.snap_step(coarse_snap, fine_snap) {
            Some(step) => snap_to_increment(start, point, step),
            None => point,
        };

        if end == start {
            self.cancel_measurement(scene);
            debug!("Zero-length measurement discarded");
            return ClickOutcome::Discarded;
        }

        let measurement = build(start, end, &self.options, scene);
        let distance = measurement.distance();
        self.measurements.add(measurement);
        self.cancel_measurement(scene);

        let index = self.measurements.len() - 1;
        info!("Measurement #{} completed: {:.2} m", index, distance);
        ClickOutcome::Completed {
            index,
            start,
            end,
            distance,
        }
    }

    /// Drop the pending measurement, if any. Returns whether one existed.
    pub fn cancel_measurement<S: AnnotationScene>(&mut self, scene: &mut S) -> bool {
        match self.pending.take() {
            Some(pending) => {
                scene.release_preview(pending.preview);
                true
            }
            None => false,
        }
    }

    pub fn remove_at<S: AnnotationScene>(&mut self, index: usize, scene: &mut S) -> bool {
        let removed = self.measurements.remove_at(index, scene);
        if removed {
            info!("Measurement #{} removed", index);
        }
        removed
    }

    pub fn clear_all<S: AnnotationScene>(&mut self, scene: &mut S) {
        let count = self.measurements.len();
        self.measurements.clear_all(scene);
        if count > 0 {
            info!("Cleared {} measurements", count);
        }
    }

    /// Teardown: cancel, clear and release shared resources. Later calls do nothing.
    pub fn dispose<S: AnnotationScene>(&mut self, scene: &mut S) {
        if self.disposed {
            return;
        }
        self.deactivate(scene);
        self.measurements.dispose(scene);
        self.disposed = true;
        info!("Measure tool disposed");
    }

    fn snap_step(&self, coarse_snap: bool, fine_snap: bool) -> Option<f32> {
        if coarse_snap {
            Some(self.options.coarse_snap_step)
        } else if fine_snap {
            Some(self.options.fine_snap_step)
        } else {
            None
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn start_point(&self) -> Option<Vec3> {
        self.pending.as_ref().map(|pending| pending.start)
    }

    pub fn preview_end(&self) -> Option<Vec3> {
        self.pending.as_ref().map(|pending| pending.preview.segment.end)
    }

    pub fn measurements(&self) -> &MeasurementRegistry {
        &self.measurements
    }

    pub fn options(&self) -> &MeasureOptions {
        &self.options
    }

    /// Replace the options used for measurements built from now on.
    pub fn set_options(&mut self, options: MeasureOptions) {
        self.options = options;
    }

    pub fn scene_root(&self) -> Option<Entity> {
        self.wiring.map(|wiring| wiring.scene)
    }

    pub fn camera(&self) -> Option<Entity> {
        self.wiring.map(|wiring| wiring.camera)
    }
}
