use super::scene::{AnnotationScene, DimensionPrimitives};
use bevy::prelude::*;

/// A completed dimension line.
#[derive(Debug)]
pub struct Measurement {
    start: Vec3,
    end: Vec3,
    distance: f32,
    primitives: DimensionPrimitives,
}

impl Measurement {
    pub fn new(start: Vec3, end: Vec3, distance: f32, primitives: DimensionPrimitives) -> Self {
        Self {
            start,
            end,
            distance,
            primitives,
        }
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn end(&self) -> Vec3 {
        self.end
    }

    /// Length at creation time.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn primitives(&self) -> &DimensionPrimitives {
        &self.primitives
    }

    fn release<S: AnnotationScene>(self, scene: &mut S) {
        scene.release_dimension(self.primitives);
    }
}

/// Completed measurements in creation order.
///
/// Entries are addressed by position only; removing one shifts the later
/// entries down by one.
#[derive(Debug, Default)]
pub struct MeasurementRegistry {
    entries: Vec<Measurement>,
}

impl MeasurementRegistry {
    pub fn add(&mut self, measurement: Measurement) {
        self.entries.push(measurement);
    }

    /// Remove and release the entry at `index`. Out-of-range indices are ignored.
    pub fn remove_at<S: AnnotationScene>(&mut self, index: usize, scene: &mut S) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.entries.remove(index).release(scene);
        true
    }

    /// Remove and release every entry.
    pub fn clear_all<S: AnnotationScene>(&mut self, scene: &mut S) {
        for measurement in self.entries.drain(..) {
            measurement.release(scene);
        }
    }

    /// Clear everything, then release the shared style resources.
    pub fn dispose<S: AnnotationScene>(&mut self, scene: &mut S) {
        self.clear_all(scene);
        scene.release_shared();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Measurement> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.entries.iter()
    }
}
