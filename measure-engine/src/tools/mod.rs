//! Interactive tools.
//!
//! ### Measure Tool
//! - **Activation**: `M` key (native) or a [`measure::MeasureInput::Activate`] event
//! - **Purpose**: Measure the distance between two points on the working plane
//! - **Workflow**:
//!   1. First click sets the start point and shows a preview segment
//!   2. Mouse movement stretches the preview
//!   3. Second click completes the measurement; Shift/Ctrl snap the length
//!   4. Completed measurements stay until removed or cleared
//! - **Output**: a dimension line with extension lines, arrowheads and a
//!   distance label, plus [`measure::MeasureNotification`] events
//!
//! ```text
//! Host input (mouse ray ∩ plane, modifiers)
//!   └─> MeasureInput
//!       └─> apply_measure_input()
//!           ├─> MeasureTool (state machine + registry)
//!           │     └─> AnnotationScene (Bevy entities, meshes, materials)
//!           └─> MeasureNotification
//! ```

/// Two-point distance measurement with CAD-style dimension lines.
pub mod measure;
