use bevy::prelude::*;
#[cfg(not(target_arch = "wasm32"))]
use bevy::window::PresentMode;

/// Primary window: a resizable desktop window, or the page canvas on the web.
pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            title: "Measure".into(),
            canvas: Some("#bevy-canvas".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: true,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Measure".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
