use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::ui::stats_overlay::StatsOverlay;

pub fn update_stats_overlays(
    diagnostics: Res<DiagnosticsStore>,
    mut overlays: Query<&mut Text, With<StatsOverlay>>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed());
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(|frame_time| frame_time.smoothed());

    let label = format_frame_stats(fps, frame_time);
    for mut text in &mut overlays {
        if text.0 != label {
            text.0 = label.clone();
        }
    }
}

/// "60 FPS\n16.7 ms", with dashes until diagnostics have samples.
pub fn format_frame_stats(fps: Option<f64>, frame_time_ms: Option<f64>) -> String {
    let fps = fps.map_or_else(|| "--".to_string(), |fps| format!("{fps:.0}"));
    let frame_time = frame_time_ms.map_or_else(|| "--".to_string(), |ms| format!("{ms:.1}"));
    format!("{fps} FPS\n{frame_time} ms")
}
