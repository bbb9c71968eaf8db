/// Parameter panel slider bounds, applied to each translation axis.
pub const PANEL_SLIDER_MIN: f32 = -1.0;
pub const PANEL_SLIDER_MAX: f32 = 1.0;

pub const PANEL_WIDTH: f32 = 180.0;
pub const PANEL_ROW_HEIGHT: f32 = 22.0;
pub const PANEL_TRACK_WIDTH: f32 = 110.0;
pub const PANEL_FONT_SIZE: f32 = 12.0;

pub const STATS_FONT_SIZE: f32 = 12.0;
pub const STATS_WIDTH: f32 = 96.0;
