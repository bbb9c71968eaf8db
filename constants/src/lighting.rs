use bevy::color::Color;

/// Directional light colour (white) and relative intensity.
pub const DIRECTIONAL_LIGHT_COLOR: Color = Color::WHITE;
pub const DIRECTIONAL_LIGHT_INTENSITY: f32 = 0.5;

/// Ambient light colour, #404040.
pub const AMBIENT_LIGHT_COLOR: Color = Color::srgb(0.250_980_4, 0.250_980_4, 0.250_980_4);
pub const AMBIENT_LIGHT_INTENSITY: f32 = 2.0;

/// Lux per unit of relative directional intensity.
pub const DIRECTIONAL_LUX_PER_UNIT: f32 = 10_000.0;

/// Ambient brightness (cd/m^2) per unit of relative ambient intensity.
pub const AMBIENT_BRIGHTNESS_PER_UNIT: f32 = 500.0;
