use crate::color::Rgb;

pub const SKY_TOP: Rgb = Rgb::new(6, 8, 12);
pub const SKY_BOTTOM: Rgb = Rgb::new(18, 22, 32);
pub const GROUND_TOP: Rgb = Rgb::new(28, 30, 36);
pub const GROUND_BOTTOM: Rgb = Rgb::new(10, 11, 16);

pub const STAR_FIELD: [Rgb; 3] = [Rgb::new(208, 208, 208), Rgb::new(245, 245, 245), Rgb::new(160, 160, 160)];

pub const GREEN_DARK: Rgb = Rgb::new(0, 120, 0);
pub const GREEN_LIGHT: Rgb = Rgb::new(0, 200, 80);
pub const LEAF_SPARKLE: Rgb = Rgb::new(220, 255, 220);

// Share of white mixed into an ornament at full blink.
pub const ORNAMENT_GLOW: f64 = 0.65;

pub const WOOD_DARK: Rgb = Rgb::new(120, 75, 30);
pub const WOOD_LIGHT: Rgb = Rgb::new(170, 120, 60);

pub const BAND_EVEN: Rgb = Rgb::new(255, 60, 60);
pub const BAND_ODD: Rgb = Rgb::new(255, 215, 0);

pub const REFLECTION_FALLBACK: Rgb = Rgb::new(138, 138, 138);
pub const SNOW_TEXTURE: Rgb = Rgb::new(220, 223, 229);

pub const SNOW: Rgb = Rgb::new(246, 251, 255);
pub const GLITTER_FRESH: Rgb = Rgb::new(255, 240, 200);
pub const GLITTER_FADING: Rgb = Rgb::new(255, 255, 255);

pub const ORNAMENTS: [Rgb; 6] = [
    Rgb::new(255, 215, 0),   // gold
    Rgb::new(255, 70, 70),   // red
    Rgb::new(80, 170, 255),  // blue
    Rgb::new(255, 105, 180), // pink
    Rgb::new(180, 90, 255),  // purple
    Rgb::new(245, 245, 245), // white
];

pub const STAR: [Rgb; 3] = [Rgb::new(255, 240, 120), Rgb::new(255, 220, 60), Rgb::new(255, 255, 180)];

pub const GARLAND: [Rgb; 2] = [Rgb::new(236, 236, 236), Rgb::new(255, 200, 90)];
