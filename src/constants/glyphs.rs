pub const STAR: char = '★';
pub const LEAF: char = '▲';
pub const LEAF_SPARKLE: char = '✳';
pub const TRUNK: char = '█';
pub const BAND: char = '▇';

pub const SKY_STARS: [char; 3] = ['·', '˚', '✶'];
pub const ORNAMENTS: [char; 4] = ['●', '◆', '◉', '◍'];

pub const GARLAND_RISING: char = '╱';
pub const GARLAND_FALLING: char = '╲';

pub const REFLECTION: [char; 3] = ['▁', '▂', '▃'];
pub const SNOW_TEXTURE: [char; 2] = ['░', '▒'];

pub const SNOW_FAR: [char; 3] = ['·', '•', '˙'];
pub const SNOW_NEAR: [char; 2] = ['✻', '✦'];
pub const GLITTER: [char; 2] = ['✧', '✦'];
