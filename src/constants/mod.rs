pub mod glyphs;
pub mod palette;
