//! Builds one frame by painting layers back to front. Each pass may overwrite
//! anything painted before it.

use rand::{seq::SliceRandom, Rng};

use crate::{
    color::{lerp_color, lighten, Rgb},
    components::canvas::Canvas,
    config::{Palette, SceneConfig},
    constants::{glyphs, palette},
    scene::{
        ornament::OrnamentMap,
        particle::{GlitterField, SnowLayer},
        shape::{Coord, Geometry, TreeShape},
    },
};

/// Everything a frame is drawn from, borrowed from the scene for one tick.
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    pub geometry: &'a Geometry,
    pub tree: &'a TreeShape,
    pub ornaments: &'a OrnamentMap,
    pub snow: &'a [SnowLayer],
    pub glitter: &'a GlitterField,
    pub config: &'a SceneConfig,
    pub palette: &'a Palette,
}

/// Radians per tick for the canopy, ornament and trunk wobble.
const PHASE_PER_TICK: f64 = 0.23;

pub fn compose<R: Rng + ?Sized>(view: &SceneView<'_>, tick: u64, rng: &mut R) -> Canvas {
    let g = view.geometry;
    let mut canvas = Canvas::new(g.width as usize, g.rows as usize);
    let phase = tick as f64 * PHASE_PER_TICK;

    paint_background(&mut canvas, view, tick);
    paint_canopy(&mut canvas, view, phase, rng);
    paint_ornaments(&mut canvas, view, phase, rng);
    paint_trunk(&mut canvas, view, phase);
    paint_band(&mut canvas, view);

    let layers = &view.config.layers;
    if layers.garland {
        paint_garland(&mut canvas, view, tick);
    }
    if layers.reflection {
        paint_reflection(&mut canvas, view, rng);
    }
    if layers.snow_texture {
        paint_snow_texture(&mut canvas, view, tick, rng);
    }

    paint_snow(&mut canvas, view.snow, rng);
    paint_glitter(&mut canvas, view.glitter, rng);
    paint_star(&mut canvas, view, tick);

    canvas
}

/// Index into the star palette for `tick`.
pub fn star_color_index(tick: u64, palette_len: usize) -> usize {
    (tick % palette_len as u64) as usize
}

fn pick<R: Rng + ?Sized>(set: &[char], rng: &mut R) -> char {
    set.choose(rng).copied().unwrap_or(' ')
}

fn wave01(angle: f64) -> f64 {
    (angle.sin() + 1.0) / 2.0
}

fn sky_color(x: i32, y: i32, sky_rows: i32, tick: u64) -> Rgb {
    let base = f64::from(y) / f64::from((sky_rows - 1).max(1));
    let wave = (f64::from(x) / f64::from(sky_rows.max(1)) * 2.6 + tick as f64 * 0.02 + f64::from(y) * 0.07).sin() * 0.05;
    lerp_color(palette::SKY_TOP, palette::SKY_BOTTOM, (base + wave).clamp(0.0, 1.0))
}

pub fn ground_color(offset: i32, ground_rows: i32) -> Rgb {
    let t = f64::from(offset) / f64::from((ground_rows - 1).max(1));
    lerp_color(palette::GROUND_TOP, palette::GROUND_BOTTOM, t)
}

/// Cheap per-cell hash so stars flicker without consuming random numbers.
fn star_noise(x: i32, y: i32, tick: u64) -> u64 {
    (x as u64)
        .wrapping_mul(928_371)
        .wrapping_add((y as u64).wrapping_mul(689_287))
        .wrapping_add(tick.wrapping_mul(19_349_663))
        % 137
}

fn paint_background(canvas: &mut Canvas, view: &SceneView<'_>, tick: u64) {
    let g = view.geometry;
    let layers = &view.config.layers;

    for y in 0..g.rows {
        for x in 0..g.width {
            if g.is_ground(y) {
                canvas.fill(x, y, ' ', None, Some(ground_color(y - g.ground_start, g.ground_rows)));
                continue;
            }

            let bg = layers.sky.then(|| sky_color(x, y, g.ground_start, tick));
            canvas.fill(x, y, ' ', None, bg);

            if layers.stars {
                let noise = star_noise(x, y, tick);
                if noise < 2 {
                    let i = noise as usize;
                    let glyph = glyphs::SKY_STARS[i % glyphs::SKY_STARS.len()];
                    let color = palette::STAR_FIELD[i % palette::STAR_FIELD.len()];
                    canvas.paint(x, y, glyph, color, false);
                }
            }
        }
    }
}

fn paint_canopy<R: Rng + ?Sized>(canvas: &mut Canvas, view: &SceneView<'_>, phase: f64, rng: &mut R) {
    let g = view.geometry;
    let top_to_bottom = f64::from((i32::from(g.height) - 1).max(1));

    for c in &view.tree.canopy {
        let (x, y) = g.to_scene(*c);
        if rng.gen::<f64>() < view.config.sparkle_rate {
            canvas.paint(x, y, glyphs::LEAF_SPARKLE, palette::LEAF_SPARKLE, true);
            continue;
        }
        let depth = f64::from(c.y) / top_to_bottom;
        let mix = 0.55 * depth + 0.45 * wave01(phase + f64::from(c.y) * 0.35);
        canvas.paint(x, y, glyphs::LEAF, lerp_color(palette::GREEN_DARK, palette::GREEN_LIGHT, mix), false);
    }
}

fn paint_ornaments<R: Rng + ?Sized>(canvas: &mut Canvas, view: &SceneView<'_>, phase: f64, rng: &mut R) {
    for (c, ornament) in view.ornaments {
        let blink = wave01(phase + f64::from(c.x) * 0.9 + f64::from(c.y) * 0.4);
        let color = lerp_color(ornament.color, Rgb::WHITE, palette::ORNAMENT_GLOW * blink);
        let glyph = if rng.gen::<f64>() < view.config.twinkle_rate {
            pick(&glyphs::ORNAMENTS, rng)
        } else {
            ornament.glyph
        };
        let (x, y) = view.geometry.to_scene(*c);
        canvas.paint(x, y, glyph, color, true);
    }
}

fn paint_trunk(canvas: &mut Canvas, view: &SceneView<'_>, phase: f64) {
    for c in &view.tree.trunk {
        let grain = wave01(phase + f64::from(c.x) * 0.8);
        let (x, y) = view.geometry.to_scene(*c);
        canvas.paint(x, y, glyphs::TRUNK, lerp_color(palette::WOOD_DARK, palette::WOOD_LIGHT, grain), false);
    }
}

fn paint_band(canvas: &mut Canvas, view: &SceneView<'_>) {
    for c in &view.tree.band {
        let color = if c.x % 2 == 0 { palette::BAND_EVEN } else { palette::BAND_ODD };
        let (x, y) = view.geometry.to_scene(*c);
        canvas.paint(x, y, glyphs::BAND, color, false);
    }
}

/// Two ribbons winding down the canopy. They only land on cells already drawn, so
/// they never hang in the sky.
fn paint_garland(canvas: &mut Canvas, view: &SceneView<'_>, tick: u64) {
    let g = view.geometry;
    let colors = &view.palette.garland;
    if colors.is_empty() {
        return;
    }
    let height = f64::from(g.height);
    let amplitude = f64::from((g.width / 5).max(2));
    let center = f64::from(g.width / 2);

    for (i, offset) in [0.0, 1.2].into_iter().enumerate() {
        let color = colors[i % colors.len()];
        for row in 0..i32::from(g.height) {
            let wave = (f64::from(row) / height * 3.2 + tick as f64 * 0.15 + offset).sin();
            let column = ((center + wave * amplitude).trunc() as i32).clamp(1, g.width - 2);
            let (x, y) = g.to_scene(Coord::new(column, row));
            if canvas.get(x, y).is_some_and(|cell| !cell.is_blank()) {
                let glyph = if wave > 0.0 { glyphs::GARLAND_RISING } else { glyphs::GARLAND_FALLING };
                canvas.paint(x, y, glyph, color, true);
            }
        }
    }
}

/// Mirrors the rows above the ground line into the ground, washing out toward white
/// the further a row lies from the line.
fn paint_reflection<R: Rng + ?Sized>(canvas: &mut Canvas, view: &SceneView<'_>, rng: &mut R) {
    let g = view.geometry;
    let fade = view.config.reflection_fade;

    for offset in 0..g.ground_rows {
        let src_y = g.ground_start - 1 - offset;
        let dst_y = g.ground_start + offset;
        if src_y < 0 || dst_y >= g.rows {
            continue;
        }
        let amount = (0.2 + fade * f64::from(offset) / f64::from(g.ground_rows.max(1))).min(1.0);
        for x in 0..g.width {
            let Some(src) = canvas.get(x, src_y).copied() else { continue };
            if src.is_blank() {
                continue;
            }
            let tint = lighten(src.fg.unwrap_or(palette::REFLECTION_FALLBACK), amount);
            canvas.paint(x, dst_y, pick(&glyphs::REFLECTION, rng), tint, false);
        }
    }
}

fn paint_snow_texture<R: Rng + ?Sized>(canvas: &mut Canvas, view: &SceneView<'_>, tick: u64, rng: &mut R) {
    let g = view.geometry;
    for y in g.ground_start..g.rows {
        for x in 0..g.width {
            let blank = canvas.get(x, y).is_some_and(|cell| cell.is_blank());
            if blank && (x as u64 + y as u64 + tick) % 9 == 0 {
                canvas.paint(x, y, pick(&glyphs::SNOW_TEXTURE, rng), palette::SNOW_TEXTURE, false);
            }
        }
    }
}

fn paint_snow<R: Rng + ?Sized>(canvas: &mut Canvas, snow: &[SnowLayer], rng: &mut R) {
    for layer in snow {
        for flake in layer.flakes() {
            if let Some((x, y)) = layer.cell(flake) {
                canvas.paint(x, y, pick(layer.glyphs(), rng), palette::SNOW, false);
            }
        }
    }
}

fn paint_glitter<R: Rng + ?Sized>(canvas: &mut Canvas, glitter: &GlitterField, rng: &mut R) {
    for spark in glitter.sparks() {
        let color = if spark.life <= 2 { palette::GLITTER_FADING } else { palette::GLITTER_FRESH };
        canvas.paint(spark.x, spark.y, pick(&glyphs::GLITTER, rng), color, true);
    }
}

fn paint_star(canvas: &mut Canvas, view: &SceneView<'_>, tick: u64) {
    let colors = &view.palette.star;
    if colors.is_empty() {
        return;
    }
    let (x, y) = view.geometry.star();
    canvas.paint(x, y, glyphs::STAR, colors[star_color_index(tick, colors.len())], true);
}
