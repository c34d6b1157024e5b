//! Kaleidoscopic rendering of a cluster.
//!
//! The engine only simulates the wedge `[0, S]`. [`SymmetricRenderer`]
//! turns that into the full image by drawing the cluster 12 times: six
//! rotations by 60°, each once as-is and once mirrored across the x-axis.

use crate::{cluster::Cluster, config::Config, types::ParticleIndex};
use glam::Vec2;
use std::f32::consts::TAU;

/// Number of rotational copies; each is drawn plain and mirrored.
pub const FOLDS: usize = 6;

/// An HSL colour. `hue` is in degrees and may lie outside `[0, 360)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Converts to 8-bit sRGB, wrapping the hue into `[0, 360)` first.
    pub fn to_srgb(self) -> [u8; 3] {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = self.saturation.clamp(0.0, 1.0);
        let l = self.lightness.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        [to_u8(r), to_u8(g), to_u8(b)]
    }
}

/// Minimal 2-D canvas the renderer draws through.
///
/// Transform calls compose onto the current transform the way a canvas
/// context does: `translate`, `rotate` and `scale` post-multiply, and
/// `save`/`restore` push and pop the whole transform.
pub trait DrawSurface {
    /// Clears the axis-aligned region `[min, max]` in current coordinates.
    fn clear(&mut self, min: Vec2, max: Vec2);
    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Hsl);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);
    fn scale(&mut self, factor: Vec2);
}

/// Stateless painter for the 12-fold symmetric image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymmetricRenderer {
    pub particle_radius: f32,
    pub base_hue: f32,
    pub hue_rot_speed: f32,
    /// Working-frame origin; becomes the symmetry center on screen.
    pub target: Vec2,
}

impl SymmetricRenderer {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            particle_radius: cfg.particle_radius,
            base_hue: cfg.base_hue,
            hue_rot_speed: cfg.hue_rot_speed,
            target: cfg.target,
        }
    }

    /// Hue in degrees for the particle deposited at `index`.
    ///
    /// Truncated to whole degrees and deliberately not wrapped; wrapping
    /// happens in [`Hsl::to_srgb`].
    pub fn hue(&self, index: ParticleIndex) -> f32 {
        (self.base_hue + index as f32 * self.hue_rot_speed).trunc()
    }

    pub fn color(&self, index: ParticleIndex) -> Hsl {
        Hsl::new(self.hue(index), 0.8, 0.5)
    }

    /// Clears `viewport` and draws the 12 copies of `cluster` around its
    /// center.
    ///
    /// ### Parameters
    /// - `cluster` - Particles in working-frame coordinates.
    /// - `surface` - Target surface, in coordinates where the viewport
    ///   spans `[0, viewport]`.
    /// - `viewport` - Width and height of the drawing area.
    pub fn render<S: DrawSurface + ?Sized>(
        &self,
        cluster: &Cluster,
        surface: &mut S,
        viewport: Vec2,
    ) {
        surface.clear(Vec2::ZERO, viewport);

        surface.save();
        surface.translate(viewport * 0.5);

        for i in 0..FOLDS {
            let angle = i as f32 * TAU / FOLDS as f32;

            surface.save();
            surface.rotate(angle);
            self.draw_segment(cluster, surface);
            surface.restore();

            surface.save();
            surface.rotate(angle);
            surface.scale(Vec2::new(1.0, -1.0));
            self.draw_segment(cluster, surface);
            surface.restore();
        }

        surface.restore();
    }

    fn draw_segment<S: DrawSurface + ?Sized>(&self, cluster: &Cluster, surface: &mut S) {
        for p in cluster {
            surface.fill_disc(
                p.pos - self.target,
                self.particle_radius,
                self.color(p.index),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Affine2;

    /// Records what was drawn, in absolute coordinates.
    #[derive(Default)]
    struct RecordingSurface {
        current: Affine2,
        stack: Vec<Affine2>,
        max_depth: usize,
        saves: usize,
        restores: usize,
        clears: Vec<(Vec2, Vec2)>,
        discs: Vec<(Vec2, f32, Hsl)>,
    }

    impl DrawSurface for RecordingSurface {
        fn clear(&mut self, min: Vec2, max: Vec2) {
            self.clears.push((
                self.current.transform_point2(min),
                self.current.transform_point2(max),
            ));
        }

        fn fill_disc(&mut self, center: Vec2, radius: f32, color: Hsl) {
            self.discs
                .push((self.current.transform_point2(center), radius, color));
        }

        fn save(&mut self) {
            self.saves += 1;
            self.stack.push(self.current);
            self.max_depth = self.max_depth.max(self.stack.len());
        }

        fn restore(&mut self) {
            self.restores += 1;
            self.current = self.stack.pop().expect("restore without save");
        }

        fn translate(&mut self, offset: Vec2) {
            self.current = self.current * Affine2::from_translation(offset);
        }

        fn rotate(&mut self, angle: f32) {
            self.current = self.current * Affine2::from_angle(angle);
        }

        fn scale(&mut self, factor: Vec2) {
            self.current = self.current * Affine2::from_scale(factor);
        }
    }

    fn single_particle_cluster(pos: Vec2) -> Cluster {
        let mut cluster = Cluster::new();
        cluster.accept(pos);
        cluster
    }

    #[test]
    fn hue_follows_deposition_order_without_wrapping() {
        let renderer = SymmetricRenderer::from_config(&Config::default());

        assert_eq!(renderer.hue(0), 230.0);
        assert_eq!(renderer.hue(10), 229.0);
        assert_eq!(renderer.hue(15), 228.0);
        assert_eq!(renderer.hue(3000), -70.0);

        let c = renderer.color(0);
        assert_eq!((c.saturation, c.lightness), (0.8, 0.5));
    }

    #[test]
    fn hsl_primaries_convert_to_rgb() {
        assert_eq!(Hsl::new(0.0, 1.0, 0.5).to_srgb(), [255, 0, 0]);
        assert_eq!(Hsl::new(120.0, 1.0, 0.5).to_srgb(), [0, 255, 0]);
        assert_eq!(Hsl::new(240.0, 1.0, 0.5).to_srgb(), [0, 0, 255]);
        assert_eq!(Hsl::new(0.0, 0.0, 1.0).to_srgb(), [255, 255, 255]);
    }

    #[test]
    fn out_of_range_hue_wraps_when_converted() {
        assert_eq!(
            Hsl::new(-120.0, 0.8, 0.5).to_srgb(),
            Hsl::new(240.0, 0.8, 0.5).to_srgb()
        );
        assert_eq!(
            Hsl::new(590.0, 0.8, 0.5).to_srgb(),
            Hsl::new(230.0, 0.8, 0.5).to_srgb()
        );
    }

    #[test]
    fn empty_cluster_only_clears() {
        let renderer = SymmetricRenderer::from_config(&Config::default());
        let mut surface = RecordingSurface::default();

        renderer.render(&Cluster::new(), &mut surface, Vec2::new(800.0, 800.0));

        assert_eq!(surface.clears, vec![(Vec2::ZERO, Vec2::new(800.0, 800.0))]);
        assert!(surface.discs.is_empty());
        assert_eq!(surface.saves, surface.restores);
    }

    #[test]
    fn draws_twelve_copies_per_particle() {
        let renderer = SymmetricRenderer::from_config(&Config::default());
        let mut cluster = single_particle_cluster(Vec2::new(30.0, 4.0));
        cluster.accept(Vec2::new(60.0, 8.0));
        let mut surface = RecordingSurface::default();

        renderer.render(&cluster, &mut surface, Vec2::new(200.0, 100.0));

        assert_eq!(surface.discs.len(), 2 * 2 * FOLDS);
        assert_eq!(surface.clears.len(), 1);

        // One save/restore per copy plus the outer translate.
        assert_eq!(surface.saves, 2 * FOLDS + 1);
        assert_eq!(surface.restores, surface.saves);
        assert!(surface.stack.is_empty());
        assert_eq!(surface.max_depth, 2);
        assert_eq!(surface.current, Affine2::IDENTITY);

        for (_, radius, _) in &surface.discs {
            assert_eq!(*radius, 2.0);
        }
    }

    #[test]
    fn copies_form_rotations_and_mirrors_around_viewport_center() {
        let renderer = SymmetricRenderer::from_config(&Config::default());
        let p = Vec2::new(30.0, 4.0);
        let cluster = single_particle_cluster(p);
        let mut surface = RecordingSurface::default();
        let viewport = Vec2::new(200.0, 100.0);
        let center = viewport * 0.5;

        renderer.render(&cluster, &mut surface, viewport);

        let mut expected = Vec::new();
        for i in 0..FOLDS {
            let rot = Vec2::from_angle(i as f32 * TAU / FOLDS as f32);
            expected.push(center + rot.rotate(p));
            expected.push(center + rot.rotate(Vec2::new(p.x, -p.y)));
        }

        assert_eq!(surface.discs.len(), expected.len());
        for (got, want) in surface.discs.iter().map(|d| d.0).zip(&expected) {
            assert!((got - *want).length() < 1e-3, "got={got:?}, want={want:?}");
            assert!(((got - center).length() - p.length()).abs() < 1e-3);
        }
    }

    #[test]
    fn disc_colors_use_particle_index() {
        let renderer = SymmetricRenderer::from_config(&Config::default());
        let mut cluster = Cluster::new();
        for i in 0..20 {
            cluster.accept(Vec2::new(10.0 + i as f32, 1.0));
        }
        let mut surface = RecordingSurface::default();

        renderer.render(&cluster, &mut surface, Vec2::new(100.0, 100.0));

        // The first segment draws particles in deposition order.
        for (i, (_, _, color)) in surface.discs.iter().take(cluster.len()).enumerate() {
            assert_eq!(*color, renderer.color(i));
        }
    }

    #[test]
    fn symmetry_center_is_the_target() {
        let mut cfg = Config::default();
        cfg.target = Vec2::new(50.0, -20.0);
        let renderer = SymmetricRenderer::from_config(&cfg);
        let cluster = single_particle_cluster(cfg.target + Vec2::new(10.0, 0.0));
        let mut surface = RecordingSurface::default();

        renderer.render(&cluster, &mut surface, Vec2::new(100.0, 100.0));

        let first = surface.discs[0].0;
        assert!((first - Vec2::new(60.0, 50.0)).length() < 1e-4, "first={first:?}");
    }
}
