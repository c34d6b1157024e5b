//! [`DrawSurface`] backed by an [`egui::Painter`].
//!
//! egui painters draw in absolute screen coordinates, so this module keeps
//! its own canvas-style transform stack and applies it to every call.

use dla_core::render::{DrawSurface, Hsl};
use glam::{Affine2, Vec2};

/// Current transform plus the `save`/`restore` stack.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformStack {
    current: Affine2,
    saved: Vec<Affine2>,
}

impl TransformStack {
    pub fn new(base: Affine2) -> Self {
        Self {
            current: base,
            saved: Vec::with_capacity(4),
        }
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pops the last saved transform. Unmatched restores are ignored.
    pub fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.current = t;
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.current = self.current * Affine2::from_translation(offset);
    }

    pub fn rotate(&mut self, angle: f32) {
        self.current = self.current * Affine2::from_angle(angle);
    }

    pub fn scale(&mut self, factor: Vec2) {
        self.current = self.current * Affine2::from_scale(factor);
    }

    pub fn apply(&self, p: Vec2) -> Vec2 {
        self.current.transform_point2(p)
    }

    /// Length scale of the current transform, used for disc radii.
    ///
    /// Exact for rotations, mirrors and uniform scales.
    pub fn length_scale(&self) -> f32 {
        self.current.matrix2.determinant().abs().sqrt()
    }
}

pub fn to_color32(color: Hsl) -> egui::Color32 {
    let [r, g, b] = color.to_srgb();
    egui::Color32::from_rgb(r, g, b)
}

fn to_pos2(p: Vec2) -> egui::Pos2 {
    egui::pos2(p.x, p.y)
}

/// Draws onto an egui painter through a [`TransformStack`].
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    background: egui::Color32,
    transform: TransformStack,
}

impl<'a> PainterSurface<'a> {
    /// ### Parameters
    /// - `painter` - Painter clipped to the drawing area.
    /// - `base` - Maps surface coordinates to screen coordinates.
    /// - `background` - Fill colour used by `clear`.
    pub fn new(painter: &'a egui::Painter, base: Affine2, background: egui::Color32) -> Self {
        Self {
            painter,
            background,
            transform: TransformStack::new(base),
        }
    }

    /// Number of unmatched `save` calls.
    pub fn depth(&self) -> usize {
        self.transform.depth()
    }
}

impl DrawSurface for PainterSurface<'_> {
    fn clear(&mut self, min: Vec2, max: Vec2) {
        let rect = egui::Rect::from_two_pos(
            to_pos2(self.transform.apply(min)),
            to_pos2(self.transform.apply(max)),
        );
        self.painter.rect_filled(rect, 0.0, self.background);
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Hsl) {
        self.painter.circle_filled(
            to_pos2(self.transform.apply(center)),
            radius * self.transform.length_scale(),
            to_color32(color),
        );
    }

    fn save(&mut self) {
        self.transform.save();
    }

    fn restore(&mut self) {
        self.transform.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform.translate(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.transform.rotate(angle);
    }

    fn scale(&mut self, factor: Vec2) {
        self.transform.scale(factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn saved_transforms_do_not_compound() {
        let mut t = TransformStack::new(Affine2::IDENTITY);
        t.translate(Vec2::new(10.0, 0.0));

        t.save();
        t.rotate(FRAC_PI_2);
        assert!(close(t.apply(Vec2::new(1.0, 0.0)), Vec2::new(10.0, 1.0)));
        t.restore();

        t.save();
        t.scale(Vec2::new(1.0, -1.0));
        assert!(close(t.apply(Vec2::new(1.0, 2.0)), Vec2::new(11.0, -2.0)));
        t.restore();

        assert_eq!(t.depth(), 0);
        assert!(close(t.apply(Vec2::ZERO), Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn unmatched_restore_is_ignored() {
        let base = Affine2::from_translation(Vec2::new(3.0, 4.0));
        let mut t = TransformStack::new(base);
        t.restore();
        assert_eq!(t.depth(), 0);
        assert!(close(t.apply(Vec2::ZERO), Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn length_scale_ignores_rotation_and_mirroring() {
        let mut t = TransformStack::new(Affine2::from_scale(Vec2::splat(0.5)));
        t.rotate(1.234);
        t.scale(Vec2::new(1.0, -1.0));
        assert!((t.length_scale() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn hsl_maps_to_egui_color() {
        let c = to_color32(Hsl::new(120.0, 1.0, 0.5));
        assert_eq!(c, egui::Color32::from_rgb(0, 255, 0));
    }
}
