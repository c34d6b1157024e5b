//! Interactive DLA kaleidoscope built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the aggregation engine and
//! implements [`eframe::App`]. eframe plays the frame scheduler: every
//! `update` advances the engine by one walker, renders the cluster and
//! requests the next repaint.

use crate::surface::PainterSurface;
use dla_core::{
    config::Config,
    engine::{Advance, AggregationEngine},
    render::SymmetricRenderer,
};
use eframe::App;
use glam::{Affine2, Vec2};
use rand::{rng, rngs::ThreadRng};

/// Main application state for the viewer.
///
/// ### Fields
/// - `engine` - Simulation state and its random source.
/// - `renderer` - Stateless 12-fold painter configured from the engine's config.
/// - `last` - Outcome of the most recent `advance()` (for the status bar).
/// - `background` - Colour the canvas is cleared to every frame.
pub struct Viewer {
    engine: AggregationEngine<ThreadRng>,
    renderer: SymmetricRenderer,
    last: Advance,
    background: egui::Color32,
}

impl Viewer {
    /// Creates a viewer running [`Config::default`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// ### Panics
    /// If `cfg` is invalid, see [`AggregationEngine::new`].
    pub fn with_config(cfg: Config) -> Self {
        Self {
            engine: AggregationEngine::new(cfg, rng()),
            renderer: SymmetricRenderer::from_config(&cfg),
            last: Advance::Idle,
            background: egui::Color32::BLACK,
        }
    }

    /// Discards the cluster and starts a fresh run.
    fn reset(&mut self) {
        self.engine.reset();
        self.last = Advance::Idle;
    }

    /// Resolves one walker (or nothing, once the run is done).
    fn step_once(&mut self) {
        self.last = self.engine.advance();
    }

    /// Maps the canvas onto `rect` so the whole `2R × 2R` domain is visible.
    ///
    /// ### Returns
    /// `(base, viewport)`: the canvas-to-screen transform and the canvas
    /// size in canvas units. The viewport center lands on the rect center.
    fn canvas_transform(&self, rect: egui::Rect) -> (Affine2, Vec2) {
        let domain = 2.0 * self.engine.config().half_width;
        let fit = (rect.width().min(rect.height()) / domain).max(f32::EPSILON);

        let base = Affine2::from_translation(Vec2::new(rect.min.x, rect.min.y))
            * Affine2::from_scale(Vec2::splat(fit));
        let viewport = Vec2::new(rect.width(), rect.height()) / fit;
        (base, viewport)
    }

    fn last_steps(&self) -> Option<usize> {
        match self.last {
            Advance::Idle => None,
            Advance::Deposited { steps, .. }
            | Advance::Terminated { steps }
            | Advance::Walking { steps } => Some(steps),
        }
    }

    /// Builds the top panel with the reset control.
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Reset").clicked() {
                    self.reset();
                }
            });
        });
    }

    /// Builds the bottom status bar.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        let target = self.engine.config().target;
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.engine.is_done() {
                    ui.label("done");
                    ui.separator();
                }
                if let Some(steps) = self.last_steps() {
                    ui.label(format!("last walk = {steps} steps"));
                }
                ui.label(format!(
                    "radius = {:.1}",
                    self.engine.cluster().max_radius(target)
                ));
                ui.label(format!("particles = {}", self.engine.cluster().len()));
            });
        });
    }

    /// Draws the kaleidoscope into the central panel.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, _response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
                let painter = ui.painter_at(rect);

                let (base, viewport) = self.canvas_transform(rect);
                let mut surface = PainterSurface::new(&painter, base, self.background);
                self.renderer
                    .render(self.engine.cluster(), &mut surface, viewport);
                debug_assert_eq!(surface.depth(), 0, "unbalanced save/restore");
            });
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

impl App for Viewer {
    /// eframe callback, run once per frame.
    ///
    /// Advances the engine, builds the panels, then schedules the next
    /// frame so the animation keeps running without input events.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.step_once();

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);

        ctx.request_repaint();
    }
}
