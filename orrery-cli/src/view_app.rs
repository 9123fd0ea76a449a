//! Interactive viewer for orrery simulations
//!
//! Renders a top-down (XZ) projection of the current snapshot and drives
//! the simulation with the real frame interval. When started from a
//! scenario file the file is watched and reloaded on change.

use eframe::egui;
use notify::{Event, RecommendedWatcher, Watcher};
use orrery_core::{Preset, Simulation};
use std::path::PathBuf;
use std::sync::mpsc;

/// Half-width of the visible world square
const WORLD_EXTENT: f32 = 100.0;
const GRID_SEGMENTS: usize = 40;
const RANDOM_BODY_MASS: f64 = 5.0;

/// Where the initial bodies come from
#[derive(Debug, Clone)]
pub enum Source {
    Scenario(PathBuf),
    Preset { preset: Preset, seed: u64 },
}

pub struct ViewApp {
    source: Source,
    sim: Option<Simulation>,
    last_load_error: Option<String>,
    show_curvature: bool,
    gravity_multiplier: f64,
    speed_multiplier: f64,
    merges_seen: usize,
    random_seed: u64,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl ViewApp {
    pub fn new(source: Source, _cc: &eframe::CreationContext<'_>) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .ok();

        if let (Some(w), Source::Scenario(path)) = (watcher.as_mut(), &source) {
            if let Err(e) = w.watch(path, notify::RecursiveMode::NonRecursive) {
                log::warn!("not watching {}: {}", path.display(), e);
            }
        }

        let mut app = Self {
            source,
            sim: None,
            last_load_error: None,
            show_curvature: true,
            gravity_multiplier: 1.0,
            speed_multiplier: 1.0,
            merges_seen: 0,
            random_seed: 1,
            file_watcher: watcher,
            file_receiver: rx,
        };
        app.reload();
        app
    }

    fn reload(&mut self) {
        match crate::load(&self.source) {
            Ok(sim) => {
                self.gravity_multiplier = sim.params().gravity_multiplier;
                self.speed_multiplier = sim.params().speed_multiplier;
                self.merges_seen = 0;
                self.sim = Some(sim);
                self.last_load_error = None;
            }
            Err(e) => {
                log::error!("reload failed: {}", e);
                self.last_load_error = Some(e.to_string());
                self.sim = None;
            }
        }
    }

    fn check_file_changes(&mut self) {
        let mut needs_reload = false;
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    ..
                }) => needs_reload = true,
                Ok(_) => {}
                Err(e) => log::warn!("file watcher error: {}", e),
            }
        }
        if needs_reload {
            log::info!("scenario changed, reloading");
            self.reload();
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let paused = self.sim.as_ref().map_or(true, Simulation::is_paused);
            if ui.button(if paused { "▶ Play" } else { "⏸ Pause" }).clicked() {
                if let Some(sim) = self.sim.as_mut() {
                    sim.set_paused(!paused);
                }
            }

            if ui.button("⏮ Reset").clicked() {
                self.reload();
            }

            if ui.button("⏭ Step").clicked() {
                if let Some(sim) = self.sim.as_mut() {
                    self.merges_seen += sim.step_once().merges.len();
                }
            }

            if ui.button("＋ Body").clicked() {
                if let Some(sim) = self.sim.as_mut() {
                    if let Err(e) = sim.add_random_body(RANDOM_BODY_MASS, self.random_seed) {
                        log::warn!("could not add body: {}", e);
                    }
                    self.random_seed += 1;
                }
            }

            ui.separator();

            ui.label("Gravity:");
            let gravity = ui.add(egui::Slider::new(&mut self.gravity_multiplier, 0.1..=5.0));
            ui.label("Speed:");
            let speed = ui.add(egui::Slider::new(&mut self.speed_multiplier, 0.1..=10.0));
            if let Some(sim) = self.sim.as_mut() {
                if gravity.changed() {
                    if let Err(e) = sim.set_gravity_multiplier(self.gravity_multiplier) {
                        log::warn!("gravity not changed: {}", e);
                    }
                }
                if speed.changed() {
                    if let Err(e) = sim.set_speed_multiplier(self.speed_multiplier) {
                        log::warn!("speed not changed: {}", e);
                    }
                }
            }

            ui.checkbox(&mut self.show_curvature, "Curvature");

            ui.separator();

            if let Some(sim) = &self.sim {
                let report = sim.diagnostics();
                ui.label(format!(
                    "t = {:.1}  bodies: {}  merges: {}  KE: {:.0}",
                    sim.elapsed(),
                    report.body_count,
                    self.merges_seen,
                    report.kinetic_energy
                ));
            }
        });
    }

    fn draw(&self, ui: &mut egui::Ui) {
        let Some(sim) = &self.sim else {
            return;
        };
        let rect = ui.max_rect();
        let painter = ui.painter();
        let center = rect.center();
        let scale = rect.width().min(rect.height()) / (2.0 * WORLD_EXTENT) * 0.95;
        let to_screen = |x: f64, z: f64| center + egui::vec2(x as f32 * scale, z as f32 * scale);

        if self.show_curvature {
            let grid = sim.curvature_grid(2.0 * WORLD_EXTENT as f64, GRID_SEGMENTS);
            let deepest = grid.min_height().min(-1e-9);
            for row in 0..grid.side() {
                for col in 0..grid.side() {
                    let (x, z) = grid.coords(row, col);
                    let depth = grid.height(row, col).unwrap_or(0.0) / deepest;
                    let shade = (40.0 + 180.0 * depth.clamp(0.0, 1.0)) as u8;
                    painter.circle_filled(
                        to_screen(x, z),
                        1.5,
                        egui::Color32::from_rgb(shade / 3, shade / 2, shade),
                    );
                }
            }
        }

        let redshifts = sim.redshifts();
        for (body, (_, z)) in sim.snapshot().iter().zip(redshifts) {
            let pos = to_screen(body.position.x, body.position.z);
            let radius = (body.radius as f32 * scale).max(2.0);

            // Lerp toward orange-red with increasing redshift
            let t = z.clamp(0.0, 1.0) as f32 * 0.7;
            let lerp = |a: f32, b: f32| (a + (b - a) * t) as u8;
            let color = egui::Color32::from_rgb(
                lerp(79.0, 255.0),
                lerp(195.0, 51.0),
                lerp(247.0, 0.0),
            );

            painter.circle_filled(pos, radius, color);
            painter.text(
                pos + egui::vec2(0.0, radius + 8.0),
                egui::Align2::CENTER_TOP,
                format!("{} m={:.0}", body.id, body.mass),
                egui::FontId::proportional(11.0),
                egui::Color32::GRAY,
            );
        }
    }
}

impl eframe::App for ViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::from_rgb(5, 5, 16)))
            .show(ctx, |ui| self.draw(ui));

        if let Some(ref error) = self.last_load_error {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.label(egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED));
            });
        }

        // The simulation clamps long frames itself
        let frame_dt = ctx.input(|i| i.stable_dt) as f64;
        if let Some(sim) = self.sim.as_mut() {
            let report = sim.advance(frame_dt);
            self.merges_seen += report.merges.len();
            if !sim.is_paused() {
                ctx.request_repaint();
            }
        }
    }
}
