use std::time::Duration;

use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points, Polygon};

use belt_sim::model::params::{FRICTION_RANGE, KP_RANGE, MASS_RANGE, TAU_MAX_RANGE, V_REF_RANGE};
use belt_sim::{
    simulate, BeltConstants, ControlParameters, StepSnapshot, DEFAULT_NUM_STEPS,
};

fn main() -> eframe::Result {
    env_logger::init();

    let app = BeltViz::new();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native("Conveyor Belt Climb", options, Box::new(|_| Ok(Box::new(app))))
}

struct BeltViz {
    constants: BeltConstants,
    params: ControlParameters,
    snapshots: Vec<StepSnapshot>,
    frame: usize,
    playing: bool,
    error: Option<String>,
}

impl BeltViz {
    fn new() -> Self {
        Self {
            constants: BeltConstants::default(),
            params: ControlParameters::default(),
            snapshots: Vec::new(),
            frame: 0,
            playing: false,
            error: None,
        }
    }

    /// One full run up front; playback is then paced frame by frame, so the
    /// physics never waits on the renderer.
    fn start(&mut self) {
        let params = self.params.clone().clamped();
        match simulate(&self.constants, &params, DEFAULT_NUM_STEPS) {
            Ok(snapshots) => {
                self.snapshots = snapshots;
                self.frame = 0;
                self.playing = true;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.playing = false;
            }
        }
    }

    fn current(&self) -> Option<&StepSnapshot> {
        if self.snapshots.is_empty() {
            None
        } else {
            Some(&self.snapshots[self.frame.min(self.snapshots.len() - 1)])
        }
    }

    /// Corners of the block glyph, centered on the contact point and
    /// aligned with the incline.
    fn block_corners(&self, snap: &StepSnapshot) -> Vec<[f64; 2]> {
        let (w, h) = (0.3, 0.25);
        let theta = self.constants.theta;
        let (cos_t, sin_t) = (theta.cos(), theta.sin());
        let center = snap.world;
        // Local frame: u along the belt, n normal to it.
        let corners = [
            (-w / 2.0, 0.0),
            (w / 2.0, 0.0),
            (w / 2.0, h),
            (-w / 2.0, h),
        ];
        corners
            .iter()
            .map(|(u, n)| {
                [
                    center.x + u * cos_t - n * sin_t,
                    center.y + u * sin_t + n * cos_t,
                ]
            })
            .collect()
    }
}

impl eframe::App for BeltViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let c = self.constants.clone();

        egui::SidePanel::left("params")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Parameters");
                ui.add_space(8.0);
                ui.add(egui::Slider::new(&mut self.params.mass, MASS_RANGE).text("Mass (kg)"));
                ui.add(
                    egui::Slider::new(&mut self.params.v_ref, V_REF_RANGE).text("Velocity (m/s)"),
                );
                ui.add(
                    egui::Slider::new(&mut self.params.friction, FRICTION_RANGE).text("Friction"),
                );
                ui.add(egui::Slider::new(&mut self.params.kp, KP_RANGE).text("KP"));
                ui.add(
                    egui::Slider::new(&mut self.params.tau_max, TAU_MAX_RANGE)
                        .text("Torque max (Nm)"),
                );
                ui.add_space(12.0);
                if ui.button("▶ Start simulation").clicked() {
                    self.start();
                }
                if let Some(err) = &self.error {
                    ui.colored_label(egui::Color32::RED, err);
                }
                ui.add_space(12.0);
                ui.separator();
                ui.label(format!(
                    "Belt: L = {:.1} m, θ = {:.1}°, R = {:.2} m, η = {:.1}",
                    c.length,
                    c.theta.to_degrees(),
                    c.drum_radius,
                    c.efficiency
                ));
            });

        egui::TopBottomPanel::bottom("readout").show(ctx, |ui| {
            match self.current() {
                Some(snap) => {
                    ui.horizontal(|ui| {
                        ui.strong(format!("Velocity: {:.2} m/s", snap.vel));
                        ui.separator();
                        ui.strong(format!("Torque: {:.1} Nm", snap.torque));
                        ui.separator();
                        ui.strong(format!("Power: {:.1} W", snap.power));
                        ui.separator();
                        ui.strong(format!("Position: {:.2} m", snap.pos));
                        ui.separator();
                        ui.label(format!("t = {:.2} s", snap.time));
                    });
                }
                None => {
                    ui.label("Press Start to run the simulation.");
                }
            };
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conveyor Belt Geometry");

            let snap = self.current().cloned();
            let block = snap.as_ref().map(|s| self.block_corners(s));

            Plot::new("scene")
                .data_aspect(1.0)
                .include_x(-0.8)
                .include_x(c.run + 1.0)
                .include_y(-0.8)
                .include_y(c.rise + 1.0)
                .show_axes([true, true])
                .show(ui, |plot_ui| {
                    // Floor and wall reference lines
                    let floor: PlotPoints = vec![[0.0, 0.0], [c.run, 0.0]].into();
                    plot_ui.line(Line::new("floor", floor).color(egui::Color32::DARK_GRAY));
                    let wall: PlotPoints = vec![[c.run, 0.0], [c.run, c.rise]].into();
                    plot_ui.line(Line::new("wall", wall).color(egui::Color32::DARK_GRAY));

                    // Belt surface
                    let belt: PlotPoints = vec![[0.0, 0.0], [c.run, c.rise]].into();
                    plot_ui.line(
                        Line::new("belt", belt)
                            .width(6.0)
                            .color(egui::Color32::LIGHT_GRAY),
                    );

                    // Drums at both ends
                    let drums: PlotPoints = vec![[0.0, 0.0], [c.run, c.rise]].into();
                    plot_ui.points(
                        Points::new("drums", drums)
                            .radius(10.0)
                            .color(egui::Color32::GRAY),
                    );

                    if let (Some(snap), Some(corners)) = (snap.as_ref(), block) {
                        // Block glyph
                        let poly: PlotPoints = corners.into();
                        plot_ui.polygon(
                            Polygon::new("block", poly).fill_color(egui::Color32::LIGHT_BLUE),
                        );

                        // Weight vector (straight down)
                        let (x, y) = (snap.world.x, snap.world.y);
                        let weight: PlotPoints = vec![[x, y], [x, y - 0.6]].into();
                        plot_ui.line(
                            Line::new("weight", weight)
                                .width(2.0)
                                .color(egui::Color32::RED),
                        );

                        // Velocity vector (up the slope, scaled)
                        let dir = c.incline_dir();
                        let scale = 0.5 * (snap.vel / self.params.v_ref.max(0.1)).min(2.0);
                        let vel: PlotPoints = vec![
                            [x, y],
                            [x + scale * dir.x, y + scale * dir.y],
                        ]
                        .into();
                        plot_ui.line(
                            Line::new("velocity", vel)
                                .width(2.0)
                                .color(egui::Color32::GREEN),
                        );
                    }
                });
        });

        // Playback pacing: one snapshot per repaint, dt of wall-clock apart.
        if self.playing {
            if self.frame + 1 < self.snapshots.len() {
                self.frame += 1;
                ctx.request_repaint_after(Duration::from_secs_f64(c.dt));
            } else {
                self.playing = false;
            }
        }
    }
}
