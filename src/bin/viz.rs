use eframe::egui;
use egui_plot::{Legend, Line, Plot};

use rocket_1dof::config::SimConfig;
use rocket_1dof::motor::load_curve_or_default;
use rocket_1dof::sim::{self, Metrics, TimeSeries};

fn main() -> eframe::Result {
    let curve_path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    let config = SimConfig::default();
    let curve = load_curve_or_default(curve_path.as_deref());
    let result = sim::simulate(&config, &curve);

    let app = SimViz {
        metrics: result.metrics(),
        series: result.series,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 900.0]),
        ..Default::default()
    };
    eframe::run_native("1-DOF Rocket Flight", options, Box::new(|_| Ok(Box::new(app))))
}

struct SimViz {
    series: TimeSeries,
    metrics: Metrics,
}

impl SimViz {
    fn points(&self, column: &[f64], step: usize) -> Vec<[f64; 2]> {
        self.series
            .time
            .iter()
            .zip(column)
            .step_by(step)
            .map(|(&t, &y)| [t, y])
            .collect()
    }

    fn chart(&self, ui: &mut egui::Ui, id: &str, label: &str, column: &[f64], w: f32, h: f32) {
        let step = (self.series.len() / 2000).max(1);
        ui.vertical(|ui| {
            ui.label(label);
            let points = self.points(column, step);
            Plot::new(id)
                .width(w)
                .height(h)
                .x_axis_label("Time (s)")
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new(label, points));
                });
        });
    }
}

impl eframe::App for SimViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            let m = &self.metrics;
            let show = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |x| format!("{x:.2}"));
            ui.heading("Vertical flight");
            ui.label(format!(
                "MECO t={} s  |  Apogee {} m at t={} s  |  Touchdown t={} s  |  Vmax {} m/s",
                show(m.meco.t),
                show(m.apogee.h),
                show(m.apogee.t),
                show(m.touchdown.t),
                show(m.maxima.v_max),
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let third_h = available.y / 3.0 - 24.0;

            ui.horizontal(|ui| {
                self.chart(ui, "altitude", "Altitude (m)", &self.series.altitude, half_w, third_h);
                self.chart(ui, "velocity", "Velocity (m/s)", &self.series.velocity, half_w, third_h);
            });

            ui.horizontal(|ui| {
                self.chart(
                    ui,
                    "acceleration",
                    "Acceleration (m/s^2)",
                    &self.series.acceleration,
                    half_w,
                    third_h,
                );
                self.chart(ui, "mass", "Total mass (kg)", &self.series.mass, half_w, third_h);
            });

            // thrust, drag and weight share one chart
            ui.label("Forces (N)");
            let step = (self.series.len() / 2000).max(1);
            let thrust = self.points(&self.series.thrust, step);
            let drag = self.points(&self.series.drag, step);
            let weight = self.points(&self.series.weight, step);
            Plot::new("forces")
                .width(available.x - 8.0)
                .height(third_h)
                .x_axis_label("Time (s)")
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("Thrust", thrust));
                    plot_ui.line(Line::new("Drag", drag));
                    plot_ui.line(Line::new("Weight", weight));
                });
        });
    }
}
