//! Control panel for galaxy parameters and the highlight diameter.

use std::path::{Path, PathBuf};

use egui::{Response, Ui};
use glam::Vec3;

use crate::highlight::parse_neighbor_count;
use crate::params::{
    GalaxyParameters, ParamRange, BRANCHES_RANGE, COUNT_RANGE, RADIUS_RANGE, RANDOMNESS_POWER_RANGE,
    RANDOMNESS_RANGE, SIZE_RANGE, SPIN_RANGE,
};

/// What the panel asked for this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelResponse {
    /// A parameter finished changing; the cloud should be rebuilt.
    pub regenerate: bool,
}

/// Editable copy of the parameters plus the highlight settings.
pub struct ControlPanel {
    params: GalaxyParameters,
    /// Parameters of the cloud on screen.
    committed: GalaxyParameters,
    params_path: PathBuf,
    neighbors_text: String,
    neighbors: usize,
    /// A color picker changed and is waiting for the pointer to be released.
    color_pending: bool,
    status: Option<String>,
}

impl ControlPanel {
    pub fn new(params: GalaxyParameters, params_path: impl Into<PathBuf>) -> Self {
        Self {
            committed: params.clone(),
            params,
            params_path: params_path.into(),
            neighbors_text: String::new(),
            neighbors: 0,
            color_pending: false,
            status: None,
        }
    }

    pub fn params(&self) -> &GalaxyParameters {
        &self.params
    }

    /// Current K: how many neighbors a click recolors besides the anchor.
    pub fn neighbors(&self) -> usize {
        self.neighbors
    }

    pub fn params_path(&self) -> &Path {
        &self.params_path
    }

    /// Replace the "diameter" text and re-parse K from it.
    pub fn set_neighbors_text(&mut self, text: impl Into<String>) {
        self.neighbors_text = text.into();
        self.neighbors = parse_neighbor_count(&self.neighbors_text);
    }

    /// Write the current parameters to the configured path.
    pub fn save(&mut self) {
        self.status = Some(match self.params.save(&self.params_path) {
            Ok(()) => {
                log::info!("saved parameters to {}", self.params_path.display());
                format!("Saved {}", self.params_path.display())
            }
            Err(e) => {
                log::warn!("could not save {}: {}", self.params_path.display(), e);
                format!("Save failed: {e}")
            }
        });
    }

    /// Replace the parameters from the configured path.
    ///
    /// Returns true when new parameters were loaded.
    pub fn load(&mut self) -> bool {
        match GalaxyParameters::load(&self.params_path) {
            Ok(params) => {
                log::info!("loaded parameters from {}", self.params_path.display());
                self.params = params.clamped();
                self.status = Some(format!("Loaded {}", self.params_path.display()));
                true
            }
            Err(e) => {
                log::warn!("could not load {}: {}", self.params_path.display(), e);
                self.status = Some(format!("Load failed: {e}"));
                false
            }
        }
    }

    /// Accept the edited parameters if they differ from the cloud on screen.
    ///
    /// Returns true when the cloud needs rebuilding.
    pub fn commit(&mut self) -> bool {
        if self.params == self.committed {
            return false;
        }
        self.committed = self.params.clone();
        true
    }

    /// Draw the panel.
    pub fn show(&mut self, ctx: &egui::Context, point_count: usize) -> PanelResponse {
        let mut finished = false;

        egui::Window::new("Galaxy")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                finished |= self.parameter_controls(ui);

                ui.separator();
                ui.heading("Highlight");
                ui.horizontal(|ui| {
                    ui.label("diameter");
                    let edit = ui.add(
                        egui::TextEdit::singleline(&mut self.neighbors_text)
                            .hint_text("0")
                            .desired_width(80.0),
                    );
                    if edit.changed() {
                        self.neighbors = parse_neighbor_count(&self.neighbors_text);
                    }
                });
                let hint = format!("Click recolors the nearest point and {} more", self.neighbors);
                ui.label(egui::RichText::new(hint).small().weak());

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        self.save();
                    }
                    if ui.button("Load").clicked() {
                        finished |= self.load();
                    }
                    if ui.button("Reset").clicked() {
                        self.params = GalaxyParameters::default();
                        finished = true;
                    }
                });
                if let Some(status) = &self.status {
                    ui.label(egui::RichText::new(status).small().weak());
                }
                ui.label(egui::RichText::new(format!("{point_count} points")).small().weak());
            });

        PanelResponse {
            regenerate: finished && self.commit(),
        }
    }

    fn parameter_controls(&mut self, ui: &mut Ui) -> bool {
        let params = &mut self.params;
        let mut finished = false;

        finished |= edit_finished(&count_slider(ui, &mut params.count, &COUNT_RANGE, "count"));
        finished |= edit_finished(&param_slider(ui, &mut params.size, &SIZE_RANGE, "size"));
        finished |= edit_finished(&param_slider(ui, &mut params.radius, &RADIUS_RANGE, "radius"));
        finished |= edit_finished(&count_slider(
            ui,
            &mut params.branches,
            &BRANCHES_RANGE,
            "branches",
        ));
        finished |= edit_finished(&param_slider(ui, &mut params.spin, &SPIN_RANGE, "spin"));
        finished |= edit_finished(&param_slider(
            ui,
            &mut params.randomness,
            &RANDOMNESS_RANGE,
            "randomness",
        ));
        finished |= edit_finished(&param_slider(
            ui,
            &mut params.randomness_power,
            &RANDOMNESS_POWER_RANGE,
            "randomness power",
        ));

        let mut color_changed = false;
        ui.horizontal(|ui| {
            color_changed |= color_button(ui, &mut params.inside_color).changed();
            ui.label("inside color");
        });
        ui.horizontal(|ui| {
            color_changed |= color_button(ui, &mut params.outside_color).changed();
            ui.label("outside color");
        });

        // Color pickers change continuously while dragged; rebuild on release
        self.color_pending |= color_changed;
        if self.color_pending && !ui.input(|i| i.pointer.any_down()) {
            self.color_pending = false;
            finished = true;
        }

        finished
    }
}

/// Slider over a float range. Edits snap onto multiples of the step, so
/// values already on that grid are never rewritten by drawing the slider.
fn param_slider(ui: &mut Ui, value: &mut f32, range: &ParamRange, label: &str) -> Response {
    let response = ui.add(egui::Slider::new(value, range.min..=range.max).text(label));
    if response.changed() {
        *value = range.constrain(*value);
    }
    response
}

/// Slider over an integer range. Both integer ranges start on a multiple of
/// their step, so egui's grid from `min` matches `ParamRange::constrain`.
fn count_slider(ui: &mut Ui, value: &mut u32, range: &ParamRange, label: &str) -> Response {
    ui.add(
        egui::Slider::new(value, range.min as u32..=range.max as u32)
            .step_by(range.step as f64)
            .text(label),
    )
}

fn color_button(ui: &mut Ui, color: &mut Vec3) -> Response {
    let mut rgb = color.to_array();
    let response = ui.color_edit_button_rgb(&mut rgb);
    if response.changed() {
        *color = Vec3::from_array(rgb);
    }
    response
}

/// A widget may have finished an edit: drag released, focus left, or a
/// discrete change such as a click or arrow key. Whether anything actually
/// changed is decided by [`ControlPanel::commit`].
fn edit_finished(response: &Response) -> bool {
    response.drag_stopped()
        || response.lost_focus()
        || (response.changed() && !response.dragged())
}
