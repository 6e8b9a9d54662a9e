//! Shared UI components.

use eframe::egui::{self, Color32, CornerRadius, Margin, Response, RichText, Ui};
use egui_phosphor::regular::{AIRPLANE, CHECK, PROHIBIT, THERMOMETER};

use crate::models::DayType;

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const PRIMARY: Color32 = Color32::from_rgb(0x44, 0x72, 0xC4);

    pub const WORKING: Color32 = Color32::from_rgb(60, 150, 80);
    pub const VACATION: Color32 = Color32::from_rgb(200, 140, 30);
    pub const SICK: Color32 = Color32::from_rgb(200, 70, 70);
    pub const NON_WORKING: Color32 = Color32::from_rgb(110, 110, 110);
}

/// Cell color for a day status.
pub fn day_color(day_type: DayType) -> Color32 {
    match day_type {
        DayType::Working => colors::WORKING,
        DayType::Vacation => colors::VACATION,
        DayType::Sick => colors::SICK,
        DayType::NonWorking => colors::NON_WORKING,
    }
}

pub fn day_icon(day_type: DayType) -> &'static str {
    match day_type {
        DayType::Working => CHECK,
        DayType::Vacation => AIRPLANE,
        DayType::Sick => THERMOMETER,
        DayType::NonWorking => PROHIBIT,
    }
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Plain toolbar button.
pub fn styled_button(ui: &mut Ui, text: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(text).size(14.0)).min_size(egui::vec2(80.0, 28.0)))
}

/// Toolbar button with a leading phosphor icon.
pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    styled_button(ui, &format!("{icon} {text}"))
}

/// Filled button for the main action of a panel.
pub fn primary_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    let label = if icon.is_empty() {
        text.to_string()
    } else {
        format!("{icon} {text}")
    };

    ui.add(
        egui::Button::new(RichText::new(label).size(14.0).color(Color32::WHITE))
            .fill(colors::PRIMARY)
            .min_size(egui::vec2(100.0, 28.0)),
    )
}

/// Frameless icon button used in table rows.
pub fn action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(icon).size(16.0)).frame(false))
        .on_hover_text(tooltip)
}

pub fn danger_action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(icon).size(16.0).color(colors::ERROR)).frame(false))
        .on_hover_text(tooltip)
}

/// Rounded section frame used around tables.
pub fn section_frame(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .corner_radius(CornerRadius::same(8))
        .show(ui, add_contents);
}

/// Render a stat card with title, value, and subtitle.
pub fn stat_card(ui: &mut Ui, title: &str, value: &str, subtitle: &str) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(150.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).heading().strong());
                ui.label(RichText::new(subtitle).small().weak());
            });
        });
}

/// Legend chips for the four day types.
pub fn day_legend(ui: &mut Ui) {
    ui.horizontal(|ui| {
        for day_type in DayType::ALL {
            ui.label(RichText::new(format!("{} {}", day_icon(day_type), day_type.label())).color(day_color(day_type)));
            ui.add_space(8.0);
        }
    });
}
