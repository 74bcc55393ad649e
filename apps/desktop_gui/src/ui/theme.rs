//! Neon terminal palette and the framed panels built on it.

use eframe::egui;

pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(5, 8, 6);
pub const PANEL: egui::Color32 = egui::Color32::from_rgb(10, 18, 12);
pub const NEON_GREEN: egui::Color32 = egui::Color32::from_rgb(0, 255, 136);
pub const NEON_CYAN: egui::Color32 = egui::Color32::from_rgb(0, 229, 255);
pub const NEON_MAGENTA: egui::Color32 = egui::Color32::from_rgb(255, 0, 170);
pub const DIM_TEXT: egui::Color32 = egui::Color32::from_rgb(70, 120, 90);

pub fn terminal_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(NEON_GREEN);
    visuals.window_fill = PANEL;
    visuals.panel_fill = BACKGROUND;
    visuals.extreme_bg_color = egui::Color32::from_rgb(2, 4, 3);
    visuals.faint_bg_color = PANEL;
    visuals.hyperlink_color = NEON_CYAN;
    visuals.selection.bg_fill = NEON_GREEN.gamma_multiply(0.35);
    visuals.selection.stroke = egui::Stroke::new(1.0, NEON_GREEN);
    visuals.window_corner_radius = egui::CornerRadius::same(2);
    visuals.menu_corner_radius = egui::CornerRadius::same(2);

    let stroke = egui::Stroke::new(1.0, NEON_GREEN.gamma_multiply(0.45));
    visuals.widgets.noninteractive.bg_stroke = stroke;
    visuals.widgets.inactive.bg_fill = PANEL;
    visuals.widgets.inactive.bg_stroke = stroke;
    visuals.widgets.hovered.bg_fill = NEON_GREEN.gamma_multiply(0.15);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, NEON_GREEN);
    visuals.widgets.active.bg_fill = NEON_GREEN.gamma_multiply(0.3);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(1.5, NEON_CYAN);
    visuals
}

pub fn monospace_styles(ctx: &egui::Context) {
    ctx.style_mut(|style| {
        for font in style.text_styles.values_mut() {
            font.family = egui::FontFamily::Monospace;
        }
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    });
}

/// Bordered window-like panel with a title bar, like a terminal tab.
pub fn terminal_frame(accent: egui::Color32) -> egui::Frame {
    egui::Frame::NONE
        .fill(PANEL)
        .stroke(egui::Stroke::new(1.0, accent))
        .corner_radius(4.0)
        .inner_margin(egui::Margin::symmetric(16, 14))
}

pub fn title_bar(ui: &mut egui::Ui, title: &str, accent: egui::Color32) {
    ui.horizontal(|ui| {
        for color in [NEON_MAGENTA, egui::Color32::YELLOW, NEON_GREEN] {
            ui.label(egui::RichText::new("●").color(color).size(11.0));
        }
        ui.add_space(6.0);
        ui.label(egui::RichText::new(title).color(accent).strong());
    });
    ui.separator();
}

pub fn badge(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
    egui::Frame::NONE
        .stroke(egui::Stroke::new(1.0, color))
        .corner_radius(2.0)
        .inner_margin(egui::Margin::symmetric(8, 3))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(color).size(12.0));
        });
}

/// Faint horizontal rules plus one brighter band that sweeps down the
/// screen as `offset` runs from 0 to `period`.
pub fn paint_scan_lines(painter: &egui::Painter, rect: egui::Rect, offset: u32, period: u32) {
    let faint = egui::Stroke::new(1.0, egui::Color32::from_black_alpha(60));
    let mut y = rect.top();
    while y < rect.bottom() {
        painter.hline(rect.x_range(), y, faint);
        y += 3.0;
    }

    let fraction = offset as f32 / period.max(1) as f32;
    let band_y = rect.top() + rect.height() * fraction;
    let band = egui::Rect::from_min_max(
        egui::pos2(rect.left(), band_y),
        egui::pos2(rect.right(), (band_y + 6.0).min(rect.bottom())),
    );
    painter.rect_filled(band, 0.0, NEON_GREEN.gamma_multiply(0.06));
}
