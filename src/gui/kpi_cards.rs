use crate::analytics::KpiSnapshot;
use crate::utils::{fmt_pct, fmt_thousands};
use eframe::egui;

pub fn render_kpis(ui: &mut egui::Ui, kpis: &KpiSnapshot) {
    let cards = [
        ("Total Production", fmt_thousands(kpis.total)),
        ("Top Producer", kpis.top_country_label().to_owned()),
        ("Peak Year", kpis.peak_year_label()),
        ("CAGR", fmt_pct(kpis.cagr_pct)),
        ("10Y Growth", fmt_pct(kpis.growth10_pct)),
    ];

    ui.columns(cards.len(), |columns| {
        for (column, (title, value)) in columns.iter_mut().zip(cards) {
            render_card(column, title, &value);
        }
    });
}

fn render_card(ui: &mut egui::Ui, title: &str, value: &str) {
    crate::theme::card_frame(ui).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(title).small().weak());
        ui.label(
            egui::RichText::new(value)
                .size(20.0)
                .strong()
                .color(crate::theme::ACCENT_COLOR),
        );
    });
}
