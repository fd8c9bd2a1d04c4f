use crate::analytics::{DashboardQuery, Granularity, ProductionTable};
use eframe::egui;

const ABOUT_TEXT: &str = "Explore global nickel mine production by country, continent and \
period. Filters apply to every chart, KPI and export.";

pub fn render_sidebar(ui: &mut egui::Ui, query: &mut DashboardQuery, table: &ProductionTable) {
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.heading("About");
            ui.label(egui::RichText::new(ABOUT_TEXT).weak());
            ui.label(
                egui::RichText::new(format!("{} records loaded", table.len()))
                    .small()
                    .weak(),
            );
            ui.separator();

            render_granularity(ui, query);
            ui.add_space(crate::theme::SPACING_MEDIUM);

            render_year_range(ui, query, table);
            ui.add_space(crate::theme::SPACING_MEDIUM);

            render_countries(ui, query, table);
        });
}

fn render_granularity(ui: &mut egui::Ui, query: &mut DashboardQuery) {
    ui.label(egui::RichText::new("Time granularity").strong());
    egui::ComboBox::from_id_salt("granularity")
        .selected_text(query.granularity.as_str())
        .show_ui(ui, |ui| {
            for granularity in Granularity::ALL {
                ui.selectable_value(&mut query.granularity, granularity, granularity.as_str());
            }
        });
}

fn render_year_range(ui: &mut egui::Ui, query: &mut DashboardQuery, table: &ProductionTable) {
    ui.label(egui::RichText::new("Year range").strong());
    let Some((lo, hi)) = table.year_bounds() else {
        ui.label("—");
        return;
    };

    let selection = &mut query.selection;
    ui.add(egui::Slider::new(&mut selection.year_min, lo..=hi).text("From"));
    ui.add(egui::Slider::new(&mut selection.year_max, lo..=hi).text("To"));

    if selection.year_min > selection.year_max {
        ui.label(
            egui::RichText::new("Range reversed, years will be swapped")
                .small()
                .color(crate::theme::SECONDARY_COLOR),
        );
    }
}

fn render_countries(ui: &mut egui::Ui, query: &mut DashboardQuery, table: &ProductionTable) {
    let countries = table.countries();
    let selected = &mut query.selection.countries;

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!(
                "Countries ({}/{})",
                selected.len(),
                countries.len()
            ))
            .strong(),
        );
    });
    ui.horizontal(|ui| {
        if ui.small_button("Select all").clicked() {
            selected.extend(countries.iter().cloned());
        }
        if ui.small_button("Select none").clicked() {
            selected.clear();
        }
    });

    ui.add_space(4.0);
    for country in &countries {
        let mut checked = selected.contains(country);
        if ui.checkbox(&mut checked, country).changed() {
            if checked {
                selected.insert(country.clone());
            } else {
                selected.remove(country);
            }
        }
    }
}
