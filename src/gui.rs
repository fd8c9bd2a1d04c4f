//! Desktop dashboard built on eframe.
//!
//! The app owns the loaded table and the current [`DashboardQuery`]. Controls
//! mutate the query; at the start of each frame the view is rebuilt through
//! [`build_view`] if, and only if, the query changed since the last pass.

use crate::analytics::{
    DEFAULT_EXPORT_NAME, DashboardQuery, DashboardView, ProductionTable, ViewSettings, build_view,
    export_csv,
};
use eframe::egui;
use rfd::FileDialog;
use std::sync::Arc;

mod controls;
mod kpi_cards;
mod plots;

#[derive(Default)]
pub struct DashboardApp {
    /// Restored between sessions
    pub query: DashboardQuery,

    table: Arc<ProductionTable>,
    settings: ViewSettings,
    view: DashboardView,
    computed_for: Option<DashboardQuery>,
    status: String,
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        table: Arc<ProductionTable>,
        settings: ViewSettings,
    ) -> Self {
        crate::theme::apply_dashboard_theme(&cc.egui_ctx);

        let restored = cc
            .storage
            .and_then(|storage| eframe::get_value::<DashboardQuery>(storage, eframe::APP_KEY));

        let mut app = Self::with_table(table, settings);
        if let Some(query) = restored {
            app.query = sanitize_query(query, &app.table);
        }
        app
    }

    /// App over `table` with the default query (everything selected).
    pub fn with_table(table: Arc<ProductionTable>, settings: ViewSettings) -> Self {
        Self {
            query: DashboardQuery::all(&table),
            table,
            settings,
            ..Self::default()
        }
    }

    /// Rebuilds the view when the query changed.
    fn refresh(&mut self) {
        if self.computed_for.as_ref() == Some(&self.query) {
            return;
        }
        self.view = build_view(&self.table, &self.query, &self.settings);
        self.computed_for = Some(self.query.clone());
    }

    fn export_filtered(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("CSV File", &["csv"])
            .set_file_name(DEFAULT_EXPORT_NAME)
            .save_file()
        else {
            return;
        };

        match export_csv(&self.view.filtered, &path) {
            Ok(()) => {
                self.status = format!(
                    "Exported {} rows to {}",
                    self.view.filtered.len(),
                    path.display()
                );
            }
            Err(e) => {
                tracing::error!("Export to {} failed: {e}", path.display());
                self.status = format!("Export failed: {e}");
            }
        }
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        crate::theme::top_bar_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading(
                    egui::RichText::new("Nickel Production Intelligence Dashboard")
                        .size(24.0)
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&self.status).weak());
                });
            });
        });
    }

    fn render_no_data(ui: &mut egui::Ui) {
        crate::theme::card_frame(ui).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading("No data for the current selection");
            ui.label(
                egui::RichText::new(
                    "Select at least one country and a year range that contains production records.",
                )
                .weak(),
            );
        });
    }

    fn render_body(&mut self, ui: &mut egui::Ui) {
        if self.view.is_empty() {
            Self::render_no_data(ui);
            return;
        }

        kpi_cards::render_kpis(ui, &self.view.kpis);
        ui.add_space(crate::theme::SPACING_SMALL);

        if ui
            .button("Download Filtered Data")
            .on_hover_text("Save the filtered rows as CSV.")
            .clicked()
        {
            self.export_filtered();
        }
        ui.add_space(crate::theme::SPACING_MEDIUM);

        plots::render_trend(ui, &self.view);
        insight_label(ui, &self.view.insights.trend);

        plots::render_comparison(ui, &self.view.comparison);

        ui.add_space(crate::theme::SPACING_MEDIUM);
        ui.columns(2, |columns| {
            if let [left, right] = columns {
                plots::render_continent_bars(left, &self.view.continents);
                plots::render_continent_share(right, &self.view.continents);
            }
        });
        insight_label(ui, &self.view.insights.regional);

        plots::render_top_producers(ui, &self.view.top_producers);
        insight_label(ui, &self.view.insights.producers);
    }
}

fn insight_label(ui: &mut egui::Ui, text: &str) {
    ui.add_space(crate::theme::SPACING_SMALL);
    ui.label(egui::RichText::new("Insight:").strong());
    ui.label(text);
    ui.add_space(crate::theme::SPACING_LARGE);
}

/// Drops countries the table does not have and clamps years into its range.
fn sanitize_query(mut query: DashboardQuery, table: &ProductionTable) -> DashboardQuery {
    let known = table.countries();
    query
        .selection
        .countries
        .retain(|c| known.binary_search(c).is_ok());

    if let Some((lo, hi)) = table.year_bounds() {
        let (min, max) = query.selection.year_range();
        query.selection.year_min = min.clamp(lo, hi);
        query.selection.year_max = max.clamp(lo, hi);
    }
    query
}

impl eframe::App for DashboardApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.query);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh();

        egui::SidePanel::left("filters")
            .frame(crate::theme::sidebar_frame())
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                controls::render_sidebar(ui, &mut self.query, &self.table);
            });

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new())
            .show(ctx, |ui| self.render_header(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| self.render_body(ui));
        });
    }
}
