use crate::analytics::{ComparisonSeries, ContinentSummary, DashboardView};
use crate::utils::fmt_thousands;
use eframe::egui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot};

const PLOT_HEIGHT: f32 = 260.0;
const DONUT_SIZE: f32 = 200.0;

fn section_title(ui: &mut egui::Ui, title: &str) {
    ui.label(egui::RichText::new(title).size(16.0).strong());
    ui.add_space(4.0);
}

pub fn render_trend(ui: &mut egui::Ui, view: &DashboardView) {
    section_title(
        ui,
        &format!("Production Trend ({})", view.granularity.as_str()),
    );

    let line = Line::new("Production", view.series.plot_points())
        .color(crate::theme::ACCENT_COLOR)
        .width(2.0);

    Plot::new("plot_trend")
        .height(PLOT_HEIGHT)
        .x_axis_label(view.granularity.bucket_label())
        .y_axis_label("Production (tonnes)")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(line);
        });
}

pub fn render_comparison(ui: &mut egui::Ui, comparison: &ComparisonSeries) {
    section_title(
        ui,
        &format!("{} vs Global Production", comparison.focus_country),
    );

    if comparison.focus.is_empty() {
        ui.label(
            egui::RichText::new(format!(
                "{} is not part of the current selection.",
                comparison.focus_country
            ))
            .weak(),
        );
    }

    let global = Line::new("Global", comparison.global.plot_points())
        .color(crate::theme::ACCENT_COLOR)
        .width(2.0);
    let focus = Line::new(comparison.focus_country.clone(), comparison.focus.plot_points())
        .color(crate::theme::SECONDARY_COLOR)
        .width(2.0);

    Plot::new("plot_comparison")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Year")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(global);
            plot_ui.line(focus);
        });
}

pub fn render_continent_bars(ui: &mut egui::Ui, continents: &ContinentSummary) {
    section_title(ui, "Production by Continent");

    // One chart per continent so the legend names each bar
    let charts: Vec<BarChart> = continents
        .ranked()
        .into_iter()
        .enumerate()
        .map(|(i, (name, value))| {
            BarChart::new(name, vec![Bar::new(i as f64, value).width(0.7)])
                .color(crate::theme::series_color(i))
                .element_formatter(Box::new(|bar, _| fmt_thousands(bar.value)))
        })
        .collect();

    Plot::new("plot_continents")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .show_x(false)
        .allow_scroll(false)
        .allow_drag(false)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

pub fn render_continent_share(ui: &mut egui::Ui, continents: &ContinentSummary) {
    section_title(ui, "Continent Share");

    let ranked = continents.ranked();
    let total = continents.total();
    if ranked.is_empty() || total <= 0.0 {
        ui.label("—");
        return;
    }

    ui.horizontal(|ui| {
        render_donut(ui, &ranked, total);
        ui.vertical(|ui| {
            for (i, (name, _)) in ranked.iter().enumerate() {
                ui.horizontal(|ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                    ui.painter()
                        .rect_filled(rect, 2.0, crate::theme::series_color(i));
                    ui.label(format!("{name} ({:.1}%)", continents.share_pct(name)));
                });
            }
        });
    });
}

fn render_donut(ui: &mut egui::Ui, slices: &[(String, f64)], total: f64) {
    let radius = DONUT_SIZE / 2.0;
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(DONUT_SIZE, DONUT_SIZE), egui::Sense::hover());
    let center = rect.center();
    let painter = ui.painter();

    let mut start_angle = -std::f32::consts::FRAC_PI_2;
    for (i, (_, value)) in slices.iter().enumerate() {
        let sweep_angle = (*value / total) as f32 * std::f32::consts::TAU;
        if sweep_angle < 0.001 {
            continue;
        }
        let end_angle = start_angle + sweep_angle;
        let color = crate::theme::series_color(i);

        let mut points = vec![center];
        let n_points = ((sweep_angle / (std::f32::consts::PI / 32.0)).ceil() as usize).max(3);
        for j in 0..=n_points {
            let angle = start_angle + (j as f32 / n_points as f32) * sweep_angle;
            points.push(center + egui::vec2(angle.cos(), angle.sin()) * radius);
        }

        // Slices over half a turn are not convex
        if sweep_angle > std::f32::consts::PI {
            painter.add(egui::Shape::mesh(fan_mesh(&points, color)));
        } else {
            painter.add(egui::Shape::convex_polygon(
                points,
                color,
                egui::Stroke::new(1.0, color.gamma_multiply(0.5)),
            ));
        }

        start_angle = end_angle;
    }

    painter.add(egui::Shape::circle_filled(
        center,
        radius * 0.5,
        ui.visuals().extreme_bg_color,
    ));

    response.on_hover_text(format!("Total: {}", fmt_thousands(total)));
}

/// Triangle fan around `points[0]`.
fn fan_mesh(points: &[egui::Pos2], color: egui::Color32) -> egui::Mesh {
    let mut mesh = egui::Mesh::default();
    for point in points {
        mesh.colored_vertex(*point, color);
    }
    for j in 1..points.len().saturating_sub(1) {
        mesh.add_triangle(0, j as u32, j as u32 + 1);
    }
    mesh
}

pub fn render_top_producers(ui: &mut egui::Ui, producers: &[(String, f64)]) {
    section_title(ui, &format!("Top {} Producing Countries", producers.len()));

    let Some(max_value) = producers.first().map(|(_, v)| *v as f32) else {
        ui.label("—");
        return;
    };
    let max_value = if max_value > 0.0 { max_value } else { 1.0 };
    let total: f64 = producers.iter().map(|(_, v)| v).sum();

    let row_height = 18.0;
    ui.vertical(|ui| {
        ui.spacing_mut().item_spacing.y = 4.0;
        for (label, value) in producers {
            let fraction = (*value as f32 / max_value).clamp(0.0, 1.0);

            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;

                ui.add_sized(
                    [120.0, row_height],
                    egui::Label::new(egui::RichText::new(label)).truncate(),
                );

                let value_width = 90.0;
                let bar_width = (ui.available_width() - value_width - 10.0).max(20.0);
                let (rect, response) =
                    ui.allocate_at_least(egui::vec2(bar_width, row_height), egui::Sense::hover());

                let painter = ui.painter();
                painter.rect_filled(rect, 2.0, ui.visuals().extreme_bg_color);
                let fill_width = fraction * rect.width();
                if fill_width > 0.0 {
                    let fill_rect =
                        egui::Rect::from_min_size(rect.min, egui::vec2(fill_width, rect.height()));
                    painter.rect_filled(fill_rect, 2.0, crate::theme::ACCENT_COLOR);
                }

                let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
                response.on_hover_text(format!("{label}: {} ({share:.1}%)", fmt_thousands(*value)));

                ui.add_sized(
                    [value_width, row_height],
                    egui::Label::new(egui::RichText::new(fmt_thousands(*value)).small().weak()),
                );
            });
        }
    });
}
