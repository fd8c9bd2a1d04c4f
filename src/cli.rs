use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use nickel_dash::analytics::{
    DashboardQuery, DashboardView, Granularity, ProductionTable, Selection, ViewSettings,
    build_view, export_csv,
};
use nickel_dash::utils::{fmt_pct, fmt_thousands};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "nickel-dash",
    about = "Nickel mine production analytics. Runs the dashboard when no command is given."
)]
pub struct Cli {
    /// Production table to load. Overrides the config file.
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// JSON config file. Defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print KPIs, the production trend and insights for a selection
    Report {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Write the filtered rows to a CSV file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Country to include. Repeat for several; defaults to every country.
    #[arg(short, long = "country")]
    pub countries: Vec<String>,

    /// First year of the range. Defaults to the earliest year in the data.
    #[arg(long)]
    pub from: Option<i32>,

    /// Last year of the range. Defaults to the latest year in the data.
    #[arg(long)]
    pub to: Option<i32>,

    /// Time bucketing of the trend series
    #[arg(short, long, value_enum, default_value_t)]
    pub granularity: GranularityArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GranularityArg {
    #[default]
    Yearly,
    FiveYear,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Yearly => Self::Yearly,
            GranularityArg::FiveYear => Self::FiveYear,
        }
    }
}

impl FilterArgs {
    /// Unset filters fall back to the full extent of `table`.
    pub fn to_query(&self, table: &ProductionTable) -> DashboardQuery {
        let all = Selection::all(table);
        let selection = Selection {
            countries: if self.countries.is_empty() {
                all.countries
            } else {
                self.countries.iter().cloned().collect()
            },
            year_min: self.from.unwrap_or(all.year_min),
            year_max: self.to.unwrap_or(all.year_max),
        };
        DashboardQuery {
            selection,
            granularity: self.granularity.into(),
        }
    }
}

pub fn run_command(
    command: Commands,
    table: &ProductionTable,
    settings: &ViewSettings,
) -> Result<()> {
    match command {
        Commands::Report { filters } => {
            let view = build_view(table, &filters.to_query(table), settings);
            print!("{}", render_report(&view)?);
            Ok(())
        }
        Commands::Export { output, filters } => {
            let view = build_view(table, &filters.to_query(table), settings);
            export_csv(&view.filtered, &output)
                .with_context(|| format!("Failed to export to {}", output.display()))?;
            println!(
                "Exported {} rows to {}",
                view.filtered.len(),
                output.display()
            );
            Ok(())
        }
    }
}

/// Plain-text rendering of a view for the terminal.
pub fn render_report(view: &DashboardView) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    if view.is_empty() {
        out.push_str("No data for the current selection.\n");
        return Ok(out);
    }

    let kpis = &view.kpis;
    writeln!(out, "Rows:             {}", view.filtered.len())?;
    writeln!(out, "Total Production: {}", fmt_thousands(kpis.total))?;
    writeln!(out, "Top Country:      {}", kpis.top_country_label())?;
    writeln!(out, "Peak Year:        {}", kpis.peak_year_label())?;
    writeln!(out, "CAGR:             {}", fmt_pct(kpis.cagr_pct))?;
    writeln!(out, "10-Point Growth:  {}", fmt_pct(kpis.growth10_pct))?;

    writeln!(out, "\nProduction Trend ({})", view.granularity.as_str())?;
    writeln!(out, "  {:<8}{:>16}", view.granularity.bucket_label(), "Production")?;
    for point in view.series.points() {
        writeln!(out, "  {:<8}{:>16}", point.bucket, fmt_thousands(point.value))?;
    }

    writeln!(out, "\nProduction by Continent")?;
    for (continent, value) in view.continents.ranked() {
        writeln!(
            out,
            "  {continent:<16}{:>16} ({:.1}%)",
            fmt_thousands(value),
            view.continents.share_pct(&continent)
        )?;
    }

    writeln!(out, "\nTop Producers")?;
    for (rank, (country, value)) in view.top_producers.iter().enumerate() {
        writeln!(out, "  {:>2}. {country:<20}{:>16}", rank + 1, fmt_thousands(*value))?;
    }

    writeln!(out, "\nInsights")?;
    for text in [
        &view.insights.trend,
        &view.insights.regional,
        &view.insights.producers,
    ] {
        writeln!(out, "  {text}")?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use nickel_dash::analytics::ProductionRecord;

    fn table() -> ProductionTable {
        ProductionTable::new(vec![
            ProductionRecord::new("Indonesia", 2018, 100.0, "Asia"),
            ProductionRecord::new("Indonesia", 2019, 150.0, "Asia"),
            ProductionRecord::new("Indonesia", 2020, 200.0, "Asia"),
            ProductionRecord::new("Russia", 2019, 50.0, "Europe"),
        ])
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_report_filters() -> Result<()> {
        let cli = Cli::try_parse_from([
            "nickel-dash",
            "report",
            "--country",
            "Indonesia",
            "-c",
            "Russia",
            "--from",
            "2019",
            "--granularity",
            "five-year",
        ])?;
        let Some(Commands::Report { filters }) = cli.command else {
            anyhow::bail!("expected report command");
        };
        assert_eq!(filters.countries, ["Indonesia", "Russia"]);
        assert_eq!(filters.from, Some(2019));
        assert_eq!(filters.to, None);
        assert_eq!(filters.granularity, GranularityArg::FiveYear);
        Ok(())
    }

    #[test]
    fn test_no_command_launches_gui() -> Result<()> {
        let cli = Cli::try_parse_from(["nickel-dash", "--data", "other.csv"])?;
        assert!(cli.command.is_none());
        assert_eq!(cli.data, Some(PathBuf::from("other.csv")));
        Ok(())
    }

    #[test]
    fn test_unset_filters_cover_whole_table() {
        let query = FilterArgs::default().to_query(&table());
        assert_eq!(query.selection.countries.len(), 2);
        assert_eq!(query.selection.year_range(), (2018, 2020));
        assert_eq!(query.granularity, Granularity::Yearly);
    }

    #[test]
    fn test_report_lists_kpis() -> Result<()> {
        let filters = FilterArgs {
            countries: vec!["Indonesia".to_owned()],
            ..FilterArgs::default()
        };
        let table = table();
        let view = build_view(&table, &filters.to_query(&table), &ViewSettings::default());
        let report = render_report(&view)?;

        assert!(report.contains("Total Production: 450"));
        assert!(report.contains("Top Country:      Indonesia"));
        assert!(report.contains("CAGR:             41.42%"));
        assert!(report.contains("Asia"));
        assert!(!report.contains("Russia"));
        Ok(())
    }

    #[test]
    fn test_report_empty_selection() -> Result<()> {
        let filters = FilterArgs {
            countries: vec!["Atlantis".to_owned()],
            ..FilterArgs::default()
        };
        let table = table();
        let view = build_view(&table, &filters.to_query(&table), &ViewSettings::default());
        assert_eq!(render_report(&view)?, "No data for the current selection.\n");
        Ok(())
    }
}
