//! # Nickel Dash - Nickel Production Analytics
//!
//! Loads a table of annual nickel mine production per country, tags each row
//! with its continent and answers dashboard queries over it: filtered subsets,
//! yearly or five-year trends, continent and country rankings, KPIs and short
//! narrative insights. The same pipeline feeds the desktop dashboard and the
//! headless `report` / `export` commands.
//!
//! ## Quick Start
//!
//! ```no_run
//! use nickel_dash::analytics::{
//!     ContinentClassifier, DashboardQuery, DatasetSource, ViewSettings, build_view, load,
//! };
//!
//! # fn example() -> nickel_dash::error::Result<()> {
//! let source = DatasetSource::new("production-of-nickel-mine.csv");
//! let table = load(&source, &ContinentClassifier::default())?;
//!
//! let view = build_view(&table, &DashboardQuery::all(&table), &ViewSettings::default());
//! println!("Total production: {}", view.kpis.total);
//! println!("Top country: {}", view.kpis.top_country_label());
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`analytics`]: Loading, filtering, aggregation, KPIs and insights
//! - [`config`]: JSON configuration with defaults
//! - [`error`]: Error types and handling utilities
//! - [`gui`]: eframe dashboard
//! - [`logging`]: Console and rolling-file tracing setup
//! - [`theme`]: Colours and frames shared by the dashboard panels
//! - [`utils`]: Number formatting

#![warn(clippy::all, rust_2018_idioms)]

pub mod analytics;
pub mod config;
pub mod error;
pub mod gui;
pub mod logging;
pub mod theme;
pub mod utils;
