//! The dashboard page: aggregated charts, tables and summaries of the
//! user's transactions.

mod aggregation;
mod alerts;
mod cards;
mod charts;
mod handlers;
mod portfolio;
mod tables;

pub use handlers::{get_dashboard_content, get_dashboard_page};
