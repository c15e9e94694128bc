//! Shareable command-line / environment configuration blocks, following the
//! `#[clap(flatten)]`-able convention used across the `influxdb_iox`
//! binary's subcommands.

pub mod query_planner;
