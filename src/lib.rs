//! Typed client for the Honeycomb HTTP API.
//!
//! [`Client`] exposes one sub-client per collection (boards, triggers,
//! markers, columns, saved queries). Entities that carry queries embed a
//! [`QuerySpec`], which is validated client-side before anything is sent.
//!
//! ```no_run
//! use honeycombio::{Board, BoardQuery, Calculation, CalculationOp, Client, Config, QuerySpec};
//!
//! # async fn run() -> honeycombio::Result<()> {
//! let client = Client::new(Config::new("my-api-key"))?;
//!
//! let query = QuerySpec::new()
//!     .calculation(Calculation::on(CalculationOp::P99, "duration_ms"))
//!     .breakdown("service.name")
//!     .time_range(3600);
//!
//! let board = client
//!     .boards
//!     .create(&Board {
//!         name: "Latency".to_string(),
//!         queries: vec![BoardQuery::new("production", query)],
//!         ..Board::default()
//!     })
//!     .await?;
//! println!("created board {:?}", board.id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod resources;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::Client;
pub use config::Config;
pub use error::{Error, Result};
pub use query::{
    Calculation, CalculationOp, Filter, FilterCombination, FilterOp, FilterValue, Order, QuerySpec, SortOrder,
    UnknownToken, Validate, ValidationError,
};
pub use resources::{
    Board, BoardQuery, BoardQueryStyle, BoardStyle, Column, ColumnType, Marker, Query, Trigger, TriggerRecipient,
    TriggerRecipientType, TriggerThreshold, TriggerThresholdOp,
};
pub use transport::sanitize_dataset;
