pub mod boards;
pub mod columns;
pub mod markers;
pub mod queries;
pub mod triggers;

pub use boards::{Board, BoardQuery, BoardQueryStyle, BoardStyle, Boards};
pub use columns::{Column, ColumnType, Columns};
pub use markers::{Marker, Markers};
pub use queries::{Queries, Query};
pub use triggers::{Trigger, TriggerRecipient, TriggerRecipientType, TriggerThreshold, TriggerThresholdOp, Triggers};
