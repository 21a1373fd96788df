//! Domain types shared by the engine and the CLI

pub mod limits;
pub mod summary;
pub mod violation;

pub use limits::{LimitInput, LimitSet, RawLimits};
pub use summary::{ChartType, ReportSummary, SheetKind};
pub use violation::{Flag, Severity, ViolationRecord};
