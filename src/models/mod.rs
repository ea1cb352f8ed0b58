pub mod config;
pub mod mechanics;
pub mod rubric;

pub use config::{LabzenConfig, MechanicsConfig, TallyConfig};
pub use mechanics::{CheckOutcome, CommitInfo, MechanicsReport, RemoteRepo};
pub use rubric::{
    Block, Category, DetailTable, Line, RubricEntry, SummaryKey, SummaryRow, SummaryTable,
    REQUIRED_WEIGHT,
};
