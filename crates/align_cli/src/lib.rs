//! Host-side glue for the alignment search: prompting, config loading,
//! terminal display and CSV export.

pub mod config;
pub mod display;
pub mod export;
pub mod logging;
pub mod prompt;

pub use config::{load_config, ConfigOverrides};
pub use display::{downsample, render_report};
pub use export::{write_csv, write_csv_to};
