pub mod format;
pub mod logging;
pub mod paths;
pub mod progress;

pub use format::{format_bytes, format_duration, format_rate};
pub use logging::{init_logging, parse_level};
pub use paths::long_path;
pub use progress::{create_progress_bar, create_spinner};
