pub mod logger;
pub mod streams;

pub use logger::{init_logger, LogContext, Stopwatch};
