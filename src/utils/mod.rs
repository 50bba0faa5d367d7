//! Shared utilities for logging and progress reporting

pub mod logging;

pub use logging::{
    create_load_progress_bar, finish_progress_bar, log_operation_complete,
    log_operation_start, log_warning,
};
