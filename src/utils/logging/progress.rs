//! Progress reporting for the table loading phase, using the indicatif crate.

use indicatif::{ProgressBar, ProgressStyle};

/// Default style for the table loading progress bar
pub const DEFAULT_LOAD_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} tables {msg}";

/// Create the progress bar ticked once per loaded source table
///
/// # Arguments
/// * `tables` - Number of tables that will be loaded
/// * `description` - Optional description to display as the initial message
#[must_use]
pub fn create_load_progress_bar(tables: u64, description: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(tables);
    let style = ProgressStyle::default_bar()
        .template(DEFAULT_LOAD_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);

    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }

    pb
}

/// Finish a progress bar with a completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish();
    }
}
