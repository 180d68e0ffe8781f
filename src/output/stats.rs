//! Run summary reporting.

use console::style;

use crate::store::RunSummary;

/// Print the end-of-run summary.
pub fn print_run_summary(summary: &RunSummary) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Run summary:").bold());
    println!("  Total posts collected: {}", summary.total());
    println!("  Instagram: {} posts", summary.instagram);
    println!("  TikTok:    {} posts", summary.tiktok);
    println!("{}", style("═".repeat(50)).dim());
}
