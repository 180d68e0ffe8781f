//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Social Harvester                                  ║
║     Instagram + TikTok post and media collector       ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(
    instagram_handles: &[String],
    tiktok_handles: &[String],
    output_dir: &str,
    posts_per_user: usize,
) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Instagram handles: {}", instagram_handles.join(", "));
    println!("  TikTok handles:    {}", tiktok_handles.join(", "));
    println!("  Output directory:  {}", output_dir);
    println!("  Posts per user:    {}", posts_per_user);
    println!();
}
