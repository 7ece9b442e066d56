use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// FFVB calendar sync
///
/// Fetches the published match calendar for every configured roster,
/// reconciles the scraped records into the matchup database and flags the
/// match closest to now as the next matchup per category.
///
/// Designed to run unattended from cron or a systemd timer; one invocation
/// is one complete sync pass.
#[derive(Parser, Debug)]
#[command(author = "AV92 Web Team", about, long_about = None, version)]
#[command(styles = get_styles())]
pub struct Args {
    /// Path to the config file. Defaults to the platform config directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Path to the matchup database. Overrides the config file setting.
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Path to a custom log file. Overrides the config file setting.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<String>,

    /// Fetch and parse every roster's calendar but skip all database writes.
    /// Useful for verifying the upstream page shape after federation changes.
    #[arg(long)]
    pub dry_run: bool,
}
