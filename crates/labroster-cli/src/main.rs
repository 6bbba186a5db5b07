//! `labroster` binary.
//!
//! Reads `labroster.toml` (or the path given with `--config`) and
//! `LABROSTER_*` environment variables, then runs one command.
//!
//! # Usage
//!
//! ```
//! labroster status list --locale fr
//! labroster status show phd_student --gender female --former
//! labroster interval --since 2021-07-01 --until 2022-07-01 --at 2022-08-01
//! labroster roster team.json --from-year 2020
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use labroster_cli::{Roster, Settings, render};
use labroster_core::{gender::Gender, interval::Interval, status::MemberStatus};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Laboratory member records")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "labroster.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Inspect member statuses.
  #[command(subcommand)]
  Status(StatusCommand),

  /// Temporal state and day count of a date interval.
  Interval {
    /// First day, inclusive (YYYY-MM-DD). Open when omitted.
    #[arg(long)]
    since: Option<NaiveDate>,
    /// Last day, inclusive (YYYY-MM-DD). Open when omitted.
    #[arg(long)]
    until: Option<NaiveDate>,
    /// Reference date; today when omitted.
    #[arg(long)]
    at:    Option<NaiveDate>,
    /// Year to count days in; the year of the reference date when omitted.
    #[arg(long)]
    year:  Option<i32>,
  },

  /// Summarise a JSON roster: recent memberships and members per year.
  Roster {
    #[arg(value_name = "FILE")]
    path:      PathBuf,
    #[arg(long)]
    from_year: Option<i32>,
    #[arg(long)]
    to_year:   Option<i32>,
    #[arg(long)]
    locale:    Option<String>,
  },
}

#[derive(Subcommand, Debug)]
enum StatusCommand {
  /// One line per status.
  List {
    #[arg(long)]
    locale: Option<String>,
  },
  /// Every attribute of one status.
  Show {
    /// Status name, in any case (e.g. `phd_student`).
    name:   String,
    #[arg(long)]
    gender: Option<String>,
    /// Use the label of a former member.
    #[arg(long)]
    former: bool,
    #[arg(long)]
    locale: Option<String>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;
  tracing::debug!(?settings, "loaded settings");

  let output = match cli.command {
    Command::Status(StatusCommand::List { locale }) => {
      let catalog = settings.catalog()?;
      render::status_table(&catalog, &settings.locale(locale.as_deref()))
    }
    Command::Status(StatusCommand::Show {
      name,
      gender,
      former,
      locale,
    }) => {
      let status = MemberStatus::from_str_ci(&name)?;
      let gender = gender
        .map(|g| g.parse::<Gender>())
        .transpose()
        .context("invalid --gender")?;
      let catalog = settings.catalog()?;
      render::status_details(
        status,
        &catalog,
        gender,
        former,
        &settings.locale(locale.as_deref()),
      )
    }
    Command::Interval {
      since,
      until,
      at,
      year,
    } => {
      let at = at.unwrap_or_else(|| settings.today());
      render::interval_report(
        Interval::new(since, until),
        at,
        year.unwrap_or(at.year()),
      )
    }
    Command::Roster {
      path,
      from_year,
      to_year,
      locale,
    } => {
      let roster = Roster::load(&path)?;
      let catalog = settings.catalog()?;
      tracing::info!(
        persons = roster.persons.len(),
        path = %path.display(),
        "summarising roster"
      );
      render::roster_report(
        &roster,
        &catalog,
        &settings.locale(locale.as_deref()),
        settings.today(),
        from_year,
        to_year,
      )
    }
  };

  println!("{output}");
  Ok(())
}
