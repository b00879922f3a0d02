use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cardsplit_core::{parse_document, GlobalSettings, StrategyKind};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "cardsplit")]
#[command(about = "Split a Markdown document into flashcards and print them as JSON")]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Global settings JSON file (plugin defaults when omitted)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Parser strategy, e.g. section-subsection or regex
    #[arg(long)]
    strategy: Option<String>,

    /// Heading level used by the heading strategies
    #[arg(long)]
    heading: Option<i64>,

    /// Enable a named regex preset
    #[arg(long)]
    preset: Option<String>,

    /// Keep cards with a single field
    #[arg(long)]
    single: bool,

    /// Insert the HTML break marker between lines of a field
    #[arg(long)]
    html: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    /// Fold command-line flags over the loaded settings.
    fn apply(&self, settings: &mut GlobalSettings) -> Result<()> {
        if let Some(name) = &self.strategy {
            settings.strategy = name.parse::<StrategyKind>()?;
        }
        if let Some(level) = self.heading {
            settings.heading_level = level;
        }
        if let Some(alias) = &self.preset {
            anyhow::ensure!(settings.enable_preset(alias), "no regex preset named {alias:?}");
        }
        if self.single {
            settings.allow_single_field = true;
        }
        if self.html {
            settings.html_break = true;
        }
        Ok(())
    }
}

fn load_settings(path: Option<&Path>) -> Result<GlobalSettings> {
    let Some(path) = path else {
        return Ok(GlobalSettings::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading settings {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing settings {}", path.display()))
}

fn run(cli: &Cli) -> Result<String> {
    let mut settings = load_settings(cli.settings.as_deref())?;
    cli.apply(&mut settings)?;

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let document = parse_document(&text, &settings)
        .with_context(|| format!("parsing {}", cli.input.display()))?;
    tracing::info!(
        file = %cli.input.display(),
        cards = document.cards.len(),
        deck = %document.deck,
        "parsed document"
    );

    let json = if cli.pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(json)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let output = run(&cli)?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("cardsplit").chain(args.iter().copied()))
    }

    #[test]
    fn flags_override_settings() {
        let mut settings = GlobalSettings::default();
        cli(&["notes.md", "--strategy", "Heading-Paragraph", "--heading", "3", "--single", "--html"])
            .apply(&mut settings)
            .unwrap();
        assert_eq!(settings.strategy, StrategyKind::HeadingParagraph);
        assert_eq!(settings.heading_level, 3);
        assert!(settings.allow_single_field);
        assert!(settings.html_break);
    }

    #[test]
    fn no_flags_leave_settings_alone() {
        let mut settings = GlobalSettings::default();
        cli(&["notes.md"]).apply(&mut settings).unwrap();
        assert_eq!(settings, GlobalSettings::default());
    }

    #[test]
    fn unknown_strategy_flag_fails() {
        let mut settings = GlobalSettings::default();
        let err = cli(&["notes.md", "--strategy", "outline"])
            .apply(&mut settings)
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown parser strategy: outline");
    }

    #[test]
    fn preset_flag_enables_preset() {
        let mut settings = GlobalSettings::default();
        cli(&["notes.md", "--preset", "Single line separated by ::"])
            .apply(&mut settings)
            .unwrap();
        assert_eq!(
            settings.active_preset().map(|preset| preset.alias.as_str()),
            Some("Single line separated by ::")
        );
        assert!(cli(&["notes.md", "--preset", "missing"]).apply(&mut settings).is_err());
    }

    #[test]
    fn missing_settings_file_defaults() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings, GlobalSettings::default());
    }

    #[test]
    fn run_reports_missing_input() {
        let err = run(&cli(&["/nonexistent/cardsplit-input.md"])).unwrap_err();
        assert!(err.to_string().starts_with("reading /nonexistent/cardsplit-input.md"));
    }
}
