use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use fx_core::{
    headless::{portfolio_document, HeadlessHost, HeadlessPage, DEFAULT_SEED},
    load_settings,
    navigation::ACTIVE_CLASS,
    stats::{count_up_frames, COUNTER_TARGETS},
    typing::{timeline, TypingTiming, TYPING_TARGET},
    Dom, Settings,
};
use serde::Serialize;
use shared::event::PageEvent;
use storage::{FilePreferences, MemoryPreferences, PreferenceStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "portfolio-tools", about = "Drive the portfolio effects headlessly")]
struct Cli {
    /// TOML settings file; missing files fall back to defaults.
    #[arg(long, default_value = "portfolio.toml")]
    settings: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Boot the sample page, apply the requested interactions and report the result.
    Simulate {
        #[arg(long, default_value_t = 3000)]
        millis: u64,
        /// Scroll positions visited in order before time advances.
        #[arg(long, value_delimiter = ',')]
        scroll: Vec<f64>,
        #[arg(long)]
        toggle_theme: bool,
        #[arg(long)]
        reveal_stats: bool,
        #[arg(long)]
        submit: bool,
        /// JSON file backing the theme preference.
        #[arg(long)]
        prefs: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Write the report here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the typing effect's text over time.
    Typing {
        #[arg(long, default_value_t = 6000)]
        millis: u64,
    },
    /// Print every frame a statistic counter shows.
    Counter {
        text: String,
        #[arg(long)]
        steps: Option<u32>,
    },
    /// Print the effective settings.
    Config {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    elapsed_ms: u64,
    tasks_run: usize,
    pending_tasks: usize,
    theme: Option<String>,
    active_link: Option<String>,
    menu_open: bool,
    subtitle: String,
    counters: Vec<String>,
    notifications: usize,
    particles: usize,
    cursor: bool,
}

#[derive(Debug)]
struct Interactions {
    millis: u64,
    scroll: Vec<f64>,
    toggle_theme: bool,
    reveal_stats: bool,
    submit: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(&cli.settings);
    settings
        .validate()
        .with_context(|| format!("invalid settings from {}", cli.settings.display()))?;

    match cli.command {
        Command::Simulate {
            millis,
            scroll,
            toggle_theme,
            reveal_stats,
            submit,
            prefs,
            seed,
            out,
        } => {
            let interactions = Interactions {
                millis,
                scroll,
                toggle_theme,
                reveal_stats,
                submit,
            };
            let report = match prefs {
                Some(path) => {
                    let prefs = FilePreferences::open(&path)
                        .with_context(|| format!("opening preferences {}", path.display()))?;
                    simulate(settings, prefs, seed, &interactions)
                }
                None => simulate(settings, MemoryPreferences::new(), seed, &interactions),
            };
            let rendered = serde_json::to_string_pretty(&report)?;
            match out {
                Some(path) => write_report(&path, &rendered).await?,
                None => println!("{rendered}"),
            }
        }
        Command::Typing { millis } => {
            let timing = TypingTiming::from_settings(&settings);
            for (at, text) in timeline(&settings.typing_phrases, &timing, Duration::from_millis(millis)) {
                println!("{:>6} {text}", at.as_millis());
            }
        }
        Command::Counter { text, steps } => {
            let frames = count_up_frames(&text, steps.unwrap_or(settings.counter_steps));
            if frames.is_empty() {
                bail!("'{text}' has no digits to count");
            }
            for frame in frames {
                println!("{frame}");
            }
        }
        Command::Config { json } => {
            let rendered = if json {
                serde_json::to_string_pretty(&settings)?
            } else {
                toml::to_string_pretty(&settings)?
            };
            println!("{rendered}");
        }
    }

    Ok(())
}

fn simulate<P: PreferenceStore>(
    settings: Settings,
    prefs: P,
    seed: u64,
    interactions: &Interactions,
) -> SimulationReport {
    let host = HeadlessHost::with_prefs(portfolio_document(), prefs, seed);
    let mut page = HeadlessPage::with_host(host, settings);
    page.boot();

    if interactions.toggle_theme {
        if let Some(toggle) = page.dom().find("#theme-toggle") {
            page.click(toggle);
        }
    }
    for scroll_y in &interactions.scroll {
        page.scroll_to(*scroll_y);
    }
    if interactions.reveal_stats {
        for counter in page.dom().find_all(COUNTER_TARGETS) {
            page.reveal(counter);
        }
    }
    if interactions.submit {
        if let Some(form) = page.dom().find(".contact-form") {
            page.dispatch(PageEvent::Submit { form });
        }
    }

    let tasks_run = page.advance_ms(interactions.millis);
    info!(tasks_run, elapsed_ms = interactions.millis, "simulation finished");
    report(&page, interactions.millis, tasks_run)
}

fn report<P: PreferenceStore>(page: &HeadlessPage<P>, elapsed_ms: u64, tasks_run: usize) -> SimulationReport {
    let dom = page.dom();
    let active_link = dom
        .find_all(".nav-link")
        .into_iter()
        .find(|link| dom.has_class(*link, ACTIVE_CLASS))
        .and_then(|link| dom.attribute(link, "href"));

    SimulationReport {
        elapsed_ms,
        tasks_run,
        pending_tasks: page.scheduler().pending(),
        theme: page.page().theme().map(|theme| theme.theme().to_string()),
        active_link,
        menu_open: page.page().navigation().is_some_and(|nav| nav.is_menu_open()),
        subtitle: dom.find(TYPING_TARGET).map(|node| dom.text(node)).unwrap_or_default(),
        counters: dom
            .find_all(COUNTER_TARGETS)
            .into_iter()
            .map(|node| dom.text(node))
            .collect(),
        notifications: dom.find_all(".notification").len(),
        particles: page.page().particles().map_or(0, |p| p.particles().len()),
        cursor: page.page().cursor().is_some(),
    }
}

async fn write_report(path: &Path, rendered: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    tokio::fs::write(path, rendered)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "report written");
    Ok(())
}
