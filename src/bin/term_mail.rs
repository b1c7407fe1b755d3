use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env, Target};
use log::{info, warn};

use term_mail::config::{Config, Credentials, load_config};
use term_mail::domain::email::LabelMap;
use term_mail::mail::sync::synchronize;
use term_mail::provider::MailProvider;
use term_mail::provider::nylas::NylasClient;
use term_mail::terminal::run_tui;

#[derive(Parser)]
#[command(name = "term_mail")]
#[command(about = "Terminal email client for a hosted mail API", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Run the interactive client (default)
    Tui,
    /// Print the latest inbox rows and exit
    List,
    /// Print the provider's labels and exit
    Labels,
}

fn init_logging(cfg: &Config, cmd: Command) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("term_mail=info"));
    if cmd == Command::Tui {
        // Anything written to stderr would tear the alternate screen.
        let path = cfg.log_path()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

/// Fill the environment from `./.env` when present. Existing variables win.
fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => info!("loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("ignoring .env: {e}"),
    }
}

fn load_labels(provider: &dyn MailProvider) -> Result<LabelMap> {
    let labels = provider.list_labels().context("loading labels")?;
    Ok(LabelMap::from_labels(&labels))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cmd = cli.cmd.unwrap_or(Command::Tui);

    let cfg = load_config(cli.config.as_deref())?;
    init_logging(&cfg, cmd)?;

    load_dotenv();
    let creds = Credentials::from_env()?;
    info!("starting with {creds:?} against {}", cfg.api_url());
    let client = NylasClient::new(cfg.api_url(), &creds)?;

    match cmd {
        Command::Tui => {
            let labels = load_labels(&client)?;
            if labels.id_for(cfg.trash_label()).is_none() {
                warn!(
                    "label '{}' not found; delete will not work",
                    cfg.trash_label()
                );
            }
            run_tui(&client, labels, cfg.trash_label())
        }

        Command::List => {
            let inbox = synchronize(&client).context("fetching inbox")?;
            for (row, id) in inbox.rows.iter().zip(&inbox.ids) {
                let marker = if row.unread { "*" } else { " " };
                println!(
                    "{marker} {}  {:<50}  {}  [{id}]",
                    row.date, row.subject, row.from
                );
            }
            Ok(())
        }

        Command::Labels => {
            let labels = load_labels(&client)?;
            for (name, id) in labels.entries() {
                println!("{name}\t{id}");
            }
            Ok(())
        }
    }
}
