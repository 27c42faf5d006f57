//! LeftClick proxy resolver.
//!
//! Hosts the LeftClick configuration provider and prints the proxy directive it
//! yields for each URL.
//!
//! ```text
//! leftclick-proxy resolve https://www.example.com
//! leftclick-proxy --config-file ./config.xml watch https://www.example.com
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use url::Url;

use leftclick_proxy::config::loader::load_options;
use leftclick_proxy::config::{ProviderOptions, ReloadMode};
use leftclick_proxy::lifecycle::{self, signals, Shutdown};
use leftclick_proxy::observability::logging;
use leftclick_proxy::provider::ConfigProvider;

#[derive(Parser)]
#[command(name = "leftclick-proxy")]
#[command(about = "Resolve proxies from a LeftClick player configuration", long_about = None)]
struct Cli {
    /// Host options file (TOML)
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// LeftClick XML file, overrides the options file
    #[arg(short, long)]
    config_file: Option<PathBuf>,

    /// Keep values of elements missing from a reloaded file
    #[arg(long)]
    retain: bool,

    /// Extra host to bypass, on top of the file's blacklist (repeatable)
    #[arg(short, long = "ignore")]
    ignore: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the directive for each URL and exit
    Resolve {
        #[arg(required = true)]
        urls: Vec<Url>,
    },
    /// Print directives again after every configuration reload
    Watch {
        #[arg(required = true)]
        urls: Vec<Url>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging(logging::DEFAULT_FILTER);

    let cli = Cli::parse();

    let mut options = match &cli.options {
        Some(path) => load_options(path)?,
        None => ProviderOptions::default(),
    };
    if cli.config_file.is_some() {
        options.config_file = cli.config_file.clone();
    }
    if cli.retain {
        options.reload_mode = ReloadMode::Retain;
    }

    let extra = cli.ignore.clone();
    let matcher = Arc::new(move |uri: &Url, patterns: &[String]| {
        let Some(host) = uri.host_str() else {
            return false;
        };
        patterns
            .iter()
            .chain(extra.iter())
            .any(|p| p.eq_ignore_ascii_case(host))
    });

    match cli.command {
        Commands::Resolve { urls } => {
            options.watch = false;
            let started = lifecycle::start(&options, matcher);
            print_decisions(&started.provider, &urls);
        }
        Commands::Watch { urls } => {
            let started = lifecycle::start(&options, matcher);
            let provider = started.provider;
            let watcher = started.watcher;

            let reload = watcher.reload_trigger();
            let mut updates = watcher.updates();
            let shutdown = Shutdown::new();
            let watcher_task = tokio::spawn(watcher.run(shutdown.subscribe()));

            print_decisions(&provider, &urls);

            let termination = signals::wait_for_termination(reload);
            tokio::pin!(termination);
            loop {
                tokio::select! {
                    changed = updates.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let state = *updates.borrow_and_update();
                        tracing::info!(?state, "Configuration reloaded");
                        print_decisions(&provider, &urls);
                    }
                    res = &mut termination => {
                        res?;
                        break;
                    }
                }
            }

            shutdown.trigger();
            watcher_task.await?;
        }
    }

    Ok(())
}

fn print_decisions(provider: &dyn ConfigProvider, urls: &[Url]) {
    for url in urls {
        let directives = provider.get_config(url);
        match directives.first() {
            Some(directive) => println!("{} {}", url, directive),
            None => println!("{} direct", url),
        }
    }
}
