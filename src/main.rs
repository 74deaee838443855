use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dining::{dine_with_watchdog, DiningConfig, Observer, Silent, Solution, Trace, Verdict};

/// Dining philosophers with four ways of sharing the forks
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// number of philosophers
    #[arg(short = 'n', long = "philosophers")]
    philosophers: Option<usize>,

    /// philosopher's stomach size
    #[arg(long)]
    stomach: Option<usize>,

    /// time required for eating [ns]
    #[arg(long)]
    eatns: Option<u64>,

    /// dining philosopher problem solution
    #[arg(long, value_enum)]
    solution: Option<Solution>,

    /// TOML file with the same settings; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// give up after this many seconds instead of waiting forever
    #[arg(long, value_name = "SECS")]
    watchdog: Option<u64>,

    /// do not trace each philosopher's actions
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn dining_config(&self) -> Result<DiningConfig> {
        let mut config = match &self.config {
            Some(path) => DiningConfig::load(path)?,
            None => DiningConfig::default(),
        };
        if let Some(n) = self.philosophers {
            config.philosophers = n;
        }
        if let Some(stomach) = self.stomach {
            config.stomach = stomach;
        }
        if let Some(eat_ns) = self.eatns {
            config.eat_ns = eat_ns;
        }
        if let Some(solution) = self.solution {
            config.solution = solution;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dining=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.dining_config()?;

    let observer: Arc<dyn Observer> = if cli.quiet {
        Arc::new(Silent)
    } else {
        Arc::new(Trace)
    };

    // !!! naive solution will deadlock !!!
    let table = config
        .solution
        .prepare(&config, observer)
        .context("failed to set the table")?;

    match cli.watchdog {
        Some(secs) => match dine_with_watchdog(table, Duration::from_secs(secs))? {
            Verdict::Finished(_) => {}
            Verdict::Stalled => bail!("dining did not finish within {secs} seconds (deadlock?)"),
        },
        None => {
            table.start()?;
        }
    }

    Ok(())
}
