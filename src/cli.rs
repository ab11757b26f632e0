use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use json_encoding::Encoding;
use tracing::{debug, info};

use crate::logging;
use crate::random::{self, RandomSource};
use crate::settings::{self, CliOverrides};
use crate::simulator::Simulator;

#[derive(Parser)]
#[command(name = "record-simulator")]
#[command(
    about = "Simulate a slow process and print one JSON record.",
    long_about = "Waits five seconds, optionally captures stdin and appends a log line, then prints a JSON record with fixed items, a flag, a fixed integer and a random number in 0..=9999.",
    version
)]
pub struct Cli {
    #[arg(long, value_enum, help = "How non-ASCII characters are written.")]
    encoding: Option<EncodingArg>,
    #[arg(long, help = "Read stdin to end-of-stream and add it as the fourth item.")]
    capture_stdin: bool,
    #[arg(long, help = "Append `hello world!` to the append path before printing.")]
    append_log: bool,
    #[arg(long, help = "File used by --append-log.")]
    append_path: Option<PathBuf>,
    #[arg(long, help = "Key name for the item list.")]
    items_key: Option<String>,
    #[arg(long, help = "Key name for the fixed integer.")]
    integer_key: Option<String>,
    #[arg(long, help = "Seed the random number for reproducible output.")]
    seed: Option<u64>,
    #[arg(long, help = "Settings file (defaults to the user config directory).")]
    config: Option<PathBuf>,
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EncodingArg {
    Ascii,
    Raw,
}

impl From<EncodingArg> for Encoding {
    fn from(value: EncodingArg) -> Self {
        match value {
            EncodingArg::Ascii => Encoding::Ascii,
            EncodingArg::Raw => Encoding::Raw,
        }
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        logging::init_tracing(self.debug);

        let (file, path) = settings::load_settings(self.config.as_deref())?;
        debug!(path = %path.display(), "settings resolved");
        let config_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let settings = settings::effective_settings(self.overrides(), file, config_dir)?;
        info!(
            encoding = settings.encoding.label(),
            capture_stdin = settings.capture_stdin,
            append_log = settings.append_log,
            "starting run"
        );

        let simulator = Simulator::new(settings);
        let mut source: Box<dyn RandomSource> = match self.seed {
            Some(seed) => Box::new(random::seeded(seed)),
            None => Box::new(random::thread_local()),
        };
        simulator.run(io::stdin().lock(), io::stdout().lock(), source.as_mut())?;
        Ok(())
    }

    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            encoding: self.encoding.map(Encoding::from),
            capture_stdin: self.capture_stdin.then_some(true),
            append_log: self.append_log.then_some(true),
            append_path: self.append_path.clone(),
            items_key: self.items_key.clone(),
            integer_key: self.integer_key.clone(),
        }
    }
}
