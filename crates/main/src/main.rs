use std::error::Error;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use resume_pdf::emit::Backend;
use resume_pdf::Config;

/// Builds the full and short resume PDFs from a YAML source.
///
/// Settings come from the optional TOML file given with `--config`; any flag
/// below overrides the matching key.
#[derive(Parser)]
#[command(author, version, about = "Generate resume PDFs from YAML")]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "RESUME_CONFIG")]
    config: Option<PathBuf>,

    /// Resume source (default `data/resume.yaml`).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory the PDFs are written to (default `output`).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of leading roles kept in the short resume (default 7).
    #[arg(long)]
    short_roles: Option<usize>,

    /// Keep the previous PDFs under dated names instead of overwriting them.
    #[arg(long)]
    rotate: bool,

    /// PDF backend.
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Directory holding the LiberationSans fonts for the embedded backend.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    /// Base-14 Helvetica, no font files needed.
    Builtin,
    /// Embedded TrueType fonts.
    Embedded,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Builtin => Backend::Builtin,
            BackendArg::Embedded => Backend::Embedded,
        }
    }
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    fn into_config(self) -> Result<Config, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(short_roles) = self.short_roles {
            config.short_roles = short_roles;
        }
        if self.rotate {
            config.rotate = true;
        }
        if let Some(backend) = self.backend {
            config.backend = backend.into();
        }
        if let Some(fonts_dir) = self.fonts_dir {
            config.fonts_dir = Some(fonts_dir);
        }

        config.validate()?;
        Ok(config)
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = cli.into_config()?;
    for path in resume_pdf::generate(&config)? {
        println!("PDF generated: {}", path.display());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
