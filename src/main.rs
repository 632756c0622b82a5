use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{error::Error, io, path::PathBuf, process::ExitCode};
use tracing::info;

use typer::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    corpus::{Corpus, DEFAULT_CORPUS},
    layout::max_line_width,
    logging,
    render::{Renderer, TerminalRenderer},
    runtime::{run_session, wait_for_dismissal, CrosstermKeySource, SessionEnd},
    sampler,
    session::TypingSession,
    terminal::TerminalGuard,
    theme::ThemeChoice,
    ui, TyperError,
};

/// minimal terminal typing test
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A minimal terminal typing test: type a random sample of common words and get your speed, accuracy and the words you missed."
)]
pub struct Cli {
    /// number of words to use in test [config default: 50]
    #[clap(short = 'w', long = "words", value_parser = clap::value_parser!(u64).range(1..=10000))]
    number_of_words: Option<u64>,

    /// colour theme
    #[clap(short = 't', long, value_enum)]
    theme: Option<ThemeChoice>,

    /// bundled word list to draw from
    #[clap(short = 'l', long, default_value = DEFAULT_CORPUS)]
    corpus: String,

    /// newline-separated word list file, overrides --corpus
    #[clap(long)]
    word_list: Option<PathBuf>,

    /// widest line of words, in columns
    #[clap(long, value_parser = clap::value_parser!(u16).range(1..))]
    max_width: Option<u16>,

    /// seed for word sampling and random theme selection
    #[clap(long)]
    seed: Option<u64>,

    /// persist the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Command-line values take precedence over the stored config.
    fn merge(&self, mut config: Config) -> Config {
        if let Some(n) = self.number_of_words {
            config.number_of_words = n as usize;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(path) = &self.word_list {
            config.word_list = Some(path.clone());
        }
        if let Some(width) = self.max_width {
            config.max_line_width = width as usize;
        }
        config
    }

    fn load_corpus(&self, config: &Config) -> Result<Corpus, TyperError> {
        match &config.word_list {
            Some(path) => Corpus::from_path(path),
            None => Corpus::bundled(&self.corpus),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = AppDirs::state_dir().and_then(|dir| logging::init(&dir));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            eprintln!("typer: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let store = FileConfigStore::new();
    let config = cli.merge(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "config saved");
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let corpus = cli.load_corpus(&config)?;
    info!(corpus = %corpus.name, size = corpus.len(), "word list loaded");

    let words = sampler::sample(&corpus.words, config.number_of_words, &mut rng)?;
    let (theme, palette) = config.theme.resolve(&mut rng);
    info!(words = words.len(), %theme, "starting session");

    let _guard = TerminalGuard::acquire()?;

    let mut renderer = TerminalRenderer::new(io::stdout(), palette);
    let (width, height) = renderer.size().map_err(TyperError::TerminalUnavailable)?;
    let max_width = max_line_width(config.max_line_width, width);

    let mut session = TypingSession::new(words, max_width, (width, height));
    let mut keys = CrosstermKeySource;

    if let SessionEnd::Completed(report) = run_session(&mut session, &mut keys, &mut renderer)? {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        ui::draw_report(&mut terminal, &report, palette)?;
        wait_for_dismissal(&mut keys)?;
    }

    Ok(())
}
