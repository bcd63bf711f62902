use clap::{Parser, Subcommand, ValueEnum};
use schemerec::prompt;
use schemerec_api::RestApi;
use schemerec_core::{StopWords, TextField, VectorSpaceConfig};
use schemerec_storage::{CorpusManager, RecommenderContext, StorageSettings};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Content-based welfare scheme recommendations
#[derive(Parser, Debug)]
#[command(name = "schemerec")]
#[command(about = "Rank welfare schemes by TF-IDF similarity", long_about = None)]
struct Args {
    /// Path to the scheme dataset (CSV)
    #[arg(short, long, default_value = "recommendation_dataset.csv")]
    dataset: PathBuf,

    /// Directory for cached corpus and vector space
    #[arg(long, default_value = ".schemerec")]
    cache_dir: PathBuf,

    /// Always rebuild from the dataset and write no cache
    #[arg(long)]
    no_cache: bool,

    /// Scheme fields that make up each document
    #[arg(long, value_enum, default_value_t = TextFieldArg::NameAndDescription)]
    text_field: TextFieldArg,

    /// Keep English stop words when tokenizing
    #[arg(long)]
    keep_stop_words: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask for search terms and demographics, print matching schemes
    Prompt {
        /// Number of schemes to print
        #[arg(short = 'n', long, default_value_t = 5)]
        limit: usize,

        /// Only rank schemes whose eligibility fields match the answers
        #[arg(long)]
        strict_eligibility: bool,
    },
    /// Serve recommendations for known users over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TextFieldArg {
    NameAndDescription,
    Description,
}

impl From<TextFieldArg> for TextField {
    fn from(arg: TextFieldArg) -> Self {
        match arg {
            TextFieldArg::NameAndDescription => TextField::NameAndDescription,
            TextFieldArg::Description => TextField::DescriptionOnly,
        }
    }
}

impl Args {
    fn storage_settings(&self) -> StorageSettings {
        StorageSettings {
            dataset: self.dataset.clone(),
            cache_dir: (!self.no_cache).then(|| self.cache_dir.clone()),
            require_user_id: matches!(self.command, Command::Serve { .. }),
            vector_space: VectorSpaceConfig {
                text_field: self.text_field.into(),
                stop_words: if self.keep_stop_words {
                    StopWords::None
                } else {
                    StopWords::English
                },
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting SchemeRec v{}", env!("CARGO_PKG_VERSION"));
    info!("Dataset: {:?}", args.dataset);

    let settings = args.storage_settings();
    let context = Arc::new(CorpusManager::new(settings).build()?);
    info!(
        "Vector space ready: {} documents, {} terms",
        context.vectorizer().n_documents(),
        context.matrix().n_features()
    );

    match args.command {
        Command::Prompt { limit, strict_eligibility } => {
            let prompt_context = context.clone();
            tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
                let ranker = prompt_context.ranker()?;
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();
                prompt::run(
                    &ranker,
                    &mut stdin.lock(),
                    &mut stdout.lock(),
                    limit,
                    strict_eligibility,
                )?;
                Ok(())
            })
            .await??;
        }
        Command::Serve { host, port } => serve(context, host, port).await?,
    }

    Ok(())
}

/// Run the HTTP service until it stops or ctrl-c arrives.
///
/// A server that fails to start (e.g. the port is taken) is an error.
async fn serve(context: Arc<RecommenderContext>, host: String, port: u16) -> anyhow::Result<()> {
    let http_handle = std::thread::spawn(move || -> std::io::Result<()> {
        info!("Starting HTTP server on {}:{}", host, port);
        let sys = actix_web::rt::System::new();
        sys.block_on(RestApi::start(context, host, port))
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        joined = tokio::task::spawn_blocking(move || http_handle.join()) => {
            server_outcome(joined?)?;
            info!("HTTP server stopped");
        }
    }
    info!("Shutting down...");
    Ok(())
}

/// Turn the joined server thread into the process result
fn server_outcome(joined: std::thread::Result<std::io::Result<()>>) -> anyhow::Result<()> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(anyhow::anyhow!("HTTP server error: {}", e)),
        Err(_) => Err(anyhow::anyhow!("HTTP server thread panicked")),
    }
}
