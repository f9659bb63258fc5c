use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use yatti::{
    client::QueryOptions,
    commands::{self, Config, parse_param},
    runtime::RealRuntime,
};

/// yatti - YaTTI knowledgebase query client
///
/// Ask questions against the knowledgebases served by the YaTTI API.
///
/// The API key is taken from --api-key or the YATTI_API_KEY environment variable.
///
/// Examples:
///   yatti list
///   yatti query appliedanthropology "What is dharma?"
///   yatti query okusiassociates "What are PMA requirements?" --model gpt-4 --top-k 20
///   yatti batch okusiassociates --file questions.txt --temperature 0.5
#[derive(Parser, Debug)]
#[command(author, version = env!("YATTI_VERSION"), about)]
#[command(disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API key (defaults to YATTI_API_KEY)
    #[arg(long = "api-key", value_name = "KEY", global = true)]
    pub api_key: Option<String>,

    /// API base URL (defaults to https://yatti.id/v1/index.php)
    #[arg(long = "base-url", env = "YATTI_BASE_URL", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Print raw JSON responses
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List available knowledgebases
    List,

    /// Show the API help document
    Help,

    /// Show information about a knowledgebase
    Info(InfoArgs),

    /// Ask a question against a knowledgebase
    Query(QueryArgs),

    /// Ask several questions in sequence against one knowledgebase
    Batch(BatchArgs),
}

#[derive(clap::Args, Debug)]
pub struct InfoArgs {
    /// Knowledgebase name
    #[arg(value_name = "KB")]
    pub kb: String,
}

#[derive(clap::Args, Debug)]
pub struct QueryArgs {
    /// Knowledgebase name
    #[arg(value_name = "KB")]
    pub kb: String,

    /// Question text
    #[arg(value_name = "QUESTION")]
    pub question: String,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

#[derive(clap::Args, Debug)]
pub struct BatchArgs {
    /// Knowledgebase name
    #[arg(value_name = "KB")]
    pub kb: String,

    /// Questions to ask
    #[arg(value_name = "QUESTION")]
    pub questions: Vec<String>,

    /// Read questions from a file, one per line (# starts a comment)
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

#[derive(clap::Args, Debug, Default)]
pub struct TuningArgs {
    /// Return only retrieved context, without model synthesis
    #[arg(long)]
    pub context_only: bool,

    /// Additional reference text
    #[arg(long, value_name = "TEXT")]
    pub reference: Option<String>,

    /// Model to answer with
    #[arg(long, value_name = "NAME")]
    pub model: Option<String>,

    /// Response creativity (0.0-1.0)
    #[arg(long, value_name = "FLOAT")]
    pub temperature: Option<f64>,

    /// Number of context chunks
    #[arg(long = "top-k", value_name = "N")]
    pub top_k: Option<u32>,

    /// Extra query parameter; overrides the options above (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

impl TuningArgs {
    fn into_options(self) -> QueryOptions {
        let mut options = QueryOptions {
            context_only: self.context_only,
            reference: self.reference,
            model: self.model,
            temperature: self.temperature,
            top_k: self.top_k,
            ..Default::default()
        };
        for (key, value) in self.params {
            options = options.param(key, value);
        }
        options
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    let config = Config::load(&runtime, cli.api_key, cli.base_url)?;
    let client = config.build_client()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List => commands::list(&client, cli.json, &mut out).await?,
        Commands::Help => commands::api_help(&client, &mut out).await?,
        Commands::Info(args) => commands::info(&client, &args.kb, &mut out).await?,
        Commands::Query(args) => {
            let options = args.tuning.into_options();
            commands::query(&client, &args.kb, &args.question, &options, cli.json, &mut out)
                .await?
        }
        Commands::Batch(args) => {
            let questions =
                commands::load_questions(&runtime, args.questions, args.file.as_deref())?;
            let options = args.tuning.into_options();
            commands::batch(
                &client,
                &args.kb,
                &questions,
                &options,
                client.batch_delay(),
                cli.json,
                &mut out,
            )
            .await?
        }
    }
    Ok(())
}
