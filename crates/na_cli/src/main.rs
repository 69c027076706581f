use clap::{Args, Parser, Subcommand};
use na_core::Classifier;
use na_inference::ArticleClassifier;
use na_web::{cors_layer, create_app, AppState, TokenService};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};

mod duration;
mod health;

use duration::HumanDuration;

const STORAGE_CHECK_RETRIES: u32 = 3;
const STORAGE_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser, Debug)]
#[command(author, version, about = "News article API with topic classification", long_about = None)]
struct Cli {
    /// Log at DEBUG instead of INFO
    #[arg(long, short, global = true, env = "NA_VERBOSE")]
    verbose: bool,
    #[command(flatten)]
    model: ModelArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct ModelArgs {
    #[arg(
        long,
        env = "NA_MODEL",
        default_value = "gemini",
        help = "Model to use for classification. Available models: gemini (default), deepseek, none"
    )]
    model: String,
    /// Provider-side model id, e.g. gemini-2.5-flash
    #[arg(long, env = "NA_MODEL_ID")]
    model_id: Option<String>,
    #[arg(long, env = "NA_MODEL_URL")]
    model_url: Option<String>,
    /// Overrides the provider-specific key variables
    #[arg(long, env = "NA_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,
    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    deepseek_api_key: Option<String>,
    /// How long to wait for the model before using keywords (e.g. 10s, 1m)
    #[arg(long, env = "NA_CLASSIFY_TIMEOUT", default_value = "10s")]
    classify_timeout: HumanDuration,
}

impl ModelArgs {
    fn inference_config(&self) -> na_inference::Config {
        let provider_key = match self.model.to_lowercase().as_str() {
            "deepseek" => self.deepseek_api_key.clone(),
            _ => self.gemini_api_key.clone(),
        };
        na_inference::Config {
            api_key: self.api_key.clone().or(provider_key),
            model_name: Some(self.model.clone()),
            model_id: self.model_id.clone(),
            model_url: self.model_url.clone(),
            timeout: self.classify_timeout.0,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Print the categories assigned to a piece of text
    Classify {
        text: String,
    },
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, env = "NA_HOST", default_value = "127.0.0.1")]
    host: IpAddr,
    #[arg(long, env = "NA_PORT", default_value_t = 8000)]
    port: u16,
    /// Storage backend: memory or sqlite
    #[arg(long, env = "NA_STORAGE", default_value = "sqlite")]
    storage: String,
    /// Backend location, e.g. sqlite://news.db
    #[arg(long, env = "DATABASE_URL")]
    storage_url: Option<String>,
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,
    #[arg(long, env = "JWT_ALGORITHM", default_value = "HS256")]
    jwt_algorithm: String,
    #[arg(long, env = "ACCESS_TOKEN_EXPIRE", default_value = "30m")]
    token_lifetime: HumanDuration,
    /// Comma-separated list of allowed browser origins
    #[arg(
        long,
        env = "NA_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000,http://localhost:5173"
    )]
    cors_origins: Vec<String>,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();
}

async fn serve(args: ServeArgs, classifier: ArticleClassifier) -> anyhow::Result<()> {
    info!("💾 Checking storage connection...");
    let storage = na_storage::create_storage(&args.storage, args.storage_url.as_deref()).await?;
    health::check_storage_with_retry(
        &storage,
        &args.storage,
        STORAGE_CHECK_RETRIES,
        STORAGE_CHECK_TIMEOUT,
    )
    .await?;

    let tokens = TokenService::from_algorithm_name(
        &args.jwt_secret,
        &args.jwt_algorithm,
        args.token_lifetime.0,
    )?;
    let cors = cors_layer(args.cors_origins.as_slice())?;
    let state = AppState::new(storage, Arc::new(classifier), tokens);
    let app = create_app(state, cors);

    na_web::serve(SocketAddr::new(args.host, args.port), app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let classifier = na_inference::create_classifier(&cli.model.inference_config())?;
    info!("🧠 Classifier initialized successfully (using {})", classifier.model_name());

    match cli.command {
        Commands::Serve(args) => serve(args, classifier).await?,
        Commands::Classify { text } => {
            let categories = classifier.classify(&text).await;
            println!("{}", serde_json::to_string(&categories)?);
        }
    }

    Ok(())
}
