use clap::Parser;
use paapi_relay::{ApiVariant, AppState, Config, CredentialOverrides, PaapiClient, create_app};
use tracing_subscriber::EnvFilter;

// Server configuration
const HOST: &str = "0.0.0.0";
const PORT: u16 = 3000;

/// paapi-relay: signs and relays Amazon Product Advertising API lookups
#[derive(Parser, Debug)]
#[command(name = "paapi-relay")]
#[command(about = "Fetch Amazon product data through PA-API v5 with SigV4-signed requests", long_about = None)]
struct Cli {
    /// Path to an optional JSON configuration file
    #[arg(short, long, env = "CONFIG_PATH")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, env = "HOST", default_value = HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = PORT)]
    port: u16,

    /// PA-API access key
    #[arg(long, env = "AMAZON_ACCESS_KEY")]
    access_key: Option<String>,

    /// PA-API secret key
    #[arg(long, env = "AMAZON_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Associate (partner) tag
    #[arg(long, env = "AMAZON_PARTNER_TAG")]
    partner_tag: Option<String>,

    /// Marketplace code, e.g. com, co.uk, de
    #[arg(long, env = "AMAZON_REGION")]
    region: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(cfg) => {
                tracing::info!("Loaded configuration from {}", path);
                cfg
            }
            Err(e) => {
                tracing::error!("Failed to load config file '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    config.apply_overrides(CredentialOverrides {
        access_key: cli.access_key,
        secret_key: cli.secret_key,
        partner_tag: cli.partner_tag,
        region: cli.region,
    });

    match &config.credentials {
        Some(creds) => match creds.validate() {
            Ok(()) => tracing::info!(
                "Using access key {} for region '{}'",
                creds.access_key,
                creds.region
            ),
            Err(e) => tracing::warn!("Configured credentials are incomplete: {}", e),
        },
        None => tracing::warn!(
            "No Amazon credentials configured; /products/fetch will fail until they are set"
        ),
    }

    let mut client = match PaapiClient::new(ApiVariant::from(config.variant), config.timeout()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create PA-API client: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(base) = &config.endpoint_override {
        tracing::warn!("Outbound PA-API calls redirected to {}", base);
        client = client.with_endpoint_override(base.clone());
    }

    let app = create_app(AppState::new(client, config.credentials));

    // Start server
    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("PA-API relay listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
