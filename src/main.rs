//! linkshift 命令行入口
//! convert：转换单个链接并输出JSON；serve：启动 HTTP 接口
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

use linkshift::{ConfigManager, LinkConverter};

#[derive(Parser, Debug)]
#[command(name = "linkshift")]
#[command(about = "Convert product links between Chinese marketplaces and proxy-buying services")]
#[command(version)]
struct Cli {
    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert one link into every supported middleman link (or a single target)
    Convert {
        #[arg(help = "Product or middleman link to convert")]
        url: String,

        #[arg(short, long, help = "Only convert to this middleman key (e.g. kakobuy)")]
        target: Option<String>,

        #[arg(long, help = "Pretty-print the JSON output")]
        pretty: bool,
    },
    /// Serve the converter over HTTP
    Serve {
        #[arg(short, long, default_value = "0.0.0.0:3000", help = "Address to listen on")]
        bind: SocketAddr,

        #[arg(long, value_delimiter = ',', help = "Allowed CORS origins, comma separated (default: any)")]
        allowed_origins: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigManager::custom().verbose(cli.verbose);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.clone().build().default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let converter = LinkConverter::new()?;

    match cli.command {
        Commands::Convert { url, target, pretty } => {
            let output = match target {
                Some(target) => {
                    let link = converter.convert_one(&url, &target)?;
                    let converted = link.is_some();
                    let mut body = Map::new();
                    body.insert(target, link.map(Value::String).unwrap_or(Value::Null));
                    (Value::Object(body), converted)
                }
                None => {
                    let result = converter.convert_all(&url);
                    let converted = !result.is_empty();
                    (serde_json::to_value(&result)?, converted)
                }
            };

            let (json, converted) = output;
            if pretty {
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                println!("{}", serde_json::to_string(&json)?);
            }
            if !converted {
                bail!("no middleman link could be generated for {}", url);
            }
        }
        Commands::Serve { bind, allowed_origins } => {
            let config = config.bind_addr(bind).allowed_origins(allowed_origins).build();
            tracing::info!("Starting linkshift server");
            linkshift::server::serve(Arc::new(converter), config).await?;
        }
    }

    Ok(())
}
