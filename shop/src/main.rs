use anyhow::{Context, Result};
use clap::Parser;
use mini_shop::application::{CachedCatalog, CartStore};
use mini_shop::config::ShopConfig;
use mini_shop::infrastructure::HttpCatalogClient;
use mini_shop::shell::{AppContext, Shell, ShellCommand, ShellOutput, HELP};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Terminal front end for the Mini Shop composition shell
#[derive(Debug, Parser)]
#[command(name = "mini-shop", version, about)]
struct Args {
    /// TOML config file (defaults to ./mini_shop.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog endpoint, overrides the config file
    #[arg(long)]
    base_url: Option<String>,

    /// tracing filter, e.g. `mini_shop=debug`
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ShopConfig::load(args.config.as_deref())?;
    if let Some(url) = args.base_url {
        config.catalog_base_url = url;
    }
    if let Some(filter) = args.log_filter {
        config.log_filter = filter;
    }

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let client = HttpCatalogClient::new(&config.catalog_base_url)?;
    let catalog = CachedCatalog::new(client, config.query_policy());
    let context = AppContext::new(CartStore::new(), Arc::new(catalog));
    let mut shell = Shell::standard(context);

    tracing::info!(catalog = %config.catalog_base_url, "mini shop started");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let page = shell.navigate("/", |placeholder| eprintln!("{}", placeholder)).await;
    write_block(&mut stdout, &page).await?;
    write_block(&mut stdout, HELP).await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                write_block(&mut stdout, &format!("Error: {}", e)).await?;
                continue;
            }
        };

        match shell
            .execute(command, |placeholder| eprintln!("{}", placeholder))
            .await
        {
            ShellOutput::Render(page) | ShellOutput::Message(page) => {
                write_block(&mut stdout, &page).await?
            }
            ShellOutput::Quit => break,
        }
    }

    tracing::info!("mini shop stopped");
    Ok(())
}

async fn write_block(stdout: &mut tokio::io::Stdout, text: &str) -> Result<()> {
    stdout.write_all(text.trim_end().as_bytes()).await?;
    stdout.write_all(b"\n\n").await?;
    stdout.flush().await?;
    Ok(())
}
