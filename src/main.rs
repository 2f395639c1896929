use anyhow::{Result, anyhow};
use clap::Parser;
use std::{fs::File, io::BufReader, path::Path, process::ExitCode};

use crate::{
    config::{CliOptions, Command, Config},
    error::TunerError,
    fetch::Fetcher,
    model::channel::Channel,
    parsers::m3u,
    store::Store,
};

mod config;
mod constants;
mod error;
mod fetch;
mod store;

mod model;
mod parsers;

fn parse_file(path: &Path) -> Result<Vec<Channel>> {
    let file = File::open(path).map_err(|e| {
        TunerError::File(format!("can't open `{}`: {}", path.to_string_lossy(), e))
    })?;

    Ok(m3u::parse(BufReader::new(file)))
}

// appends to whatever is stored right now, the file may have changed since startup
fn import(store_file: &Path, channels: Vec<Channel>) -> Result<()> {
    if channels.is_empty() {
        println!("no valid channels found");
        return Ok(());
    }
    let n = channels.len();
    let mut store = Store::try_from_file(store_file)?;
    store.append(channels);
    store.save(store_file)?;
    log::info!("imported {} channels into `{}`", n, store_file.to_string_lossy());
    println!("imported {} channels", n);

    Ok(())
}

async fn run(config: Config, command: Command) -> Result<()> {
    let Config {
        store_file,
        fetch_config,
        ..
    } = config;

    match command {
        Command::ImportFile { path } => {
            let channels = parse_file(&path)?;
            import(&store_file, channels)?;
        }
        Command::ImportUrl { url } => {
            let url = match url {
                Some(url) => url,
                None => Store::try_from_file(&store_file)?
                    .custom_m3u_url
                    .ok_or(anyhow!("no url given and none saved (see `set-url`)"))?,
            };
            let fetcher = Fetcher::try_new(&fetch_config)?;
            let channels = fetcher.parse_from_url(&url).await;
            import(&store_file, channels)?;
        }
        Command::Parse { path } => {
            let channels = parse_file(&path)?;
            println!("{}", serde_json::to_string_pretty(&channels)?);
        }
        Command::List => {
            let store = Store::try_from_file(&store_file)?;
            if store.custom_sources.is_empty() {
                println!("no imported channels");
            }
            for (i, channel) in store.custom_sources.iter().enumerate() {
                println!("{}. {}", i + 1, channel);
            }
        }
        Command::Remove { index } => {
            let mut store = Store::try_from_file(&store_file)?;
            let removed = store.remove(index)?;
            store.save(&store_file)?;
            println!("removed {}", removed.title);
        }
        Command::Clear => {
            let mut store = Store::try_from_file(&store_file)?;
            store.clear_sources();
            store.save(&store_file)?;
        }
        Command::SetUrl { url } => {
            let mut store = Store::try_from_file(&store_file)?;
            store.set_url(url);
            store.save(&store_file)?;
        }
        Command::ClearUrl => {
            let mut store = Store::try_from_file(&store_file)?;
            store.clear_url();
            store.save(&store_file)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli_options = CliOptions::parse();
    let config = match Config::try_from_file(cli_options.config_file.as_deref())
        .and_then(|config| config.merge_with_cli(&cli_options))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if cli_options.log_stderr {
        simple_logging::log_to_stderr(log::LevelFilter::max());
    } else {
        let _ = simple_logging::log_to_file(&config.log_file, log::LevelFilter::max());
    }

    if let Err(e) = run(config, cli_options.command).await {
        log::error!("{}", e);
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
