use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;

use futaba::config::{read_config, Config};
use futaba::logger::configure_logger;
use futaba::site_builder::SiteBuilder;

const CFG_FILE_NAME: &str = "futaba.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file. When omitted, looked up next to the
    /// executable, in the current dir, then in the user config dir
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn get_config_path() -> Option<PathBuf> {
    let exe_path = env::current_exe().unwrap();
    let exe_dir = exe_path.parent().unwrap();
    let cur_dir = env::current_dir().unwrap();

    if exe_dir.join(CFG_FILE_NAME).exists() {
        return Some(exe_dir.join(CFG_FILE_NAME));
    }

    if cur_dir.join(CFG_FILE_NAME).exists() {
        return Some(cur_dir.join(CFG_FILE_NAME));
    }

    let cfg_dir = dirs::config_dir()?;
    if cfg_dir.join(CFG_FILE_NAME).exists() {
        return Some(cfg_dir.join(CFG_FILE_NAME));
    }

    None
}

fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path.or_else(get_config_path) {
        Some(path) => path,
        None => return Err(anyhow!("Could not find {} configuration", CFG_FILE_NAME)),
    };
    println!("Reading config from {}", config_path.display());
    Ok(read_config(&config_path)?)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = open_config(args.config)?;
    configure_logger(&config).map_err(|e| anyhow!("Error configuring logger: {}", e))?;

    SiteBuilder::new(config).build()
}
