pub mod check;
pub mod find;
pub mod hash;
pub mod show;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;
use ufo_model::{LoadReport, ModelFile, Registry, RegistryConfig};

/// Options shared by every subcommand that loads a model.
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Model file to load; `.bin` files are read as the binary cache format.
    #[arg(long)]
    pub model: PathBuf,
    /// Optional YAML registry configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ModelArgs {
    pub fn load(&self) -> Result<(Registry, LoadReport), Box<dyn Error>> {
        let config = match &self.config {
            Some(path) => load_config(path)?,
            None => RegistryConfig::default(),
        };
        let model = ModelFile::from_path(&self.model)?;
        info!(
            model = %self.model.display(),
            vertices = model.vertices.len(),
            policy = ?config.symbol_policy,
            "loading model"
        );
        Ok(model.into_registry(config))
    }
}

fn load_config(path: &Path) -> Result<RegistryConfig, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    let config: RegistryConfig = serde_yaml::from_str(&contents)?;
    Ok(config)
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
