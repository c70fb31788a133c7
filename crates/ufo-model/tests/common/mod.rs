#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use ufo_model::{LoadReport, ModelFile, Registry, RegistryConfig};

pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .canonicalize()
        .unwrap()
}

pub fn sample_model_path() -> PathBuf {
    workspace_root().join("fixtures/sample_model.json")
}

pub fn sample_model() -> ModelFile {
    let bytes = fs::read(sample_model_path()).unwrap();
    ModelFile::from_json_slice(&bytes).unwrap()
}

pub fn sample_registry(config: RegistryConfig) -> (Registry, LoadReport) {
    sample_model().into_registry(config)
}
