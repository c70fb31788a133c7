use std::error::Error;

use clap::Args;
use ufo_model::ModelQuery;

use super::{print_json, ModelArgs};

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub model: ModelArgs,
    /// Name of the vertex to print.
    #[arg(long)]
    pub vertex: String,
}

pub fn run(args: &ShowArgs) -> Result<(), Box<dyn Error>> {
    let (registry, _) = args.model.load()?;
    let query = ModelQuery::from(registry);
    let raw = query.get(&args.vertex)?.to_raw()?;
    print_json(&raw)
}
