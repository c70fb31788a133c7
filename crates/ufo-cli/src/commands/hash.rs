use std::error::Error;

use clap::Args;
use ufo_model::canonical_hash;

use super::ModelArgs;

#[derive(Args, Debug)]
pub struct HashArgs {
    #[command(flatten)]
    pub model: ModelArgs,
}

pub fn run(args: &HashArgs) -> Result<(), Box<dyn Error>> {
    let (registry, _) = args.model.load()?;
    println!("{}", canonical_hash(&registry)?);
    Ok(())
}
