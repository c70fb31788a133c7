use std::error::Error;

use clap::Args;
use ufo_model::ModelQuery;

use super::ModelArgs;

#[derive(Args, Debug)]
pub struct FindArgs {
    #[command(flatten)]
    pub model: ModelArgs,
    /// Comma-separated particle names, in any order.
    #[arg(long, value_delimiter = ',', required = true)]
    pub particles: Vec<String>,
}

pub fn run(args: &FindArgs) -> Result<(), Box<dyn Error>> {
    let (registry, _) = args.model.load()?;
    let query = ModelQuery::from(registry);
    let names: Vec<&str> = args.particles.iter().map(|name| name.trim()).collect();
    for view in query.find_by_names(&names)? {
        println!("{}", view.name());
    }
    Ok(())
}
