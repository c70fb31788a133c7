use std::error::Error;

use clap::Args;

use super::{print_json, ModelArgs};

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub model: ModelArgs,
    /// Exit with an error when any record was rejected.
    #[arg(long)]
    pub deny_failures: bool,
}

pub fn run(args: &CheckArgs) -> Result<(), Box<dyn Error>> {
    let (_, report) = args.model.load()?;
    print_json(&report)?;
    if args.deny_failures && !report.is_clean() {
        return Err(format!(
            "{} of {} vertex records rejected",
            report.failed.len(),
            report.total()
        )
        .into());
    }
    Ok(())
}
