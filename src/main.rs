mod args;
mod irv;

use clap::Parser;
use log::{debug, LevelFilter};

use crate::args::Args;
use crate::irv::RuleOverrides;

fn main() {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();
    debug!("args: {:?}", args);

    let overrides = RuleOverrides {
        strict: args.strict,
        max_rounds: args.max_rounds,
    };
    let res = irv::run_election_file(args.config, args.reference, args.out, &overrides);

    if let Err(e) = res {
        eprintln!("An error occurred: {}", e);
        std::process::exit(1);
    }
}
