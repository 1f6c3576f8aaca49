use clap::Parser;

/// This is an instant-runoff tabulation program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file containing the election: candidates, rules and ballots in JSON format.
    /// See the manual of the instant_runoff library for a description of the format.
    #[clap(short, long, value_parser)]
    pub config: String,
    /// (file path) A reference file containing the outcome of an election in JSON format. If provided, irvtally will
    /// check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written in JSON format to the given
    /// location. By default, it is written to the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// If passed as an argument, choices for candidates that are not declared in the election file are
    /// removed from the ballots instead of bringing these candidates into the race.
    #[clap(long, takes_value = false)]
    pub strict: bool,

    /// (number) The maximum number of rounds. By default, there is one round per candidate.
    #[clap(long, value_parser)]
    pub max_rounds: Option<u32>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
