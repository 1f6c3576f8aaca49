use log::{debug, info, warn};

use instant_runoff::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod config_reader;

use crate::irv::config_reader::*;

#[derive(Debug, Snafu)]
pub enum IrvError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a positive number"))]
    ParsingJsonNumber {},
    #[snafu(display("Ballot {ballot}: cannot read candidate {label}"))]
    CandidateLabel { label: String, ballot: usize },
    #[snafu(display("Voting error: {source}"))]
    Voting { source: VotingErrors },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type IrvResult<T> = Result<T, IrvError>;

/// Rules passed on the command line. They take precedence over the election file.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RuleOverrides {
    pub strict: bool,
    pub max_rounds: Option<u32>,
}

fn result_stats_to_json(rs: &VotingResult<String>) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for round_stat in rs.round_stats.iter() {
        let mut tally: JSMap<String, JSValue> = JSMap::new();
        for (name, count) in round_stat.tally.iter() {
            tally.insert(name.clone(), json!(count.to_string()));
        }

        let mut tally_results: Vec<JSValue> = Vec::new();
        for elim_stats in round_stat.eliminated.iter() {
            let mut transfers: JSMap<String, JSValue> = JSMap::new();
            for (name, count) in elim_stats.transfers.iter() {
                transfers.insert(name.clone(), json!(count.to_string()));
            }
            if elim_stats.exhausted > 0 {
                transfers.insert(
                    "exhausted".to_string(),
                    json!(elim_stats.exhausted.to_string()),
                );
            }
            tally_results.push(json!({
                "eliminated": elim_stats.candidate,
                "transfers": transfers
            }));
        }
        if let Some(winner_name) = &round_stat.elected {
            tally_results.push(json!({
                "elected": winner_name,
                "transfers": {}
            }));
        }

        let js = json!({"round": round_stat.round, "tally": tally, "tallyResults": tally_results});
        l.push(js);
    }
    l
}

fn termination_label(t: Termination) -> &'static str {
    match t {
        Termination::Majority => "majority",
        Termination::SoleSurvivor => "soleSurvivor",
        Termination::Deadlock => "deadlock",
        Termination::NoBallots => "noBallots",
        Termination::RoundBudgetExhausted => "roundBudgetExhausted",
    }
}

fn build_summary_js(config: &ElectionConfig, rv: &VotingResult<String>) -> JSValue {
    let c = OutputConfig {
        contest: config.output_settings.contest_name.clone(),
        date: config.output_settings.contest_date.clone(),
        jurisdiction: config.output_settings.contest_jurisdiction.clone(),
        office: config.output_settings.contest_office.clone(),
        threshold: Some(rv.threshold.to_string()),
    };
    json!({
        "config": c,
        "results": result_stats_to_json(rv),
        "winner": rv.decision.winner(),
        "termination": termination_label(rv.termination)
    })
}

fn validate_rules(config: &ElectionConfig, overrides: &RuleOverrides) -> IrvResult<VoteRules> {
    let mut rules = VoteRules::DEFAULT_RULES;
    if let Some(file_rules) = &config.rules {
        rules.admission = file_rules.candidate_admission()?;
        rules.max_rounds = file_rules.max_rounds()?;
    }
    if overrides.strict {
        rules.admission = CandidateAdmission::Strict;
    }
    if let Some(n) = overrides.max_rounds {
        if n == 0 {
            whatever!("--max-rounds must be positive")
        }
        rules.max_rounds = Some(n);
    }
    if rules.admission == CandidateAdmission::Strict && config.candidates.is_none() {
        warn!("Strict candidate admission has no effect when no candidates are declared");
    }
    Ok(rules)
}

/// Runs the count described by the election file and returns the summary.
pub fn tabulate(config: &ElectionConfig, overrides: &RuleOverrides) -> IrvResult<JSValue> {
    let rules = validate_rules(config, overrides)?;
    let ballots = config.ballot_choices()?;
    let candidates = config.candidate_names();
    info!(
        "Contest {}: {} ballots",
        config.output_settings.contest_name,
        ballots.len()
    );

    let result =
        run_election(&ballots, candidates.as_deref(), &rules).context(VotingSnafu {})?;
    match result.decision.winner() {
        Some(w) => info!("Winner: {}", w),
        None => info!("No winner ({})", termination_label(result.termination)),
    }
    Ok(build_summary_js(config, &result))
}

fn check_reference(summary: &JSValue, summary_p: String) -> IrvResult<()> {
    let summary_ref = read_summary(summary_p)?;
    debug!("summary: {:?}", summary_ref);
    if summary_ref != *summary {
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        let pretty_js_stats = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
        warn!("Found differences with the reference summary");
        print_diff(
            pretty_js_summary_ref.as_str(),
            pretty_js_stats.as_str(),
            "\n",
        );
        return ReferenceMismatchSnafu {}.fail();
    }
    Ok(())
}

pub fn run_election_file(
    config_path: String,
    check_summary_path: Option<String>,
    out_path: Option<String>,
    overrides: &RuleOverrides,
) -> IrvResult<()> {
    let config = read_config(config_path)?;
    debug!("config: {:?}", config);

    let summary = tabulate(&config, overrides)?;
    let pretty_js_stats = serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;
    match out_path.as_deref() {
        None | Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => {
            fs::write(path, &pretty_js_stats).context(WritingSummarySnafu { path })?;
            info!("Summary written to {}", path);
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        check_reference(&summary, summary_p)?;
    }
    Ok(())
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) {
    let _ = env_logger::builder().is_test(true).try_init();
    let test_dir = option_env!("IRV_TEST_DIR")
        .unwrap_or(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data"));
    info!("Running test {}", test_name);
    let res = run_election_file(
        format!("{}/{}/{}_config.json", test_dir, test_name, test_name),
        Some(format!(
            "{}/{}/{}_expected_summary.json",
            test_dir, test_name, test_name
        )),
        None,
        &RuleOverrides::default(),
    );
    if let Err(e) = res {
        panic!("Test {} failed: {}", test_name, e);
    }
}
