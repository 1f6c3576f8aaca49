use crate::irv::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
    #[serde(rename = "contestJurisdiction")]
    pub contest_jurisdiction: Option<String>,
    #[serde(rename = "contestOffice")]
    pub contest_office: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub date: Option<String>,
    pub jurisdiction: Option<String>,
    pub office: Option<String>,
    pub threshold: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionCandidate {
    pub name: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionRules {
    #[serde(rename = "candidateAdmission")]
    pub _candidate_admission: Option<String>,
    #[serde(rename = "maxRounds")]
    pub _max_rounds: Option<JSValue>,
}

impl ElectionRules {
    pub fn candidate_admission(&self) -> IrvResult<CandidateAdmission> {
        match self._candidate_admission.as_deref() {
            None | Some("permissive") => Ok(CandidateAdmission::Permissive),
            Some("strict") => Ok(CandidateAdmission::Strict),
            Some(x) => {
                whatever!("unknown candidate admission: {}", x)
            }
        }
    }

    /// None stands for one round per candidate.
    pub fn max_rounds(&self) -> IrvResult<Option<u32>> {
        match &self._max_rounds {
            None => Ok(None),
            Some(JSValue::String(s)) if s == "max" => Ok(None),
            x => {
                let n = read_js_int(x)?;
                if n == 0 {
                    whatever!("maxRounds must be positive")
                }
                let n = u32::try_from(n).ok().context(ParsingJsonNumberSnafu {})?;
                Ok(Some(n))
            }
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    pub candidates: Option<Vec<ElectionCandidate>>,
    pub rules: Option<ElectionRules>,
    pub ballots: Vec<Vec<JSValue>>,
}

impl ElectionConfig {
    pub fn candidate_names(&self) -> Option<Vec<String>> {
        self.candidates
            .as_ref()
            .map(|cs| cs.iter().map(|c| c.name.clone()).collect())
    }

    /// The choices of every ballot, as candidate names.
    /// Blank choices (empty strings and nulls) are skipped.
    pub fn ballot_choices(&self) -> IrvResult<Vec<Vec<String>>> {
        let mut res: Vec<Vec<String>> = Vec::with_capacity(self.ballots.len());
        for (idx, ballot) in self.ballots.iter().enumerate() {
            let mut choices: Vec<String> = Vec::new();
            for choice in ballot.iter() {
                match choice {
                    JSValue::String(s) if s.is_empty() => {
                        debug!("ballot {}: skipping blank choice", idx);
                    }
                    JSValue::Null => {
                        debug!("ballot {}: skipping blank choice", idx);
                    }
                    JSValue::String(s) => choices.push(s.clone()),
                    JSValue::Number(n) if n.is_u64() || n.is_i64() => choices.push(n.to_string()),
                    x => {
                        return CandidateLabelSnafu {
                            label: x.to_string(),
                            ballot: idx,
                        }
                        .fail()
                    }
                }
            }
            res.push(choices);
        }
        Ok(res)
    }
}

pub fn read_config(path: String) -> IrvResult<ElectionConfig> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let config: ElectionConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: String) -> IrvResult<JSValue> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

fn read_js_int(x: &Option<JSValue>) -> IrvResult<usize> {
    match x {
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {}),
        Some(JSValue::String(s)) => s.parse::<usize>().ok().context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}
