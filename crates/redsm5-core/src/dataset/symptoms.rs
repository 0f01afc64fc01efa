//! DSM-5 symptom labels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The nine DSM-5 depression criteria used as post labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DsmSymptom {
    DepressedMood,
    Anhedonia,
    AppetiteChange,
    SleepIssues,
    Psychomotor,
    Fatigue,
    Worthlessness,
    CognitiveIssues,
    SuicidalThoughts,
}

impl DsmSymptom {
    pub const ALL: [DsmSymptom; 9] = [
        DsmSymptom::DepressedMood,
        DsmSymptom::Anhedonia,
        DsmSymptom::AppetiteChange,
        DsmSymptom::SleepIssues,
        DsmSymptom::Psychomotor,
        DsmSymptom::Fatigue,
        DsmSymptom::Worthlessness,
        DsmSymptom::CognitiveIssues,
        DsmSymptom::SuicidalThoughts,
    ];

    /// Label as it appears in the corpus files
    pub fn as_str(&self) -> &'static str {
        match self {
            DsmSymptom::DepressedMood => "DEPRESSED_MOOD",
            DsmSymptom::Anhedonia => "ANHEDONIA",
            DsmSymptom::AppetiteChange => "APPETITE_CHANGE",
            DsmSymptom::SleepIssues => "SLEEP_ISSUES",
            DsmSymptom::Psychomotor => "PSYCHOMOTOR",
            DsmSymptom::Fatigue => "FATIGUE",
            DsmSymptom::Worthlessness => "WORTHLESSNESS",
            DsmSymptom::CognitiveIssues => "COGNITIVE_ISSUES",
            DsmSymptom::SuicidalThoughts => "SUICIDAL_THOUGHTS",
        }
    }

    /// Symptom covered by a Beck Depression Inventory item (1..=21)
    pub fn from_bdi_item(item: u8) -> Option<Self> {
        let symptom = match item {
            1 | 2 | 10 | 17 => DsmSymptom::DepressedMood,
            3 | 5 | 6 | 7 | 8 | 14 => DsmSymptom::Worthlessness,
            4 | 12 | 21 => DsmSymptom::Anhedonia,
            9 => DsmSymptom::SuicidalThoughts,
            11 => DsmSymptom::Psychomotor,
            13 | 19 => DsmSymptom::CognitiveIssues,
            15 | 20 => DsmSymptom::Fatigue,
            16 => DsmSymptom::SleepIssues,
            18 => DsmSymptom::AppetiteChange,
            _ => return None,
        };
        Some(symptom)
    }
}

impl fmt::Display for DsmSymptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DsmSymptom {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DsmSymptom::ALL
            .into_iter()
            .find(|symptom| symptom.as_str() == wanted)
            .ok_or_else(|| format!("Unknown DSM-5 symptom: {}", s))
    }
}
