use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of finding reported by the grammar heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Grammar,
    Style,
}

/// A single grammar or style finding, in detection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: IssueType,
}

impl Issue {
    pub fn grammar(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: IssueType::Grammar,
        }
    }

    pub fn style(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: IssueType::Style,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarReport {
    pub issues: Vec<Issue>,
    pub style_suggestions: Vec<Issue>,
}

/// Discrete reading-ease band, plus the sentinels used when no score exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadabilityLevel {
    #[serde(rename = "Very Easy")]
    VeryEasy,
    #[serde(rename = "Easy")]
    Easy,
    #[serde(rename = "Fairly Easy")]
    FairlyEasy,
    #[serde(rename = "Standard")]
    Standard,
    #[serde(rename = "Fairly Difficult")]
    FairlyDifficult,
    #[serde(rename = "Difficult")]
    Difficult,
    #[serde(rename = "Very Difficult")]
    VeryDifficult,
    #[serde(rename = "Insufficient text")]
    InsufficientText,
    #[serde(rename = "Analysis failed")]
    AnalysisFailed,
    #[serde(rename = "N/A")]
    NotApplicable,
    #[serde(rename = "Error")]
    Error,
}

impl ReadabilityLevel {
    /// Map a Flesch reading-ease score onto its band.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::VeryEasy
        } else if score >= 80.0 {
            Self::Easy
        } else if score >= 70.0 {
            Self::FairlyEasy
        } else if score >= 60.0 {
            Self::Standard
        } else if score >= 50.0 {
            Self::FairlyDifficult
        } else if score >= 30.0 {
            Self::Difficult
        } else {
            Self::VeryDifficult
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryEasy => "Very Easy",
            Self::Easy => "Easy",
            Self::FairlyEasy => "Fairly Easy",
            Self::Standard => "Standard",
            Self::FairlyDifficult => "Fairly Difficult",
            Self::Difficult => "Difficult",
            Self::VeryDifficult => "Very Difficult",
            Self::InsufficientText => "Insufficient text",
            Self::AnalysisFailed => "Analysis failed",
            Self::NotApplicable => "N/A",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for ReadabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeLabel {
    #[serde(rename = "N/A")]
    NotApplicable,
    Error,
}

/// Grade level is numeric when computed, a label otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GradeLevel {
    Score(f64),
    Label(GradeLabel),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityReport {
    pub flesch_score: f64,
    pub grade_level: GradeLevel,
    pub readability_level: ReadabilityLevel,
}

impl ReadabilityReport {
    /// Returned without scoring when the text is too short to measure.
    pub fn insufficient_text() -> Self {
        Self {
            flesch_score: 0.0,
            grade_level: GradeLevel::Label(GradeLabel::NotApplicable),
            readability_level: ReadabilityLevel::InsufficientText,
        }
    }

    /// Returned when the readability formula itself failed.
    pub fn analysis_failed() -> Self {
        Self {
            flesch_score: 0.0,
            grade_level: GradeLevel::Label(GradeLabel::Error),
            readability_level: ReadabilityLevel::AnalysisFailed,
        }
    }

    pub fn not_applicable() -> Self {
        Self {
            flesch_score: 0.0,
            grade_level: GradeLevel::Label(GradeLabel::NotApplicable),
            readability_level: ReadabilityLevel::NotApplicable,
        }
    }

    pub fn error() -> Self {
        Self {
            flesch_score: 0.0,
            grade_level: GradeLevel::Label(GradeLabel::Error),
            readability_level: ReadabilityLevel::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
    Unknown,
    #[serde(rename = "N/A")]
    NotApplicable,
    Error,
}

impl Tone {
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.1 {
            Self::Positive
        } else if polarity < -0.1 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

/// How closely the vocabulary matches an academic register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcademicLevel {
    #[serde(rename = "high")]
    High,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "informal")]
    Informal,
    Unknown,
    #[serde(rename = "N/A")]
    NotApplicable,
    Error,
}

impl AcademicLevel {
    pub fn from_score(score: i64) -> Self {
        if score > 10 {
            Self::High
        } else if score > 3 {
            Self::Medium
        } else if score > 0 {
            Self::Low
        } else {
            Self::Informal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub polarity: f64,
    pub subjectivity: f64,
    pub overall_tone: Tone,
    pub academic_level: AcademicLevel,
}

impl SentimentReport {
    pub fn unknown() -> Self {
        Self::sentinel(Tone::Unknown, AcademicLevel::Unknown)
    }

    pub fn not_applicable() -> Self {
        Self::sentinel(Tone::NotApplicable, AcademicLevel::NotApplicable)
    }

    pub fn error() -> Self {
        Self::sentinel(Tone::Error, AcademicLevel::Error)
    }

    fn sentinel(overall_tone: Tone, academic_level: AcademicLevel) -> Self {
        Self {
            polarity: 0.0,
            subjectivity: 0.0,
            overall_tone,
            academic_level,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub word_count: usize,
    pub sentence_count: usize,
    pub character_count: usize,
    pub avg_words_per_sentence: f64,
}

impl StatisticsReport {
    /// All-zero counts that still carry the input length.
    pub fn empty(character_count: usize) -> Self {
        Self {
            character_count,
            ..Self::default()
        }
    }
}

/// A word and how often it occurs. Serialized as a `[word, count]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, usize)", into = "(String, usize)")]
pub struct WordFrequencyEntry {
    pub word: String,
    pub count: usize,
}

impl From<(String, usize)> for WordFrequencyEntry {
    fn from((word, count): (String, usize)) -> Self {
        Self { word, count }
    }
}

impl From<WordFrequencyEntry> for (String, usize) {
    fn from(entry: WordFrequencyEntry) -> Self {
        (entry.word, entry.count)
    }
}

/// Everything the analyzer knows about one passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub grammar: GrammarReport,
    pub readability: ReadabilityReport,
    pub sentiment: SentimentReport,
    pub statistics: StatisticsReport,
    pub top_words: Vec<WordFrequencyEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub success: bool,
}

impl AnalysisReport {
    /// Report for empty or whitespace-only input.
    pub fn no_text() -> Self {
        Self {
            grammar: GrammarReport::default(),
            readability: ReadabilityReport::not_applicable(),
            sentiment: SentimentReport::not_applicable(),
            statistics: StatisticsReport::empty(0),
            top_words: Vec::new(),
            error: Some("No text provided".to_string()),
            success: false,
        }
    }

    /// Whole-report degradation after the aggregation itself failed.
    pub fn failed(message: &str, character_count: usize) -> Self {
        Self {
            grammar: GrammarReport::default(),
            readability: ReadabilityReport::error(),
            sentiment: SentimentReport::error(),
            statistics: StatisticsReport::empty(character_count),
            top_words: Vec::new(),
            error: Some(format!("Analysis failed: {}", message)),
            success: false,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}
