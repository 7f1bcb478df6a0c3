//! Sentiment, tone and academic register.

mod lexicon;

use crate::round_to;
use crate::tokenize::Tokenizer;
use anyhow::Result;
use prose_types::{AcademicLevel, SentimentReport, Tone};
use tracing::{debug, warn};

pub use lexicon::LexiconSentiment;

const ACADEMIC_WORDS: &[&str] = &[
    "research", "study", "analysis", "evidence", "methodology", "conclusion", "significant",
    "objective", "evaluate", "framework", "approach", "systematic", "demonstrate", "impact",
    "theory", "variable", "experiment", "finding", "result", "indicate", "data", "interpret",
    "investigate", "observe", "support", "hypothesis", "outcome", "critical", "academic",
    "discuss", "elaborate", "context", "construct", "structure", "compare", "correlation",
];

const INFORMAL_WORDS: &[&str] = &[
    "awesome", "amazing", "cool", "totally", "lol", "omg", "kinda", "yep", "nah", "wanna",
    "gonna", "stuff", "things", "like", "idk", "bruh", "literally", "basically", "dude",
    "super", "heck", "ya", "btw", "pls", "meh", "whatever", "nope", "lmao", "haha",
];

const ACADEMIC_WEIGHT: i64 = 2;
const INFORMAL_WEIGHT: i64 = 3;

/// Long passages with no informal vocabulary are floored to a mildly
/// academic score instead of reading as informal.
const NEUTRAL_FLOOR_MIN_WORDS: usize = 25;
const NEUTRAL_FLOOR_SCORE: i64 = 3;

/// Emotional valence and opinion ratio of a passage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sentiment {
    /// -1.0 (negative) to 1.0 (positive)
    pub polarity: f64,
    /// 0.0 (factual) to 1.0 (opinion)
    pub subjectivity: f64,
}

/// Computes polarity and subjectivity for a passage.
pub trait SentimentScorer: Send + Sync {
    fn sentiment(&self, text: &str) -> Result<Sentiment>;
}

/// Score vocabulary register: academic words add, informal words subtract.
pub fn score_academic_style(tokenizer: &dyn Tokenizer, text: &str) -> Result<i64> {
    let words: Vec<String> = tokenizer
        .alphabetic_words(text)?
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect();

    let occurrences = |vocabulary: &[&str]| -> i64 {
        words
            .iter()
            .filter(|w| vocabulary.contains(&w.as_str()))
            .count() as i64
    };

    let informal_hits = occurrences(INFORMAL_WORDS);
    let mut score = occurrences(ACADEMIC_WORDS) * ACADEMIC_WEIGHT - informal_hits * INFORMAL_WEIGHT;

    if score <= 0 && words.len() > NEUTRAL_FLOOR_MIN_WORDS && informal_hits == 0 {
        score = NEUTRAL_FLOOR_SCORE;
    }

    Ok(score)
}

/// Tone and academic level, absorbing failures into an `Unknown` report.
pub fn analyze_sentiment(
    scorer: &dyn SentimentScorer,
    tokenizer: &dyn Tokenizer,
    text: &str,
) -> SentimentReport {
    match try_analyze_sentiment(scorer, tokenizer, text) {
        Ok(report) => report,
        Err(e) => {
            warn!("Sentiment analysis failed: {:#}", e);
            SentimentReport::unknown()
        }
    }
}

fn try_analyze_sentiment(
    scorer: &dyn SentimentScorer,
    tokenizer: &dyn Tokenizer,
    text: &str,
) -> Result<SentimentReport> {
    let sentiment = scorer.sentiment(text)?;
    let academic_score = score_academic_style(tokenizer, text)?;
    debug!(
        "Sentiment polarity={:.3} subjectivity={:.3} academic_score={}",
        sentiment.polarity, sentiment.subjectivity, academic_score
    );

    Ok(SentimentReport {
        polarity: round_to(sentiment.polarity, 3),
        subjectivity: round_to(sentiment.subjectivity, 3),
        overall_tone: Tone::from_polarity(sentiment.polarity),
        academic_level: AcademicLevel::from_score(academic_score),
    })
}
