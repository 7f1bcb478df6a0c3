//! Shared records produced by the prose engine and rendered by its front ends.

mod report;
mod rewrite;

pub use report::{
    AcademicLevel, AnalysisReport, GradeLabel, GradeLevel, GrammarReport, Issue, IssueType,
    ReadabilityLevel, ReadabilityReport, SentimentReport, StatisticsReport, Tone,
    WordFrequencyEntry,
};
pub use rewrite::{ModelState, RewriteResponse, RewriteResult};
