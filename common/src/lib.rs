//! Sentiment Common Library
//!
//! 感情解析コア（CLIから利用される）

pub mod types;
pub mod error;
pub mod keywords;
pub mod scorer;
pub mod describe;
pub mod analyzer;

pub use types::{AnalysisResult, AnalysisSummary, Locale, Sentiment};
pub use error::{Error, Result};
pub use keywords::{KeywordConfig, KeywordMatches};
pub use scorer::{BaseScore, BaseScorer, PatternScorer};
pub use describe::{
    describe_polarity_intensity, describe_polarity_intensity_in, describe_subjectivity,
    describe_subjectivity_in,
};
pub use analyzer::{adjust_polarity, classify, summarize, BatchOutcome, SentimentAnalyzer};
