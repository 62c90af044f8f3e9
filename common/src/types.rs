//! 解析結果の型定義
//!
//! CLIと解析コアで共有される型:
//! - Sentiment: 極性から導かれる感情ラベル
//! - AnalysisResult: 1テキストの解析結果（作成後は不変）
//! - AnalysisSummary: 結果列の集計（毎回再計算）

use crate::error::{Error, Result};
use chrono::{DateTime, Local, SubsecRound};
use serde::{Deserialize, Serialize};

/// POSITIVE判定の下限（この値より大きい）
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// NEGATIVE判定の上限（この値より小さい）
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// 小数点以下3桁に丸める
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// 小数点以下1桁に丸める
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// 表示言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "es" | "spanish" | "español" => Ok(Locale::Es),
            "en" | "english" => Ok(Locale::En),
            _ => Err(format!("Unknown locale: {}. Use es or en", s)),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::Es => write!(f, "es"),
            Locale::En => write!(f, "en"),
        }
    }
}

/// 感情ラベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// 調整後極性からラベルを決定（±0.05ちょうどはNEUTRAL）
    pub fn classify(polarity: f64) -> Self {
        if polarity > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if polarity < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
        }
    }

    /// 表示用ラベル
    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, _) => self.as_str(),
            (Locale::Es, Sentiment::Positive) => "POSITIVO",
            (Locale::Es, Sentiment::Negative) => "NEGATIVO",
            (Locale::Es, Sentiment::Neutral) => "NEUTRAL",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1テキストの解析結果
///
/// `sentiment` は作成時の `polarity` から決まり、以後変更されない。
/// 同じテキストの再解析は新しい結果になる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    text: String,
    polarity: f64,
    subjectivity: f64,
    sentiment: Sentiment,
    timestamp: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    line_number: Option<usize>,
}

impl AnalysisResult {
    /// 結果を作成する
    ///
    /// テキストはトリムして保存し、極性・主観性は範囲内に収めて3桁に丸める。
    /// ラベルは丸める前の極性で決める。タイムスタンプは秒単位に切り捨てる。
    pub fn new(
        text: &str,
        polarity: f64,
        subjectivity: f64,
        timestamp: DateTime<Local>,
    ) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyInput);
        }

        let polarity = polarity.clamp(-1.0, 1.0);
        let sentiment = Sentiment::classify(polarity);

        Ok(Self {
            text: text.to_string(),
            polarity: round3(polarity),
            subjectivity: round3(subjectivity.clamp(0.0, 1.0)),
            sentiment,
            timestamp: timestamp.trunc_subsecs(0),
            line_number: None,
        })
    }

    /// バッチファイルの行番号を付与
    pub fn with_line_number(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn polarity(&self) -> f64 {
        self.polarity
    }

    pub fn subjectivity(&self) -> f64 {
        self.subjectivity
    }

    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn line_number(&self) -> Option<usize> {
        self.line_number
    }

    /// 表示用タイムスタンプ (YYYY-MM-DD HH:MM:SS)
    pub fn timestamp_display(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// 結果列の統計サマリー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_texts: usize,
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub positive_percentage: f64,
    pub negative_percentage: f64,
    pub neutral_percentage: f64,
    pub average_polarity: f64,
    pub average_subjectivity: f64,
}

impl AnalysisSummary {
    /// 結果列から集計する（空なら None）
    pub fn from_results(results: &[AnalysisResult]) -> Option<Self> {
        if results.is_empty() {
            return None;
        }

        let total = results.len();
        let count = |label: Sentiment| results.iter().filter(|r| r.sentiment == label).count();
        let positive = count(Sentiment::Positive);
        let negative = count(Sentiment::Negative);
        let neutral = count(Sentiment::Neutral);

        let percentage = |n: usize| round1(n as f64 / total as f64 * 100.0);
        let average = |f: fn(&AnalysisResult) -> f64| {
            results.iter().map(f).sum::<f64>() / total as f64
        };

        Some(Self {
            total_texts: total,
            positive_count: positive,
            negative_count: negative,
            neutral_count: neutral,
            positive_percentage: percentage(positive),
            negative_percentage: percentage(negative),
            neutral_percentage: percentage(neutral),
            average_polarity: round3(average(AnalysisResult::polarity)),
            average_subjectivity: round3(average(AnalysisResult::subjectivity)),
        })
    }

    /// ラベル別件数
    pub fn count_of(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive_count,
            Sentiment::Negative => self.negative_count,
            Sentiment::Neutral => self.neutral_count,
        }
    }
}
