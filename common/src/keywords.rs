//! キーワード設定
//!
//! ベーススコアラーが拾えない非英語テキスト向けの補正用語彙。
//! 大文字小文字を無視した部分文字列一致で数える。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_POSITIVE: &[&str] = &[
    "excelente", "fantástico", "increíble", "maravilloso", "perfecto",
    "genial", "bueno", "buena", "amor", "feliz", "alegre", "contento",
    "satisfecho", "encanta", "gusta", "hermoso", "bella", "éxito",
];

const DEFAULT_NEGATIVE: &[&str] = &[
    "terrible", "horrible", "malo", "mala", "pésimo", "odio", "detesto",
    "triste", "enojado", "molesto", "frustrado", "decepcionado", "error",
    "problema", "falla", "defecto", "disgusto", "desagradable",
];

/// ポジティブ/ネガティブのキーワード集合
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordConfig {
    positive: Vec<String>,
    negative: Vec<String>,
}

/// テキスト中で一致したキーワード数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordMatches {
    pub positive: usize,
    pub negative: usize,
}

impl Default for KeywordConfig {
    /// スペイン語の標準語彙
    fn default() -> Self {
        Self::new(DEFAULT_POSITIVE, DEFAULT_NEGATIVE)
    }
}

impl KeywordConfig {
    /// キーワードを小文字化・重複除去して作成
    pub fn new<P, N>(positive: P, negative: N) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        Self {
            positive: normalize(positive),
            negative: normalize(negative),
        }
    }

    /// JSONファイルから読み込み
    ///
    /// 形式: `{"positive": ["..."], "negative": ["..."]}`
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: KeywordConfig = serde_json::from_str(json)?;
        let config = Self::new(raw.positive, raw.negative);
        if config.positive.is_empty() && config.negative.is_empty() {
            return Err(Error::Config("keyword lists are both empty".into()));
        }
        Ok(config)
    }

    pub fn positive(&self) -> &[String] {
        &self.positive
    }

    pub fn negative(&self) -> &[String] {
        &self.negative
    }

    /// 小文字化済みテキスト中のキーワードを数える
    ///
    /// 各キーワードは出現回数に関わらず最大1回。単語の一部に含まれる場合も数える。
    pub fn count_matches(&self, text_lower: &str) -> KeywordMatches {
        let count = |words: &[String]| {
            words
                .iter()
                .filter(|w| text_lower.contains(w.as_str()))
                .count()
        };

        KeywordMatches {
            positive: count(&self.positive),
            negative: count(&self.negative),
        }
    }
}

fn normalize<I>(words: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for word in words {
        let w = word.as_ref().trim().to_lowercase();
        if !w.is_empty() && !out.contains(&w) {
            out.push(w);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_lexicon() {
        let config = KeywordConfig::default();
        assert_eq!(config.positive().len(), 18);
        assert_eq!(config.negative().len(), 18);
        assert!(config.positive().contains(&"fantástico".to_string()));
        assert!(config.negative().contains(&"odio".to_string()));
    }

    #[test]
    fn test_count_matches_distinct_keywords() {
        let config = KeywordConfig::default();
        // "excelente" が2回出ても1つとして数える
        let m = config.count_matches("excelente, excelente y genial");
        assert_eq!(m.positive, 2);
        assert_eq!(m.negative, 0);
    }

    #[test]
    fn test_count_matches_substring() {
        let config = KeywordConfig::default();
        // "malo" は "malograr" の一部
        let m = config.count_matches("no quiero malograr el plan");
        assert_eq!(m.negative, 1);
        // "bueno" は "buenos" に含まれ、"buena" は含まれない
        let m = config.count_matches("buenos días");
        assert_eq!(m.positive, 1);
    }

    #[test]
    fn test_new_normalizes() {
        let config = KeywordConfig::new(["Great", " great ", ""], ["BAD"]);
        assert_eq!(config.positive(), &["great".to_string()]);
        assert_eq!(config.negative(), &["bad".to_string()]);
    }

    #[test]
    fn test_from_json_str() {
        let config =
            KeywordConfig::from_json_str(r#"{"positive": ["Gut"], "negative": ["schlecht"]}"#)
                .expect("パース失敗");
        let m = config.count_matches("sehr gut, nicht schlecht");
        assert_eq!(m, KeywordMatches { positive: 1, negative: 1 });
    }

    #[test]
    fn test_from_json_str_rejects_empty_lists() {
        let err = KeywordConfig::from_json_str(r#"{"positive": [], "negative": [" "]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"positive": ["bom"], "negative": ["ruim"]}}"#).unwrap();

        let config = KeywordConfig::from_json_file(file.path()).expect("読み込み失敗");
        assert_eq!(config.positive(), &["bom".to_string()]);
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = KeywordConfig::from_json_file(Path::new("/nonexistent/keywords.json"))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
