//! ベース感情スコアラー
//!
//! 解析コアが依存する汎用スコアリング機能。`BaseScorer` を実装すれば
//! 任意の辞書・統計モデルに差し替えられる。
//!
//! 標準実装 `PatternScorer` は英語の単語辞書（極性・主観性のペア）を使う:
//! 1. 単語ごとにスコアを引く
//! 2. 直前の強調語で倍率をかける
//! 3. 直前の否定語で極性を -0.5 倍する
//! 4. 一致した単語の平均を取る

use crate::error::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"[\p{L}']+").unwrap();
}

/// 否定語の後の極性倍率
const NEGATION_FACTOR: f64 = -0.5;

/// ベーススコア
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BaseScore {
    /// -1.0 〜 1.0
    pub polarity: f64,
    /// 0.0 〜 1.0
    pub subjectivity: f64,
}

impl BaseScore {
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}

/// ベーススコアラーの契約
///
/// 認識できないテキストには 0.0 を返してよい（キーワード補正の対象になる）。
pub trait BaseScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<BaseScore>;
}

impl<T: BaseScorer + ?Sized> BaseScorer for Box<T> {
    fn score(&self, text: &str) -> Result<BaseScore> {
        (**self).score(text)
    }
}

/// 単語のスコア
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordScore {
    pub polarity: f64,
    pub subjectivity: f64,
}

/// 英語辞書ベースの標準スコアラー
pub struct PatternScorer {
    words: HashMap<String, WordScore>,
    negations: Vec<String>,
    intensifiers: HashMap<String, f64>,
}

impl Default for PatternScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternScorer {
    pub fn new() -> Self {
        let entries: &[(&str, f64, f64)] = &[
            // positive
            ("love", 0.5, 0.6),
            ("loved", 0.7, 0.8),
            ("like", 0.2, 0.4),
            ("amazing", 0.6, 0.9),
            ("awesome", 1.0, 1.0),
            ("wonderful", 1.0, 1.0),
            ("excellent", 1.0, 1.0),
            ("perfect", 1.0, 1.0),
            ("fantastic", 0.4, 0.9),
            ("incredible", 0.9, 0.9),
            ("great", 0.8, 0.75),
            ("good", 0.7, 0.6),
            ("nice", 0.6, 1.0),
            ("happy", 0.8, 1.0),
            ("glad", 0.5, 1.0),
            ("beautiful", 0.85, 1.0),
            ("best", 1.0, 0.3),
            ("better", 0.5, 0.5),
            ("okay", 0.5, 0.5),
            ("fine", 0.4, 0.5),
            ("fun", 0.3, 0.2),
            ("helpful", 0.5, 0.5),
            ("pleasant", 0.73, 0.97),
            ("satisfied", 0.5, 1.0),
            ("success", 0.3, 0.0),
            ("recommend", 0.4, 0.5),
            // negative
            ("terrible", -1.0, 1.0),
            ("horrible", -1.0, 1.0),
            ("awful", -1.0, 1.0),
            ("worst", -1.0, 1.0),
            ("bad", -0.7, 0.667),
            ("worse", -0.4, 0.6),
            ("poor", -0.4, 0.6),
            ("hate", -0.8, 0.9),
            ("hated", -0.9, 0.7),
            ("sad", -0.5, 1.0),
            ("angry", -0.5, 1.0),
            ("boring", -1.0, 1.0),
            ("disappointed", -0.75, 0.75),
            ("disappointing", -0.6, 0.7),
            ("annoying", -0.8, 0.9),
            ("ugly", -0.7, 1.0),
            ("broken", -0.4, 0.4),
            ("wrong", -0.5, 0.9),
            ("useless", -0.5, 0.0),
            ("slow", -0.3, 0.39),
            ("problem", -0.2, 0.3),
        ];

        let words = entries
            .iter()
            .map(|&(w, polarity, subjectivity)| {
                (w.to_string(), WordScore { polarity, subjectivity })
            })
            .collect();

        let negations = vec![
            "not", "no", "never", "neither", "nor", "cannot", "cant", "don't", "dont",
            "doesn't", "doesnt", "didn't", "didnt", "isn't", "isnt", "wasn't", "wasnt",
            "aren't", "arent", "won't", "wont",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let mut intensifiers = HashMap::new();
        intensifiers.insert("very".to_string(), 1.3);
        intensifiers.insert("really".to_string(), 1.3);
        intensifiers.insert("extremely".to_string(), 1.5);
        intensifiers.insert("so".to_string(), 1.3);
        intensifiers.insert("too".to_string(), 1.3);
        intensifiers.insert("quite".to_string(), 1.1);
        intensifiers.insert("pretty".to_string(), 1.1);
        intensifiers.insert("slightly".to_string(), 0.5);
        intensifiers.insert("somewhat".to_string(), 0.7);

        Self {
            words,
            negations,
            intensifiers,
        }
    }

    /// 辞書に単語を追加（既存なら上書き）
    pub fn add_word(&mut self, word: &str, polarity: f64, subjectivity: f64) {
        self.words.insert(
            word.to_lowercase(),
            WordScore {
                polarity: polarity.clamp(-1.0, 1.0),
                subjectivity: subjectivity.clamp(0.0, 1.0),
            },
        );
    }

    pub fn word_score(&self, word: &str) -> Option<WordScore> {
        self.words.get(&word.to_lowercase()).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.iter().any(|n| n == word)
    }

    pub fn intensifier(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }
}

impl BaseScorer for PatternScorer {
    fn score(&self, text: &str) -> Result<BaseScore> {
        let lower = text.to_lowercase();
        let mut polarities = Vec::new();
        let mut subjectivities = Vec::new();

        let mut negate = false;
        let mut multiplier = 1.0;

        for token in WORD_RE.find_iter(&lower) {
            let word = token.as_str();

            if self.is_negation(word) {
                negate = true;
                continue;
            }

            if let Some(m) = self.intensifier(word) {
                multiplier = m;
                continue;
            }

            if let Some(ws) = self.words.get(word) {
                let mut polarity = ws.polarity * multiplier;
                if negate {
                    polarity *= NEGATION_FACTOR;
                }
                polarities.push(polarity.clamp(-1.0, 1.0));
                subjectivities.push((ws.subjectivity * multiplier).clamp(0.0, 1.0));
            }

            // 修飾は直後の1語にのみ掛かる
            negate = false;
            multiplier = 1.0;
        }

        if polarities.is_empty() {
            return Ok(BaseScore::default());
        }

        let n = polarities.len() as f64;
        Ok(BaseScore::new(
            polarities.iter().sum::<f64>() / n,
            subjectivities.iter().sum::<f64>() / n,
        ))
    }
}
