//! 感情解析コア
//!
//! ベーススコア → キーワード補正 → ラベル分類 → 結果生成 の流れを持つ。
//! アナライザが保持するのは読み取り専用のキーワード設定とスコアラーのみ。

use crate::error::{Error, Result};
use crate::keywords::{KeywordConfig, KeywordMatches};
use crate::scorer::{BaseScorer, PatternScorer};
use crate::types::{AnalysisResult, AnalysisSummary, Sentiment};
use chrono::{DateTime, Local};
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

/// この絶対値未満のベース極性は「シグナルなし」として扱う
const NO_SIGNAL_THRESHOLD: f64 = 0.1;
/// シグナルなし時のキーワード補正の基準値
const KEYWORD_BASE: f64 = 0.3;
/// シグナルなし時のキーワード1件あたりの加算
const KEYWORD_STEP: f64 = 0.1;
/// 既存シグナル増幅時のキーワード1件あたりの加算
const AMPLIFY_STEP: f64 = 0.2;

/// 起動時チェックに使うテキスト
const PROBE_TEXT: &str = "Texto de prueba";

/// キーワード一致数でベース極性を補正する
pub fn adjust_polarity(base: f64, matches: KeywordMatches) -> f64 {
    let KeywordMatches { positive, negative } = matches;

    if base.abs() < NO_SIGNAL_THRESHOLD {
        if positive > negative {
            return (KEYWORD_BASE + KEYWORD_STEP * positive as f64).min(1.0);
        }
        if negative > positive {
            return (-KEYWORD_BASE - KEYWORD_STEP * negative as f64).max(-1.0);
        }
        return base;
    }

    if positive > 0 && base > 0.0 {
        (base + AMPLIFY_STEP * positive as f64).min(1.0)
    } else if negative > 0 && base < 0.0 {
        (base - AMPLIFY_STEP * negative as f64).max(-1.0)
    } else {
        base
    }
}

/// ラベル分類（`Sentiment::classify` と同じ）
pub fn classify(polarity: f64) -> Sentiment {
    Sentiment::classify(polarity)
}

/// 結果列の集計
pub fn summarize(results: &[AnalysisResult]) -> Option<AnalysisSummary> {
    AnalysisSummary::from_results(results)
}

/// バッチ解析の結果
///
/// `results` は入力順。失敗した行は `failures` に `Error::LineScoring` として残る。
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub results: Vec<AnalysisResult>,
    pub failures: Vec<Error>,
}

impl BatchOutcome {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// 失敗した行番号
    pub fn failed_lines(&self) -> Vec<usize> {
        self.failures
            .iter()
            .filter_map(|e| match e {
                Error::LineScoring { line, .. } => Some(*line),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, line: usize, scored: Result<AnalysisResult>) {
        match scored {
            Ok(result) => self.results.push(result.with_line_number(line)),
            Err(e) => {
                warn!(line, error = %e, "skipping line that failed to score");
                self.failures.push(e.at_line(line));
            }
        }
    }
}

/// 感情アナライザ
pub struct SentimentAnalyzer<S = PatternScorer> {
    scorer: S,
    keywords: KeywordConfig,
}

impl Default for SentimentAnalyzer<PatternScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer<PatternScorer> {
    /// 標準スコアラーとスペイン語キーワードで作成
    pub fn new() -> Self {
        Self::with_scorer(PatternScorer::new(), KeywordConfig::default())
    }

    pub fn with_keywords(keywords: KeywordConfig) -> Self {
        Self::with_scorer(PatternScorer::new(), keywords)
    }
}

impl<S: BaseScorer> SentimentAnalyzer<S> {
    pub fn with_scorer(scorer: S, keywords: KeywordConfig) -> Self {
        Self { scorer, keywords }
    }

    pub fn keywords(&self) -> &KeywordConfig {
        &self.keywords
    }

    /// ベーススコアラーが動作するか確認する
    pub fn self_check(&self) -> Result<()> {
        self.scorer
            .score(PROBE_TEXT)
            .map(|_| ())
            .map_err(|e| Error::ScorerUnavailable(e.to_string()))
    }

    /// 1テキストを解析
    pub fn score_text(&self, text: &str) -> Result<AnalysisResult> {
        self.score_text_at(text, Local::now())
    }

    /// 指定時刻で1テキストを解析
    pub fn score_text_at(&self, text: &str, now: DateTime<Local>) -> Result<AnalysisResult> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let base = self.scorer.score(text)?;
        let matches = self.keywords.count_matches(&text.to_lowercase());
        let adjusted = adjust_polarity(base.polarity, matches);

        debug!(
            base = base.polarity,
            adjusted,
            positive = matches.positive,
            negative = matches.negative,
            "keyword adjustment"
        );

        AnalysisResult::new(text, adjusted, base.subjectivity, now)
    }

    /// 行列を順に解析
    ///
    /// 空行は結果を出さないが行番号は進む。1行の失敗でバッチは止まらない。
    pub fn score_batch<I, T>(&self, lines: I) -> BatchOutcome
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut outcome = BatchOutcome::default();

        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            outcome.record(idx + 1, self.score_text(line));
        }

        outcome
    }

    /// rayonで並列に解析（結果の順序は入力順のまま）
    pub fn score_batch_parallel<T>(&self, lines: &[T]) -> BatchOutcome
    where
        T: AsRef<str> + Sync,
    {
        let scored: Vec<(usize, Result<AnalysisResult>)> = lines
            .par_iter()
            .enumerate()
            .filter_map(|(idx, line)| {
                let line = line.as_ref().trim();
                if line.is_empty() {
                    None
                } else {
                    Some((idx + 1, self.score_text(line)))
                }
            })
            .collect();

        let mut outcome = BatchOutcome::default();
        for (line, result) in scored {
            outcome.record(line, result);
        }
        outcome
    }

    /// ファイルを1行1テキストとして解析
    ///
    /// ファイル自体が読めない場合は行の処理前に `SourceUnavailable` を返す。
    pub fn score_file(&self, path: &Path, parallel: bool) -> Result<BatchOutcome> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        if parallel {
            let lines: Vec<&str> = content.lines().collect();
            Ok(self.score_batch_parallel(&lines))
        } else {
            Ok(self.score_batch(content.lines()))
        }
    }

    pub fn summarize(&self, results: &[AnalysisResult]) -> Option<AnalysisSummary> {
        summarize(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::BaseScore;
    use std::io::Write;

    /// 固定スコアを返すスコアラー
    struct FixedScorer(f64, f64);

    impl BaseScorer for FixedScorer {
        fn score(&self, _text: &str) -> Result<BaseScore> {
            Ok(BaseScore::new(self.0, self.1))
        }
    }

    /// "boom" を含む行で失敗するスコアラー
    struct FlakyScorer;

    impl BaseScorer for FlakyScorer {
        fn score(&self, text: &str) -> Result<BaseScore> {
            if text.contains("boom") {
                Err(Error::Scorer("exploded".into()))
            } else {
                Ok(BaseScore::new(0.0, 0.0))
            }
        }
    }

    fn fixed(polarity: f64, subjectivity: f64) -> SentimentAnalyzer<FixedScorer> {
        SentimentAnalyzer::with_scorer(FixedScorer(polarity, subjectivity), KeywordConfig::default())
    }

    fn m(positive: usize, negative: usize) -> KeywordMatches {
        KeywordMatches { positive, negative }
    }

    // =============================================
    // adjust_polarity テスト
    // =============================================

    #[test]
    fn test_adjust_no_signal_positive_keywords() {
        assert!((adjust_polarity(0.0, m(3, 0)) - 0.6).abs() < 1e-9);
        assert!((adjust_polarity(0.09, m(2, 1)) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_adjust_no_signal_negative_keywords() {
        assert!((adjust_polarity(0.0, m(0, 2)) + 0.5).abs() < 1e-9);
        assert!((adjust_polarity(-0.05, m(1, 4)) + 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_adjust_no_signal_tie_keeps_base() {
        assert_eq!(adjust_polarity(0.04, m(2, 2)), 0.04);
        assert_eq!(adjust_polarity(0.0, m(0, 0)), 0.0);
    }

    #[test]
    fn test_adjust_no_signal_tie_is_not_amplified() {
        // 弱いシグナルは同数なら増幅しない
        assert_eq!(adjust_polarity(0.05, m(1, 1)), 0.05);
        assert_eq!(adjust_polarity(-0.09, m(3, 3)), -0.09);
    }

    #[test]
    fn test_adjust_amplifies_existing_signal() {
        assert!((adjust_polarity(0.5, m(1, 0)) - 0.7).abs() < 1e-9);
        assert!((adjust_polarity(-0.4, m(0, 2)) + 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_adjust_clamps() {
        assert_eq!(adjust_polarity(0.9, m(5, 0)), 1.0);
        assert_eq!(adjust_polarity(-0.9, m(0, 5)), -1.0);
        assert_eq!(adjust_polarity(0.0, m(18, 0)), 1.0);
        assert_eq!(adjust_polarity(0.0, m(0, 18)), -1.0);
    }

    #[test]
    fn test_adjust_opposing_keywords_leave_base() {
        assert_eq!(adjust_polarity(0.5, m(0, 3)), 0.5);
        assert_eq!(adjust_polarity(-0.5, m(3, 0)), -0.5);
    }

    // =============================================
    // score_text テスト
    // =============================================

    #[test]
    fn test_score_text_empty() {
        let analyzer = SentimentAnalyzer::new();
        assert!(matches!(analyzer.score_text(""), Err(Error::EmptyInput)));
        assert!(matches!(analyzer.score_text("   \n\t"), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_score_text_positive_keywords_without_base_signal() {
        let analyzer = fixed(0.0, 0.0);
        let r = analyzer
            .score_text("Me encanta este producto, es fantástico y excelente")
            .unwrap();
        assert_eq!(r.polarity(), 0.6);
        assert_eq!(r.sentiment(), Sentiment::Positive);
    }

    #[test]
    fn test_score_text_amplified_and_clamped() {
        let analyzer = fixed(0.5, 0.8);
        let r = analyzer
            .score_text("Me encanta este producto, es fantástico y excelente")
            .unwrap();
        assert_eq!(r.polarity(), 1.0);
        assert_eq!(r.subjectivity(), 0.8);
    }

    #[test]
    fn test_score_text_keeps_original_case_trimmed() {
        let analyzer = fixed(0.0, 0.0);
        let r = analyzer.score_text("  ¡Qué Día GENIAL!  ").unwrap();
        assert_eq!(r.text(), "¡Qué Día GENIAL!");
        assert_eq!(r.sentiment(), Sentiment::Positive);
    }

    #[test]
    fn test_score_text_labels_from_unrounded_polarity() {
        let r = fixed(0.0504, 0.0).score_text("mesa").unwrap();
        assert_eq!(r.polarity(), 0.05);
        assert_eq!(r.sentiment(), Sentiment::Positive);

        let r = fixed(-0.0504, 0.0).score_text("mesa").unwrap();
        assert_eq!(r.polarity(), -0.05);
        assert_eq!(r.sentiment(), Sentiment::Negative);
    }

    #[test]
    fn test_keywords_accessor() {
        let analyzer = SentimentAnalyzer::with_keywords(KeywordConfig::new(["bien"], ["mal"]));
        assert_eq!(analyzer.keywords().positive(), &["bien".to_string()]);
        assert_eq!(analyzer.keywords().negative(), &["mal".to_string()]);
    }

    #[test]
    fn test_score_text_passes_subjectivity_through() {
        let analyzer = fixed(0.2, 0.123456);
        let r = analyzer.score_text("nothing special").unwrap();
        assert_eq!(r.polarity(), 0.2);
        assert_eq!(r.subjectivity(), 0.123);
    }

    #[test]
    fn test_score_text_propagates_scorer_error() {
        let analyzer = SentimentAnalyzer::with_scorer(FlakyScorer, KeywordConfig::default());
        assert!(matches!(analyzer.score_text("boom"), Err(Error::Scorer(_))));
    }

    #[test]
    fn test_self_check() {
        assert!(SentimentAnalyzer::new().self_check().is_ok());

        struct Broken;
        impl BaseScorer for Broken {
            fn score(&self, _text: &str) -> Result<BaseScore> {
                Err(Error::Scorer("no model".into()))
            }
        }
        let analyzer = SentimentAnalyzer::with_scorer(Broken, KeywordConfig::default());
        assert!(matches!(analyzer.self_check(), Err(Error::ScorerUnavailable(_))));
    }

    // =============================================
    // score_batch テスト
    // =============================================

    #[test]
    fn test_score_batch_skips_blank_lines_keeps_numbering() {
        let analyzer = fixed(0.0, 0.0);
        let lines = ["excelente", "", "   ", "odio esto", "normal"];
        let outcome = analyzer.score_batch(lines);

        assert_eq!(outcome.results.len(), 3);
        let numbers: Vec<_> = outcome.results.iter().map(|r| r.line_number()).collect();
        assert_eq!(numbers, vec![Some(1), Some(4), Some(5)]);
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn test_score_batch_isolates_failures() {
        let analyzer = SentimentAnalyzer::with_scorer(FlakyScorer, KeywordConfig::default());
        let lines = vec!["genial".to_string(), "boom".to_string(), "triste".to_string()];
        let outcome = analyzer.score_batch(&lines);

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].line_number(), Some(1));
        assert_eq!(outcome.results[1].line_number(), Some(3));
        assert_eq!(outcome.failed_lines(), vec![2]);
    }

    #[test]
    fn test_score_batch_parallel_preserves_order() {
        let analyzer = SentimentAnalyzer::with_scorer(FlakyScorer, KeywordConfig::default());
        let lines: Vec<String> = (1..=200)
            .map(|i| if i % 10 == 0 { String::new() } else { format!("línea {} genial", i) })
            .collect();

        let sequential = analyzer.score_batch(&lines);
        let parallel = analyzer.score_batch_parallel(&lines);

        assert_eq!(parallel.results.len(), 180);
        let seq: Vec<_> = sequential.results.iter().map(|r| r.line_number()).collect();
        let par: Vec<_> = parallel.results.iter().map(|r| r.line_number()).collect();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_score_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Odio este servicio").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "Todo salió perfecto").unwrap();

        let analyzer = fixed(0.0, 0.0);
        let outcome = analyzer.score_file(file.path(), false).unwrap();
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].sentiment(), Sentiment::Negative);
        assert_eq!(outcome.results[1].line_number(), Some(3));
    }

    #[test]
    fn test_score_file_missing() {
        let analyzer = SentimentAnalyzer::new();
        let err = analyzer
            .score_file(Path::new("/nonexistent/textos.txt"), false)
            .unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { .. }));
    }

    // =============================================
    // summarize テスト
    // =============================================

    #[test]
    fn test_summarize_empty() {
        assert!(SentimentAnalyzer::new().summarize(&[]).is_none());
    }

    #[test]
    fn test_summarize_batch() {
        let analyzer = fixed(0.0, 0.5);
        let outcome = analyzer.score_batch(["excelente", "horrible", "mesa", "genial"]);
        let summary = analyzer.summarize(&outcome.results).unwrap();

        assert_eq!(summary.total_texts, 4);
        assert_eq!(summary.positive_count, 2);
        assert_eq!(summary.negative_count, 1);
        assert_eq!(summary.neutral_count, 1);
        assert_eq!(summary.positive_percentage, 50.0);
        assert_eq!(summary.average_subjectivity, 0.5);
    }
}
