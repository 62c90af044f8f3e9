//! 履歴ログモジュール
//!
//! 解析結果を人間が読めるテキスト形式でログディレクトリに追記し、
//! 過去のログを新しい順に一覧する。

use crate::error::{DetectorError, Result};
use chrono::{DateTime, Local};
use sentiment_common::{
    describe_polarity_intensity_in, describe_subjectivity_in, AnalysisResult, Locale,
};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

const LOG_PREFIX: &str = "sentiment_analysis_";
const LOG_EXTENSION: &str = "log";

/// ログファイル情報
#[derive(Debug, Clone)]
pub struct LogFileInfo {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
    pub modified: DateTime<Local>,
}

impl LogFileInfo {
    /// 一覧表示用の1行
    pub fn display_line(&self) -> String {
        format!(
            "{} ({} bytes) - {}",
            self.file_name,
            self.size,
            self.modified.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// 履歴ログの保存先
pub struct HistoryStore {
    dir: PathBuf,
    locale: Locale,
}

impl HistoryStore {
    pub fn new(dir: impl Into<PathBuf>, locale: Locale) -> Self {
        Self {
            dir: dir.into(),
            locale,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 現在時刻のログファイル名
    pub fn default_file_name(now: DateTime<Local>) -> String {
        format!("{}{}.{}", LOG_PREFIX, now.format("%Y%m%d_%H%M%S"), LOG_EXTENSION)
    }

    /// 結果をログに追記し、書き込んだパスを返す
    ///
    /// 同じ秒に保存した場合は同じファイルの末尾に追記される。
    pub fn save(&self, results: &[AnalysisResult]) -> Result<PathBuf> {
        let now = Local::now();
        self.save_as(results, &Self::default_file_name(now), now)
    }

    pub fn save_as(
        &self,
        results: &[AnalysisResult],
        file_name: &str,
        now: DateTime<Local>,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);

        let body = render_log(results, now, self.locale);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| DetectorError::History(format!("{}: {}", path.display(), e)))?;
        file.write_all(body.as_bytes())?;

        info!(path = %path.display(), count = results.len(), "history saved");
        Ok(path)
    }

    /// `*.log` を更新日時の新しい順に一覧（ディレクトリがなければ空）
    pub fn list(&self) -> Result<Vec<LogFileInfo>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut logs = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().map(|e| e == LOG_EXTENSION).unwrap_or(false) {
                let meta = entry.metadata().map_err(|e| DetectorError::History(e.to_string()))?;
                let modified = meta.modified()?;
                logs.push(LogFileInfo {
                    path: path.to_path_buf(),
                    file_name: entry.file_name().to_string_lossy().to_string(),
                    size: meta.len(),
                    modified: DateTime::<Local>::from(modified),
                });
            }
        }

        // 新しい順、同時刻はファイル名の降順
        logs.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| b.file_name.cmp(&a.file_name))
        });
        Ok(logs)
    }

    /// 一覧の番号（1始まり）でログを選ぶ
    pub fn select(&self, number: usize) -> Result<LogFileInfo> {
        let logs = self.list()?;
        number
            .checked_sub(1)
            .and_then(|i| logs.get(i).cloned())
            .ok_or_else(|| DetectorError::InvalidSelection(number.to_string()))
    }

    pub fn read(&self, log: &LogFileInfo) -> Result<String> {
        Ok(std::fs::read_to_string(&log.path)?)
    }
}

/// ログ本文を生成
pub fn render_log(results: &[AnalysisResult], now: DateTime<Local>, locale: Locale) -> String {
    let mut lines = vec![
        "=== ANÁLISIS DE SENTIMIENTOS ===".to_string(),
        format!("Fecha: {}", now.format("%Y-%m-%d %H:%M:%S")),
        format!("Total de textos analizados: {}", results.len()),
        String::new(),
    ];

    for (i, result) in results.iter().enumerate() {
        lines.push(format!("--- Análisis #{} ---", i + 1));
        lines.push(format!("Texto: \"{}\"", result.text()));
        lines.push(format!("Sentimiento: {}", result.sentiment().label(locale)));
        lines.push(format!(
            "Polaridad: {} ({})",
            result.polarity(),
            describe_polarity_intensity_in(result.polarity(), locale)
        ));
        lines.push(format!(
            "Subjetividad: {} ({})",
            result.subjectivity(),
            describe_subjectivity_in(result.subjectivity(), locale)
        ));
        if let Some(line) = result.line_number() {
            lines.push(format!("Línea del archivo: {}", line));
        }
        lines.push(format!("Timestamp: {}", result.timestamp_display()));
        lines.push(String::new());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
