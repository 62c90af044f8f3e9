//! エラー型定義

use std::path::PathBuf;
use thiserror::Error;

/// 解析コアのエラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 空白のみのテキスト
    #[error("text must not be empty")]
    EmptyInput,

    /// バッチ入力ファイルを開けない・読めない
    #[error("source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// バッチ内の1行の解析失敗（バッチは継続）
    #[error("line {line}: {source}")]
    LineScoring {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    /// ベーススコアラーが使用不可（起動時に致命的）
    #[error("base scorer unavailable: {0}")]
    ScorerUnavailable(String),

    /// ベーススコアラー呼び出しの失敗
    #[error("scorer error: {0}")]
    Scorer(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// バッチ行番号付きのエラーに包む
    pub fn at_line(self, line: usize) -> Self {
        Error::LineScoring {
            line,
            source: Box::new(self),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
