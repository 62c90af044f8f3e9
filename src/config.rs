use crate::error::{DetectorError, Result};
use sentiment_common::{KeywordConfig, Locale};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 履歴ログの保存先
    pub log_dir: PathBuf,
    /// キーワードJSON（未設定ならスペイン語の標準語彙）
    pub keywords_path: Option<PathBuf>,
    pub locale: Locale,
    /// 詳細表示で確認を挟む間隔
    pub details_page_size: usize,
    /// ファイル解析を並列化する
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            keywords_path: None,
            locale: Locale::Es,
            details_page_size: 3,
            parallel: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// 指定パスから読み込み（なければデフォルト）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DetectorError::Config("No se encontró el directorio personal".into()))?;
        Ok(home.join(".config").join("sentiment-detector").join("config.json"))
    }

    /// キーワード設定を解決
    pub fn keywords(&self) -> Result<KeywordConfig> {
        match &self.keywords_path {
            Some(path) => Ok(KeywordConfig::from_json_file(path)?),
            None => Ok(KeywordConfig::default()),
        }
    }
}
