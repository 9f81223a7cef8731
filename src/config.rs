use crate::error::{FilterError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CATALOG: &str = "manuel.txt";
pub const DEFAULT_REFERENCE: &str = "monsters.txt";
pub const DEFAULT_OUTPUT: &str = "filtered_manuel.txt";
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub reference_path: PathBuf,
    pub output_path: PathBuf,
    /// パイプラインモードのキュー長
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG),
            reference_path: PathBuf::from(DEFAULT_REFERENCE),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（存在しなければデフォルト）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// `config` サブコマンド用の読み込み
    ///
    /// 壊れた設定でも修正できるよう、検証は保存時まで行わない。
    /// 解析できないファイルはデフォルトから編集する。
    pub fn load_for_edit() -> Result<Self> {
        Ok(Self::load_for_edit_from(&Self::config_path()?))
    }

    pub fn load_for_edit_from(config_path: &Path) -> Self {
        let content = match std::fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, path = %config_path.display(), "設定ファイルを読めないためデフォルトから編集します");
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, path = %config_path.display(), "設定ファイルを解析できないためデフォルトから編集します");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FilterError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("filter-manuel").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if self.channel_capacity == 0 {
            return Err(FilterError::Config(
                "channel_capacity は1以上を指定してください".into(),
            ));
        }
        Ok(())
    }
}
