use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("入力ファイルが見つかりません: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("入力ファイルを読み込めません: {}: {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("出力ファイルを作成できません: {}: {source}", .path.display())]
    OutputNotCreatable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("書き込みエラー: {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("パイプライン実行エラー: {0}")]
    Pipeline(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FilterError>;
