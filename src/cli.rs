use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "filter-manuel")]
#[command(about = "Manuelを参照リストで絞り込み、空セクションを除去する", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// フィルタ実行の引数（省略時は設定ファイル→組み込みデフォルト）
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Manuelファイル
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// 参照リスト（1行1モンスター名）
    #[arg(short, long)]
    pub reference: Option<PathBuf>,

    /// 出力ファイル
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 読み込み・分類と空セクション除去・書き込みを並行実行
    #[arg(long)]
    pub pipelined: bool,
}

impl FilterArgs {
    /// 設定ファイルの値が必要か（パスの省略、またはキュー長の参照）
    pub fn needs_config(&self) -> bool {
        self.catalog.is_none() || self.reference.is_none() || self.output.is_none() || self.pipelined
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 設定を表示/編集
    Config {
        /// デフォルトのManuelファイルを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// デフォルトの参照リストを設定
        #[arg(long)]
        set_reference: Option<PathBuf>,

        /// デフォルトの出力ファイルを設定
        #[arg(long)]
        set_output: Option<PathBuf>,

        /// パイプラインモードのキュー長を設定
        #[arg(long)]
        set_channel_capacity: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::parse_from([
            "filter-manuel", "-c", "in.txt", "-r", "ref.txt", "-o", "out.txt",
        ]);
        assert!(cli.command.is_none());
        assert_eq!(cli.filter.catalog, Some(PathBuf::from("in.txt")));
        assert_eq!(cli.filter.reference, Some(PathBuf::from("ref.txt")));
        assert_eq!(cli.filter.output, Some(PathBuf::from("out.txt")));
        assert!(!cli.filter.pipelined);
    }

    #[test]
    fn test_long_flags() {
        let cli = Cli::parse_from([
            "filter-manuel",
            "--catalog", "in.txt",
            "--reference", "ref.txt",
            "--output", "out.txt",
            "--pipelined",
            "--verbose",
        ]);
        assert_eq!(cli.filter.catalog, Some(PathBuf::from("in.txt")));
        assert!(cli.filter.pipelined);
        assert!(cli.verbose);
    }

    #[test]
    fn test_defaults_left_unset() {
        let cli = Cli::parse_from(["filter-manuel"]);
        assert!(cli.filter.catalog.is_none());
        assert!(cli.filter.reference.is_none());
        assert!(cli.filter.output.is_none());
    }

    #[test]
    fn test_needs_config() {
        let cli = Cli::parse_from(["filter-manuel", "-c", "in.txt", "-r", "ref.txt", "-o", "out.txt"]);
        assert!(!cli.filter.needs_config());

        let cli = Cli::parse_from(["filter-manuel", "-c", "in.txt", "-r", "ref.txt"]);
        assert!(cli.filter.needs_config());

        let cli = Cli::parse_from([
            "filter-manuel", "-c", "in.txt", "-r", "ref.txt", "-o", "out.txt", "--pipelined",
        ]);
        assert!(cli.filter.needs_config());
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::parse_from(["filter-manuel", "config", "--show", "--set-channel-capacity", "8"]);
        match cli.command {
            Some(Commands::Config { show, set_channel_capacity, .. }) => {
                assert!(show);
                assert_eq!(set_channel_capacity, Some(8));
            }
            _ => panic!("config subcommand expected"),
        }
    }
}
