use clap::Parser;
use filter_manuel::{cli, config, error, pipeline};
use cli::{Cli, Commands, FilterArgs};
use config::Config;
use error::Result;
use pipeline::FilterPaths;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "filter_manuel=debug" } else { "filter_manuel=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        None => {
            // パスをすべて指定した逐次実行では設定ファイルを読まない
            let config = if cli.filter.needs_config() {
                Config::load()?
            } else {
                Config::default()
            };
            run_filter(cli.filter, &config).await?;
        }

        Some(Commands::Config { set_catalog, set_reference, set_output, set_channel_capacity, show }) => {
            let mut config = Config::load_for_edit()?;
            let changed = set_catalog.is_some()
                || set_reference.is_some()
                || set_output.is_some()
                || set_channel_capacity.is_some();

            if let Some(path) = set_catalog {
                config.catalog_path = path;
            }
            if let Some(path) = set_reference {
                config.reference_path = path;
            }
            if let Some(path) = set_output {
                config.output_path = path;
            }
            if let Some(capacity) = set_channel_capacity {
                config.channel_capacity = capacity;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  Manuel: {}", config.catalog_path.display());
                println!("  参照リスト: {}", config.reference_path.display());
                println!("  出力: {}", config.output_path.display());
                println!("  キュー長: {}", config.channel_capacity);
            }
        }
    }

    Ok(())
}

async fn run_filter(args: FilterArgs, config: &Config) -> Result<()> {
    let paths = FilterPaths {
        catalog: args.catalog.unwrap_or_else(|| config.catalog_path.clone()),
        reference: args.reference.unwrap_or_else(|| config.reference_path.clone()),
        output: args.output.unwrap_or_else(|| config.output_path.clone()),
    };

    println!("📖 filter-manuel - Manuel絞り込み\n");

    // 1. 参照リスト
    println!("[1/2] 参照リストを読み込み中... {}", paths.reference.display());
    let allowed = pipeline::load_reference(&paths.reference)?;
    println!("✔ {}件の参照モンスター\n", allowed.len());

    // 2. 分類・空セクション除去・書き込み
    println!(
        "[2/2] 絞り込み中... {} → {}{}",
        paths.catalog.display(),
        paths.output.display(),
        if args.pipelined { " (パイプライン)" } else { "" }
    );
    let stats = if args.pipelined {
        pipeline::run_pipelined(&paths, allowed, config.channel_capacity).await?
    } else {
        pipeline::run(&paths, &allowed)?
    };
    println!("✔ 読み込み: {}行 → 分類後: {}行", stats.lines_read, stats.lines_kept);
    println!("✔ 空セクション除去: {}件", stats.sections_removed);
    println!("✔ 結果を保存: {} ({}行)", paths.output.display(), stats.lines_written);

    println!("\n✅ 完了");
    Ok(())
}
