//! フィルタパイプライン
//!
//! Manuel → 行分類（参照セット）→ 空セクション除去 → 出力
//!
//! 通常は1スレッドで逐次ストリーム処理する。`run_pipelined` は
//! 読み込み・分類と除去・書き込みを別タスクで動かし、容量付きキューで繋ぐ。
//! どちらも出力内容は同一。行はバイト列のまま流し、UTF-8でなくても落とさない。

use crate::error::{FilterError, Result};
use crate::writer::LineWriter;
use bstr::io::{BufReadExt, ByteLines};
use bstr::BString;
use filter_manuel_common::{filter_lines, BlankSectionRemover, ReferenceSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// 入出力パス
#[derive(Debug, Clone)]
pub struct FilterPaths {
    pub catalog: PathBuf,
    pub reference: PathBuf,
    pub output: PathBuf,
}

/// 1回の実行の統計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// 参照セットの件数（重複除去後）
    pub reference_names: usize,
    /// Manuelから読んだ行数
    pub lines_read: usize,
    /// 行分類で残った行数
    pub lines_kept: usize,
    /// 除去した空セクションの見出し数
    pub sections_removed: usize,
    /// 出力した行数
    pub lines_written: usize,
}

impl FilterStats {
    fn new(reference_names: usize, lines_read: usize, lines_written: usize, sections_removed: usize) -> Self {
        Self {
            reference_names,
            lines_read,
            // 除去器は見出し以外を落とさない
            lines_kept: lines_written + sections_removed,
            sections_removed,
            lines_written,
        }
    }
}

/// 読み込みエラーを保持しつつ行を流すイテレータ
///
/// エラーが出た時点で終了し、`finish` で報告する。
struct CatalogLines<R: BufRead> {
    lines: ByteLines<R>,
    read: usize,
    error: Option<io::Error>,
}

impl<R: BufRead> CatalogLines<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.byte_lines(),
            read: 0,
            error: None,
        }
    }

    /// 読んだ行数を返す。途中で失敗していればエラー
    fn finish(self, path: &Path) -> Result<usize> {
        match self.error {
            Some(source) => Err(FilterError::InputUnreadable {
                path: path.to_path_buf(),
                source,
            }),
            None => Ok(self.read),
        }
    }
}

impl<R: BufRead> Iterator for CatalogLines<R> {
    type Item = BString;

    fn next(&mut self) -> Option<BString> {
        if self.error.is_some() {
            return None;
        }
        match self.lines.next()? {
            Ok(line) => {
                self.read += 1;
                Some(BString::from(line))
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(FilterError::InputNotFound(path.to_path_buf()))
        }
        Err(source) => Err(FilterError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| FilterError::OutputNotCreatable {
            path: path.to_path_buf(),
            source,
        })
}

/// 参照ファイルを読み込む
pub fn load_reference(path: &Path) -> Result<ReferenceSet> {
    let reader = open_input(path)?;
    let allowed = ReferenceSet::from_reader(reader).map_err(|e| match e {
        filter_manuel_common::Error::Read { source, .. } => FilterError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;
    tracing::debug!(names = allowed.len(), path = %path.display(), "参照セット読み込み");
    Ok(allowed)
}

/// 空セクションを除去しながら書き込む。(出力行数, 除去見出し数) を返す
fn write_filtered<I, W>(lines: I, output: W, path: &Path) -> Result<(usize, usize)>
where
    I: IntoIterator<Item = BString>,
    W: Write,
{
    let write_err = |source: io::Error| FilterError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut remover = BlankSectionRemover::new(lines);
    let mut writer = LineWriter::new(output);
    for line in remover.by_ref() {
        writer.write_line(&line).map_err(write_err)?;
    }

    let written = writer.written();
    writer.finish().map_err(write_err)?;
    Ok((written, remover.removed()))
}

/// 逐次ストリーム処理で実行
pub fn run(paths: &FilterPaths, allowed: &ReferenceSet) -> Result<FilterStats> {
    let catalog = open_input(&paths.catalog)?;
    let output = create_output(&paths.output)?;

    let mut source = CatalogLines::new(catalog);
    let (written, removed) = write_filtered(filter_lines(source.by_ref(), allowed), output, &paths.output)?;
    let read = source.finish(&paths.catalog)?;

    let stats = FilterStats::new(allowed.len(), read, written, removed);
    tracing::debug!(?stats, "フィルタ完了");
    Ok(stats)
}

/// 読み込み・分類と除去・書き込みを並行実行
///
/// 2段は容量 `capacity` の FIFO キューで繋ぐため行順は保たれる。
/// 書き込みは常に1タスクのみ。
pub async fn run_pipelined(paths: &FilterPaths, allowed: ReferenceSet, capacity: usize) -> Result<FilterStats> {
    if capacity == 0 {
        return Err(FilterError::Config("キュー長は1以上を指定してください".into()));
    }

    let catalog = open_input(&paths.catalog)?;
    let output = create_output(&paths.output)?;

    let stats = run_stages(allowed, catalog, output, paths, capacity).await?;
    tracing::debug!(?stats, "フィルタ完了（パイプライン）");
    Ok(stats)
}

async fn run_stages<R, W>(
    allowed: ReferenceSet,
    catalog: R,
    output: W,
    paths: &FilterPaths,
    capacity: usize,
) -> Result<FilterStats>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    let reference_names = allowed.len();
    let (tx, mut rx) = mpsc::channel::<BString>(capacity);

    let catalog_path = paths.catalog.clone();
    let reader = tokio::task::spawn_blocking(move || -> Result<usize> {
        let mut source = CatalogLines::new(catalog);
        for line in filter_lines(source.by_ref(), &allowed) {
            if tx.blocking_send(line).is_err() {
                // 書き込み側が終了済み。エラーはそちらで報告される
                tracing::debug!("書き込みタスク終了のため読み込みを中断");
                break;
            }
        }
        source.finish(&catalog_path)
    });

    let output_path = paths.output.clone();
    let writer = tokio::task::spawn_blocking(move || -> Result<(usize, usize)> {
        let lines = std::iter::from_fn(|| rx.blocking_recv());
        write_filtered(lines, output, &output_path)
    });

    let (read_result, write_result) = tokio::join!(reader, writer);
    let read_result = read_result.map_err(|e| FilterError::Pipeline(e.to_string()))?;
    let write_result = write_result.map_err(|e| FilterError::Pipeline(e.to_string()))?;

    let (written, removed) = write_result?;
    let read = read_result?;

    Ok(FilterStats::new(reference_names, read, written, removed))
}
