//! 参照セット（許可モンスター名の集合）
//!
//! 参照ファイルの各行を1つの識別子として読み込む。
//! 注記サフィックスの除去・トリム・大文字小文字の統一は行わない。
//! 識別子はバイト列で比較するため、UTF-8でない行もそのまま保持する。

use crate::error::{Error, Result};
use bstr::io::BufReadExt;
use std::collections::HashSet;
use std::io::BufRead;

/// 許可された識別子の集合（構築後は不変）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    names: HashSet<Vec<u8>>,
}

impl ReferenceSet {
    /// 行イテレータから構築
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Vec<u8>>,
    {
        Self {
            names: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// リーダーから全行を読み込んで構築
    ///
    /// 行末の `\n` / `\r\n` は識別子に含めない。
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut names = HashSet::new();
        for (i, line) in reader.byte_lines().enumerate() {
            let line = line.map_err(|source| Error::Read { line: i + 1, source })?;
            names.insert(line);
        }
        Ok(Self { names })
    }

    /// 完全一致で含まれるか
    pub fn contains(&self, name: &[u8]) -> bool {
        self.names.contains(name)
    }

    /// 識別子の件数（重複除去後）
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<Vec<u8>>> FromIterator<S> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_lines(iter)
    }
}
