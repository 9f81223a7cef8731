//! 空セクション除去
//!
//! 行分類後のストリームで、見出しの直後が区切りになっているセクションは
//! 中身がすべて除外されたものとみなし、見出しを落とす。
//!
//! 1行先読みのみで処理し、保持する行は高々1行。

use crate::patterns::{is_section_header, is_section_separator};
use bstr::BString;
use std::iter::Peekable;

/// 空セクションの見出しを除去するイテレータ
pub struct BlankSectionRemover<I: Iterator<Item = BString>> {
    inner: Peekable<I>,
    /// 見出しの直後にそのまま出す行
    pending: Option<BString>,
    removed: usize,
}

impl<I: Iterator<Item = BString>> BlankSectionRemover<I> {
    pub fn new<T>(lines: T) -> Self
    where
        T: IntoIterator<Item = BString, IntoIter = I>,
    {
        Self {
            inner: lines.into_iter().peekable(),
            pending: None,
            removed: 0,
        }
    }

    /// これまでに除去した見出しの数
    pub fn removed(&self) -> usize {
        self.removed
    }
}

impl<I: Iterator<Item = BString>> Iterator for BlankSectionRemover<I> {
    type Item = BString;

    fn next(&mut self) -> Option<BString> {
        if let Some(line) = self.pending.take() {
            return Some(line);
        }

        loop {
            let line = self.inner.next()?;
            if !is_section_header(&line) {
                return Some(line);
            }

            match self.inner.peek() {
                Some(next) if is_section_separator(next) => {
                    // 空セクション: 見出しを捨て、区切りは次の周回で通常処理
                    self.removed += 1;
                }
                // 入力末尾の見出しは残す
                None => return Some(line),
                Some(_) => {
                    // 見出しの次の行は判定せずにそのまま出す
                    self.pending = self.inner.next();
                    return Some(line);
                }
            }
        }
    }
}

/// 行列から空セクションの見出しを除去する
pub fn remove_blank_sections(lines: Vec<BString>) -> Vec<BString> {
    BlankSectionRemover::new(lines).collect()
}
