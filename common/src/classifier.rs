//! 行分類
//!
//! 1行ごとに出力へコピーするかを判定する。以下のいずれかなら残す:
//! 1. セクション区切り（`====...`）
//! 2. セクション見出し（`[Area Name]`）
//! 3. 注記サフィックスを除いた文字列が参照セットに完全一致するモンスター名

use crate::patterns::{is_section_header, is_section_separator, strip_annotation};
use crate::reference::ReferenceSet;
use bstr::BString;

/// 行を出力に残すか判定する
pub fn should_keep(line: &[u8], allowed: &ReferenceSet) -> bool {
    if is_section_separator(line) || is_section_header(line) {
        return true;
    }
    allowed.contains(&strip_annotation(line))
}

/// 行列を分類し、残す行だけを順序通りに返す
pub fn filter_lines<'a, I>(lines: I, allowed: &'a ReferenceSet) -> impl Iterator<Item = BString> + 'a
where
    I: IntoIterator<Item = BString>,
    I::IntoIter: 'a,
{
    lines.into_iter().filter(move |line| should_keep(line, allowed))
}
