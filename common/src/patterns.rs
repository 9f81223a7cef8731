//! 行パターン判定
//!
//! - セクション区切り: `====` 以上の `=` のみ
//! - セクション見出し: `[` + 英大文字で始まる地域名 + `]`
//! - 注記サフィックス: 末尾の ` {0}`〜` {3}`（上流ツールが付与）
//!
//! 行はバイト列のまま扱う。UTF-8でないバイトも任意の文字として一致する。

use regex::bytes::Regex;
use std::borrow::Cow;

lazy_static::lazy_static! {
    static ref SECTION_SEPARATOR: Regex = Regex::new(r"^=====*$").unwrap();
    static ref SECTION_HEADER: Regex = Regex::new(r"(?-u)^\[[A-Z]+.*\]$").unwrap();
    // 数字は0-3のみ。4以上は上流ツールが出力しないため除去対象外
    static ref ANNOTATION_SUFFIX: Regex = Regex::new(r" \{[0-3]\}$").unwrap();
}

/// セクション区切り行か
pub fn is_section_separator(line: &[u8]) -> bool {
    SECTION_SEPARATOR.is_match(line)
}

/// セクション見出し行か
pub fn is_section_header(line: &[u8]) -> bool {
    SECTION_HEADER.is_match(line)
}

/// 末尾の注記サフィックスを除去する（なければそのまま）
pub fn strip_annotation(line: &[u8]) -> Cow<'_, [u8]> {
    ANNOTATION_SUFFIX.replace(line, &b""[..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_separator() {
        assert!(is_section_separator(b"===="));
        assert!(is_section_separator(b"================================="));
        assert!(!is_section_separator(b"==="));
        assert!(!is_section_separator(b""));
        assert!(!is_section_separator(b"==== "));
        assert!(!is_section_separator(b" ===="));
        assert!(!is_section_separator(b"====\xff"));
    }

    #[test]
    fn test_section_header() {
        assert!(is_section_header(b"[A]"));
        assert!(is_section_header(b"[Engineering]"));
        assert!(is_section_header("[LavaCo™ Lamp Factory]".as_bytes()));
        assert!(!is_section_header(b"[engineering]"));
        assert!(!is_section_header(b"[Engineering"));
        assert!(!is_section_header(b" [Engineering]"));
    }

    #[test]
    fn test_section_header_non_utf8() {
        // Latin-1の地域名
        assert!(is_section_header(b"[Caf\xe9 Terrace]"));
        assert!(!is_section_header(b"[\xe9]"));
    }

    #[test]
    fn test_strip_annotation() {
        assert_eq!(&*strip_annotation(b"Monster {0}"), b"Monster");
        assert_eq!(&*strip_annotation(b"Monster {3}"), b"Monster");
        assert_eq!(&*strip_annotation(b"Monster {4}"), b"Monster {4}");
        assert_eq!(&*strip_annotation(b"Monster{1}"), b"Monster{1}");
        assert_eq!(&*strip_annotation(b"Monster {1} "), b"Monster {1} ");
        assert_eq!(&*strip_annotation(b"Pok\xe9mon {2}"), b"Pok\xe9mon");
        // 末尾の1つだけ除去
        assert_eq!(&*strip_annotation(b"Monster {1} {2}"), b"Monster {1}");
    }

    #[test]
    fn test_strip_annotation_borrows_when_unchanged() {
        assert!(matches!(strip_annotation(b"Goblin"), Cow::Borrowed(_)));
    }
}
