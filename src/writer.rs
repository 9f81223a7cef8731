//! 出力書き込み
//!
//! 行は `\r\n` で連結する。区切りは2行目以降の各行の前に置くため、
//! 末尾に改行は付かない。

use std::io::{self, Write};

pub const LINE_TERMINATOR: &[u8] = b"\r\n";

/// 1行ずつ書き込むライター
pub struct LineWriter<W: Write> {
    inner: W,
    written: usize,
}

impl<W: Write> LineWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// 行をバイト列のまま書き込む
    pub fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        if self.written > 0 {
            self.inner.write_all(LINE_TERMINATOR)?;
        }
        self.inner.write_all(line)?;
        self.written += 1;
        Ok(())
    }

    /// 書き込んだ行数
    pub fn written(&self) -> usize {
        self.written
    }

    /// フラッシュして内部ライターを返す
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
