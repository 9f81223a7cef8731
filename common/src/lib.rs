//! Manuel Filter Common Library
//!
//! モンスター図鑑（Manuel）のフィルタ処理の中核。
//! 行分類（classifier）と空セクション除去（blank_section）の2段構成。

pub mod error;
pub mod patterns;
pub mod reference;
pub mod classifier;
pub mod blank_section;

pub use error::{Error, Result};
pub use reference::ReferenceSet;
pub use classifier::{should_keep, filter_lines};
pub use blank_section::{BlankSectionRemover, remove_blank_sections};
