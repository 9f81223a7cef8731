//! filter-manuel
//!
//! Manuel（モンスター図鑑）を参照リストで絞り込み、空になったセクションを除去する。

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod writer;

pub use filter_manuel_common as common;
