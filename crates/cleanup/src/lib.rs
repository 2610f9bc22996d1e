//! # Reflow Cleanup
//!
//! Token cleanup passes that run right after tokenizing, before any grammar
//! classification.
//!
//! ## Philosophy
//!
//! The tokenizer works one token at a time and cannot tell `[ ]` from an
//! index, `> >` from a shift or `public` in a base list from `public:`. Each
//! pass here looks at a chunk and its code neighbours and settles one such
//! question, through the tracked setters of [`reflow_chunks::ChunkList`], so
//! every rewrite can be traced back to the pass that made it.
//!
//! ## Architecture
//!
//! ```text
//! ChunkList (fresh from the tokenizer)
//!     │
//!     └──> run_cleanup(list, &CleanupConfig)
//!          │
//!          ├─> punctuators: [] · := · operator values · >>
//!          ├─> keywords:    enum class · type names · public: · for each · static if
//!          ├─> preproc:     macro `;` warning · directive parents · #pragma region
//!          └─> templates:   parameter packs · trailing return types
//!          │
//!          └──> CleanupReport (changes per pass)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use reflow_chunks::{Chunk, ChunkList, TokenKind};
//! use reflow_cleanup::{run_cleanup, CleanupConfig, Pass};
//!
//! let mut list = ChunkList::new();
//! list.push_back(Chunk::new(TokenKind::Word, "int").at(1, 1));
//! list.push_back(Chunk::new(TokenKind::Word, "a").at(1, 5));
//! list.push_back(Chunk::new(TokenKind::SquareOpen, "[").at(1, 6));
//! list.push_back(Chunk::new(TokenKind::SquareClose, "]").at(1, 7));
//!
//! let report = run_cleanup(&mut list, &CleanupConfig::default()).unwrap();
//! assert_eq!(report.count(Pass::EmptySquares), 1);
//! assert_eq!(list.len(), 3);
//! ```

mod config;
mod cursor;
mod error;
mod keywords;
mod preproc;
mod punctuators;
mod templates;

use std::fmt;

use reflow_chunks::ChunkList;
use serde::Serialize;

pub use config::{CleanupConfig, Pass};
pub use error::{CleanupError, Result};
pub use keywords::{classify_access_specifiers, mark_enum_class_and_types, merge_for_each, merge_static_if};
pub use preproc::{mark_directive_parents, mark_pragma_regions, warn_macro_trailing_semicolon};
pub use punctuators::{mark_operator_values, merge_double_angle_close, merge_empty_squares, merge_sql_assign};
pub use templates::{mark_parameter_packs, mark_trailing_return_types};

/// Number of changes one pass made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassCount {
    pub pass: Pass,
    pub changes: usize,
}

/// What a cleanup run did, in pass order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub passes: Vec<PassCount>,
}

impl CleanupReport {
    fn record(&mut self, pass: Pass, changes: usize) {
        self.passes.push(PassCount { pass, changes });
    }

    /// Changes made by one pass (0 if it did not run)
    pub fn count(&self, pass: Pass) -> usize {
        self.passes
            .iter()
            .filter(|p| p.pass == pass)
            .map(|p| p.changes)
            .sum()
    }

    pub fn total(&self) -> usize {
        self.passes.iter().map(|p| p.changes).sum()
    }
}

impl fmt::Display for CleanupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.passes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", p.pass, p.changes)?;
        }
        Ok(())
    }
}

/// Run one pass and return the number of changes (warnings for
/// [`Pass::MacroSemicolon`])
pub fn run_pass(list: &mut ChunkList, pass: Pass) -> Result<usize> {
    match pass {
        Pass::EmptySquares => merge_empty_squares(list),
        Pass::MacroSemicolon => Ok(warn_macro_trailing_semicolon(list)),
        Pass::SqlAssign => merge_sql_assign(list),
        Pass::OperatorValues => mark_operator_values(list),
        Pass::EnumClassAndTypes => mark_enum_class_and_types(list),
        Pass::DoubleAngleClose => merge_double_angle_close(list),
        Pass::AccessSpecifiers => classify_access_specifiers(list),
        Pass::ForEach => merge_for_each(list),
        Pass::StaticIf => merge_static_if(list),
        Pass::DirectiveParents => mark_directive_parents(list),
        Pass::PragmaRegions => mark_pragma_regions(list),
        Pass::ParameterPacks => mark_parameter_packs(list),
        Pass::TrailingReturnTypes => mark_trailing_return_types(list),
    }
}

/// Run the configured passes in order
pub fn run_cleanup(list: &mut ChunkList, config: &CleanupConfig) -> Result<CleanupReport> {
    config.validate().map_err(CleanupError::invalid_config)?;

    let mut report = CleanupReport::default();
    for &pass in &config.passes {
        let changes = run_pass(list, pass)?;
        log::debug!("cleanup pass {pass}: {changes} change(s)");
        report.record(pass, changes);
    }
    log::debug!("cleanup finished: {} change(s), {} chunk(s) left", report.total(), list.len());
    Ok(report)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{line, texts};
    use reflow_chunks::TokenKind;

    #[test]
    fn test_disabled_pass_does_not_run() {
        let mut list = ChunkList::new();
        line(&mut list, &[(TokenKind::SquareOpen, "["), (TokenKind::SquareClose, "]")]);

        let config = CleanupConfig::default().without(Pass::EmptySquares);
        let report = run_cleanup(&mut list, &config).unwrap();

        assert_eq!(report.count(Pass::EmptySquares), 0);
        assert_eq!(texts(&list), vec!["[", "]"]);
    }

    #[test]
    fn test_invalid_config_rejected_before_any_pass() {
        let mut list = ChunkList::new();
        line(&mut list, &[(TokenKind::SquareOpen, "["), (TokenKind::SquareClose, "]")]);
        let config = CleanupConfig {
            passes: vec![Pass::EmptySquares, Pass::EmptySquares],
        };

        let err = run_cleanup(&mut list, &config).unwrap_err();
        assert!(matches!(err, CleanupError::InvalidConfig(_)));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_report_display_and_total() {
        let mut list = ChunkList::new();
        line(
            &mut list,
            &[
                (TokenKind::Colon, ":"),
                (TokenKind::Assign, "="),
                (TokenKind::SquareOpen, "["),
                (TokenKind::SquareClose, "]"),
            ],
        );
        let config = CleanupConfig {
            passes: vec![Pass::EmptySquares, Pass::SqlAssign],
        };

        let report = run_cleanup(&mut list, &config).unwrap();
        assert_eq!(report.total(), 2);
        assert_eq!(report.to_string(), "empty_squares=1, sql_assign=1");
    }
}
