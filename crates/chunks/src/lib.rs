//! # Reflow Chunks
//!
//! The token-stream backbone of a multi-language source reformatter.
//!
//! ## Philosophy
//!
//! A source file is a sequence of chunks (lexical units plus structural
//! metadata). Every formatting rule is written against three primitives:
//! - Navigation that knows what "next token" means around preprocessor
//!   directives, virtual braces, comments and nesting levels
//! - Pure classification questions about a chunk
//! - Structural mutation that keeps the sequence consistently ordered
//!
//! ## Architecture
//!
//! ```text
//! Producer (tokenizer)
//!     │
//!     └──> ChunkList (arena of chunks, generation-checked ChunkId handles)
//!          │
//!          ├─> Store: insert / delete / move / swap / swap_lines
//!          │          head, tail, raw neighbours, position order keys
//!          │
//!          ├─> Predicates: comment, newline, brace, colon, pointer ...
//!          │
//!          ├─> Traversal: Scope (All | Preproc) × Direction × filter
//!          │    ├─> next_code / prev_code / next_non_blank / ...
//!          │    ├─> matching_delimiter, next_outside_squares
//!          │    └─> first_on_line, directive_start, ...
//!          │
//!          └─> Provenance: #[track_caller] kind / parent / flag setters
//!                          logged and optionally kept in a ProvenanceLog
//! ```
//!
//! ## Example
//!
//! ```rust
//! use reflow_chunks::{Chunk, ChunkList, Scope, TokenKind};
//!
//! let mut list = ChunkList::new();
//! let x = list.push_back(Chunk::new(TokenKind::Word, "x").at(1, 1));
//! list.push_back(Chunk::new(TokenKind::Assign, "=").at(1, 3));
//! list.push_back(Chunk::new(TokenKind::Number, "1").at(1, 5));
//! list.push_back(Chunk::new(TokenKind::Semicolon, ";").at(1, 6));
//! list.push_back(Chunk::newline().at(1, 7));
//!
//! let mut cursor = list.next_code(x, Scope::All);
//! while let Some(id) = cursor {
//!     println!("{}", list[id]);
//!     cursor = list.next_code(id, Scope::All);
//! }
//!
//! list.set_kind(x, TokenKind::Type).unwrap();
//! assert_eq!(list[x].kind(), TokenKind::Type);
//! ```

mod chunk;
mod config;
mod error;
mod flags;
mod language;
mod predicates;
mod provenance;
mod store;
mod token;
mod traverse;

pub use chunk::{Chunk, ChunkId, Position};
pub use config::ChunkListConfig;
pub use error::{ChunkError, Result};
pub use flags::ChunkFlags;
pub use language::{Language, LanguageSet};
pub use provenance::{Change, Origin, ProvenanceLog, ProvenanceRecord};
pub use store::{ChunkList, Iter};
pub use token::TokenKind;
pub use traverse::{Direction, Level, Scope, Walk};
