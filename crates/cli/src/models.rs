use reflow_chunks::{Chunk, ChunkList, ChunkListConfig, TokenKind};
use reflow_cleanup::{CleanupConfig, CleanupReport};
use serde::{Deserialize, Serialize};

/// Contents of the `--config` TOML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpConfig {
    pub chunks: ChunkListConfig,
    pub cleanup: CleanupConfig,
}

/// One token as produced by a tokenizer
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRecord {
    pub kind: TokenKind,
    #[serde(default)]
    pub text: String,
    pub line: usize,
    pub column: usize,
    #[serde(default)]
    pub level: usize,
    #[serde(default)]
    pub brace_level: usize,
    #[serde(default)]
    pub preproc: bool,
    #[serde(default)]
    pub parent_kind: Option<TokenKind>,
}

impl TokenRecord {
    pub fn into_chunk(self) -> Chunk {
        let mut chunk = Chunk::new(self.kind, self.text)
            .at(self.line, self.column)
            .with_level(self.level);
        chunk.brace_level = self.brace_level;
        if self.preproc {
            chunk = chunk.in_preproc();
        }
        if let Some(parent_kind) = self.parent_kind {
            chunk = chunk.with_parent_kind(parent_kind);
        }
        chunk
    }
}

#[derive(Debug, Serialize)]
pub struct ChunkRecord<'a> {
    pub kind: TokenKind,
    pub parent_kind: TokenKind,
    pub text: &'a str,
    pub line: usize,
    pub column: usize,
    pub orig_col_end: usize,
    pub level: usize,
    pub brace_level: usize,
    pub flags: Vec<&'static str>,
}

impl<'a> From<&'a Chunk> for ChunkRecord<'a> {
    fn from(chunk: &'a Chunk) -> Self {
        Self {
            kind: chunk.kind(),
            parent_kind: chunk.parent_kind(),
            text: chunk.text(),
            line: chunk.orig.line,
            column: chunk.orig.column,
            orig_col_end: chunk.orig_col_end,
            level: chunk.level,
            brace_level: chunk.brace_level,
            flags: chunk.flags().names().collect(),
        }
    }
}

/// `--json` output
#[derive(Debug, Serialize)]
pub struct DumpOutput<'a> {
    pub chunks: Vec<ChunkRecord<'a>>,
    pub cleanup: Option<&'a CleanupReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub provenance: Vec<String>,
}

impl<'a> DumpOutput<'a> {
    pub fn new(list: &'a ChunkList, cleanup: Option<&'a CleanupReport>) -> Self {
        Self {
            chunks: list.iter().map(|(_, chunk)| ChunkRecord::from(chunk)).collect(),
            cleanup,
            provenance: list.provenance().records().map(ToString::to_string).collect(),
        }
    }
}
