//! Classification predicates.
//!
//! Questions that only need the chunk itself are `Chunk` methods. Questions
//! that need neighbours or the configured languages are `ChunkList` methods
//! taking an optional id; an absent or stale id answers `false`.

use crate::chunk::{Chunk, ChunkId};
use crate::flags::ChunkFlags;
use crate::language::Language;
use crate::store::ChunkList;
use crate::token::TokenKind;
use crate::traverse::Scope;

impl Chunk {
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Single-line comment (`/* */` on one line or `//`)
    #[must_use]
    pub fn is_single_line_comment(&self) -> bool {
        matches!(self.kind(), TokenKind::Comment | TokenKind::CommentCpp)
    }

    #[must_use]
    pub fn is_block_comment(&self) -> bool {
        self.kind() == TokenKind::CommentMulti
    }

    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.is_single_line_comment() || self.is_block_comment()
    }

    /// Comment whose third character marks documentation (`///`, `/*!`, `//@`)
    #[must_use]
    pub fn is_doc_comment(&self) -> bool {
        self.is_comment() && matches!(self.text.as_bytes().get(2), Some(b'/' | b'!' | b'@'))
    }

    /// Hard newline or line continuation
    #[must_use]
    pub fn is_newline(&self) -> bool {
        matches!(self.kind(), TokenKind::Newline | TokenKind::NlCont)
    }

    /// Zero-length text
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    #[must_use]
    pub fn is_semicolon(&self) -> bool {
        matches!(self.kind(), TokenKind::Semicolon | TokenKind::Vsemicolon)
    }

    #[must_use]
    pub fn is_opening_brace(&self) -> bool {
        matches!(self.kind(), TokenKind::BraceOpen | TokenKind::VbraceOpen)
    }

    #[must_use]
    pub fn is_closing_brace(&self) -> bool {
        matches!(self.kind(), TokenKind::BraceClose | TokenKind::VbraceClose)
    }

    #[must_use]
    pub fn is_vbrace(&self) -> bool {
        matches!(self.kind(), TokenKind::VbraceOpen | TokenKind::VbraceClose)
    }

    #[must_use]
    pub fn is_paren_open(&self) -> bool {
        matches!(
            self.kind(),
            TokenKind::ParenOpen
                | TokenKind::SparenOpen
                | TokenKind::TparenOpen
                | TokenKind::FparenOpen
                | TokenKind::LparenOpen
        )
    }

    #[must_use]
    pub fn is_paren_close(&self) -> bool {
        matches!(
            self.kind(),
            TokenKind::ParenClose
                | TokenKind::SparenClose
                | TokenKind::TparenClose
                | TokenKind::FparenClose
                | TokenKind::LparenClose
        )
    }

    /// `[`, `]` or the merged `[]`
    #[must_use]
    pub fn is_balanced_square(&self) -> bool {
        matches!(
            self.kind(),
            TokenKind::SquareOpen | TokenKind::Tsquare | TokenKind::SquareClose
        )
    }

    #[must_use]
    pub fn is_opening_delimiter(&self) -> bool {
        self.kind().is_opening_delimiter()
    }

    #[must_use]
    pub fn is_closing_delimiter(&self) -> bool {
        self.kind().is_closing_delimiter()
    }

    #[must_use]
    pub fn is_colon(&self) -> bool {
        self.kind().is_colon()
    }

    /// A lone `*` that is not an overloaded operator name
    #[must_use]
    pub fn is_star(&self) -> bool {
        self.text == "*" && self.kind() != TokenKind::OperatorVal
    }

    #[must_use]
    pub fn is_class_or_struct(&self) -> bool {
        matches!(self.kind(), TokenKind::Class | TokenKind::Struct)
    }

    #[must_use]
    pub fn is_class_struct_union(&self) -> bool {
        self.is_class_or_struct() || self.kind() == TokenKind::Union
    }

    #[must_use]
    pub fn is_enum(&self) -> bool {
        matches!(self.kind(), TokenKind::Enum | TokenKind::EnumClass)
    }

    #[must_use]
    pub fn is_class_enum_struct_union(&self) -> bool {
        self.is_class_struct_union() || self.is_enum()
    }

    /// Part of a preprocessor directive
    #[must_use]
    pub fn is_preproc(&self) -> bool {
        self.flags().contains(ChunkFlags::IN_PREPROC)
    }

    #[must_use]
    pub fn is_comment_or_newline(&self) -> bool {
        self.is_comment() || self.is_newline()
    }

    #[must_use]
    pub fn is_comment_or_newline_or_ignored(&self) -> bool {
        self.is_comment_or_newline() || self.kind() == TokenKind::Ignored
    }

    #[must_use]
    pub fn is_comment_newline_or_blank(&self) -> bool {
        self.is_comment_or_newline() || self.is_blank()
    }

    #[must_use]
    pub fn is_comment_newline_or_preproc(&self) -> bool {
        self.is_comment_or_newline() || self.is_preproc()
    }

    #[must_use]
    pub fn is_comment_or_newline_in_preproc(&self) -> bool {
        self.is_preproc() && self.is_comment_or_newline()
    }

    /// Neither comment nor newline
    #[must_use]
    pub fn is_code(&self) -> bool {
        !self.is_comment_or_newline()
    }

    /// Type-like kinds: type names, qualifiers, aggregate keywords, `::`
    #[must_use]
    pub fn is_type(&self) -> bool {
        matches!(
            self.kind(),
            TokenKind::Type
                | TokenKind::PtrType
                | TokenKind::Byref
                | TokenKind::DcMember
                | TokenKind::Qualifier
                | TokenKind::Struct
                | TokenKind::Enum
                | TokenKind::Union
        )
    }

    /// Text starts like an identifier or keyword
    #[must_use]
    pub fn is_word(&self) -> bool {
        self.text
            .chars()
            .next()
            .is_some_and(|c| c.is_alphabetic() || matches!(c, '_' | '@' | '$'))
    }

    #[must_use]
    pub fn is_str(&self, text: &str) -> bool {
        self.text == text
    }

    #[must_use]
    pub fn is_str_ignore_case(&self, text: &str) -> bool {
        self.text.eq_ignore_ascii_case(text)
    }

    #[must_use]
    pub fn is_attribute_or_declspec(&self) -> bool {
        matches!(self.kind(), TokenKind::Attribute | TokenKind::Declspec)
    }
}

impl ChunkList {
    /// Apply a chunk predicate to an optional id; absent answers `false`
    pub fn is(&self, id: impl Into<Option<ChunkId>>, pred: impl FnOnce(&Chunk) -> bool) -> bool {
        self.get(id).is_some_and(pred)
    }

    /// True when the chunk has the given kind
    pub fn is_kind(&self, id: impl Into<Option<ChunkId>>, kind: TokenKind) -> bool {
        self.is(id, |chunk| chunk.kind() == kind)
    }

    /// Address-of or by-reference marker.
    ///
    /// Inside a template argument list a `&` right after `,` or `<` is a
    /// value, not a reference.
    pub fn is_address(&self, id: impl Into<Option<ChunkId>>) -> bool {
        let id = id.into();
        let Some(chunk) = self.get(id) else {
            return false;
        };
        let marker = chunk.kind() == TokenKind::Byref
            || (chunk.text == "&" && chunk.kind() != TokenKind::OperatorVal);
        if !marker {
            return false;
        }
        if chunk.flags().contains(ChunkFlags::IN_TEMPLATE) {
            let prev = self.prev_raw(id);
            if self.is(prev, |p| matches!(p.kind(), TokenKind::Comma | TokenKind::AngleOpen)) {
                return false;
            }
        }
        true
    }

    /// C++/CLI managed reference `^`
    pub fn is_msref(&self, id: impl Into<Option<ChunkId>>) -> bool {
        self.languages().contains(Language::Cpp)
            && self.is(id, |chunk| chunk.text == "^" && chunk.kind() != TokenKind::OperatorVal)
    }

    /// C# nullable suffix `?`
    pub fn is_nullable(&self, id: impl Into<Option<ChunkId>>) -> bool {
        self.languages().contains(Language::CSharp) && self.is(id, |chunk| chunk.text == "?")
    }

    /// Any pointer-like operator: `*`, address-of, `^`, nullable `?`
    pub fn is_ptr_operator(&self, id: impl Into<Option<ChunkId>>) -> bool {
        let id = id.into();
        self.is(id, Chunk::is_star) || self.is_address(id) || self.is_msref(id) || self.is_nullable(id)
    }

    pub fn is_pointer_or_reference(&self, id: impl Into<Option<ChunkId>>) -> bool {
        let id = id.into();
        self.is_ptr_operator(id) || self.is_kind(id, TokenKind::Byref)
    }

    /// `public`, `protected` or `private` in a C++ base-class list
    pub fn is_cpp_inheritance_access_specifier(&self, id: impl Into<Option<ChunkId>>) -> bool {
        self.languages().contains(Language::Cpp)
            && self.is(id, |chunk| {
                matches!(chunk.kind(), TokenKind::Access | TokenKind::Qualifier)
                    && matches!(chunk.text.as_str(), "public" | "protected" | "private")
            })
    }

    /// Opening paren of an Objective-C `for (x in y)` loop
    pub fn is_for_in(&self, id: impl Into<Option<ChunkId>>) -> bool {
        let id = id.into();
        if !self.languages().contains(Language::ObjectiveC) || !self.is_kind(id, TokenKind::SparenOpen) {
            return false;
        }
        if !self.is_kind(self.prev_code(id, Scope::All), TokenKind::For) {
            return false;
        }
        let mut cursor = id;
        while let Some(chunk) = self.get(cursor) {
            match chunk.kind() {
                TokenKind::In => return true,
                TokenKind::SparenClose => return false,
                _ => cursor = self.next_code(cursor, Scope::All),
            }
        }
        false
    }

    /// Both chunks agree on the preprocessor flag (absent counts as agreeing)
    pub fn same_preproc(&self, a: impl Into<Option<ChunkId>>, b: impl Into<Option<ChunkId>>) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => a.is_preproc() == b.is_preproc(),
            _ => true,
        }
    }

    /// A newline can go when its neighbours share the preprocessor flag and
    /// it does not end a `//` comment
    pub fn safe_to_delete_newline(&self, newline: impl Into<Option<ChunkId>>) -> bool {
        let newline = newline.into();
        let prev = self.prev_raw(newline);
        if self.is_kind(prev, TokenKind::CommentCpp) {
            return false;
        }
        self.same_preproc(prev, self.next_raw(newline))
    }

    /// Kind of the chunk linked as parent, `TokenKind::None` without one
    pub fn parent_chunk_kind(&self, id: impl Into<Option<ChunkId>>) -> TokenKind {
        self.get(id)
            .and_then(Chunk::parent)
            .and_then(|parent| self.get(parent))
            .map_or(TokenKind::None, Chunk::kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChunkListConfig;

    fn chunk(kind: TokenKind, text: &str) -> Chunk {
        Chunk::new(kind, text)
    }

    fn list_for(language: Language, chunks: Vec<Chunk>) -> (ChunkList, Vec<ChunkId>) {
        let mut list = ChunkList::with_config(ChunkListConfig::for_language(language)).unwrap();
        let ids = chunks.into_iter().map(|c| list.push_back(c)).collect();
        (list, ids)
    }

    #[test]
    fn test_comment_family_is_union() {
        for kind in TokenKind::ALL {
            let c = chunk(*kind, "//x");
            assert_eq!(c.is_comment(), c.is_single_line_comment() || c.is_block_comment());
            // pure: asking twice agrees
            assert_eq!(c.is_comment(), c.is_comment());
        }
    }

    #[test]
    fn test_doc_comment() {
        assert!(chunk(TokenKind::CommentCpp, "/// doc").is_doc_comment());
        assert!(chunk(TokenKind::CommentMulti, "/*! doc */").is_doc_comment());
        assert!(chunk(TokenKind::CommentCpp, "//@{").is_doc_comment());
        assert!(!chunk(TokenKind::CommentCpp, "// plain").is_doc_comment());
        assert!(!chunk(TokenKind::CommentCpp, "//").is_doc_comment());
        assert!(!chunk(TokenKind::Word, "///").is_doc_comment());
    }

    #[test]
    fn test_simple_families() {
        assert!(chunk(TokenKind::NlCont, "\\\n").is_newline());
        assert!(chunk(TokenKind::Vsemicolon, "").is_semicolon());
        assert!(chunk(TokenKind::Vsemicolon, "").is_blank());
        assert!(chunk(TokenKind::VbraceOpen, "").is_opening_brace());
        assert!(chunk(TokenKind::VbraceClose, "").is_vbrace());
        assert!(!chunk(TokenKind::BraceClose, "}").is_vbrace());
        assert!(chunk(TokenKind::LparenClose, ")").is_paren_close());
        assert!(chunk(TokenKind::Tsquare, "[]").is_balanced_square());
        assert!(chunk(TokenKind::CaseColon, ":").is_colon());
        assert!(chunk(TokenKind::Star, "*").is_star());
        assert!(!chunk(TokenKind::OperatorVal, "*").is_star());
    }

    #[test]
    fn test_structural_grouping() {
        let class = chunk(TokenKind::Class, "class");
        let union = chunk(TokenKind::Union, "union");
        let enum_class = chunk(TokenKind::EnumClass, "enum");
        assert!(class.is_class_or_struct());
        assert!(!union.is_class_or_struct());
        assert!(union.is_class_struct_union());
        assert!(!enum_class.is_class_struct_union());
        assert!(enum_class.is_class_enum_struct_union());
    }

    #[test]
    fn test_combined_filters() {
        let pp_comment = chunk(TokenKind::Comment, "/* x */").in_preproc();
        assert!(pp_comment.is_comment_or_newline_in_preproc());
        assert!(!chunk(TokenKind::Comment, "/* x */").is_comment_or_newline_in_preproc());
        assert!(chunk(TokenKind::Word, "x").in_preproc().is_comment_newline_or_preproc());
        assert!(chunk(TokenKind::Ignored, "x").is_comment_or_newline_or_ignored());
        assert!(chunk(TokenKind::Word, "").is_comment_newline_or_blank());
    }

    #[test]
    fn test_word_and_type() {
        assert!(chunk(TokenKind::Word, "_x").is_word());
        assert!(!chunk(TokenKind::Number, "1").is_word());
        assert!(chunk(TokenKind::Qualifier, "const").is_type());
        assert!(chunk(TokenKind::Word, "Foo").is_str("Foo"));
        assert!(chunk(TokenKind::Word, "Foo").is_str_ignore_case("fOO"));
    }

    #[test]
    fn test_absent_chunk_is_false() {
        let list = ChunkList::new();
        assert!(!list.is(None, Chunk::is_comment));
        assert!(!list.is_address(None));
        assert!(!list.is_pointer_or_reference(None));
    }

    #[test]
    fn test_address_in_template_list() {
        let (list, ids) = list_for(
            Language::Cpp,
            vec![
                chunk(TokenKind::AngleOpen, "<").with_flags(ChunkFlags::IN_TEMPLATE),
                chunk(TokenKind::Amp, "&").with_flags(ChunkFlags::IN_TEMPLATE),
                chunk(TokenKind::Word, "T").with_flags(ChunkFlags::IN_TEMPLATE),
                chunk(TokenKind::Amp, "&").with_flags(ChunkFlags::IN_TEMPLATE),
                chunk(TokenKind::Amp, "&"),
            ],
        );
        assert!(!list.is_address(ids[1]));
        assert!(list.is_address(ids[3]));
        assert!(list.is_address(ids[4]));
        assert!(list.is_ptr_operator(ids[4]));
    }

    #[test]
    fn test_dialect_gated_markers() {
        let (cpp, cpp_ids) = list_for(Language::Cpp, vec![chunk(TokenKind::Caret, "^"), chunk(TokenKind::Question, "?")]);
        assert!(cpp.is_msref(cpp_ids[0]));
        assert!(!cpp.is_nullable(cpp_ids[1]));

        let (cs, cs_ids) = list_for(Language::CSharp, vec![chunk(TokenKind::Caret, "^"), chunk(TokenKind::Question, "?")]);
        assert!(!cs.is_msref(cs_ids[0]));
        assert!(cs.is_nullable(cs_ids[1]));
        assert!(cs.is_pointer_or_reference(cs_ids[1]));
    }

    #[test]
    fn test_inheritance_access_specifier() {
        let (cpp, ids) = list_for(
            Language::Cpp,
            vec![
                chunk(TokenKind::Qualifier, "public"),
                chunk(TokenKind::Access, "privately"),
                chunk(TokenKind::Word, "protected"),
            ],
        );
        assert!(cpp.is_cpp_inheritance_access_specifier(ids[0]));
        assert!(!cpp.is_cpp_inheritance_access_specifier(ids[1]));
        assert!(!cpp.is_cpp_inheritance_access_specifier(ids[2]));

        let (java, ids) = list_for(Language::Java, vec![chunk(TokenKind::Qualifier, "public")]);
        assert!(!java.is_cpp_inheritance_access_specifier(ids[0]));
    }

    #[test]
    fn test_for_in() {
        let tokens = || {
            vec![
                chunk(TokenKind::For, "for"),
                chunk(TokenKind::SparenOpen, "("),
                chunk(TokenKind::Word, "x"),
                chunk(TokenKind::In, "in"),
                chunk(TokenKind::Word, "xs"),
                chunk(TokenKind::SparenClose, ")"),
            ]
        };
        let (oc, ids) = list_for(Language::ObjectiveC, tokens());
        assert!(oc.is_for_in(ids[1]));
        assert!(!oc.is_for_in(ids[0]));

        let (c, ids) = list_for(Language::C, tokens());
        assert!(!c.is_for_in(ids[1]));

        let (oc, ids) = list_for(
            Language::ObjectiveC,
            vec![
                chunk(TokenKind::For, "for"),
                chunk(TokenKind::SparenOpen, "("),
                chunk(TokenKind::Semicolon, ";"),
                chunk(TokenKind::SparenClose, ")"),
                chunk(TokenKind::In, "in"),
            ],
        );
        assert!(!oc.is_for_in(ids[1]));
    }

    #[test]
    fn test_safe_to_delete_newline() {
        let (list, ids) = list_for(
            Language::C,
            vec![
                chunk(TokenKind::Word, "a"),
                Chunk::newline(),
                chunk(TokenKind::Word, "b"),
                chunk(TokenKind::CommentCpp, "// c"),
                Chunk::newline(),
                chunk(TokenKind::Word, "d"),
            ],
        );
        assert!(list.safe_to_delete_newline(ids[1]));
        assert!(!list.safe_to_delete_newline(ids[4]));
        assert!(list.same_preproc(ids[0], None));
    }

    #[test]
    fn test_parent_chunk_kind() {
        let (mut list, ids) = list_for(
            Language::C,
            vec![chunk(TokenKind::BraceOpen, "{"), chunk(TokenKind::Word, "x")],
        );
        assert_eq!(list.parent_chunk_kind(ids[1]), TokenKind::None);
        list.set_parent_chunk(ids[1], ids[0]).unwrap();
        assert_eq!(list.parent_chunk_kind(ids[1]), TokenKind::BraceOpen);
    }
}
