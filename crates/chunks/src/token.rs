use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generates the closed token-kind enumeration together with its name table,
/// so the variant list and the printable names never drift apart.
macro_rules! token_kinds {
    ($($(#[$meta:meta])* $variant:ident => $name:literal,)+) => {
        /// Lexical or syntactic category of a chunk.
        ///
        /// The same enumeration is used for a chunk's own kind and for its
        /// parent kind (the construct it belongs to).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum TokenKind {
            $($(#[$meta])* $variant,)+
        }

        impl TokenKind {
            /// Every token kind, in declaration order
            pub const ALL: &'static [TokenKind] = &[$(TokenKind::$variant,)+];

            /// Printable upper-case name
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(TokenKind::$variant => $name,)+
                }
            }
        }
    };
}

token_kinds! {
    /// No kind assigned (also the default parent kind)
    None => "NONE",
    Eof => "EOF",
    Unknown => "UNKNOWN",
    Junk => "JUNK",

    // Whitespace and comments
    Newline => "NEWLINE",
    /// Backslash line continuation
    NlCont => "NL_CONT",
    /// C-style comment on a single line
    Comment => "COMMENT",
    /// Comment spanning several lines
    CommentMulti => "COMMENT_MULTI",
    /// `//` comment
    CommentCpp => "COMMENT_CPP",
    /// Chunk the formatter must leave untouched
    Ignored => "IGNORED",

    // Literals and names
    Word => "WORD",
    Number => "NUMBER",
    NumberFp => "NUMBER_FP",
    String => "STRING",
    StringMulti => "STRING_MULTI",
    Type => "TYPE",
    PtrType => "PTR_TYPE",
    Qualifier => "QUALIFIER",
    Label => "LABEL",

    // Keywords
    If => "IF",
    Else => "ELSE",
    ElseIf => "ELSEIF",
    For => "FOR",
    While => "WHILE",
    WhileOfDo => "WHILE_OF_DO",
    Do => "DO",
    Switch => "SWITCH",
    Case => "CASE",
    Default => "DEFAULT",
    Return => "RETURN",
    Break => "BREAK",
    Continue => "CONTINUE",
    Goto => "GOTO",
    Throw => "THROW",
    Try => "TRY",
    Catch => "CATCH",
    Finally => "FINALLY",
    Synchronized => "SYNCHRONIZED",
    Typedef => "TYPEDEF",
    Struct => "STRUCT",
    Union => "UNION",
    Enum => "ENUM",
    EnumClass => "ENUM_CLASS",
    Class => "CLASS",
    Namespace => "NAMESPACE",
    Template => "TEMPLATE",
    Typename => "TYPENAME",
    Using => "USING",
    UsingStmt => "USING_STMT",
    Extern => "EXTERN",
    Access => "ACCESS",
    Operator => "OPERATOR",
    /// The operator symbol or type that follows `operator`
    OperatorVal => "OPERATOR_VAL",
    Sizeof => "SIZEOF",
    Decltype => "DECLTYPE",
    Noexcept => "NOEXCEPT",
    Constexpr => "CONSTEXPR",
    Unsafe => "UNSAFE",
    This => "THIS",
    Base => "BASE",
    In => "IN",
    Getset => "GETSET",
    GetsetEmpty => "GETSET_EMPTY",
    Attribute => "ATTRIBUTE",
    Declspec => "DECLSPEC",

    // Operators
    Assign => "ASSIGN",
    SqlAssign => "SQL_ASSIGN",
    Arith => "ARITH",
    Shift => "SHIFT",
    Compare => "COMPARE",
    Bool => "BOOL",
    Caret => "CARET",
    Amp => "AMP",
    Star => "STAR",
    Minus => "MINUS",
    Plus => "PLUS",
    Not => "NOT",
    /// `~`
    Inv => "INV",
    Question => "QUESTION",
    Byref => "BYREF",
    Deref => "DEREF",
    Addr => "ADDR",
    Comma => "COMMA",
    Dot => "DOT",
    Member => "MEMBER",
    /// `::`
    DcMember => "DC_MEMBER",
    Ellipsis => "ELLIPSIS",
    /// C# `?.`
    Nullcond => "NULLCOND",
    /// D `~` string concatenation
    Concat => "CONCAT",

    // Statement terminators
    Semicolon => "SEMICOLON",
    /// Inferred statement end where the language allows omitting `;`
    Vsemicolon => "VSEMICOLON",

    // Colon usages
    Colon => "COLON",
    AccessColon => "ACCESS_COLON",
    AsmColon => "ASM_COLON",
    BitColon => "BIT_COLON",
    CaseColon => "CASE_COLON",
    ClassColon => "CLASS_COLON",
    CondColon => "COND_COLON",
    ConstrColon => "CONSTR_COLON",
    CsSqColon => "CS_SQ_COLON",
    DArrayColon => "D_ARRAY_COLON",
    ForColon => "FOR_COLON",
    LabelColon => "LABEL_COLON",
    OcColon => "OC_COLON",
    OcDictColon => "OC_DICT_COLON",
    TagColon => "TAG_COLON",
    WhereColon => "WHERE_COLON",

    // Delimiters
    ParenOpen => "PAREN_OPEN",
    ParenClose => "PAREN_CLOSE",
    /// Statement parenthesis (`if (`)
    SparenOpen => "SPAREN_OPEN",
    SparenClose => "SPAREN_CLOSE",
    /// Function parenthesis
    FparenOpen => "FPAREN_OPEN",
    FparenClose => "FPAREN_CLOSE",
    /// Type-cast parenthesis
    TparenOpen => "TPAREN_OPEN",
    TparenClose => "TPAREN_CLOSE",
    /// Lambda parameter parenthesis
    LparenOpen => "LPAREN_OPEN",
    LparenClose => "LPAREN_CLOSE",
    BraceOpen => "BRACE_OPEN",
    BraceClose => "BRACE_CLOSE",
    /// Synthesized brace around a braceless body
    VbraceOpen => "VBRACE_OPEN",
    VbraceClose => "VBRACE_CLOSE",
    AngleOpen => "ANGLE_OPEN",
    AngleClose => "ANGLE_CLOSE",
    SquareOpen => "SQUARE_OPEN",
    SquareClose => "SQUARE_CLOSE",
    /// Empty `[]`
    Tsquare => "TSQUARE",
    BracedInitList => "BRACED_INIT_LIST",

    // Functions and declarations
    Func => "FUNC",
    FuncCall => "FUNC_CALL",
    FuncDef => "FUNC_DEF",
    FuncProto => "FUNC_PROTO",
    Destructor => "DESTRUCTOR",
    TrailingRet => "TRAILING_RET",
    TypeCast => "TYPE_CAST",
    ParameterPack => "PARAMETER_PACK",

    // Preprocessor
    /// The `#` opening a directive
    Preproc => "PREPROC",
    PreprocBody => "PREPROC_BODY",
    PpDefine => "PP_DEFINE",
    PpInclude => "PP_INCLUDE",
    PpIf => "PP_IF",
    PpElse => "PP_ELSE",
    PpEndif => "PP_ENDIF",
    PpPragma => "PP_PRAGMA",
    PpRegion => "PP_REGION",
    PpEndregion => "PP_ENDREGION",
    PpOther => "PP_OTHER",
    Macro => "MACRO",
    MacroFunc => "MACRO_FUNC",

    // D
    DTemplate => "D_TEMPLATE",
    DVersion => "D_VERSION",
    DVersionIf => "D_VERSION_IF",
    DScope => "D_SCOPE",
    DScopeIf => "D_SCOPE_IF",
    Unittest => "UNITTEST",

    // Objective-C
    OcImpl => "OC_IMPL",
    OcIntf => "OC_INTF",
    OcProtocol => "OC_PROTOCOL",
    OcEnd => "OC_END",
    OcClass => "OC_CLASS",
    OcCategory => "OC_CATEGORY",
    OcProperty => "OC_PROPERTY",
    OcPropertyAttr => "OC_PROPERTY_ATTR",
    OcSel => "OC_SEL",
    OcSelName => "OC_SEL_NAME",

    // Embedded SQL
    SqlExec => "SQL_EXEC",
    SqlBegin => "SQL_BEGIN",
    SqlEnd => "SQL_END",
    SqlWord => "SQL_WORD",
}

impl Default for TokenKind {
    fn default() -> Self {
        TokenKind::None
    }
}

impl TokenKind {
    /// The closing kind paired with an opening delimiter kind
    #[must_use]
    pub const fn closing_kind(self) -> Option<TokenKind> {
        match self {
            TokenKind::ParenOpen => Some(TokenKind::ParenClose),
            TokenKind::SparenOpen => Some(TokenKind::SparenClose),
            TokenKind::FparenOpen => Some(TokenKind::FparenClose),
            TokenKind::TparenOpen => Some(TokenKind::TparenClose),
            TokenKind::LparenOpen => Some(TokenKind::LparenClose),
            TokenKind::BraceOpen => Some(TokenKind::BraceClose),
            TokenKind::VbraceOpen => Some(TokenKind::VbraceClose),
            TokenKind::AngleOpen => Some(TokenKind::AngleClose),
            TokenKind::SquareOpen => Some(TokenKind::SquareClose),
            _ => None,
        }
    }

    /// The opening kind paired with a closing delimiter kind
    #[must_use]
    pub const fn opening_kind(self) -> Option<TokenKind> {
        match self {
            TokenKind::ParenClose => Some(TokenKind::ParenOpen),
            TokenKind::SparenClose => Some(TokenKind::SparenOpen),
            TokenKind::FparenClose => Some(TokenKind::FparenOpen),
            TokenKind::TparenClose => Some(TokenKind::TparenOpen),
            TokenKind::LparenClose => Some(TokenKind::LparenOpen),
            TokenKind::BraceClose => Some(TokenKind::BraceOpen),
            TokenKind::VbraceClose => Some(TokenKind::VbraceOpen),
            TokenKind::AngleClose => Some(TokenKind::AngleOpen),
            TokenKind::SquareClose => Some(TokenKind::SquareOpen),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_opening_delimiter(self) -> bool {
        self.closing_kind().is_some()
    }

    #[must_use]
    pub const fn is_closing_delimiter(self) -> bool {
        self.opening_kind().is_some()
    }

    /// Every colon flavour collapses to this one check
    #[must_use]
    pub const fn is_colon(self) -> bool {
        matches!(
            self,
            TokenKind::AccessColon
                | TokenKind::AsmColon
                | TokenKind::BitColon
                | TokenKind::CaseColon
                | TokenKind::ClassColon
                | TokenKind::Colon
                | TokenKind::CondColon
                | TokenKind::ConstrColon
                | TokenKind::CsSqColon
                | TokenKind::DArrayColon
                | TokenKind::ForColon
                | TokenKind::LabelColon
                | TokenKind::OcColon
                | TokenKind::OcDictColon
                | TokenKind::TagColon
                | TokenKind::WhereColon
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("CT_").unwrap_or(s);
        TokenKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| format!("unknown token kind '{s}'"))
    }
}

impl TryFrom<String> for TokenKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TokenKind> for &'static str {
    fn from(kind: TokenKind) -> Self {
        kind.as_str()
    }
}
