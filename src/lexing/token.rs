use lazy_static::lazy_static;
use std::collections::HashSet;
use std::fmt;

/// The closed set of lexical categories. A handful of kinds (`ReserveWord`,
/// `NoiseWord`, `Char`, the unary operators) are part of the language's
/// vocabulary but are never produced by the lexer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    Identifier,
    Keyword,

    ReserveWord,
    NoiseWord,
    Comment,

    // Delimiters
    BoxLeft,
    BoxRight,
    ParenLeft,
    ParenRight,
    CurlyLeft,
    CurlyRight,
    Semicolon,

    // Arithmetic operators
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponent,
    DivFloor,

    // Comparison and logical operators
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    NotEqual,
    Equal,
    And,
    Or,
    Not,

    // Other operators
    Dot,
    Comma,

    // Assignment operators
    Assign,
    AssignAdd,
    AssignSub,
    AssignMult,
    AssignDiv,
    AssignMod,

    // Unary operators
    UnaryMinus,
    Increment,
    Decrement,

    // Literals
    String,
    Integer,
    Float,
    Boolean,
    Char,

    Newline,

    Invalid,

    EOF,
}

lazy_static! {
    static ref RESERVED_WORDS: HashSet<&'static str> = [
        "abyss",
        "absolute",
        "archane",
        "arsenal",
        "attempt",
        "avatar",
        "awm",
        "breach",
        "cast",
        "chamber",
        "chunk",
        "core",
        "dispatch",
        "display",
        "do",
        "else",
        "elseif",
        "enchant",
        "enum",
        "ephemeral",
        "expands",
        "false",
        "figure",
        "for",
        "hero",
        "if",
        "incantation",
        "instanceof",
        "lootbox",
        "midget",
        "pacify",
        "party",
        "persist",
        "plaza",
        "point",
        "portal",
        "powerup",
        "save",
        "shadow",
        "shield",
        "shoot",
        "shoots",
        "spawns",
        "stable",
        "supreme",
        "synchronized",
        "this",
        "toggle",
        "true",
        "truth",
        "twin",
        "unarmed",
        "unstable",
        "while",
    ]
    .iter()
    .copied()
    .collect();
}

pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(word)
}

/// One classified lexeme. The column is the position of the character that
/// caused the lexeme to close, not the position where it started.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: &str, line: usize, column: usize) -> Self {
        Token {
            kind,
            text: String::from(text),
            line,
            column,
        }
    }

    pub fn eof() -> Self {
        Token::new(TokenKind::EOF, "", 0, 0)
    }

    pub fn lexeme(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Token(kind: {:?}, lexeme: {:?}, line: {}, column: {})",
            self.kind, self.text, self.line, self.column
        )
    }
}

pub trait TokenString {
    fn token_string(&self) -> String;
}

impl TokenString for [Token] {
    fn token_string(&self) -> String {
        let strings: Vec<String> = self.iter().map(|t| t.to_string()).collect();
        String::from("Vec(") + &strings.join(", ") + ")"
    }
}
