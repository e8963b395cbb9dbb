use super::token::*;
use super::LexedProgram;
use crate::diagnostic::{self, Diagnostic};
use crate::source::Source;
use log::trace;
use std::rc::Rc;

/// The machine is re-entered once per character. A lexeme under construction
/// lives in the buffer; it closes when the incoming character cannot extend
/// it, and the closing character's column is the one recorded on the token.
#[derive(Clone, Copy, Debug, PartialEq)]
enum State {
    Start,
    Word,
    Number,
    Float,
    Operator,
    Logical,
    StringLiteral,
    LineComment,
    BlockComment,
    Semicolon,
    Delimiter,
}

enum Action {
    /// Append the character to the buffer.
    Extend,
    /// Append the character and close the buffer it completes.
    ExtendClose,
    /// Close the buffer, then start a new one with the character.
    CloseOpen,
    /// Close the buffer; the character itself produces nothing.
    CloseSkip,
}

pub struct Lexer {
    source: Source,
    tokens: Vec<Token>,
    buffer: String,
    state: State,
    line: usize,
    reporter: Rc<dyn diagnostic::Reporter>,
}

impl Lexer {
    pub fn new(source: Source, reporter: Rc<dyn diagnostic::Reporter>) -> Self {
        Lexer {
            source,
            tokens: Vec::new(),
            buffer: String::new(),
            state: State::Start,
            line: 0,
            reporter,
        }
    }

    pub fn lex(mut self) -> LexedProgram {
        let source = Rc::clone(&self.source);
        let mut last_column = 0;

        for (number, line) in source.lines.iter().enumerate() {
            self.line = number + 1;
            for (column, character) in line.chars().enumerate() {
                self.step(character, column);
                last_column = column;
            }
        }

        // Only an unterminated construct survives past its closing line.
        if !self.buffer.is_empty() {
            self.close(last_column);
        }

        self.tokens.push(Token::eof());

        LexedProgram {
            source: self.source,
            tokens: self.tokens,
        }
    }

    fn step(&mut self, character: char, column: usize) {
        if character == '\n' {
            self.newline(column);
            return;
        }

        let (next, action) = Self::transition(self.state, &self.buffer, character);
        match action {
            Action::Extend => self.buffer.push(character),
            Action::ExtendClose => {
                self.buffer.push(character);
                self.close(column);
            }
            Action::CloseOpen => {
                self.close(column);
                self.buffer.push(character);
            }
            Action::CloseSkip => self.close(column),
        }
        self.state = next;
    }

    /// A newline closes whatever is pending and then becomes a lexeme of its
    /// own, unless a block comment is still open, in which case it is part of
    /// the comment text and the state carries into the next line.
    fn newline(&mut self, column: usize) {
        if self.state == State::BlockComment && !Self::block_comment_complete(&self.buffer) {
            self.buffer.push('\n');
            return;
        }

        self.close(column);
        self.state = State::Start;
        self.push_token(TokenKind::Newline, String::from("\n"), column);
    }

    fn transition(state: State, buffer: &str, character: char) -> (State, Action) {
        match state {
            State::Start => Self::open(character),

            State::Word => {
                if character.is_ascii_alphanumeric() {
                    (State::Word, Action::Extend)
                } else if Self::is_boundary(character) {
                    Self::open(character)
                } else {
                    // Unrecognized characters are absorbed; classification
                    // at close surfaces them as an invalid lexeme.
                    (State::Word, Action::Extend)
                }
            }

            State::Number => match character {
                c if c.is_ascii_digit() => (State::Number, Action::Extend),
                '.' => (State::Float, Action::Extend),
                c => Self::open(c),
            },

            State::Float => match character {
                c if c.is_ascii_digit() => (State::Float, Action::Extend),
                c => Self::open(c),
            },

            State::Operator => match (buffer, character) {
                ("/", '/') => (State::LineComment, Action::Extend),
                ("/", '*') => (State::BlockComment, Action::Extend),
                ("/", '_') => (State::Start, Action::ExtendClose),
                ("*", '*') => (State::Start, Action::ExtendClose),
                (".", c) if c.is_ascii_digit() => (State::Float, Action::Extend),
                (b, '=') if b != "." => (State::Start, Action::ExtendClose),
                (_, c) => Self::open(c),
            },

            State::Logical => match (buffer, character) {
                ("&", '&') | ("|", '|') => (State::Start, Action::ExtendClose),
                (_, c) => Self::open(c),
            },

            State::StringLiteral => {
                let quote = buffer.chars().next();
                if quote == Some(character) {
                    (State::Start, Action::ExtendClose)
                } else {
                    (State::StringLiteral, Action::Extend)
                }
            }

            State::LineComment => (State::LineComment, Action::Extend),

            State::BlockComment => {
                if Self::block_comment_complete(buffer) {
                    Self::open(character)
                } else {
                    (State::BlockComment, Action::Extend)
                }
            }

            State::Semicolon | State::Delimiter => Self::open(character),
        }
    }

    /// Transition out of the empty-buffer state: the character either starts
    /// a fresh lexeme or is whitespace and starts nothing.
    fn open(character: char) -> (State, Action) {
        match character {
            c if c.is_whitespace() => (State::Start, Action::CloseSkip),
            c if c.is_ascii_digit() => (State::Number, Action::CloseOpen),
            '\'' | '"' => (State::StringLiteral, Action::CloseOpen),
            ';' => (State::Semicolon, Action::CloseOpen),
            '{' | '}' | '(' | ')' | '[' | ']' | ',' => (State::Delimiter, Action::CloseOpen),
            c if Self::is_operator_char(c) => (State::Operator, Action::CloseOpen),
            '&' | '|' => (State::Logical, Action::CloseOpen),
            _ => (State::Word, Action::CloseOpen),
        }
    }

    fn close(&mut self, column: usize) {
        if self.buffer.is_empty() {
            return;
        }

        let text = std::mem::replace(&mut self.buffer, String::new());
        let (kind, complaint) = self.classify(&text);
        if let Some(message) = complaint {
            self.error(&message, column);
        }
        self.push_token(kind, text, column);
        self.state = State::Start;
    }

    fn classify(&self, text: &str) -> (TokenKind, Option<String>) {
        match self.state {
            State::Word => {
                if text == "true" || text == "false" {
                    (TokenKind::Boolean, None)
                } else if is_reserved_word(text) {
                    (TokenKind::Keyword, None)
                } else if Self::is_identifier(text) {
                    (TokenKind::Identifier, None)
                } else {
                    (
                        TokenKind::Invalid,
                        Some(format!("unrecognized lexeme '{}'", text)),
                    )
                }
            }

            State::Number => (TokenKind::Integer, None),
            State::Float => (TokenKind::Float, None),

            State::Operator => match text {
                "+" => (TokenKind::Add, None),
                "-" => (TokenKind::Subtract, None),
                "*" => (TokenKind::Multiply, None),
                "/" => (TokenKind::Divide, None),
                "%" => (TokenKind::Modulo, None),
                "**" => (TokenKind::Exponent, None),
                "/_" => (TokenKind::DivFloor, None),
                ">" => (TokenKind::Greater, None),
                "<" => (TokenKind::Less, None),
                ">=" => (TokenKind::GreaterEqual, None),
                "<=" => (TokenKind::LessEqual, None),
                "==" => (TokenKind::Equal, None),
                "!=" => (TokenKind::NotEqual, None),
                "=" => (TokenKind::Assign, None),
                "+=" => (TokenKind::AssignAdd, None),
                "-=" => (TokenKind::AssignSub, None),
                "*=" => (TokenKind::AssignMult, None),
                "/=" => (TokenKind::AssignDiv, None),
                "%=" => (TokenKind::AssignMod, None),
                "!" => (TokenKind::Not, None),
                "." => (TokenKind::Dot, None),
                _ => (
                    TokenKind::Invalid,
                    Some(format!("unrecognized operator '{}'", text)),
                ),
            },

            State::Logical => match text {
                "&&" => (TokenKind::And, None),
                "||" => (TokenKind::Or, None),
                _ => (
                    TokenKind::Invalid,
                    Some(format!("unrecognized operator '{}'", text)),
                ),
            },

            State::StringLiteral => {
                let first = text.chars().next();
                let last = text.chars().last();
                if text.chars().count() > 1 && first == last {
                    (TokenKind::String, None)
                } else {
                    (
                        TokenKind::Invalid,
                        Some(String::from("unterminated string literal")),
                    )
                }
            }

            State::LineComment => (TokenKind::Comment, None),

            State::BlockComment => {
                if Self::block_comment_complete(text) {
                    (TokenKind::Comment, None)
                } else {
                    (
                        TokenKind::Invalid,
                        Some(String::from("unterminated block comment")),
                    )
                }
            }

            State::Semicolon => (TokenKind::Semicolon, None),

            State::Delimiter => match text {
                "{" => (TokenKind::CurlyLeft, None),
                "}" => (TokenKind::CurlyRight, None),
                "(" => (TokenKind::ParenLeft, None),
                ")" => (TokenKind::ParenRight, None),
                "[" => (TokenKind::BoxLeft, None),
                "]" => (TokenKind::BoxRight, None),
                "," => (TokenKind::Comma, None),
                _ => (
                    TokenKind::Invalid,
                    Some(format!("unrecognized delimiter '{}'", text)),
                ),
            },

            State::Start => (
                TokenKind::Invalid,
                Some(format!("unrecognized lexeme '{}'", text)),
            ),
        }
    }

    fn push_token(&mut self, kind: TokenKind, text: String, column: usize) {
        let token = Token {
            kind,
            text,
            line: self.line,
            column,
        };
        trace!(target: "lexer", "closed {}", token);
        self.tokens.push(token);
    }

    fn error(&self, message: &str, column: usize) {
        self.reporter
            .report(Diagnostic::lexical(self.line, column, message));
    }

    fn is_identifier(text: &str) -> bool {
        let mut characters = text.chars();
        match characters.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                characters.all(|c| c.is_ascii_alphanumeric())
            }
            _ => false,
        }
    }

    /// The closing pair must not overlap the opening one, so `/*/` is still
    /// open and `/**/` is the shortest complete comment.
    fn block_comment_complete(buffer: &str) -> bool {
        buffer.len() >= 4 && buffer.ends_with("*/")
    }

    fn is_boundary(character: char) -> bool {
        character.is_whitespace()
            || character == ';'
            || character == '\''
            || character == '"'
            || character == '&'
            || character == '|'
            || Self::is_operator_char(character)
            || Self::is_delimiter_char(character)
    }

    fn is_operator_char(character: char) -> bool {
        "+-*/%><=!.".contains(character)
    }

    fn is_delimiter_char(character: char) -> bool {
        "{}()[],".contains(character)
    }
}
