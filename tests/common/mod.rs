pub use pytme::diagnostic::*;
use std::cell::RefCell;
use std::rc::Rc;

pub type TestResult = std::result::Result<(), String>;

#[allow(dead_code)]
pub mod test_token {

    use pytme::lexing::{Token, TokenKind};

    pub fn test(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text, 1, 0)
    }

    pub fn identifier(text: &str) -> Token {
        test(TokenKind::Identifier, text)
    }

    pub fn keyword(text: &str) -> Token {
        test(TokenKind::Keyword, text)
    }

    pub fn integer(text: &str) -> Token {
        test(TokenKind::Integer, text)
    }

    pub fn float(text: &str) -> Token {
        test(TokenKind::Float, text)
    }

    pub fn boolean(text: &str) -> Token {
        test(TokenKind::Boolean, text)
    }

    pub fn string(text: &str) -> Token {
        test(TokenKind::String, text)
    }

    pub fn comment(text: &str) -> Token {
        test(TokenKind::Comment, text)
    }

    pub fn invalid(text: &str) -> Token {
        test(TokenKind::Invalid, text)
    }

    pub fn semicolon() -> Token {
        test(TokenKind::Semicolon, ";")
    }

    pub fn newline() -> Token {
        test(TokenKind::Newline, "\n")
    }
}

pub struct DiagnosticCapture {
    diagnostics: Rc<RefCell<Vec<Diagnostic>>>,
}

impl DiagnosticCapture {
    pub fn unwrap(&mut self) -> Vec<Diagnostic> {
        let captured = RefCell::new(Vec::new());
        self.diagnostics.swap(&captured);
        captured.into_inner()
    }
}

pub struct TestReporter {
    diagnostics: Rc<RefCell<Vec<Diagnostic>>>,
}

impl TestReporter {
    pub fn new() -> (Rc<dyn Reporter>, DiagnosticCapture) {
        let diagnostics = Rc::new(RefCell::new(Vec::new()));
        (
            Rc::new(TestReporter {
                diagnostics: Rc::clone(&diagnostics),
            }),
            DiagnosticCapture { diagnostics },
        )
    }
}

impl Reporter for TestReporter {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}

pub fn assert_slices_equal<T, U>(
    kind: &str,
    got: &[T],
    expected: &[T],
    test: U,
    list: &str,
) -> TestResult
where
    T: std::fmt::Display,
    U: Fn(&T, &T) -> bool,
{
    if got.len() != expected.len() {
        let one_line = format!("Expected {} {}, got {}", expected.len(), kind, got.len());
        println!("{}\n{}", &one_line, list);
        return Err(one_line);
    }

    for (lhs, rhs) in got.iter().zip(expected) {
        if !test(lhs, rhs) {
            println!("Expected:\n  {}\nGot:\n  {}", rhs, lhs);
            return Err(String::from("Unexpected item"));
        }
    }

    Ok(())
}
