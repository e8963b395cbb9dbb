use crate::lexing::Token;
use colored::*;
use std::fmt;
use std::rc::Rc;

pub type DiagnosticResult<T> = Result<T, Diagnostic>;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Severity {
    Lexical,
    Syntax,
}

impl Severity {
    fn name(&self) -> &'static str {
        match self {
            Severity::Lexical => "Lexical Error",
            Severity::Syntax => "Syntax Error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn lexical(line: usize, column: usize, message: &str) -> Self {
        Diagnostic {
            severity: Severity::Lexical,
            line,
            column,
            message: String::from(message),
        }
    }

    pub fn syntax(token: &Token, message: &str) -> Self {
        Diagnostic {
            severity: Severity::Syntax,
            line: token.line,
            column: token.column,
            message: String::from(message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} at line {} column {}: {}",
            self.severity.name(),
            self.line,
            self.column,
            self.message
        )
    }
}

pub trait Reporter {
    fn report(&self, diagnostic: Diagnostic);
}

pub struct DefaultReporter {}

impl DefaultReporter {
    pub fn new() -> Rc<Self> {
        Rc::new(DefaultReporter {})
    }
}

impl Reporter for DefaultReporter {
    fn report(&self, diagnostic: Diagnostic) {
        let header = match diagnostic.severity {
            Severity::Lexical => diagnostic.severity.name().yellow().bold(),
            Severity::Syntax => diagnostic.severity.name().red().bold(),
        };
        println!(
            "{} at line {} column {}: {}",
            header, diagnostic.line, diagnostic.column, diagnostic.message
        );
    }
}

pub trait DiagnosticString {
    fn diagnostic_string(&self) -> String;
}

impl DiagnosticString for [Diagnostic] {
    fn diagnostic_string(&self) -> String {
        let strings: Vec<String> = self.iter().map(|d| d.to_string()).collect();
        String::from("[") + &strings.join(", ") + "]"
    }
}
