pub mod diagnostic;
pub mod lexing;
pub mod parsing;
pub mod reporting;
pub mod source;

use diagnostic::*;
use lexing::*;
use log::debug;
use parsing::*;
pub use source::Source;
use std::rc::Rc;

/// Runs the whole front end over one source file: lexical analysis, the
/// symbol-table report, then syntax validation.
pub fn run(source: Source) -> Result<(), &'static str> {
    let reporter: Rc<dyn Reporter> = DefaultReporter::new();

    debug!(target: "pipeline", "lexing {}", source.name);
    let lexer = Lexer::new(source, Rc::clone(&reporter));
    let lexed = lexer.lex();
    println!("LEXICAL ANALYSIS COMPLETE");

    reporting::write_symbol_table("symboltable.txt", &lexed.tokens)
        .map_err(|_| "could not write symboltable.txt")?;
    println!("symboltable.txt is written.");

    debug!(target: "pipeline", "parsing {} tokens", lexed.tokens.len());
    let parser = Parser::new(lexed);
    match parser.parse() {
        Ok(()) => {
            println!("Parsing successful");
            Ok(())
        }
        Err(diagnostic) => {
            reporter.report(diagnostic);
            Err("parsing failed")
        }
    }
}
