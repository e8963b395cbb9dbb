use crate::lexing::Token;
use std::fs;
use std::io;

/// Renders the symbol-table report: a fixed two-line header followed by one
/// quoted row per lexeme, in source order.
pub fn symbol_table(tokens: &[Token]) -> String {
    let mut output = String::from("TOKEN                LINE#  COL#  \tLEXEME\n");
    output.push_str("=========================================================\n");
    for token in tokens {
        output.push_str(&format!(
            "{:<20} {:<6} {:<6}\t{:?}\n",
            format!("'{:?}'", token.kind),
            format!("'{}'", token.line),
            format!("'{}'", token.column),
            token.text
        ));
    }
    output
}

pub fn write_symbol_table(path: &str, tokens: &[Token]) -> io::Result<()> {
    fs::write(path, symbol_table(tokens))
}
