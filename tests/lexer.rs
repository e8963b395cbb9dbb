use pytme::diagnostic::*;
use pytme::lexing::*;

mod common;
use common::*;

#[test]
fn math() -> TestResult {
    assert_success(
        "4 + 5",
        &[
            test_token::integer("4"),
            test_token::test(TokenKind::Add, "+"),
            test_token::integer("5"),
        ],
    )
}

#[test]
fn numbers() -> TestResult {
    assert_success("42", &[test_token::integer("42")])?;
    assert_success("42.5", &[test_token::float("42.5")])?;
    assert_success(".5", &[test_token::float(".5")])
}

#[test]
fn keywords() -> TestResult {
    assert_success(
        "point hero score true",
        &[
            test_token::keyword("point"),
            test_token::keyword("hero"),
            test_token::identifier("score"),
            test_token::boolean("true"),
        ],
    )
}

#[test]
fn compound_assignment_does_not_split() -> TestResult {
    assert_success(
        "a += 1;",
        &[
            test_token::identifier("a"),
            test_token::test(TokenKind::AssignAdd, "+="),
            test_token::integer("1"),
            test_token::semicolon(),
        ],
    )
}

#[test]
fn exponent_and_floor_division() -> TestResult {
    assert_success(
        "2 ** 10 /_ 3",
        &[
            test_token::integer("2"),
            test_token::test(TokenKind::Exponent, "**"),
            test_token::integer("10"),
            test_token::test(TokenKind::DivFloor, "/_"),
            test_token::integer("3"),
        ],
    )
}

#[test]
fn comparisons() -> TestResult {
    assert_success(
        "a >= b != c",
        &[
            test_token::identifier("a"),
            test_token::test(TokenKind::GreaterEqual, ">="),
            test_token::identifier("b"),
            test_token::test(TokenKind::NotEqual, "!="),
            test_token::identifier("c"),
        ],
    )
}

#[test]
fn logical_operators() -> TestResult {
    assert_success(
        "a && b || !c",
        &[
            test_token::identifier("a"),
            test_token::test(TokenKind::And, "&&"),
            test_token::identifier("b"),
            test_token::test(TokenKind::Or, "||"),
            test_token::test(TokenKind::Not, "!"),
            test_token::identifier("c"),
        ],
    )
}

#[test]
fn lone_ampersand_is_invalid() -> TestResult {
    let (tokens, diagnostics) = test_lex("a & b");
    let expected = [
        test_token::identifier("a"),
        test_token::invalid("&"),
        test_token::identifier("b"),
    ];
    assert_tokens_equal(&tokens, &expected)?;
    assert_slices_equal(
        "diagnostics",
        &diagnostics,
        &[Diagnostic::lexical(1, 3, "unrecognized operator '&'")],
        |lhs, rhs| lhs == rhs,
        &diagnostics.diagnostic_string(),
    )
}

#[test]
fn line_comment() -> TestResult {
    assert_success(
        "4 // rest if\n",
        &[
            test_token::integer("4"),
            test_token::comment("// rest if"),
            test_token::newline(),
        ],
    )
}

#[test]
fn block_comment_spans_lines() -> TestResult {
    let (tokens, diagnostics) = test_lex("/* start\nmiddle\nend */\n");
    if !diagnostics.is_empty() {
        return Err(format!(
            "Expected no diagnostics, got: {}",
            diagnostics.diagnostic_string()
        ));
    }

    let comment = &tokens[0];
    if comment.kind != TokenKind::Comment || comment.text != "/* start\nmiddle\nend */" {
        return Err(format!("Unexpected comment token: {}", comment));
    }
    // The close is recorded where the terminating */ was detected.
    if (comment.line, comment.column) != (3, 6) {
        return Err(format!("Unexpected comment position: {}", comment));
    }

    assert_tokens_equal(
        &tokens,
        &[
            test_token::comment("/* start\nmiddle\nend */"),
            test_token::newline(),
        ],
    )
}

#[test]
fn string_literal_keeps_quotes() -> TestResult {
    assert_success("'hi'", &[test_token::string("'hi'")])?;
    assert_success("\"hi\"", &[test_token::string("\"hi\"")])
}

#[test]
fn lone_quote_is_not_a_closed_string() -> TestResult {
    let (tokens, diagnostics) = test_lex("'");
    assert_tokens_equal(&tokens, &[test_token::invalid("'")])?;
    assert_slices_equal(
        "diagnostics",
        &diagnostics,
        &[Diagnostic::lexical(1, 0, "unterminated string literal")],
        |lhs, rhs| lhs == rhs,
        &diagnostics.diagnostic_string(),
    )
}

#[test]
fn illegal_characters() -> TestResult {
    let (tokens, diagnostics) = test_lex("4$3");
    let expected = [test_token::integer("4"), test_token::invalid("$3")];
    assert_tokens_equal(&tokens, &expected)?;
    assert_slices_equal(
        "diagnostics",
        &diagnostics,
        &[Diagnostic::lexical(1, 2, "unrecognized lexeme '$3'")],
        |lhs, rhs| lhs == rhs,
        &diagnostics.diagnostic_string(),
    )
}

#[test]
fn columns_record_the_closing_character() -> TestResult {
    let (tokens, _) = test_lex("x = 5;\n");
    let positions: Vec<(&str, usize, usize)> = tokens
        .iter()
        .take(tokens.len() - 1)
        .map(|t| (t.lexeme(), t.line, t.column))
        .collect();
    let expected = [
        ("x", 1, 1),
        ("=", 1, 3),
        ("5", 1, 5),
        (";", 1, 6),
        ("\n", 1, 6),
    ];
    if positions != expected {
        return Err(format!("Unexpected positions: {:?}", positions));
    }
    Ok(())
}

#[test]
fn terminal_eof_record() -> TestResult {
    let (tokens, _) = test_lex("x;\n");
    let eof = tokens.last().unwrap();
    if eof.kind != TokenKind::EOF || !eof.text.is_empty() || eof.line != 0 || eof.column != 0 {
        return Err(format!("Unexpected end-of-stream record: {}", eof));
    }
    Ok(())
}

#[test]
fn symbol_table_report() -> TestResult {
    let (tokens, _) = test_lex("x;\n");
    let report = pytme::reporting::symbol_table(&tokens);
    if !report.starts_with("TOKEN")
        || !report.contains("'Identifier'")
        || !report.contains("'Semicolon'")
        || !report.contains("'EOF'")
    {
        return Err(format!("Unexpected report:\n{}", report));
    }
    Ok(())
}

#[test]
fn relexing_reconstructed_source() -> TestResult {
    let (tokens, _) = test_lex("point x = 5;\nx += 2;\n");
    let rebuilt = tokens
        .iter()
        .take(tokens.len() - 1)
        .map(|t| t.lexeme())
        .collect::<Vec<_>>()
        .join(" ");
    let (relexed, _) = test_lex(&rebuilt);

    assert_slices_equal(
        "tokens",
        &relexed,
        &tokens,
        |lhs, rhs| lhs.kind == rhs.kind && lhs.lexeme() == rhs.lexeme(),
        &relexed.token_string(),
    )
}

// Helpers

fn assert_success(text: &str, expected: &[Token]) -> TestResult {
    let (tokens, diagnostics) = test_lex(text);

    if !diagnostics.is_empty() {
        return Err(format!(
            "Expected no diagnostics, got: {}",
            diagnostics.diagnostic_string()
        ));
    }

    assert_tokens_equal(&tokens, expected)
}

fn assert_tokens_equal(tokens: &[Token], expected: &[Token]) -> TestResult {
    let (eof, rest) = tokens
        .split_last()
        .ok_or_else(|| String::from("No tokens produced"))?;
    if eof.kind != TokenKind::EOF {
        return Err(format!("Expected terminal EOF record, got: {}", eof));
    }

    assert_slices_equal(
        "tokens",
        rest,
        expected,
        |lhs, rhs| lhs.kind == rhs.kind && lhs.lexeme() == rhs.lexeme(),
        &rest.token_string(),
    )
}

fn test_lex(text: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let source = pytme::source::text(text);
    let (reporter, mut diagnostics) = TestReporter::new();

    let lexer = Lexer::new(source, reporter);
    let program = lexer.lex();

    (program.tokens, diagnostics.unwrap())
}
