use crate::diagnostic::*;
use crate::lexing::*;
use log::trace;

type Result<T> = DiagnosticResult<T>;

const COMPARISON_OPS: [TokenKind; 6] = [
    TokenKind::Less,
    TokenKind::Greater,
    TokenKind::Equal,
    TokenKind::NotEqual,
    TokenKind::GreaterEqual,
    TokenKind::LessEqual,
];

const ASSIGNMENT_OPS: [TokenKind; 5] = [
    TokenKind::AssignAdd,
    TokenKind::AssignDiv,
    TokenKind::AssignMod,
    TokenKind::AssignMult,
    TokenKind::AssignSub,
];

const DATA_TYPES: [&str; 6] = ["point", "party", "truth", "avatar", "figure", "abyss"];

// The parameter list of a function definition accepts a narrower set of
// types than a declaration does.
const PARAMETER_TYPES: [&str; 5] = ["point", "party", "truth", "avatar", "figure"];

const MODIFIERS: [&str; 3] = ["plaza", "incantation", "absolute"];

/// Validates a token sequence against the grammar in one forward pass. No
/// tree is built; the first violation is returned as a diagnostic and
/// nothing further is examined.
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
}

impl Parser {
    pub fn new(program: LexedProgram) -> Self {
        Parser {
            tokens: program.tokens,
            index: 0,
        }
    }

    pub fn parse(mut self) -> Result<()> {
        while !self.is_at_end() {
            self.statement()?;
            self.matches(TokenKind::Newline);
        }
        Ok(())
    }

    // Statements

    fn statement(&mut self) -> Result<()> {
        trace!(target: "parser", "statement at {}", self.current());

        let lexeme = self.current().lexeme();
        if lexeme == "display" || lexeme == "dispatch" || self.peek() == TokenKind::Identifier {
            return self.simple_statement();
        }

        if lexeme == "if" || lexeme == "for" || lexeme == "while" || lexeme == "do" {
            self.compound_statement()
        } else if DATA_TYPES.contains(&lexeme) {
            self.matches(TokenKind::Keyword);
            self.typed_statement()
        } else if MODIFIERS.contains(&lexeme) {
            self.matches(TokenKind::Keyword);
            if DATA_TYPES.contains(&self.current().lexeme()) {
                self.matches(TokenKind::Keyword);
                self.typed_statement()
            } else {
                Err(self.error("Invalid statement"))
            }
        } else {
            Err(self.error("Statements should start with a keyword or an identifier"))
        }
    }

    /// A type keyword has just been consumed; what follows is either a
    /// declaration or a function definition.
    fn typed_statement(&mut self) -> Result<()> {
        self.consume(
            TokenKind::Identifier,
            "Expected identifier after the data type or return type",
        )?;
        if self.peek() == TokenKind::Assign || self.peek() == TokenKind::Comma {
            self.simple_statement()
        } else if self.peek() == TokenKind::ParenLeft {
            self.function_statement()
        } else {
            Err(self.error("Invalid statement"))
        }
    }

    fn simple_statement(&mut self) -> Result<()> {
        if self.peek() == TokenKind::Assign || self.peek() == TokenKind::Comma {
            self.declaration_statement()?;
        } else if self.current().lexeme() == "display" {
            self.output_statement()?;
        } else if self.current().lexeme() == "dispatch" {
            self.matches(TokenKind::Keyword);
            self.expression()?;
        } else {
            self.matches(TokenKind::Identifier);
            if self.peek() == TokenKind::ParenLeft {
                self.call_statement()?;
            } else {
                self.assignment_statement()?;
            }
        }

        self.consume(TokenKind::Semicolon, "Expected semicolon after the statement")?;
        self.matches(TokenKind::Newline);
        Ok(())
    }

    fn declaration_statement(&mut self) -> Result<()> {
        if self.matches(TokenKind::Assign) {
            if self.current().lexeme() == "input" {
                return self.input_statement();
            }
            self.expression()?;
        }

        while self.matches(TokenKind::Comma) {
            self.consume(TokenKind::Identifier, "Expected identifier after the comma")?;
            if self.matches(TokenKind::Assign) {
                self.expression()?;
            }
        }
        Ok(())
    }

    fn output_statement(&mut self) -> Result<()> {
        self.matches(TokenKind::Keyword);
        self.consume(
            TokenKind::ParenLeft,
            "Expected '(' after the 'display' keyword",
        )?;

        // The expression inside display is optional.
        if self.peek() != TokenKind::ParenRight {
            self.expression()?;
        }

        self.consume(TokenKind::ParenRight, "Expected ')' after the expression")
    }

    fn input_statement(&mut self) -> Result<()> {
        if self.current().lexeme() != "input" {
            return Err(self.error("Expected 'input' keyword after the identifier"));
        }
        self.advance();

        self.consume(
            TokenKind::ParenLeft,
            "Expected '(' after the 'input' keyword",
        )?;
        self.consume(TokenKind::ParenRight, "Expected ')' after the 'input' call")
    }

    fn assignment_statement(&mut self) -> Result<()> {
        if self.peek() != TokenKind::Assign && !ASSIGNMENT_OPS.contains(&self.peek()) {
            return Err(self.error("Available assignment operators are (=, +=, -=, *=, /=, %=)"));
        }

        if self.matches(TokenKind::Assign) {
            if self.current().lexeme() == "input" {
                return self.input_statement();
            }
        } else {
            self.advance();
        }

        self.expression()
    }

    fn call_statement(&mut self) -> Result<()> {
        self.matches(TokenKind::ParenLeft);

        // Optional arguments.
        while !self.is_at_end() && self.peek() != TokenKind::ParenRight {
            self.expression()?;
            if !self.matches(TokenKind::Comma) {
                break;
            }
        }

        self.consume(
            TokenKind::ParenRight,
            "Expected ')' after the function name",
        )
    }

    fn compound_statement(&mut self) -> Result<()> {
        match self.current().lexeme() {
            "if" => self.if_statement(),
            "for" => self.for_statement(),
            "while" => self.while_statement(),
            _ => self.do_while_statement(),
        }
    }

    fn if_statement(&mut self) -> Result<()> {
        self.matches(TokenKind::Keyword);
        self.consume(TokenKind::ParenLeft, "Expected '(' after the 'if' keyword")?;
        self.expression()?;
        self.consume(TokenKind::ParenRight, "Expected ')' after the expression")?;
        self.matches(TokenKind::Newline);

        self.consume(
            TokenKind::CurlyLeft,
            "Expected opening curly brace '{' after the expression",
        )?;
        self.block()?;
        self.matches(TokenKind::Newline);

        // Zero or more elseif branches.
        while self.current().lexeme() == "elseif" {
            self.matches(TokenKind::Keyword);
            self.consume(
                TokenKind::ParenLeft,
                "Expected '(' after the 'elseif' keyword",
            )?;
            self.expression()?;
            self.consume(TokenKind::ParenRight, "Expected ')' after the expression")?;
            self.matches(TokenKind::Newline);

            self.consume(
                TokenKind::CurlyLeft,
                "Expected opening curly brace '{' after the expression",
            )?;
            self.block()?;
            self.matches(TokenKind::Newline);
        }

        // Optional else branch.
        if self.current().lexeme() == "else" {
            self.matches(TokenKind::Keyword);
            self.consume(
                TokenKind::CurlyLeft,
                "Expected opening curly brace '{' after the 'else' keyword",
            )?;
            self.block()?;
            self.matches(TokenKind::Newline);
        }

        Ok(())
    }

    fn for_statement(&mut self) -> Result<()> {
        self.matches(TokenKind::Keyword);
        self.consume(TokenKind::ParenLeft, "Expected '(' after the 'for' keyword")?;

        if self.current().lexeme() != "point" {
            return Err(
                self.error("Expected data type for initialization of the variable in the for loop")
            );
        }
        self.matches(TokenKind::Keyword);

        let identifier = String::from(self.current().lexeme());
        self.consume(
            TokenKind::Identifier,
            "Expected identifier after the data type",
        )?;
        self.consume(TokenKind::Assign, "Expected '=' after the identifier")?;
        if !self.matches(TokenKind::Integer) {
            return Err(self.error(&format!(
                "Expected integer value for variable {}",
                identifier
            )));
        }
        self.consume(
            TokenKind::Semicolon,
            "Expected semicolon after the initialization",
        )?;

        self.expression()?;
        self.consume(TokenKind::Semicolon, "Expected semicolon after the condition")?;

        // The increment clause is the loop variable followed by one bare '+'.
        if !self.matches(TokenKind::Identifier) {
            return Err(self.error(&format!("Expected the variable {} for increment", identifier)));
        }
        if !self.matches(TokenKind::Add) {
            return Err(self.error(&format!(
                "Expected '++' unary for increment after the variable {}",
                identifier
            )));
        }

        self.consume(
            TokenKind::ParenRight,
            "Expected closing ')' of the loop condition",
        )?;
        self.matches(TokenKind::Newline);

        self.consume(
            TokenKind::CurlyLeft,
            "Expected opening curly brace '{' after the loop condition",
        )?;
        self.block()
    }

    fn while_statement(&mut self) -> Result<()> {
        self.matches(TokenKind::Keyword);
        self.consume(
            TokenKind::ParenLeft,
            "Expected '(' after the 'while' keyword",
        )?;
        self.expression()?;
        self.consume(TokenKind::ParenRight, "Expected ')' after the expression")?;
        self.matches(TokenKind::Newline);

        self.consume(
            TokenKind::CurlyLeft,
            "Expected opening curly brace '{' after the loop condition",
        )?;
        self.block()
    }

    fn do_while_statement(&mut self) -> Result<()> {
        self.matches(TokenKind::Keyword);
        self.consume(
            TokenKind::CurlyLeft,
            "Expected opening curly brace '{' after the 'do' keyword",
        )?;
        self.block()?;

        if self.current().lexeme() != "while" || !self.matches(TokenKind::Keyword) {
            return Err(self.error("Expected 'while' keyword after the statement"));
        }
        self.consume(
            TokenKind::ParenLeft,
            "Expected '(' after the 'while' keyword",
        )?;
        self.expression()?;
        self.consume(TokenKind::ParenRight, "Expected ')' after the expression")?;
        self.consume(TokenKind::Semicolon, "Expected semicolon after the statement")
    }

    fn function_statement(&mut self) -> Result<()> {
        self.consume(TokenKind::ParenLeft, "Expected '(' after the function name")?;

        // Optional parameters, `type identifier` pairs separated by commas.
        while !self.is_at_end() && self.peek() != TokenKind::ParenRight {
            if !PARAMETER_TYPES.contains(&self.current().lexeme()) {
                return Err(self.error("Expected data type for the function parameter"));
            }
            self.matches(TokenKind::Keyword);
            self.consume(
                TokenKind::Identifier,
                "Expected identifier after the data type",
            )?;
            if !self.matches(TokenKind::Comma) {
                break;
            }
        }

        self.consume(
            TokenKind::ParenRight,
            "Expected closing ')' after the function name",
        )?;

        self.consume(
            TokenKind::CurlyLeft,
            "Expected opening curly brace '{' after the function name",
        )?;
        self.block()?;
        self.matches(TokenKind::Newline);
        Ok(())
    }

    /// Statements up to the closing brace of the enclosing construct. Each
    /// statement may be preceded by one newline lexeme.
    fn block(&mut self) -> Result<()> {
        while !self.is_at_end() && self.peek() != TokenKind::CurlyRight {
            self.matches(TokenKind::Newline);
            self.statement()?;
        }
        self.consume(
            TokenKind::CurlyRight,
            "Expected closing curly brace '}' after the statement",
        )
    }

    // Expressions

    fn expression(&mut self) -> Result<()> {
        self.and_expression()?;
        while self.matches(TokenKind::Or) {
            self.and_expression()?;
        }
        Ok(())
    }

    /// Accepts at most one `&&` term, unlike the unbounded `||` chain above.
    fn and_expression(&mut self) -> Result<()> {
        self.not_expression()?;
        if self.matches(TokenKind::And) {
            self.not_expression()?;
        }
        Ok(())
    }

    fn not_expression(&mut self) -> Result<()> {
        self.matches(TokenKind::Not);
        self.comparison()
    }

    fn comparison(&mut self) -> Result<()> {
        self.add_subtract()?;
        while COMPARISON_OPS.contains(&self.peek()) {
            self.advance();
            self.add_subtract()?;
        }
        Ok(())
    }

    fn add_subtract(&mut self) -> Result<()> {
        self.multiply_div_mod()?;
        while self.peek() == TokenKind::Add || self.peek() == TokenKind::Subtract {
            self.advance();
            self.multiply_div_mod()?;
        }
        Ok(())
    }

    fn multiply_div_mod(&mut self) -> Result<()> {
        self.value()?;
        while self.peek() == TokenKind::Multiply
            || self.peek() == TokenKind::Divide
            || self.peek() == TokenKind::Modulo
        {
            self.advance();
            self.value()?;
        }
        Ok(())
    }

    fn value(&mut self) -> Result<()> {
        match self.peek() {
            TokenKind::Identifier
            | TokenKind::Integer
            | TokenKind::Float
            | TokenKind::String
            | TokenKind::Boolean => {
                self.advance();
                Ok(())
            }
            TokenKind::ParenLeft => {
                self.advance();
                self.expression()?;
                self.consume(
                    TokenKind::ParenRight,
                    "Expected closing parenthesis ')' after the expression",
                )
            }
            _ => Err(self.error(&format!("Invalid value '{}'", self.current().lexeme()))),
        }
    }

    // Cursor helpers

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn current(&self) -> &Token {
        &self.tokens[self.index]
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<()> {
        if self.matches(kind) {
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.peek() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) {
        // The cursor never moves past the end-of-stream record.
        if !self.is_at_end() {
            self.index += 1;
        }
    }

    fn error(&self, message: &str) -> Diagnostic {
        Diagnostic::syntax(self.current(), message)
    }

    fn is_at_end(&self) -> bool {
        self.peek() == TokenKind::EOF
    }
}
