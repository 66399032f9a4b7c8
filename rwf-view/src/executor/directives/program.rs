//! Parsed directive template.
//!
//! A program is a list of statements.
use super::{Lexer, Statement, TokenWithContext};
use crate::{Error, Scope};

/// Executable program.
#[derive(Debug, Clone)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    /// Execute the program, writing its output to the scope.
    pub fn execute(&self, scope: &mut Scope<'_>) -> Result<(), Error> {
        for statement in &self.statements {
            statement.execute(scope)?;
        }

        Ok(())
    }

    /// Parse the program from a list of tokens.
    pub fn parse(tokens: Vec<TokenWithContext>) -> Result<Self, Error> {
        let mut iter = tokens.into_iter().peekable();
        let mut statements = vec![];

        while let Some(token) = iter.next() {
            let statement = Statement::parse(token, &mut iter)?;
            statements.push(statement);
        }

        Ok(Program { statements })
    }

    /// Compile the program from source.
    pub fn from_str(source: &str) -> Result<Self, Error> {
        let tokens = Lexer::new(source).tokens()?;
        Program::parse(tokens)
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}
