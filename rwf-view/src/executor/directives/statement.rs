//! Directive statements and the terms they operate on.
use super::{Token, TokenWithContext};
use crate::{Error, Scope, Value};

use std::iter::Peekable;

/// A single value: a constant or a variable, e.g. `"content"` or `user.name`.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Constant(Value),
    Variable(String),
}

impl Term {
    /// Parse a term inside the tag opened by `tag`.
    pub fn parse(
        iter: &mut Peekable<impl Iterator<Item = TokenWithContext>>,
        tag: &TokenWithContext,
    ) -> Result<Self, Error> {
        let token = next(iter, tag)?;

        match token.token() {
            Token::String(s) => Ok(Term::Constant(Value::String(s.clone()))),
            Token::Value(value) => Ok(Term::Constant(value.clone())),
            Token::Variable(name) => Ok(Term::Variable(name.clone())),
            _ => Err(unexpected(&token, "expected a value or a variable")),
        }
    }

    /// Evaluate the term. Dots access hash keys, e.g. `user.name`.
    pub fn evaluate(&self, scope: &Scope<'_>) -> Result<Value, Error> {
        match self {
            Term::Constant(value) => Ok(value.clone()),
            Term::Variable(name) => {
                let mut parts = name.split('.');
                let first = parts.next().unwrap_or_default();

                let mut value = scope
                    .get(first)
                    .cloned()
                    .ok_or_else(|| Error::UndefinedVariable(first.to_string()))?;

                for key in parts {
                    value = value.key(key);
                }

                Ok(value)
            }
        }
    }
}

/// What a print tag or `set` evaluates.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Term(Term),
    // `block "name"` or `block "name" "default"`
    Block { name: Term, default: Option<Term> },
}

impl Expression {
    pub fn parse(
        iter: &mut Peekable<impl Iterator<Item = TokenWithContext>>,
        tag: &TokenWithContext,
    ) -> Result<Self, Error> {
        if iter.next_if(|token| token.token() == &Token::Block).is_some() {
            let name = Term::parse(iter, tag)?;
            let closed = matches!(
                iter.peek().map(|token| token.token()),
                Some(Token::BlockEnd) | None
            );
            let default = if closed {
                None
            } else {
                Some(Term::parse(iter, tag)?)
            };

            Ok(Expression::Block { name, default })
        } else {
            Ok(Expression::Term(Term::parse(iter, tag)?))
        }
    }

    pub fn evaluate(&self, scope: &Scope<'_>) -> Result<Value, Error> {
        match self {
            Expression::Term(term) => term.evaluate(scope),
            Expression::Block { name, default } => {
                let name = name.evaluate(scope)?.to_string();

                match scope.block(&name) {
                    Some(block) => Ok(Value::String(block.to_string())),
                    None => match default {
                        Some(default) => default.evaluate(scope),
                        None => Ok(Value::Null),
                    },
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    // Template text outside of tags.
    Text(String),
    // `<%= expression %>` escapes, `<%- expression %>` doesn't.
    Print { expression: Expression, escape: bool },
    // `<% inherits "layout" %>`
    Inherits(Term),
    // `<% begin_block "content" %>`
    BeginBlock(Term),
    // `<% end_block %>`
    EndBlock,
    // `<% set title = "Home" %>`
    Set { name: String, expression: Expression },
}

impl Statement {
    /// Parse the statement starting with `token`.
    pub fn parse(
        token: TokenWithContext,
        iter: &mut Peekable<impl Iterator<Item = TokenWithContext>>,
    ) -> Result<Self, Error> {
        let statement = match token.token() {
            Token::Text(text) => return Ok(Statement::Text(text.clone())),

            Token::BlockStartPrint | Token::BlockStartPrintRaw => Statement::Print {
                expression: Expression::parse(iter, &token)?,
                escape: token.token() == &Token::BlockStartPrint,
            },

            Token::BlockStart => {
                let directive = next(iter, &token)?;

                match directive.token() {
                    Token::Inherits => Statement::Inherits(Term::parse(iter, &token)?),
                    Token::BeginBlock => Statement::BeginBlock(Term::parse(iter, &token)?),
                    Token::EndBlock => Statement::EndBlock,
                    Token::Set => {
                        let variable = next(iter, &token)?;
                        let name = match variable.token() {
                            Token::Variable(name) if !name.contains('.') => name.clone(),
                            _ => return Err(unexpected(&variable, "expected a variable name")),
                        };

                        let assign = next(iter, &token)?;
                        if assign.token() != &Token::Assign {
                            return Err(unexpected(&assign, "expected \"=\""));
                        }

                        Statement::Set {
                            name,
                            expression: Expression::parse(iter, &token)?,
                        }
                    }
                    _ => return Err(unexpected(&directive, "expected a directive")),
                }
            }

            _ => return Err(unexpected(&token, "expected text or a tag")),
        };

        let end = next(iter, &token)?;
        if end.token() != &Token::BlockEnd {
            return Err(unexpected(&end, "expected \"%>\""));
        }

        Ok(statement)
    }

    pub fn execute(&self, scope: &mut Scope<'_>) -> Result<(), Error> {
        match self {
            Statement::Text(text) => {
                scope.write(text);
            }

            Statement::Print { expression, escape } => {
                let value = expression.evaluate(scope)?;
                if *escape {
                    scope.print(&value);
                } else {
                    scope.write(&value.to_string());
                }
            }

            Statement::Inherits(template) => {
                let template = template.evaluate(scope)?.to_string();
                scope.inherits(&template);
            }

            Statement::BeginBlock(name) => {
                let name = name.evaluate(scope)?.to_string();
                scope.begin_block(&name);
            }

            Statement::EndBlock => {
                scope.end_block()?;
            }

            Statement::Set { name, expression } => {
                let value = expression.evaluate(scope)?;
                scope.set(name, value)?;
            }
        }

        Ok(())
    }
}

fn next(
    iter: &mut Peekable<impl Iterator<Item = TokenWithContext>>,
    tag: &TokenWithContext,
) -> Result<TokenWithContext, Error> {
    // The lexer closes every tag, so running out of tokens means a tag was cut short.
    iter.next().ok_or_else(|| {
        Error::syntax(
            tag.line(),
            tag.column(),
            format!("reached end of template inside \"{}\"", tag.token()),
        )
    })
}

fn unexpected(token: &TokenWithContext, message: &str) -> Error {
    Error::syntax(
        token.line(),
        token.column(),
        format!("{}, found \"{}\"", message, token.token()),
    )
}

#[cfg(test)]
mod test {
    use super::super::Lexer;
    use super::*;

    fn parse(source: &str) -> Result<Vec<Statement>, Error> {
        let mut iter = Lexer::new(source).tokens()?.into_iter().peekable();
        let mut statements = vec![];
        while let Some(token) = iter.next() {
            statements.push(Statement::parse(token, &mut iter)?);
        }
        Ok(statements)
    }

    #[test]
    fn test_parse() -> Result<(), Error> {
        let statements = parse(
            r#"<% inherits "layout" %><% set title = block "title" "Untitled" %><%- name %>"#,
        )?;

        assert_eq!(
            statements,
            vec![
                Statement::Inherits(Term::Constant(Value::String("layout".into()))),
                Statement::Set {
                    name: "title".into(),
                    expression: Expression::Block {
                        name: Term::Constant(Value::String("title".into())),
                        default: Some(Term::Constant(Value::String("Untitled".into()))),
                    },
                },
                Statement::Print {
                    expression: Expression::Term(Term::Variable("name".into())),
                    escape: false,
                },
            ]
        );

        Ok(())
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse("<% title %>"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("<% inherits %>"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("<% set user.name = 1 %>"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("<% set name 1 %>"), Err(Error::Syntax { .. })));
        assert!(matches!(parse("<% end_block \"x\" %>"), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_cut_short_tag_reports_tag_position() {
        let mut iter = vec![TokenWithContext::new(Token::Inherits, 3, 12)]
            .into_iter()
            .peekable();
        let tag = TokenWithContext::new(Token::BlockStart, 3, 2);

        assert!(matches!(
            Statement::parse(tag, &mut iter),
            Err(Error::Syntax { line: 3, column: 2, .. })
        ));
    }
}
