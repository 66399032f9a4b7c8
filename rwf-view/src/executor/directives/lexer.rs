//! Split template source into text and directive tokens.
use super::{Token, TokenWithContext};
use crate::{Error, Value};

use std::iter::Peekable;
use std::str::Chars;

pub struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
    tokens: Vec<TokenWithContext>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            iter: source.chars().peekable(),
            line: 1,
            column: 0,
            tokens: vec![],
        }
    }

    pub fn tokens(mut self) -> Result<Vec<TokenWithContext>, Error> {
        let mut text = String::new();

        while let Some(c) = self.next() {
            if c == '<' && self.iter.peek() == Some(&'%') {
                self.next();
                let start = match self.iter.peek() {
                    Some('=') => Token::BlockStartPrint,
                    Some('-') => Token::BlockStartPrintRaw,
                    _ => Token::BlockStart,
                };

                if start != Token::BlockStart {
                    self.next();
                }

                if !text.is_empty() {
                    self.push(Token::Text(std::mem::take(&mut text)));
                }

                self.push(start);
                self.tag()?;
            } else {
                text.push(c);
            }
        }

        if !text.is_empty() {
            self.push(Token::Text(text));
        }

        Ok(self.tokens)
    }

    fn next(&mut self) -> Option<char> {
        let c = self.iter.next()?;

        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }

        Some(c)
    }

    fn push(&mut self, token: Token) {
        self.tokens
            .push(TokenWithContext::new(token, self.line, self.column));
    }

    fn error(&self, message: impl ToString) -> Error {
        Error::syntax(self.line, self.column, message)
    }

    // Everything between `<%` and `%>`.
    fn tag(&mut self) -> Result<(), Error> {
        loop {
            let c = match self.next() {
                Some(c) => c,
                None => {
                    return Err(self.error(
                        "reached end of file inside a tag, did you forget a closing \"%>\"?",
                    ))
                }
            };

            match c {
                ' ' | '\t' | '\n' | '\r' => continue,

                '%' if self.iter.peek() == Some(&'>') => {
                    self.next();
                    self.push(Token::BlockEnd);
                    return Ok(());
                }

                '"' | '\'' => {
                    let string = self.string(c)?;
                    self.push(Token::String(string));
                }

                '=' => self.push(Token::Assign),

                c if c.is_ascii_digit()
                    || (c == '-' && self.iter.peek().is_some_and(|c| c.is_ascii_digit())) =>
                {
                    let value = self.number(c)?;
                    self.push(Token::Value(value));
                }

                c if c.is_alphabetic() || c == '_' => {
                    let token = self.word(c);
                    self.push(token);
                }

                c => return Err(self.error(format!("unexpected character '{}'", c))),
            }
        }
    }

    fn string(&mut self, quote: char) -> Result<String, Error> {
        let mut string = String::new();

        loop {
            match self.next() {
                Some('\\') => match self.next() {
                    Some('n') => string.push('\n'),
                    Some('t') => string.push('\t'),
                    Some(c) => string.push(c),
                    None => break,
                },
                Some(c) if c == quote => return Ok(string),
                Some(c) => string.push(c),
                None => break,
            }
        }

        Err(self.error("unterminated string"))
    }

    fn number(&mut self, first: char) -> Result<Value, Error> {
        let mut number = String::from(first);

        while let Some(c) = self.iter.peek() {
            if c.is_ascii_digit() || *c == '.' {
                number.push(*c);
                self.next();
            } else {
                break;
            }
        }

        if let Ok(integer) = number.parse::<i64>() {
            Ok(Value::Integer(integer))
        } else if let Ok(float) = number.parse::<f64>() {
            Ok(Value::Float(float))
        } else {
            Err(self.error(format!("\"{}\" is not a number", number)))
        }
    }

    fn word(&mut self, first: char) -> Token {
        let mut word = String::from(first);

        while let Some(c) = self.iter.peek() {
            if c.is_alphanumeric() || *c == '_' || *c == '.' {
                word.push(*c);
                self.next();
            } else {
                break;
            }
        }

        match word.as_str() {
            "inherits" => Token::Inherits,
            "begin_block" => Token::BeginBlock,
            "end_block" => Token::EndBlock,
            "block" => Token::Block,
            "set" => Token::Set,
            "true" => Token::Value(Value::Boolean(true)),
            "false" => Token::Value(Value::Boolean(false)),
            "null" | "nil" => Token::Value(Value::Null),
            _ => Token::Variable(word),
        }
    }
}
