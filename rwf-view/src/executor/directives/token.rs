use crate::Value;

/// A directive token, e.g. `begin_block` or `"content"`.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    // e.g. `<html><body></body></html>`
    Text(String),
    // e.g. `<%= title %>` or `<%= user.name %>`
    Variable(String),
    // e.g. `<% inherits "layout" %>`
    String(String),
    // e.g. `<%= 5 %>`
    Value(Value),
    Inherits,
    BeginBlock,
    EndBlock,
    Block,
    Set,
    Assign,
    // `<%`
    BlockStart,
    // `<%=`
    BlockStartPrint,
    // `<%-`
    BlockStartPrintRaw,
    // `%>`
    BlockEnd,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Text(_) => write!(f, "text"),
            Token::Variable(name) => write!(f, "{}", name),
            Token::String(s) => write!(f, "\"{}\"", s),
            Token::Value(value) => write!(f, "{}", value),
            Token::Inherits => write!(f, "inherits"),
            Token::BeginBlock => write!(f, "begin_block"),
            Token::EndBlock => write!(f, "end_block"),
            Token::Block => write!(f, "block"),
            Token::Set => write!(f, "set"),
            Token::Assign => write!(f, "="),
            Token::BlockStart => write!(f, "<%"),
            Token::BlockStartPrint => write!(f, "<%="),
            Token::BlockStartPrintRaw => write!(f, "<%-"),
            Token::BlockEnd => write!(f, "%>"),
        }
    }
}

/// Token with its position in the template source.
#[derive(Debug, PartialEq, Clone)]
pub struct TokenWithContext {
    token: Token,
    line: usize,
    column: usize,
}

impl TokenWithContext {
    pub fn new(token: Token, line: usize, column: usize) -> Self {
        Self {
            token,
            line,
            column,
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn into_token(self) -> Token {
        self.token
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}
