//! Turns lambda source text into tokens.

use super::LambdaError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Int(i64),
    Float(f64),
    Str(String),
    Identifier(String),
    True,
    False,
    Nil,
    And,
    Or,
    Not,
    Pipe,
    EmptyParameters,
    Comma,
    LeftParenthesis,
    RightParenthesis,
    LeftBracket,
    RightBracket,
    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash,
    Percent,
    Caret,
    DoubleDot,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    End,
}

impl Token {
    /// How the token is written, for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::Float(value) => format!("{value:?}"),
            Self::Str(value) => format!("{value:?}"),
            Self::Identifier(name) => name.clone(),
            Self::True => "true".into(),
            Self::False => "false".into(),
            Self::Nil => "nil".into(),
            Self::And => "and".into(),
            Self::Or => "or".into(),
            Self::Not => "not".into(),
            Self::Pipe => "|".into(),
            Self::EmptyParameters => "||".into(),
            Self::Comma => ",".into(),
            Self::LeftParenthesis => "(".into(),
            Self::RightParenthesis => ")".into(),
            Self::LeftBracket => "[".into(),
            Self::RightBracket => "]".into(),
            Self::Plus => "+".into(),
            Self::Minus => "-".into(),
            Self::Star => "*".into(),
            Self::Slash => "/".into(),
            Self::DoubleSlash => "//".into(),
            Self::Percent => "%".into(),
            Self::Caret => "^".into(),
            Self::DoubleDot => "..".into(),
            Self::Equal => "==".into(),
            Self::NotEqual => "!=".into(),
            Self::Less => "<".into(),
            Self::LessEqual => "<=".into(),
            Self::Greater => ">".into(),
            Self::GreaterEqual => ">=".into(),
            Self::End => "end of input".into(),
        }
    }
}

/// A token and the byte offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub(crate) token: Token,
    pub(crate) offset: usize,
}

/// Tokenizes the whole input. The last token is always [`Token::End`].
pub(crate) fn tokenize(input: &str) -> Result<Vec<Spanned>, LambdaError> {
    let mut tokenizer = Tokenizer { input, offset: 0 };
    let mut tokens = Vec::new();
    loop {
        tokenizer.consume_while(char::is_whitespace);
        let offset = tokenizer.offset;
        let token = tokenizer.consume_token()?;
        let end = token == Token::End;
        tokens.push(Spanned { token, offset });
        if end {
            return Ok(tokens);
        }
    }
}

struct Tokenizer<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> Tokenizer<'a> {
    fn remaining(&self) -> &'a str {
        &self.input[self.offset..]
    }

    fn peek_character_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    fn peek_character(&self) -> Option<char> {
        self.peek_character_nth(0)
    }

    fn consume_character(&mut self) -> Option<char> {
        let next = self.peek_character()?;
        self.offset += next.len_utf8();
        Some(next)
    }

    fn try_consume_character(&mut self, pattern: char) -> bool {
        let starts_with = self.peek_character() == Some(pattern);
        if starts_with {
            self.offset += pattern.len_utf8();
        }
        starts_with
    }

    fn consume_while(&mut self, predicate: fn(char) -> bool) -> usize {
        let length: usize = self
            .remaining()
            .chars()
            .take_while(|&c| predicate(c))
            .map(char::len_utf8)
            .sum();
        self.offset += length;
        length
    }

    fn consumed_since(&self, past_offset: usize) -> &'a str {
        &self.input[past_offset..self.offset]
    }

    fn consume_token(&mut self) -> Result<Token, LambdaError> {
        let start = self.offset;
        let Some(character) = self.consume_character() else {
            return Ok(Token::End);
        };

        let token = match character {
            '|' if self.try_consume_character('|') => Token::EmptyParameters,
            '|' => Token::Pipe,
            '&' if self.try_consume_character('&') => Token::And,
            ',' => Token::Comma,
            '(' => Token::LeftParenthesis,
            ')' => Token::RightParenthesis,
            '[' => Token::LeftBracket,
            ']' => Token::RightBracket,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' if self.try_consume_character('/') => Token::DoubleSlash,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '^' => Token::Caret,
            '.' if self.try_consume_character('.') => Token::DoubleDot,
            '=' if self.try_consume_character('=') => Token::Equal,
            '!' | '~' if self.try_consume_character('=') => Token::NotEqual,
            '!' => Token::Not,
            '<' if self.try_consume_character('=') => Token::LessEqual,
            '<' => Token::Less,
            '>' if self.try_consume_character('=') => Token::GreaterEqual,
            '>' => Token::Greater,
            '"' | '\'' => self.consume_string(start, character)?,
            c if c.is_ascii_digit() => self.consume_number(start)?,
            c if c.is_alphabetic() || c == '_' => self.consume_word(start),
            '=' => return Err(LambdaError::syntax(start, "expected `==`")),
            other => {
                return Err(LambdaError::syntax(start, format!("unexpected character `{other}`")));
            }
        };
        Ok(token)
    }

    fn consume_word(&mut self, start: usize) -> Token {
        self.consume_while(|c| c.is_alphanumeric() || c == '_');
        match self.consumed_since(start) {
            "true" => Token::True,
            "false" => Token::False,
            "nil" => Token::Nil,
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            name => Token::Identifier(name.to_owned()),
        }
    }

    fn consume_number(&mut self, start: usize) -> Result<Token, LambdaError> {
        self.consume_while(|c| c.is_ascii_digit());

        let mut is_float = false;
        // A `.` followed by a digit is a fraction; `..` is the concatenation operator.
        if self.peek_character() == Some('.')
            && self.peek_character_nth(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.consume_character();
            self.consume_while(|c| c.is_ascii_digit());
            is_float = true;
        }
        if matches!(self.peek_character(), Some('e' | 'E')) {
            self.consume_character();
            let _ = self.try_consume_character('+') || self.try_consume_character('-');
            if self.consume_while(|c| c.is_ascii_digit()) == 0 {
                return Err(LambdaError::syntax(start, "float literal has no exponent digits"));
            }
            is_float = true;
        }

        let text = self.consumed_since(start);
        if is_float {
            text.parse()
                .map(Token::Float)
                .map_err(|_| LambdaError::syntax(start, format!("invalid float literal `{text}`")))
        } else {
            text.parse()
                .map(Token::Int)
                .map_err(|_| LambdaError::syntax(start, format!("integer literal `{text}` is too large")))
        }
    }

    fn consume_string(&mut self, start: usize, quote: char) -> Result<Token, LambdaError> {
        let mut content = String::new();
        loop {
            let Some(character) = self.consume_character() else {
                return Err(LambdaError::syntax(start, "unterminated string literal"));
            };
            match character {
                c if c == quote => return Ok(Token::Str(content)),
                '\\' => {
                    let escape_offset = self.offset - 1;
                    let escaped = match self.consume_character() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some(c @ ('\\' | '"' | '\'')) => c,
                        Some(other) => {
                            return Err(LambdaError::syntax(
                                escape_offset,
                                format!("unknown escape `\\{other}`"),
                            ));
                        }
                        None => return Err(LambdaError::syntax(start, "unterminated string literal")),
                    };
                    content.push(escaped);
                }
                c => content.push(c),
            }
        }
    }
}
