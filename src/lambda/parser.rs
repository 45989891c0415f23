//! Parses lambda tokens into an expression tree.
//!
//! Grammar:
//!
//! ```text
//! lambda     = ( "|" [ identifier { "," identifier } ] "|" | "||" ) expression
//! expression = operand { binary-operator operand }      (precedence climbing)
//! operand    = ( "-" | "not" | "!" ) operand | postfix
//! postfix    = primary { "[" expression "]" }
//! primary    = literal | identifier | builtin "(" [ arguments ] ")"
//!            | "(" expression ")" | "[" [ arguments ] "]"
//! ```

use smallvec::SmallVec;

use super::LambdaError;
use super::lexer::{Spanned, Token};
use super::value::Value;

/// A compiled lambda body.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expression {
    Literal(Value),
    /// Index into the call's argument list.
    Parameter(usize),
    List(Vec<Expression>),
    Unary(UnaryOperator, Box<Expression>),
    Binary(BinaryOperator, Box<Expression>, Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Index(Box<Expression>, Box<Expression>),
    Call(Builtin, Vec<Expression>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnaryOperator {
    Negate,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    FloorDivide,
    Modulo,
    Power,
    Concatenate,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl BinaryOperator {
    pub(crate) const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::FloorDivide => "//",
            Self::Modulo => "%",
            Self::Power => "^",
            Self::Concatenate => "..",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        }
    }
}

/// The only functions a lambda may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    Len,
    Abs,
    Min,
    Max,
    Floor,
    Str,
}

impl Builtin {
    fn lookup(name: &str) -> Option<Self> {
        Some(match name {
            "len" => Self::Len,
            "abs" => Self::Abs,
            "min" => Self::Min,
            "max" => Self::Max,
            "floor" => Self::Floor,
            "str" => Self::Str,
            _ => return None,
        })
    }

    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::Len => "len",
            Self::Abs => "abs",
            Self::Min => "min",
            Self::Max => "max",
            Self::Floor => "floor",
            Self::Str => "str",
        }
    }

    fn check_arity(self, actual: usize) -> Result<(), LambdaError> {
        let (accepts, expected) = match self {
            Self::Min | Self::Max => (actual >= 1, "at least one argument"),
            _ => (actual == 1, "exactly one argument"),
        };
        if accepts {
            Ok(())
        } else {
            Err(LambdaError::Arity {
                function: self.name(),
                expected,
                actual,
            })
        }
    }
}

/// Operators that combine two operands, with their binding powers.
enum Infix {
    Binary(BinaryOperator),
    And,
    Or,
}

const UNARY_BINDING_POWER: u8 = 13;

/// Left and right binding powers. A higher right power than left makes the
/// operator left associative.
fn infix_binding_power(token: &Token) -> Option<(Infix, u8, u8)> {
    use BinaryOperator as Op;

    Some(match token {
        // `||` after an operand is logical or, not an empty parameter list.
        Token::Or | Token::EmptyParameters => (Infix::Or, 1, 2),
        Token::And => (Infix::And, 3, 4),
        Token::Equal => (Infix::Binary(Op::Equal), 5, 6),
        Token::NotEqual => (Infix::Binary(Op::NotEqual), 5, 6),
        Token::Less => (Infix::Binary(Op::Less), 5, 6),
        Token::LessEqual => (Infix::Binary(Op::LessEqual), 5, 6),
        Token::Greater => (Infix::Binary(Op::Greater), 5, 6),
        Token::GreaterEqual => (Infix::Binary(Op::GreaterEqual), 5, 6),
        Token::DoubleDot => (Infix::Binary(Op::Concatenate), 8, 7),
        Token::Plus => (Infix::Binary(Op::Add), 9, 10),
        Token::Minus => (Infix::Binary(Op::Subtract), 9, 10),
        Token::Star => (Infix::Binary(Op::Multiply), 11, 12),
        Token::Slash => (Infix::Binary(Op::Divide), 11, 12),
        Token::DoubleSlash => (Infix::Binary(Op::FloorDivide), 11, 12),
        Token::Percent => (Infix::Binary(Op::Modulo), 11, 12),
        Token::Caret => (Infix::Binary(Op::Power), 16, 15),
        _ => return None,
    })
}

/// How deeply a lambda body may nest, counting both the parser's recursion
/// and the height of the resulting tree. Evaluation recurses at most this far.
pub(crate) const MAXIMUM_DEPTH: usize = 256;

/// The parsed parameter names and body of a lambda.
pub(crate) struct Parsed {
    pub(crate) parameters: SmallVec<[String; 4]>,
    pub(crate) body: Expression,
}

pub(crate) fn parse(tokens: &[Spanned]) -> Result<Parsed, LambdaError> {
    let mut parser = Parser {
        tokens,
        position: 0,
        depth: 0,
        parameters: SmallVec::new(),
    };
    parser.parse_parameters()?;
    let body = parser.parse_expression(0)?.expression;
    parser.expect(&Token::End, "end of input after the lambda body")?;
    Ok(Parsed {
        parameters: parser.parameters,
        body,
    })
}

/// An expression and the height of its tree.
struct Node {
    expression: Expression,
    height: usize,
}

impl Node {
    const fn leaf(expression: Expression) -> Self {
        Self {
            expression,
            height: 1,
        }
    }
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    position: usize,
    /// Current nesting of `parse_expression` calls.
    depth: usize,
    parameters: SmallVec<[String; 4]>,
}

impl Parser<'_> {
    fn peek(&self) -> &Spanned {
        // `tokenize` always ends with `Token::End`, which is never consumed.
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> &Spanned {
        let current = self.position.min(self.tokens.len() - 1);
        if self.tokens[current].token != Token::End {
            self.position += 1;
        }
        &self.tokens[current]
    }

    fn unexpected(&self, expected: &str) -> LambdaError {
        let found = self.peek();
        LambdaError::syntax(
            found.offset,
            format!("expected {expected}, found {}", found.token.describe()),
        )
    }

    fn too_deep(&self) -> LambdaError {
        LambdaError::syntax(
            self.peek().offset,
            format!("expression nests deeper than {MAXIMUM_DEPTH} levels"),
        )
    }

    /// Wraps `expression` over children of the given heights.
    fn nest(&self, expression: Expression, children: &[usize]) -> Result<Node, LambdaError> {
        let height = 1 + children.iter().copied().max().unwrap_or(0);
        if height > MAXIMUM_DEPTH {
            return Err(self.too_deep());
        }
        Ok(Node { expression, height })
    }

    fn expect(&mut self, token: &Token, expected: &str) -> Result<(), LambdaError> {
        if &self.peek().token == token {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn parse_parameters(&mut self) -> Result<(), LambdaError> {
        match self.peek().token {
            Token::EmptyParameters => {
                self.advance();
                return Ok(());
            }
            Token::Pipe => {
                self.advance();
            }
            _ => return Err(self.unexpected("`|` to open the parameter list")),
        }
        if self.peek().token == Token::Pipe {
            self.advance();
            return Ok(());
        }
        loop {
            let Token::Identifier(name) = &self.peek().token else {
                return Err(self.unexpected("a parameter name"));
            };
            let name = name.clone();
            self.advance();
            if self.parameters.contains(&name) {
                return Err(LambdaError::DuplicateParameter { name });
            }
            self.parameters.push(name);

            match self.peek().token {
                Token::Comma => {
                    self.advance();
                }
                Token::Pipe => {
                    self.advance();
                    return Ok(());
                }
                _ => return Err(self.unexpected("`,` or `|`")),
            }
        }
    }

    fn parse_expression(&mut self, minimum_binding_power: u8) -> Result<Node, LambdaError> {
        if self.depth == MAXIMUM_DEPTH {
            return Err(self.too_deep());
        }
        self.depth += 1;
        let result = self.parse_infix(minimum_binding_power);
        self.depth -= 1;
        result
    }

    fn parse_infix(&mut self, minimum_binding_power: u8) -> Result<Node, LambdaError> {
        let mut left = self.parse_operand()?;

        while let Some((infix, left_power, right_power)) = infix_binding_power(&self.peek().token) {
            if left_power < minimum_binding_power {
                break;
            }
            self.advance();
            let right = self.parse_expression(right_power)?;
            let heights = [left.height, right.height];
            let (left_boxed, right_boxed) = (Box::new(left.expression), Box::new(right.expression));
            let expression = match infix {
                Infix::Binary(operator) => Expression::Binary(operator, left_boxed, right_boxed),
                Infix::And => Expression::And(left_boxed, right_boxed),
                Infix::Or => Expression::Or(left_boxed, right_boxed),
            };
            left = self.nest(expression, &heights)?;
        }

        Ok(left)
    }

    fn parse_operand(&mut self) -> Result<Node, LambdaError> {
        let operator = match self.peek().token {
            Token::Minus => UnaryOperator::Negate,
            Token::Not => UnaryOperator::Not,
            _ => return self.parse_postfix(),
        };
        self.advance();
        let operand = self.parse_expression(UNARY_BINDING_POWER)?;
        self.nest(
            Expression::Unary(operator, Box::new(operand.expression)),
            &[operand.height],
        )
    }

    fn parse_postfix(&mut self) -> Result<Node, LambdaError> {
        let mut node = self.parse_primary()?;
        while self.peek().token == Token::LeftBracket {
            self.advance();
            let index = self.parse_expression(0)?;
            self.expect(&Token::RightBracket, "`]`")?;
            let heights = [node.height, index.height];
            node = self.nest(
                Expression::Index(Box::new(node.expression), Box::new(index.expression)),
                &heights,
            )?;
        }
        Ok(node)
    }

    fn parse_primary(&mut self) -> Result<Node, LambdaError> {
        let Spanned { token, offset } = self.advance().clone();
        let node = match token {
            Token::Int(value) => Node::leaf(Expression::Literal(Value::Int(value))),
            Token::Float(value) => Node::leaf(Expression::Literal(Value::Float(value))),
            Token::Str(value) => Node::leaf(Expression::Literal(Value::from(value))),
            Token::True => Node::leaf(Expression::Literal(Value::Bool(true))),
            Token::False => Node::leaf(Expression::Literal(Value::Bool(false))),
            Token::Nil => Node::leaf(Expression::Literal(Value::Nil)),
            Token::LeftParenthesis => {
                let inner = self.parse_expression(0)?;
                self.expect(&Token::RightParenthesis, "`)`")?;
                inner
            }
            Token::LeftBracket => {
                let (elements, height) = self.parse_arguments(&Token::RightBracket, "`,` or `]`")?;
                self.nest(Expression::List(elements), &[height])?
            }
            Token::Identifier(name) => self.resolve(name, offset)?,
            other => {
                return Err(LambdaError::syntax(
                    offset,
                    format!("expected an expression, found {}", other.describe()),
                ));
            }
        };
        Ok(node)
    }

    fn resolve(&mut self, name: String, offset: usize) -> Result<Node, LambdaError> {
        if let Some(index) = self.parameters.iter().position(|parameter| *parameter == name) {
            return Ok(Node::leaf(Expression::Parameter(index)));
        }
        match Builtin::lookup(&name) {
            Some(builtin) if self.peek().token == Token::LeftParenthesis => {
                self.advance();
                let (arguments, height) =
                    self.parse_arguments(&Token::RightParenthesis, "`,` or `)`")?;
                builtin.check_arity(arguments.len())?;
                self.nest(Expression::Call(builtin, arguments), &[height])
            }
            _ => Err(LambdaError::UnknownName { name, offset }),
        }
    }

    /// Parses a comma-separated list up to and including `closing`. Returns
    /// the elements and the height of the tallest.
    fn parse_arguments(
        &mut self,
        closing: &Token,
        expected: &str,
    ) -> Result<(Vec<Expression>, usize), LambdaError> {
        let mut arguments = Vec::new();
        let mut height = 0;
        if &self.peek().token == closing {
            self.advance();
            return Ok((arguments, height));
        }
        loop {
            let argument = self.parse_expression(0)?;
            height = height.max(argument.height);
            arguments.push(argument.expression);
            if &self.peek().token == closing {
                self.advance();
                return Ok((arguments, height));
            }
            self.expect(&Token::Comma, expected)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::lexer::tokenize;
    use super::*;

    fn parse_source(source: &str) -> Result<Parsed, LambdaError> {
        parse(&tokenize(source)?)
    }

    #[test]
    fn test_parameters_resolve_to_indices() {
        let parsed = parse_source("|a, b| b").unwrap();
        assert_eq!(parsed.parameters.as_slice(), ["a".to_string(), "b".to_string()]);
        assert_eq!(parsed.body, Expression::Parameter(1));
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let parsed = parse_source("|| 1 + 2 * 3").unwrap();
        let expected = Expression::Binary(
            BinaryOperator::Add,
            Box::new(Expression::Literal(Value::Int(1))),
            Box::new(Expression::Binary(
                BinaryOperator::Multiply,
                Box::new(Expression::Literal(Value::Int(2))),
                Box::new(Expression::Literal(Value::Int(3))),
            )),
        );
        assert_eq!(parsed.body, expected);
    }

    #[test]
    fn test_power_binds_tighter_than_negation() {
        let parsed = parse_source("|| -2 ^ 2").unwrap();
        assert!(matches!(parsed.body, Expression::Unary(UnaryOperator::Negate, _)));
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let error = parse_source("|x| y").err().unwrap();
        assert_eq!(
            error,
            LambdaError::UnknownName {
                name: "y".into(),
                offset: 4
            }
        );
    }

    #[test]
    fn test_builtin_without_call_is_unknown() {
        assert!(matches!(parse_source("|x| len"), Err(LambdaError::UnknownName { .. })));
    }

    #[test]
    fn test_parameter_shadows_builtin() {
        let parsed = parse_source("|len| len").unwrap();
        assert_eq!(parsed.body, Expression::Parameter(0));
    }

    #[test]
    fn test_builtin_arity_is_checked() {
        assert!(matches!(
            parse_source("|x| abs(x, x)"),
            Err(LambdaError::Arity { function: "abs", actual: 2, .. })
        ));
        assert!(matches!(parse_source("|| min()"), Err(LambdaError::Arity { .. })));
    }

    #[test]
    fn test_duplicate_parameter() {
        assert!(matches!(
            parse_source("|x, x| x"),
            Err(LambdaError::DuplicateParameter { .. })
        ));
    }

    #[test]
    fn test_trailing_tokens_are_rejected() {
        assert!(matches!(parse_source("|x| x x"), Err(LambdaError::Syntax { offset: 6, .. })));
    }

    #[test]
    fn test_deep_unary_chain_is_rejected() {
        let source = format!("|x| {}x", "-".repeat(200_000));
        let error = parse_source(&source).err().unwrap();
        assert!(matches!(error, LambdaError::Syntax { ref message, .. } if message.contains("nests deeper")));
    }

    #[test]
    fn test_deep_parentheses_are_rejected() {
        let source = format!("|x| {}x{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(matches!(parse_source(&source), Err(LambdaError::Syntax { .. })));
    }

    #[test]
    fn test_long_left_associative_chain_is_rejected() {
        let source = format!("|x| x{}", " + 1".repeat(100_000));
        assert!(matches!(parse_source(&source), Err(LambdaError::Syntax { .. })));
    }

    #[test]
    fn test_nesting_within_the_limit_is_accepted() {
        let depth = MAXIMUM_DEPTH / 2;
        let source = format!("|x| {}x{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(parse_source(&source).unwrap().body, Expression::Parameter(0));
        let chain = format!("|x| x{}", " + 1".repeat(MAXIMUM_DEPTH - 1));
        assert!(parse_source(&chain).is_ok());
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(parse_source("x + 1"), Err(LambdaError::Syntax { offset: 0, .. })));
    }
}
