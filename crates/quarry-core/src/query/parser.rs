//! Tokenizer and recursive-descent parser for path queries.

use crate::error::{QuarryError, QuarryResult};

/// One `/`- or `//`-separated location path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LocationPath {
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Step {
    /// Step was introduced by `//`.
    pub descendant: bool,
    pub test: NodeTest,
    pub predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NodeTest {
    Name(String),
    AnyElement,
    Attribute(String),
    AnyAttribute,
    Text,
    Node,
    SelfNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Predicate {
    Position(usize),
    Last,
    HasAttribute(String),
    AttributeEquals(String, String),
    HasChild(String),
    ChildEquals(String, String),
    Contains(Operand, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Operand {
    Context,
    Text,
    Attribute(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Slash,
    DoubleSlash,
    At,
    Star,
    Dot,
    Pipe,
    Eq,
    Comma,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Name(String),
    Number(usize),
    Literal(String),
    End,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Name(name) => format!("name '{}'", name),
            Token::Number(n) => format!("number {}", n),
            Token::Literal(s) => format!("literal '{}'", s),
            Token::End => "end of query".to_string(),
            other => format!("{:?}", other),
        }
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}

fn tokenize(input: &str) -> QuarryResult<Vec<(Token, usize)>> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        let next = chars.get(i + 1).map(|(_, c)| *c);
        let token = match c {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '/' if next == Some('/') => {
                i += 1;
                Token::DoubleSlash
            }
            '/' => Token::Slash,
            '@' => Token::At,
            '*' => Token::Star,
            '.' if next == Some('.') => {
                return Err(QuarryError::query("parent step '..' is not supported", pos));
            }
            '.' => Token::Dot,
            '|' => Token::Pipe,
            '=' => Token::Eq,
            ',' => Token::Comma,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '\'' | '"' => {
                let quote = c;
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && chars[end].1 != quote {
                    end += 1;
                }
                if end == chars.len() {
                    return Err(QuarryError::query("unterminated string literal", pos));
                }
                let literal: String = chars[start..end].iter().map(|(_, c)| *c).collect();
                i = end;
                Token::Literal(literal)
            }
            c if c.is_ascii_digit() => {
                let mut end = i;
                while end < chars.len() && chars[end].1.is_ascii_digit() {
                    end += 1;
                }
                let digits: String = chars[i..end].iter().map(|(_, c)| *c).collect();
                let n = digits.parse().map_err(|_| {
                    QuarryError::query(format!("number '{}' is too large", digits), pos)
                })?;
                i = end - 1;
                Token::Number(n)
            }
            c if is_name_start(c) => {
                let mut end = i;
                while end < chars.len() && is_name_char(chars[end].1) {
                    end += 1;
                }
                let name: String = chars[i..end].iter().map(|(_, c)| *c).collect();
                i = end - 1;
                Token::Name(name)
            }
            other => {
                return Err(QuarryError::query(format!("unexpected character '{}'", other), pos));
            }
        };
        tokens.push((token, pos));
        i += 1;
    }

    tokens.push((Token::End, input.len()));
    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.cursor].0
    }

    fn position(&self) -> usize {
        self.tokens[self.cursor].1
    }

    fn next(&mut self) -> Token {
        let token = self.tokens[self.cursor].0.clone();
        if token != Token::End {
            self.cursor += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> QuarryResult<()> {
        let position = self.position();
        let found = self.next();
        if found == expected {
            Ok(())
        } else {
            Err(QuarryError::query(
                format!("expected {}, found {}", expected.describe(), found.describe()),
                position,
            ))
        }
    }

    fn unexpected<T>(&self, found: &Token, position: usize) -> QuarryResult<T> {
        Err(QuarryError::query(format!("unexpected {}", found.describe()), position))
    }

    fn union(&mut self) -> QuarryResult<Vec<LocationPath>> {
        let mut paths = vec![self.path()?];
        while *self.peek() == Token::Pipe {
            self.next();
            paths.push(self.path()?);
        }
        self.expect(Token::End)?;
        Ok(paths)
    }

    fn path(&mut self) -> QuarryResult<LocationPath> {
        let mut descendant = match self.peek() {
            Token::Slash => {
                self.next();
                false
            }
            Token::DoubleSlash => {
                self.next();
                true
            }
            _ => false,
        };

        let mut steps = Vec::new();
        loop {
            steps.push(self.step(descendant)?);
            descendant = match self.peek() {
                Token::Slash => false,
                Token::DoubleSlash => true,
                _ => break,
            };
            self.next();
        }
        Ok(LocationPath { steps })
    }

    fn step(&mut self, descendant: bool) -> QuarryResult<Step> {
        let position = self.position();
        let test = match self.next() {
            Token::At => {
                let position = self.position();
                match self.next() {
                    Token::Name(name) => NodeTest::Attribute(name),
                    Token::Star => NodeTest::AnyAttribute,
                    other => return self.unexpected(&other, position),
                }
            }
            Token::Star => NodeTest::AnyElement,
            Token::Dot => NodeTest::SelfNode,
            Token::Name(name) if *self.peek() == Token::LParen => {
                self.next();
                self.expect(Token::RParen)?;
                match name.as_str() {
                    "text" => NodeTest::Text,
                    "node" => NodeTest::Node,
                    _ => {
                        return Err(QuarryError::query(
                            format!("unsupported node test '{}()'", name),
                            position,
                        ))
                    }
                }
            }
            Token::Name(name) => NodeTest::Name(name),
            other => return self.unexpected(&other, position),
        };

        let mut predicates = Vec::new();
        while *self.peek() == Token::LBracket {
            self.next();
            predicates.push(self.predicate()?);
            self.expect(Token::RBracket)?;
        }

        Ok(Step {
            descendant,
            test,
            predicates,
        })
    }

    fn predicate(&mut self) -> QuarryResult<Predicate> {
        let position = self.position();
        match self.next() {
            Token::Number(0) => Err(QuarryError::query("positions start at 1", position)),
            Token::Number(n) => Ok(Predicate::Position(n)),
            Token::At => {
                let name = self.name()?;
                match self.optional_literal()? {
                    Some(value) => Ok(Predicate::AttributeEquals(name, value)),
                    None => Ok(Predicate::HasAttribute(name)),
                }
            }
            Token::Name(name) if name == "last" && *self.peek() == Token::LParen => {
                self.next();
                self.expect(Token::RParen)?;
                Ok(Predicate::Last)
            }
            Token::Name(name) if name == "contains" && *self.peek() == Token::LParen => {
                self.next();
                let operand = self.operand()?;
                self.expect(Token::Comma)?;
                let literal = self.literal()?;
                self.expect(Token::RParen)?;
                Ok(Predicate::Contains(operand, literal))
            }
            Token::Name(name) => match self.optional_literal()? {
                Some(value) => Ok(Predicate::ChildEquals(name, value)),
                None => Ok(Predicate::HasChild(name)),
            },
            other => self.unexpected(&other, position),
        }
    }

    fn operand(&mut self) -> QuarryResult<Operand> {
        let position = self.position();
        match self.next() {
            Token::Dot => Ok(Operand::Context),
            Token::At => Ok(Operand::Attribute(self.name()?)),
            Token::Name(name) if name == "text" => {
                self.expect(Token::LParen)?;
                self.expect(Token::RParen)?;
                Ok(Operand::Text)
            }
            other => self.unexpected(&other, position),
        }
    }

    fn name(&mut self) -> QuarryResult<String> {
        let position = self.position();
        match self.next() {
            Token::Name(name) => Ok(name),
            other => self.unexpected(&other, position),
        }
    }

    fn literal(&mut self) -> QuarryResult<String> {
        let position = self.position();
        match self.next() {
            Token::Literal(value) => Ok(value),
            other => self.unexpected(&other, position),
        }
    }

    fn optional_literal(&mut self) -> QuarryResult<Option<String>> {
        if *self.peek() == Token::Eq {
            self.next();
            Ok(Some(self.literal()?))
        } else {
            Ok(None)
        }
    }
}

/// Parse a query into its union of location paths.
pub(crate) fn parse(input: &str) -> QuarryResult<Vec<LocationPath>> {
    if input.trim().is_empty() {
        return Err(QuarryError::query("empty query", 0));
    }
    let mut parser = Parser {
        tokens: tokenize(input)?,
        cursor: 0,
    };
    parser.union()
}
