use super::ast::{ParsedExpression, RollOption};
use super::lexer::{lexer, Lexer, TokenKind};
use crate::common::{Int, UInt, MAX_DICE, MAX_SIDES};
use crate::error::InvalidExpression;

type PResult<T> = Result<T, InvalidExpression>;

/// Parse against the simple grammar: `<count>d<sides>([+-]<modifier>)?`.
///
/// Matching is case-insensitive, whitespace is ignored, and anything after
/// the recognized prefix is discarded, so chat-typed input like `2d6+3 pls`
/// still rolls.
pub fn parse_simple(input: &str) -> PResult<ParsedExpression> {
    let lowered = input.to_lowercase();
    Parser::new(&lowered, input).parse_simple()
}

/// Parse against the advanced grammar: `(<count>)?d<sides><options>`, where
/// the options are single-letter tags (`a`, `d`, `k<n>`, `x<n>`, `!`,
/// `r<n>`) with an optional trailing signed modifier.
pub fn parse_advanced(input: &str) -> PResult<ParsedExpression> {
    let lowered = input.to_lowercase();
    Parser::new(&lowered, input).parse_advanced()
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    input: &'a str,
}

impl<'a> Parser<'a> {
    fn new(lowered: &'a str, input: &'a str) -> Self {
        Self {
            lexer: lexer(lowered),
            input,
        }
    }

    fn peek(&mut self) -> Option<TokenKind> {
        self.lexer.peek().copied()
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.lexer.peek() == Some(&kind) {
            self.lexer.next();
            true
        } else {
            false
        }
    }

    /// Consume the next token if it is an integer literal.
    fn eat_integer(&mut self) -> Option<UInt> {
        match self.lexer.peek() {
            Some(&TokenKind::Integer(x)) => {
                self.lexer.next();
                Some(x)
            }
            _ => None,
        }
    }

    /// Consume a `+` or `-`, returning the sign as `1` or `-1`.
    fn eat_sign(&mut self) -> Option<Int> {
        if self.eat(TokenKind::Plus) {
            Some(1)
        } else if self.eat(TokenKind::Minus) {
            Some(-1)
        } else {
            None
        }
    }

    fn fail<T>(&self) -> PResult<T> {
        Err(InvalidExpression::Unrecognized(self.input.to_string()))
    }

    fn parse_simple(mut self) -> PResult<ParsedExpression> {
        let count = match self.eat_integer() {
            Some(x) => x,
            None => return self.fail(),
        };
        if !self.eat(TokenKind::Die) {
            return self.fail();
        }
        let sides = match self.eat_integer() {
            Some(x) => x,
            None => return self.fail(),
        };
        check_bounds(count, sides)?;

        let mut modifier = 0;
        if let Some(sign) = self.eat_sign() {
            if let Some(value) = self.eat_integer() {
                modifier = sign * clamp_to_int(value);
            }
        }

        Ok(ParsedExpression::new(count, sides).with_modifier(modifier))
    }

    fn parse_advanced(mut self) -> PResult<ParsedExpression> {
        let count = self.eat_integer().unwrap_or(1);
        if !self.eat(TokenKind::Die) {
            return self.fail();
        }
        let sides = match self.eat_integer() {
            Some(x) => x,
            None => return self.fail(),
        };
        check_bounds(count, sides)?;

        let mut options = Vec::new();
        let mut modifier = 0;
        while let Some(tag) = self.peek() {
            match tag {
                TokenKind::Advantage
                | TokenKind::Die
                | TokenKind::KeepHighest
                | TokenKind::KeepLowest
                | TokenKind::Exploding
                | TokenKind::Reroll => {
                    self.lexer.next();
                    let value = self.eat_integer();
                    // A sign group we consumed earlier was not trailing
                    // after all; only the final one counts as the modifier.
                    modifier = 0;
                    options.push(match tag {
                        TokenKind::Advantage => RollOption::Advantage,
                        TokenKind::Die => RollOption::Disadvantage,
                        TokenKind::KeepHighest => {
                            RollOption::KeepHighest(value_or(value, count))
                        }
                        TokenKind::KeepLowest => {
                            RollOption::KeepLowest(value_or(value, count))
                        }
                        TokenKind::Exploding => RollOption::Exploding,
                        TokenKind::Reroll => RollOption::RerollAtOrBelow(value_or(value, 1)),
                        _ => unreachable!(),
                    });
                }
                TokenKind::Plus | TokenKind::Minus => {
                    let sign = self.eat_sign().expect("peeked a sign token");
                    match self.eat_integer() {
                        Some(value) => modifier = sign * clamp_to_int(value),
                        // a bare sign ends the recognizable prefix
                        None => break,
                    }
                }
                _ => break,
            }
        }

        Ok(ParsedExpression::new(count, sides)
            .with_options(options)
            .with_modifier(modifier))
    }
}

/// `k`, `x` and `r` treat a missing or zero value as "use the default".
fn value_or(value: Option<UInt>, default: UInt) -> UInt {
    match value {
        Some(x) if x > 0 => x,
        _ => default,
    }
}

fn clamp_to_int(value: UInt) -> Int {
    value.min(Int::MAX as UInt) as Int
}

fn check_bounds(count: UInt, sides: UInt) -> Result<(), InvalidExpression> {
    if count == 0 || sides == 0 {
        Err(InvalidExpression::InvalidParameters { count, sides })
    } else if count > MAX_DICE {
        Err(InvalidExpression::TooManyDice(count))
    } else if sides > MAX_SIDES {
        Err(InvalidExpression::TooManySides(sides))
    } else {
        Ok(())
    }
}
