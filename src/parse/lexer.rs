use crate::common::UInt;
use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};

pub(crate) type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub(crate) fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, PartialEq)]
pub(crate) enum TokenKind {
    #[regex(r"[0-9]+", |lex| lex.slice().parse())]
    Integer(UInt),

    // `d` doubles as the count/sides separator and as the disadvantage
    // tag; the parser decides from position.
    #[token("d")]
    Die,

    #[token("a")]
    Advantage,
    #[token("k")]
    KeepHighest,
    #[token("x")]
    KeepLowest,
    #[token("!")]
    Exploding,
    #[token("r")]
    Reroll,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(s: &str) -> Vec<TokenKind> {
        lexer(s).collect()
    }

    #[test]
    fn test_lex_simple() {
        use TokenKind::*;
        assert_eq!(lex("2d6+3"), vec![Integer(2), Die, Integer(6), Plus, Integer(3)]);
        assert_eq!(lex("1d20"), vec![Integer(1), Die, Integer(20)]);
    }

    #[test]
    fn test_lex_options() {
        use TokenKind::*;
        assert_eq!(
            lex("4d6k3!r2-1"),
            vec![
                Integer(4),
                Die,
                Integer(6),
                KeepHighest,
                Integer(3),
                Exploding,
                Reroll,
                Integer(2),
                Minus,
                Integer(1),
            ]
        );
        assert_eq!(lex("d20ax"), vec![Die, Integer(20), Advantage, KeepLowest]);
    }

    #[test]
    fn test_lex_skips_whitespace() {
        use TokenKind::*;
        assert_eq!(lex("2d6 + 3"), vec![Integer(2), Die, Integer(6), Plus, Integer(3)]);
    }

    #[test]
    fn test_lex_unknown_input() {
        use TokenKind::*;
        assert_eq!(lex("c"), vec![Error]);
        // an integer too large for the value type is an error, not a wrap
        assert_eq!(lex("99999999999"), vec![Error]);
    }
}
