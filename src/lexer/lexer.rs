use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Called with the lexer positioned at the start of a match and the match
/// length in bytes. A handler must consume at least the matched input.
pub type RegexHandler = fn(&mut Lexer<'_>, usize);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            regex: Regex::new(pattern).unwrap(),
            handler,
        }
    }
}

lazy_static! {
    // Tried in order, the first match wins, so longer spellings come first.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new("^[ \\t\\r\\n]+", skip_handler),
        RegexPattern::new("^//[^\\n]*", skip_handler),
        RegexPattern::new("^/\\*", block_comment_handler),
        RegexPattern::new("^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        RegexPattern::new("^[0-9]+", MK_DEFAULT_HANDLER!(TokenKind::Number)),
        RegexPattern::new("^\"[^\"\\n]*\"", string_handler),
        RegexPattern::new("^\"[^\"\\n]*", unterminated_string_handler),
        RegexPattern::new("^->", MK_DEFAULT_HANDLER!(TokenKind::Arrow)),
        RegexPattern::new("^==", MK_DEFAULT_HANDLER!(TokenKind::Equals)),
        RegexPattern::new("^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals)),
        RegexPattern::new("^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals)),
        RegexPattern::new("^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals)),
        RegexPattern::new("^:=", MK_DEFAULT_HANDLER!(TokenKind::ColonEquals)),
        RegexPattern::new("^\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly)),
        RegexPattern::new("^\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly)),
        RegexPattern::new("^\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen)),
        RegexPattern::new("^\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen)),
        RegexPattern::new("^!", MK_DEFAULT_HANDLER!(TokenKind::Not)),
        RegexPattern::new("^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment)),
        RegexPattern::new("^<", MK_DEFAULT_HANDLER!(TokenKind::Less)),
        RegexPattern::new("^>", MK_DEFAULT_HANDLER!(TokenKind::Greater)),
        RegexPattern::new("^\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot)),
        RegexPattern::new("^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon)),
        RegexPattern::new("^:", MK_DEFAULT_HANDLER!(TokenKind::Colon)),
        RegexPattern::new("^,", MK_DEFAULT_HANDLER!(TokenKind::Comma)),
        RegexPattern::new("^\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus)),
        RegexPattern::new("^-", MK_DEFAULT_HANDLER!(TokenKind::Dash)),
        RegexPattern::new("^/", MK_DEFAULT_HANDLER!(TokenKind::Slash)),
        RegexPattern::new("^\\*", MK_DEFAULT_HANDLER!(TokenKind::Star)),
    ];
}

pub struct Lexer<'src> {
    tokens: Vec<Token<'src>>,
    errors: Vec<Error>,
    source: &'src str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Lexer<'src> {
        Lexer {
            tokens: vec![],
            errors: vec![],
            source,
            pos: 0,
            line: 1,
            column: 0,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            offset: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    /// Moves forward `n` bytes, keeping line and column in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for c in self.source[self.pos..end].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    /// Pushes a token covering the next `length` bytes and consumes them.
    pub fn push_token(&mut self, kind: TokenKind, length: usize) {
        let start = self.position();
        let source = self.source;
        let value = &source[self.pos..self.pos + length];
        self.advance_n(length);

        self.tokens.push(MK_TOKEN!(
            kind,
            value,
            Span {
                start,
                end: self.position()
            }
        ));
    }

    /// Records an error covering the next `length` bytes and skips them.
    pub fn push_error(&mut self, error: ErrorImpl, length: usize) {
        let start = self.position();
        self.advance_n(length);
        self.errors.push(Error::new(
            error,
            Span {
                start,
                end: self.position(),
            },
        ));
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &'src str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn skip_handler(lexer: &mut Lexer<'_>, length: usize) {
    lexer.advance_n(length);
}

fn symbol_handler(lexer: &mut Lexer<'_>, length: usize) {
    let value = &lexer.remainder()[..length];
    let kind = RESERVED_LOOKUP
        .get(value)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.push_token(kind, length);
}

// The token value is the text between the quotes; the span covers the quotes.
fn string_handler(lexer: &mut Lexer<'_>, length: usize) {
    let start = lexer.position();
    let value = &lexer.remainder()[1..length - 1];
    lexer.advance_n(length);

    let span = Span {
        start,
        end: lexer.position(),
    };
    lexer.tokens.push(MK_TOKEN!(TokenKind::String, value, span));
}

fn unterminated_string_handler(lexer: &mut Lexer<'_>, length: usize) {
    lexer.push_error(ErrorImpl::UnterminatedString, length);
}

fn block_comment_handler(lexer: &mut Lexer<'_>, _length: usize) {
    let bytes = lexer.remainder().as_bytes();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i..].starts_with(b"/*") {
            depth += 1;
            i += 2;
        } else if bytes[i..].starts_with(b"*/") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lexer.advance_n(i);
                return;
            }
        } else {
            i += 1;
        }
    }

    let start = lexer.position();
    lexer.advance_n(bytes.len());
    lexer.errors.push(Error::new(
        ErrorImpl::UnterminatedComment,
        Span {
            start,
            end: Position {
                offset: start.offset + 2,
                line: start.line,
                column: start.column + 2,
            },
        },
    ));
}

/// Scans the whole source.
///
/// Scanning does not stop at the first bad character: every lex error in the
/// source is collected and returned together.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, Vec<Error>> {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            if let Some(found) = pattern.regex.find(lex.remainder()) {
                (pattern.handler)(&mut lex, found.end());
                matched = true;
                break;
            }
        }

        if !matched {
            let unknown = lex.at().unwrap_or('\0');
            lex.push_error(
                ErrorImpl::UnrecognisedToken {
                    token: unknown.to_string(),
                },
                unknown.len_utf8(),
            );
        }
    }

    let eof = lex.position();
    lex.tokens.push(MK_TOKEN!(
        TokenKind::EOF,
        "",
        Span {
            start: eof,
            end: eof
        }
    ));

    if lex.errors.is_empty() {
        Ok(lex.tokens)
    } else {
        Err(lex.errors)
    }
}
