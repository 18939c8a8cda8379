//! OpenSCAD export and the matching importer.
//!
//! Export layout (numbers with four decimals, `$fn` fixed):
//!
//! ```text
//! // metaball scene: 1 positive, 1 negative
//! iso = 1.0000;
//! $fn = 48;
//! difference() {
//!   union() {
//!     // Ball 1
//!     translate([-60.0000, 0.0000, 0.0000]) sphere(r = 50.0000 / iso);
//!   }
//!   union() {
//!     // Hole
//!     translate([0.0000, 0.0000, 0.0000]) sphere(r = 20.0000 / iso);
//!   }
//! }
//! ```
//!
//! Without negative balls the `difference()` wrapper is left out. Dividing by
//! `iso` makes each exported sphere match the isosurface of that ball alone.
//!
//! The importer reads the same shapes back and tolerates hand edits:
//! whitespace, `sphere(R)` or `sphere(r = R)`, spheres outside any block
//! (positive) and comments anywhere. Anything it does not recognize is
//! logged and skipped; text with no recognizable sphere yields no balls.

use crate::constants::SCAD_FRAGMENTS;
use crate::error::ScadError;
use crate::field::{Ball, Polarity};
use glam::Vec3;
use std::fmt::Write;

/// Script for `balls` at threshold `iso`.
pub fn build_scad(balls: &[Ball], iso: f32) -> String {
    let positives: Vec<&Ball> = balls.iter().filter(|b| !b.polarity.is_negative()).collect();
    let negatives: Vec<&Ball> = balls.iter().filter(|b| b.polarity.is_negative()).collect();

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "// metaball scene: {} positive, {} negative",
        positives.len(),
        negatives.len()
    );
    let _ = writeln!(out, "iso = {:.4};", iso);
    let _ = writeln!(out, "$fn = {};", SCAD_FRAGMENTS);

    if negatives.is_empty() {
        write_union(&mut out, &positives, 0);
    } else {
        out.push_str("difference() {\n");
        write_union(&mut out, &positives, 1);
        write_union(&mut out, &negatives, 1);
        out.push_str("}\n");
    }
    out
}

fn write_union(out: &mut String, balls: &[&Ball], depth: usize) {
    let pad = "  ".repeat(depth);
    let _ = writeln!(out, "{pad}union() {{");
    for ball in balls {
        let name = ball.name.replace(['\n', '\r'], " ");
        let name = name.trim();
        if !name.is_empty() {
            let _ = writeln!(out, "{pad}  // {name}");
        }
        let c = ball.center;
        let _ = writeln!(
            out,
            "{pad}  translate([{:.4}, {:.4}, {:.4}]) sphere(r = {:.4} / iso);",
            c.x, c.y, c.z, ball.radius
        );
    }
    let _ = writeln!(out, "{pad}}}");
}

/// Result of [`parse_scad`]. `balls` is empty when nothing was recognized.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportedScene {
    pub balls: Vec<Ball>,
    pub iso: Option<f32>,
}

impl ImportedScene {
    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }
}

pub fn parse_scad(text: &str) -> ImportedScene {
    let tokens = lex(text);
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        blocks: Vec::new(),
        pending_name: None,
        scene: ImportedScene::default(),
    };
    parser.run();
    if !parser.blocks.is_empty() {
        log::debug!("scad: {} block(s) left open", parser.blocks.len());
    }
    parser.scene
}

// ---------------- Lexer ----------------

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Ident(String),
    /// Raw numeric text; parsed where a number is expected.
    Number(String),
    Punct(char),
    Comment(String),
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Ident(s) | Token::Number(s) => s.clone(),
            Token::Punct(c) => c.to_string(),
            Token::Comment(_) => "comment".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
struct Lexed {
    token: Token,
    line: usize,
}

fn lex(text: &str) -> Vec<Lexed> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut line = 1;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        if c == '\n' {
            line += 1;
            i += 1;
        } else if c.is_whitespace() {
            i += 1;
        } else if c == '/' && next == Some('/') {
            let start = i + 2;
            let mut end = start;
            while end < chars.len() && chars[end] != '\n' {
                end += 1;
            }
            let body: String = chars[start..end].iter().collect();
            out.push(Lexed {
                token: Token::Comment(body.trim().to_string()),
                line,
            });
            i = end;
        } else if c == '/' && next == Some('*') {
            i += 2;
            while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                if chars[i] == '\n' {
                    line += 1;
                }
                i += 1;
            }
            i = (i + 2).min(chars.len());
        } else if c.is_ascii_digit()
            || ((c == '-' || c == '+' || c == '.')
                && next.is_some_and(|n| n.is_ascii_digit() || n == '.'))
        {
            let start = i;
            i += 1;
            while i < chars.len() {
                let d = chars[i];
                let exp_sign = (d == '-' || d == '+') && matches!(chars[i - 1], 'e' | 'E');
                if d.is_ascii_digit() || d == '.' || d == 'e' || d == 'E' || exp_sign {
                    i += 1;
                } else {
                    break;
                }
            }
            out.push(Lexed {
                token: Token::Number(chars[start..i].iter().collect()),
                line,
            });
        } else if c.is_alphabetic() || c == '_' || c == '$' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Lexed {
                token: Token::Ident(chars[start..i].iter().collect()),
                line,
            });
        } else {
            out.push(Lexed {
                token: Token::Punct(c),
                line,
            });
            i += 1;
        }
    }
    out
}

// ---------------- Parser ----------------

#[derive(Clone, Copy, Debug)]
enum Block {
    /// `children` counts direct children seen so far; everything after the
    /// first is subtracted.
    Difference { children: usize },
    /// Any other block (`union`, `translate`, `color`, ...) passes its sign
    /// down to its children.
    Group { negative: bool },
}

struct Parser<'a> {
    tokens: &'a [Lexed],
    pos: usize,
    blocks: Vec<Block>,
    pending_name: Option<String>,
    scene: ImportedScene,
}

type ParseResult<T> = Result<T, ScadError>;

impl<'a> Parser<'a> {
    fn run(&mut self) {
        let tokens = self.tokens;
        while let Some(lexed) = tokens.get(self.pos) {
            let line = lexed.line;
            let result = match &lexed.token {
                Token::Comment(text) => {
                    self.pending_name = Some(text.clone());
                    self.pos += 1;
                    continue;
                }
                Token::Punct('}') => {
                    self.pos += 1;
                    match self.blocks.pop() {
                        Some(_) => Ok(()),
                        None => Err(ScadError::Unbalanced { line, token: '}' }),
                    }
                }
                Token::Ident(id) => match id.as_str() {
                    "iso" => self.assignment().map(|v| self.scene.iso = Some(v)),
                    "$fn" | "$fa" | "$fs" => self.assignment().map(|_| ()),
                    "difference" => self.open_block(Block::Difference { children: 0 }),
                    "translate" => self.sphere(),
                    "sphere" => self.bare_sphere(),
                    _ => {
                        let negative = self.claim_child();
                        self.open_block(Block::Group { negative })
                    }
                },
                other => {
                    log::debug!("scad: line {}: stray '{}'", line, other.describe());
                    self.pos += 1;
                    continue;
                }
            };
            self.pending_name = None;
            if let Err(err) = result {
                log::debug!("scad: skipping: {}", err);
                self.recover();
            }
        }
    }

    /// Skip past the next `;` or up to (not including) the next `}`.
    fn recover(&mut self) {
        while let Some(lexed) = self.tokens.get(self.pos) {
            match lexed.token {
                Token::Punct(';') => {
                    self.pos += 1;
                    return;
                }
                Token::Punct('}') => return,
                _ => self.pos += 1,
            }
        }
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(0, |l| l.line)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|l| &l.token)
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if self.peek() == Some(&Token::Punct(c)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, c: char) -> ParseResult<()> {
        if self.eat_punct(c) {
            return Ok(());
        }
        Err(ScadError::Expected {
            line: self.line(),
            expected: c,
            found: self.peek().map_or_else(|| "end of input".into(), Token::describe),
        })
    }

    fn eat_ident(&mut self, name: &str) -> bool {
        if matches!(self.peek(), Some(Token::Ident(id)) if id == name) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn number(&mut self) -> ParseResult<f32> {
        let line = self.line();
        match self.peek() {
            Some(Token::Number(raw)) => {
                let parsed = raw.parse::<f32>().ok().filter(|v| v.is_finite());
                let found = raw.clone();
                self.pos += 1;
                parsed.ok_or(ScadError::BadNumber { line, found })
            }
            other => Err(ScadError::BadNumber {
                line,
                found: other.map_or_else(|| "end of input".into(), Token::describe),
            }),
        }
    }

    /// `name = number ;`
    fn assignment(&mut self) -> ParseResult<f32> {
        self.pos += 1;
        self.expect_punct('=')?;
        let value = self.number()?;
        self.expect_punct(';')?;
        Ok(value)
    }

    /// `name(...) {` for a block. The argument list is skipped.
    fn open_block(&mut self, block: Block) -> ParseResult<()> {
        self.pos += 1;
        self.skip_parens()?;
        if self.eat_punct('{') {
            self.blocks.push(block);
        } else {
            // Single-child module call like `union() sphere(1);`.
            self.eat_punct(';');
        }
        Ok(())
    }

    fn skip_parens(&mut self) -> ParseResult<()> {
        let line = self.line();
        self.expect_punct('(')?;
        let mut depth = 1;
        while let Some(lexed) = self.tokens.get(self.pos) {
            self.pos += 1;
            match lexed.token {
                Token::Punct('(') => depth += 1,
                Token::Punct(')') => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
        Err(ScadError::Unbalanced { line, token: '(' })
    }

    /// Count a child of the innermost difference and report whether it is
    /// subtracted. Inside a union the union's sign applies.
    fn claim_child(&mut self) -> bool {
        match self.blocks.last_mut() {
            Some(Block::Difference { children }) => {
                *children += 1;
                *children > 1
            }
            Some(Block::Group { negative }) => *negative,
            None => false,
        }
    }

    /// `translate([x, y, z]) sphere(...);`
    fn sphere(&mut self) -> ParseResult<()> {
        let line = self.line();
        self.pos += 1;
        self.expect_punct('(')?;
        self.expect_punct('[')?;
        let mut coords = Vec::with_capacity(3);
        loop {
            coords.push(self.number()?);
            if !self.eat_punct(',') {
                break;
            }
        }
        self.expect_punct(']')?;
        self.expect_punct(')')?;
        if coords.len() != 3 {
            return Err(ScadError::BadVector {
                line,
                count: coords.len(),
            });
        }
        if !self.eat_ident("sphere") {
            return Err(ScadError::Expected {
                line: self.line(),
                expected: 's',
                found: self.peek().map_or_else(|| "end of input".into(), Token::describe),
            });
        }
        let radius = self.sphere_args(line)?;
        self.push_ball(Vec3::new(coords[0], coords[1], coords[2]), radius);
        Ok(())
    }

    /// `sphere(...)` at the origin.
    fn bare_sphere(&mut self) -> ParseResult<()> {
        let line = self.line();
        self.pos += 1;
        let radius = self.sphere_args(line)?;
        self.push_ball(Vec3::ZERO, radius);
        Ok(())
    }

    /// `(r = R / iso);`, `(r = R);` or `(R);`, after the `sphere` keyword.
    fn sphere_args(&mut self, line: usize) -> ParseResult<f32> {
        self.expect_punct('(')?;
        if self.eat_ident("r") {
            self.expect_punct('=')?;
        }
        let radius = self.number()?;
        if self.eat_punct('/') && !self.eat_ident("iso") {
            // A literal divisor is applied as written.
            let divisor = self.number()?;
            if divisor == 0.0 {
                return Err(ScadError::BadRadius { line, radius });
            }
            return self.finish_sphere(line, radius / divisor);
        }
        self.finish_sphere(line, radius)
    }

    fn finish_sphere(&mut self, line: usize, radius: f32) -> ParseResult<f32> {
        // Rejected before the closing tokens so recovery stops at this `;`.
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ScadError::BadRadius { line, radius });
        }
        self.expect_punct(')')?;
        self.eat_punct(';');
        Ok(radius)
    }

    fn push_ball(&mut self, center: Vec3, radius: f32) {
        let polarity = if self.claim_child() {
            Polarity::Negative
        } else {
            Polarity::Positive
        };
        let name = self.pending_name.take().unwrap_or_default();
        self.scene
            .balls
            .push(Ball::new(center, radius, polarity, name));
    }
}
