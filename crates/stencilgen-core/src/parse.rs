//! Artifact parser: reads emitted stencil source back into a
//! [`StencilDefinition`].
//!
//! The parser accepts exactly the construct the emitter produces, with
//! arbitrary whitespace between tokens and an optional trailing comma in the
//! offset list. Weights are recovered by argument position, the same way the
//! downstream library probes its closure: the term for `args[k]` must be the
//! k-th term, and the closure's array length must equal the offset count.

use crate::emit::{CONSTRUCTOR, SCALAR};
use crate::error::{Result, StencilError};
use crate::types::{Offset, StencilDefinition};

/// Parse artifact text and validate the resulting definition.
pub fn parse_artifact(src: &str) -> Result<StencilDefinition> {
    let mut c = Cursor::new(src);

    c.expect(CONSTRUCTOR)?;
    c.expect("(")?;
    let offsets = offset_list(&mut c)?;
    c.expect(",")?;

    // |args: &[f32; N]| {
    c.expect("|")?;
    c.expect("args")?;
    c.expect(":")?;
    c.expect("&")?;
    c.expect("[")?;
    c.expect(SCALAR)?;
    c.expect(";")?;
    let (arity, at) = c.integer()?;
    c.expect("]")?;
    c.expect("|")?;
    c.expect("{")?;

    if usize::try_from(arity).ok() != Some(offsets.len()) {
        return Err(at.error(format!(
            "closure takes {arity} arguments but {} offsets were listed",
            offsets.len()
        )));
    }

    let weights = weighted_sum(&mut c, offsets.len())?;

    c.expect("}")?;
    c.expect(")")?;
    c.skip_ws();
    if !c.at_end() {
        return Err(c.pos().error("trailing input after artifact"));
    }

    StencilDefinition::from_parts(offsets, weights)
}

/// `[[a, b],[c, d],]`
fn offset_list(c: &mut Cursor<'_>) -> Result<Vec<Offset>> {
    c.expect("[")?;
    let mut out = Vec::new();
    loop {
        if c.eat("]") {
            return Ok(out);
        }
        c.expect("[")?;
        let mut coords = Vec::new();
        loop {
            let (v, at) = c.integer()?;
            let v = i32::try_from(v).map_err(|_| at.error("coordinate does not fit in i32"))?;
            coords.push(v);
            if c.eat("]") {
                break;
            }
            c.expect(",")?;
        }
        out.push(Offset::new(coords));
        if !c.eat(",") {
            c.expect("]")?;
            return Ok(out);
        }
    }
}

/// `args[0] * w0f32 + args[1] * w1f32 + 0.0`
fn weighted_sum(c: &mut Cursor<'_>, n: usize) -> Result<Vec<f32>> {
    let mut weights = Vec::with_capacity(n);
    while c.eat("args") {
        c.expect("[")?;
        let (k, at) = c.integer()?;
        if usize::try_from(k).ok() != Some(weights.len()) {
            return Err(at.error(format!(
                "expected args[{}], found args[{k}]",
                weights.len()
            )));
        }
        c.expect("]")?;
        c.expect("*")?;
        weights.push(c.float()?.0);
        let _ = c.eat(SCALAR);
        c.expect("+")?;
    }
    if weights.len() != n {
        return Err(c.pos().error(format!(
            "expected {n} weighted terms, found {}",
            weights.len()
        )));
    }
    let (tail, at) = c.float()?;
    if tail != 0.0 {
        return Err(at.error(format!("trailing term must be 0.0, found {tail}")));
    }
    Ok(weights)
}

#[derive(Clone, Copy, Debug)]
struct Pos {
    line: usize,
    column: usize,
}

impl Pos {
    fn error(self, message: impl Into<String>) -> StencilError {
        StencilError::Parse {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }
}

struct Cursor<'a> {
    src: &'a str,
    at: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    const fn new(src: &'a str) -> Self {
        Self {
            src,
            at: 0,
            line: 1,
            column: 1,
        }
    }

    const fn pos(&self) -> Pos {
        Pos {
            line: self.line,
            column: self.column,
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.at..]
    }

    fn at_end(&self) -> bool {
        self.at >= self.src.len()
    }

    fn bump(&mut self, n: usize) {
        for ch in self.src[self.at..self.at + n].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.at += n;
    }

    fn skip_ws(&mut self) {
        let n = self.rest().len() - self.rest().trim_start().len();
        self.bump(n);
    }

    fn eat(&mut self, tok: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(tok) {
            self.bump(tok.len());
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tok: &str) -> Result<()> {
        if self.eat(tok) {
            Ok(())
        } else {
            let found: String = self.rest().chars().take(12).collect();
            Err(self.pos().error(format!("expected `{tok}`, found `{found}`")))
        }
    }

    fn take_while(&mut self, f: impl Fn(usize, char) -> bool) -> &'a str {
        let start = self.at;
        let len = self
            .rest()
            .char_indices()
            .find(|&(i, ch)| !f(i, ch))
            .map_or(self.rest().len(), |(i, _)| i);
        self.bump(len);
        &self.src[start..start + len]
    }

    /// Integer token and the position where it starts.
    fn integer(&mut self) -> Result<(i64, Pos)> {
        self.skip_ws();
        let at = self.pos();
        let text = self.take_while(|i, ch| ch.is_ascii_digit() || (i == 0 && ch == '-'));
        text.parse()
            .map(|v| (v, at))
            .map_err(|_| at.error(format!("expected integer, found `{text}`")))
    }

    fn float(&mut self) -> Result<(f32, Pos)> {
        self.skip_ws();
        let at = self.pos();
        let bytes = self.rest().as_bytes();
        let text = self.take_while(|i, ch| {
            ch.is_ascii_digit()
                || ch == '.'
                || ch == 'e'
                || ch == 'E'
                || ((ch == '-' || ch == '+')
                    && (i == 0 || matches!(bytes.get(i - 1), Some(b'e' | b'E'))))
        });
        text.parse()
            .map(|v| (v, at))
            .map_err(|_| at.error(format!("expected float literal, found `{text}`")))
    }
}
