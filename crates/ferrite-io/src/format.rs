//! The diagnostic formatter.
//!
//! A minimal `%`-directive dispatcher over an explicit argument slice —
//! the memory-safe rendition of a varargs print. Directives:
//!
//! | Directive | Renders |
//! |-----------|---------|
//! | `%i`      | integer, decimal |
//! | `%f`      | float, three decimals |
//! | `%s`      | UTF-8 string |
//! | `%S`      | raw byte-string ([`Str`]) |
//! | `%%`      | a literal `%` |
//!
//! The dispatcher is forgiving, never failing on a malformed format:
//! an unknown directive, or a directive with no argument left, is emitted
//! verbatim. Each consumed argument renders according to its own variant,
//! so a mismatched directive letter cannot misinterpret memory.

use std::io::{self, Write};

use crate::str::Str;

/// One formatter argument.
#[derive(Clone, Copy, Debug)]
pub enum Arg<'a> {
    /// Rendered in decimal.
    Int(i64),
    /// Rendered with three decimal places.
    Float(f64),
    /// Rendered as-is.
    Str(&'a str),
    /// Rendered as raw bytes.
    Bytes(Str<'a>),
}

/// Render `fmt`, substituting directives with `args` in order, into `out`.
pub fn format_into<W: Write>(out: &mut W, fmt: &str, args: &[Arg<'_>]) -> io::Result<()> {
    let bytes = fmt.as_bytes();
    let mut args = args.iter();
    let mut i = 0;
    while i < bytes.len() {
        // Copy the literal run up to the next directive.
        let run = bytes[i..]
            .iter()
            .position(|&b| b == b'%')
            .map_or(bytes.len(), |p| i + p);
        out.write_all(&bytes[i..run])?;
        i = run;
        if i >= bytes.len() {
            break;
        }
        // bytes[i] is '%'. A trailing lone '%' is emitted verbatim.
        let Some(&directive) = bytes.get(i + 1) else {
            out.write_all(b"%")?;
            break;
        };
        i += 2;
        match directive {
            b'%' => out.write_all(b"%")?,
            b'i' | b'f' | b's' | b'S' => match args.next() {
                Some(arg) => write_arg(out, arg)?,
                None => out.write_all(&[b'%', directive])?,
            },
            other => out.write_all(&[b'%', other])?,
        }
    }
    Ok(())
}

fn write_arg<W: Write>(out: &mut W, arg: &Arg<'_>) -> io::Result<()> {
    match arg {
        Arg::Int(v) => write!(out, "{v}"),
        Arg::Float(v) => write!(out, "{v:.3}"),
        Arg::Str(s) => out.write_all(s.as_bytes()),
        Arg::Bytes(s) => out.write_all(s.as_bytes()),
    }
}
