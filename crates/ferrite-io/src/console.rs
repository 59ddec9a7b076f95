//! Console output.

use std::io::{self, LineWriter, Stdout, Write};

use crate::format::{format_into, Arg};
use crate::str::Str;

/// Byte-oriented console with raw, newline-appended, and formatted writes.
///
/// Generic over any sink so tests can capture output; the stdout
/// constructor wraps it in a [`LineWriter`] so diagnostics appear promptly
/// without per-byte syscalls.
pub struct Console<W: Write> {
    out: W,
}

impl Console<LineWriter<Stdout>> {
    /// A line-buffered console over standard output.
    pub fn stdout() -> Self {
        Self::new(LineWriter::new(io::stdout()))
    }
}

impl<W: Write> Console<W> {
    /// Wrap an arbitrary sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write the raw bytes of `s`. No newline.
    pub fn put(&mut self, s: Str<'_>) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }

    /// Write `s` followed by a newline.
    pub fn putn(&mut self, s: Str<'_>) -> io::Result<()> {
        self.out.write_all(s.as_bytes())?;
        self.out.write_all(b"\n")
    }

    /// Write `fmt` with `%i/%f/%s/%S` directives substituted from `args`.
    pub fn print(&mut self, fmt: &str, args: &[Arg<'_>]) -> io::Result<()> {
        format_into(&mut self.out, fmt, args)
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Take the sink back.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_writes_raw_bytes() {
        let mut console = Console::new(Vec::new());
        console.put(Str::from("abc")).unwrap();
        console.put(Str::from("def")).unwrap();
        assert_eq!(console.into_inner(), b"abcdef");
    }

    #[test]
    fn putn_appends_newline() {
        let mut console = Console::new(Vec::new());
        console.putn(Str::from("line")).unwrap();
        assert_eq!(console.into_inner(), b"line\n");
    }

    #[test]
    fn print_dispatches_directives() {
        let mut console = Console::new(Vec::new());
        console
            .print("%s: %i cells\n", &[Arg::Str("grid"), Arg::Int(256)])
            .unwrap();
        assert_eq!(console.into_inner(), b"grid: 256 cells\n");
    }
}
