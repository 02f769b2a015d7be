use clap::ValueEnum;
use serde::Deserialize;
use std::io::{self, Write};

/// Target-language rendering of the embedded archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BlobFormat {
    /// `const uint8_t name[] = { ... };`
    #[default]
    C,
    /// `pub static NAME: [u8; N] = [ ... ];`
    Rust,
}

/// C keywords (through C23) plus names the generated header already uses
const C_RESERVED: &[&str] = &[
    "alignas", "alignof", "auto", "bool", "break", "case", "char", "const", "constexpr",
    "continue", "default", "do", "double", "else", "enum", "extern", "false", "float", "for",
    "goto", "if", "inline", "int", "long", "nullptr", "register", "restrict", "return", "short",
    "signed", "sizeof", "static", "static_assert", "struct", "switch", "thread_local", "true",
    "typedef", "typeof", "typeof_unqual", "union", "unsigned", "void", "volatile", "while",
    "_Alignas", "_Alignof", "_Atomic", "_BitInt", "_Bool", "_Complex", "_Decimal128",
    "_Decimal32", "_Decimal64", "_Generic", "_Imaginary", "_Noreturn", "_Static_assert",
    "_Thread_local", "uint8_t",
];

impl BlobFormat {
    /// Whether `symbol` cannot name the array in this format.
    ///
    /// Rust output upper-cases the symbol, so only a lone `_` collides there.
    pub(super) fn is_reserved(self, symbol: &str) -> bool {
        match self {
            BlobFormat::C => C_RESERVED.contains(&symbol),
            BlobFormat::Rust => symbol == "_",
        }
    }

    pub(super) fn write_header<W: Write>(
        self,
        out: &mut W,
        symbol: &str,
        len: u64,
    ) -> io::Result<()> {
        match self {
            BlobFormat::C => {
                writeln!(out, "#include <stdint.h>")?;
                writeln!(out)?;
                writeln!(out, "const uint8_t {symbol}[] = {{")
            }
            BlobFormat::Rust => {
                writeln!(out, "// Generated by memzip. Do not edit.")?;
                writeln!(out)?;
                writeln!(
                    out,
                    "pub static {}: [u8; {len}] = [",
                    symbol.to_ascii_uppercase()
                )
            }
        }
    }

    pub(super) fn write_footer<W: Write>(self, out: &mut W) -> io::Result<()> {
        match self {
            BlobFormat::C => writeln!(out, "}};"),
            BlobFormat::Rust => writeln!(out, "];"),
        }
    }
}

/// One row: three spaces, then ` 0x{:02x},` per byte
pub(super) fn write_row<W: Write>(out: &mut W, row: &[u8]) -> io::Result<()> {
    write!(out, "   ")?;
    for byte in row {
        write!(out, " 0x{byte:02x},")?;
    }
    writeln!(out)
}
