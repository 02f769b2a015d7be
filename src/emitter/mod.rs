mod format;
mod tests;

pub use format::BlobFormat;

use crate::error::MemzipError;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// Bytes read and rendered per output row
pub const ROW_WIDTH: usize = 16;

/// Result of rendering an archive
#[derive(Debug, Clone)]
pub struct EmitSummary {
    pub path: PathBuf,
    pub bytes: u64,
    pub rows: u64,
}

/// Renders archive bytes as a static array declaration
pub struct BlobEmitter {
    format: BlobFormat,
    symbol: String,
}

impl BlobEmitter {
    /// Fails if `symbol` is not a valid identifier or is reserved in the
    /// target language
    pub fn new(format: BlobFormat, symbol: impl Into<String>) -> Result<Self, MemzipError> {
        let symbol = symbol.into();
        if !is_identifier(&symbol) {
            return Err(MemzipError::Config(format!(
                "Symbol is not a valid identifier: {symbol:?}"
            )));
        }
        if format.is_reserved(&symbol) {
            return Err(MemzipError::Config(format!(
                "Symbol is a reserved word for {format:?} output: {symbol:?}"
            )));
        }
        Ok(Self { format, symbol })
    }

    /// Stream `reader` into `writer` one row at a time.
    ///
    /// `len` must match the number of bytes the reader yields, since some
    /// formats declare the array length up front. Returns the number of
    /// bytes rendered.
    pub fn emit<R: Read, W: Write>(
        &self,
        mut reader: R,
        len: u64,
        mut writer: W,
    ) -> io::Result<u64> {
        self.format.write_header(&mut writer, &self.symbol, len)?;

        let mut row = [0u8; ROW_WIDTH];
        let mut total = 0u64;

        loop {
            let filled = read_row(&mut reader, &mut row)?;
            if filled == 0 {
                break;
            }
            format::write_row(&mut writer, &row[..filled])?;
            total += filled as u64;
        }

        if total != len {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("Archive length changed while emitting: expected {len}, read {total}"),
            ));
        }

        self.format.write_footer(&mut writer)?;
        writer.flush()?;
        Ok(total)
    }

    /// Render the archive at `archive` into `dest`, overwriting it
    pub fn emit_file(&self, archive: &Path, dest: &Path) -> Result<EmitSummary, MemzipError> {
        let input = File::open(archive).map_err(|e| MemzipError::io(archive, e))?;
        let len = input
            .metadata()
            .map_err(|e| MemzipError::io(archive, e))?
            .len();

        let output = File::create(dest).map_err(|e| MemzipError::io(dest, e))?;
        let bytes = self
            .emit(BufReader::new(input), len, BufWriter::new(output))
            .map_err(|e| MemzipError::io(dest, e))?;

        log::info!("Rendered {} bytes into {}", bytes, dest.display());

        Ok(EmitSummary {
            path: dest.to_path_buf(),
            bytes,
            rows: bytes.div_ceil(ROW_WIDTH as u64),
        })
    }
}

/// Fill `buf` unless the reader runs dry first
fn read_row<R: Read>(reader: &mut R, buf: &mut [u8; ROW_WIDTH]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn is_identifier(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
