#[cfg(test)]
mod tests {
    use crate::emitter::{BlobEmitter, BlobFormat, ROW_WIDTH};
    use crate::MemzipError;
    use std::fs;
    use std::io::{self, Read};

    fn render(format: BlobFormat, symbol: &str, data: &[u8]) -> String {
        let mut out = Vec::new();
        BlobEmitter::new(format, symbol)
            .unwrap()
            .emit(data, data.len() as u64, &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    /// Pull every `0x..` literal back out of rendered source
    fn decode(source: &str) -> Vec<u8> {
        source
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter_map(|token| token.strip_prefix("0x"))
            .map(|hex| u8::from_str_radix(hex, 16).unwrap())
            .collect()
    }

    /// Reader that hands out at most three bytes per call
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(3).min(self.0.len());
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_c_layout() {
        let source = render(BlobFormat::C, "memzip_data", &[0xDE, 0xAD, 0x00, 0x0F]);
        assert_eq!(
            source,
            "#include <stdint.h>\n\
             \n\
             const uint8_t memzip_data[] = {\n    \
             0xde, 0xad, 0x00, 0x0f,\n\
             };\n"
        );
    }

    #[test]
    fn test_rows_are_sixteen_bytes() {
        let data: Vec<u8> = (0..=40).collect();
        let source = render(BlobFormat::C, "memzip_data", &data);

        let rows: Vec<&str> = source.lines().filter(|l| l.starts_with("    0x")).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].matches("0x").count(), ROW_WIDTH);
        assert_eq!(rows[1].matches("0x").count(), ROW_WIDTH);
        assert_eq!(rows[2].matches("0x").count(), 41 - 2 * ROW_WIDTH);
        assert!(rows[0].starts_with("    0x00, 0x01,"));
    }

    #[test]
    fn test_empty_input() {
        let source = render(BlobFormat::C, "memzip_data", &[]);
        assert_eq!(
            source,
            "#include <stdint.h>\n\nconst uint8_t memzip_data[] = {\n};\n"
        );
    }

    #[test]
    fn test_rust_layout() {
        let source = render(BlobFormat::Rust, "memzip_data", &[1, 2, 3]);
        assert!(source.starts_with("// Generated by memzip. Do not edit.\n"));
        assert!(source.contains("pub static MEMZIP_DATA: [u8; 3] = [\n"));
        assert!(source.contains("    0x01, 0x02, 0x03,\n"));
        assert!(source.ends_with("];\n"));
    }

    #[test]
    fn test_rendering_is_lossless() {
        let data: Vec<u8> = (0..1000u32).map(|i| (i * 37 % 256) as u8).collect();
        for format in [BlobFormat::C, BlobFormat::Rust] {
            assert_eq!(decode(&render(format, "blob", &data)), data);
        }
    }

    #[test]
    fn test_short_reads_still_fill_rows() {
        let data: Vec<u8> = (0..32).collect();
        let mut out = Vec::new();
        let emitter = BlobEmitter::new(BlobFormat::C, "memzip_data").unwrap();
        emitter.emit(Trickle(&data), 32, &mut out).unwrap();

        let mut expected = Vec::new();
        emitter.emit(&data[..], 32, &mut expected).unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_invalid_symbol_rejected() {
        for symbol in ["", "1data", "memzip-data", "memzip data"] {
            let result = BlobEmitter::new(BlobFormat::C, symbol);
            assert!(
                matches!(result, Err(MemzipError::Config(_))),
                "Failed for {:?}",
                symbol
            );
        }
    }

    #[test]
    fn test_reserved_words_rejected() {
        for symbol in ["int", "static", "uint8_t", "_Bool"] {
            let result = BlobEmitter::new(BlobFormat::C, symbol);
            assert!(
                matches!(result, Err(MemzipError::Config(_))),
                "Failed for {:?}",
                symbol
            );
        }
        assert!(matches!(
            BlobEmitter::new(BlobFormat::Rust, "_"),
            Err(MemzipError::Config(_))
        ));
    }

    #[test]
    fn test_keyword_lookalikes_accepted() {
        assert!(BlobEmitter::new(BlobFormat::C, "int_data").is_ok());
        assert!(BlobEmitter::new(BlobFormat::C, "Static").is_ok());
        // Upper-cased to STATIC, which is not a Rust keyword
        assert!(BlobEmitter::new(BlobFormat::Rust, "static").is_ok());
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let emitter = BlobEmitter::new(BlobFormat::Rust, "memzip_data").unwrap();
        let data = [1u8, 2, 3];

        for len in [2u64, 4] {
            let mut out = Vec::new();
            let err = emitter.emit(&data[..], len, &mut out).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidData);
            let partial = String::from_utf8(out).unwrap();
            assert!(!partial.ends_with("];\n"));
        }
    }

    #[test]
    fn test_emit_file() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("in.zip");
        let dest = dir.path().join("out.c");
        let data: Vec<u8> = (0..17).collect();
        fs::write(&archive, &data).unwrap();
        fs::write(&dest, "stale contents that must disappear").unwrap();

        let summary = BlobEmitter::new(BlobFormat::C, "memzip_data")
            .unwrap()
            .emit_file(&archive, &dest)
            .unwrap();

        assert_eq!(summary.bytes, 17);
        assert_eq!(summary.rows, 2);
        let source = fs::read_to_string(&dest).unwrap();
        assert!(!source.contains("stale"));
        assert_eq!(decode(&source), data);
    }

    #[test]
    fn test_emit_file_missing_archive() {
        let dir = tempfile::tempdir().unwrap();
        let result = BlobEmitter::new(BlobFormat::C, "memzip_data")
            .unwrap()
            .emit_file(&dir.path().join("missing.zip"), &dir.path().join("out.c"));
        assert!(matches!(result, Err(MemzipError::Io { .. })));
    }
}
