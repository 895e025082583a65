use super::error::{Error, Result};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Compress framed object bytes for storage.
pub fn compress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

/// Invert `compress`.  A corrupt or truncated stream is a
/// `Decompression` error, not a panic.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(bytes);
    let mut framed = Vec::new();
    decoder
        .read_to_end(&mut framed)
        .map_err(|_| Error::Decompression)?;
    Ok(framed)
}

#[cfg(test)]
mod tests {
    use super::{compress, decompress};
    use crate::cas::Error;

    #[test]
    fn round_trip() {
        let framed = b"blob 11\0hello world".to_vec();
        let compressed = compress(&framed).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), framed);
    }

    #[test]
    fn round_trip_empty() {
        let compressed = compress(b"").unwrap();
        assert_eq!(decompress(&compressed).unwrap(), b"");
    }

    #[test]
    fn decompress_garbage() {
        match decompress(b"this is not a zlib stream") {
            Err(Error::Decompression) => (),
            other => panic!("expected Decompression, got {:?}", other),
        }
    }

    #[test]
    fn decompress_truncated() {
        let compressed = compress(b"blob 2\0hi").unwrap();
        match decompress(&compressed[..compressed.len() / 2]) {
            Err(Error::Decompression) => (),
            other => panic!("expected Decompression, got {:?}", other),
        }
    }
}
