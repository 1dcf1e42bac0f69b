// Fixed-width big-endian block codec
// Splits a file into integer blocks and writes integers back as byte blocks

use crate::error::{Result, RsaError};
use log::info;
use num_bigint::BigUint;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Read a file in fixed-size chunks, each interpreted as a big-endian
/// unsigned integer. A final short chunk is converted at its natural width.
pub fn read_blocks(path: &Path, block_len: usize) -> Result<Vec<BigUint>> {
    let mut file = File::open(path)?;
    let mut blocks = Vec::new();
    if block_len == 0 {
        return Ok(blocks);
    }

    let mut buf = vec![0u8; block_len];
    loop {
        let filled = fill_chunk(&mut file, &mut buf)?;
        if filled == 0 {
            break;
        }
        blocks.push(BigUint::from_bytes_be(&buf[..filled]));
    }

    Ok(blocks)
}

/// Read until the buffer is full or the file ends; returns the bytes read
fn fill_chunk(file: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let read = file.read(&mut buf[filled..])?;
        if read == 0 {
            break;
        }
        filled += read;
    }
    Ok(filled)
}

/// Write each integer as exactly `block_len` big-endian bytes, left-padded
/// with zeros. Errors if any block does not fit the width.
pub fn write_blocks(blocks: &[BigUint], path: &Path, block_len: usize) -> Result<()> {
    let mut file = File::create(path)?;

    for block in blocks {
        let bytes = block.to_bytes_be();
        if bytes.len() > block_len {
            return Err(RsaError::BlockTooWide {
                width: block_len,
                needed: bytes.len(),
            });
        }

        let mut chunk = vec![0u8; block_len];
        chunk[block_len - bytes.len()..].copy_from_slice(&bytes);
        file.write_all(&chunk)?;
    }

    info!("wrote {} blocks to {}", blocks.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_blocks_round_trip_aligned() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("plain.bin");
        let dst = dir.path().join("copy.bin");

        // Leading zeros inside a block must survive the fixed-width write
        let data = [0u8, 1, 2, 3, 0, 0, 255, 7, 9, 8, 7, 6];
        fs::write(&src, data).unwrap();

        let blocks = read_blocks(&src, 4).unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], BigUint::from(0x00010203u32));

        write_blocks(&blocks, &dst, 4).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), data);
    }

    #[test]
    fn test_blocks_short_tail_is_left_padded() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("plain.bin");
        let dst = dir.path().join("copy.bin");

        fs::write(&src, [1u8, 2, 3, 4, 5, 6]).unwrap();

        let blocks = read_blocks(&src, 4).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1], BigUint::from(0x0506u32));

        // The two-byte tail comes back as a full-width block
        write_blocks(&blocks, &dst, 4).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), [1u8, 2, 3, 4, 0, 0, 5, 6]);
    }

    #[test]
    fn test_write_blocks_rejects_oversized_value() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("out.bin");

        let blocks = [BigUint::from(0x01020304u32)];
        let result = write_blocks(&blocks, &dst, 2);
        assert!(matches!(
            result,
            Err(RsaError::BlockTooWide {
                width: 2,
                needed: 4
            })
        ));
    }

    #[test]
    fn test_read_blocks_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("empty.bin");
        fs::write(&src, b"").unwrap();

        assert!(read_blocks(&src, 4).unwrap().is_empty());
    }
}
