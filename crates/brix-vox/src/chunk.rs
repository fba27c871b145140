//! Low-level chunk stream parser.
//!
//! A model file body is a sequence of chunks, each laid out as:
//! 4-byte identifier, u32-le content length, u32-le children length,
//! content bytes, then the children as a nested chunk stream. The parser
//! builds the raw tree without interpreting chunk contents; the reader
//! layer gives the recognized kinds their meaning.

use crate::error::{Result, VoxError};

/// One parsed chunk with its raw content and child chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChunk {
    /// 4-byte chunk identifier (e.g. `MAIN`, `SIZE`, `XYZI`).
    pub id: [u8; 4],
    /// Raw content bytes.
    pub content: Vec<u8>,
    /// Nested child chunks.
    pub children: Vec<RawChunk>,
}

impl RawChunk {
    /// The first child with the given identifier.
    pub fn child(&self, id: &[u8; 4]) -> Option<&RawChunk> {
        self.children.iter().find(|c| &c.id == id)
    }
}

/// Parse a chunk stream into a tree.
pub fn parse_chunks(bytes: &[u8]) -> Result<Vec<RawChunk>> {
    let mut chunks = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let header = take(bytes, pos, 12)?;
        let id = [header[0], header[1], header[2], header[3]];
        let content_len = read_u32(&header[4..8]) as usize;
        let children_len = read_u32(&header[8..12]) as usize;

        let content = take(bytes, pos + 12, content_len)?.to_vec();
        let child_bytes = take(bytes, pos + 12 + content_len, children_len)?;
        let children = if child_bytes.is_empty() {
            Vec::new()
        } else {
            parse_chunks(child_bytes)?
        };

        pos += 12 + content_len + children_len;
        chunks.push(RawChunk {
            id,
            content,
            children,
        });
    }
    Ok(chunks)
}

/// Bounds-checked slice of `len` bytes at `offset`.
fn take(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let end = offset
        .checked_add(len)
        .ok_or_else(|| VoxError::truncated(usize::MAX, bytes.len()))?;
    bytes
        .get(offset..end)
        .ok_or_else(|| VoxError::truncated(end, bytes.len()))
}

/// Little-endian u32 from a 4-byte slice.
pub(crate) fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_bytes(id: &[u8; 4], content: &[u8], children: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(id);
        out.extend_from_slice(&(content.len() as u32).to_le_bytes());
        out.extend_from_slice(&(children.len() as u32).to_le_bytes());
        out.extend_from_slice(content);
        out.extend_from_slice(children);
        out
    }

    #[test]
    fn test_parse_flat_chunks() {
        let mut bytes = chunk_bytes(b"SIZE", &[1, 0, 0, 0], &[]);
        bytes.extend(chunk_bytes(b"XYZI", &[0, 0, 0, 0], &[]));
        let chunks = parse_chunks(&bytes).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(&chunks[0].id, b"SIZE");
        assert_eq!(chunks[0].content, vec![1, 0, 0, 0]);
        assert_eq!(&chunks[1].id, b"XYZI");
        assert!(chunks[1].children.is_empty());
    }

    #[test]
    fn test_parse_nested_chunks() {
        let size = chunk_bytes(b"SIZE", &[2, 0, 0, 0], &[]);
        let main = chunk_bytes(b"MAIN", &[], &size);
        let chunks = parse_chunks(&main).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(&chunks[0].id, b"MAIN");
        assert!(chunks[0].content.is_empty());
        assert_eq!(chunks[0].children.len(), 1);
        assert_eq!(&chunks[0].children[0].id, b"SIZE");
        assert!(chunks[0].child(b"SIZE").is_some());
        assert!(chunks[0].child(b"XYZI").is_none());
    }

    #[test]
    fn test_truncated_header_is_an_error() {
        let bytes = b"SIZ";
        assert!(matches!(
            parse_chunks(bytes),
            Err(VoxError::Truncated { .. })
        ));
    }

    #[test]
    fn test_truncated_content_is_an_error() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"SIZE");
        bytes.extend_from_slice(&12u32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&[0, 0]); // 2 of the declared 12 bytes
        assert!(matches!(
            parse_chunks(&bytes),
            Err(VoxError::Truncated { .. })
        ));
    }
}
