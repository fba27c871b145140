//! Model reader: chunk tree to dense voxel volume.

use std::path::Path;

use brix_grid::{Axis, Grid3};

use crate::chunk::{parse_chunks, read_u32, RawChunk};
use crate::error::{Result, VoxError};

const MAIN: &[u8; 4] = b"MAIN";
const SIZE: &[u8; 4] = b"SIZE";
const XYZI: &[u8; 4] = b"XYZI";

/// Length of the file header preceding the chunk stream.
const FILE_HEADER_LEN: usize = 8;

/// Read a voxel model file into a dense volume.
///
/// The returned grid holds `0` for empty cells and the record's color
/// index elsewhere, trimmed so that no leading or trailing slab along any
/// axis is entirely zero. An all-zero model trims to an empty grid.
pub fn read_vox(path: impl AsRef<Path>) -> Result<Grid3<u8>> {
    let data = std::fs::read(path)?;
    read_vox_from_buffer(&data)
}

/// Read a voxel model from an in-memory byte buffer.
pub fn read_vox_from_buffer(data: &[u8]) -> Result<Grid3<u8>> {
    // Magic and version; the chunk stream carries everything we use.
    let body = data
        .get(FILE_HEADER_LEN..)
        .ok_or_else(|| VoxError::truncated(FILE_HEADER_LEN, data.len()))?;

    let chunks = parse_chunks(body)?;
    let main = chunks
        .iter()
        .find(|c| &c.id == MAIN)
        .ok_or(VoxError::MissingChunk("MAIN"))?;
    let size = main.child(SIZE).ok_or(VoxError::MissingChunk("SIZE"))?;
    let cloud = main.child(XYZI).ok_or(VoxError::MissingChunk("XYZI"))?;

    let (x_len, y_len, z_len) = parse_size(size)?;
    let mut volume = Grid3::new(x_len, y_len, z_len, 0u8);
    for [x, y, z, color] in parse_voxels(cloud)? {
        if (x as usize) >= x_len || (y as usize) >= y_len || (z as usize) >= z_len {
            return Err(VoxError::VoxelOutOfBounds {
                x,
                y,
                z,
                size_x: x_len,
                size_y: y_len,
                size_z: z_len,
            });
        }
        volume[(x as usize, y as usize, z as usize)] = color;
    }

    Ok(trim_empty_slabs(&volume))
}

/// Three u32-le extents from a size chunk.
fn parse_size(chunk: &RawChunk) -> Result<(usize, usize, usize)> {
    let content = &chunk.content;
    if content.len() < 12 {
        return Err(VoxError::truncated(12, content.len()));
    }
    Ok((
        read_u32(&content[0..4]) as usize,
        read_u32(&content[4..8]) as usize,
        read_u32(&content[8..12]) as usize,
    ))
}

/// Voxel records from a cloud chunk: `x, y, z, color`, one byte each.
fn parse_voxels(chunk: &RawChunk) -> Result<impl Iterator<Item = [u8; 4]> + '_> {
    let content = &chunk.content;
    if content.len() < 4 {
        return Err(VoxError::truncated(4, content.len()));
    }
    let count = read_u32(&content[0..4]) as usize;
    let needed = 4 + 4 * count;
    let records = content
        .get(4..needed)
        .ok_or_else(|| VoxError::truncated(needed, content.len()))?;
    Ok(records
        .chunks_exact(4)
        .map(|r| [r[0], r[1], r[2], r[3]]))
}

/// Drop leading and trailing all-zero slabs along every axis, keeping the
/// tight bounding box of the nonzero content.
fn trim_empty_slabs(volume: &Grid3<u8>) -> Grid3<u8> {
    let spans = (
        nonzero_span(volume, Axis::X),
        nonzero_span(volume, Axis::Y),
        nonzero_span(volume, Axis::Z),
    );
    let ((x_lo, x_hi), (y_lo, y_hi), (z_lo, z_hi)) = match spans {
        (Some(x), Some(y), Some(z)) => (x, y, z),
        _ => return Grid3::new(0, 0, 0, 0),
    };

    let mut out = Grid3::new(x_hi - x_lo + 1, y_hi - y_lo + 1, z_hi - z_lo + 1, 0u8);
    let (x_len, y_len, z_len) = out.dims();
    for x in 0..x_len {
        for y in 0..y_len {
            for z in 0..z_len {
                out[(x, y, z)] = volume[(x + x_lo, y + y_lo, z + z_lo)];
            }
        }
    }
    out
}

/// Inclusive first..last nonzero slab indices along `axis`, or `None`
/// when the volume has no nonzero cell.
fn nonzero_span(volume: &Grid3<u8>, axis: Axis) -> Option<(usize, usize)> {
    let len = volume.len_along(axis);
    let nonzero = |k: usize| volume.slice(axis, k).iter().any(|&v| v != 0);
    let first = (0..len).find(|&k| nonzero(k))?;
    let last = (0..len).rev().find(|&k| nonzero(k))?;
    Some((first, last))
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

    fn model_bytes(size: (u32, u32, u32), voxels: &[(u8, u8, u8, u8)]) -> Vec<u8> {
        let mut size_content = Vec::new();
        size_content.extend_from_slice(&size.0.to_le_bytes());
        size_content.extend_from_slice(&size.1.to_le_bytes());
        size_content.extend_from_slice(&size.2.to_le_bytes());

        let mut cloud_content = Vec::new();
        cloud_content.extend_from_slice(&(voxels.len() as u32).to_le_bytes());
        for &(x, y, z, color) in voxels {
            cloud_content.extend_from_slice(&[x, y, z, color]);
        }

        let mut children = chunk_bytes(b"SIZE", &size_content, &[]);
        children.extend(chunk_bytes(b"XYZI", &cloud_content, &[]));
        let main = chunk_bytes(b"MAIN", &[], &children);

        let mut file = Vec::new();
        file.extend_from_slice(b"VOX ");
        file.extend_from_slice(&150u32.to_le_bytes());
        file.extend_from_slice(&main);
        file
    }

    #[test]
    fn test_read_single_voxel_model() {
        let bytes = model_bytes((3, 3, 3), &[(1, 1, 1, 5)]);
        let volume = read_vox_from_buffer(&bytes).unwrap();
        // Trimmed to the single occupied cell.
        assert_eq!(volume.dims(), (1, 1, 1));
        assert_eq!(volume[(0, 0, 0)], 5);
    }

    #[test]
    fn test_trim_keeps_content_on_the_boundary() {
        let bytes = model_bytes((3, 3, 3), &[(0, 0, 0, 1), (2, 2, 2, 9)]);
        let volume = read_vox_from_buffer(&bytes).unwrap();
        assert_eq!(volume.dims(), (3, 3, 3));
        assert_eq!(volume[(0, 0, 0)], 1);
        assert_eq!(volume[(2, 2, 2)], 9);
        assert_eq!(volume[(1, 1, 1)], 0);
    }

    #[test]
    fn test_trim_drops_empty_margins() {
        let bytes = model_bytes((6, 5, 4), &[(2, 1, 1, 3), (3, 2, 2, 3)]);
        let volume = read_vox_from_buffer(&bytes).unwrap();
        assert_eq!(volume.dims(), (2, 2, 2));
        assert_eq!(volume[(0, 0, 0)], 3);
        assert_eq!(volume[(1, 1, 1)], 3);
    }

    #[test]
    fn test_all_zero_model_trims_to_empty() {
        let bytes = model_bytes((2, 2, 2), &[]);
        let volume = read_vox_from_buffer(&bytes).unwrap();
        assert_eq!(volume.dims(), (0, 0, 0));
    }

    #[test]
    fn test_missing_size_chunk() {
        let mut cloud_content = Vec::new();
        cloud_content.extend_from_slice(&0u32.to_le_bytes());
        let children = chunk_bytes(b"XYZI", &cloud_content, &[]);
        let main = chunk_bytes(b"MAIN", &[], &children);
        let mut file = Vec::new();
        file.extend_from_slice(b"VOX ");
        file.extend_from_slice(&150u32.to_le_bytes());
        file.extend_from_slice(&main);
        assert!(matches!(
            read_vox_from_buffer(&file),
            Err(VoxError::MissingChunk("SIZE"))
        ));
    }

    #[test]
    fn test_header_shorter_than_eight_bytes() {
        assert!(matches!(
            read_vox_from_buffer(b"VOX"),
            Err(VoxError::Truncated { .. })
        ));
    }

    #[test]
    fn test_voxel_outside_declared_size() {
        let bytes = model_bytes((2, 2, 2), &[(5, 0, 0, 1)]);
        assert!(matches!(
            read_vox_from_buffer(&bytes),
            Err(VoxError::VoxelOutOfBounds { x: 5, .. })
        ));
    }

    #[test]
    fn test_voxel_records_shorter_than_count() {
        let mut cloud_content = Vec::new();
        cloud_content.extend_from_slice(&3u32.to_le_bytes());
        cloud_content.extend_from_slice(&[0, 0, 0, 1]); // 1 of 3 records
        let mut size_content = Vec::new();
        for extent in [2u32, 2, 2] {
            size_content.extend_from_slice(&extent.to_le_bytes());
        }
        let mut children = chunk_bytes(b"SIZE", &size_content, &[]);
        children.extend(chunk_bytes(b"XYZI", &cloud_content, &[]));
        let main = chunk_bytes(b"MAIN", &[], &children);
        let mut file = Vec::new();
        file.extend_from_slice(b"VOX ");
        file.extend_from_slice(&150u32.to_le_bytes());
        file.extend_from_slice(&main);
        assert!(matches!(
            read_vox_from_buffer(&file),
            Err(VoxError::Truncated { .. })
        ));
    }
}
