//! Binary encode/decode for grid shapes.
//!
//! All integers and floats are little-endian. A shape is written as three
//! tuples in fixed order: resolution, spacing, origin. Each tuple is a `u8`
//! axis count followed by one value per axis (`u64` for resolution, `f64`
//! for spacing and origin). Concrete grids write their shape with
//! [`write_shape2`]/[`write_shape3`] first and append their own payload.

use std::io::{Read, Write};

use glam::{DVec2, DVec3, UVec2, UVec3};
use smallvec::SmallVec;

use crate::error::GridError;
use crate::shape::{GridShape2, GridShape3};

/// Decoded tuple before its axis count is checked.
type AxisTuple<T> = SmallVec<[T; 3]>;

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), GridError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), GridError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian f64.
pub fn write_f64_le(w: &mut dyn Write, v: f64) -> Result<(), GridError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, GridError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, GridError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a little-endian f64.
pub fn read_f64_le(r: &mut dyn Read) -> Result<f64, GridError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

// ── Tuples ──────────────────────────────────────────────────────

fn write_u64_tuple(w: &mut dyn Write, values: &[u64]) -> Result<(), GridError> {
    write_u8(w, values.len() as u8)?;
    for &v in values {
        write_u64_le(w, v)?;
    }
    Ok(())
}

fn write_f64_tuple(w: &mut dyn Write, values: &[f64]) -> Result<(), GridError> {
    write_u8(w, values.len() as u8)?;
    for &v in values {
        write_f64_le(w, v)?;
    }
    Ok(())
}

fn read_axis_count(r: &mut dyn Read, expected: usize) -> Result<usize, GridError> {
    let found = read_u8(r)? as usize;
    if found != expected {
        return Err(GridError::AxisCountMismatch { expected, found });
    }
    Ok(found)
}

fn read_u64_tuple(r: &mut dyn Read, expected: usize) -> Result<AxisTuple<u64>, GridError> {
    let n = read_axis_count(r, expected)?;
    let mut out = AxisTuple::with_capacity(n);
    for _ in 0..n {
        out.push(read_u64_le(r)?);
    }
    Ok(out)
}

fn read_f64_tuple(r: &mut dyn Read, expected: usize) -> Result<AxisTuple<f64>, GridError> {
    let n = read_axis_count(r, expected)?;
    let mut out = AxisTuple::with_capacity(n);
    for _ in 0..n {
        out.push(read_f64_le(r)?);
    }
    Ok(out)
}

fn read_resolution(r: &mut dyn Read, expected: usize) -> Result<AxisTuple<u32>, GridError> {
    read_u64_tuple(r, expected)?
        .into_iter()
        .enumerate()
        .map(|(axis, value)| {
            u32::try_from(value).map_err(|_| GridError::ResolutionOverflow { axis, value })
        })
        .collect()
}

// ── Shape encode/decode ─────────────────────────────────────────

/// Encode a 2-D shape: resolution, spacing, origin.
pub fn write_shape2(w: &mut dyn Write, shape: &GridShape2) -> Result<(), GridError> {
    let res = shape.resolution();
    write_u64_tuple(w, &[res.x as u64, res.y as u64])?;
    write_f64_tuple(w, &shape.grid_spacing().to_array())?;
    write_f64_tuple(w, &shape.origin().to_array())?;
    Ok(())
}

/// Decode a 2-D shape written by [`write_shape2`].
///
/// The decoded geometry goes through the same validation as
/// [`GridShape2::new`].
pub fn read_shape2(r: &mut dyn Read) -> Result<GridShape2, GridError> {
    let res = read_resolution(r, 2)?;
    let spacing = read_f64_tuple(r, 2)?;
    let origin = read_f64_tuple(r, 2)?;
    GridShape2::new(
        UVec2::new(res[0], res[1]),
        DVec2::new(spacing[0], spacing[1]),
        DVec2::new(origin[0], origin[1]),
    )
    .inspect_err(|e| tracing::debug!(error = %e, "rejected decoded 2-D shape"))
}

/// Encode a 3-D shape: resolution, spacing, origin.
pub fn write_shape3(w: &mut dyn Write, shape: &GridShape3) -> Result<(), GridError> {
    let res = shape.resolution();
    write_u64_tuple(w, &[res.x as u64, res.y as u64, res.z as u64])?;
    write_f64_tuple(w, &shape.grid_spacing().to_array())?;
    write_f64_tuple(w, &shape.origin().to_array())?;
    Ok(())
}

/// Decode a 3-D shape written by [`write_shape3`].
///
/// The decoded geometry goes through the same validation as
/// [`GridShape3::new`].
pub fn read_shape3(r: &mut dyn Read) -> Result<GridShape3, GridError> {
    let res = read_resolution(r, 3)?;
    let spacing = read_f64_tuple(r, 3)?;
    let origin = read_f64_tuple(r, 3)?;
    GridShape3::new(
        UVec3::new(res[0], res[1], res[2]),
        DVec3::new(spacing[0], spacing[1], spacing[2]),
        DVec3::new(origin[0], origin[1], origin[2]),
    )
    .inspect_err(|e| tracing::debug!(error = %e, "rejected decoded 3-D shape"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn shape3() -> GridShape3 {
        GridShape3::new(
            UVec3::new(7, 1, 300),
            DVec3::new(0.125, 3.0, 1e-6),
            DVec3::new(-5.5, 0.0, 1e9),
        )
        .unwrap()
    }

    #[test]
    fn shape3_survives_encode_decode() {
        let mut buf = Vec::new();
        write_shape3(&mut buf, &shape3()).unwrap();
        let decoded = read_shape3(&mut Cursor::new(&buf)).unwrap();
        assert!(decoded.has_same_shape(&shape3()));
        assert_eq!(decoded.bounding_box(), shape3().bounding_box());
    }

    #[test]
    fn field_order_is_resolution_spacing_origin() {
        let mut buf = Vec::new();
        write_shape3(&mut buf, &shape3()).unwrap();
        // 3 tuples of (1 count byte + 3 * 8 value bytes).
        assert_eq!(buf.len(), 3 * (1 + 24));
        assert_eq!(buf[0], 3);
        assert_eq!(u64::from_le_bytes(buf[1..9].try_into().unwrap()), 7);
        assert_eq!(buf[25], 3);
        assert_eq!(f64::from_le_bytes(buf[26..34].try_into().unwrap()), 0.125);
        assert_eq!(buf[50], 3);
        assert_eq!(f64::from_le_bytes(buf[51..59].try_into().unwrap()), -5.5);
    }

    #[test]
    fn truncated_stream_is_malformed() {
        let mut buf = Vec::new();
        write_shape3(&mut buf, &shape3()).unwrap();
        for cut in [0, 1, 9, 25, 60, buf.len() - 1] {
            let result = read_shape3(&mut Cursor::new(&buf[..cut]));
            assert!(
                matches!(result, Err(GridError::MalformedStream { .. })),
                "cut at {cut} should be malformed, got {result:?}"
            );
        }
    }

    #[test]
    fn wrong_axis_count_is_rejected() {
        let shape2 = GridShape2::new(UVec2::new(2, 2), DVec2::ONE, DVec2::ZERO).unwrap();
        let mut buf = Vec::new();
        write_shape2(&mut buf, &shape2).unwrap();
        assert!(matches!(
            read_shape3(&mut Cursor::new(&buf)),
            Err(GridError::AxisCountMismatch {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn oversized_resolution_is_rejected() {
        let mut buf = Vec::new();
        write_u64_tuple(&mut buf, &[1, u32::MAX as u64 + 1]).unwrap();
        write_f64_tuple(&mut buf, &[1.0, 1.0]).unwrap();
        write_f64_tuple(&mut buf, &[0.0, 0.0]).unwrap();
        assert!(matches!(
            read_shape2(&mut Cursor::new(&buf)),
            Err(GridError::ResolutionOverflow { axis: 1, .. })
        ));
    }

    #[test]
    fn invalid_decoded_geometry_is_rejected() {
        let mut buf = Vec::new();
        write_u64_tuple(&mut buf, &[1, 1]).unwrap();
        write_f64_tuple(&mut buf, &[1.0, -2.0]).unwrap();
        write_f64_tuple(&mut buf, &[0.0, 0.0]).unwrap();
        assert!(matches!(
            read_shape2(&mut Cursor::new(&buf)),
            Err(GridError::InvalidSpacing { axis: 1, .. })
        ));
    }

    #[test]
    fn cell_count_overflow_is_rejected_on_decode() {
        let mut buf = Vec::new();
        write_u64_tuple(&mut buf, &[u32::MAX as u64; 3]).unwrap();
        write_f64_tuple(&mut buf, &[1.0; 3]).unwrap();
        write_f64_tuple(&mut buf, &[0.0; 3]).unwrap();
        assert!(matches!(
            read_shape3(&mut Cursor::new(&buf)),
            Err(GridError::CellCountOverflow { .. })
        ));
    }

    #[test]
    fn infinite_extent_is_rejected_on_decode() {
        let mut buf = Vec::new();
        write_u64_tuple(&mut buf, &[2, 1]).unwrap();
        write_f64_tuple(&mut buf, &[f64::MAX, 1.0]).unwrap();
        write_f64_tuple(&mut buf, &[0.0, 0.0]).unwrap();
        assert!(matches!(
            read_shape2(&mut Cursor::new(&buf)),
            Err(GridError::NonFiniteExtent { axis: 0, .. })
        ));
    }
}
