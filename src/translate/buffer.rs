//! Field-by-field buffer translation.
//!
//! Walks a message definition in map order and moves every field between a
//! source-shaped and a destination-shaped buffer with
//! [`copy_bits`](crate::translate::bitcopy::copy_bits). Cumulative position
//! accounting is signed: the padding between consecutive fields may be
//! negative when the map describes bit-fields whose intra-byte order differs
//! between the two compilers.

use thiserror::Error;

use crate::map::types::message::Message;
use crate::translate::bitcopy::copy_bits;

/// Which role the map's offsets play during one translation call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    /// Read at `src_offset`, write at `dst_offset`.
    Forward,
    /// Read at `dst_offset`, write at `src_offset`. The offset names keep
    /// their map meaning; only the role is swapped.
    Reverse,
}

/// Errors produced while translating a buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslateError {
    #[error(
        "Destination buffer too small: field '{op_name}' ends at bit {end_bit} \
         but the buffer holds {capacity_bits} bits"
    )]
    BufferTooSmall {
        op_name: String,
        end_bit: i64,
        capacity_bits: i64,
    },
}

/// Translates `src` into `dst` according to `msg`, returning the number of
/// bytes covered in `dst`, rounded up to whole bytes.
///
/// The whole destination is zeroed first so unwritten bit ranges come out
/// deterministic. Fields are visited in map order; when destination ranges
/// overlap, the later field wins within the overlap. Each field is size-checked
/// against the destination before it is copied; on overflow the call stops
/// with [`TranslateError::BufferTooSmall`] and no further fields are
/// processed. Source bits past the end of `src` read as zero.
///
/// The reported size counts gaps: it is the covered extent of the
/// destination, not the sum of field widths, so a caller may safely read
/// that many bytes back out of `dst`.
pub fn translate_buffer(
    dst: &mut [u8],
    src: &[u8],
    msg: &Message,
    direction: Direction,
) -> Result<usize, TranslateError> {
    let capacity_bits: i64 = dst.len() as i64 * 8;

    dst.fill(0);

    let mut bits_written: i64 = 0;

    for field in &msg.fields {
        let (read_offset, write_offset) = match direction {
            Direction::Forward => (field.src_offset, field.dst_offset),
            Direction::Reverse => (field.dst_offset, field.src_offset),
        };

        // Padding between the previous field's end and this field's start.
        // Negative for reordered or overlapping bit-fields.
        let gap: i64 = i64::from(write_offset) - bits_written;

        let end_bit: i64 = bits_written + gap + i64::from(field.bit_length);
        if end_bit > capacity_bits {
            return Err(TranslateError::BufferTooSmall {
                op_name: field.op_name.clone(),
                end_bit,
                capacity_bits,
            });
        }

        copy_bits(
            dst,
            write_offset as usize,
            src,
            read_offset as usize,
            field.bit_length as usize,
        );

        bits_written += i64::from(field.bit_length) + gap;
    }

    // Every field end was checked against the capacity, so the rounded-up
    // byte count cannot exceed the destination.
    debug_assert!(bits_written >= 0 && bits_written <= capacity_bits);
    Ok((bits_written as u64).div_ceil(8) as usize)
}
