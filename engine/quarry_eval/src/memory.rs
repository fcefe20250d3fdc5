//! Segmented memory and fixed-width integer reads.
//!
//! A scan's addressable content arrives as an ordered list of blocks.
//! Blocks are not guaranteed sorted or disjoint; a read resolves to
//! the first block, in list order, that fully contains it. No merging
//! or overlap arbitration is attempted.

use tracing::trace;

use quarry_ir::ReadWidth;

use crate::value::Value;

/// A contiguous segment of scanned content at an absolute base offset.
#[derive(Clone, Debug)]
pub struct MemoryBlock {
    base: u64,
    data: Vec<u8>,
}

impl MemoryBlock {
    pub fn new(base: u64, data: Vec<u8>) -> Self {
        MemoryBlock { base, data }
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether `[offset, offset + bytes)` lies fully inside this block.
    fn contains(&self, offset: u64, bytes: u64) -> bool {
        let Some(end) = offset.checked_add(bytes) else {
            return false;
        };
        let block_end = self.base.saturating_add(self.data.len() as u64);
        offset >= self.base && end <= block_end
    }
}

/// Read a fixed-width integer at an absolute offset, widened to 64
/// bits (sign-extended for signed widths).
///
/// Bytes decode little-endian regardless of host so the same rule
/// produces the same verdict on every target. Returns `Undef` when no
/// block contains the full read.
pub fn read_integer(blocks: &[MemoryBlock], offset: u64, width: ReadWidth) -> Value {
    let bytes = width.bytes() as u64;
    for block in blocks {
        if block.contains(offset, bytes) {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "in-block offset is bounded by the block's usize length"
            )]
            let start = (offset - block.base) as usize;
            return decode(&block.data[start..start + width.bytes()], width);
        }
    }
    trace!(offset, bytes, "memory read outside every block");
    Value::Undef
}

/// Reinterpret `raw` (exactly `width.bytes()` long) as a little-endian
/// integer of the given width.
fn decode(raw: &[u8], width: ReadWidth) -> Value {
    debug_assert_eq!(raw.len(), width.bytes());
    let n = match width {
        ReadWidth::U8 => i64::from(raw[0]),
        ReadWidth::I8 => i64::from(i8::from_le_bytes([raw[0]])),
        ReadWidth::U16 => i64::from(u16::from_le_bytes([raw[0], raw[1]])),
        ReadWidth::I16 => i64::from(i16::from_le_bytes([raw[0], raw[1]])),
        ReadWidth::U32 => i64::from(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]])),
        ReadWidth::I32 => i64::from(i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]])),
    };
    Value::Int(n)
}
