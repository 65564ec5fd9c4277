//! Layout management.
//!
//! This module defines the fixed layout constants of the output image and the
//! `LayoutDescriptor` that describes how the loader should map one segment.
//! The image carries exactly two loadable segments (text, then data) and no
//! section headers, so every offset here is a compile-time constant of the
//! format.

use object::elf;

use crate::emitter::Emitter;

/// Virtual address at which the text segment is mapped.
pub const TEXT_BASE_ADDR: u64 = 0x400000;
/// Virtual address class for the data segment mapping.
pub const DATA_BASE_ADDR: u64 = 0x600000;
/// Required alignment recorded for both loadable segments.
pub const SEGMENT_ALIGN: u64 = 0x200000;

/// Size of the ELF64 file header.
pub const EHDR_SIZE: u64 = 0x40;
/// Size of one ELF64 program header entry.
pub const PHDR_SIZE: u64 = 0x38;
/// Number of program header entries: one per segment.
pub const PHDR_COUNT: u64 = 2;

/// File offset of the first text byte: everything before it is the file
/// header plus the program header table.
pub const TEXT_OFFSET: u64 = EHDR_SIZE + PHDR_COUNT * PHDR_SIZE;

/// Segment permissions for the text segment (read + execute).
pub const TEXT_FLAGS: u32 = elf::PF_R | elf::PF_X;
/// Segment permissions for the data segment (read + write + execute).
pub const DATA_FLAGS: u32 = elf::PF_R | elf::PF_W | elf::PF_X;

/// The virtual address of the first text byte once mapped.
///
/// The text segment is mapped at `TEXT_BASE_ADDR` with file offset 0, so the
/// headers occupy the start of the mapping and execution begins
/// `TEXT_OFFSET` bytes in. This value is written to the file header's
/// entry-point field.
pub const fn entry_point() -> u64 {
    TEXT_BASE_ADDR + TEXT_OFFSET
}

/// The virtual address of the first data byte once mapped.
///
/// The data segment's address depends on the text size, because its file
/// offset (headers + text) is folded into the mapping. Any machine code that
/// refers to the data segment must obtain the address from here rather than
/// bake in a literal.
pub const fn data_virtual_address(text_size: u64) -> u64 {
    DATA_BASE_ADDR + TEXT_OFFSET + text_size
}

/// Describes how one segment is placed in the file and in memory.
///
/// Emitted as a single ELF64 program header entry. On this target the
/// physical address mirrors the virtual address, and the memory size mirrors
/// the file size (no zero-fill expansion).
pub struct LayoutDescriptor {
    /// Segment permissions (`PF_*` bits).
    pub flags: u32,
    /// Offset of the segment's first byte within the file.
    pub file_offset: u64,
    /// Virtual address at which the segment is mapped.
    pub virtual_address: u64,
    /// Size of the segment in the file, equal to its size in memory.
    pub file_size: u64,
    /// Required alignment of the mapping.
    pub align: u64,
}

impl LayoutDescriptor {
    /// Emits this descriptor as a `PHDR_SIZE`-byte program header entry.
    pub fn emit(&self, o: &mut Emitter) {
        o.write_int(4, elf::PT_LOAD as u64);
        o.write_int(4, self.flags as u64);
        o.write_int(8, self.file_offset);
        o.write_int(8, self.virtual_address);
        o.write_int(8, self.virtual_address); // physical address, irrelevant on linux
        o.write_int(8, self.file_size);
        o.write_int(8, self.file_size); // memory size, no zero-fill in this format
        o.write_int(8, self.align);
    }
}
