//! Image construction.
//!
//! This module builds the complete executable image: ELF64 file header, one
//! program header per segment, then the raw text and data bytes. A single
//! deterministic pass with no error conditions; degenerate (empty) segments
//! still produce a structurally valid image.

use object::elf;

use crate::emitter::Emitter;
use crate::layout::{
    data_virtual_address, entry_point, LayoutDescriptor, DATA_FLAGS, EHDR_SIZE, PHDR_COUNT,
    PHDR_SIZE, SEGMENT_ALIGN, TEXT_BASE_ADDR, TEXT_FLAGS, TEXT_OFFSET,
};

/// Builds a loader-conformant executable image from raw text and data bytes.
///
/// Output layout, in order: file header, text program header, data program
/// header, text bytes, data bytes. The text segment is declared at file
/// offset 0, so its mapping also covers the headers; this is format policy,
/// and the entry point compensates by pointing `TEXT_OFFSET` bytes in.
pub fn build_image(text: &[u8], data: &[u8]) -> Vec<u8> {
    let text_size = text.len() as u64;
    let data_size = data.len() as u64;
    let data_offset = TEXT_OFFSET + text_size;
    let data_vaddr = data_virtual_address(text_size);

    tracing::debug!(
        "layout: entry={:#x} text_size={:#x} data_offset={:#x} data_vaddr={:#x}",
        entry_point(),
        text_size,
        data_offset,
        data_vaddr
    );

    let mut o = Emitter::new();

    // ELF file header
    o.write_bytes(&elf::ELFMAG);
    o.write_int(1, elf::ELFCLASS64 as u64);
    o.write_int(1, elf::ELFDATA2LSB as u64);
    o.write_int(1, elf::EV_CURRENT as u64);
    o.write_int(1, elf::ELFOSABI_SYSV as u64);
    o.write_int(1, 0); // ABI version
    o.write_bytes(&[0; 7]); // e_ident padding
    o.write_int(2, elf::ET_EXEC as u64);
    o.write_int(2, elf::EM_X86_64 as u64);
    o.write_int(4, elf::EV_CURRENT as u64);
    o.write_int(8, entry_point());
    o.write_int(8, EHDR_SIZE); // program header table immediately follows
    o.write_int(8, 0); // no section header table
    o.write_int(4, 0); // flags
    o.write_int(2, EHDR_SIZE);
    o.write_int(2, PHDR_SIZE);
    o.write_int(2, PHDR_COUNT);
    o.write_int(2, 0); // section header entry size
    o.write_int(2, 0); // section header count
    o.write_int(2, 0); // section name string table index

    // Text segment descriptor. File offset 0: the mapped region includes the
    // file header and program headers that precede the code.
    LayoutDescriptor {
        flags: TEXT_FLAGS,
        file_offset: 0,
        virtual_address: TEXT_BASE_ADDR,
        file_size: text_size,
        align: SEGMENT_ALIGN,
    }
    .emit(&mut o);

    // Data segment descriptor.
    LayoutDescriptor {
        flags: DATA_FLAGS,
        file_offset: data_offset,
        virtual_address: data_vaddr,
        file_size: data_size,
        align: SEGMENT_ALIGN,
    }
    .emit(&mut o);

    // Segment contents, in file order.
    o.write_bytes(text);
    o.write_bytes(data);

    o.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::DATA_BASE_ADDR;

    // Miniature conforming reader: decode little-endian fields at fixed
    // offsets, as a loader would.
    fn u16_at(image: &[u8], off: usize) -> u16 {
        u16::from_le_bytes(image[off..off + 2].try_into().unwrap())
    }
    fn u32_at(image: &[u8], off: usize) -> u32 {
        u32::from_le_bytes(image[off..off + 4].try_into().unwrap())
    }
    fn u64_at(image: &[u8], off: usize) -> u64 {
        u64::from_le_bytes(image[off..off + 8].try_into().unwrap())
    }

    const TEXT_PHDR: usize = EHDR_SIZE as usize;
    const DATA_PHDR: usize = (EHDR_SIZE + PHDR_SIZE) as usize;

    #[test]
    fn output_length_is_headers_plus_segments() {
        for (text_len, data_len) in [(0usize, 0usize), (1, 0), (0, 1), (10, 5), (1000, 37)] {
            let image = build_image(&vec![0x90; text_len], &vec![0xAA; data_len]);
            assert_eq!(image.len(), 0x40 + 2 * 0x38 + text_len + data_len);
        }
    }

    #[test]
    fn file_header_identifies_an_x86_64_executable() {
        let image = build_image(&[0x90], &[]);
        assert_eq!(&image[0..4], &elf::ELFMAG);
        assert_eq!(image[4], elf::ELFCLASS64);
        assert_eq!(image[5], elf::ELFDATA2LSB);
        assert_eq!(image[6], elf::EV_CURRENT);
        assert_eq!(u16_at(&image, 0x10), elf::ET_EXEC);
        assert_eq!(u16_at(&image, 0x12), elf::EM_X86_64);
        assert_eq!(u32_at(&image, 0x14), elf::EV_CURRENT as u32);
        assert_eq!(u64_at(&image, 0x20), 0x40); // e_phoff
        assert_eq!(u64_at(&image, 0x28), 0); // e_shoff
        assert_eq!(u16_at(&image, 0x34), 0x40); // e_ehsize
        assert_eq!(u16_at(&image, 0x36), 0x38); // e_phentsize
        assert_eq!(u16_at(&image, 0x38), 2); // e_phnum
        assert_eq!(u16_at(&image, 0x3A), 0); // e_shentsize
        assert_eq!(u16_at(&image, 0x3C), 0); // e_shnum
    }

    #[test]
    fn entry_point_targets_first_text_byte() {
        let image = build_image(&[0xCC; 7], &[1, 2, 3]);
        assert_eq!(u64_at(&image, 0x18), TEXT_BASE_ADDR + TEXT_OFFSET);
        assert_eq!(u64_at(&image, 0x18), 0x4000B0);
    }

    #[test]
    fn text_descriptor_round_trips() {
        let image = build_image(&[0x90; 24], &[0; 8]);
        assert_eq!(u32_at(&image, TEXT_PHDR), elf::PT_LOAD);
        assert_eq!(u32_at(&image, TEXT_PHDR + 0x04), elf::PF_R | elf::PF_X);
        assert_eq!(u64_at(&image, TEXT_PHDR + 0x08), 0); // p_offset
        assert_eq!(u64_at(&image, TEXT_PHDR + 0x10), TEXT_BASE_ADDR); // p_vaddr
        assert_eq!(u64_at(&image, TEXT_PHDR + 0x18), TEXT_BASE_ADDR); // p_paddr
        assert_eq!(u64_at(&image, TEXT_PHDR + 0x20), 24); // p_filesz
        assert_eq!(u64_at(&image, TEXT_PHDR + 0x28), 24); // p_memsz
        assert_eq!(u64_at(&image, TEXT_PHDR + 0x30), SEGMENT_ALIGN);
    }

    #[test]
    fn data_descriptor_round_trips() {
        let text = [0x90u8; 24];
        let image = build_image(&text, &[7; 8]);
        let expected_offset = TEXT_OFFSET + 24;
        assert_eq!(u32_at(&image, DATA_PHDR), elf::PT_LOAD);
        assert_eq!(
            u32_at(&image, DATA_PHDR + 0x04),
            elf::PF_R | elf::PF_W | elf::PF_X
        );
        assert_eq!(u64_at(&image, DATA_PHDR + 0x08), expected_offset);
        assert_eq!(
            u64_at(&image, DATA_PHDR + 0x10),
            DATA_BASE_ADDR + expected_offset
        );
        assert_eq!(u64_at(&image, DATA_PHDR + 0x18), DATA_BASE_ADDR + expected_offset);
        assert_eq!(u64_at(&image, DATA_PHDR + 0x20), 8);
        assert_eq!(u64_at(&image, DATA_PHDR + 0x28), 8);
        assert_eq!(u64_at(&image, DATA_PHDR + 0x30), SEGMENT_ALIGN);
    }

    #[test]
    fn segment_bytes_land_after_headers_in_file_order() {
        let text = [0xAA, 0xBB, 0xCC];
        let data = [0x11, 0x22];
        let image = build_image(&text, &data);
        assert_eq!(&image[TEXT_OFFSET as usize..TEXT_OFFSET as usize + 3], &text);
        assert_eq!(&image[TEXT_OFFSET as usize + 3..], &data);
    }

    #[test]
    fn ten_byte_text_five_byte_data_scenario() {
        let image = build_image(&[0; 10], &[1, 2, 3, 4, 5]);
        assert_eq!(image.len(), 191); // 0x40 + 0x70 + 10 + 5
        assert_eq!(u64_at(&image, DATA_PHDR + 0x08), 186); // 0x40 + 0x70 + 10
    }

    #[test]
    fn empty_segments_still_produce_a_valid_image() {
        let image = build_image(&[], &[]);
        assert_eq!(image.len(), 176); // 0x40 + 0x70
        assert_eq!(u64_at(&image, TEXT_PHDR + 0x20), 0);
        assert_eq!(u64_at(&image, TEXT_PHDR + 0x28), 0);
        assert_eq!(u64_at(&image, DATA_PHDR + 0x20), 0);
        assert_eq!(u64_at(&image, DATA_PHDR + 0x28), 0);
        assert_eq!(u64_at(&image, DATA_PHDR + 0x08), TEXT_OFFSET);
    }

    #[test]
    fn build_is_deterministic() {
        let text = [0x48, 0xC7, 0xC0];
        let data = b"hello";
        assert_eq!(build_image(&text, data), build_image(&text, data));
    }
}
