//! Demo machine-code payload.
//!
//! The x86_64 sequence embedded by the CLI: write a message to stdout via the
//! legacy `int 0x80` interface, then exit cleanly. The message bytes live in
//! the data segment, so the code needs the data segment's mapped address.
//! That address depends on the code's own length; since every encoding below
//! is fixed-width, callers assemble once with placeholder operands to learn
//! the length, compute the real address from the layout, and assemble again.

use crate::emitter::Emitter;

/// Assembles the hello-world text segment.
///
/// `message_addr` is the virtual address of the message in the mapped data
/// segment; `message_len` its length in bytes. The legacy syscall interface
/// only sees 32-bit registers, which the fixed data base address stays well
/// within.
pub fn hello_world_text(message_addr: u32, message_len: u8) -> Vec<u8> {
    let mut o = Emitter::new();

    // mov rax, 4 (sys_write)
    o.write_bytes(&[0x48, 0xC7, 0xC0, 0x04, 0x00, 0x00, 0x00]);
    // mov rbx, 1 (stdout)
    o.write_bytes(&[0x48, 0xC7, 0xC3, 0x01, 0x00, 0x00, 0x00]);
    // mov rdx, message_len
    o.write_bytes(&[0x48, 0xC7, 0xC2]);
    o.write_int(4, message_len as u64);
    // mov rcx, message_addr
    o.write_bytes(&[0x48, 0xC7, 0xC1]);
    o.write_int(4, message_addr as u64);
    // int 0x80
    o.write_bytes(&[0xCD, 0x80]);

    // mov eax, 1 (sys_exit)
    o.write_bytes(&[0xB8, 0x01, 0x00, 0x00, 0x00]);
    // mov ebx, 0 (exit status)
    o.write_bytes(&[0xBB, 0x00, 0x00, 0x00, 0x00]);
    // int 0x80
    o.write_bytes(&[0xCD, 0x80]);

    o.into_bytes()
}
