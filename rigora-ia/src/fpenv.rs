//! Floating-point environment setup.
//!
//! The interval kernel requires the SSE control/status register to round
//! toward negative infinity, mask all exceptions, and keep flush-to-zero and
//! denormals-are-zero off. [`install`] establishes that state; it must run
//! on every thread that performs interval arithmetic, before the first
//! operation, and the state must not be changed afterwards.

use core::arch::asm;

/// MXCSR exception-mask bits plus round-down rounding control.
const MXCSR_CONTROL: u32 = 0x0000_3f80;

/// Switches the calling thread's SSE environment to the kernel's required
/// state: all exceptions masked, flush-to-zero off, denormals-are-zero off,
/// rounding toward negative infinity. Idempotent.
pub fn install() {
    let mut csr: u32 = 0;
    // SAFETY: rewrites only the MXCSR control bits; the sticky flag bits are
    // cleared, which no surrounding code observes.
    unsafe {
        asm!(
            "stmxcsr dword ptr [{csr}]",
            csr = in(reg) core::ptr::addr_of_mut!(csr),
            options(nostack),
        );
        csr = (csr & 0xffff_0000) | MXCSR_CONTROL;
        asm!(
            "ldmxcsr dword ptr [{csr}]",
            csr = in(reg) core::ptr::addr_of!(csr),
            options(nostack),
        );
    }
}

/// Reports whether the calling thread currently rounds toward negative
/// infinity. Intended for assertions in tests and client setup code.
#[must_use]
pub fn rounds_down() -> bool {
    let mut csr: u32 = 0;
    // SAFETY: reads the MXCSR register.
    unsafe {
        asm!(
            "stmxcsr dword ptr [{csr}]",
            csr = in(reg) core::ptr::addr_of_mut!(csr),
            options(nostack),
        );
    }
    csr & 0x6000 == 0x2000
}
