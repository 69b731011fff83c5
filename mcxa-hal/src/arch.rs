//! Portable in-line assembly
//!
//! Wraps the `cortex_m` intrinsics used by the power-mode code. Off target
//! every function is a no-op so that drivers can be exercised on the host.

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod inner {
    #[doc(inline)]
    pub use cortex_m::asm::{dsb, isb, wfi};

    use crate::pac::Interrupt;

    /// SCB.SCR SLEEPDEEP
    const SCR_SLEEPDEEP: u32 = 1 << 2;

    /// Select deep sleep (`true`) or sleep (`false`) for the next WFI.
    pub fn set_sleep_deep(enable: bool) {
        // SAFETY: single core, and SCR is only touched from thread mode.
        unsafe {
            let scb = &*cortex_m::peripheral::SCB::PTR;
            if enable {
                scb.scr.modify(|v| v | SCR_SLEEPDEEP);
            } else {
                scb.scr.modify(|v| v & !SCR_SLEEPDEEP);
            }
        }
    }

    /// Clear a pending IRQ in the NVIC
    pub fn interrupt_unpend(irq: Interrupt) {
        cortex_m::peripheral::NVIC::unpend(irq)
    }

    /// Enable an IRQ
    ///
    /// # Safety
    ///
    /// This function is unsafe because it can break mask-based critical
    /// sections. Do not call inside a critical section.
    pub unsafe fn interrupt_unmask(irq: Interrupt) {
        unsafe { cortex_m::peripheral::NVIC::unmask(irq) }
    }
}

#[cfg(not(all(target_arch = "arm", target_os = "none")))]
mod inner {
    use crate::pac::Interrupt;

    /// Placeholder function to wait for an interrupt
    pub fn wfi() {}
    /// Placeholder data synchronisation barrier
    pub fn dsb() {}
    /// Placeholder instruction synchronisation barrier
    pub fn isb() {}
    /// Placeholder for selecting deep sleep
    pub fn set_sleep_deep(_enable: bool) {}
    /// Placeholder for clearing a pending IRQ
    pub fn interrupt_unpend(_irq: Interrupt) {}
    /// Placeholder for enabling an IRQ
    ///
    /// # Safety
    ///
    /// Always safe off target.
    pub unsafe fn interrupt_unmask(_irq: Interrupt) {}}

pub use inner::*;
