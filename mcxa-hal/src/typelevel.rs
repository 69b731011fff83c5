//! Module supporting type-level programming
//!
//! Only the sealing helper is needed here: the LPUART typestates and the
//! register block marker are closed sets that downstream crates must not extend.

mod private {
    /// Super trait used to mark traits with an exhaustive set of
    /// implementations
    pub trait Sealed {}
}

pub(crate) use private::Sealed;
