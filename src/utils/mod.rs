// Utils compartidos

pub mod constants;
pub mod debounce;
pub mod format;
pub mod i18n;
pub mod storage;
pub mod validation;

pub use constants::*;
pub use i18n::*;
