pub mod alloc;
pub mod fmt;
pub mod option;
pub mod panic;
