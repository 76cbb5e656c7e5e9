// src/core/mod.rs

pub mod dates;
pub mod decode;
pub mod extract;
pub mod net;
pub mod sanitize;
