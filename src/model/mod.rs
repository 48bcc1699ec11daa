pub mod city;
pub mod hero;
pub mod team;
pub mod validate;

pub use city::*;
pub use hero::*;
pub use team::*;
pub use validate::*;

/// Primary key type shared by every table (`SERIAL`).
pub type Id = i32;
