#![deny(missing_debug_implementations, clippy::undocumented_unsafe_blocks)]

pub mod builder;
mod codec;
pub mod enums;
pub mod error;
pub mod flags;
pub mod params;
pub mod reason;
pub mod validation;

pub use builder::Builder;
pub use enums::{CompilerFilter, MetadataKind};
pub use error::{Error, Field, Result};
pub use flags::{has_flag, DexoptFlags};
pub use params::DexoptParams;
pub use reason::ReasonMapping;
