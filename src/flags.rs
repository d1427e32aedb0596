use std::io::{self, Read, Write};

use bitflags::bitflags;

use crate::codec::{invalid_data, WireReadable, WireReader, WireWritable, WireWriter};

bitflags! {
    /// Independent options of a dexopt request.
    ///
    /// The bit values are part of the wire format and must not change.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DexoptFlags: u32 {
        /// Dexopt the primary dex files (the APKs) of the package.
        const ON_PRIMARY_DEX = 1 << 0;
        /// Dexopt the secondary dex files the app loaded at runtime.
        const ON_SECONDARY_DEX = 1 << 1;
        /// Also dexopt the shared libraries the package depends on.
        const SHOULD_INCLUDE_DEPENDENCIES = 1 << 2;
        /// Allow compiling to a filter worse than the current one.
        const SHOULD_DOWNGRADE = 1 << 3;
        /// Recompile even if the artifacts are already up to date.
        const FORCE = 1 << 4;
        /// Only dexopt the split named by the split name.
        const FOR_SINGLE_SPLIT = 1 << 5;
        const SKIP_IF_STORAGE_LOW = 1 << 6;
        const IGNORE_PROFILE = 1 << 7;
        const FORCE_MERGE_PROFILE = 1 << 8;
    }
}

/// Checks that every bit of `bit` is set in `flags`.
#[inline]
pub fn has_flag(flags: DexoptFlags, bit: DexoptFlags) -> bool {
    flags.contains(bit)
}

impl WireReadable for DexoptFlags {
    fn read<R: Read>(read: &mut WireReader<R>) -> io::Result<Self> {
        let bits = u32::read(read)?;
        Self::from_bits(bits).ok_or_else(|| invalid_data(format!("Unknown flag bits: {bits:#x}")))
    }
}

impl WireWritable for DexoptFlags {
    fn write<W: Write>(&self, write: &mut WireWriter<W>) -> io::Result<()> {
        self.bits().write(write)
    }
}
