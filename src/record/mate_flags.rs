bitflags::bitflags! {
    /// CRAM mate flags, stored for detached records.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub(crate) struct MateFlags: u8 {
        /// The mate is on the negative strand.
        const ON_NEGATIVE_STRAND = 0x01;
        /// The mate is unmapped.
        const UNMAPPED = 0x02;
    }
}

impl From<MateFlags> for u8 {
    fn from(flags: MateFlags) -> Self {
        flags.bits()
    }
}
