bitflags::bitflags! {
    /// CRAM record flags.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub(crate) struct Flags: u8 {
        /// Quality scores are stored as a per-base array.
        const QUALITY_SCORES_ARE_STORED_AS_ARRAY = 0x01;
        /// The record is detached from its mate.
        const IS_DETACHED = 0x02;
        /// The mate is downstream in the same slice.
        const MATE_IS_DOWNSTREAM = 0x04;
    }
}

impl Flags {
    pub fn quality_scores_are_stored_as_array(self) -> bool {
        self.contains(Self::QUALITY_SCORES_ARE_STORED_AS_ARRAY)
    }

    pub fn is_detached(self) -> bool {
        self.contains(Self::IS_DETACHED)
    }

    pub fn mate_is_downstream(self) -> bool {
        self.contains(Self::MATE_IS_DOWNSTREAM)
    }
}


impl From<Flags> for u8 {
    fn from(flags: Flags) -> Self {
        flags.bits()
    }
}
