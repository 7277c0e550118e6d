use bitflags::bitflags;

bitflags! {
    /// Message flags of an interaction response.
    ///
    /// Only [`EPHEMERAL`], [`SUPPRESS_EMBEDS`] and [`LOADING`] mean anything
    /// on a response; the rest exist so decoded message flags keep their
    /// names.
    ///
    /// [`EPHEMERAL`]: Self::EPHEMERAL
    /// [`SUPPRESS_EMBEDS`]: Self::SUPPRESS_EMBEDS
    /// [`LOADING`]: Self::LOADING
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct MessageFlags: u64 {
        const CROSSPOSTED = 1 << 0;
        const IS_CROSSPOST = 1 << 1;
        const SUPPRESS_EMBEDS = 1 << 2;
        const SOURCE_MESSAGE_DELETED = 1 << 3;
        const URGENT = 1 << 4;
        const HAS_THREAD = 1 << 5;
        /// Only the invoking user sees the message.
        const EPHEMERAL = 1 << 6;
        /// "Bot is thinking..." placeholder of a deferred response.
        const LOADING = 1 << 7;
        const FAILED_TO_MENTION_SOME_ROLES_IN_THREAD = 1 << 8;
    }
}
