/// Configuration options for a scanner over textual elements.
///
/// Options are read once, at construction. Scanners over arbitrary values
/// ([`Scanner::tokens`](crate::Scanner::tokens)) take no options.
///
/// # Default
///
/// Line tracking is enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScannerOptions {
    /// Whether `\n`, `\r` and `\r\n` advance the line counter.
    ///
    /// Disable it to treat a `u8` sequence as raw binary data, where bytes
    /// `0x0A` and `0x0D` carry no meaning.
    ///
    /// # Default
    ///
    /// [`LineTracking::Enabled`]
    pub line_tracking: LineTracking,
}

/// Whether a scanner counts line breaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LineTracking {
    /// Count LF, CR and CRLF as one logical line break each.
    #[default]
    Enabled,
    /// Leave the line number at `1`.
    Disabled,
}

impl ScannerOptions {
    /// Options for raw byte input: no line tracking.
    #[must_use]
    pub const fn binary() -> Self {
        Self {
            line_tracking: LineTracking::Disabled,
        }
    }
}
