//! Feature flags controlling header layout and write behavior
//!
//! A logger carries a [`Features`] set. Most flags affect only how the header
//! in front of each message is rendered; the `SYNC_*` flags change how records
//! of a given severity travel to the sink (inline on the caller instead of
//! through the queue).

use super::log_level::LogLevel;
use super::record::Tag;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Sub, SubAssign};
use std::str::FromStr;

const PREFIX_BIT_OFFSET: u32 = 8;
const SYNC_BIT_OFFSET: u32 = 16;

/// A set of independently toggled logger options.
///
/// # Examples
///
/// ```
/// use rust_queue_logger::Features;
///
/// let feats = Features::TIME | Features::MICROSECONDS | Features::PREFIX;
/// assert!(feats.contains(Features::PREFIX_WARN));
/// assert_eq!("time,micros".parse::<Features>().unwrap(), Features::TIME | Features::MICROSECONDS);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Features(u32);

impl Features {
    /// Date as `YYYY-MM-DD`
    pub const DATE: Features = Features(1 << 0);
    /// Time of day as `HH:MM:SS`
    pub const TIME: Features = Features(1 << 1);
    /// Millisecond precision, `HH:MM:SS.sss` (implies a time field)
    pub const MILLISECONDS: Features = Features(1 << 2);
    /// Microsecond precision, `HH:MM:SS.ssssss`; wins over `MILLISECONDS`
    pub const MICROSECONDS: Features = Features(1 << 3);
    /// Render date and time in UTC instead of the local time zone
    pub const UTC: Features = Features(1 << 4);
    /// Append the caller's `file:line` to debug messages
    pub const DEBUG_ORIGIN: Features = Features(1 << 5);
    /// ANSI terminal colors
    pub const COLOR: Features = Features(1 << 6);
    /// Turn on `COLOR` when the sink is a terminal whose `$TERM` supports it
    pub const COLOR_AUTO: Features = Features(1 << 7);

    pub const PREFIX_DEBUG: Features = Features(1 << (PREFIX_BIT_OFFSET + 0));
    pub const PREFIX_INFO: Features = Features(1 << (PREFIX_BIT_OFFSET + 1));
    pub const PREFIX_WARN: Features = Features(1 << (PREFIX_BIT_OFFSET + 2));
    pub const PREFIX_ERROR: Features = Features(1 << (PREFIX_BIT_OFFSET + 3));
    pub const PREFIX_TIME: Features = Features(1 << (PREFIX_BIT_OFFSET + Tag::TIMING_INDEX));

    /// Write debug records inline on the caller, bypassing the queue
    pub const SYNC_DEBUG: Features = Features(1 << (SYNC_BIT_OFFSET + 0));
    pub const SYNC_INFO: Features = Features(1 << (SYNC_BIT_OFFSET + 1));
    pub const SYNC_WARN: Features = Features(1 << (SYNC_BIT_OFFSET + 2));
    pub const SYNC_ERROR: Features = Features(1 << (SYNC_BIT_OFFSET + 3));

    pub const PREFIX: Features = Features(
        Self::PREFIX_DEBUG.0
            | Self::PREFIX_INFO.0
            | Self::PREFIX_WARN.0
            | Self::PREFIX_ERROR.0
            | Self::PREFIX_TIME.0,
    );
    pub const SYNC: Features =
        Features(Self::SYNC_DEBUG.0 | Self::SYNC_INFO.0 | Self::SYNC_WARN.0 | Self::SYNC_ERROR.0);

    /// Time, debug origin, auto color and the debug..error tags
    pub const DEFAULT: Features = Features(
        Self::TIME.0
            | Self::DEBUG_ORIGIN.0
            | Self::COLOR_AUTO.0
            | Self::PREFIX_DEBUG.0
            | Self::PREFIX_INFO.0
            | Self::PREFIX_WARN.0
            | Self::PREFIX_ERROR.0,
    );

    const TIMESTAMP: Features =
        Features(Self::DATE.0 | Self::TIME.0 | Self::MILLISECONDS.0 | Self::MICROSECONDS.0);
    const CLOCK: Features = Features(Self::TIME.0 | Self::MILLISECONDS.0 | Self::MICROSECONDS.0);
    const SUBSECOND: Features = Features(Self::MILLISECONDS.0 | Self::MICROSECONDS.0);

    const NAMES: [(&'static str, Features); 20] = [
        ("date", Self::DATE),
        ("time", Self::TIME),
        ("millis", Self::MILLISECONDS),
        ("micros", Self::MICROSECONDS),
        ("utc", Self::UTC),
        ("debug-origin", Self::DEBUG_ORIGIN),
        ("color", Self::COLOR),
        ("color-auto", Self::COLOR_AUTO),
        ("prefix-debug", Self::PREFIX_DEBUG),
        ("prefix-info", Self::PREFIX_INFO),
        ("prefix-warn", Self::PREFIX_WARN),
        ("prefix-error", Self::PREFIX_ERROR),
        ("prefix-time", Self::PREFIX_TIME),
        ("sync-debug", Self::SYNC_DEBUG),
        ("sync-info", Self::SYNC_INFO),
        ("sync-warn", Self::SYNC_WARN),
        ("sync-error", Self::SYNC_ERROR),
        ("prefix", Self::PREFIX),
        ("sync", Self::SYNC),
        ("default", Self::DEFAULT),
    ];

    /// Number of single-flag entries at the start of `NAMES`
    const SINGLE_FLAGS: usize = 17;

    #[inline]
    pub const fn empty() -> Self {
        Features(0)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build from raw bits, dropping bits that name no flag.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        let all = Self::DATE.0
            | Self::UTC.0
            | Self::DEBUG_ORIGIN.0
            | Self::COLOR.0
            | Self::COLOR_AUTO.0
            | Self::CLOCK.0
            | Self::PREFIX.0
            | Self::SYNC.0;
        Features(bits & all)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// All flags in `other` are set
    #[inline]
    pub const fn contains(self, other: Features) -> bool {
        self.0 & other.0 == other.0
    }

    /// At least one flag in `other` is set
    #[inline]
    pub const fn intersects(self, other: Features) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn insert(&mut self, other: Features) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: Features) {
        self.0 &= !other.0;
    }

    /// Header tag flag for a record kind
    #[inline]
    pub(crate) fn prefix_for(tag: Tag) -> Features {
        Features(1 << (PREFIX_BIT_OFFSET + tag.index()))
    }

    /// Inline-write flag for a record kind. Timing records are always queued.
    #[inline]
    pub(crate) fn sync_for(tag: Tag) -> Features {
        match tag {
            Tag::Level(level) if level != LogLevel::Disabled => {
                Features(1 << (SYNC_BIT_OFFSET + level.index()))
            }
            _ => Features::empty(),
        }
    }

    #[inline]
    pub(crate) fn has_timestamp(self) -> bool {
        self.intersects(Self::TIMESTAMP)
    }

    #[inline]
    pub(crate) fn has_clock(self) -> bool {
        self.intersects(Self::CLOCK)
    }

    #[inline]
    pub(crate) fn has_subsecond(self) -> bool {
        self.intersects(Self::SUBSECOND)
    }
}

impl BitOr for Features {
    type Output = Features;

    fn bitor(self, rhs: Features) -> Features {
        Features(self.0 | rhs.0)
    }
}

impl BitOrAssign for Features {
    fn bitor_assign(&mut self, rhs: Features) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Features {
    type Output = Features;

    fn bitand(self, rhs: Features) -> Features {
        Features(self.0 & rhs.0)
    }
}

/// Set difference (and-not)
impl Sub for Features {
    type Output = Features;

    fn sub(self, rhs: Features) -> Features {
        Features(self.0 & !rhs.0)
    }
}

impl SubAssign for Features {
    fn sub_assign(&mut self, rhs: Features) {
        self.0 &= !rhs.0;
    }
}

impl fmt::Display for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for (name, flag) in &Self::NAMES[..Self::SINGLE_FLAGS] {
            if self.contains(*flag) {
                if !first {
                    f.write_str(",")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Features({})", self)
    }
}

impl FromStr for Features {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut feats = Features::empty();
        for token in s.split([',', '|']) {
            let token = token.trim().to_lowercase();
            if token.is_empty() || token == "none" {
                continue;
            }
            let flag = Self::NAMES
                .iter()
                .find(|(name, _)| *name == token)
                .map(|(_, flag)| *flag)
                .ok_or_else(|| format!("Invalid feature flag: '{}'", token))?;
            feats |= flag;
        }
        Ok(feats)
    }
}

impl TryFrom<String> for Features {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Features> for String {
    fn from(feats: Features) -> String {
        feats.to_string()
    }
}
