//! Parse style flags

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::error::{MomentError, MomentResult};

/// Flags controlling whitespace tolerance and zone interpretation
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParseStyles(u32);

impl ParseStyles {
    pub const NONE: Self = Self(0);
    pub const ALLOW_LEADING_WHITE: Self = Self(0x01);
    pub const ALLOW_TRAILING_WHITE: Self = Self(0x02);
    pub const ALLOW_INNER_WHITE: Self = Self(0x04);
    pub const ALLOW_WHITE_SPACES: Self = Self(0x07);
    /// Time-only input resolves to 0001-01-01 instead of today
    pub const NO_CURRENT_DATE_DEFAULT: Self = Self(0x08);
    pub const ADJUST_TO_UNIVERSAL: Self = Self(0x10);
    pub const ASSUME_LOCAL: Self = Self(0x20);
    pub const ASSUME_UNIVERSAL: Self = Self(0x40);
    /// Keep the kind implied by the input's zone designator
    pub const ROUNDTRIP_KIND: Self = Self(0x80);

    const ALL: u32 = 0xFF;

    /// Raw flags; unknown bits are kept so validation can reject them
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    fn validate_common(self) -> MomentResult<Self> {
        if self.0 & !Self::ALL != 0 {
            return Err(MomentError::range(format!(
                "undefined parse style bits {:#x}",
                self.0 & !Self::ALL
            )));
        }
        if self.contains(Self::ASSUME_LOCAL) && self.contains(Self::ASSUME_UNIVERSAL) {
            return Err(MomentError::range(
                "ASSUME_LOCAL and ASSUME_UNIVERSAL cannot be combined",
            ));
        }
        Ok(self)
    }

    /// Validate flags for calendar-moment parsing
    pub fn validate_calendar(self) -> MomentResult<Self> {
        self.validate_common()?;
        if self.contains(Self::ROUNDTRIP_KIND)
            && self.intersects(
                Self::ASSUME_LOCAL | Self::ASSUME_UNIVERSAL | Self::ADJUST_TO_UNIVERSAL,
            )
        {
            return Err(MomentError::range(
                "ROUNDTRIP_KIND cannot be combined with an assume or adjust flag",
            ));
        }
        Ok(self)
    }

    /// Validate flags for offset-moment parsing
    ///
    /// `ROUNDTRIP_KIND` and `ASSUME_LOCAL` are accepted and dropped, local is
    /// already the default interpretation.
    pub fn validate_offset(self) -> MomentResult<Self> {
        self.validate_common()?;
        if self.contains(Self::NO_CURRENT_DATE_DEFAULT) {
            return Err(MomentError::range(
                "NO_CURRENT_DATE_DEFAULT is not valid for offset moments",
            ));
        }
        Ok(self.without(Self::ROUNDTRIP_KIND | Self::ASSUME_LOCAL))
    }
}

impl BitOr for ParseStyles {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ParseStyles {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for ParseStyles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(ParseStyles, &str); 8] = [
            (ParseStyles::ALLOW_LEADING_WHITE, "ALLOW_LEADING_WHITE"),
            (ParseStyles::ALLOW_TRAILING_WHITE, "ALLOW_TRAILING_WHITE"),
            (ParseStyles::ALLOW_INNER_WHITE, "ALLOW_INNER_WHITE"),
            (ParseStyles::NO_CURRENT_DATE_DEFAULT, "NO_CURRENT_DATE_DEFAULT"),
            (ParseStyles::ADJUST_TO_UNIVERSAL, "ADJUST_TO_UNIVERSAL"),
            (ParseStyles::ASSUME_LOCAL, "ASSUME_LOCAL"),
            (ParseStyles::ASSUME_UNIVERSAL, "ASSUME_UNIVERSAL"),
            (ParseStyles::ROUNDTRIP_KIND, "ROUNDTRIP_KIND"),
        ];
        let set: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        if set.is_empty() {
            write!(f, "ParseStyles(NONE)")
        } else {
            write!(f, "ParseStyles({})", set.join(" | "))
        }
    }
}
