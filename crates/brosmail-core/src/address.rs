//! Mailbox address model: local-part plus a domain from a closed set.

use std::fmt;

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Domains a disposable mailbox may be created on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Domain {
    /// `@nguyenmail.pro`, the default.
    #[default]
    NguyenmailPro,
    /// `@cuvox.de`.
    CuvoxDe,
    /// `@dayrep.com`.
    DayrepCom,
}

impl Domain {
    /// All allowed domains, in display order.
    pub const ALL: [Self; 3] = [Self::NguyenmailPro, Self::CuvoxDe, Self::DayrepCom];

    /// Returns the address suffix including the `@`.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::NguyenmailPro => "@nguyenmail.pro",
            Self::CuvoxDe => "@cuvox.de",
            Self::DayrepCom => "@dayrep.com",
        }
    }

    /// Returns the bare domain name without the `@`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NguyenmailPro => "nguyenmail.pro",
            Self::CuvoxDe => "cuvox.de",
            Self::DayrepCom => "dayrep.com",
        }
    }

    /// Parses a suffix (with or without the leading `@`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let bare = value.strip_prefix('@').unwrap_or(value);
        Self::ALL.into_iter().find(|domain| domain.name() == bare)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Builds a full address from a local-part and domain.
#[must_use]
pub fn full_address(local_part: &str, domain: Domain) -> String {
    format!("{local_part}{}", domain.suffix())
}

/// Generates a random local-part of 8 to 11 alphanumeric characters.
#[must_use]
pub fn random_local_part() -> String {
    random_local_part_with(&mut rand::thread_rng())
}

/// Generates a random local-part from the given RNG.
pub fn random_local_part_with<R: Rng>(rng: &mut R) -> String {
    let len = rng.gen_range(8..12);
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
