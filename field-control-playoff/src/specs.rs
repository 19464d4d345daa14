use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The status of a persisted match.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Hidden,
    RedWon,
    BlueWon,
    Tie,
}

impl MatchStatus {
    #[inline]
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Scheduled => 0,
            Self::Hidden => 1,
            Self::RedWon => 2,
            Self::BlueWon => 3,
            Self::Tie => 4,
        }
    }

    #[inline]
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Scheduled),
            1 => Some(Self::Hidden),
            2 => Some(Self::RedWon),
            3 => Some(Self::BlueWon),
            4 => Some(Self::Tie),
            _ => None,
        }
    }

    /// Returns `true` if the match has been played and committed.
    #[inline]
    pub fn is_complete(self) -> bool {
        matches!(self, Self::RedWon | Self::BlueWon | Self::Tie)
    }
}

impl Display for MatchStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Scheduled => "Scheduled",
            Self::Hidden => "Hidden",
            Self::RedWon => "Red Won",
            Self::BlueWon => "Blue Won",
            Self::Tie => "Tie",
        })
    }
}

/// The outcome of a completed playoff match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlayoffMatchResult {
    RedWon,
    BlueWon,
    Tie,
}

impl PlayoffMatchResult {
    /// Returns the result of a match with the given `status`. Returns `None` if the match is not
    /// complete.
    pub fn from_status(status: MatchStatus) -> Option<Self> {
        match status {
            MatchStatus::RedWon => Some(Self::RedWon),
            MatchStatus::BlueWon => Some(Self::BlueWon),
            MatchStatus::Tie => Some(Self::Tie),
            MatchStatus::Scheduled | MatchStatus::Hidden => None,
        }
    }
}

impl From<PlayoffMatchResult> for MatchStatus {
    #[inline]
    fn from(result: PlayoffMatchResult) -> Self {
        match result {
            PlayoffMatchResult::RedWon => Self::RedWon,
            PlayoffMatchResult::BlueWon => Self::BlueWon,
            PlayoffMatchResult::Tie => Self::Tie,
        }
    }
}

/// A break inserted into the playoff schedule before the match with order `order_before`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakSpec {
    pub order_before: u32,
    pub duration_sec: u32,
    pub description: String,
}

impl BreakSpec {
    #[inline]
    pub fn new<T>(order_before: u32, duration_sec: u32, description: T) -> Self
    where
        T: ToString,
    {
        Self {
            order_before,
            duration_sec,
            description: description.to_string(),
        }
    }
}

/// The key identifying a match on external systems.
///
/// The string form is `{comp_level}{set_number}m{match_number}`, or
/// `{comp_level}{match_number}` if `set_number` is `0`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TbaMatchKey {
    pub comp_level: String,
    pub set_number: u32,
    pub match_number: u32,
}

impl TbaMatchKey {
    #[inline]
    pub fn new<T>(comp_level: T, set_number: u32, match_number: u32) -> Self
    where
        T: ToString,
    {
        Self {
            comp_level: comp_level.to_string(),
            set_number,
            match_number,
        }
    }
}

impl Display for TbaMatchKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.set_number == 0 {
            write!(f, "{}{}", self.comp_level, self.match_number)
        } else {
            write!(
                f,
                "{}{}m{}",
                self.comp_level, self.set_number, self.match_number
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchStatus, PlayoffMatchResult, TbaMatchKey};

    #[test]
    fn test_tba_match_key_display() {
        assert_eq!(TbaMatchKey::new("sf", 5, 1).to_string(), "sf5m1");
        assert_eq!(TbaMatchKey::new("f", 1, 2).to_string(), "f1m2");
        assert_eq!(TbaMatchKey::new("qm", 0, 12).to_string(), "qm12");
    }

    #[test]
    fn test_match_status() {
        for byte in 0..5 {
            let status = MatchStatus::from_u8(byte).unwrap();
            assert_eq!(status.to_u8(), byte);
        }
        assert_eq!(MatchStatus::from_u8(5), None);

        assert!(!MatchStatus::Scheduled.is_complete());
        assert!(!MatchStatus::Hidden.is_complete());
        assert!(MatchStatus::RedWon.is_complete());
        assert!(MatchStatus::BlueWon.is_complete());
        assert!(MatchStatus::Tie.is_complete());
    }

    #[test]
    fn test_playoff_match_result_from_status() {
        assert_eq!(PlayoffMatchResult::from_status(MatchStatus::Scheduled), None);
        assert_eq!(PlayoffMatchResult::from_status(MatchStatus::Hidden), None);
        assert_eq!(
            PlayoffMatchResult::from_status(MatchStatus::RedWon),
            Some(PlayoffMatchResult::RedWon)
        );
        assert_eq!(
            PlayoffMatchResult::from_status(MatchStatus::BlueWon),
            Some(PlayoffMatchResult::BlueWon)
        );
        assert_eq!(
            PlayoffMatchResult::from_status(MatchStatus::Tie),
            Some(PlayoffMatchResult::Tie)
        );
        assert_eq!(
            MatchStatus::from(PlayoffMatchResult::BlueWon),
            MatchStatus::BlueWon
        );
    }
}
