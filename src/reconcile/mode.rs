//! Synchronization mode policy.
//!
//! A [`SyncMode`] selects how the reconciler treats divergence between the
//! two endpoints. Two axes matter: whether changes flow in both directions,
//! and whether alpha silently wins divergence that would otherwise conflict.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Policy selector for a synchronization session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Changes propagate in both directions; irreconcilable divergence
    /// becomes a conflict.
    Symmetric,
    /// Changes propagate in both directions; alpha wins any divergence.
    SourceWins,
    /// Alpha is authoritative. Pure creations on beta that collide with
    /// nothing are preserved; genuine divergence becomes a conflict.
    MirrorSafe,
    /// Alpha is authoritative and beta is forced to match it exactly.
    MirrorExact,
}

impl SyncMode {
    /// Every mode, in declaration order. Handy for exercising policy-generic
    /// code across the full mode space.
    pub const ALL: [SyncMode; 4] = [
        SyncMode::Symmetric,
        SyncMode::SourceWins,
        SyncMode::MirrorSafe,
        SyncMode::MirrorExact,
    ];

    /// Returns true if changes originating on beta propagate to alpha.
    pub fn is_bidirectional(self) -> bool {
        matches!(self, SyncMode::Symmetric | SyncMode::SourceWins)
    }

    /// Returns true if alpha's version silently wins divergence that would
    /// otherwise be reported as a conflict.
    pub fn alpha_wins_conflicts(self) -> bool {
        matches!(self, SyncMode::SourceWins | SyncMode::MirrorExact)
    }

    fn as_str(self) -> &'static str {
        match self {
            SyncMode::Symmetric => "symmetric",
            SyncMode::SourceWins => "source_wins",
            SyncMode::MirrorSafe => "mirror_safe",
            SyncMode::MirrorExact => "mirror_exact",
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown synchronization mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown synchronization mode: '{0}'")]
pub struct ParseSyncModeError(String);

impl FromStr for SyncMode {
    type Err = ParseSyncModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "symmetric" => Ok(SyncMode::Symmetric),
            "source_wins" => Ok(SyncMode::SourceWins),
            "mirror_safe" => Ok(SyncMode::MirrorSafe),
            "mirror_exact" => Ok(SyncMode::MirrorExact),
            _ => Err(ParseSyncModeError(s.to_owned())),
        }
    }
}
