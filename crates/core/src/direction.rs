use std::{fmt, str::FromStr};

use thiserror::Error;

/// Optimization direction of a single objective.
///
/// Fitness values are always compared minimization-style downstream. A
/// maximized objective is therefore negated during evaluation, while a
/// minimized one passes through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Smaller is better. Sign `+1`.
    #[default]
    Minimize,

    /// Larger is better. Sign `-1`.
    Maximize,
}

/// Error returned when a token does not name a [`Direction`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("direction must be either 'minimize' or 'maximize', got '{0}'")]
pub struct ParseDirectionError(pub String);

impl Direction {
    /// Returns the multiplier applied to raw fitness values.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Minimize => 1.0,
            Self::Maximize => -1.0,
        }
    }

    /// Returns the lowercase token naming this direction.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "minimize" => Ok(Self::Minimize),
            "maximize" => Ok(Self::Maximize),
            other => Err(ParseDirectionError(other.to_owned())),
        }
    }
}

impl TryFrom<i8> for Direction {
    type Error = ParseDirectionError;

    fn try_from(sign: i8) -> Result<Self, Self::Error> {
        match sign {
            1 => Ok(Self::Minimize),
            -1 => Ok(Self::Maximize),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

impl From<Direction> for i8 {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Minimize => 1,
            Direction::Maximize => -1,
        }
    }
}
