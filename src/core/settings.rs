// This module holds the toolchain-independent build settings that the build system asks
// every backend to realise, and the FlagTable type backends use to map them onto command-line
// tokens. Each setting is a closed enum with a textual form matching the build system's option
// values ("debugoptimized", "s", "everything"); parsing any other text is an UnknownSetting
// error. FlagTable is a &'static slice of (key, tokens) pairs so tables live in read-only
// memory and are shared by every backend instance without synchronisation.

//! Abstract build settings and static flag tables.

use std::fmt;
use std::str::FromStr;

use super::args::{to_args, ArgumentList};
use super::error::{CompilerError, CompilerResult};

/// Overall build profile exposed to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildType {
    Plain,
    Debug,
    DebugOptimized,
    Release,
    MinSize,
    Custom,
}

impl BuildType {
    pub const ALL: [BuildType; 6] = [
        BuildType::Plain,
        BuildType::Debug,
        BuildType::DebugOptimized,
        BuildType::Release,
        BuildType::MinSize,
        BuildType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Plain => "plain",
            BuildType::Debug => "debug",
            BuildType::DebugOptimized => "debugoptimized",
            BuildType::Release => "release",
            BuildType::MinSize => "minsize",
            BuildType::Custom => "custom",
        }
    }
}

/// Requested optimization level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptimizationLevel {
    Plain,
    O0,
    /// Optimize for debugging experience.
    G,
    O1,
    O2,
    O3,
    /// Optimize for size.
    S,
}

impl OptimizationLevel {
    pub const ALL: [OptimizationLevel; 7] = [
        OptimizationLevel::Plain,
        OptimizationLevel::O0,
        OptimizationLevel::G,
        OptimizationLevel::O1,
        OptimizationLevel::O2,
        OptimizationLevel::O3,
        OptimizationLevel::S,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationLevel::Plain => "plain",
            OptimizationLevel::O0 => "0",
            OptimizationLevel::G => "g",
            OptimizationLevel::O1 => "1",
            OptimizationLevel::O2 => "2",
            OptimizationLevel::O3 => "3",
            OptimizationLevel::S => "s",
        }
    }
}

/// Requested compiler warning level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningLevel {
    W0,
    W1,
    W2,
    W3,
    Everything,
}

impl WarningLevel {
    pub const ALL: [WarningLevel; 5] = [
        WarningLevel::W0,
        WarningLevel::W1,
        WarningLevel::W2,
        WarningLevel::W3,
        WarningLevel::Everything,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WarningLevel::W0 => "0",
            WarningLevel::W1 => "1",
            WarningLevel::W2 => "2",
            WarningLevel::W3 => "3",
            WarningLevel::Everything => "everything",
        }
    }
}

macro_rules! impl_setting_text {
    ($ty:ty, $key:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = CompilerError;

            fn from_str(s: &str) -> CompilerResult<Self> {
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| CompilerError::UnknownSetting {
                        key: $key,
                        value: s.to_string(),
                    })
            }
        }
    };
}

impl_setting_text!(BuildType, "buildtype");
impl_setting_text!(OptimizationLevel, "optimization");
impl_setting_text!(WarningLevel, "warning_level");

/// Immutable mapping from a setting value to the tokens that realise it.
///
/// Token order is preserved exactly as written in the table.
#[derive(Debug, Clone, Copy)]
pub struct FlagTable<K: 'static> {
    key: &'static str,
    entries: &'static [(K, &'static [&'static str])],
}

impl<K: 'static> FlagTable<K> {
    pub const fn new(key: &'static str, entries: &'static [(K, &'static [&'static str])]) -> Self {
        Self { key, entries }
    }
}

impl<K> FlagTable<K>
where
    K: Copy + PartialEq + fmt::Display + 'static,
{
    /// Look up the tokens for `value`.
    ///
    /// A missing entry means the table and the setting enum are out of sync.
    pub fn get(&self, value: K) -> CompilerResult<&'static [&'static str]> {
        self.entries
            .iter()
            .find(|(k, _)| *k == value)
            .map(|(_, tokens)| *tokens)
            .ok_or_else(|| CompilerError::UnknownSetting {
                key: self.key,
                value: value.to_string(),
            })
    }

    /// Look up the tokens for `value` as a fresh argument list.
    pub fn args(&self, value: K) -> CompilerResult<ArgumentList> {
        self.get(value).map(to_args)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
