//! SDCC flag tables.
//!
//! Build types carry no flags of their own: optimization and debug info are
//! controlled entirely through [`OPTIMIZATION_ARGS`] and [`DEBUG_ARGS`].
//! SDCC only distinguishes "optimize for speed" and "optimize for size", so
//! levels 1 to 3 share one flag.

use crate::core::{BuildType, FlagTable, OptimizationLevel};

pub const OPT_CODE_SPEED: &str = "--opt-code-speed";
pub const OPT_CODE_SIZE: &str = "--opt-code-size";
pub const DEBUG: &str = "--debug";
pub const NO_STDINC: &str = "--nostdinc";
pub const NO_STDLIB: &str = "--nostdlib";
pub const WERROR: &str = "--Werror";
pub const PREPROCESS_ONLY: &str = "-E";
pub const INCLUDE_PREFIX: &str = "-I";
pub const LIBRARY_PREFIX: &str = "-L";

const BUILDTYPE_ENTRIES: &[(BuildType, &[&str])] = &[
    (BuildType::Plain, &[]),
    (BuildType::Debug, &[]),
    (BuildType::DebugOptimized, &[]),
    (BuildType::Release, &[]),
    (BuildType::MinSize, &[]),
    (BuildType::Custom, &[]),
];

const OPTIMIZATION_ENTRIES: &[(OptimizationLevel, &[&str])] = &[
    (OptimizationLevel::Plain, &[]),
    (OptimizationLevel::O0, &[]),
    (OptimizationLevel::G, &[]),
    (OptimizationLevel::O1, &[OPT_CODE_SPEED]),
    (OptimizationLevel::O2, &[OPT_CODE_SPEED]),
    (OptimizationLevel::O3, &[OPT_CODE_SPEED]),
    (OptimizationLevel::S, &[OPT_CODE_SIZE]),
];

const DEBUG_ENTRIES: &[(bool, &[&str])] = &[(false, &[]), (true, &[DEBUG])];

pub static BUILDTYPE_ARGS: FlagTable<BuildType> = FlagTable::new("buildtype", BUILDTYPE_ENTRIES);
pub static OPTIMIZATION_ARGS: FlagTable<OptimizationLevel> = FlagTable::new("optimization", OPTIMIZATION_ENTRIES);
pub static DEBUG_ARGS: FlagTable<bool> = FlagTable::new("debug", DEBUG_ENTRIES);

/// Values of the `std` option, in the order they are offered.
///
/// `none` leaves the standard to the compiler default; the ISO names and the
/// `sdccNN` names (ISO plus SDCC extensions) cover the same revisions.
pub const STD_CHOICES: &[&str] = &[
    "none",
    "c89",
    "c90",
    "c95",
    "c99",
    "c11",
    "c17",
    "c18",
    "c2x",
    "c23",
    "iso9899:1990",
    "iso9899:199409",
    "iso9899:1999",
    "iso9899:2011",
    "iso9899:2017",
    "iso9899:2018",
    "sdcc89",
    "sdcc90",
    "sdcc99",
    "sdcc11",
    "sdcc17",
    "sdcc18",
    "sdcc2x",
    "sdcc23",
];

pub const STD_DEFAULT: &str = "none";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_setting_has_an_entry() {
        for bt in BuildType::ALL {
            assert!(BUILDTYPE_ARGS.get(bt).unwrap().is_empty(), "{bt}");
        }
        for level in OptimizationLevel::ALL {
            assert!(OPTIMIZATION_ARGS.get(level).is_ok(), "{level}");
        }
        assert_eq!(DEBUG_ARGS.len(), 2);
    }

    #[test]
    fn std_choices_start_with_default() {
        assert_eq!(STD_CHOICES[0], STD_DEFAULT);
        assert_eq!(STD_CHOICES.len(), 24);
    }
}
