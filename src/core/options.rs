//! User-selectable options a backend exposes.
//!
//! Backends only describe their options here; storing and overriding them is
//! the options registry's business.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::error::{CompilerError, CompilerResult};
use super::machine::{Language, MachineChoice};

/// Fully qualified option name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionKey {
    pub name: String,
    pub machine: MachineChoice,
    pub lang: Option<Language>,
}

impl OptionKey {
    /// A language option such as `c_std`.
    pub fn for_language(name: impl Into<String>, machine: MachineChoice, lang: Language) -> Self {
        Self {
            name: name.into(),
            machine,
            lang: Some(lang),
        }
    }

    /// A base option such as `b_ndebug`.
    pub fn base(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            machine: MachineChoice::Host,
            lang: None,
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.machine.option_prefix())?;
        if let Some(lang) = self.lang {
            write!(f, "{}_", lang.id())?;
        }
        f.write_str(&self.name)
    }
}

/// Option whose value is one of a fixed list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserComboOption {
    pub description: String,
    choices: Vec<String>,
    value: String,
}

impl UserComboOption {
    /// The default must be one of `choices`.
    pub fn new<I, S>(description: impl Into<String>, choices: I, default: &str) -> CompilerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let description = description.into();
        let choices: Vec<String> = choices.into_iter().map(Into::into).collect();
        let mut opt = Self {
            value: String::new(),
            choices,
            description,
        };
        opt.set_value(default)?;
        Ok(opt)
    }

    /// An option over a fixed list whose first entry is the default.
    ///
    /// `choices` must not be empty.
    pub fn first_is_default(description: impl Into<String>, choices: &[&str]) -> Self {
        debug_assert!(!choices.is_empty(), "combo option without choices");
        Self {
            description: description.into(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            value: choices.first().map(|c| c.to_string()).unwrap_or_default(),
        }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) -> CompilerResult<()> {
        if !self.choices.iter().any(|c| c == value) {
            return Err(CompilerError::InvalidOption {
                option: self.description.clone(),
                value: value.to_string(),
                choices: self.choices.join(", "),
            });
        }
        self.value = value.to_string();
        Ok(())
    }
}

/// Ordered mapping of the options a backend exposes.
pub type OptionDict = BTreeMap<OptionKey, UserComboOption>;

/// Set of base options (`b_*`) a backend exposes.
pub type BaseOptions = BTreeSet<OptionKey>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display() {
        let key = OptionKey::for_language("std", MachineChoice::Host, Language::C);
        assert_eq!(key.to_string(), "c_std");
        let key = OptionKey::for_language("std", MachineChoice::Build, Language::C);
        assert_eq!(key.to_string(), "build.c_std");
        assert_eq!(OptionKey::base("b_ndebug").to_string(), "b_ndebug");
    }

    #[test]
    fn combo_rejects_unknown_values() {
        let mut opt = UserComboOption::new("pick one", ["a", "b"], "a").unwrap();
        assert_eq!(opt.value(), "a");
        opt.set_value("b").unwrap();
        assert_eq!(opt.value(), "b");

        let err = opt.set_value("c").unwrap_err();
        assert!(matches!(err, CompilerError::InvalidOption { ref choices, .. } if choices == "a, b"));
        assert_eq!(opt.value(), "b");
    }

    #[test]
    fn first_choice_is_the_default() {
        let mut opt = UserComboOption::first_is_default("standard", &["none", "c89", "c99"]);
        assert_eq!(opt.value(), "none");
        assert_eq!(opt.choices().len(), 3);
        opt.set_value("c99").unwrap();
        assert_eq!(opt.value(), "c99");
        assert!(opt.set_value("c2y").is_err());
    }

    #[test]
    fn combo_default_must_be_a_choice() {
        assert!(UserComboOption::new("pick one", ["a"], "z").is_err());
    }
}
