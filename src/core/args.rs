//! Argument list helpers.
//!
//! Command lines coming from users (`CFLAGS`, a compiler invocation) are
//! split with POSIX shell rules, and command lines going into diagnostics are
//! quoted the same way, so either can be pasted into a shell.

use std::ffi::OsString;

use shlex::Shlex;

/// One compiler or linker invocation fragment, in order.
pub type ArgumentList = Vec<String>;

/// Convert a static token slice into an owned argument list.
pub fn to_args(tokens: &[&str]) -> ArgumentList {
    tokens.iter().map(|t| t.to_string()).collect()
}

/// Split `text` into words the way a POSIX shell would.
///
/// Quotes group words and are removed. An unterminated quote ends the list
/// at the last complete word.
pub fn split_args(text: &str) -> ArgumentList {
    Shlex::new(text).collect()
}

/// Join a command line for logging so it can be pasted into a shell.
///
/// Words containing a NUL byte cannot be quoted; such lines are joined
/// unquoted.
pub fn join_args<S: AsRef<str>>(args: &[S]) -> String {
    let words = || args.iter().map(|a| a.as_ref());
    shlex::try_join(words()).unwrap_or_else(|_| words().collect::<Vec<_>>().join(" "))
}

/// [`join_args`] for commands that embed filesystem paths.
pub fn join_os_args(args: &[OsString]) -> String {
    let lossy: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
    join_args(&lossy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_words_stay_together() {
        assert_eq!(
            split_args(r#"-DMSG="a b" -I'my inc'"#),
            vec!["-DMSG=a b".to_string(), "-Imy inc".to_string()]
        );
        assert_eq!(split_args("  sdcc   -mstm8 "), vec!["sdcc", "-mstm8"]);
        assert!(split_args("").is_empty());
    }

    #[test]
    fn join_round_trips_through_split() {
        let line = ["sdcc", "-mstm8", "x y.c", "-DQ='x'"];
        let joined = join_args(&line);
        assert!(joined.starts_with("sdcc -mstm8 "));
        assert_eq!(split_args(&joined), to_args(&line));
    }

    #[test]
    fn os_args_are_joined_lossily() {
        let cmd = vec![OsString::from("ucsim_stm8"), OsString::from("/tmp/probe dir/a.out")];
        assert_eq!(split_args(&join_os_args(&cmd)), vec!["ucsim_stm8", "/tmp/probe dir/a.out"]);
    }

    #[test]
    fn static_tokens_become_owned() {
        assert_eq!(to_args(&["-E"]), vec!["-E".to_string()]);
        assert!(to_args(&[]).is_empty());
    }
}
