#![allow(dead_code)]

/// Every variable the CLI reads.
pub const TABLEMIND_VARS: &[&str] = &[
    "TABLEMIND_CONFIG",
    "TABLEMIND_SEED",
    "TABLEMIND_MIN_BET",
    "TABLEMIND_DECKS",
    "TABLEMIND_MAX_ROUNDS",
    "TABLEMIND_HIT_SOFT_17",
    "TABLEMIND_ENDPOINT",
    "TABLEMIND_API_KEY",
    "OPENROUTER_API_KEY",
];

/// Sets (or clears, for `None`) variables and restores them on drop.
pub struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn apply(pairs: &[(&str, Option<&str>)]) -> Self {
        let mut restores = Vec::new();
        for (key, value) in pairs {
            restores.push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                match value {
                    Some(v) => std::env::set_var(key, v),
                    None => std::env::remove_var(key),
                }
            }
        }
        EnvGuard { restores }
    }

    /// Clears every Tablemind variable, then applies `pairs`.
    pub fn clean(pairs: &[(&str, &str)]) -> Self {
        let mut all: Vec<(&str, Option<&str>)> =
            TABLEMIND_VARS.iter().map(|k| (*k, None)).collect();
        all.extend(pairs.iter().map(|(k, v)| (*k, Some(*v))));
        Self::apply(&all)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            unsafe {
                match previous {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str]) -> CliResult {
    let mut argv = vec!["tablemind"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let exit_code = tablemind_cli::run(argv, &mut out, &mut err);
    CliResult {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}
