//! `LS_COLORS`-style rule parsing and name formatting.

use clap::ValueEnum;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

use crate::error::ColorParseError;
use crate::tree::EntryMeta;

/// Environment variable holding the color-rule string.
pub const LS_COLORS_VAR: &str = "LS_COLORS";

/// GNU `dircolors` indicators that are accepted but have no effect here.
const IGNORED_KEYS: &[&str] = &[
    "lc", "rc", "ec", "no", "fi", "pi", "so", "bd", "cd", "mi", "or", "do", "su", "sg", "st",
    "ow", "tw", "ca", "mh", "cl",
];

/// When to emit color escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        };
        f.write_str(name)
    }
}

/// Wrap a raw SGR code (`01;34`) into a terminal escape sequence.
fn escape(code: &str) -> String {
    format!("\x1b[{code}m")
}

/// Parsed color rules. Every stored code is a complete escape sequence.
///
/// `extensions == None` means coloring is disabled altogether; an empty map
/// means enabled with no extension rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorRuleSet {
    pub directory: Option<String>,
    pub executable: Option<String>,
    pub link: Option<String>,
    pub reset: Option<String>,
    pub extensions: Option<HashMap<String, String>>,
}

impl ColorRuleSet {
    /// A rule set that never formats anything.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Built-in rules: bold blue directories, nothing else.
    pub fn builtin() -> Self {
        Self {
            directory: Some(escape("01;34")),
            reset: Some(escape("0")),
            extensions: Some(HashMap::new()),
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.extensions.is_some()
    }

    /// Parse a `key=code:key=code:...` rule string.
    pub fn parse(rules: &str) -> Result<Self, ColorParseError> {
        let mut set = Self::default();
        let mut extensions = HashMap::new();

        for clause in rules.split(':') {
            if clause.is_empty() {
                continue;
            }
            let mut parts = clause.split('=');
            let (Some(key), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(ColorParseError::MissingEquals(clause.to_string()));
            };

            match key {
                "di" => set.directory = Some(escape(code)),
                "ln" => set.link = Some(escape(code)),
                "ex" => set.executable = Some(escape(code)),
                "rs" => set.reset = Some(escape(code)),
                k if IGNORED_KEYS.contains(&k) => {}
                k => match k.strip_prefix('*') {
                    Some(ext) => {
                        extensions.insert(ext.to_string(), escape(code));
                    }
                    None => return Err(ColorParseError::UnknownKey(clause.to_string())),
                },
            }
        }

        set.extensions = Some(extensions);
        Ok(set)
    }

    /// Pick the effective rule set for `mode`.
    ///
    /// `is_terminal` is only consulted in `auto` mode; `env` looks up
    /// environment variables.
    pub fn resolve<P, E>(mode: ColorMode, is_terminal: P, env: E) -> Self
    where
        P: FnOnce() -> bool,
        E: Fn(&str) -> Option<String>,
    {
        match mode {
            ColorMode::Never => Self::disabled(),
            ColorMode::Always => Self::from_env(env),
            ColorMode::Auto => {
                if is_terminal() {
                    Self::from_env(env)
                } else {
                    debug!("output is not a terminal, colors disabled");
                    Self::disabled()
                }
            }
        }
    }

    fn from_env<E>(env: E) -> Self
    where
        E: Fn(&str) -> Option<String>,
    {
        match env(LS_COLORS_VAR).filter(|v| !v.is_empty()) {
            Some(rules) => Self::parse(&rules).unwrap_or_else(|err| {
                warn!(error = %err, "invalid $LS_COLORS, using default colors");
                Self::builtin()
            }),
            None => Self::builtin(),
        }
    }

    /// Format `name` according to the rules: extension first, then
    /// directory, executable file, and symlink.
    pub fn format_name(&self, name: &str, meta: &EntryMeta) -> String {
        let Some(extensions) = &self.extensions else {
            return name.to_string();
        };

        let code = match_extension(extensions, name).or_else(|| {
            if meta.is_dir() {
                self.directory.as_deref()
            } else if meta.is_executable() {
                self.executable.as_deref()
            } else if meta.is_symlink() {
                self.link.as_deref()
            } else {
                None
            }
        });

        match code {
            Some(code) => {
                let reset = self.reset.as_deref().unwrap_or("");
                format!("{code}{name}{reset}")
            }
            None => name.to_string(),
        }
    }
}

/// Exact lookup of the name's extension (from the last `.`), then the
/// longest registered key that is a suffix of the name.
fn match_extension<'a>(extensions: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    if extensions.is_empty() {
        return None;
    }
    if let Some(idx) = name.rfind('.') {
        if let Some(code) = extensions.get(&name[idx..]) {
            return Some(code);
        }
    }
    extensions
        .iter()
        .filter(|(key, _)| !key.is_empty() && name.ends_with(key.as_str()))
        .max_by_key(|(key, _)| key.len())
        .map(|(_, code)| code.as_str())
}
