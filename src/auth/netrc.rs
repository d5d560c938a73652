//
//  gerrit-client
//  auth/netrc.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `.netrc` support.
//!
//! The file is located through `$NETRC`, falling back to `~/.netrc`. Only the
//! `machine`, `default`, `login`, `account`, `password` and `macdef` tokens are
//! understood; macro bodies are skipped up to the next blank line.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::api::common::{GerritError, Result};

/// Credentials for one `machine` (or the `default`) entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetrcEntry {
    pub login: Option<String>,
    pub account: Option<String>,
    pub password: Option<String>,
}

/// A parsed `.netrc` file.
#[derive(Debug, Clone, Default)]
pub struct Netrc {
    machines: HashMap<String, NetrcEntry>,
    default: Option<NetrcEntry>,
}

impl Netrc {
    /// Parses netrc content.
    pub fn parse(content: &str) -> Result<Self> {
        let mut netrc = Netrc::default();
        let mut current: Option<(Option<String>, NetrcEntry)> = None;
        let mut lines = content.lines();

        while let Some(line) = lines.next() {
            let mut tokens = line.split_whitespace();
            while let Some(token) = tokens.next() {
                if token.starts_with('#') {
                    break;
                }
                match token {
                    "machine" => {
                        netrc.finish(current.take());
                        let name = tokens.next().ok_or_else(|| {
                            GerritError::Netrc("missing name after 'machine'".to_string())
                        })?;
                        current = Some((Some(name.to_string()), NetrcEntry::default()));
                    }
                    "default" => {
                        netrc.finish(current.take());
                        current = Some((None, NetrcEntry::default()));
                    }
                    "login" | "account" | "password" => {
                        let value = tokens.next().ok_or_else(|| {
                            GerritError::Netrc(format!("missing value after '{}'", token))
                        })?;
                        let (_, entry) = current.as_mut().ok_or_else(|| {
                            GerritError::Netrc(format!("'{}' outside of a machine entry", token))
                        })?;
                        let slot = match token {
                            "login" => &mut entry.login,
                            "account" => &mut entry.account,
                            _ => &mut entry.password,
                        };
                        *slot = Some(value.to_string());
                    }
                    "macdef" => {
                        for body in lines.by_ref() {
                            if body.trim().is_empty() {
                                break;
                            }
                        }
                        break;
                    }
                    other => {
                        return Err(GerritError::Netrc(format!("unexpected token '{}'", other)));
                    }
                }
            }
        }
        netrc.finish(current);
        Ok(netrc)
    }

    /// Reads and parses the file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Looks up `host`, falling back to the `default` entry.
    pub fn authenticators(&self, host: &str) -> Option<&NetrcEntry> {
        self.machines.get(host).or(self.default.as_ref())
    }

    fn finish(&mut self, entry: Option<(Option<String>, NetrcEntry)>) {
        match entry {
            Some((Some(machine), e)) => {
                self.machines.entry(machine).or_insert(e);
            }
            Some((None, e)) => self.default = Some(e),
            None => {}
        }
    }
}

/// Location of the user's netrc file.
pub fn default_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("NETRC") {
        return Some(PathBuf::from(path));
    }
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".netrc"))
}

/// Returns the netrc password for `host`.
pub fn password_for(host: &str) -> Result<String> {
    let path = default_path()
        .ok_or_else(|| GerritError::Netrc("cannot determine the home directory".to_string()))?;
    password_from(&path, host)
}

/// Returns the password for `host` from the netrc file at `path`.
pub fn password_from(path: &Path, host: &str) -> Result<String> {
    Netrc::load(path)?
        .authenticators(host)
        .and_then(|e| e.password.clone())
        .ok_or_else(|| {
            GerritError::Netrc(format!("The '{}' host name is not found in netrc file.", host))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
# review servers
machine review.example.com
  login jdoe
  password s3cret

machine other.example.com login bot password tok

macdef init
cd /tmp
put file

default login anonymous password guest
";

    #[test]
    fn test_parse_machines() {
        let netrc = Netrc::parse(SAMPLE).unwrap();
        let entry = netrc.authenticators("review.example.com").unwrap();
        assert_eq!(entry.login.as_deref(), Some("jdoe"));
        assert_eq!(entry.password.as_deref(), Some("s3cret"));

        let entry = netrc.authenticators("other.example.com").unwrap();
        assert_eq!(entry.password.as_deref(), Some("tok"));
    }

    #[test]
    fn test_default_entry() {
        let netrc = Netrc::parse(SAMPLE).unwrap();
        let entry = netrc.authenticators("unknown.example.com").unwrap();
        assert_eq!(entry.login.as_deref(), Some("anonymous"));
    }

    #[test]
    fn test_missing_host_without_default() {
        let netrc = Netrc::parse("machine a login x password y\n").unwrap();
        assert!(netrc.authenticators("b").is_none());
    }

    #[test]
    fn test_password_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "machine review.example.com login jdoe password pw").unwrap();

        let pw = password_from(file.path(), "review.example.com").unwrap();
        assert_eq!(pw, "pw");

        let err = password_from(file.path(), "nope.example.com").unwrap_err();
        assert_eq!(
            err.to_string(),
            "netrc: The 'nope.example.com' host name is not found in netrc file."
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Netrc::parse("machine a bogus b").is_err());
    }
}
