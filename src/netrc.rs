//! netrc credential file handling.
//!
//! The `go` toolchain picks up proxy credentials from the developer's
//! netrc file, so a successful login stores the proxy host and token
//! there. Only `machine` entries are owned by this module: they are
//! rewritten in canonical single-line form, while every other line in
//! the file (comments, `macdef` macro bodies, anything unrecognized) is
//! carried through verbatim on round-trip.

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Login name recorded in netrc entries written by gofig.
pub const LOGIN_NAME: &str = "gofig";

/// A single `machine` (or `default`) entry in a netrc file.
///
/// # Security Notes
///
/// The `Debug` implementation redacts the password to prevent accidental
/// credential leakage in logs or error messages.
#[derive(Clone, PartialEq, Eq)]
pub struct Machine {
    /// Machine name, or `"default"` for a default entry.
    pub name: String,
    pub login: Option<String>,
    pub password: Option<String>,
    pub account: Option<String>,
}

impl Machine {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            login: None,
            password: None,
            account: None,
        }
    }
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("name", &self.name)
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("account", &self.account)
            .finish()
    }
}

/// One piece of a netrc file: a parsed machine entry, or lines this
/// module does not own and must not alter.
#[derive(Debug, Clone)]
enum Entry {
    Machine(Machine),
    Raw(String),
}

/// Parsed netrc file contents.
///
/// Machine entries are addressable through [`Netrc::machine`] and
/// friends; raw content between them keeps its file position so a
/// save only touches the entries gofig edits.
#[derive(Debug, Clone, Default)]
pub struct Netrc {
    entries: Vec<Entry>,
}

impl Netrc {
    /// Path of the netrc file: `$NETRC` when set, `~/.netrc` otherwise.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("NETRC") {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        dirs::home_dir()
            .map(|home| home.join(".netrc"))
            .ok_or(Error::HomeDirNotFound)
    }

    /// Load a netrc file. A missing file yields an empty `Netrc`.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "netrc file not found, starting empty");
                Ok(Self::default())
            }
            Err(e) => Err(Error::NetrcRead {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Parse netrc content.
    ///
    /// The format is a whitespace-separated token stream; a machine
    /// entry's fields may continue across lines. A `macdef` body runs to
    /// the next blank line and is kept verbatim, as are comments and any
    /// lines that do not belong to a machine entry.
    pub fn parse(content: &str) -> Self {
        let mut entries: Vec<Entry> = Vec::new();
        // Index of the machine entry the next login/password/account
        // continuation line applies to.
        let mut current: Option<usize> = None;
        let mut macdef: Option<String> = None;

        for line in content.lines() {
            if let Some(block) = macdef.as_mut() {
                block.push('\n');
                block.push_str(line);
                if line.trim().is_empty() {
                    entries.push(Entry::Raw(macdef.take().unwrap()));
                }
                continue;
            }

            let mut tokens = line.split_whitespace().peekable();
            let first = match tokens.peek() {
                Some(&t) => t,
                None => {
                    entries.push(Entry::Raw(line.to_string()));
                    continue;
                }
            };

            let continues =
                matches!(first, "login" | "password" | "account") && current.is_some();
            if !continues && !matches!(first, "machine" | "default" | "macdef") {
                entries.push(Entry::Raw(line.to_string()));
                continue;
            }

            while let Some(token) = tokens.next() {
                match token {
                    "machine" => {
                        if let Some(name) = tokens.next() {
                            entries.push(Entry::Machine(Machine::new(name)));
                            current = Some(entries.len() - 1);
                        }
                    }
                    "default" => {
                        entries.push(Entry::Machine(Machine::new("default")));
                        current = Some(entries.len() - 1);
                    }
                    "login" => {
                        let value = tokens.next().map(str::to_string);
                        if let Some(Entry::Machine(machine)) =
                            current.and_then(|i| entries.get_mut(i))
                        {
                            machine.login = value;
                        }
                    }
                    "password" => {
                        let value = tokens.next().map(str::to_string);
                        if let Some(Entry::Machine(machine)) =
                            current.and_then(|i| entries.get_mut(i))
                        {
                            machine.password = value;
                        }
                    }
                    "account" => {
                        let value = tokens.next().map(str::to_string);
                        if let Some(Entry::Machine(machine)) =
                            current.and_then(|i| entries.get_mut(i))
                        {
                            machine.account = value;
                        }
                    }
                    "macdef" => {
                        // Macro header plus body, verbatim, to the next
                        // blank line.
                        let mut header = String::from("macdef");
                        for rest in tokens.by_ref() {
                            header.push(' ');
                            header.push_str(rest);
                        }
                        macdef = Some(header);
                        break;
                    }
                    _ => {}
                }
            }
        }

        // Macro body running to end of file.
        if let Some(block) = macdef {
            entries.push(Entry::Raw(block));
        }

        Netrc { entries }
    }

    /// Machine entries in file order.
    pub fn machines(&self) -> impl Iterator<Item = &Machine> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Machine(machine) => Some(machine),
            Entry::Raw(_) => None,
        })
    }

    /// Look up a machine entry by name.
    pub fn machine(&self, name: &str) -> Option<&Machine> {
        self.machines().find(|m| m.name == name)
    }

    /// Set the credentials for a machine, replacing any existing entry
    /// with the same name and keeping everything else in place.
    pub fn set_machine(&mut self, name: &str, login: &str, password: &str) {
        let entry = Machine {
            name: name.to_string(),
            login: Some(login.to_string()),
            password: Some(password.to_string()),
            account: None,
        };
        let existing = self.entries.iter_mut().find_map(|e| match e {
            Entry::Machine(machine) if machine.name == name => Some(machine),
            _ => None,
        });
        match existing {
            Some(machine) => *machine = entry,
            None => self.entries.push(Entry::Machine(entry)),
        }
    }

    /// Remove a machine entry by name. Returns `true` if an entry was
    /// removed.
    pub fn remove_machine(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| !matches!(e, Entry::Machine(machine) if machine.name == name));
        self.entries.len() != before
    }

    /// Serialize back to netrc format.
    ///
    /// Machine entries come out on one canonical line each; raw content
    /// is emitted verbatim in its original position.
    pub fn to_content(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            match entry {
                Entry::Machine(machine) => {
                    if machine.name == "default" {
                        out.push_str("default");
                    } else {
                        out.push_str("machine ");
                        out.push_str(&machine.name);
                    }
                    if let Some(ref login) = machine.login {
                        out.push_str(" login ");
                        out.push_str(login);
                    }
                    if let Some(ref password) = machine.password {
                        out.push_str(" password ");
                        out.push_str(password);
                    }
                    if let Some(ref account) = machine.account {
                        out.push_str(" account ");
                        out.push_str(account);
                    }
                }
                Entry::Raw(raw) => out.push_str(raw),
            }
            out.push('\n');
        }
        out
    }

    /// Write the file, creating parent directories as needed. On Unix the
    /// file is restricted to mode 0600 since it holds credentials.
    pub fn save(&self, path: &Path) -> Result<()> {
        info!(
            path = %path.display(),
            machines = self.machines().count(),
            "saving netrc"
        );

        let write_err = |e: std::io::Error| Error::NetrcWrite {
            path: path.to_path_buf(),
            source: e,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, self.to_content()).map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .map_err(write_err)?;
        }

        Ok(())
    }
}
