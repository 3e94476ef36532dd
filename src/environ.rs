//! The environment handed to the target.  It is built from nothing;
//! the caller's environment is never consulted, so there is nothing
//! to filter.

use std::ffi::{CStr, CString};

use crate::identity::CallerIdentity;

const REAL_USERNAME: &[u8] = b"REAL_USERNAME=";

/// Exactly two entries, in this order: `REAL_USERNAME=<name>` and the
/// compiled-in `PATH=...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecEnvironment {
    entries: [CString; 2],
}

impl ExecEnvironment {
    pub fn new(identity: &CallerIdentity, path_entry: &CStr) -> ExecEnvironment {
        let name = identity.name().to_bytes();
        let mut user = Vec::with_capacity(REAL_USERNAME.len() + name.len() + 1);
        user.extend_from_slice(REAL_USERNAME);
        user.extend_from_slice(name);

        // SAFETY: the prefix is a literal without NUL, and `name` came
        // out of a CStr.
        let user = unsafe { CString::from_vec_unchecked(user) };

        ExecEnvironment { entries: [user, path_entry.to_owned()] }
    }

    /// Entries in the form `execve` wants.
    pub fn entries(&self) -> &[CString] {
        &self.entries
    }

    /// (key, value) pairs, split at the first `=`.
    pub fn pairs(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.entries.iter().map(|e| {
            let bytes = e.as_bytes();
            match bytes.iter().position(|&b| b == b'=') {
                Some(i) => (&bytes[..i], &bytes[i + 1..]),
                None => (bytes, &b""[..]),
            }
        })
    }
}
