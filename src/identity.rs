//! Who called us?  Real uid to account name, with the length bound
//! enforced before the name goes anywhere near the environment.

use std::ffi::{CStr, CString};
use std::mem::MaybeUninit;
use std::ptr;

use libc::{c_char, passwd};
use nix::errno::Errno;
use nix::unistd::{self, Uid};

use crate::err::*;

/// Upper limit for the `getpwuid_r` scratch buffer.
const MAX_PW_BUF: usize = 1024 * 1024;

/// Somewhere that maps numeric user ids to account names.
pub trait AccountDirectory {
    /// `Ok(None)` means the directory has no entry for `uid`.
    fn account_name(&self, uid: Uid) -> Result<Option<CString>, Errno>;
}

/// The system user database, via `getpwuid_r`.
pub struct SystemDirectory;

impl AccountDirectory for SystemDirectory {
    fn account_name(&self, uid: Uid) -> Result<Option<CString>, Errno> {
        let mut buf_len = match unsafe { libc::sysconf(libc::_SC_GETPW_R_SIZE_MAX) } {
            n if n > 0 => n as usize,
            _ => 1024,
        };

        loop {
            let mut buf: Vec<c_char> = Vec::with_capacity(buf_len);
            let mut pwd = MaybeUninit::<passwd>::uninit();
            let mut result: *mut passwd = ptr::null_mut();

            let rc = unsafe {
                libc::getpwuid_r(uid.as_raw(), pwd.as_mut_ptr(),
                                 buf.as_mut_ptr(), buf_len, &mut result)
            };

            if rc == libc::ERANGE && buf_len < MAX_PW_BUF {
                buf_len *= 2;
                continue;
            }
            if rc != 0 {
                return Err(Errno::from_i32(rc));
            }
            if result.is_null() {
                return Ok(None);
            }

            // pw_name points into buf, which is still alive here.
            let name = unsafe { CStr::from_ptr((*result).pw_name) };
            return Ok(Some(name.to_owned()));
        }
    }
}

/// The real user id of this process, not the one a setuid bit gave us.
pub fn real_uid() -> Uid {
    unistd::getuid()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    uid: Uid,
    name: CString,
}

impl CallerIdentity {
    pub fn uid(&self) -> Uid {
        self.uid
    }

    /// Account name; at most the bound given to `resolve_caller`
    /// bytes long, and never containing NUL.
    pub fn name(&self) -> &CStr {
        &self.name
    }
}

/// Look `uid` up in `directory` and check the result against
/// `max_name_len`.  Unknown uids, lookup errors, and long names all
/// fail with the same diagnostic.
pub fn resolve_caller<D>(directory: &D, uid: Uid, max_name_len: usize)
                         -> Result<CallerIdentity, WrapError>
    where D: AccountDirectory + ?Sized
{
    let name = directory.account_name(uid)
        .map_err(|e| map_lookup_err(e, uid))?
        .ok_or(WrapError::IdentityLookupFailed { uid, cause: None })?;

    let len = name.as_bytes().len();
    if len > max_name_len {
        return Err(WrapError::IdentityNameTooLong { uid, len });
    }

    Ok(CallerIdentity { uid, name })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory directory.  Uids not in `entries` are unknown;
    /// `failure` makes every lookup fail.
    pub struct FakeDirectory {
        pub entries: HashMap<u32, CString>,
        pub failure: Option<Errno>,
    }

    impl FakeDirectory {
        pub fn with(uid: u32, name: &str) -> FakeDirectory {
            let mut entries = HashMap::new();
            entries.insert(uid, CString::new(name).unwrap());
            FakeDirectory { entries, failure: None }
        }
    }

    impl AccountDirectory for FakeDirectory {
        fn account_name(&self, uid: Uid) -> Result<Option<CString>, Errno> {
            if let Some(e) = self.failure {
                return Err(e);
            }
            Ok(self.entries.get(&uid.as_raw()).cloned())
        }
    }

    #[test]
    fn resolves_known_user() {
        let dir = FakeDirectory::with(1000, "alice");
        let id = resolve_caller(&dir, Uid::from_raw(1000), 20).unwrap();
        assert_eq!(id.uid(), Uid::from_raw(1000));
        assert_eq!(id.name().to_bytes(), b"alice");
    }

    #[test]
    fn unknown_uid_fails() {
        let dir = FakeDirectory::with(1000, "alice");
        match resolve_caller(&dir, Uid::from_raw(4242), 20) {
            Err(WrapError::IdentityLookupFailed { uid, cause: None }) => {
                assert_eq!(uid, Uid::from_raw(4242));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn directory_error_is_a_lookup_failure() {
        let mut dir = FakeDirectory::with(1000, "alice");
        dir.failure = Some(Errno::EIO);
        match resolve_caller(&dir, Uid::from_raw(1000), 20) {
            Err(WrapError::IdentityLookupFailed { cause: Some(Errno::EIO), .. }) => (),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn name_at_the_bound_is_accepted() {
        let name = "a".repeat(20);
        let dir = FakeDirectory::with(1000, &name);
        let id = resolve_caller(&dir, Uid::from_raw(1000), 20).unwrap();
        assert_eq!(id.name().to_bytes(), name.as_bytes());
    }

    #[test]
    fn name_over_the_bound_is_rejected() {
        let dir = FakeDirectory::with(1000, "abcdefghijklmnopqrstuvwxy");
        match resolve_caller(&dir, Uid::from_raw(1000), 20) {
            Err(WrapError::IdentityNameTooLong { len, .. }) => assert_eq!(len, 25),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn bound_counts_bytes_not_chars() {
        // 11 characters, 22 bytes.
        let dir = FakeDirectory::with(1000, "ééééééééééé");
        assert!(matches!(resolve_caller(&dir, Uid::from_raw(1000), 20),
                         Err(WrapError::IdentityNameTooLong { len: 22, .. })));
    }

    #[test]
    fn system_directory_knows_root() {
        // uid 0 is in every passwd database we care about.
        match SystemDirectory.account_name(Uid::from_raw(0)) {
            Ok(Some(name)) => assert!(!name.as_bytes().is_empty()),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
