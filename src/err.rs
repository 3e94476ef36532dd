//! Error type and helper functions.
//!
//! Every error is fatal.  The two identity failures print the same
//! text on purpose: a caller must not be able to tell an unknown uid
//! from an oversized account name.

use std::ffi::{CStr, CString};

use nix::errno::Errno;
use nix::unistd::Uid;
use thiserror::Error;

/// Exit status for every failure path (C's `EXIT_FAILURE`).
pub const EXIT_FAILURE: i32 = 1;

const IDENTITY_DIAGNOSTIC: &str = "UID not found or name too long";

#[derive(Debug, Error)]
pub enum WrapError {
    #[error("{}", IDENTITY_DIAGNOSTIC)]
    IdentityLookupFailed {
        uid: Uid,
        #[source]
        cause: Option<Errno>,
    },

    #[error("{}", IDENTITY_DIAGNOSTIC)]
    IdentityNameTooLong { uid: Uid, len: usize },

    #[error("argument {index} contains a NUL byte")]
    BadArgument { index: usize },

    #[error("chdir: {}", .cause.desc())]
    WorkdirFailed {
        dir: CString,
        #[source]
        cause: Errno,
    },

    #[error("execve: {}", .cause.desc())]
    ReplacementFailed {
        target: CString,
        #[source]
        cause: Errno,
    },
}

impl WrapError {
    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }
}

pub fn map_lookup_err(cause: Errno, uid: Uid) -> WrapError {
    WrapError::IdentityLookupFailed { uid, cause: Some(cause) }
}
pub fn map_chdir_err(cause: Errno, dir: &CStr) -> WrapError {
    WrapError::WorkdirFailed { dir: dir.to_owned(), cause }
}
pub fn map_exec_err(cause: Errno, target: &CStr) -> WrapError {
    WrapError::ReplacementFailed { target: target.to_owned(), cause }
}
