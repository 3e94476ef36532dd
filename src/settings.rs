//! Compiled-in configuration.  None of this can be influenced at run
//! time; the target path comes from `build.rs`.

use std::ffi::CStr;

/// Longest account name, in bytes, that we will put in the
/// environment.
pub const MAX_NAME_LEN: usize = 20;

const fn cstr(bytes: &'static [u8]) -> &'static CStr {
    match CStr::from_bytes_with_nul(bytes) {
        Ok(s) => s,
        Err(_) => panic!("compiled-in string is not NUL-terminated or has an interior NUL"),
    }
}

pub struct Settings {
    /// Absolute path of the program we exec.
    pub target: &'static CStr,
    /// Complete `PATH=...` environment entry.
    pub path_entry: &'static CStr,
    /// Directory to chdir into before exec.
    pub workdir: &'static CStr,
    pub max_name_len: usize,
}

impl Settings {
    pub const COMPILED: Settings = Settings {
        target: cstr(concat!(env!("SETUID_WRAP_TARGET"), "\0").as_bytes()),
        path_entry: cstr(b"PATH=/bin:/usr/bin\0"),
        workdir: cstr(b"/\0"),
        max_name_len: MAX_NAME_LEN,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_settings() {
        let s = &Settings::COMPILED;
        assert_eq!(s.path_entry.to_bytes(), b"PATH=/bin:/usr/bin");
        assert_eq!(s.workdir.to_bytes(), b"/");
        assert_eq!(s.max_name_len, 20);
        assert_eq!(s.target.to_bytes(), env!("SETUID_WRAP_TARGET").as_bytes());
        assert_eq!(s.target.to_bytes().first(), Some(&b'/'));
    }
}
