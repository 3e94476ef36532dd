//! Process replacement.  On success nothing here returns; the only
//! way back into our own code is a failed `chdir` or `execve`.

use std::convert::Infallible;
use std::ffi::{CStr, CString, OsString};
use std::os::unix::ffi::OsStringExt;

use nix::unistd;

use crate::environ::ExecEnvironment;
use crate::err::*;
use crate::settings::Settings;

/// The two system calls we need.  `replace` returns only on failure.
pub trait ProcessImage {
    fn change_dir(&mut self, dir: &CStr) -> nix::Result<()>;
    fn replace(&mut self, path: &CStr, argv: &[CString], envp: &[CString])
               -> nix::Result<Infallible>;
}

/// The real thing.
pub struct Execve;

impl ProcessImage for Execve {
    fn change_dir(&mut self, dir: &CStr) -> nix::Result<()> {
        unistd::chdir(dir)
    }
    fn replace(&mut self, path: &CStr, argv: &[CString], envp: &[CString])
               -> nix::Result<Infallible> {
        unistd::execve(path, argv, envp)
    }
}

/// Convert the argument vector for `execve`, byte for byte.  argv[0]
/// is kept as is, and an empty vector stays empty.
pub fn argv_to_cstrings<I>(args: I) -> Result<Vec<CString>, WrapError>
    where I: IntoIterator<Item = OsString>
{
    args.into_iter()
        .enumerate()
        .map(|(index, a)| CString::new(a.into_vec())
             .map_err(|_| WrapError::BadArgument { index }))
        .collect()
}

/// chdir to the fixed working directory, then exec the fixed target.
/// Returns only if one of those fails.
pub fn launch<P>(image: &mut P, settings: &Settings,
                 argv: &[CString], env: &ExecEnvironment) -> WrapError
    where P: ProcessImage + ?Sized
{
    if let Err(e) = image.change_dir(settings.workdir) {
        return map_chdir_err(e, settings.workdir);
    }
    match image.replace(settings.target, argv, env.entries()) {
        Ok(never) => match never {},
        Err(e) => map_exec_err(e, settings.target),
    }
}
