//! Everything the `setuid-wrap` binary does, split up so that the
//! pieces can be tested without actually exec-ing anything.

#![cfg(unix)]

#[macro_use]
extern crate log;

use std::ffi::OsString;
use std::io::Write;

use log::{Level, LevelFilter, SetLoggerError};
use nix::unistd::Uid;

mod err;
pub use err::*;

mod settings;
pub use settings::*;

mod identity;
pub use identity::*;

mod environ;
pub use environ::*;

mod replace;
pub use replace::*;

/// Prefix for every diagnostic line.
pub const PROGNAME: &str = "setuid-wrap";

/// Send `log` output to stderr as `setuid-wrap: message`.  The
/// logger is configured entirely here; `RUST_LOG` and friends are
/// caller-controlled and are not read.  Fails only if a logger is
/// already installed.
pub fn init_diagnostics() -> Result<(), SetLoggerError> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .target(env_logger::Target::Stderr)
        .write_style(env_logger::WriteStyle::Never)
        .format(|buf, record| writeln!(buf, "{}: {}", PROGNAME, record.args()))
        .try_init()
}

/// Resolve the caller, build the environment, and replace the
/// process image.  Only returns on failure.
pub fn run_with<D, P, I>(directory: &D, image: &mut P, settings: &Settings,
                         uid: Uid, args: I) -> WrapError
    where D: AccountDirectory + ?Sized,
          P: ProcessImage + ?Sized,
          I: IntoIterator<Item = OsString>
{
    let identity = match resolve_caller(directory, uid, settings.max_name_len) {
        Ok(id) => id,
        Err(e) => return e,
    };
    let env = ExecEnvironment::new(&identity, settings.path_entry);
    if log_enabled!(Level::Debug) {
        debug!("uid {} is {:?}", identity.uid(), identity.name());
        for (k, v) in env.pairs() {
            debug!("env {}={}", String::from_utf8_lossy(k), String::from_utf8_lossy(v));
        }
    }
    let argv = match argv_to_cstrings(args) {
        Ok(argv) => argv,
        Err(e) => return e,
    };
    launch(image, settings, &argv, &env)
}

/// `run_with` against the real system and the compiled-in settings.
pub fn run<I>(args: I) -> WrapError
    where I: IntoIterator<Item = OsString>
{
    run_with(&SystemDirectory, &mut Execve, &Settings::COMPILED, real_uid(), args)
}
