//! Bakes the target executable path into the binary.  There is
//! deliberately no way to change it after the build.

use std::env;
use std::path::Path;

const TARGET_VAR: &str = "SETUID_WRAP_TARGET";
const DEFAULT_TARGET: &str = "/usr/local/libexec/setuid-wrap/target";

fn main() {
    println!("cargo:rerun-if-env-changed={}", TARGET_VAR);

    let target = match env::var(TARGET_VAR) {
        Ok(t) => t,
        Err(env::VarError::NotPresent) => String::from(DEFAULT_TARGET),
        Err(env::VarError::NotUnicode(t)) => {
            panic!("{} is not valid UTF-8: {:?}", TARGET_VAR, t)
        }
    };

    if !Path::new(&target).is_absolute() {
        panic!("{} must be an absolute path, got {:?}", TARGET_VAR, target);
    }
    if target.contains(|c| c == '\0' || c == '\n') {
        panic!("{} must not contain NUL or newline characters", TARGET_VAR);
    }

    println!("cargo:rustc-env={}={}", TARGET_VAR, target);
}
