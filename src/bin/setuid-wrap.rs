/* Run one fixed program on behalf of whoever invoked us.
 *
 * Copyright © 2014 Zack Weinberg
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 * http://www.apache.org/licenses/LICENSE-2.0
 * There is NO WARRANTY.
 *
 *    setuid-wrap [args...]
 *
 * looks up the account name of the *real* user id, changes to the
 * root directory, and execs the program whose absolute path was
 * fixed at build time (SETUID_WRAP_TARGET, see build.rs), passing
 * 'args' through verbatim, argv[0] included.  The target gets
 * exactly two environment variables:
 *
 *    REAL_USERNAME=<account name of the real uid>
 *    PATH=/bin:/usr/bin
 *
 * Nothing from our own environment is passed down, and nothing in it
 * is read, not even RUST_LOG.
 *
 * Account names longer than 20 bytes are refused, as are uids with
 * no passwd entry; both produce the same message.  If the chdir or
 * the exec fails, the system error is reported.  Every failure exits
 * with status 1 after writing a single line to stderr.
 *
 * This program is to be installed setuid (to whichever user the
 * target should run as).
 */

#[macro_use]
extern crate log;

use std::env;
use std::io;
use std::process;

use std::io::Write;

fn main() {
    if let Err(e) = setuid_wrap::init_diagnostics() {
        writeln!(io::stderr(), "{}: {}", setuid_wrap::PROGNAME, e).ok();
        process::exit(setuid_wrap::EXIT_FAILURE);
    }
    let err = setuid_wrap::run(env::args_os());
    error!("{}", err);
    process::exit(err.exit_code());
}
