use std::process::ExitCode;

use quark_driver::{Argument, Parser};

fn main() -> ExitCode {
    let argument = Argument::parse();
    quark_driver::run(&argument)
}
