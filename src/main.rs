use std::process;

use burrow::flags::Flags;
use burrow::logging;
use burrow::shell::Shell;
use clap::Parser;

fn main() {
    let flags = Flags::parse();
    logging::init(flags.debug);

    let code = match Shell::new(flags).and_then(|mut shell| shell.run()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("burrow: {}", e);
            1
        }
    };
    process::exit(code);
}
