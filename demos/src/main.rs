// SPDX-License-Identifier: Apache-2.0

// Prints the JSON value that follows `"<key>":` in text read from stdin.
//
//     curl -s https://example.com/page | extract ctx
//
// Without a key the whole input is parsed. Set RUST_LOG=debug to see what
// the parser did.

use std::io::Read;
use std::process::ExitCode;

use log::info;

fn main() -> ExitCode {
    env_logger::init();

    let key = std::env::args().nth(1).unwrap_or_default();
    let mut input = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut input) {
        eprintln!("cannot read stdin: {e}");
        return ExitCode::FAILURE;
    }
    info!("Read {} bytes, extracting {:?}", input.len(), key);

    match jsonpart::parse_partial(&input, &key) {
        Ok(doc) => {
            println!("{}", doc.root());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
