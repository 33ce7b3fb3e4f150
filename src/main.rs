mod entry;

use std::process::ExitCode;

fn main() -> ExitCode {
    match entry::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[!] {}", err);
            ExitCode::FAILURE
        }
    }
}
