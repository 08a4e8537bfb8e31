//! Binary entrypoint for the `headroll` CLI.

use std::process::ExitCode;

use headroll::RollError;

fn main() -> ExitCode {
    // Recording is handled in commands::dispatch via HEADROLL_RECORD=<dir>.
    match headroll::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let RollError::Usage(usage) = &err {
                // clap decides between stdout (help, version) and stderr.
                let _ = usage.print();
            } else {
                eprintln!("[ERROR] {err}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}
