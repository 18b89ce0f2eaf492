use std::process::ExitCode;

fn main() -> ExitCode {
    match episim::runner::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
