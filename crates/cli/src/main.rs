use std::process::ExitCode;

fn main() -> ExitCode {
    clientela_cli::run()
}
