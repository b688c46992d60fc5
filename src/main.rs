// SPDX-License-Identifier: MPL-2.0
use std::io::Write;
use std::process::ExitCode;

use lens_adjust::cli::{self, Args};

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{} {style}{}{style:#} {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn main() -> ExitCode {
    init_logger();

    match Args::from_env().and_then(cli::run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lens-adjust: {err}");
            ExitCode::FAILURE
        }
    }
}
