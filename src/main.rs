use std::process::ExitCode;

mod config;
mod error;
mod metadata;
mod pipeline;
mod runtime;
mod selection;
mod tagging;
mod transcode;

#[cfg(test)]
mod test_support;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    runtime::run()
}
