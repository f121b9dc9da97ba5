//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() -> eyre::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));
    carefind_cli::run()?;
    Ok(())
}
