//! jot - quick sticky notes in a remote libSQL database.
//!
//! Reads JOT_URL / JOT_TOKEN from the environment (or `.env`), runs one
//! command against the database's HTTP pipeline API and exits.

use jot::cli::{self, Invocation};
use jot::config::Config;
use jot::error::JotError;
use jot::transport::HttpTransport;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let command = match cli::parse_args(std::env::args_os()) {
        Ok(Invocation::Help(text)) => {
            print!("{}", text);
            return;
        }
        Ok(Invocation::Run(command)) => command,
        Err(e) => fatal(e),
    };

    log::debug!("[jot] v{} running {:?}", env!("CARGO_PKG_VERSION"), command);

    let mut stdout = std::io::stdout().lock();
    let result = cli::run(
        command,
        Config::from_env,
        |config: &Config| HttpTransport::new(config.request_timeout()),
        &mut stdout,
    )
    .await;

    if let Err(e) = result {
        fatal(e);
    }
}

fn fatal(err: JotError) -> ! {
    eprintln!("jot: {}", err);
    std::process::exit(1);
}
