//! Server implementation

#![warn(missing_docs)]

mod http;

use std::thread;

use eyre::{eyre, Result};
use table_booking_core::RequestHandler;
use tracing::{error, info};

/// Environment variable holding the log filter
const LOG_ENV: &str = "TABLE_BOOKING_LOG";

/// Command line options
#[derive(Debug)]
struct Opts {
    /// Port for the HTTP server to listen on
    port: u16,
    /// Host for the HTTP server to listen on
    host: String,
    /// Number of worker threads answering HTTP requests
    threads: u32,
}

impl Opts {
    fn from_args() -> Self {
        let mut opts = Opts {
            port: 5000,
            host: String::from("127.0.0.1"),
            threads: 4,
        };

        let mut option: Option<String> = None;
        for arg in std::env::args().skip(1) {
            if let Some(opt) = option {
                match opt.as_str() {
                    "-port" => opts.port = parse_or_exit(&opt, &arg, "a decimal u16"),
                    "-host" => opts.host = arg,
                    "-threads" => opts.threads = parse_or_exit(&opt, &arg, "a decimal u32"),
                    _ => {
                        eprintln!("Error: unknown option {opt}");
                        std::process::exit(1);
                    }
                }
                option = None;
            } else {
                option = Some(arg);
            }
        }
        if let Some(opt) = option {
            eprintln!("Error: leftover option {opt}");
            std::process::exit(1);
        }

        opts
    }
}

fn parse_or_exit<T: std::str::FromStr>(opt: &str, arg: &str, expected: &str) -> T {
    match arg.parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("Error: {opt} takes {expected}, got `{arg}`");
            std::process::exit(1);
        }
    }
}

/// Initialize tracing from the [`LOG_ENV`] environment variable
///
/// Defaults to "info" if the variable is not set.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

fn http_loop<H: RequestHandler>(server: &tiny_http::Server, handler: &H) {
    loop {
        match server.recv() {
            Ok(rq) => {
                if let Some(rq) = http::parse(rq) {
                    handler.handle(rq);
                }
            }
            Err(err) => error!(%err, "HTTP receive failed"),
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let opts = Opts::from_args();

    let server = tiny_http::Server::http((opts.host.as_str(), opts.port))
        .map_err(|err| eyre!("could not listen on {}:{}: {err}", opts.host, opts.port))?;
    info!(
        "Server running on http://{}:{} with {} worker threads",
        opts.host, opts.port, opts.threads
    );

    let handler = table_booking_store::launch();

    thread::scope(|s| -> Result<()> {
        for i in 0..opts.threads.max(1) {
            thread::Builder::new()
                .name(format!("worker_{i}"))
                .spawn_scoped(s, || http_loop(&server, &handler))?;
        }
        Ok(())
    })
}
