use clap::Parser;
use std::process::ExitCode;

use filecast::cli::Cli;
use filecast::config::Config;
use filecast::server::OsSignal;
use filecast::{logger, Error, Lifecycle};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            let err = Error::from(e);
            eprintln!("[ERROR] {err}");
            return ExitCode::from(err.exit_code());
        }
    };
    logger::init(&cfg.logging);

    match run(cfg, cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logger::log_fatal(&err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cfg: Config, cli: Cli) -> Result<(), Error> {
    // 创建 Tokio 运行时；未配置 workers 时使用单线程运行时
    let mut runtime_builder = match cfg.server.workers {
        Some(workers) => {
            let mut builder = tokio::runtime::Builder::new_multi_thread();
            builder.worker_threads(workers.max(1));
            builder
        }
        None => tokio::runtime::Builder::new_current_thread(),
    };
    let runtime = runtime_builder.enable_all().build().map_err(Error::Runtime)?;

    runtime.block_on(async {
        // Handlers go in before the port is bound so no signal is missed
        let shutdown = OsSignal::register()?;
        Lifecycle::new(cfg, cli.file, shutdown).run().await
    })
}
