use std::io;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// ログ出力を初期化
///
/// `verbose` なら `debug`、それ以外は `filter`（例: `"info,clinic_directory=debug"`）。
/// 出力は stderr（stdout は JSON 出力用）。
pub fn init(verbose: bool, filter: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let stderr_log = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(filter);

    // テストなどで二重に初期化された場合は無視
    let _ = tracing_subscriber::registry().with(stderr_log).try_init();
}
