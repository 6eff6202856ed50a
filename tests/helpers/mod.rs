#![allow(dead_code)]

pub mod counting_pool;
pub mod encoders;
pub mod wire;

/// Install a trace-level subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("trace")
        .with_test_writer()
        .try_init();
}
