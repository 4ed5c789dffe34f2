use once_cell::sync::Lazy;

static INIT: Lazy<()> = Lazy::new(|| {
    // try_init: another test binary in the same process may have won the race
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(true)
        .try_init();
});

/// Initializes env_logger once for the whole test binary.
pub fn init_test_logging() {
    Lazy::force(&INIT);
}
