use std::sync::Once;

use log::Level;

static INIT: Once = Once::new();

/// Route `log` records at `level` and above to the browser console through
/// `wasm-logger`, and panics to `console.error`. Only the first call takes
/// effect. Off wasm32 nothing is installed, so native hosts keep their own
/// logger.
pub fn init_console_logging(level: Level) {
    INIT.call_once(|| install(level));
}

#[cfg(target_arch = "wasm32")]
fn install(level: Level) {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(level));
}

#[cfg(not(target_arch = "wasm32"))]
fn install(level: Level) {
    log::debug!("console logging at {level} is browser-only; skipped");
}
