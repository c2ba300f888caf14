//! Console logging and panic reporting for the browser.
//!
//! `console_log` routes the `log` facade to `console.*`, so controller
//! diagnostics show up in devtools with the matching severity.

use log::LevelFilter;

/// Parse a level name (`"off"`, `"error"`, ... `"trace"`), case-insensitive.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}

/// Install the console logger and panic hook at `Info`. Later calls are
/// no-ops, so a level chosen with `set_level` survives new canvases.
pub fn install() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            // The logger accepts every level; the facade's max level filters.
            if let Err(err) = console_log::init_with_level(log::Level::Trace) {
                web_sys::console::warn_1(&format!("console logger not installed: {err}").into());
                return;
            }
            log::set_max_level(LevelFilter::Info);
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Paint WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

pub fn set_level(level: LevelFilter) {
    install();
    log::set_max_level(level);
}
