/// Route panics to `console.error` when the `console_error_panic_hook`
/// feature is enabled. Safe to call more than once.
pub(crate) fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
