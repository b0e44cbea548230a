use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Installs a Ctrl-C handler that flips a process-wide flag; the search
/// polls it at its deadline probes and unwinds cleanly.
pub fn install_handler() {
    ctrlc::set_handler(|| {
        INTERRUPTED.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
}

pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}
