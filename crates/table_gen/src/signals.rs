use crate::error::Result;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared stop request; workers poll it before starting a shape
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Trips the returned flag on SIGINT, SIGTERM or SIGHUP (Ctrl+C on windows)
pub fn install_stop_handler() -> Result<StopFlag> {
    let stop = StopFlag::new();

    #[cfg(unix)]
    {
        use signal_hook::{
            consts::{SIGHUP, SIGINT, SIGTERM},
            iterator::Signals,
        };

        let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP]).map_err(|e| {
            crate::error::TableGenError::SignalHandling {
                source: Box::new(e),
            }
        })?;

        let listener = stop.clone();
        std::thread::Builder::new()
            .name("stop-listener".into())
            .spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    log::warn!("Received signal {sig}, letting running shapes finish");
                    listener.request_stop();
                }
            })?;
    }

    #[cfg(windows)]
    {
        let listener = stop.clone();
        ctrlc::set_handler(move || {
            log::warn!("Received Ctrl+C, letting running shapes finish");
            listener.request_stop();
        })?;
    }

    Ok(stop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_request() {
        let stop = StopFlag::new();
        let worker = stop.clone();
        assert!(!worker.is_stopped());

        stop.request_stop();
        assert!(worker.is_stopped());
    }
}
