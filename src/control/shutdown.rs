use crate::error::{Result, SignalSnafu};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use snafu::ResultExt;
use tracing::info;

/// Fires a [`Shutdown`] by dropping the only sender, which wakes every
/// receiver clone at once.
pub struct ShutdownTrigger {
    tx: Option<Sender<()>>,
}

impl ShutdownTrigger {
    pub fn trigger(&mut self) {
        self.tx.take();
    }
}

/// Process-wide stop request, cheap to clone into each thread.
#[derive(Clone)]
pub struct Shutdown {
    rx: Receiver<()>,
}

impl Shutdown {
    pub fn is_triggered(&self) -> bool {
        !matches!(self.rx.try_recv(), Err(TryRecvError::Empty))
    }

    /// For `select!`: becomes ready when shutdown fires.
    pub fn receiver(&self) -> &Receiver<()> {
        &self.rx
    }
}

pub fn channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = crossbeam_channel::bounded(1);
    (ShutdownTrigger { tx: Some(tx) }, Shutdown { rx })
}

/// Trigger on Ctrl+C.
pub fn install_ctrlc() -> Result<Shutdown> {
    let (mut trigger, shutdown) = channel();
    ctrlc::set_handler(move || {
        info!("Shutdown requested");
        trigger.trigger();
    })
    .context(SignalSnafu)?;
    Ok(shutdown)
}
