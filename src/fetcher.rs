use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::catalog::ImageRecord;
use crate::texture_loader::{self, Encoded, LoadError};

pub type Fetched = (usize, Result<Encoded, LoadError>);

/// Loads image bytes for every record on a worker thread, in catalog order.
///
/// GPU uploads must happen on the raylib thread, so the worker only hands
/// back encoded bytes; the render loop drains them with [`Fetcher::drain`].
pub struct Fetcher {
    receiver: Receiver<Fetched>,
    handle: Option<JoinHandle<()>>,
    remaining: usize,
}

impl Fetcher {
    pub fn spawn(records: Vec<ImageRecord>, timeout: Duration) -> std::io::Result<Self> {
        let remaining = records.len();
        let (sender, receiver) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("image-fetch".into())
            .spawn(move || {
                let client = match texture_loader::http_client(timeout) {
                    Ok(client) => client,
                    Err(e) => {
                        log::error!("failed to build http client: {}", e);
                        return;
                    }
                };
                for (index, record) in records.iter().enumerate() {
                    let result = texture_loader::fetch(&client, record);
                    if sender.send((index, result)).is_err() {
                        // Receiver dropped: the carousel was torn down.
                        return;
                    }
                }
            })?;

        Ok(Self {
            receiver,
            handle: Some(handle),
            remaining,
        })
    }

    /// Everything fetched since the last call, without blocking.
    pub fn drain(&mut self) -> Vec<Fetched> {
        let mut fetched = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(item) => {
                    self.remaining = self.remaining.saturating_sub(1);
                    fetched.push(item);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.remaining > 0 {
                        log::warn!("image worker stopped with {} images pending", self.remaining);
                        self.remaining = 0;
                    }
                    break;
                }
            }
        }
        fetched
    }

    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }
}

impl Drop for Fetcher {
    fn drop(&mut self) {
        // Detach if still busy; the worker exits on its next send.
        if let Some(handle) = self.handle.take() {
            if handle.is_finished() {
                let _ = handle.join();
            }
        }
    }
}
