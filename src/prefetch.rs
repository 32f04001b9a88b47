//! Background image prefetch.
//!
//! One decode thread, fed fire-and-forget over a channel. Requests for
//! neighbors of the current image (and for grid thumbnails) are sent without
//! tracking, cancellation or completion guarantees: a decode for an index
//! the user already skipped is wasted work, not an error. Decoded pixels
//! flow back over a second channel and are drained on the UI thread each
//! frame.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::loader::DecodedImage;

/// What resolution a request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    /// Downscaled for the grid.
    Thumbnail,
    /// Full resolution for the overlay.
    Full,
}

#[derive(Debug)]
struct PrefetchRequest {
    index: usize,
    path: PathBuf,
    kind: ImageKind,
}

/// A decode that completed. Whether anyone still wants it is the receiver's
/// problem.
#[derive(Debug)]
pub struct DecodedEntry {
    pub index: usize,
    pub kind: ImageKind,
    pub image: DecodedImage,
}

/// One finished unit of worker output. Failures are reported so the UI can
/// stop re-requesting a file that will never decode.
#[derive(Debug)]
pub enum PrefetchOutcome {
    Decoded(DecodedEntry),
    Failed { index: usize, kind: ImageKind },
}

/// Handle to the decode worker. Dropping it disconnects the request channel
/// and the worker exits.
pub struct Prefetcher {
    request_tx: Sender<PrefetchRequest>,
    result_rx: Receiver<PrefetchOutcome>,
    in_flight: Arc<Mutex<HashSet<(usize, ImageKind)>>>,
}

impl Prefetcher {
    /// Spawn the worker. `on_ready` is invoked from the worker thread after
    /// each completed decode (the app passes a repaint request so results
    /// get drained even while idle).
    pub fn spawn(thumbnail_max_side: u32, on_ready: impl Fn() + Send + 'static) -> Self {
        let (request_tx, request_rx) = crossbeam_channel::unbounded::<PrefetchRequest>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<PrefetchOutcome>();
        let in_flight: Arc<Mutex<HashSet<(usize, ImageKind)>>> = Arc::default();

        let worker_in_flight = Arc::clone(&in_flight);
        thread::Builder::new()
            .name("glidewall-prefetch".into())
            .spawn(move || {
                while let Ok(request) = request_rx.recv() {
                    let max_side = match request.kind {
                        ImageKind::Thumbnail => Some(thumbnail_max_side),
                        ImageKind::Full => None,
                    };
                    // Receiver may be gone during shutdown; sends are best-effort.
                    match DecodedImage::load(&request.path, max_side) {
                        Ok(image) => {
                            debug!(index = request.index, kind = ?request.kind, "decoded");
                            let _ = result_tx.send(PrefetchOutcome::Decoded(DecodedEntry {
                                index: request.index,
                                kind: request.kind,
                                image,
                            }));
                        }
                        Err(err) => {
                            warn!("prefetch failed: {err}");
                            let _ = result_tx.send(PrefetchOutcome::Failed {
                                index: request.index,
                                kind: request.kind,
                            });
                        }
                    }
                    worker_in_flight
                        .lock()
                        .remove(&(request.index, request.kind));
                    on_ready();
                }
            })
            .expect("failed to spawn prefetch thread");

        Self {
            request_tx,
            result_rx,
            in_flight,
        }
    }

    /// Queue a decode. Duplicate requests for work already in flight are
    /// dropped; so is everything if the worker is gone.
    pub fn request(&self, index: usize, path: &std::path::Path, kind: ImageKind) {
        if !self.in_flight.lock().insert((index, kind)) {
            return;
        }
        let _ = self.request_tx.send(PrefetchRequest {
            index,
            path: path.to_path_buf(),
            kind,
        });
    }

    /// Collect every outcome that has completed since the last drain.
    pub fn drain(&self) -> Vec<PrefetchOutcome> {
        self.result_rx.try_iter().collect()
    }
}
