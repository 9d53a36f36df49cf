//! Background regeneration that coalesces bursts of settings changes.
//!
//! Every request gets a generation number. The worker thread skips to the
//! newest queued request before building, abandons a result whose request
//! was superseded while it was building, and [`RegenerationWorker::poll`]
//! only hands back the result for the latest generation submitted.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::JoinHandle;

use orbis_config::PlanetConfig;
use orbis_terrain::NoiseSource;
use tracing::debug;

use crate::PlanetError;
use crate::assembler::PlanetMeshes;

/// A queued rebuild.
struct RegenerationRequest {
    generation: u64,
    config: PlanetConfig,
}

/// A finished rebuild.
pub struct RegenerationResult {
    /// Generation number returned by [`RegenerationWorker::submit`].
    pub generation: u64,
    /// Settings the meshes were built from.
    pub config: PlanetConfig,
    /// The new meshes, or why the rebuild failed.
    pub meshes: Result<PlanetMeshes, PlanetError>,
}

/// Single background thread that rebuilds planet meshes.
pub struct RegenerationWorker {
    request_sender: Option<crossbeam_channel::Sender<RegenerationRequest>>,
    result_receiver: crossbeam_channel::Receiver<RegenerationResult>,
    handle: Option<JoinHandle<()>>,
    latest_submitted: Arc<AtomicU64>,
    latest_received: u64,
}

impl RegenerationWorker {
    /// Spawn the worker thread. Every rebuild samples `noise`.
    pub fn new(noise: Arc<dyn NoiseSource>) -> Result<Self, PlanetError> {
        let (request_tx, request_rx) = crossbeam_channel::unbounded::<RegenerationRequest>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded();
        let latest_submitted = Arc::new(AtomicU64::new(0));
        let latest = Arc::clone(&latest_submitted);

        let handle = std::thread::Builder::new()
            .name("orbis-regen".to_string())
            .spawn(move || {
                while let Ok(mut request) = request_rx.recv() {
                    let mut skipped = 0usize;
                    while let Ok(newer) = request_rx.try_recv() {
                        request = newer;
                        skipped += 1;
                    }
                    if skipped > 0 {
                        debug!(
                            skipped,
                            generation = request.generation,
                            "Coalesced stale requests"
                        );
                    }

                    let meshes = PlanetMeshes::build(&request.config, noise.as_ref());

                    if latest.load(Ordering::Acquire) != request.generation {
                        debug!(generation = request.generation, "Discarding superseded rebuild");
                        continue;
                    }
                    let result = RegenerationResult {
                        generation: request.generation,
                        config: request.config,
                        meshes,
                    };
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
            })
            .map_err(|_| PlanetError::WorkerStopped)?;

        Ok(Self {
            request_sender: Some(request_tx),
            result_receiver: result_rx,
            handle: Some(handle),
            latest_submitted,
            latest_received: 0,
        })
    }

    /// Queue a rebuild and return its generation number.
    ///
    /// Any earlier request still queued or building becomes stale.
    pub fn submit(&self, config: PlanetConfig) -> Result<u64, PlanetError> {
        let sender = self.request_sender.as_ref().ok_or(PlanetError::WorkerStopped)?;
        let generation = self.latest_submitted.fetch_add(1, Ordering::AcqRel) + 1;
        sender
            .send(RegenerationRequest { generation, config })
            .map_err(|_| PlanetError::WorkerStopped)?;
        Ok(generation)
    }

    /// Take the result for the latest submitted generation, if it is ready.
    ///
    /// Results for older generations are dropped.
    pub fn poll(&mut self) -> Option<RegenerationResult> {
        let latest = self.latest_submitted.load(Ordering::Acquire);
        let mut found = None;
        while let Ok(result) = self.result_receiver.try_recv() {
            if result.generation == latest {
                self.latest_received = result.generation;
                found = Some(result);
            }
        }
        found
    }

    /// Whether the latest submitted generation has not been polled yet.
    pub fn is_pending(&self) -> bool {
        self.latest_submitted.load(Ordering::Acquire) > self.latest_received
    }

    /// Most recent generation number handed out.
    pub fn latest_generation(&self) -> u64 {
        self.latest_submitted.load(Ordering::Acquire)
    }

    /// Stop accepting requests and join the thread.
    pub fn shutdown(&mut self) {
        self.request_sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RegenerationWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
