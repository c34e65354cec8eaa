//! A display surface owned by a dedicated thread.

use std::cell::RefCell;
use std::thread::{self, JoinHandle, ThreadId};

use crossbeam_channel::Sender;
use parking_lot::Mutex;

use crate::models::error::CaptureError;
use crate::traits::display_surface::{DisplaySurface, SurfaceGeometry, SurfaceJob};

type Envelope = (SurfaceJob, Sender<()>);

thread_local! {
    // Geometry owned by the current thread, if it is a surface owner thread.
    static OWNED_GEOMETRY: RefCell<Option<Box<dyn SurfaceGeometry>>> = RefCell::new(None);
}

/// Surface geometry living on its own named thread.
///
/// The geometry is constructed on the owner thread and never leaves it, so
/// it does not need to be `Send`. Callers on other threads hand jobs over a
/// channel and wait on a rendezvous channel until the job has run. Jobs
/// issued from the owner thread itself run inline.
pub struct UiThread {
    owner: ThreadId,
    jobs: Mutex<Option<Sender<Envelope>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl UiThread {
    /// Spawn the owner thread and build the geometry on it with `make`.
    pub fn spawn<G, F>(name: &str, make: F) -> Result<Self, CaptureError>
    where
        G: SurfaceGeometry + 'static,
        F: FnOnce() -> G + Send + 'static,
    {
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<Envelope>();

        let handle = thread::Builder::new()
            .name(name.into())
            .spawn(move || {
                let geometry: Box<dyn SurfaceGeometry> = Box::new(make());
                OWNED_GEOMETRY.with(|slot| *slot.borrow_mut() = Some(geometry));

                for (job, done) in job_rx.iter() {
                    OWNED_GEOMETRY.with(|slot| {
                        if let Some(geometry) = slot.borrow().as_deref() {
                            job(geometry);
                        }
                    });
                    let _ = done.send(());
                }

                OWNED_GEOMETRY.with(|slot| slot.borrow_mut().take());
                log::debug!("surface owner thread exiting");
            })
            .map_err(|e| {
                log::error!("failed to spawn surface thread: {}", e);
                CaptureError::SurfaceUnavailable
            })?;

        Ok(Self {
            owner: handle.thread().id(),
            jobs: Mutex::new(Some(job_tx)),
            handle: Mutex::new(Some(handle)),
        })
    }

    pub fn is_owner_thread(&self) -> bool {
        thread::current().id() == self.owner
    }

    /// Stop accepting jobs and wait for the owner thread to finish the ones
    /// already queued.
    pub fn shutdown(&self) {
        self.jobs.lock().take();
        if self.is_owner_thread() {
            return;
        }
        if let Some(handle) = self.handle.lock().take() {
            let _ = handle.join();
        }
    }
}

impl DisplaySurface for UiThread {
    fn invoke(&self, job: SurfaceJob) -> Result<(), CaptureError> {
        if self.is_owner_thread() {
            return OWNED_GEOMETRY.with(|slot| match slot.borrow().as_deref() {
                Some(geometry) => {
                    job(geometry);
                    Ok(())
                }
                None => Err(CaptureError::SurfaceUnavailable),
            });
        }

        let jobs = self
            .jobs
            .lock()
            .clone()
            .ok_or(CaptureError::SurfaceUnavailable)?;

        let (done_tx, done_rx) = crossbeam_channel::bounded(0);
        jobs.send((job, done_tx))
            .map_err(|_| CaptureError::SurfaceUnavailable)?;
        done_rx.recv().map_err(|_| CaptureError::SurfaceUnavailable)
    }
}

impl Drop for UiThread {
    fn drop(&mut self) {
        self.shutdown();
    }
}
