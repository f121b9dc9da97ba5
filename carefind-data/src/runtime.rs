//! Drive async I/O from synchronous callers.

use std::future::Future;
use std::io;

use tokio::runtime::{Builder, Handle, RuntimeFlavor};

/// Run `future` to completion.
///
/// Inside a multi-threaded Tokio runtime the current worker is handed over
/// with [`tokio::task::block_in_place`]. Elsewhere a short-lived
/// current-thread runtime is built for the call. Calling this from a
/// `current_thread` runtime panics, as any nested `block_on` would.
pub(crate) fn block_on<F: Future>(future: F) -> io::Result<F::Output> {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            Ok(tokio::task::block_in_place(|| handle.block_on(future)))
        }
        _ => {
            let runtime = Builder::new_current_thread().enable_all().build()?;
            Ok(runtime.block_on(future))
        }
    }
}
