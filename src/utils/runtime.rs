use std::future::Future;
use tokio::runtime::Builder;

/// Drive one request's future to completion on a single-threaded runtime.
///
/// The pipeline awaits each upstream call in turn, so a current-thread
/// runtime is all it needs. A new runtime per call keeps nothing alive
/// between invocations.
pub fn block_on<F>(future: F) -> std::io::Result<F::Output>
where
    F: Future,
{
    let runtime = Builder::new_current_thread().enable_all().build()?;
    Ok(runtime.block_on(future))
}
