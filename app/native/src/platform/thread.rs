//! Named background threads.

use std::thread;

/// Spawns a thread called `artwall-{name}`, logging instead of panicking on failure.
///
/// Returns `false` when the OS refused to create the thread.
pub fn spawn_named_thread<F>(name: &str, task: F) -> bool
where F: FnOnce() + Send + 'static {
    let thread_name = format!("artwall-{name}");

    match thread::Builder::new().name(thread_name.clone()).spawn(task) {
        Ok(_) => true,
        Err(err) => {
            tracing::error!(thread = %thread_name, error = %err, "failed to spawn thread");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn test_spawned_thread_is_named() {
        let (tx, rx) = mpsc::channel();
        assert!(spawn_named_thread("worker", move || {
            let _ = tx.send(thread::current().name().map(ToString::to_string));
        }));
        assert_eq!(rx.recv().unwrap().as_deref(), Some("artwall-worker"));
    }
}
