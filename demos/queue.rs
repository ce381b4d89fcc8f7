//! Background queue example.
//!
//! Routes records through the queue thread so emitting threads never block
//! on a slow sink. The thread name in each line is the emitting thread,
//! not the queue thread.

use std::thread;

use logkit::{LogConfig, ROOT_LOGGER};

fn main() {
    let config = LogConfig::new()
        .with_app("queue")
        .with_file(false)
        .with_console_format("{timestamp} [{level}] {thread}: {message}")
        .with_queue(true);
    logkit::setup(&config);

    let workers: Vec<_> = (0..4)
        .map(|id| {
            thread::Builder::new()
                .name(format!("worker-{}", id))
                .spawn(move || {
                    for i in 0..5 {
                        log::info!("item {} done", i);
                    }
                })
                .expect("spawn worker")
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker finished");
    }

    // Detaching the handlers drains the queue before the program exits.
    logkit::registry().clear_handlers(ROOT_LOGGER);
}
