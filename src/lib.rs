//! Addressable priority queue: a binary heap over arbitrary objects where every object is
//! identified by a key derived from it, so it can be looked up, replaced or removed in
//! logarithmic time instead of only being peeked at or popped from the head.
//!
//! The heap is single-threaded. Callers that share it between threads wrap it in a lock.

pub mod config;
pub mod error;
pub mod heap;
mod prelude;

pub use config::HeapConfig;
pub use error::HeapError;
pub use heap::{IndexedHeap, KeyFn, LessFn};

/// Install an `env_logger` that prefixes every record with the host name, log target and the
/// number of seconds since the logger was initialized. Filtering follows `RUST_LOG`. Calling this
/// more than once is harmless.
pub fn initialize_logger() {
    use std::time::Instant;

    lazy_static::lazy_static! {
        static ref START_TIMING: Instant = Instant::now();
        static ref HOST: String = match ::hostname::get() {
            Ok(s) => s.to_string_lossy().into_owned(),
            Err(_) => "<anonymous>".into(),
        };
    }

    let _ = *START_TIMING;

    let _ = env_logger::Builder::from_default_env()
        .format(|formatter, record| {
            use std::io::Write;

            writeln!(
                formatter,
                "[{} {} {:.06}] {}: {}",
                *HOST,
                record.target(),
                START_TIMING.elapsed().as_secs_f64(),
                record.level(),
                record.args(),
            )
        })
        .try_init();
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_initialize_logger_twice() {
        initialize_logger();
        initialize_logger();

        let mut heap = IndexedHeap::boxed(
            |x: &u32| -> anyhow::Result<String> { Ok(x.to_string()) },
            |a: &u32, b: &u32| a < b,
        );
        heap.add(3).unwrap();
        heap.add(1).unwrap();
        assert_eq!(heap.pop().unwrap(), 1);
    }
}
