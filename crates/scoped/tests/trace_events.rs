//! Ownership transitions reach the `log` facade when `trace` is enabled.
//!
//! Run with `cargo test -p scoped --features trace`.

#![cfg(feature = "trace")]

use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};
use scoped::{ArrayOwner, SingleOwner};

static RECORDS: Mutex<Vec<(String, String)>> = Mutex::new(Vec::new());

struct Collector;

impl Log for Collector {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        RECORDS
            .lock()
            .unwrap()
            .push((record.target().to_owned(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static COLLECTOR: Collector = Collector;

fn recorded(prefix: &str) -> usize {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(target, msg)| target == "scoped" && msg.starts_with(prefix))
        .count()
}

// One test per binary: the logger can only be installed once per process.
#[test]
fn transitions_emit_trace_events() {
    log::set_logger(&COLLECTOR).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let mut single = SingleOwner::from_box(Box::new(1u32));
    single.reset(Some(Box::new(2u32)));
    assert_eq!(recorded("reset destroys"), 1);

    let released = single.release();
    assert_eq!(released.as_deref(), Some(&2));
    assert_eq!(recorded("released"), 1);

    // Nothing held, nothing to report.
    drop(single);
    assert_eq!(recorded("dropping owned"), 0);

    let block = ArrayOwner::from(vec![1u8, 2, 3]);
    drop(block);
    assert_eq!(recorded("dropping owned"), 1);

    let mut empty = SingleOwner::<u32>::empty();
    empty.reset(None);
    assert_eq!(recorded("reset destroys"), 1);
}
