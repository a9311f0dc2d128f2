use std::fmt::Debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::marker::PhantomData;

/// Sink that records events with Debug information, one per line, each prefixed with the
/// tick the event happened on.
pub struct EventLog<E, W: Write> {
    phantom: PhantomData<E>,
    log_writer: BufWriter<W>,
}

impl<E, W: Write> EventLog<E, W> {
    pub fn new(writer: W) -> EventLog<E, W> {
        EventLog {
            phantom: PhantomData,
            log_writer: BufWriter::new(writer),
        }
    }
}

impl<E> EventLog<E, File> {
    /// File-backed log. You must provide a unique filename.
    pub fn to_file(name: &str) -> std::io::Result<EventLog<E, File>> {
        Ok(EventLog::new(File::create(name)?))
    }
}

/// "It is critical to call flush before BufWriter<W> is dropped.
/// Though dropping will attempt to flush the the contents of the buffer, any errors that happen in
/// the process of dropping will be ignored. Calling flush ensures that the buffer is empty and thus
/// dropping will not even attempt file operations."
/// https://doc.rust-lang.org/std/io/struct.BufWriter.html
impl<E, W: Write> Drop for EventLog<E, W> {
    fn drop(&mut self) {
        self.log_writer.flush().unwrap();
    }
}

impl<E: Debug, W: Write> EventLog<E, W> {
    /// Records one event and hands it back, so a recording can sit inline in a tick loop.
    pub fn record(&mut self, tick: usize, event: E) -> E {
        self.log_writer
            .write_all(format!("{} {:?}\n", tick, event).as_ref())
            .unwrap();
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir_all, remove_file};
    use std::io::Read;
    use std::path::Path;
    use uuid::Uuid;

    fn test_event_log(events: Vec<i32>, expected_log: &str) {
        let log_dir = Path::new("test_logs");
        let log_filename = format!("{}.log", Uuid::new_v4());
        let log_path = log_dir.join(log_filename);
        create_dir_all(log_dir).unwrap();

        let mut log = EventLog::to_file(log_path.to_str().unwrap()).unwrap();

        let res_events: Vec<i32> = events
            .clone()
            .into_iter()
            .enumerate()
            .map(|(tick, event)| log.record(tick, event))
            .collect();
        assert_eq!(res_events, events); // assert identity

        std::mem::drop(log); // dropping to flush internal BufWriter

        let mut log_file = File::open(log_path.clone()).unwrap();
        let mut contents = String::new();
        log_file.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, expected_log);
        remove_file(log_path).unwrap();
    }

    #[test]
    fn writes_nothing() {
        test_event_log(vec![], "");
    }

    #[test]
    fn writes_one_event() {
        test_event_log(vec![10], "0 10\n");
    }

    #[test]
    fn writes_a_stream_of_events_in_tick_order() {
        test_event_log((20..25).collect(), "0 20\n1 21\n2 22\n3 23\n4 24\n");
    }

    #[test]
    fn records_debug_formatting() {
        let mut buffer = vec![];
        {
            let mut log: EventLog<Option<&str>, _> = EventLog::new(&mut buffer);
            log.record(7, Some("found"));
            log.record(9, None);
        }
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "7 Some(\"found\")\n9 None\n"
        );
    }
}
