//! Progress reporting
//!
//! A translate call optionally receives an observer and drives it
//! synchronously: bounds once at run start from the graph size, one value
//! update per processed unit. Progress is a side channel only; correctness
//! never depends on it, and observers must not block.

/// Observer for per-record translation progress
pub trait ProgressObserver {
    /// Called once at run start with the inclusive value range
    fn set_bounds(&mut self, min: usize, max: usize);

    /// Called after each processed record with the current count
    fn set_value(&mut self, value: usize);

    /// Optional run title, e.g. which engine is driving the observer
    fn set_title(&mut self, _title: &str) {}
}

/// Recording observer for tests
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub bounds: Option<(usize, usize)>,
    pub values: Vec<usize>,
    pub title: Option<String>,
}

impl ProgressObserver for RecordingObserver {
    fn set_bounds(&mut self, min: usize, max: usize) {
        self.bounds = Some((min, max));
    }

    fn set_value(&mut self, value: usize) {
        self.values.push(value);
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer_captures_protocol() {
        let mut observer = RecordingObserver::default();
        observer.set_title("run");
        observer.set_bounds(0, 3);
        observer.set_value(1);
        observer.set_value(2);
        assert_eq!(observer.bounds, Some((0, 3)));
        assert_eq!(observer.values, vec![1, 2]);
        assert_eq!(observer.title.as_deref(), Some("run"));
    }
}
