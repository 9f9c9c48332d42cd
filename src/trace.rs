//! Human-readable trace of each algorithmic step
//!
//! Operations never write to a shared log. Each one returns its result together with the lines it
//! produced, and the caller decides where those lines go.

/// A value together with the ordered trace lines that produced it
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Traced<T> {
    value: T,
    trace: Vec<String>,
}

impl<T> Traced<T> {
    pub fn new(value: T, trace: Vec<String>) -> Self {
        return Self { value, trace };
    }

    /// A value with a single trace line
    pub fn with_line(value: T, line: String) -> Self {
        return Self::new(value, vec![line]);
    }

    pub fn get_value(&self) -> &T {
        return &self.value;
    }

    pub fn get_trace(&self) -> &[String] {
        return &self.trace;
    }

    pub fn into_parts(self) -> (T, Vec<String>) {
        return (self.value, self.trace);
    }

    /// Move the trace lines to the end of a caller-owned log and return the value
    pub fn log_into(self, log: &mut Vec<String>) -> T {
        log.extend(self.trace);
        return self.value;
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Traced<U> {
        return Traced::new(f(self.value), self.trace);
    }
}
