use std::borrow::Cow;
use std::time::Instant;

/// Logs how long the enclosing scope took when dropped.
pub struct ScopedTimer {
    name: Cow<'static, str>,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::info!("{} took {:?}", self.name, self.start.elapsed());
    }
}
