//! Mock host for terminal testing

use termsite::settings::MemorySettings;
use termsite::terminal::{BufferSurface, Platform, Session};

/// Platform that counts beeps and reports a fixed time
#[derive(Debug, Default)]
pub struct MockPlatform {
    pub beeps: usize,
    pub now: u64,
}

impl MockPlatform {
    pub fn at(now: u64) -> Self {
        Self { beeps: 0, now }
    }
}

impl Platform for MockPlatform {
    fn beep(&mut self) {
        self.beeps += 1;
    }

    fn now_millis(&self) -> u64 {
        self.now
    }
}

pub type TestSession = Session<BufferSurface, MemorySettings, MockPlatform>;

/// Fresh session with built-in commands and empty settings
pub fn session() -> TestSession {
    Session::new(
        BufferSurface::new(),
        MemorySettings::new(),
        MockPlatform::default(),
    )
}

/// Screen contents of a session
pub fn screen(session: &TestSession) -> &str {
    session.surface().contents()
}
