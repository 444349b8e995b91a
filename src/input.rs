use crate::clock::DummyClock;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// reads raw lines from whatever the user is typing into
pub trait Console {
    /// Block until a whole line has been typed and return it, newline
    /// included. `None` means the input has ended; a trailing line with
    /// no newline counts as ended too.
    fn read_line(&mut self) -> Result<Option<Vec<u8>>, io::Error>;
}

/// simple implementation of Console, using STDIN
pub struct StdinConsole {
    stdin: io::Stdin,
}

impl StdinConsole {
    pub fn new() -> Self {
        StdinConsole { stdin: io::stdin() }
    }
}

impl Default for StdinConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdinConsole {
    fn read_line(&mut self) -> Result<Option<Vec<u8>>, io::Error> {
        // the prompt has to be out before we block
        io::stdout().flush()?;
        let mut line = Vec::new();
        self.stdin.lock().read_until(b'\n', &mut line)?;
        if line.last() == Some(&b'\n') {
            Ok(Some(line))
        } else {
            Ok(None)
        }
    }
}

/// Scripted Console for testing: hands out canned lines, optionally
/// moving a [`DummyClock`] on first to fake the user taking their time.
pub struct DummyConsole {
    lines: VecDeque<(Duration, Vec<u8>)>,
    clock: Option<DummyClock>,
    reads: usize,
}

impl DummyConsole {
    pub fn new(lines: &[&str]) -> Self {
        let mut c = DummyConsole {
            lines: VecDeque::new(),
            clock: None,
            reads: 0,
        };
        for line in lines {
            c.push(line);
        }
        c
    }

    /// tie the console to a clock, so delays mean something
    pub fn with_clock(mut self, clock: DummyClock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn push(&mut self, line: &str) {
        self.push_after(Duration::ZERO, line);
    }

    /// queue a line that turns up `delay` after it's asked for
    pub fn push_after(&mut self, delay: Duration, line: &str) {
        self.lines.push_back((delay, line.as_bytes().to_vec()));
    }

    /// how many times read_line has been called
    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl Console for DummyConsole {
    fn read_line(&mut self) -> Result<Option<Vec<u8>>, io::Error> {
        self.reads += 1;
        match self.lines.pop_front() {
            Some((delay, line)) => {
                if let Some(clock) = &self.clock {
                    clock.advance(delay);
                }
                Ok(Some(line))
            }
            None => Ok(None),
        }
    }
}
