//! Bookkeeping for children launched in the background.
//!
//! The launcher never waits for these. They are polled with a non-blocking
//! `try_wait` before each prompt so finished children do not linger as zombies.

use log::{info, warn};
use std::io;
use std::process::{Child, ExitStatus};

#[derive(Debug, Default)]
pub struct BackgroundJobs {
    children: Vec<Child>,
}

impl BackgroundJobs {
    pub fn push(&mut self, child: Child) {
        self.children.push(child);
    }

    /// Number of children not yet known to have finished.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Collects every child that has already terminated, without blocking.
    ///
    /// Returns the pid and status of each reaped child. A child that cannot be
    /// polled stays in the table and is polled again next time.
    pub fn reap(&mut self) -> Vec<(u32, ExitStatus)> {
        let mut reaped = Vec::new();
        self.children.retain_mut(|child| {
            let pid = child.id();
            match finished(pid, child.try_wait()) {
                Some(status) => {
                    reaped.push((pid, status));
                    false
                }
                None => true,
            }
        });
        reaped
    }
}

/// Interprets one `try_wait` result; `None` keeps the child.
fn finished(pid: u32, poll: io::Result<Option<ExitStatus>>) -> Option<ExitStatus> {
    match poll {
        Ok(Some(status)) => {
            info!("background job {} finished: {}", pid, status);
            Some(status)
        }
        Ok(None) => None,
        Err(e) => {
            warn!("failed to poll background job {}: {}", pid, e);
            None
        }
    }
}
