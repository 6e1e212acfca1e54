//! Process resource snapshots logged between batch phases.

#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct ProcessSnapshot {
    pub cpu_usage: f32,
    pub memory_mb: u64,
    pub memory_percent: f32,
    pub peak_memory_mb: u64,
    pub elapsed: Duration,
}

#[cfg(feature = "cli")]
struct Tracker {
    system: System,
    pid: Pid,
    peak_memory_mb: u64,
}

#[cfg(feature = "cli")]
impl Tracker {
    fn snapshot(&mut self, elapsed: Duration) -> Option<ProcessSnapshot> {
        self.system.refresh_memory();
        self.system
            .refresh_processes(ProcessesToUpdate::Some(&[self.pid]), true);

        let process = self.system.process(self.pid)?;
        let memory_mb = process.memory() / 1024 / 1024;
        let total_mb = self.system.total_memory() / 1024 / 1024;
        self.peak_memory_mb = self.peak_memory_mb.max(memory_mb);

        Some(ProcessSnapshot {
            cpu_usage: process.cpu_usage(),
            memory_mb,
            memory_percent: if total_mb > 0 {
                memory_mb as f32 / total_mb as f32 * 100.0
            } else {
                0.0
            },
            peak_memory_mb: self.peak_memory_mb,
            elapsed,
        })
    }
}

/// Holds no sysinfo state unless monitoring was requested.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    tracker: Option<Mutex<Tracker>>,
    started: Instant,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let tracker = if enabled {
            match sysinfo::get_current_pid() {
                Ok(pid) => Some(Mutex::new(Tracker {
                    system: System::new(),
                    pid,
                    peak_memory_mb: 0,
                })),
                Err(e) => {
                    tracing::warn!("System monitoring unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            tracker,
            started: Instant::now(),
        }
    }

    pub fn snapshot(&self) -> Option<ProcessSnapshot> {
        let mut tracker = self.tracker.as_ref()?.lock().ok()?;
        tracker.snapshot(self.started.elapsed())
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(s) = self.snapshot() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB ({:.1}%), Peak: {}MB, Time: {:?}",
                phase,
                s.cpu_usage,
                s.memory_mb,
                s.memory_percent,
                s.peak_memory_mb,
                s.elapsed
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(s) = self.snapshot() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                s.elapsed,
                s.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.tracker.is_some()
    }
}

#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
