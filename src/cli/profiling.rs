//! Optional CPU and heap profiling around the summary run
//!
//! When a CPU profile path is configured, a sampling profiler runs for the
//! duration of the summary and writes a flamegraph SVG when finished. When a
//! heap profile path is configured, allocations are recorded by dhat and the
//! profile is written after the summary. Profiling never changes the summary
//! output.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::ProfilingConfig;
use crate::{Error, Result};

/// Running CPU profiler, finished explicitly after the summary run
pub struct CpuProfiler {
    output_path: PathBuf,
    #[cfg(unix)]
    guard: pprof::ProfilerGuard<'static>,
}

impl CpuProfiler {
    /// Start profiling if `config.cpu_profile` is set
    pub fn start(config: &ProfilingConfig) -> Result<Option<Self>> {
        let Some(output_path) = &config.cpu_profile else {
            return Ok(None);
        };

        info!(
            "Starting CPU profiler at {} Hz, writing to {}",
            config.frequency_hz,
            output_path.display()
        );
        Self::start_sampling(output_path, config.frequency_hz).map(Some)
    }

    #[cfg(unix)]
    fn start_sampling(output_path: &Path, frequency_hz: i32) -> Result<Self> {
        use crate::constants::PROFILE_BLOCKLIST;

        let guard = pprof::ProfilerGuardBuilder::default()
            .frequency(frequency_hz)
            .blocklist(PROFILE_BLOCKLIST)
            .build()
            .map_err(|e| Error::profiling(format!("Failed to start CPU profiler: {}", e)))?;

        Ok(Self {
            output_path: output_path.to_path_buf(),
            guard,
        })
    }

    #[cfg(not(unix))]
    fn start_sampling(output_path: &Path, _frequency_hz: i32) -> Result<Self> {
        Err(Error::profiling(format!(
            "CPU profiling is not supported on this platform (requested {})",
            output_path.display()
        )))
    }

    /// Stop sampling and write the flamegraph
    #[cfg(unix)]
    pub fn finish(self) -> Result<PathBuf> {
        let report = self
            .guard
            .report()
            .build()
            .map_err(|e| Error::profiling(format!("Failed to build CPU profile: {}", e)))?;

        let file = std::fs::File::create(&self.output_path).map_err(|e| {
            Error::io(
                format!("Failed to create profile {}", self.output_path.display()),
                e,
            )
        })?;
        report
            .flamegraph(file)
            .map_err(|e| Error::profiling(format!("Failed to write flamegraph: {}", e)))?;

        info!("CPU profile written to {}", self.output_path.display());
        Ok(self.output_path)
    }

    /// Stop sampling and write the flamegraph
    #[cfg(not(unix))]
    pub fn finish(self) -> Result<PathBuf> {
        Ok(self.output_path)
    }
}

/// Running heap profiler; the profile is written by `finish`
///
/// Needs the `dhat-heap` feature, which also installs `dhat::Alloc` as the
/// binary's global allocator.
pub struct HeapProfiler {
    output_path: PathBuf,
    #[cfg(feature = "dhat-heap")]
    profiler: dhat::Profiler,
}

impl HeapProfiler {
    /// Start recording allocations if `config.mem_profile` is set
    pub fn start(config: &ProfilingConfig) -> Result<Option<Self>> {
        let Some(output_path) = &config.mem_profile else {
            return Ok(None);
        };

        info!("Starting heap profiler, writing to {}", output_path.display());
        Self::start_recording(output_path).map(Some)
    }

    #[cfg(feature = "dhat-heap")]
    fn start_recording(output_path: &Path) -> Result<Self> {
        let profiler = dhat::Profiler::builder()
            .file_name(output_path)
            .build();

        Ok(Self {
            output_path: output_path.to_path_buf(),
            profiler,
        })
    }

    #[cfg(not(feature = "dhat-heap"))]
    fn start_recording(output_path: &Path) -> Result<Self> {
        Err(Error::profiling(format!(
            "Heap profiling needs a build with the `dhat-heap` feature (requested {})",
            output_path.display()
        )))
    }

    /// Stop recording and write the dhat profile
    #[cfg(feature = "dhat-heap")]
    pub fn finish(self) -> Result<PathBuf> {
        let Self {
            output_path,
            profiler,
        } = self;
        drop(profiler);

        info!("Heap profile written to {}", output_path.display());
        Ok(output_path)
    }

    /// Stop recording and write the dhat profile
    #[cfg(not(feature = "dhat-heap"))]
    pub fn finish(self) -> Result<PathBuf> {
        Ok(self.output_path)
    }
}
