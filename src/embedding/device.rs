use candle_core::Device;
use tracing::debug;

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::{info, warn};

/// Picks the compute device: Metal, then CUDA (when compiled in), else CPU.
///
/// `force_cpu` skips the GPU probes entirely. Never fails; an unusable GPU degrades to CPU.
pub fn select_device(force_cpu: bool) -> Device {
    if force_cpu {
        debug!("CPU forced by configuration");
        return Device::Cpu;
    }

    #[cfg(any(feature = "metal", feature = "cuda"))]
    let mut failures: Vec<String> = Vec::new();

    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            info!("Using Metal GPU acceleration");
            return device;
        }
        Err(e) => {
            warn!(error = %e, "Metal device unavailable");
            failures.push(format!("metal failed: {e}"));
        }
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            info!("Using CUDA GPU acceleration");
            return device;
        }
        Err(e) => {
            warn!(error = %e, "CUDA device unavailable");
            failures.push(format!("cuda failed: {e}"));
        }
    }

    #[cfg(any(feature = "metal", feature = "cuda"))]
    warn!(reason = %failures.join("; "), "Falling back to CPU device");

    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    debug!("No GPU backend compiled, using CPU");

    Device::Cpu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_cpu() {
        assert!(matches!(select_device(true), Device::Cpu));
    }

    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    #[test]
    fn test_cpu_without_gpu_features() {
        assert!(matches!(select_device(false), Device::Cpu));
    }
}
