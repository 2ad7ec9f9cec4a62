use std::cmp::Ordering;
use std::env;
use std::process::Command;

// CPU features that select a lane backend
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    cfg_flag: &'static str,
    detected: bool,
}

impl CpuFeature {
    // Lowest number == highest priority
    fn priority(&self) -> usize {
        match self.name {
            "avx512f" => 0,
            "avx2" => 1,
            "neon" => 2,
            _ => usize::MAX,
        }
    }

    // Backends compiled on a stable toolchain
    fn features() -> Vec<CpuFeature> {
        vec![
            CpuFeature {
                name: "avx2",
                cfg_flag: "avx2",
                detected: false,
            },
            CpuFeature {
                name: "neon",
                cfg_flag: "neon",
                detected: false,
            },
        ]
    }

    // AVX-512 lane types need rustc 1.89+ or the nightly target-feature gates
    fn avx512_features() -> Vec<CpuFeature> {
        let mut features = Self::features();
        features.push(CpuFeature {
            name: "avx512f",
            cfg_flag: "avx512",
            detected: false,
        });
        features
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            for feature in features.iter_mut() {
                // aarch64 kernels report NEON as "asimd"
                feature.detected = match feature.name {
                    "neon" => contents.contains("neon") || contents.contains("asimd"),
                    name => contents.contains(name),
                };
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                match feature.name {
                    "avx512f" => feature.detected = contents.contains("hw.optional.avx512f: 1"),
                    "avx2" => feature.detected = contents.contains("hw.optional.avx2_0: 1"),
                    "neon" => feature.detected = contents.contains("hw.optional.neon: 1"),
                    _ => {}
                }
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn rustc_version_info() -> String {
        let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
        Command::new(rustc)
            .args(["--version", "--verbose"])
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).into_owned())
            .unwrap_or_default()
    }

    fn compiler_channel(version_info: &str) -> &'static str {
        if version_info.contains("nightly") {
            "nightly"
        } else {
            "stable"
        }
    }

    // Minor version from the `release: 1.<minor>.<patch>[-channel]` line
    fn rustc_minor(version_info: &str) -> Option<u32> {
        version_info
            .lines()
            .find_map(|line| line.strip_prefix("release: "))
            .and_then(|release| release.split('.').nth(1))
            .and_then(|minor| minor.parse().ok())
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        for detector in Self::cpu_features_detectors() {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    fn target_arch_supports(feature: &CpuFeature) -> bool {
        let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
        match feature.name {
            "avx512f" | "avx2" => arch == "x86_64" || arch == "x86",
            "neon" => arch == "aarch64" || arch == "arm",
            _ => false,
        }
    }

    // Every detected backend is enabled: an AVX-512 host still wants the
    // AVX2 8-lane f32 and 4-lane f64 types.
    fn apply(features: &mut [CpuFeature]) {
        features.sort();

        let enabled: Vec<&'static str> = features
            .iter()
            .filter(|feature| feature.detected && Self::target_arch_supports(feature))
            .map(|feature| feature.cfg_flag)
            .collect();

        if enabled.is_empty() {
            println!("cargo:rustc-cfg=fallback");
        }

        for cfg_flag in &enabled {
            println!("cargo:rustc-cfg={cfg_flag}");
        }

        println!("cargo::rustc-check-cfg=cfg(avx512)");
        println!("cargo::rustc-check-cfg=cfg(avx2)");
        println!("cargo::rustc-check-cfg=cfg(neon)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let version_info = PlatformDetector::rustc_version_info();
    let rustc_channel = PlatformDetector::compiler_channel(&version_info);

    println!("cargo:rustc-cfg=rustc_channel=\"{rustc_channel}\"");
    println!("cargo::rustc-check-cfg=cfg(rustc_channel, values(\"nightly\", \"stable\"))");

    // AVX-512 target features and intrinsics are stable since 1.89
    let avx512_stable = PlatformDetector::rustc_minor(&version_info).is_some_and(|minor| minor >= 89);
    if avx512_stable {
        println!("cargo:rustc-cfg=avx512_stable");
    }
    println!("cargo::rustc-check-cfg=cfg(avx512_stable)");

    let mut features = if avx512_stable || rustc_channel == "nightly" {
        CpuFeature::avx512_features()
    } else {
        CpuFeature::features()
    };

    // Only probe the host when it is also the target
    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();

    if host == target {
        PlatformDetector::detect_cpu_features(&mut features);
    }

    PlatformDetector::apply(&mut features);
}
