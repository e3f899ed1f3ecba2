//! Screen acquisition with a preferred native tool and a generic fallback chain.
//!
//! Backends report plain I/O failures; `FallbackCapture` is the single place those
//! become `WingmanError::Capture`.

use super::CaptureConfig;
use crate::error::WingmanError;
use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Stdio;
use tracing::{debug, error, warn};

/// Writes one screenshot to a destination path
#[async_trait]
pub trait CaptureBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn capture_to(&self, destination: &Path) -> io::Result<()>;
}

/// Acquires one screenshot, falling back as needed
#[async_trait]
pub trait CaptureStrategy: Send + Sync {
    async fn acquire(&self, destination: &Path) -> Result<(), WingmanError>;
}

const PATH_PLACEHOLDER: &str = "{path}";

/// External command backend. `{path}` in any argument is replaced with the destination.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    program: String,
    args: Vec<String>,
}

impl CommandBackend {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Parse a whitespace-separated template such as `grim {path}`.
    pub fn parse(template: &str) -> Option<Self> {
        let mut parts = template.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn render_args(&self, destination: &Path) -> Vec<String> {
        let dest = destination.to_string_lossy();
        self.args
            .iter()
            .map(|a| a.replace(PATH_PLACEHOLDER, &dest))
            .collect()
    }
}

#[async_trait]
impl CaptureBackend for CommandBackend {
    fn name(&self) -> &str {
        &self.program
    }

    async fn capture_to(&self, destination: &Path) -> io::Result<()> {
        let args = self.render_args(destination);
        debug!(program = %self.program, ?args, "Running capture command");

        let output = tokio::process::Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    stderr.trim()
                ),
            ));
        }

        tokio::fs::metadata(destination).await.map_err(|_| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} reported success but wrote no file", self.program),
            )
        })?;
        Ok(())
    }
}

/// Tries each backend in order until one succeeds
pub struct BackendChain {
    name: String,
    backends: Vec<Box<dyn CaptureBackend>>,
}

impl BackendChain {
    pub fn new(name: impl Into<String>, backends: Vec<Box<dyn CaptureBackend>>) -> Self {
        Self {
            name: name.into(),
            backends,
        }
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

#[async_trait]
impl CaptureBackend for BackendChain {
    fn name(&self) -> &str {
        &self.name
    }

    async fn capture_to(&self, destination: &Path) -> io::Result<()> {
        let mut failures = Vec::new();
        for backend in &self.backends {
            match backend.capture_to(destination).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    debug!(backend = backend.name(), error = %e, "Capture backend failed");
                    failures.push(format!("{}: {}", backend.name(), e));
                }
            }
        }
        if failures.is_empty() {
            failures.push("no capture backends configured".to_string());
        }
        Err(io::Error::new(io::ErrorKind::Other, failures.join("; ")))
    }
}

/// Preferred native backend (if any) with a generic fallback
pub struct FallbackCapture {
    preferred: Option<Box<dyn CaptureBackend>>,
    fallback: Box<dyn CaptureBackend>,
}

impl FallbackCapture {
    pub fn new(
        preferred: Option<Box<dyn CaptureBackend>>,
        fallback: Box<dyn CaptureBackend>,
    ) -> Self {
        Self {
            preferred,
            fallback,
        }
    }

    /// Strategy for the running OS, honoring command overrides from config.
    pub fn for_current_platform(config: &CaptureConfig) -> Self {
        Self::for_platform(std::env::consts::OS, config)
    }

    pub fn for_platform(os: &str, config: &CaptureConfig) -> Self {
        let preferred: Option<Box<dyn CaptureBackend>> = match &config.preferred_command {
            Some(template) => CommandBackend::parse(template)
                .map(|b| Box::new(b) as Box<dyn CaptureBackend>),
            None if os == "macos" => Some(Box::new(CommandBackend::new(
                "screencapture",
                vec!["-C".to_string(), PATH_PLACEHOLDER.to_string()],
            ))),
            None => None,
        };

        let generic: Vec<Box<dyn CaptureBackend>> = if config.fallback_commands.is_empty() {
            generic_backends(os)
        } else {
            config
                .fallback_commands
                .iter()
                .filter_map(|t| CommandBackend::parse(t))
                .map(|b| Box::new(b) as Box<dyn CaptureBackend>)
                .collect()
        };

        Self::new(preferred, Box::new(BackendChain::new("generic", generic)))
    }

    pub fn has_preferred(&self) -> bool {
        self.preferred.is_some()
    }
}

#[async_trait]
impl CaptureStrategy for FallbackCapture {
    async fn acquire(&self, destination: &Path) -> Result<(), WingmanError> {
        let mut preferred_failure = None;
        if let Some(preferred) = &self.preferred {
            match preferred.capture_to(destination).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    warn!(
                        backend = preferred.name(),
                        error = %e,
                        "Preferred capture failed; falling back to generic capture"
                    );
                    preferred_failure = Some(format!("{}: {}", preferred.name(), e));
                }
            }
        }

        self.fallback.capture_to(destination).await.map_err(|e| {
            let message = match preferred_failure {
                Some(p) => format!("{}; fallback {}: {}", p, self.fallback.name(), e),
                None => format!("{}: {}", self.fallback.name(), e),
            };
            error!(destination = %destination.display(), %message, "Screen capture failed");
            WingmanError::Capture(message)
        })
    }
}

fn command(program: &str, args: &[&str]) -> Box<dyn CaptureBackend> {
    Box::new(CommandBackend::new(
        program,
        args.iter().map(|a| a.to_string()).collect(),
    ))
}

const WINDOWS_CAPTURE_SCRIPT: &str = "Add-Type -AssemblyName System.Windows.Forms,System.Drawing; \
$b=[System.Windows.Forms.Screen]::PrimaryScreen.Bounds; \
$bmp=New-Object System.Drawing.Bitmap $b.Width,$b.Height; \
$g=[System.Drawing.Graphics]::FromImage($bmp); \
$g.CopyFromScreen($b.Location,[System.Drawing.Point]::Empty,$b.Size); \
$bmp.Save('{path}',[System.Drawing.Imaging.ImageFormat]::Png)";

/// Platform defaults for the generic capture chain.
fn generic_backends(os: &str) -> Vec<Box<dyn CaptureBackend>> {
    match os {
        "macos" => vec![command("screencapture", &["-x", PATH_PLACEHOLDER])],
        "windows" => vec![command(
            "powershell",
            &["-NoProfile", "-NonInteractive", "-Command", WINDOWS_CAPTURE_SCRIPT],
        )],
        _ => vec![
            command("grim", &[PATH_PLACEHOLDER]),
            command("gnome-screenshot", &["-f", PATH_PLACEHOLDER]),
            command("scrot", &["--overwrite", PATH_PLACEHOLDER]),
            command("import", &["-window", "root", PATH_PLACEHOLDER]),
        ],
    }
}
