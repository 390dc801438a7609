//! Runtime platform identification and backend selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which kind of backend a platform stores secrets in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// OS-level encrypted keystore, private to the application.
    Keystore,
    /// Origin-scoped, unencrypted local storage (web).
    Local,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keystore => f.write_str("keystore"),
            Self::Local => f.write_str("local"),
        }
    }
}

/// Host platform identifier supplied at store construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Web,
    Macos,
    Windows,
    Linux,
}

impl Platform {
    /// All known platforms.
    pub const ALL: [Platform; 6] = [
        Platform::Ios,
        Platform::Android,
        Platform::Web,
        Platform::Macos,
        Platform::Windows,
        Platform::Linux,
    ];

    /// Platform matching the compilation target.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else if cfg!(target_os = "ios") {
            Self::Ios
        } else if cfg!(target_os = "android") {
            Self::Android
        } else if cfg!(target_os = "macos") {
            Self::Macos
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Linux
        }
    }

    /// Backend used on this platform. Only the web stores outside the keystore.
    #[must_use]
    pub fn backend_kind(self) -> BackendKind {
        match self {
            Self::Web => BackendKind::Local,
            Self::Ios | Self::Android | Self::Macos | Self::Windows | Self::Linux => {
                BackendKind::Keystore
            },
        }
    }

    /// Lowercase identifier, as accepted by `FromStr`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Web => "web",
            Self::Macos => "macos",
            Self::Windows => "windows",
            Self::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == needle)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|p| p.as_str()).collect();
                format!("unknown platform '{s}' (expected one of: {})", known.join(", "))
            })
    }
}
