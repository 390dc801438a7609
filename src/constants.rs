//! Fixed values shared across the store.

/// Soft size limit for JSON payloads, in bytes.
///
/// Exceeding it logs a warning; the write is still attempted.
pub const SOFT_LIMIT_BYTES: usize = 2048;

/// Namespace prepended to every key written to the browser-local backend.
pub const LOCAL_KEY_PREFIX: &str = "ntrl_secure_";

/// Sentinel key used by the keystore availability probe.
pub const PROBE_KEY: &str = "__ntrl_secure_store_probe__";

/// Sentinel value used by the keystore availability probe.
pub const PROBE_VALUE: &str = "probe";

/// Default service name under which keyring entries are filed.
pub const DEFAULT_KEYRING_SERVICE: &str = "ntrl";

/// Environment variable overriding the data directory.
pub const HOME_ENV_VAR: &str = "NTRL_HOME";

/// Config file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "store.toml";

/// Local store database file name inside the data directory.
pub const LOCAL_STORE_FILE_NAME: &str = "local.redb";
