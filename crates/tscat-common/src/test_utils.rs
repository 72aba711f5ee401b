//! Test utilities and shared test helpers for tscat.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use std::sync::Once;

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {
    INIT.call_once(|| {});
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write a file into a directory and return its path.
#[cfg(feature = "tempfile")]
pub fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Catalog documents used across the workspace tests.
pub mod catalog_fixtures {
    /// A trimmed Hungarian catalog of a virtualization frontend.
    ///
    /// Contains final, unfinished, obsolete and numerus messages plus a pair of
    /// messages sharing a source text that only their comments tell apart.
    pub fn hungarian_sample() -> &'static str {
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="hu" sourcelanguage="en">
<context>
    <name>UIMessageCenter</name>
    <message>
        <location filename="../src/globals/UIMessageCenter.cpp" line="141"/>
        <source>OK</source>
        <translation>OK</translation>
    </message>
    <message>
        <source>Yes</source>
        <translation>Igen</translation>
    </message>
    <message>
        <source>No</source>
        <translation>Nem</translation>
    </message>
    <message>
        <source>&lt;p&gt;Failed to open &lt;b&gt;%1&lt;/b&gt;.&lt;/p&gt;</source>
        <translation>&lt;p&gt;Nem sikerült megnyitni: &lt;b&gt;%1&lt;/b&gt;.&lt;/p&gt;</translation>
    </message>
    <message>
        <source>Ignore</source>
        <translation type="obsolete">Figyelmen kívül hagyás</translation>
    </message>
    <message numerus="yes">
        <source>Deleting %n machine(s)...</source>
        <translation>
            <numerusform>%n gép törlése...</numerusform>
        </translation>
    </message>
</context>
<context>
    <name>UIGlobalSettingsProxy</name>
    <message>
        <source>No proxy host is currently specified.</source>
        <translation type="unfinished"></translation>
    </message>
    <message>
        <source>&amp;Host:</source>
        <translation>&amp;Kiszolgáló:</translation>
    </message>
</context>
<context>
    <name>UIGDetails</name>
    <message>
        <source>Disabled</source>
        <comment>details (audio)</comment>
        <translation>Letiltva</translation>
    </message>
    <message>
        <source>Disabled</source>
        <comment>details (network/adapter)</comment>
        <translation>Letiltva</translation>
    </message>
    <message>
        <source>Enabled</source>
        <comment>details (usb)</comment>
        <translation>Engedélyezve</translation>
    </message>
</context>
</TS>
"#
    }

    /// A document whose second context is never closed.
    pub fn unclosed_context() -> &'static str {
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="hu">
<context>
    <name>UIMessageCenter</name>
    <message>
        <source>Yes</source>
        <translation>Igen</translation>
    </message>
</context>
<context>
    <name>UIGDetails</name>
    <message>
        <source>Disabled</source>
        <translation>Letiltva</translation>
    </message>
</TS>
"#
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// A minimal valid configuration as TOML.
    pub fn minimal_config_toml() -> &'static str {
        r#"
[catalogs]
directory = "translations"
file_prefix = "VirtualBox"
default_language = "hu"
languages = ["hu"]
"#
    }

    /// A full configuration as YAML.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "catalogs:\n",
            "  directory: \"/usr/share/virtualbox/nls\"\n",
            "  file_prefix: \"VirtualBox\"\n",
            "  default_language: \"hu\"\n",
            "  languages:\n",
            "    - \"hu\"\n",
            "    - \"de\"\n",
            "    - \"pt_BR\"\n",
            "  watch: true\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  json: true\n"
        )
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for generating context names shaped like UI class names.
    pub fn context_name_strategy() -> impl Strategy<Value = String> {
        r"UI[A-Z][a-zA-Z]{2,16}"
    }

    /// Strategy for generating translatable text, including markup-reserved
    /// characters, accented letters and placeholders.
    pub fn text_strategy() -> impl Strategy<Value = String> {
        r"[a-zA-Z0-9 áéíóöőúüűÁÉ&<>'%.,:!?\x22]{1,40}"
    }

    /// Strategy for generating optional disambiguation comments.
    pub fn comment_strategy() -> impl Strategy<Value = Option<String>> {
        proptest::option::of(r"[a-z]{3,10} \([a-z/]{3,12}\)")
    }

    /// Strategy for generating language codes found in catalog headers.
    pub fn language_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("hu".to_string()),
            Just("de".to_string()),
            Just("pt_BR".to_string()),
            Just("ru".to_string()),
            Just("ja".to_string()),
        ]
    }
}
