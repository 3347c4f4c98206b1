//! `User-Agent` header construction.
//!
//! The header identifies the SDK, the Rust toolchain and platform, and
//! optionally the library embedding the SDK and a way to contact its owner:
//!
//! ```text
//! commercetools-rust-sdk/0.1.0 Rust/1.75 (linux; x86_64) terraform-provider-commercetools/0.1 (+https://example.com; +test@example.org)
//! ```

use std::env::consts::{ARCH, OS};

use crate::config::Config;

/// SDK name reported in the `User-Agent` header.
pub const SDK_NAME: &str = "commercetools-rust-sdk";

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum supported Rust version from Cargo.toml.
pub const RUST_VERSION: &str = env!("CARGO_PKG_RUST_VERSION");

/// Builds the `User-Agent` value for `config`.
///
/// Segments are joined by single spaces:
/// 1. `<sdk-name>/<sdk-version>`
/// 2. `Rust/<rust-version> (<os>; <arch>)`
/// 3. `<library-name>[/<library-version>]`, only when a library name is set
/// 4. `(+<contact-url>; +<contact-email>)`, only when either is set
///
/// # Example
///
/// ```rust
/// use commercetools::{build_user_agent, Config, ProjectKey};
///
/// let config = Config::builder()
///     .project_key(ProjectKey::new("p").unwrap())
///     .library_name("my-tool")
///     .contact_email("ops@example.com")
///     .build()
///     .unwrap();
///
/// let user_agent = build_user_agent(&config);
/// assert!(user_agent.starts_with("commercetools-rust-sdk/"));
/// assert!(user_agent.ends_with(" my-tool (+ops@example.com)"));
/// ```
#[must_use]
pub fn build_user_agent(config: &Config) -> String {
    let mut segments = vec![
        format!("{SDK_NAME}/{SDK_VERSION}"),
        format!("Rust/{RUST_VERSION}"),
        format!("({OS}; {ARCH})"),
    ];

    if let Some(name) = config.library_name().filter(|s| !s.is_empty()) {
        match config.library_version().filter(|s| !s.is_empty()) {
            Some(version) => segments.push(format!("{name}/{version}")),
            None => segments.push(name.to_string()),
        }
    }

    let contacts: Vec<String> = [config.contact_url(), config.contact_email()]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .map(|contact| format!("+{contact}"))
        .collect();
    if !contacts.is_empty() {
        segments.push(format!("({})", contacts.join("; ")));
    }

    segments.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigBuilder, ProjectKey};

    fn builder() -> ConfigBuilder {
        Config::builder().project_key(ProjectKey::new("unittest").unwrap())
    }

    fn prefix() -> String {
        format!("{SDK_NAME}/{SDK_VERSION} Rust/{RUST_VERSION} ({OS}; {ARCH})")
    }

    #[test]
    fn test_full_user_agent() {
        let config = builder()
            .library("terraform-provider-commercetools", "0.1")
            .contact_url("https://example.com")
            .contact_email("test@example.org")
            .build()
            .unwrap();

        assert_eq!(
            build_user_agent(&config),
            format!(
                "{} terraform-provider-commercetools/0.1 (+https://example.com; +test@example.org)",
                prefix()
            )
        );
    }

    #[test]
    fn test_contact_without_library() {
        let config = builder()
            .contact_url("https://example.com")
            .contact_email("test@example.org")
            .build()
            .unwrap();

        assert_eq!(
            build_user_agent(&config),
            format!("{} (+https://example.com; +test@example.org)", prefix())
        );
    }

    #[test]
    fn test_library_with_email_only() {
        let config = builder()
            .library("terraform-provider-commercetools", "0.1")
            .contact_email("test@example.org")
            .build()
            .unwrap();

        assert_eq!(
            build_user_agent(&config),
            format!(
                "{} terraform-provider-commercetools/0.1 (+test@example.org)",
                prefix()
            )
        );
    }

    #[test]
    fn test_library_without_version() {
        let config = builder()
            .library_name("terraform-provider-commercetools")
            .contact_url("https://example.com")
            .contact_email("test@example.org")
            .build()
            .unwrap();

        assert_eq!(
            build_user_agent(&config),
            format!(
                "{} terraform-provider-commercetools (+https://example.com; +test@example.org)",
                prefix()
            )
        );
    }

    #[test]
    fn test_version_without_library_name_is_ignored() {
        let config = builder().library("", "0.1").build().unwrap();
        assert_eq!(build_user_agent(&config), prefix());
    }

    #[test]
    fn test_contact_url_only() {
        let config = builder().contact_url("https://example.com").build().unwrap();
        assert_eq!(
            build_user_agent(&config),
            format!("{} (+https://example.com)", prefix())
        );
    }

    #[test]
    fn test_minimal_user_agent_has_no_dangling_separators() {
        let config = builder().build().unwrap();
        let user_agent = build_user_agent(&config);

        assert_eq!(user_agent, prefix());
        assert!(!user_agent.contains("  "));
        assert!(!user_agent.ends_with(' '));
    }
}
