//! Value parsers for CLI arguments clap cannot check on its own.

use std::net::IpAddr;
use std::path::PathBuf;

const MAX_ROLLBACK_STEPS: u32 = 100;

const MAX_HOSTNAME_LEN: usize = 253;

pub fn validate_port(value: &str) -> Result<u16, String> {
    match value.parse::<u16>() {
        Ok(0) => Err("port must be between 1 and 65535".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!("'{value}' is not a port number between 1 and 65535")),
    }
}

/// Accept an existing regular file.
pub fn validate_config_file_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    match std::fs::metadata(&path) {
        Ok(meta) if meta.is_file() => Ok(path),
        Ok(_) => Err(format!("configuration path is not a file: '{value}'")),
        Err(e) => Err(format!("cannot read configuration file '{value}': {e}")),
    }
}

pub fn validate_rollback_steps(value: &str) -> Result<u32, String> {
    let steps: u32 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a positive number of steps"))?;

    if !(1..=MAX_ROLLBACK_STEPS).contains(&steps) {
        return Err(format!(
            "rollback steps must be between 1 and {MAX_ROLLBACK_STEPS}"
        ));
    }
    Ok(steps)
}

/// Accept an IP address or an RFC 1123 hostname.
pub fn validate_host_address(value: &str) -> Result<String, String> {
    let host = value.trim();

    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }

    // Dotted digits that did not parse as an IP are a malformed IPv4 address.
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') && !host.is_empty() {
        return Err(format!("invalid IPv4 address: '{value}'"));
    }

    let valid_label = |label: &str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };

    if host.is_empty() || host.len() > MAX_HOSTNAME_LEN || !host.split('.').all(valid_label) {
        return Err(format!("invalid host address: '{value}'"));
    }
    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_ports() {
        for ok in ["1", "80", "3000", "65535"] {
            assert!(validate_port(ok).is_ok(), "{ok}");
        }
        for bad in ["0", "65536", "abc", "-1", ""] {
            assert!(validate_port(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_hosts() {
        for ok in ["localhost", "127.0.0.1", "0.0.0.0", "::1", "api.example.com", "my-box"] {
            assert!(validate_host_address(ok).is_ok(), "{ok}");
        }
        let too_long = "x".repeat(300);
        for bad in ["", "   ", "has space", "999.1.1.1", "-bad.example", too_long.as_str()] {
            assert!(validate_host_address(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_rollback_steps() {
        assert_eq!(validate_rollback_steps("3"), Ok(3));
        for bad in ["0", "101", "x"] {
            assert!(validate_rollback_steps(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_config_file_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]").unwrap();
        let path = file.path().to_str().unwrap();
        assert!(validate_config_file_path(path).is_ok());

        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
        assert!(validate_config_file_path("/definitely/not/here.toml").is_err());
    }
}
