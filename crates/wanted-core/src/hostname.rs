//! Host string helpers.

/// Strip a trailing `:port`, if any.
pub fn hostname_from_host_port(s: &str) -> &str {
    match s.rfind(':') {
        Some(pos) => &s[..pos],
        None => s,
    }
}

/// Last two dot-separated labels of `s`, e.g. `example.com`.
pub fn domain_from_hostname(s: &str) -> String {
    let labels: Vec<&str> = s.split('.').collect();
    labels[labels.len().saturating_sub(2)..].join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_from_host_port() {
        assert_eq!(hostname_from_host_port("host:1234"), "host");
        assert_eq!(hostname_from_host_port("host"), "host");
        assert_eq!(hostname_from_host_port("collector.example.com:443"), "collector.example.com");
        assert_eq!(hostname_from_host_port(""), "");
    }

    #[test]
    fn test_domain_from_hostname() {
        assert_eq!(domain_from_hostname("a.b.example.com"), "example.com");
        assert_eq!(domain_from_hostname("example.com"), "example.com");
        assert_eq!(domain_from_hostname("localhost"), "localhost");
        assert_eq!(domain_from_hostname(""), "");
    }
}
