//! Configuration loading

#[cfg(test)]
mod tests {
    use checkout_gateway::Config;
    use checkout_gateway::config::PlanFetchPolicy;
    use checkout_gateway::utils::error::GatewayError;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tokio_test::assert_ok;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let file = write_config(
            r#"
server:
  port: 8081
platform:
  base_url: "http://localhost:9000"
checkout:
  max_concurrency: 2
  plan_fetch: after_refresh
"#,
        );

        let config = assert_ok!(Config::from_file(file.path()).await);

        assert_eq!(config.server().port, 8081);
        assert_eq!(config.server().host, "0.0.0.0");
        assert_eq!(config.platform().base_url, "http://localhost:9000");
        assert_eq!(config.platform().push_site, "CotoDigital");
        assert_eq!(config.platform().commit.pin, "111");
        assert_eq!(config.checkout().max_concurrency, 2);
        assert_eq!(config.checkout().plan_fetch, PlanFetchPolicy::AfterRefresh);
        assert_eq!(config.logging().level, "info");
    }

    #[tokio::test]
    async fn test_invalid_values_are_rejected() {
        let file = write_config(
            r#"
checkout:
  default_concurrency: 5
  max_concurrency: 2
"#,
        );

        let err = Config::from_file(file.path()).await.unwrap_err();

        assert!(matches!(err, GatewayError::Config(_)));
        assert!(err.to_string().contains("default_concurrency"));
    }

    #[tokio::test]
    async fn test_malformed_yaml_is_yaml_error() {
        let file = write_config("server: [unterminated");

        let err = Config::from_file(file.path()).await.unwrap_err();

        assert!(matches!(err, GatewayError::Yaml(_)));
    }

    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        if std::env::var("GATEWAY_PORT").is_err() {
            let config = assert_ok!(Config::load(&path).await);
            assert_eq!(config.server().port, 3000);
        }
    }

    #[tokio::test]
    async fn test_example_file_is_valid() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/gateway.yaml.example");

        let config = assert_ok!(Config::from_file(path).await);

        assert!(config.platform().accept_invalid_certs);
        assert_eq!(config.checkout().effective_concurrency(None), 1);
        assert_eq!(config.checkout().effective_concurrency(Some(64)), 4);
    }
}
