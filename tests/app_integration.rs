use std::fs;
use tokswap::core::SwapError;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const PRICES_JSON: &str = r#"[
        {"currency": "USD", "date": "2023-08-29T07:10:30.000Z", "price": 1},
        {"currency": "ETH", "date": "2023-08-29T07:10:52.000Z", "price": 2000},
        {"currency": "ATOM", "date": "2023-08-29T07:10:50.000Z", "price": 7.186657333333334}
    ]"#;

    pub async fn create_feed_server(status: u16, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/prices.json"))
            .respond_with(ResponseTemplate::new(status).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(feed_url: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
        feed:
          url: "{feed_url}"
          icon_template: "https://icons.example/{{currency}}.svg"
        swap:
          delay_ms: 10
    "#
        );
        std::fs::write(config_file.path(), config_content).expect("Failed to write config file");
        config_file
    }
}

#[test_log::test(tokio::test)]
async fn test_convert_flow_with_mock_feed() {
    let mock_server = test_utils::create_feed_server(200, test_utils::PRICES_JSON).await;
    let config = test_utils::write_config(&format!("{}/prices.json", mock_server.uri()));

    let result = tokswap::run_command(
        tokswap::AppCommand::Convert {
            from: "USD".to_string(),
            to: "ETH".to_string(),
            amount: "2000".to_string(),
            no_delay: false,
            feed_file: None,
        },
        Some(config.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "Catalog should be fetched exactly once");
}

#[test_log::test(tokio::test)]
async fn test_convert_unknown_token_reports_typed_error() {
    let mock_server = test_utils::create_feed_server(200, test_utils::PRICES_JSON).await;
    let config = test_utils::write_config(&format!("{}/prices.json", mock_server.uri()));

    let result = tokswap::run_command(
        tokswap::AppCommand::Convert {
            from: "USD".to_string(),
            to: "BTC".to_string(),
            amount: "10".to_string(),
            no_delay: true,
            feed_file: None,
        },
        Some(config.path().to_str().unwrap()),
    )
    .await;

    let err = result.unwrap_err();
    info!(%err, "Convert rejected");
    assert_eq!(
        err.downcast_ref::<SwapError>(),
        Some(&SwapError::UnknownToken {
            ids: vec!["BTC".to_string()]
        })
    );
}

#[test_log::test(tokio::test)]
async fn test_convert_invalid_amount_reports_typed_error() {
    let mock_server = test_utils::create_feed_server(200, test_utils::PRICES_JSON).await;
    let config = test_utils::write_config(&format!("{}/prices.json", mock_server.uri()));

    let result = tokswap::run_command(
        tokswap::AppCommand::Convert {
            from: "USD".to_string(),
            to: "ETH".to_string(),
            amount: "-5".to_string(),
            no_delay: true,
            feed_file: None,
        },
        Some(config.path().to_str().unwrap()),
    )
    .await;

    assert!(matches!(
        result.unwrap_err().downcast_ref::<SwapError>(),
        Some(SwapError::InvalidInput { .. })
    ));
}

#[test_log::test(tokio::test)]
async fn test_malformed_feed_fails_load() {
    let mock_server = test_utils::create_feed_server(200, r#"{"error": "maintenance"}"#).await;
    let config = test_utils::write_config(&format!("{}/prices.json", mock_server.uri()));

    let result = tokswap::run_command(
        tokswap::AppCommand::Tokens { feed_file: None },
        Some(config.path().to_str().unwrap()),
    )
    .await;

    assert!(matches!(
        result.unwrap_err().downcast_ref::<SwapError>(),
        Some(SwapError::MalformedFeed { .. })
    ));
}

#[test_log::test(tokio::test)]
async fn test_feed_outage_fails_load() {
    let mock_server = test_utils::create_feed_server(503, "").await;
    let config = test_utils::write_config(&format!("{}/prices.json", mock_server.uri()));

    let result = tokswap::run_command(
        tokswap::AppCommand::Tokens { feed_file: None },
        Some(config.path().to_str().unwrap()),
    )
    .await;

    assert!(matches!(
        result.unwrap_err().downcast_ref::<SwapError>(),
        Some(SwapError::FeedUnavailable { .. })
    ));
}

#[test_log::test(tokio::test)]
async fn test_tokens_from_feed_file() {
    let prices_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(prices_file.path(), test_utils::PRICES_JSON).expect("Failed to write prices");
    // Unroutable URL: the file must take precedence over the configured feed.
    let config = test_utils::write_config("http://127.0.0.1:9/prices.json");

    let result = tokswap::run_command(
        tokswap::AppCommand::Tokens {
            feed_file: Some(prices_file.path().to_path_buf()),
        },
        Some(config.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_ok(), "Tokens failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_load_catalog_from_feed_file() {
    let prices_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(prices_file.path(), test_utils::PRICES_JSON).expect("Failed to write prices");
    let config = tokswap::core::config::AppConfig::default();

    let catalog = tokswap::load_catalog(&config, Some(prices_file.path().to_path_buf()))
        .await
        .unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(
        catalog.get("ATOM").unwrap().icon_url,
        "https://raw.githubusercontent.com/Switcheo/token-icons/main/tokens/ATOM.svg"
    );
    let conversion = tokswap::core::convert(
        &catalog,
        &tokswap::core::ConversionRequest::new("ETH", "USD", 1.0).unwrap(),
    )
    .unwrap();
    assert_eq!(conversion.output.to_string(), "2000.0000");
}

#[test_log::test(tokio::test)]
async fn test_sum_needs_no_config() {
    let result = tokswap::run_command(
        tokswap::AppCommand::Sum { n: 100 },
        Some("/nonexistent/tokswap/config.yaml"),
    )
    .await;

    assert!(result.is_ok(), "Sum failed with: {:?}", result.err());
}
