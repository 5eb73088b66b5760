use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_invalid_url() {
    let mut config = Config::default();
    config.target.url = "not a url".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "target.url"));
}

#[test]
fn test_validate_unsupported_scheme() {
    let mut config = Config::default();
    config.target.url = "ftp://example.com/app".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
}

#[test]
fn test_validate_plain_http_warns() {
    let mut config = Config::default();
    config.target.url = "http://localhost:5173/".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "target.url"));
}

#[test]
fn test_validate_empty_labels() {
    let mut config = Config::default();
    config.target.tab_labels = vec![String::new()];

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "target.tab_labels"));
}

#[test]
fn test_validate_zero_port() {
    let mut config = Config::default();
    config.browser.debug_port = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "browser.debug_port"));
}

#[test]
fn test_validate_missing_chrome_path() {
    let mut config = Config::default();
    config.browser.chrome_path = Some("/nonexistent/chrome".into());

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "browser.chrome_path"));
}

#[test]
fn test_validate_zero_timeout() {
    let mut config = Config::default();
    config.check.render_timeout_secs = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
}

#[test]
fn test_validate_zero_samples_warns() {
    let mut config = Config::default();
    config.check.paragraph_samples = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "check.paragraph_samples"));
}

#[test]
fn test_into_result_reports_first_error() {
    let mut config = Config::default();
    config.browser.debug_port = 0;
    config.check.render_timeout_secs = 0;

    let err = ConfigValidator::validate(&config).into_result().unwrap_err();
    assert!(err.to_string().contains("browser.debug_port"));
}
