use delivery_forecast::error::ForecastError;
use series_math::MathError;
use std::io;

#[test]
fn test_error_conversion() {
    // Test IO error conversion
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    // Kernel input errors surface as parameter errors
    let math_error = MathError::InvalidInput("Period must be greater than zero".to_string());
    assert!(matches!(
        ForecastError::from(math_error),
        ForecastError::InvalidParameter(_)
    ));

    let math_error = MathError::CalculationError("overflow".to_string());
    assert!(matches!(
        ForecastError::from(math_error),
        ForecastError::MathError(_)
    ));

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(
        ForecastError::from(json_error),
        ForecastError::ConfigError(_)
    ));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidParameter("alpha must be between 0 and 1".to_string());
    assert!(error.to_string().contains("alpha must be between 0 and 1"));

    let error = ForecastError::InsufficientData {
        required: 14,
        actual: 3,
    };
    assert_eq!(
        error.to_string(),
        "Insufficient data: need at least 14 points, got 3"
    );

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = ForecastError::from(io_error).to_string();
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));
}
