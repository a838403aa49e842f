use chrono::NaiveDate;
use delivery_forecast::models::{predict, ModelParameters};
use delivery_forecast::optimizer::optimize_parameters;
use delivery_forecast::seasonality::analyze_seasonality;
use delivery_forecast::trend::detect_trend;
use delivery_forecast::utils::generate_synthetic_series;
use delivery_forecast::validation::cross_validate;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Delivery Forecast: Basic Forecasting Example");
    println!("============================================\n");

    // Two months of daily commit counts with a mild upward drift
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid start date")?;
    let commits = generate_synthetic_series(start, 60, 25.0, 0.4, 3.0, 2024)?;
    println!("Sample data created: {} daily points\n", commits.len());

    let trend = detect_trend(&commits, 7)?;
    println!(
        "Trend: {:?} ({:?}), slope {:.3}/day, change {:.1}%, {} anomalies",
        trend.direction,
        trend.strength,
        trend.slope,
        trend.change_rate,
        trend.anomalies.len()
    );

    let seasonality = analyze_seasonality(&commits);
    println!(
        "Seasonality: {:?} (strength {:.3})\n",
        seasonality.seasonality_type, seasonality.strength
    );

    println!("Searching model parameters...");
    let best = optimize_parameters(&commits, None)?;
    println!("Best model: {} with {:?}", best.model_type, best.parameters);
    for candidate in &best.best_per_model {
        println!(
            "  {:<22} mse {:?}",
            candidate.model_type.to_string(),
            candidate.error_metrics.mse
        );
    }

    let validation = cross_validate(&commits, &best.parameters, 5)?;
    println!(
        "\n5-fold cross-validation: avg MSE {:?}, avg MAPE {:?}",
        validation.mse_avg, validation.mape_avg
    );

    let forecast = predict(&commits, &best.parameters, 7, 0.95)?;
    println!("\n7-day forecast with 95% confidence intervals:");
    for ((point, lower), upper) in forecast
        .predictions
        .iter()
        .zip(forecast.confidence_intervals.lower.iter())
        .zip(forecast.confidence_intervals.upper.iter())
    {
        println!(
            "  {}: {:.2} ({:.2}, {:.2})",
            point.timestamp.date_naive(),
            point.value,
            lower.value,
            upper.value
        );
    }

    println!("\n{}", forecast.error_metrics);

    // Default exponential smoothing for comparison
    let baseline = predict(
        &commits,
        &ModelParameters::ExponentialSmoothing { alpha: 0.3 },
        7,
        0.95,
    )?;
    println!("Baseline (alpha = 0.3) flat forecast: {:.2}", baseline.predictions[0].value);

    Ok(())
}
