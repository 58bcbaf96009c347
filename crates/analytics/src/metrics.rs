use crate::error::AnalyticsError;
use core_types::{Column, DataType, Frame};
use std::collections::HashMap;

/// Conventional trading-day annualization factor for daily series.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

fn float_values<'a>(frame: &'a Frame, name: &str) -> Result<&'a [Option<f64>], AnalyticsError> {
    let column = frame
        .column(name)
        .ok_or_else(|| AnalyticsError::MissingColumn(name.to_string()))?;
    column.as_float().ok_or_else(|| AnalyticsError::WrongDType {
        column: name.to_string(),
        expected: DataType::Float,
        actual: column.dtype(),
    })
}

fn partition_keys<'a>(frame: &'a Frame, name: &str) -> Result<&'a [Option<String>], AnalyticsError> {
    let column = frame
        .column(name)
        .ok_or_else(|| AnalyticsError::MissingColumn(name.to_string()))?;
    column.as_utf8().ok_or_else(|| AnalyticsError::WrongDType {
        column: name.to_string(),
        expected: DataType::Utf8,
        actual: column.dtype(),
    })
}

fn with_columns(frame: &Frame, added: Vec<Column>) -> Result<Frame, AnalyticsError> {
    let mut columns: Vec<Column> = frame.columns().to_vec();
    columns.extend(added);
    Frame::new(columns).map_err(|e| AnalyticsError::Calculation(e.to_string()))
}

/// Row indices grouped by partition key, in first-seen order. A null key is
/// its own partition.
fn partitions(keys: &[Option<String>]) -> Vec<Vec<usize>> {
    let mut order: Vec<Option<&String>> = Vec::new();
    let mut groups: HashMap<Option<&String>, Vec<usize>> = HashMap::new();
    for (i, key) in keys.iter().enumerate() {
        let key = key.as_ref();
        let group = groups.entry(key).or_insert_with(|| {
            order.push(key);
            Vec::new()
        });
        group.push(i);
    }
    order.into_iter().map(|key| groups.remove(&key).unwrap()).collect()
}

/// Adds `PREV_CLOSE` and `LOG_RETURN` columns: for each partition, the prior
/// row's close and `ln(close / prev_close)`. The first row of each partition
/// has no prior close, so both cells are null there.
pub fn log_returns(
    frame: &Frame,
    partition_col: &str,
    close_col: &str,
) -> Result<Frame, AnalyticsError> {
    let keys = partition_keys(frame, partition_col)?;
    let closes = float_values(frame, close_col)?;

    let mut prev_close = vec![None; closes.len()];
    let mut log_return = vec![None; closes.len()];
    for group in partitions(keys) {
        let mut prev: Option<f64> = None;
        for i in group {
            prev_close[i] = prev;
            if let (Some(p), Some(c)) = (prev, closes[i]) {
                log_return[i] = Some((c / p).ln());
            }
            if closes[i].is_some() {
                prev = closes[i];
            }
        }
    }

    tracing::debug!(rows = closes.len(), "computed log returns");
    with_columns(
        frame,
        vec![
            Column::float("PREV_CLOSE", prev_close),
            Column::float("LOG_RETURN", log_return),
        ],
    )
}

/// Adds a `CUMULATIVE_RETURN` column: the running sum of `return_col` within
/// each partition. Null returns contribute nothing and stay null.
pub fn cumulative_log_returns(
    frame: &Frame,
    partition_col: &str,
    return_col: &str,
) -> Result<Frame, AnalyticsError> {
    let keys = partition_keys(frame, partition_col)?;
    let returns = float_values(frame, return_col)?;

    let mut cumulative = vec![None; returns.len()];
    for group in partitions(keys) {
        let mut sum = 0.0;
        for i in group {
            if let Some(r) = returns[i] {
                sum += r;
                cumulative[i] = Some(sum);
            }
        }
    }

    with_columns(frame, vec![Column::float("CUMULATIVE_RETURN", cumulative)])
}

/// Adds a `MEAN_RETURN` column: each partition's mean return, broadcast to
/// every row of the partition. Nulls are ignored.
pub fn mean_returns(
    frame: &Frame,
    partition_col: &str,
    return_col: &str,
) -> Result<Frame, AnalyticsError> {
    let keys = partition_keys(frame, partition_col)?;
    let returns = float_values(frame, return_col)?;

    let mut mean = vec![None; returns.len()];
    for group in partitions(keys) {
        let observed: Vec<f64> = group.iter().filter_map(|&i| returns[i]).collect();
        if observed.is_empty() {
            continue;
        }
        let value = observed.iter().sum::<f64>() / observed.len() as f64;
        for i in group {
            mean[i] = Some(value);
        }
    }

    with_columns(frame, vec![Column::float("MEAN_RETURN", mean)])
}

/// Adds a `STD_DEV_RETURN` column: each partition's sample standard deviation
/// of returns (ddof = 1), broadcast to every row. Partitions with fewer than
/// two observed returns stay null.
pub fn std_dev_returns(
    frame: &Frame,
    partition_col: &str,
    return_col: &str,
) -> Result<Frame, AnalyticsError> {
    let keys = partition_keys(frame, partition_col)?;
    let returns = float_values(frame, return_col)?;

    let mut std_dev = vec![None; returns.len()];
    for group in partitions(keys) {
        let observed: Vec<f64> = group.iter().filter_map(|&i| returns[i]).collect();
        if observed.len() < 2 {
            continue;
        }
        let mean = observed.iter().sum::<f64>() / observed.len() as f64;
        let variance = observed.iter().map(|r| (r - mean).powi(2)).sum::<f64>()
            / (observed.len() - 1) as f64;
        let value = variance.sqrt();
        for i in group {
            std_dev[i] = Some(value);
        }
    }

    with_columns(frame, vec![Column::float("STD_DEV_RETURN", std_dev)])
}

/// Adds an `ANNUALIZED_RETURN` column: `(1 + mean)^factor - 1` per row from
/// `mean_col` (typically the `MEAN_RETURN` produced by `mean_returns`).
pub fn annualized_returns(
    frame: &Frame,
    mean_col: &str,
    annualization_factor: f64,
) -> Result<Frame, AnalyticsError> {
    let means = float_values(frame, mean_col)?;
    let annualized = means
        .iter()
        .map(|m| m.map(|m| (1.0 + m).powf(annualization_factor) - 1.0))
        .collect();

    with_columns(frame, vec![Column::float("ANNUALIZED_RETURN", annualized)])
}

/// Adds an `ANNUALIZED_VOLATILITY` column: `std * sqrt(factor)` per row from
/// `std_col` (typically `STD_DEV_RETURN`).
pub fn annualized_volatility(
    frame: &Frame,
    std_col: &str,
    annualization_factor: f64,
) -> Result<Frame, AnalyticsError> {
    let stds = float_values(frame, std_col)?;
    let annualized = stds
        .iter()
        .map(|s| s.map(|s| s * annualization_factor.sqrt()))
        .collect();

    with_columns(
        frame,
        vec![Column::float("ANNUALIZED_VOLATILITY", annualized)],
    )
}

/// Adds a `{value_col}_SMA_{window}` column: the rolling mean of the last
/// `window` rows within each partition. Rows without a full window (or with a
/// null inside the window) stay null.
pub fn simple_moving_average(
    frame: &Frame,
    partition_col: &str,
    value_col: &str,
    window: usize,
) -> Result<Frame, AnalyticsError> {
    if window == 0 {
        return Err(AnalyticsError::Calculation(
            "moving average window must be positive".to_string(),
        ));
    }
    let keys = partition_keys(frame, partition_col)?;
    let values = float_values(frame, value_col)?;

    let mut sma = vec![None; values.len()];
    for group in partitions(keys) {
        for (pos, &i) in group.iter().enumerate() {
            if pos + 1 < window {
                continue;
            }
            let window_values: Vec<Option<f64>> = group[pos + 1 - window..=pos]
                .iter()
                .map(|&j| values[j])
                .collect();
            if window_values.iter().all(Option::is_some) {
                let sum: f64 = window_values.iter().map(|v| v.unwrap()).sum();
                sma[i] = Some(sum / window as f64);
            }
        }
    }

    let name = format!("{}_SMA_{}", value_col, window);
    with_columns(frame, vec![Column::float(&name, sma)])
}

/// Adds a `{value_col}_EMA_{span}` column: span-based exponential moving
/// average (`alpha = 2 / (span + 1)`), seeded with the partition's first
/// observed value. Null rows stay null without resetting the state.
pub fn exponential_moving_average(
    frame: &Frame,
    partition_col: &str,
    value_col: &str,
    span: usize,
) -> Result<Frame, AnalyticsError> {
    if span == 0 {
        return Err(AnalyticsError::Calculation(
            "moving average span must be positive".to_string(),
        ));
    }
    let keys = partition_keys(frame, partition_col)?;
    let values = float_values(frame, value_col)?;
    let alpha = 2.0 / (span as f64 + 1.0);

    let mut ema = vec![None; values.len()];
    for group in partitions(keys) {
        let mut state: Option<f64> = None;
        for i in group {
            if let Some(value) = values[i] {
                let next = match state {
                    Some(prev) => alpha * value + (1.0 - alpha) * prev,
                    None => value,
                };
                state = Some(next);
                ema[i] = Some(next);
            }
        }
    }

    let name = format!("{}_EMA_{}", value_col, span);
    with_columns(frame, vec![Column::float(&name, ema)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-10,
            "expected {expected}, got {actual}"
        );
    }

    fn two_ticker_frame() -> Frame {
        Frame::new(vec![
            Column::utf8(
                "TICKER",
                vec![
                    Some("AAPL".into()),
                    Some("AAPL".into()),
                    Some("AAPL".into()),
                    Some("MSFT".into()),
                    Some("MSFT".into()),
                    Some("MSFT".into()),
                ],
            ),
            Column::float(
                "CLOSE",
                vec![
                    Some(100.0),
                    Some(110.0),
                    Some(121.0),
                    Some(200.0),
                    Some(190.0),
                    Some(209.0),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn log_returns_follow_prior_close_per_partition() {
        let result = log_returns(&two_ticker_frame(), "TICKER", "CLOSE").unwrap();
        let returns = result.column("LOG_RETURN").unwrap().as_float().unwrap();

        assert_eq!(returns[0], None);
        approx(returns[1].unwrap(), (110.0f64 / 100.0).ln());
        approx(returns[2].unwrap(), (121.0f64 / 110.0).ln());
        // MSFT starts fresh: no bleed from AAPL's last close.
        assert_eq!(returns[3], None);
        approx(returns[4].unwrap(), (190.0f64 / 200.0).ln());
    }

    #[test]
    fn prev_close_is_shifted_within_partition() {
        let result = log_returns(&two_ticker_frame(), "TICKER", "CLOSE").unwrap();
        let prev = result.column("PREV_CLOSE").unwrap().as_float().unwrap();
        assert_eq!(prev[0], None);
        assert_eq!(prev[1], Some(100.0));
        assert_eq!(prev[3], None);
        assert_eq!(prev[4], Some(200.0));
    }

    #[test]
    fn cumulative_returns_sum_within_partition() {
        let frame = log_returns(&two_ticker_frame(), "TICKER", "CLOSE").unwrap();
        let result = cumulative_log_returns(&frame, "TICKER", "LOG_RETURN").unwrap();
        let cumulative = result
            .column("CUMULATIVE_RETURN")
            .unwrap()
            .as_float()
            .unwrap();

        // Log returns telescope: the cumulative sum is ln(last / first).
        assert_eq!(cumulative[0], None);
        approx(cumulative[2].unwrap(), (121.0f64 / 100.0).ln());
        approx(cumulative[5].unwrap(), (209.0f64 / 200.0).ln());
    }

    #[test]
    fn mean_and_std_are_broadcast_per_partition() {
        let frame = log_returns(&two_ticker_frame(), "TICKER", "CLOSE").unwrap();
        let frame = mean_returns(&frame, "TICKER", "LOG_RETURN").unwrap();
        let result = std_dev_returns(&frame, "TICKER", "LOG_RETURN").unwrap();

        let mean = result.column("MEAN_RETURN").unwrap().as_float().unwrap();
        let r1 = (110.0f64 / 100.0).ln();
        let r2 = (121.0f64 / 110.0).ln();
        approx(mean[0].unwrap(), (r1 + r2) / 2.0);
        assert_eq!(mean[0], mean[2]);

        let std = result.column("STD_DEV_RETURN").unwrap().as_float().unwrap();
        let m = (r1 + r2) / 2.0;
        let expected = (((r1 - m).powi(2) + (r2 - m).powi(2)) / 1.0).sqrt();
        approx(std[1].unwrap(), expected);
    }

    #[test]
    fn annualized_metrics_apply_their_factors() {
        let frame = Frame::new(vec![
            Column::utf8("TICKER", vec![Some("AAPL".into())]),
            Column::float("MEAN_RETURN", vec![Some(0.001)]),
            Column::float("STD_DEV_RETURN", vec![Some(0.02)]),
        ])
        .unwrap();

        let frame = annualized_returns(&frame, "MEAN_RETURN", TRADING_DAYS_PER_YEAR).unwrap();
        let frame =
            annualized_volatility(&frame, "STD_DEV_RETURN", TRADING_DAYS_PER_YEAR).unwrap();

        let ar = frame.column("ANNUALIZED_RETURN").unwrap().as_float().unwrap();
        approx(ar[0].unwrap(), 1.001f64.powf(252.0) - 1.0);
        let av = frame
            .column("ANNUALIZED_VOLATILITY")
            .unwrap()
            .as_float()
            .unwrap();
        approx(av[0].unwrap(), 0.02 * 252.0f64.sqrt());
    }

    #[test]
    fn sma_requires_a_full_window() {
        let result =
            simple_moving_average(&two_ticker_frame(), "TICKER", "CLOSE", 2).unwrap();
        let sma = result.column("CLOSE_SMA_2").unwrap().as_float().unwrap();
        assert_eq!(sma[0], None);
        approx(sma[1].unwrap(), (100.0 + 110.0) / 2.0);
        approx(sma[2].unwrap(), (110.0 + 121.0) / 2.0);
        // New partition starts its own window.
        assert_eq!(sma[3], None);
        approx(sma[4].unwrap(), (200.0 + 190.0) / 2.0);
    }

    #[test]
    fn ema_is_seeded_with_the_first_observation() {
        let result =
            exponential_moving_average(&two_ticker_frame(), "TICKER", "CLOSE", 3).unwrap();
        let ema = result.column("CLOSE_EMA_3").unwrap().as_float().unwrap();
        let alpha = 2.0 / 4.0;
        approx(ema[0].unwrap(), 100.0);
        approx(ema[1].unwrap(), alpha * 110.0 + (1.0 - alpha) * 100.0);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let err = log_returns(&two_ticker_frame(), "TICKER", "PRICE").unwrap_err();
        assert!(matches!(err, AnalyticsError::MissingColumn(name) if name == "PRICE"));
    }

    #[test]
    fn wrong_dtype_is_reported_with_both_types() {
        let err = log_returns(&two_ticker_frame(), "CLOSE", "CLOSE").unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::WrongDType {
                expected: DataType::Utf8,
                actual: DataType::Float,
                ..
            }
        ));
    }
}
