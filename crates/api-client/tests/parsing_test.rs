use api_client::{parse_daily_series, parse_listings, ApiError};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const DAILY_BODY: &str = r#"{
    "Meta Data": {
        "1. Information": "Daily Time Series with Splits and Dividend Events",
        "2. Symbol": "AAPL",
        "3. Last Refreshed": "2024-01-03",
        "4. Output Size": "Full size",
        "5. Time Zone": "US/Eastern"
    },
    "Time Series (Daily)": {
        "2024-01-03": {
            "1. open": "184.22",
            "2. high": "185.88",
            "3. low": "183.43",
            "4. close": "184.25",
            "5. adjusted close": "183.90",
            "6. volume": "58414460",
            "7. dividend amount": "0.0000",
            "8. split coefficient": "1.0"
        },
        "2024-01-02": {
            "1. open": "187.15",
            "2. high": "188.44",
            "3. low": "183.89",
            "4. close": "185.64",
            "5. adjusted close": "185.28",
            "6. volume": "82488700",
            "7. dividend amount": "0.0000",
            "8. split coefficient": "1.0"
        },
        "2023-12-29": {
            "1. open": "193.90",
            "2. high": "194.40",
            "3. low": "191.73",
            "4. close": "192.53",
            "5. adjusted close": "192.16",
            "6. volume": "42628800",
            "7. dividend amount": "0.0000",
            "8. split coefficient": "1.0"
        }
    }
}"#;

#[test]
fn daily_series_parses_into_date_ordered_bars() {
    let bars = parse_daily_series(DAILY_BODY, "AAPL", date(2023, 12, 1), date(2024, 1, 31)).unwrap();
    assert_eq!(bars.len(), 3);
    // BTreeMap keys come out ascending regardless of JSON order.
    assert_eq!(bars[0].date, date(2023, 12, 29));
    assert_eq!(bars[2].date, date(2024, 1, 3));
    assert_eq!(bars[0].ticker, "AAPL");
    // Close must carry the adjusted close.
    assert_eq!(bars[1].close, 185.28);
    assert_eq!(bars[1].open, 187.15);
    assert_eq!(bars[1].volume, 82488700.0);
}

#[test]
fn daily_series_is_filtered_to_the_requested_window() {
    let bars = parse_daily_series(DAILY_BODY, "AAPL", date(2024, 1, 1), date(2024, 1, 31)).unwrap();
    assert_eq!(bars.len(), 2);
    assert!(bars.iter().all(|b| b.date >= date(2024, 1, 1)));
}

#[test]
fn provider_error_payload_is_surfaced_with_its_message() {
    let body = r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#;
    let err = parse_daily_series(body, "AAPL", date(2024, 1, 1), date(2024, 1, 31)).unwrap_err();
    match err {
        ApiError::Provider { endpoint, message } => {
            assert_eq!(endpoint, "TIME_SERIES_DAILY_ADJUSTED");
            assert!(message.starts_with("Invalid API call"));
        }
        other => panic!("expected Provider error, got {other:?}"),
    }
}

#[test]
fn rate_limit_note_is_surfaced_as_provider_error() {
    let body = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."}"#;
    let err = parse_daily_series(body, "AAPL", date(2024, 1, 1), date(2024, 1, 31)).unwrap_err();
    assert!(matches!(err, ApiError::Provider { .. }));
}

#[test]
fn malformed_numbers_are_invalid_data() {
    let body = DAILY_BODY.replace("\"58414460\"", "\"not-a-number\"");
    let err = parse_daily_series(&body, "AAPL", date(2023, 12, 1), date(2024, 1, 31)).unwrap_err();
    assert!(matches!(err, ApiError::InvalidData(_)));
}

#[test]
fn listing_csv_parses_and_handles_null_dates() {
    let body = "symbol,name,exchange,assetType,ipoDate,delistingDate,status\n\
                AAPL,Apple Inc,NASDAQ,Stock,1980-12-12,null,Active\n\
                SPY,SPDR S&P 500 ETF Trust,NYSE ARCA,ETF,null,null,Active\n";
    let listings = parse_listings(body).unwrap();
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].symbol, "AAPL");
    assert_eq!(listings[0].ipo_date, Some(date(1980, 12, 12)));
    assert_eq!(listings[1].asset_type, "ETF");
    assert_eq!(listings[1].ipo_date, None);
}
