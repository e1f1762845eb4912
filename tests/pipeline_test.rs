use approx::assert_abs_diff_eq;
use chrono::{TimeZone, Utc};
use macd_backtester::prelude::*;
use std::io::Write;

fn series(closes: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2020, 2, 20, 0, 0, 0).unwrap();
    PriceSeries::from_closes("CL=F", start, closes).unwrap()
}

fn engine(contract_size: f64) -> BacktestEngine {
    BacktestEngine::new(
        StrategyConfig::default(),
        RiskConfig::default(),
        FuturesContract::new("CL=F", contract_size).unwrap(),
    )
    .unwrap()
}

#[test]
fn constant_price_series_end_to_end() {
    let result = engine(1.0).run(&series(&[100.0; 40])).unwrap();

    assert_eq!(result.rows.len(), 40);
    assert!(result.rows.iter().all(|r| r.realized_pnl == 0.0));
    assert_eq!(result.metrics.max_drawdown, 0.0);
    assert_eq!(result.metrics.sharpe_ratio, None);

    //short == long once both are defined, which falls into the sell branch
    let signals = result.signals();
    assert!(signals[..29].iter().all(Option::is_none));
    assert!(signals[29..].iter().all(|s| *s == Some(Signal::Sell)));

    assert_eq!(result.transitions.states(), vec![Signal::Sell]);
    assert_eq!(
        result.transitions.probability(Signal::Sell, Signal::Sell),
        Some(1.0)
    );
}

#[test]
fn rising_series_buys_once_long_average_is_defined() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    let result = engine(1.0).run(&series(&closes)).unwrap();
    let signals = result.signals();

    //sma(10) - sma(30) is 10 as soon as sma(30) exists, and macd rises above its signal line
    let first_defined = signals.iter().position(Option::is_some).unwrap();
    assert_eq!(first_defined, 29);
    assert_eq!(signals[29], Some(Signal::Buy));
    assert!(signals[29..].iter().all(|s| *s == Some(Signal::Buy)));

    let row = &result.rows[29].indicators;
    assert_abs_diff_eq!(
        row.sma_short.unwrap() - row.sma_long.unwrap(),
        10.0,
        epsilon = 1e-9
    );

    //the buy is held from the next period
    assert_eq!(result.rows[30].position, Some(1));
    assert_eq!(result.rows[29].position, None);
}

#[test]
fn position_always_lags_signal() {
    let closes: Vec<f64> = (0..120)
        .map(|i| 80.0 + (i as f64 / 5.0).sin() * 6.0 + (i as f64 / 17.0).cos() * 3.0)
        .collect();
    let result = engine(1000.0).run(&series(&closes)).unwrap();

    assert_eq!(result.rows[0].position, Some(0));
    for t in 1..result.rows.len() {
        assert_eq!(
            result.rows[t].position,
            result.rows[t - 1].signal.map(|s| s.value())
        );
    }
}

#[test]
fn realized_pnl_scales_with_contract_size() {
    let closes: Vec<f64> = (0..120)
        .map(|i| 80.0 + (i as f64 / 5.0).sin() * 6.0)
        .collect();
    let small = engine(1.0).run(&series(&closes)).unwrap();
    let large = engine(1000.0).run(&series(&closes)).unwrap();

    assert!(small.rows.iter().any(|r| r.realized_pnl != 0.0));
    for (a, b) in small.rows.iter().zip(large.rows.iter()) {
        assert_abs_diff_eq!(a.realized_pnl * 1000.0, b.realized_pnl, epsilon = 1e-6);
    }
}

#[test]
fn exclusive_rule_never_sells_on_average_tie() {
    let strategy = StrategyConfig {
        rule: SignalRule::Exclusive,
        ..StrategyConfig::default()
    };
    let engine =
        BacktestEngine::new(strategy, RiskConfig::default(), FuturesContract::default()).unwrap();
    let result = engine.run(&series(&[100.0; 40])).unwrap();

    assert!(result
        .signals()
        .iter()
        .flatten()
        .all(|s| *s != Signal::Sell));
}

#[test]
fn empty_series_aborts_with_named_statistic() {
    let err = engine(1.0).run(&series(&[])).unwrap_err();
    match err {
        BacktestError::InsufficientData { statistic, .. } => {
            assert_eq!(statistic, "mean daily P&L")
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn csv_file_drives_full_run() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Date,Open,High,Low,Close,Volume").unwrap();
    for i in 0..50 {
        let close = 70.0 + (i as f64 / 4.0).sin() * 3.0;
        let day = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(i);
        writeln!(file, "{},{c},{c},{c},{c},1000", day, c = close).unwrap();
    }

    let loaded = load_csv(file.path(), "CL=F").unwrap();
    assert_eq!(loaded.len(), 50);

    let result = engine(1000.0).run(&loaded).unwrap();
    let dir = tempfile::tempdir().unwrap();
    save_table_csv(&result.rows, &dir.path().join("table.csv")).unwrap();
    save_metrics_json(&result.metrics, &dir.path().join("metrics.json")).unwrap();
    save_transitions_json(&result.transitions, &dir.path().join("transitions.json")).unwrap();

    assert!(dir.path().join("table.csv").exists());
    assert!(dir.path().join("metrics.json").exists());
    assert!(dir.path().join("transitions.json").exists());
}
