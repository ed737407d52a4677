use super::*;

#[test]
fn parse_args_overrides() -> AppResult<()> {
    let args = parse_test_args([
        "pagetime",
        "-c",
        "bench.yml",
        "--base",
        "http://example.com",
        "-n",
        "7",
        "--ttfb",
        "--timeout",
        "2s",
        "--connect-timeout",
        "500ms",
        "-o",
        "out.csv",
        "--no-table",
        "--no-progress",
    ])?;

    if args.config.as_deref() != Some("bench.yml") {
        return Err(AppError::validation("Unexpected config"));
    }
    if args.base.as_deref() != Some("http://example.com") {
        return Err(AppError::validation("Unexpected base"));
    }
    if args.requests.map(PositiveU64::get) != Some(7) {
        return Err(AppError::validation("Unexpected requests"));
    }
    if args.ttfb != Some(true) {
        return Err(AppError::validation("Expected ttfb to be enabled"));
    }
    if args.timeout != Some(Duration::from_secs(2)) {
        return Err(AppError::validation("Unexpected timeout"));
    }
    if args.connect_timeout != Some(Duration::from_millis(500)) {
        return Err(AppError::validation("Unexpected connect_timeout"));
    }
    if args.output.as_deref() != Some("out.csv") {
        return Err(AppError::validation("Unexpected output"));
    }
    if !args.no_table || !args.no_progress {
        return Err(AppError::validation("Expected output toggles to be set"));
    }
    Ok(())
}

#[test]
fn parse_args_ttfb_accepts_explicit_value() -> AppResult<()> {
    let args = parse_test_args(["pagetime", "--ttfb", "off"])?;
    if args.ttfb != Some(false) {
        return Err(AppError::validation("Expected ttfb to be disabled"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_zero_requests() -> AppResult<()> {
    if parse_test_args(["pagetime", "-n", "0"]).is_ok() {
        return Err(AppError::validation("Expected Err for zero requests"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_bad_timeout() -> AppResult<()> {
    if parse_test_args(["pagetime", "--timeout", "10parsecs"]).is_ok() {
        return Err(AppError::validation("Expected Err for invalid timeout"));
    }
    Ok(())
}

#[test]
fn parse_args_keepalive_flag() -> AppResult<()> {
    let enabled = parse_test_args(["pagetime", "--keepalive"])?;
    if enabled.keepalive != Some(true) {
        return Err(AppError::validation("Expected keepalive to be enabled"));
    }
    let unset = parse_test_args(["pagetime"])?;
    if unset.keepalive.is_some() {
        return Err(AppError::validation("Expected keepalive to be unset"));
    }
    Ok(())
}
