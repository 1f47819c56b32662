// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;
use std::sync::Once;

use crate::errors::InputError;

static TRACING_INIT: Once = Once::new();

/// Installs the fmt subscriber. `RUST_LOG` overrides the default `spendwise=warn`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("spendwise=warn"));
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    });
}

/// Local wall-clock time; every derived view is computed against it.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// First instant of a `YYYY-MM` month.
pub fn parse_month(s: &str) -> Result<NaiveDateTime> {
    let day = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(crate::engine::period::start_of_day(day))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    let v = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_| InputError::InvalidAmount(s.to_string()))?;
    Ok(v)
}

/// `+$12.50` / `-$4.00`, the sign taken from the amount.
pub fn fmt_signed(d: &Decimal, symbol: &str) -> String {
    let sign = if *d > Decimal::ZERO { "+" } else if *d < Decimal::ZERO { "-" } else { "" };
    format!("{}{}{:.2}", sign, symbol, d.abs())
}

pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    if d.is_sign_negative() && !d.is_zero() {
        format!("-{}{:.2}", symbol, d.abs())
    } else {
        format!("{}{:.2}", symbol, d)
    }
}

pub fn fmt_percent(d: &Decimal) -> String {
    let rounded = d.round_dp(0);
    if rounded > Decimal::ZERO {
        format!("+{}%", rounded)
    } else {
        format!("{}%", rounded)
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
