// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::engine::period::WeekStart;
use crate::errors::InputError;
use crate::models::Settings;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let s = db::load_settings(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
                println!("{}", pretty_table(&["Setting", "Value"], rows(&s)));
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap().trim();
            let mut s = db::load_settings(conn)?;
            apply(&mut s, key, value)?;
            db::save_settings(conn, &s)?;
            println!("{} = {}", key, value);
        }
        _ => {}
    }
    Ok(())
}

fn rows(s: &Settings) -> Vec<Vec<String>> {
    vec![
        vec!["user-name".into(), s.user_name.clone()],
        vec![
            "profile-image".into(),
            s.profile_image_uri.clone().unwrap_or_default(),
        ],
        vec!["notifications".into(), s.notifications_enabled.to_string()],
        vec!["app-lock".into(), s.app_lock_enabled.to_string()],
        vec!["biometric-lock".into(), s.biometric_lock_enabled.to_string()],
        vec!["currency-symbol".into(), s.currency_symbol.clone()],
        vec![
            "week-start".into(),
            match s.week_starts_on {
                WeekStart::Sunday => "sunday".into(),
                WeekStart::Monday => "monday".into(),
            },
        ],
    ]
}

fn parse_bool(key: &str, value: &str) -> Result<bool, InputError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(InputError::InvalidSetting {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Updates one setting by its CLI name.
pub fn apply(s: &mut Settings, key: &str, value: &str) -> Result<(), InputError> {
    match key {
        "user-name" => {
            if value.is_empty() {
                return Err(InputError::EmptyField("user-name"));
            }
            s.user_name = value.to_string();
        }
        "profile-image" => {
            s.profile_image_uri = Some(value.to_string()).filter(|v| !v.is_empty());
        }
        "notifications" => s.notifications_enabled = parse_bool(key, value)?,
        "app-lock" => s.app_lock_enabled = parse_bool(key, value)?,
        "biometric-lock" => s.biometric_lock_enabled = parse_bool(key, value)?,
        "currency-symbol" => s.currency_symbol = value.to_string(),
        "week-start" => {
            s.week_starts_on = WeekStart::parse(value).ok_or_else(|| InputError::InvalidSetting {
                key: key.to_string(),
                value: value.to_string(),
            })?;
        }
        _ => return Err(InputError::UnknownSetting(key.to_string())),
    }
    Ok(())
}
