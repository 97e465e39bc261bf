#[cfg(any(feature = "with-serde", feature = "with-csv"))]
use anyhow::Context;
use anyhow::{Result, bail};

use crate::args::Cli;
use mailreach::{Reachable, VerificationResult, VerifyError, parse_address};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
pub struct OutputRow {
    #[cfg_attr(feature = "with-serde", serde(flatten))]
    pub result: VerificationResult,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub errors: Vec<String>,
}

impl OutputRow {
    pub fn new(input: &str, outcome: Result<VerificationResult, VerifyError>) -> Self {
        match outcome {
            Ok(result) => Self {
                result,
                errors: Vec::new(),
            },
            Err(VerifyError::Checks { partial, errors }) => Self {
                result: *partial,
                errors: errors.iter().map(ToString::to_string).collect(),
            },
            Err(err) => {
                let email = input.trim().to_lowercase();
                Self {
                    result: VerificationResult {
                        syntax: parse_address(&email),
                        email,
                        ..VerificationResult::default()
                    },
                    errors: vec![err.to_string()],
                }
            }
        }
    }

    /// Syntactically valid, not known to be undeliverable, and every check
    /// completed.
    pub fn is_ok(&self) -> bool {
        self.result.syntax.valid && self.result.reachable != Reachable::No && self.errors.is_empty()
    }

    fn tag(&self) -> &'static str {
        if !self.result.syntax.valid {
            "[INVALID]"
        } else if self.result.reachable == Reachable::No {
            "[UNREACHABLE]"
        } else if !self.errors.is_empty() {
            "[ERROR]"
        } else {
            "[OK]"
        }
    }
}

pub fn write_reports(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => write_human(rows),
        "json" => write_json(rows, cli),
        "ndjson" => write_ndjson(rows, cli),
        "csv" => write_csv(rows, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson|csv"),
    }
}

pub fn any_failed(rows: &[OutputRow]) -> bool {
    rows.iter().any(|row| !row.is_ok())
}

fn write_human(rows: &[OutputRow]) -> Result<()> {
    for row in rows {
        let r = &row.result;
        if !r.syntax.valid {
            println!("{} {} :: {}", row.tag(), r.email, r.syntax.reasons.join("; "));
            continue;
        }
        println!("{:<8} {}  reachable={}", row.tag(), r.email, r.reachable);
        println!(
            "        flags: free={} role={} disposable={} mx={} tld={}",
            r.free, r.role_account, r.disposable, r.has_mx_records, r.tld_exists
        );
        if let Some(smtp) = &r.smtp {
            println!(
                "        smtp: host_exists={} deliverable={} catch_all={} full_inbox={} disabled={}",
                smtp.host_exists, smtp.deliverable, smtp.catch_all, smtp.full_inbox, smtp.disabled
            );
        }
        if let Some(avatar) = &r.avatar {
            if avatar.has_avatar {
                println!("        avatar: {}", avatar.avatar_url);
            } else {
                println!("        avatar: none");
            }
        }
        if !r.suggestion.is_empty() {
            println!("        did you mean: {}", r.suggestion);
        }
        for err in &row.errors {
            println!("        error: {err}");
        }
    }
    Ok(())
}

#[cfg(feature = "with-serde")]
fn write_json(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    let s = serde_json::to_string_pretty(rows)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=json requires the 'with-serde' feature")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut buf = Vec::new();
        for row in rows {
            let line = serde_json::to_string(row)?;
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        write_all_atomically(path, &buf)?;
    } else {
        for row in rows {
            println!("{}", serde_json::to_string(row)?);
        }
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=ndjson requires the 'with-serde' feature")
}

#[cfg(feature = "with-csv")]
const CSV_HEADER: &[&str] = &[
    "email",
    "valid",
    "reachable",
    "free",
    "role_account",
    "disposable",
    "has_mx_records",
    "tld_exists",
    "host_exists",
    "deliverable",
    "catch_all",
    "full_inbox",
    "disabled",
    "has_avatar",
    "suggestion",
    "errors",
];

#[cfg(feature = "with-csv")]
fn write_csv(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        let data = wtr.into_inner()?;
        write_all_atomically(path, &data)?;
    } else {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        wtr.flush()?;
    }
    Ok(())
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=csv requires the 'with-csv' feature")
}

#[cfg(feature = "with-csv")]
fn csv_record(row: &OutputRow) -> Vec<String> {
    let r = &row.result;
    let smtp_field = |f: fn(&mailreach::SmtpCheckResult) -> bool| {
        r.smtp.as_ref().map(|s| f(s).to_string()).unwrap_or_default()
    };
    vec![
        r.email.clone(),
        r.syntax.valid.to_string(),
        r.reachable.to_string(),
        r.free.to_string(),
        r.role_account.to_string(),
        r.disposable.to_string(),
        r.has_mx_records.to_string(),
        r.tld_exists.to_string(),
        smtp_field(|s| s.host_exists),
        smtp_field(|s| s.deliverable),
        smtp_field(|s| s.catch_all),
        smtp_field(|s| s.full_inbox),
        smtp_field(|s| s.disabled),
        r.avatar
            .as_ref()
            .map(|a| a.has_avatar.to_string())
            .unwrap_or_default(),
        r.suggestion.clone(),
        row.errors.join("|"),
    ]
}

#[cfg(any(feature = "with-serde", feature = "with-csv"))]
fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("create {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}
