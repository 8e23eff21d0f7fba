//! Parses a small `key = value` configuration format with sections, reporting
//! the line of the first malformed entry.
//!
//! ```text
//! [server]
//! host = example.org
//! port = 8080   # trailing comments are allowed
//! ```
//!
//! Run with
//!
//! ```bash
//! cargo run -p seqscan --example key_values
//! ```
#![allow(missing_docs)]

use std::collections::BTreeMap;

use seqscan::{MatchFailure, Scanner};

type Config = BTreeMap<String, BTreeMap<String, String>>;

fn is_inline_space(c: &char) -> bool {
    *c == ' ' || *c == '\t'
}

fn is_eol(c: &char) -> bool {
    *c == '\n' || *c == '\r'
}

fn is_key(c: &char) -> bool {
    c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.'
}

fn parse(src: &str) -> Result<Config, MatchFailure> {
    let mut s = Scanner::<char>::from(src);
    let mut config = Config::new();
    let mut section = String::new();

    while s.skip_whitespace().has_more() {
        if s.step(|c| *c == '#').is_some() {
            s.skip_until(is_eol);
            continue;
        }
        if s.step(|c| *c == '[').is_some() {
            section.clear();
            s.skip(is_inline_space)
                .enforce_match_into(is_key, &mut section)?
                .skip(is_inline_space)
                .enforce_step(|c| *c == ']')?;
            config.entry(section.clone()).or_default();
            continue;
        }

        let mut key = String::new();
        s.enforce_match_into(is_key, &mut key)?
            .skip(is_inline_space)
            .enforce_step(|c| *c == '=')?;
        let value: String = s
            .skip(is_inline_space)
            .enforce_until(|c| is_eol(c) || *c == '#')?
            .iter()
            .collect();
        config
            .entry(section.clone())
            .or_default()
            .insert(key, value.trim_end().to_owned());
    }
    Ok(config)
}

fn main() {
    let good = "# demo\r\n[server]\nhost = example.org\nport = 8080   # http\r\n\r\n[paths]\nroot=/srv/www\n";
    match parse(good) {
        Ok(config) => {
            for (section, entries) in &config {
                println!("[{section}]");
                for (k, v) in entries {
                    println!("  {k} = {v}");
                }
            }
        }
        Err(e) => eprintln!("unexpected: {e}"),
    }

    let bad = "[server]\nhost = example.org\nport 8080\n";
    if let Err(e) = parse(bad) {
        println!("rejected: {e}");
    }
}
