//! # CLI — interactive shell for the LSM key-value store
//!
//! A REPL-style command-line front end. Reads commands from stdin, calls the
//! public [`engine::Engine`] operations, and prints results to stdout. Purely
//! a thin, collaborator-only caller: every invariant it relies on is
//! enforced by the `engine` crate, not here.
//!
//! ## Commands
//!
//! ```text
//! write | w     prompt for "<key> <value>", insert/overwrite
//! read  | r     prompt for a key, print its value or "Key not found."
//! delete| d     prompt for a key, delete it
//! dump          explicit flush: memtable -> new SSTable
//! print | p     print the memtable's current contents, in key order
//! clear | c     remove every on-disk file and clear the memtable
//! compact| comp run compaction (tombstone apply + small-file merge)
//! test  | t     run a scripted stress test against the engine
//! q             quit
//! ```
//!
//! ## Configuration
//!
//! Read once at startup via [`config::StoreConfig::from_env`] (see that
//! crate for the full list of `LSMKV_*` environment variables).

use anyhow::{Context, Result};
use config::StoreConfig;
use engine::Engine;
use std::io::{self, BufRead, Write};

mod stress;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = StoreConfig::from_env();
    let mut engine = Engine::open(cfg).context("failed to open engine")?;

    println!(
        "store opened at {} (flush_threshold={} bytes)",
        engine.config().data_dir.display(),
        engine.config().flush_threshold
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        print!(
            "Enter command (write [w], read [r], delete [d], dump [dump], \
             print memtable [p], clear [c], test [t], compact [comp]): "
        );
        stdout.flush().ok();

        let Some(command) = next_line(&mut lines)? else {
            break;
        };
        let command = command.trim();

        match command {
            "write" | "w" => {
                print!("Enter key and value, separated by a space: ");
                stdout.flush().ok();
                let Some(line) = next_line(&mut lines)? else {
                    break;
                };
                let mut parts = line.trim().splitn(2, ' ');
                match (parts.next(), parts.next()) {
                    (Some(key), Some(value)) if !key.is_empty() && !value.is_empty() => {
                        match engine.write(key.as_bytes().to_vec(), value.as_bytes().to_vec()) {
                            Ok(()) => println!("OK"),
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    _ => println!("Error: expected \"<key> <value>\""),
                }
            }
            "read" | "r" => {
                print!("Enter key: ");
                stdout.flush().ok();
                let Some(key) = next_line(&mut lines)? else {
                    break;
                };
                match engine.read(key.trim().as_bytes()) {
                    Ok(Some(value)) => println!("Value: {}", String::from_utf8_lossy(&value)),
                    Ok(None) => println!("Key not found."),
                    Err(e) => println!("Error: {e}"),
                }
            }
            "delete" | "d" => {
                print!("Enter key: ");
                stdout.flush().ok();
                let Some(key) = next_line(&mut lines)? else {
                    break;
                };
                match engine.delete(key.trim().as_bytes().to_vec()) {
                    Ok(()) => println!("OK"),
                    Err(e) => println!("Error: {e}"),
                }
            }
            "dump" => match engine.flush() {
                Ok(()) => println!("OK"),
                Err(e) => println!("Error: {e}"),
            },
            "print" | "p" => {
                let mut count = 0;
                for (key, value) in engine.enumerate_memtable() {
                    println!(
                        "{} -> {}",
                        String::from_utf8_lossy(key),
                        String::from_utf8_lossy(value)
                    );
                    count += 1;
                }
                println!("({count} entries)");
            }
            "clear" | "c" => match engine.clear_all() {
                Ok(()) => println!("OK"),
                Err(e) => println!("Error: {e}"),
            },
            "compact" | "comp" => match engine.compact() {
                Ok(()) => println!("OK"),
                Err(e) => println!("Error: {e}"),
            },
            "test" | "t" => stress::run_test_ui(&mut engine, &mut lines, &mut stdout)?,
            "q" => break,
            "" => {}
            other => println!("Unknown command: {other}"),
        }
    }

    Ok(())
}

/// Reads one line from a locked-stdin iterator, returning `Ok(None)` on EOF
/// (Ctrl-D), matching the original reference's `fgets` returning null.
fn next_line(
    lines: &mut io::Lines<io::StdinLock<'_>>,
) -> Result<Option<String>> {
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}
