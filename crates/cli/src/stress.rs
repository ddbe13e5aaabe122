//! Scripted stress/benchmark harness behind the `test`/`t` REPL command.
//!
//! A direct descendant of the original reference's `testUI`, which offered a
//! numbered menu of memtable- and full-engine-level load tests. Purely a
//! collaborator: it calls only the public `memtable`/`engine` operations and
//! renders elapsed time, never asserting on internal state.

use anyhow::Result;
use engine::Engine;
use memtable::Memtable;
use rand::Rng;
use std::io::{self, Write};
use std::time::Instant;

/// Prompts for a test number and an iteration count, then runs it.
pub fn run_test_ui(
    engine: &mut Engine,
    lines: &mut io::Lines<io::StdinLock<'_>>,
    stdout: &mut io::Stdout,
) -> Result<()> {
    print!(
        "Enter test (memtable insert+search [1], memtable random insert+search [2], \
         memtable random deletion [3], engine insert+search [4], engine random insert [5], \
         engine random search [6], engine random deletion [7]): "
    );
    stdout.flush().ok();
    let Some(number_line) = read_line(lines)? else {
        return Ok(());
    };
    let Ok(test_number) = number_line.trim().parse::<u32>() else {
        println!("Unknown test.");
        return Ok(());
    };

    print!("Enter number of iterations: ");
    stdout.flush().ok();
    let Some(iterations_line) = read_line(lines)? else {
        return Ok(());
    };
    let Ok(iterations) = iterations_line.trim().parse::<usize>() else {
        println!("Unknown iteration count.");
        return Ok(());
    };

    match test_number {
        1 => memtable_insert_and_search(iterations),
        2 => memtable_random_insert_and_search(iterations),
        3 => memtable_random_deletion(iterations),
        4 => engine_insert_and_search(engine, iterations),
        5 => engine_random_insert(engine, iterations),
        6 => engine_random_search(engine, iterations),
        7 => engine_random_deletion(engine, iterations),
        _ => println!("Unknown test."),
    }
    Ok(())
}

fn read_line(lines: &mut io::Lines<io::StdinLock<'_>>) -> Result<Option<String>> {
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}

fn timed(label: &str, f: impl FnOnce()) {
    let start = Instant::now();
    f();
    println!("{label}: {:?}", start.elapsed());
}

fn memtable_insert_and_search(iterations: usize) {
    let mut mem = Memtable::new();
    timed("memtable sequential insert", || {
        for i in 0..iterations {
            let key = format!("key{i}").into_bytes();
            mem.insert(key, b"value".to_vec());
        }
    });
    timed("memtable sequential search", || {
        for i in 0..iterations {
            let key = format!("key{i}").into_bytes();
            std::hint::black_box(mem.lookup(&key));
        }
    });
}

fn memtable_random_insert_and_search(iterations: usize) {
    let mut mem = Memtable::new();
    let mut rng = rand::thread_rng();
    let keys: Vec<Vec<u8>> = (0..iterations)
        .map(|_| format!("key{}", rng.gen::<u32>()).into_bytes())
        .collect();
    timed("memtable random insert", || {
        for key in &keys {
            mem.insert(key.clone(), b"value".to_vec());
        }
    });
    timed("memtable random search", || {
        for key in &keys {
            std::hint::black_box(mem.lookup(key));
        }
    });
}

fn memtable_random_deletion(iterations: usize) {
    let mut mem = Memtable::new();
    let keys: Vec<Vec<u8>> = (0..iterations).map(|i| format!("key{i}").into_bytes()).collect();
    for key in &keys {
        mem.insert(key.clone(), b"value".to_vec());
    }
    timed("memtable random deletion", || {
        for key in &keys {
            mem.remove(key);
        }
    });
}

fn engine_insert_and_search(engine: &mut Engine, iterations: usize) {
    timed("engine sequential write", || {
        for i in 0..iterations {
            let key = format!("key{i}").into_bytes();
            if engine.write(key, b"value".to_vec()).is_err() {
                break;
            }
        }
    });
    timed("engine sequential read", || {
        for i in 0..iterations {
            let key = format!("key{i}").into_bytes();
            let _ = engine.read(&key);
        }
    });
}

fn engine_random_insert(engine: &mut Engine, iterations: usize) {
    let mut rng = rand::thread_rng();
    timed("engine random write", || {
        for _ in 0..iterations {
            let key = format!("key{}", rng.gen::<u32>()).into_bytes();
            if engine.write(key, b"value".to_vec()).is_err() {
                break;
            }
        }
    });
}

fn engine_random_search(engine: &mut Engine, iterations: usize) {
    let mut rng = rand::thread_rng();
    timed("engine random read", || {
        for _ in 0..iterations {
            let key = format!("key{}", rng.gen::<u32>()).into_bytes();
            let _ = engine.read(&key);
        }
    });
}

fn engine_random_deletion(engine: &mut Engine, iterations: usize) {
    let mut rng = rand::thread_rng();
    timed("engine random delete", || {
        for _ in 0..iterations {
            let key = format!("key{}", rng.gen::<u32>()).into_bytes();
            if engine.delete(key).is_err() {
                break;
            }
        }
    });
}
