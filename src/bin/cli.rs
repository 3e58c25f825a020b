#![cfg(not(tarpaulin_include))]

use algoviz::command::{self, Command};
use algoviz::session::Session;
use algoviz::trace::TraceConfig;
use std::env;
use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

fn usage(program: &str) {
    eprintln!("Usage: {} [--delay-ms <n>] [--no-trace]", program);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let mut config = TraceConfig::default();
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--no-trace" => config = TraceConfig::disabled(),
            "--delay-ms" => {
                let Some(ms) = rest.next().and_then(|v| v.parse::<u64>().ok()) else {
                    usage(&args[0]);
                    return Ok(());
                };
                config = config.with_delay(Duration::from_millis(ms));
            }
            _ => {
                usage(&args[0]);
                return Ok(());
            }
        }
    }

    let mut session = Session::new(config)?;
    let mut start_time = Instant::now();
    let mut status = String::from("ok");
    println!("algoviz: type 'help' for commands, 'q' to quit");

    loop {
        let elapsed_time = start_time.elapsed().as_secs_f64();
        print!("[{:.1}] ({}) > ", elapsed_time, status);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        start_time = Instant::now();

        let command = match command::parse(line) {
            Ok(command) => command,
            Err(err) => {
                status = err.to_string();
                continue;
            }
        };

        match command {
            Command::Quit => break,
            // Step one at a time so the delay is visible.
            Command::Play if !config.delay.is_zero() => {
                match session.execute(Command::Show) {
                    Ok(out) => println!("{}", out),
                    Err(err) => {
                        status = err.to_string();
                        continue;
                    }
                }
                while !session.playback().is_at_end() {
                    thread::sleep(config.delay);
                    if let Ok(out) = session.execute(Command::Next) {
                        println!("{}", out);
                    }
                }
                status = String::from("ok");
            }
            command => match session.execute(command) {
                Ok(out) => {
                    println!("{}", out);
                    status = String::from("ok");
                }
                Err(err) => status = err.to_string(),
            },
        }
    }
    Ok(())
}
