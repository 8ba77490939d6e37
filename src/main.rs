use clap::Parser;
use postline::{handle_command, resolve_data_dir, Postline};
use std::process;

fn main() {
    let args = Postline::parse();
    let data_dir = resolve_data_dir(args.data_dir);

    if let Err(e) = handle_command(&data_dir, args.commands) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
