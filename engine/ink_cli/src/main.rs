//! Inkmark CLI

use ink_cli::{commands, init_tracing, parse_args, Command};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() {
        print_usage();
        return;
    }

    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    match invocation.command {
        Command::Help => print_usage(),
        Command::Version => println!("ink {}", env!("CARGO_PKG_VERSION")),
        _ => {
            init_tracing();
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            if let Err(e) = commands::run(&invocation, &mut out) {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("Inkmark: incremental markdown decoration");
    println!();
    println!("Usage: ink <command> [options] <file>...");
    println!();
    println!("Commands:");
    println!("  highlight <file>     Print per-line label runs of a file");
    println!("  blocks <file>        Print the block table of a file");
    println!("  replay <file>...     Feed files as successive versions of one document");
    println!("  verify <file>...     Type each file keystroke by keystroke and compare");
    println!("                       every incremental state with a full decoration");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --json               Dump decorations as JSON (highlight)");
    println!("  --no-code            Do not tokenize fenced code");
    println!("  --full               Reparse the whole document on every update");
    println!("  --context=<n>        Context blocks around an edit (default 1)");
    println!();
    println!("Logging:");
    println!("  RUST_LOG=ink_decor=debug ink replay v1.md v2.md");
}
