//! hidalloc CLI
//!
//! Reports hidden heap allocations in compiled method bodies.

use hidallocc::commands::{
    check_listing, dump_listing, explain_code, parse_check_options, parse_dump_options,
};

fn main() {
    hidallocc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: hidalloc check <listing.json> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --source=<file>               Source text for excerpts and labels");
                eprintln!("  --format=text|json            Output format (default: text)");
                eprintln!("  --color=auto|always|never     Colored output (default: auto)");
                eprintln!("  --parallel                    Classify groups on all cores");
                std::process::exit(1);
            }
            let options = parse_check_options(&args[3..]);
            check_listing(&args[2], &options);
        }
        "dump" => {
            if args.len() < 3 {
                eprintln!("Usage: hidalloc dump <listing.json> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --source=<file>   Source text for excerpts");
                eprintln!("  --all             Print the classification of every group");
                std::process::exit(1);
            }
            let options = parse_dump_options(&args[3..]);
            dump_listing(&args[2], &options);
        }
        "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: hidalloc explain <code>");
                eprintln!("Example: hidalloc explain A0002");
                std::process::exit(1);
            }
            explain_code(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("hidalloc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("hidalloc - hidden heap allocation analyzer");
    println!();
    println!("Usage: hidalloc <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <listing.json>   Report hidden allocations as diagnostics");
    println!("  dump <listing.json>    Print every code group with its instructions");
    println!("  explain <code>         Explain a diagnostic code (e.g., A0001)");
    println!("  help                   Show this help message");
    println!("  version                Show version information");
    println!();
    println!("Set RUST_LOG=hidalloc_analysis=debug for pipeline tracing.");
}
