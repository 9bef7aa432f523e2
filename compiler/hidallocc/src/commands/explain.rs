//! The `explain` command: display documentation for diagnostic codes.

use hidalloc_diagnostic::{ErrorCode, ErrorDocs};

/// Display detailed documentation for a given code string.
pub fn explain_code(code_str: &str) {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        eprintln!("Unknown diagnostic code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format AXXXX where X is a digit.");
        eprintln!("Known codes:");
        for code in ErrorCode::ALL {
            eprintln!("  {code}  {}", code.title());
        }
        std::process::exit(1);
    };

    if let Some(doc) = ErrorDocs::get(code) {
        println!("{doc}");
    } else {
        eprintln!("No documentation available for {code_str}");
        std::process::exit(1);
    }
}
