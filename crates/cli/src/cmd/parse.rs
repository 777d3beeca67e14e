//! Parse command implementation.

use std::path::Path;

use crate::ParseArgs;

pub fn run(vault: &Path, config: Option<&Path>, args: ParseArgs) {
    let mut service = super::open_service(vault, config);

    match service.parse(&args.path) {
        Ok(Some(hub)) => match serde_json::to_string_pretty(&hub) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing document: {}", e);
                std::process::exit(1);
            }
        },
        Ok(None) => {
            eprintln!("{} is not a hub document", args.path.display());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error parsing {}: {}", args.path.display(), e);
            std::process::exit(1);
        }
    }
}
