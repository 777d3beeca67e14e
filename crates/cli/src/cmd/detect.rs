//! Detect command implementation.

use std::path::Path;

use crate::DetectArgs;

pub fn run(vault: &Path, config: Option<&Path>, args: DetectArgs) {
    let mut service = super::open_service(vault, config);

    let hubs = match service.detect() {
        Ok(hubs) => hubs,
        Err(e) => {
            eprintln!("Error detecting hubs: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&hubs) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing hubs: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if hubs.is_empty() {
        println!("No hub documents found.");
        return;
    }

    for hub in &hubs {
        let living = if hub.is_living { "living" } else { "static" };
        println!(
            "{}  [{}, {}, {}]",
            hub.path.display(),
            hub.detection_method.as_str(),
            living,
            hub.update_frequency.as_str(),
        );
    }
    println!("{} hub document(s)", hubs.len());
}
