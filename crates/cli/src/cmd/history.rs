//! History command implementation.

use std::path::Path;

use crate::HistoryArgs;

pub fn run(vault: &Path, config: Option<&Path>, args: HistoryArgs) {
    let service = super::open_service(vault, config);

    let records = service.history(args.path.as_deref(), args.limit);
    if records.is_empty() {
        println!("No recorded updates.");
        return;
    }

    for record in &records {
        println!(
            "{}  {}  {} seed note(s)",
            record.timestamp.to_rfc3339(),
            record.hub_path.display(),
            record.added_seed_paths.len()
        );
    }
}
