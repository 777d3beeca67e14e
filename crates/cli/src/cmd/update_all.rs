//! Update-all command implementation.

use std::path::Path;

use mdhub_core::update::UpdateOptions;

use crate::UpdateAllArgs;

pub fn run(vault: &Path, config: Option<&Path>, args: UpdateAllArgs) {
    let mut service = super::open_service(vault, config);

    let options = UpdateOptions {
        force: args.force,
        dry_run: args.dry_run,
        manual_trigger: true,
        notify: false,
    };

    let result = match service.update_all(options) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error running batch update: {}", e);
            std::process::exit(1);
        }
    };

    if !args.dry_run && result.updated_count > 0 {
        super::save_history(vault, &service);
    }

    for record in &result.records {
        println!(
            "{}: {} seed note(s)",
            record.hub_path.display(),
            record.added_seed_paths.len()
        );
    }
    let verb = if args.dry_run { "would update" } else { "updated" };
    println!(
        "{} hub(s) {}, {} seed note(s) gathered",
        result.updated_count, verb, result.seeds_added_count
    );

    if !result.success() {
        for err in &result.errors {
            eprintln!("{}: {}", err.path.display(), err.message);
        }
        std::process::exit(1);
    }
}
