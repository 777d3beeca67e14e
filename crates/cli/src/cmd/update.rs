//! Update command implementation.

use std::path::Path;

use mdhub_core::update::UpdateOptions;

use crate::UpdateArgs;

pub fn run(vault: &Path, config: Option<&Path>, args: UpdateArgs) {
    let mut service = super::open_service(vault, config);

    // Invoking the command is itself the manual trigger.
    let options = UpdateOptions {
        force: args.force,
        dry_run: args.dry_run,
        manual_trigger: true,
        notify: false,
    };

    match service.update_one(&args.path, options) {
        Ok(Some(record)) => {
            let verb = if args.dry_run { "Would gather" } else { "Gathered" };
            println!(
                "{} {} seed note(s) into {}",
                verb,
                record.added_seed_paths.len(),
                args.path.display()
            );
            for seed in &record.added_seed_paths {
                println!("  + {}", seed.display());
            }
            if !args.dry_run {
                super::save_history(vault, &service);
            }
        }
        Ok(None) => {
            println!("Nothing to do for {}", args.path.display());
        }
        Err(e) => {
            eprintln!("Error updating {}: {}", args.path.display(), e);
            std::process::exit(1);
        }
    }
}
