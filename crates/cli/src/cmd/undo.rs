//! Undo command implementation.

use std::path::Path;

use crate::UndoArgs;

pub fn run(vault: &Path, config: Option<&Path>, args: UndoArgs) {
    let mut service = super::open_service(vault, config);

    match service.undo(&args.path) {
        Ok(true) => {
            super::save_history(vault, &service);
            println!("Reverted the last update of {}", args.path.display());
        }
        Ok(false) => {
            eprintln!("No recorded updates for {}", args.path.display());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error undoing update of {}: {}", args.path.display(), e);
            std::process::exit(1);
        }
    }
}
