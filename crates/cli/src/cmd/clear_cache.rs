//! Clear-cache command implementation.

use std::path::Path;

use crate::ClearCacheArgs;

pub fn run(vault: &Path, config: Option<&Path>, args: ClearCacheArgs) {
    let mut service = super::open_service(vault, config);

    service.clear_cache(args.path.as_deref());
    match args.path {
        Some(path) => println!("Dropped cache entry for {}", path.display()),
        None => println!("Dropped all cache entries"),
    }
}
