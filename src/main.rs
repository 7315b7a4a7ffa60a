//! `bd-meta` - inspect and migrate the beads `metadata.json` configuration.
//!
//! Reports where the database and JSONL export live across the flat and
//! `var/` layouts, and migrates legacy `config.json` files.

use beads_metadata::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
