//! Add overlap to selected corners of UFO glyphs.
//!
//! Pulls the chosen on-curve points apart along their segments so the
//! contour crosses itself there, leaving room for clean overlap removal.

use add_overlap::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    if let Err(error) = core::run_app(cli_args) {
        core::platform::handle_error(error);
    }
}
